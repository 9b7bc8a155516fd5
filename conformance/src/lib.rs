//! rdf-orm conformance suite.
//!
//! Serializes a graph in every supported format and reads each document back
//! with an independent parser, so that what `rdf-orm` writes is checked
//! against the standards rather than against its own expectations.
//!
//! # Conformance Scope
//!
//! | Format | Standard | Checked with |
//! |--------|----------|--------------|
//! | Turtle | Turtle 1.1 | `sophia_turtle` |
//! | N-Triples | RDF 1.1 N-Triples | `sophia_turtle` |
//! | JSON-LD | JSON-LD 1.1, flattened form | `serde_json` |
//!
//! # Entry Point
//!
//! ```
//! use rdf_orm::{Graph, PrefixMap};
//!
//! let report = rdf_orm_conformance::run_all(&Graph::new(), &PrefixMap::default())?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

pub use report::{Check, ConformanceReport};

use rdf_orm::{Graph, PrefixMap};

/// Runs all conformance validators against `graph` and returns the
/// aggregated report.
///
/// Validators are run in this order:
/// 1. Turtle 1.1
/// 2. N-Triples, including agreement with the Turtle output
/// 3. JSON-LD 1.1
///
/// A format that cannot serialize the graph at all, such as N-Triples for a
/// relative IRI with no base, is reported as a failed check.
///
/// # Errors
///
/// Returns an error only if the JSON-LD output is not JSON at all.
pub fn run_all(graph: &Graph, prefixes: &PrefixMap) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    report.extend(validators::turtle::validate(graph, prefixes));
    report.extend(validators::ntriples::validate(graph, prefixes));
    report.extend(validators::jsonld::validate(graph, prefixes)?);

    Ok(report)
}

#[cfg(test)]
mod tests_unit {
    use std::rc::Rc;

    use rdf_orm::{
        vocab, AttributeValue, Format, Identifier, Instance, Iri, Literal, ModelDescriptor,
        Namespace, RelationDescriptor, Statement,
    };

    use super::*;

    fn assert_conforms(graph: &Graph, prefixes: &PrefixMap) -> anyhow::Result<()> {
        let report = run_all(graph, prefixes)?;
        assert!(report.all_passed(), "{report}");
        assert_eq!(report.checks().len(), 8);
        Ok(())
    }

    fn catalogue() -> anyhow::Result<Graph> {
        let ex = Namespace::new("ex", "https://example.com/")?;
        let price = ModelDescriptor::builder("Price")
            .type_iri(ex.term("Price")?)
            .field("currency", ex.term("hasCurrency")?)
            .field("value", vocab::rdf_value())
            .build_shared()?;
        let item = ModelDescriptor::builder("Item")
            .type_iri(ex.term("Item")?)
            .field("label", vocab::rdfs_label())
            .field("price", ex.term("hasPrice")?)
            .build_shared()?;
        let class = ModelDescriptor::builder("OWLClass")
            .type_iri(vocab::owl_class())
            .field("label", vocab::rdfs_label())
            .field(
                "items",
                RelationDescriptor::bidirectional(ex.term("hasItem")?, ex.term("isItemOf")?),
            )
            .build_shared()?;

        let mut individual = Instance::new(
            &class,
            Some(Identifier::named("https://example.com/individual-1")?),
            [("label", "Individual 1")],
        )?;
        let prices = [("usd", 15), ("aud", 5), ("usd", 11)];
        for (n, (currency, value)) in prices.into_iter().enumerate() {
            let p = Instance::new(
                &price,
                None,
                [
                    ("currency", AttributeValue::from(currency)),
                    ("value", AttributeValue::from(value)),
                ],
            )?;
            let i = Instance::new(
                &item,
                Some(Identifier::named(format!("https://example.com/item-{}", n + 1))?),
                [
                    ("label", AttributeValue::from(format!("item {}", n + 1))),
                    ("price", AttributeValue::from(p)),
                ],
            )?
            .into_shared();
            individual.push("items", Rc::clone(&i))?;
        }
        Ok(individual.build_graph()?)
    }

    #[test]
    fn empty_graph_conforms() -> anyhow::Result<()> {
        assert_conforms(&Graph::new(), &PrefixMap::default())
    }

    #[test]
    fn catalogue_conforms() -> anyhow::Result<()> {
        let prefixes = PrefixMap::default().with(Namespace::new("ex", "https://example.com/")?);
        let graph = catalogue()?;
        assert_eq!(graph.len(), 3 * 6 + 2 + 3 * 2);
        assert_conforms(&graph, &prefixes)
    }

    #[test]
    fn awkward_literals_conform() -> anyhow::Result<()> {
        let s = Identifier::named("https://example.com/s")?;
        let graph: Graph = [
            Statement::new(s.clone(), vocab::rdfs_label(), Literal::from("quote \" and \\ slash")),
            Statement::new(s.clone(), vocab::rdfs_label(), Literal::from("line\nbreak\ttab")),
            Statement::new(
                s.clone(),
                vocab::rdfs_label(),
                Literal::lang_string("colour", "en-GB")?,
            ),
            Statement::new(s.clone(), vocab::rdf_value(), Literal::from(-42)),
            Statement::new(s.clone(), vocab::rdf_value(), Literal::from(0.25)),
            Statement::new(s.clone(), vocab::rdf_value(), Literal::from(true)),
            Statement::new(
                s,
                vocab::rdfs_comment(),
                Literal::typed("2024-01-01", Iri::new("http://www.w3.org/2001/XMLSchema#date")?),
            ),
        ]
        .into_iter()
        .collect();
        assert_conforms(&graph, &PrefixMap::default())
    }

    #[test]
    fn relative_iris_conform_with_a_base() -> anyhow::Result<()> {
        let prefixes = PrefixMap::default().with_base(Iri::new("https://example.com/")?)?;
        let graph: Graph = [
            Statement::new(Identifier::named("item-1")?, vocab::rdf_type(), Iri::new("Item")?),
            Statement::new(
                rdf_orm::allocate(),
                Iri::new("https://example.com/hasItem")?,
                Identifier::named("item-1")?,
            ),
        ]
        .into_iter()
        .collect();
        assert_conforms(&graph, &prefixes)
    }

    #[test]
    fn base_without_trailing_slash_resolves_alike_in_both_formats() -> anyhow::Result<()> {
        let prefixes = PrefixMap::default().with_base(Iri::new("https://example.com/a/b")?)?;
        let graph: Graph = [
            Statement::new(Identifier::named("c")?, vocab::rdf_type(), Iri::new("../T")?),
            Statement::new(Identifier::named("/d")?, vocab::rdfs_label(), Literal::from("d")),
            Statement::new(Identifier::named("#e")?, vocab::rdf_value(), Literal::from(1)),
        ]
        .into_iter()
        .collect();
        assert_conforms(&graph, &prefixes)
    }

    #[test]
    fn relative_iris_without_a_base_fail_ntriples() -> anyhow::Result<()> {
        let graph: Graph = [Statement::new(
            Identifier::named("item-1")?,
            vocab::rdf_type(),
            Iri::new("https://example.com/T")?,
        )]
        .into_iter()
        .collect();
        let report = run_all(&graph, &PrefixMap::default())?;
        let nt: Vec<&Check> = report.for_format(Format::NTriples).collect();
        assert_eq!(nt.len(), 1);
        assert_eq!(nt[0].name, "serialization");
        assert!(nt[0].issues[0].contains("item-1"));
        Ok(())
    }
}
