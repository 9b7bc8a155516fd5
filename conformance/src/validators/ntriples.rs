//! N-Triples validator.
//!
//! Serializes the graph to N-Triples and checks that:
//! - Every line is one statement terminated by ` .`
//! - `sophia_turtle` parses the document and reads back as many statements
//!   as the graph holds
//! - The parsed triples are exactly those parsed from the Turtle output, so
//!   both formats resolve relative IRIs to the same terms

use rdf_orm::{Format, Graph, PrefixMap};

use super::{read_ntriples, read_turtle, statement_count};
use crate::report::Check;

const FORMAT: Format = Format::NTriples;

/// Validates the N-Triples serialization of `graph`.
pub fn validate(graph: &Graph, prefixes: &PrefixMap) -> Vec<Check> {
    let content = match graph.serialize_with(FORMAT, prefixes) {
        Ok(content) => content,
        Err(e) => return vec![Check::failed(FORMAT, "serialization", e.to_string())],
    };

    let malformed = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.ends_with(" ."))
        .map(|(i, _)| format!("line {}: does not end with ` .`", i + 1))
        .collect();
    let mut checks = vec![Check::new(FORMAT, "line termination", malformed)];

    let triples = match read_ntriples(&content) {
        Ok(triples) => triples,
        Err(e) => {
            checks.push(Check::failed(
                FORMAT,
                "statement count",
                format!("does not parse: {e}"),
            ));
            return checks;
        }
    };
    checks.push(statement_count(FORMAT, triples.len(), graph.len()));
    checks.push(agrees_with_turtle(graph, prefixes, &triples));
    checks
}

fn agrees_with_turtle(graph: &Graph, prefixes: &PrefixMap, triples: &super::Triples) -> Check {
    const NAME: &str = "same triples as Turtle";
    let turtle = match graph.serialize_with(Format::Turtle, prefixes) {
        Ok(content) => content,
        Err(e) => return Check::failed(FORMAT, NAME, format!("no Turtle to compare: {e}")),
    };
    let expected = match read_turtle(&turtle) {
        Ok(expected) => expected,
        Err(e) => return Check::failed(FORMAT, NAME, format!("Turtle does not parse: {e}")),
    };

    let issues = triples
        .difference(&expected)
        .map(|t| format!("only in N-Triples: {t:?}"))
        .chain(
            expected
                .difference(triples)
                .map(|t| format!("only in Turtle: {t:?}")),
        )
        .collect();
    Check::new(FORMAT, NAME, issues)
}
