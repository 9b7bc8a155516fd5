//! Turtle 1.1 serializer.
//!
//! Writes the `@base` and `@prefix` directives of the [`PrefixMap`], then one
//! block per subject. `rdf:type` comes first in each block and is written as
//! `a`; IRIs under a bound namespace are written as prefixed names.

use super::{escape_string, group_by_subject, PrefixMap};
use crate::graph::Graph;
use crate::term::{Identifier, Iri, Literal, Object};
use crate::vocab;

/// Serializes `graph` to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph, prefixes: &PrefixMap) -> String {
    let mut out = String::with_capacity(96 * graph.len() + 256);

    if let Some(base) = prefixes.base() {
        out.push_str(&format!("@base <{base}> .\n"));
    }
    for ns in prefixes.namespaces() {
        out.push_str(&format!("@prefix {}: <{}> .\n", ns.prefix(), ns.iri()));
    }

    for (subject, predicates) in group_by_subject(graph) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&node(subject, prefixes));

        let mut ordered: Vec<_> = predicates.into_iter().collect();
        ordered.sort_by_key(|(predicate, _)| predicate.as_str() != vocab::RDF_TYPE);
        let count = ordered.len();
        for (i, (predicate, objects)) in ordered.into_iter().enumerate() {
            let objects: Vec<String> = objects.iter().map(|o| object(o, prefixes)).collect();
            out.push_str(&format!(
                "\n  {} {}",
                predicate_term(predicate, prefixes),
                objects.join(" , ")
            ));
            out.push_str(if i + 1 == count { " ." } else { " ;" });
        }
        out.push('\n');
    }

    out
}

fn iri(iri: &Iri, prefixes: &PrefixMap) -> String {
    prefixes
        .compact(iri.as_str())
        .unwrap_or_else(|| format!("<{iri}>"))
}

fn predicate_term(predicate: &Iri, prefixes: &PrefixMap) -> String {
    if predicate.as_str() == vocab::RDF_TYPE {
        "a".to_owned()
    } else {
        iri(predicate, prefixes)
    }
}

fn node(id: &Identifier, prefixes: &PrefixMap) -> String {
    match id {
        Identifier::Named(named) => iri(named, prefixes),
        Identifier::Blank(label) => format!("_:{label}"),
    }
}

fn object(object: &Object, prefixes: &PrefixMap) -> String {
    match object {
        Object::Node(id) => node(id, prefixes),
        Object::Literal(lit) => literal(lit, prefixes),
    }
}

fn literal(lit: &Literal, prefixes: &PrefixMap) -> String {
    let quoted = format!("\"{}\"", escape_string(lit.lexical()));
    if let Some(tag) = lit.language() {
        return format!("{quoted}@{tag}");
    }
    match lit.datatype().as_str() {
        vocab::XSD_STRING => quoted,
        vocab::XSD_INTEGER if is_integer(lit.lexical()) => lit.lexical().to_owned(),
        vocab::XSD_BOOLEAN if matches!(lit.lexical(), "true" | "false") => {
            lit.lexical().to_owned()
        }
        _ => format!("{quoted}^^{}", iri(lit.datatype(), prefixes)),
    }
}

fn is_integer(lexical: &str) -> bool {
    let digits = lexical.strip_prefix(['+', '-']).unwrap_or(lexical);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
