//! Turtle 1.1 validator.
//!
//! Serializes the graph to Turtle and re-parses it with `sophia_turtle`:
//! - The document parses without errors
//! - The parser reads back exactly as many statements as the graph holds
//! - Every prefix binding is declared once

use rdf_orm::{Format, Graph, PrefixMap};

use super::{read_turtle, statement_count};
use crate::report::Check;

const FORMAT: Format = Format::Turtle;

/// Validates the Turtle serialization of `graph`.
pub fn validate(graph: &Graph, prefixes: &PrefixMap) -> Vec<Check> {
    let content = match graph.serialize_with(FORMAT, prefixes) {
        Ok(content) => content,
        Err(e) => return vec![Check::failed(FORMAT, "serialization", e.to_string())],
    };

    let parsed = match read_turtle(&content) {
        Ok(triples) => statement_count(FORMAT, triples.len(), graph.len()),
        Err(e) => Check::failed(FORMAT, "statement count", format!("does not parse: {e}")),
    };
    vec![parsed, check_prefixes(&content, prefixes)]
}

fn check_prefixes(content: &str, prefixes: &PrefixMap) -> Check {
    let issues = prefixes
        .namespaces()
        .iter()
        .filter(|ns| {
            let directive = format!("@prefix {}: <{}> .", ns.prefix(), ns.iri());
            content.lines().filter(|l| *l == directive).count() != 1
        })
        .map(|ns| format!("`{}:` is not declared exactly once", ns.prefix()))
        .collect();
    Check::new(FORMAT, "prefix declarations", issues)
}
