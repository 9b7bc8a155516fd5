//! JSON-LD 1.1 validator.
//!
//! Verifies that the JSON-LD serialization is a well-formed flattened
//! document:
//! - Has an `@context` binding every prefix of the [`PrefixMap`]
//! - Has an `@graph` array of node objects, each with an `@id`
//! - Carries exactly one value per statement of the graph
//! - Uses no relative property keys, which JSON-LD processors would drop

use anyhow::{Context, Result};
use rdf_orm::{Format, Graph, PrefixMap};
use serde_json::{Map, Value};

use super::statement_count;
use crate::report::Check;

const FORMAT: Format = Format::JsonLd;

/// Validates the JSON-LD serialization of `graph`.
///
/// # Errors
///
/// Returns an error if the output is not JSON at all.
pub fn validate(graph: &Graph, prefixes: &PrefixMap) -> Result<Vec<Check>> {
    let content = match graph.serialize_with(FORMAT, prefixes) {
        Ok(content) => content,
        Err(e) => return Ok(vec![Check::failed(FORMAT, "serialization", e.to_string())]),
    };
    let value: Value =
        serde_json::from_str(&content).context("JSON-LD output is not valid JSON")?;

    let mut checks = vec![check_context(&value, prefixes)];
    checks.extend(check_graph(&value, graph.len()));
    Ok(checks)
}

/// Verifies that the `@context` binds every non-empty prefix.
fn check_context(value: &Value, prefixes: &PrefixMap) -> Check {
    const NAME: &str = "@context bindings";
    let Some(context) = value.get("@context").and_then(Value::as_object) else {
        return Check::failed(FORMAT, NAME, "missing @context object");
    };

    let issues = prefixes
        .namespaces()
        .iter()
        .filter(|ns| !ns.prefix().is_empty())
        .filter(|ns| context.get(ns.prefix()).and_then(Value::as_str) != Some(ns.iri().as_str()))
        .map(|ns| format!("prefix `{}` is not bound to <{}>", ns.prefix(), ns.iri()))
        .collect();
    Check::new(FORMAT, NAME, issues)
}

/// Verifies the `@graph` node objects and counts the statements they carry.
fn check_graph(value: &Value, expected: usize) -> Vec<Check> {
    const NAME: &str = "node objects";
    let Some(nodes) = value.get("@graph").and_then(Value::as_array) else {
        return vec![Check::failed(FORMAT, NAME, "missing @graph array")];
    };

    let mut issues = Vec::new();
    let mut statements = 0usize;
    for (i, node) in nodes.iter().enumerate() {
        let Some(object) = node.as_object() else {
            issues.push(format!("@graph[{i}] is not a node object"));
            continue;
        };
        if !object.get("@id").is_some_and(Value::is_string) {
            issues.push(format!("@graph[{i}] has no string @id"));
        }
        issues.extend(
            relative_keys(object).map(|key| format!("@graph[{i}] has relative key `{key}`")),
        );
        statements += object
            .iter()
            .filter(|(key, _)| key.as_str() != "@id")
            .map(|(_, v)| v.as_array().map_or(1, Vec::len))
            .sum::<usize>();
    }

    vec![
        Check::new(FORMAT, NAME, issues),
        statement_count(FORMAT, statements, expected),
    ]
}

/// Keys that are neither keywords, compact IRIs nor absolute IRIs.
fn relative_keys(object: &Map<String, Value>) -> impl Iterator<Item = &String> {
    object
        .keys()
        .filter(|key| !key.starts_with('@') && !key.contains(':'))
}
