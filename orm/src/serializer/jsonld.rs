//! JSON-LD 1.1 serializer.
//!
//! Produces a flattened document: an `@context` built from the
//! [`PrefixMap`] and an `@graph` array with one node object per subject.
//! Strings, integers and booleans are written as native JSON values; every
//! other literal becomes a value object.
//!
//! Node identifiers may stay relative to `@base`. Property keys and datatypes
//! are vocabulary-relative in JSON-LD, so they are always written compacted
//! or absolute.

use serde_json::{json, Map, Value};

use super::{group_by_subject, PrefixMap};
use crate::error::Result;
use crate::graph::Graph;
use crate::term::{Identifier, Iri, Literal, Object};
use crate::vocab;

/// Serializes `graph` to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
///
/// # Errors
///
/// Returns [`Error::RelativeIri`](crate::Error::RelativeIri) if a predicate
/// or datatype is a relative IRI and `prefixes` has no base.
pub fn to_json_ld(graph: &Graph, prefixes: &PrefixMap) -> Result<Value> {
    Ok(json!({
        "@context": build_context(prefixes),
        "@graph": build_nodes(graph, prefixes)?
    }))
}

fn build_context(prefixes: &PrefixMap) -> Value {
    let mut ctx = Map::new();
    if let Some(base) = prefixes.base() {
        ctx.insert("@base".to_owned(), json!(base.as_str()));
    }
    // The empty string is not a valid JSON-LD term.
    for ns in prefixes.namespaces().iter().filter(|ns| !ns.prefix().is_empty()) {
        ctx.insert(ns.prefix().to_owned(), json!(ns.iri().as_str()));
    }
    Value::Object(ctx)
}

fn build_nodes(graph: &Graph, prefixes: &PrefixMap) -> Result<Value> {
    let mut nodes = Vec::new();
    for (subject, predicates) in group_by_subject(graph) {
        let mut node = Map::new();
        node.insert("@id".to_owned(), json!(node_id(subject, prefixes)));
        for (predicate, objects) in predicates {
            let named_types = predicate.as_str() == vocab::RDF_TYPE
                && objects
                    .iter()
                    .all(|o| matches!(o, Object::Node(Identifier::Named(_))));
            if named_types {
                let types = objects
                    .iter()
                    .filter_map(|o| o.as_identifier())
                    .map(|t| json!(node_id(t, prefixes)))
                    .collect();
                node.insert("@type".to_owned(), one_or_many(types));
            } else {
                let values: Vec<Value> = objects
                    .iter()
                    .map(|o| object_to_json(o, prefixes))
                    .collect::<Result<_>>()?;
                node.insert(vocab_term(predicate, prefixes)?, one_or_many(values));
            }
        }
        nodes.push(Value::Object(node));
    }
    Ok(Value::Array(nodes))
}

fn one_or_many(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.swap_remove(0)
    } else {
        Value::Array(values)
    }
}

fn iri(iri: &Iri, prefixes: &PrefixMap) -> String {
    compact(iri.as_str(), prefixes).unwrap_or_else(|| iri.as_str().to_owned())
}

fn compact(iri: &str, prefixes: &PrefixMap) -> Option<String> {
    prefixes
        .compact(iri)
        .filter(|compact| !compact.starts_with(':'))
}

/// A property key or datatype: resolved against the base, then compacted.
fn vocab_term(iri: &Iri, prefixes: &PrefixMap) -> Result<String> {
    let absolute = prefixes.resolve(iri)?;
    Ok(compact(&absolute, prefixes).unwrap_or_else(|| absolute.into_owned()))
}

fn node_id(id: &Identifier, prefixes: &PrefixMap) -> String {
    match id {
        Identifier::Named(named) => iri(named, prefixes),
        Identifier::Blank(label) => format!("_:{label}"),
    }
}

fn object_to_json(object: &Object, prefixes: &PrefixMap) -> Result<Value> {
    match object {
        Object::Node(id) => Ok(json!({ "@id": node_id(id, prefixes) })),
        Object::Literal(lit) => literal_to_json(lit, prefixes),
    }
}

fn literal_to_json(lit: &Literal, prefixes: &PrefixMap) -> Result<Value> {
    if let Some(tag) = lit.language() {
        return Ok(json!({ "@value": lit.lexical(), "@language": tag }));
    }
    Ok(match lit.datatype().as_str() {
        vocab::XSD_STRING => json!(lit.lexical()),
        vocab::XSD_INTEGER => match lit.lexical().parse::<i64>() {
            Ok(n) => json!(n),
            Err(_) => typed_value(lit, prefixes)?,
        },
        vocab::XSD_BOOLEAN => match lit.lexical() {
            "true" => json!(true),
            "false" => json!(false),
            _ => typed_value(lit, prefixes)?,
        },
        _ => typed_value(lit, prefixes)?,
    })
}

fn typed_value(lit: &Literal, prefixes: &PrefixMap) -> Result<Value> {
    Ok(json!({ "@value": lit.lexical(), "@type": vocab_term(lit.datatype(), prefixes)? }))
}
