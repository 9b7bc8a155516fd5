//! N-Triples serializer.
//!
//! One statement per line, in the graph's total order. N-Triples has neither
//! prefixes nor a base directive, so every IRI is written in absolute form:
//! relative IRIs are resolved against the base of the [`PrefixMap`].

use super::{escape_string, PrefixMap};
use crate::error::Result;
use crate::graph::Graph;
use crate::term::{Identifier, Iri, Literal, Object};
use crate::vocab;

/// Serializes `graph` to an N-Triples string.
///
/// # Errors
///
/// Returns [`Error::RelativeIri`](crate::Error::RelativeIri) if the graph
/// holds a relative IRI and `prefixes` has no base.
pub fn to_ntriples(graph: &Graph, prefixes: &PrefixMap) -> Result<String> {
    let mut out = String::with_capacity(128 * graph.len());
    for st in graph {
        triple(
            &mut out,
            &node(&st.subject, prefixes)?,
            &iri(&st.predicate, prefixes)?,
            &object(&st.object, prefixes)?,
        );
    }
    Ok(out)
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push(' ');
    out.push_str(pred);
    out.push(' ');
    out.push_str(obj);
    out.push_str(" .\n");
}

fn iri(iri: &Iri, prefixes: &PrefixMap) -> Result<String> {
    Ok(format!("<{}>", prefixes.resolve(iri)?))
}

fn node(id: &Identifier, prefixes: &PrefixMap) -> Result<String> {
    match id {
        Identifier::Named(named) => iri(named, prefixes),
        Identifier::Blank(label) => Ok(format!("_:{label}")),
    }
}

fn object(object: &Object, prefixes: &PrefixMap) -> Result<String> {
    match object {
        Object::Node(id) => node(id, prefixes),
        Object::Literal(lit) => lit_term(lit, prefixes),
    }
}

fn lit_term(lit: &Literal, prefixes: &PrefixMap) -> Result<String> {
    let quoted = format!("\"{}\"", escape_string(lit.lexical()));
    Ok(match lit.language() {
        Some(tag) => format!("{quoted}@{tag}"),
        None if lit.datatype().as_str() == vocab::XSD_STRING => quoted,
        None => format!("{quoted}^^{}", iri(lit.datatype(), prefixes)?),
    })
}
