//! Serializers for built graphs.
//!
//! Three formats are supported:
//! - **Turtle** ([`turtle`]): statements grouped per subject, prefixed names
//! - **N-Triples** ([`ntriples`]): one statement per line, for streaming and diffs
//! - **JSON-LD** ([`jsonld`], `serializers` feature): a flattened `@graph` document
//!
//! Output is configured through a [`PrefixMap`]: the prefix bindings used to
//! compact IRIs and an optional base IRI that relative IRIs resolve against.
//! Turtle keeps relative IRIs and declares the base with `@base`. Formats
//! that need absolute IRIs resolve them by RFC 3986 and fail with
//! [`Error::RelativeIri`] when there is no base.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use sophia_iri::resolve::BaseIri;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::term::{Identifier, Iri, Object};
use crate::vocab::Namespace;

#[cfg(feature = "serializers")]
pub mod jsonld;
pub mod ntriples;
pub mod turtle;

/// An output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1, flattened.
    #[cfg(feature = "serializers")]
    JsonLd,
}

impl Format {
    /// The canonical format name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::NTriples => "ntriples",
            #[cfg(feature = "serializers")]
            Self::JsonLd => "json-ld",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Accepts the usual names, extensions and media types, ignoring case.
    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "turtle" | "ttl" | "text/turtle" => Ok(Self::Turtle),
            "nt" | "ntriples" | "n-triples" | "application/n-triples" => Ok(Self::NTriples),
            #[cfg(feature = "serializers")]
            "json-ld" | "jsonld" | "application/ld+json" => Ok(Self::JsonLd),
            _ => Err(Error::UnsupportedFormat(name.to_owned())),
        }
    }
}

/// Prefix bindings and base IRI used when writing a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMap {
    base: Option<Iri>,
    namespaces: Vec<Namespace>,
}

impl Default for PrefixMap {
    /// Binds `owl`, `rdf`, `rdfs` and `xsd`.
    fn default() -> Self {
        Self {
            base: None,
            namespaces: vec![
                Namespace::owl(),
                Namespace::rdf(),
                Namespace::rdfs(),
                Namespace::xsd(),
            ],
        }
    }
}

impl PrefixMap {
    /// A map with no bindings and no base.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            base: None,
            namespaces: Vec::new(),
        }
    }

    /// Adds a binding, replacing any existing binding of the same prefix.
    #[must_use]
    pub fn with(mut self, namespace: Namespace) -> Self {
        self.bind(namespace);
        self
    }

    /// Sets the base IRI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if `base` is not an absolute IRI.
    pub fn with_base(mut self, base: Iri) -> Result<Self> {
        if BaseIri::new(base.as_str()).is_err() {
            return Err(Error::InvalidIri {
                iri: base.to_string(),
                reason: "a base must be an absolute IRI",
            });
        }
        self.base = Some(base);
        Ok(self)
    }

    /// Adds a binding, replacing any existing binding of the same prefix.
    pub fn bind(&mut self, namespace: Namespace) {
        match self
            .namespaces
            .iter_mut()
            .find(|ns| ns.prefix() == namespace.prefix())
        {
            Some(existing) => *existing = namespace,
            None => self.namespaces.push(namespace),
        }
    }

    /// The base IRI, if any.
    #[must_use]
    pub fn base(&self) -> Option<&Iri> {
        self.base.as_ref()
    }

    /// Bindings in the order they were added.
    #[must_use]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Compacts `iri` to `prefix:local` using the longest matching namespace.
    ///
    /// Returns `None` when no namespace matches or the remainder is not a
    /// local name every Turtle parser accepts.
    #[must_use]
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.namespaces
            .iter()
            .filter_map(|ns| {
                let local = iri.strip_prefix(ns.iri().as_str())?;
                is_safe_local_name(local).then_some((ns, local))
            })
            .max_by_key(|(ns, _)| ns.iri().as_str().len())
            .map(|(ns, local)| format!("{}:{}", ns.prefix(), local))
    }

    /// Returns `iri` in absolute form, resolving a relative reference
    /// against the base by RFC 3986. Absolute IRIs are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativeIri`] for a relative IRI when no base is set,
    /// and [`Error::InvalidIri`] if the reference cannot be resolved.
    pub fn resolve<'a>(&self, iri: &'a Iri) -> Result<Cow<'a, str>> {
        if iri.is_absolute() {
            return Ok(Cow::Borrowed(iri.as_str()));
        }
        let base = self.base.as_ref().ok_or_else(|| Error::RelativeIri {
            iri: iri.to_string(),
        })?;
        let base = BaseIri::new(base.as_str()).map_err(|_| Error::InvalidIri {
            iri: base.to_string(),
            reason: "a base must be an absolute IRI",
        })?;
        let resolved = base.resolve(iri.as_str()).map_err(|_| Error::InvalidIri {
            iri: iri.to_string(),
            reason: "cannot be resolved against the base",
        })?;
        Ok(Cow::Owned(resolved.as_str().to_owned()))
    }
}

fn is_safe_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        None => true,
        Some(first) => {
            (first.is_ascii_alphanumeric() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
    }
}

/// Serializes `graph` in `format`.
///
/// # Errors
///
/// N-Triples and JSON-LD return [`Error::RelativeIri`] when the graph holds
/// a relative IRI they must write in absolute form and `prefixes` has no
/// base. Turtle never fails.
pub fn serialize(graph: &Graph, format: Format, prefixes: &PrefixMap) -> Result<String> {
    debug!(
        format = format.name(),
        statements = graph.len(),
        "serializing graph"
    );
    match format {
        Format::Turtle => Ok(turtle::to_turtle(graph, prefixes)),
        Format::NTriples => ntriples::to_ntriples(graph, prefixes),
        #[cfg(feature = "serializers")]
        Format::JsonLd => Ok(format!("{:#}", jsonld::to_json_ld(graph, prefixes)?)),
    }
}

/// Statements grouped by subject, then predicate.
pub(crate) type Grouped<'a> = BTreeMap<&'a Identifier, BTreeMap<&'a Iri, Vec<&'a Object>>>;

pub(crate) fn group_by_subject(graph: &Graph) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = BTreeMap::new();
    for st in graph {
        grouped
            .entry(&st.subject)
            .or_default()
            .entry(&st.predicate)
            .or_default()
            .push(&st.object);
    }
    grouped
}

/// Escapes a lexical form for a double-quoted Turtle or N-Triples string.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
