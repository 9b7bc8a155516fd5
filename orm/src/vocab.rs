//! Standard vocabulary IRIs and namespace bindings.
//!
//! The constants cover the handful of RDF, RDFS, XSD and OWL terms the graph
//! builder and serializers need. [`Namespace`] pairs a prefix with a base IRI
//! and mints terms under it, the way model declarations usually spell their
//! class and relation IRIs.

use crate::error::{Error, Result};
use crate::term::Iri;

/// OWL namespace.
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDFS namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XSD namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdf:value`.
pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
/// `rdf:langString`.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
/// `rdfs:label`.
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
/// `rdfs:comment`.
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
/// `owl:Class`.
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

// XSD datatypes
/// `xsd:string`.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
/// `xsd:integer`.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
/// `xsd:double`.
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
/// `xsd:decimal`.
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
/// `xsd:boolean`.
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// Returns `rdf:type` as an [`Iri`].
#[must_use]
pub fn rdf_type() -> Iri {
    Iri::from_static(RDF_TYPE)
}

/// Returns `rdf:value` as an [`Iri`].
#[must_use]
pub fn rdf_value() -> Iri {
    Iri::from_static(RDF_VALUE)
}

/// Returns `rdfs:label` as an [`Iri`].
#[must_use]
pub fn rdfs_label() -> Iri {
    Iri::from_static(RDFS_LABEL)
}

/// Returns `rdfs:comment` as an [`Iri`].
#[must_use]
pub fn rdfs_comment() -> Iri {
    Iri::from_static(RDFS_COMMENT)
}

/// Returns `owl:Class` as an [`Iri`].
#[must_use]
pub fn owl_class() -> Iri {
    Iri::from_static(OWL_CLASS)
}

/// A prefix bound to a namespace IRI (e.g. `ex` → `https://example.com/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    iri: Iri,
}

impl Namespace {
    /// Binds `prefix` to the namespace `iri`.
    ///
    /// The prefix may be empty (the default namespace); otherwise it must
    /// start with an ASCII letter and continue with ASCII alphanumerics, `_`
    /// or `-`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] for a malformed prefix and
    /// [`Error::InvalidIri`] for a malformed namespace IRI.
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if !is_prefix_name(&prefix) {
            return Err(Error::InvalidPrefix { prefix });
        }
        Ok(Self {
            prefix,
            iri: Iri::new(iri)?,
        })
    }

    /// The `owl:` namespace.
    #[must_use]
    pub fn owl() -> Self {
        Self::standard("owl", OWL)
    }

    /// The `rdf:` namespace.
    #[must_use]
    pub fn rdf() -> Self {
        Self::standard("rdf", RDF)
    }

    /// The `rdfs:` namespace.
    #[must_use]
    pub fn rdfs() -> Self {
        Self::standard("rdfs", RDFS)
    }

    /// The `xsd:` namespace.
    #[must_use]
    pub fn xsd() -> Self {
        Self::standard("xsd", XSD)
    }

    fn standard(prefix: &'static str, iri: &'static str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            iri: Iri::from_static(iri),
        }
    }

    /// The prefix, without the trailing colon.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The namespace IRI.
    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Mints the IRI `namespace + local`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if `local` contains characters that are
    /// not allowed in an IRI.
    pub fn term(&self, local: &str) -> Result<Iri> {
        Iri::new(format!("{}{}", self.iri.as_str(), local))
    }
}

fn is_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
    }
}
