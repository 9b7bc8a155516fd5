//! Graph terms: IRIs, blank node labels, identifiers, literals and statements.
//!
//! Every term type is validated on construction so that the serializers can
//! write them out without escaping surprises. All of them order totally,
//! which is what gives [`Graph`](crate::Graph) its deterministic iteration.

use std::fmt;

use crate::error::{Error, Result};
use crate::vocab;

/// An IRI reference. Relative references are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Iri(String);

impl Iri {
    /// Validates and wraps an IRI reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if the string is empty or contains
    /// whitespace, a control character, or one of ``<>"{}|^`\``.
    pub fn new(iri: impl Into<String>) -> Result<Self> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(Error::InvalidIri {
                iri,
                reason: "empty IRI",
            });
        }
        if iri.chars().any(is_forbidden_in_iri) {
            return Err(Error::InvalidIri {
                iri,
                reason: "contains a character not allowed in an IRI reference",
            });
        }
        Ok(Self(iri))
    }

    pub(crate) fn from_static(iri: &'static str) -> Self {
        Self(iri.to_owned())
    }

    /// Returns the IRI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the IRI starts with a scheme (`scheme:`).
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        let Some((scheme, _)) = self.0.split_once(':') else {
            return false;
        };
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    }
}

fn is_forbidden_in_iri(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Iri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Iri {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

/// The label of a blank node, without the `_:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct BlankId(String);

impl BlankId {
    /// Validates and wraps a blank node label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBlankId`] unless the label is non-empty, starts
    /// with an ASCII alphanumeric or `_`, and continues with ASCII
    /// alphanumerics, `_` or `-`.
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let mut chars = label.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(label))
        } else {
            Err(Error::InvalidBlankId { label })
        }
    }

    pub(crate) fn from_generated(label: String) -> Self {
        Self(label)
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BlankId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BlankId> for String {
    fn from(id: BlankId) -> Self {
        id.0
    }
}

/// The identity of a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Identifier {
    /// A globally meaningful, dereferenceable reference.
    Named(Iri),
    /// A label scoped to the statement set it appears in.
    Blank(BlankId),
}

impl Identifier {
    /// Builds a named identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if `iri` is not a valid IRI reference.
    pub fn named(iri: impl Into<String>) -> Result<Self> {
        Iri::new(iri).map(Self::Named)
    }

    /// Builds a blank identifier from an explicit label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBlankId`] if `label` is not a valid label.
    pub fn blank(label: impl Into<String>) -> Result<Self> {
        BlankId::new(label).map(Self::Blank)
    }

    /// Returns true for blank identifiers.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// Returns the IRI of a named identifier.
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Named(iri) => Some(iri),
            Self::Blank(_) => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => write!(f, "<{iri}>"),
            Self::Blank(id) => write!(f, "_:{id}"),
        }
    }
}

impl From<Iri> for Identifier {
    fn from(iri: Iri) -> Self {
        Self::Named(iri)
    }
}

impl From<BlankId> for Identifier {
    fn from(id: BlankId) -> Self {
        Self::Blank(id)
    }
}

/// A scalar value carried as-is into a statement's object position.
///
/// A literal is a lexical form plus a datatype IRI, and optionally a language
/// tag (in which case the datatype is `rdf:langString`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    lexical: String,
    datatype: Iri,
    language: Option<String>,
}

impl Literal {
    /// An `xsd:string` literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::with_datatype(value.into(), vocab::XSD_STRING)
    }

    /// A language-tagged string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLanguageTag`] unless `tag` is one or more
    /// `-`-separated ASCII alphanumeric subtags starting with a letter.
    pub fn lang_string(value: impl Into<String>, tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if !is_language_tag(&tag) {
            return Err(Error::InvalidLanguageTag { tag });
        }
        Ok(Self {
            lexical: value.into(),
            datatype: Iri::from_static(vocab::RDF_LANG_STRING),
            language: Some(tag),
        })
    }

    /// An `xsd:integer` literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::with_datatype(value.to_string(), vocab::XSD_INTEGER)
    }

    /// An `xsd:double` literal.
    #[must_use]
    pub fn double(value: f64) -> Self {
        let lexical = if value.is_nan() {
            "NaN".to_owned()
        } else if value.is_infinite() {
            let sign = if value > 0.0 { "" } else { "-" };
            format!("{sign}INF")
        } else {
            format!("{value:?}")
        };
        Self::with_datatype(lexical, vocab::XSD_DOUBLE)
    }

    /// An `xsd:boolean` literal.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::with_datatype(value.to_string(), vocab::XSD_BOOLEAN)
    }

    /// A literal with an arbitrary datatype. The lexical form is not checked
    /// against the datatype.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
            language: None,
        }
    }

    fn with_datatype(lexical: String, datatype: &'static str) -> Self {
        Self {
            lexical,
            datatype: Iri::from_static(datatype),
            language: None,
        }
    }

    /// The lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The datatype IRI.
    #[must_use]
    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }

    /// The language tag, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

fn is_language_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary_ok = subtags
        .next()
        .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()));
    primary_ok && subtags.all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        match &self.language {
            Some(tag) => write!(f, "@{tag}"),
            None if self.datatype.as_str() == vocab::XSD_STRING => Ok(()),
            None => write!(f, "^^<{}>", self.datatype),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::integer(i64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::double(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

/// The object position of a statement: a node or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Object {
    /// A named or blank node.
    Node(Identifier),
    /// A literal value.
    Literal(Literal),
}

impl Object {
    /// Returns the node identifier, or `None` for literals.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Node(id) => Some(id),
            Self::Literal(_) => None,
        }
    }

    /// Returns the literal, or `None` for nodes.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Node(_) => None,
            Self::Literal(lit) => Some(lit),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => id.fmt(f),
            Self::Literal(lit) => lit.fmt(f),
        }
    }
}

impl From<Identifier> for Object {
    fn from(id: Identifier) -> Self {
        Self::Node(id)
    }
}

impl From<Iri> for Object {
    fn from(iri: Iri) -> Self {
        Self::Node(Identifier::Named(iri))
    }
}

impl From<BlankId> for Object {
    fn from(id: BlankId) -> Self {
        Self::Node(Identifier::Blank(id))
    }
}

impl From<Literal> for Object {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

/// A subject, predicate, object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statement {
    /// The node the statement is about.
    pub subject: Identifier,
    /// The relation type.
    pub predicate: Iri,
    /// The related node or value.
    pub object: Object,
}

impl Statement {
    /// Builds a statement.
    #[must_use]
    pub fn new(subject: impl Into<Identifier>, predicate: Iri, object: impl Into<Object>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}
