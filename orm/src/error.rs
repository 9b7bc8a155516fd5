//! Error type shared by every fallible operation in the crate.

/// Errors raised while declaring models, constructing instances, or building
/// and serializing graphs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A model descriptor is missing its type identifier or mapping, or its
    /// mapping is malformed.
    #[error("model `{model}` is misconfigured: {reason}")]
    Configuration {
        /// Name of the offending model.
        model: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An attribute value has a shape that cannot be emitted under the
    /// attribute's relation descriptor.
    #[error("attribute `{model}.{attribute}` expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the model owning the attribute.
        model: String,
        /// Attribute name.
        attribute: String,
        /// Shape the relation accepts.
        expected: &'static str,
        /// Shape actually present.
        found: &'static str,
    },

    /// An attribute name is not part of the model's mapping.
    #[error("model `{model}` has no attribute `{attribute}`")]
    UnknownAttribute {
        /// Name of the model.
        model: String,
        /// The unmapped attribute name.
        attribute: String,
    },

    /// A string is not usable as an IRI reference.
    #[error("invalid IRI `{iri}`: {reason}")]
    InvalidIri {
        /// The rejected string.
        iri: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A relative IRI had to be written in absolute form but no base IRI was
    /// set to resolve it against.
    #[error("relative IRI `{iri}` needs a base IRI to be written in absolute form")]
    RelativeIri {
        /// The unresolved IRI reference.
        iri: String,
    },

    /// A literal was emitted under a bidirectional relation; it cannot be the
    /// subject of the inverse statement.
    #[error("a literal cannot take part in the inverse `{inverse}` of relation `{forward}`")]
    LiteralInverse {
        /// Forward relation type.
        forward: String,
        /// Inverse relation type.
        inverse: String,
    },

    /// A string is not usable as a blank node label.
    #[error("invalid blank node label `{label}`")]
    InvalidBlankId {
        /// The rejected label.
        label: String,
    },

    /// A string is not a well-formed language tag.
    #[error("invalid language tag `{tag}`")]
    InvalidLanguageTag {
        /// The rejected tag.
        tag: String,
    },

    /// A string is not usable as a namespace prefix.
    #[error("invalid namespace prefix `{prefix}`")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// No serializer is registered for the requested format name.
    #[error("unsupported serialization format `{0}`")]
    UnsupportedFormat(String),

    /// A nested instance was mutably borrowed while a graph was being built.
    #[error("nested instance under attribute `{attribute}` is mutably borrowed")]
    Borrowed {
        /// Attribute holding the nested instance.
        attribute: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn configuration(model: &str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            model: model.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_attribute(model: &str, attribute: &str) -> Self {
        Self::UnknownAttribute {
            model: model.to_owned(),
            attribute: attribute.to_owned(),
        }
    }
}
