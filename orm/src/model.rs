//! Model descriptors: the static, per-entity-type mapping from attribute
//! names to relation types.
//!
//! A [`ModelDescriptor`] is declared once per entity type and shared through
//! an `Arc` by every [`Instance`](crate::Instance) of that type. Attribute
//! names are resolved to [`Slot`]s when the descriptor is built, so graph
//! construction never looks attributes up by name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::instance::AttributeValue;
use crate::term::Iri;

/// Shapes accepted by a bidirectional relation.
const NODE_SHAPES: &str = "reference, nested instance or sequence";

/// How one attribute maps onto relation statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationDescriptor {
    /// A single directed relation: `(subject, relation, object)`.
    Simple(Iri),
    /// A relation plus its inverse: `(subject, forward, object)` and
    /// `(object, inverse, subject)`.
    Bidirectional {
        /// Relation from the instance to the attribute value.
        forward: Iri,
        /// Relation from the attribute value back to the instance.
        inverse: Iri,
    },
}

impl RelationDescriptor {
    /// A single directed relation.
    #[must_use]
    pub fn simple(relation: Iri) -> Self {
        Self::Simple(relation)
    }

    /// A relation paired with its inverse.
    #[must_use]
    pub fn bidirectional(forward: Iri, inverse: Iri) -> Self {
        Self::Bidirectional { forward, inverse }
    }

    /// The relation from the subject to the object.
    #[must_use]
    pub fn forward(&self) -> &Iri {
        match self {
            Self::Simple(iri) => iri,
            Self::Bidirectional { forward, .. } => forward,
        }
    }

    /// The inverse relation, if any.
    #[must_use]
    pub fn inverse(&self) -> Option<&Iri> {
        match self {
            Self::Simple(_) => None,
            Self::Bidirectional { inverse, .. } => Some(inverse),
        }
    }
}

impl From<Iri> for RelationDescriptor {
    fn from(iri: Iri) -> Self {
        Self::Simple(iri)
    }
}

/// Position of an attribute's value inside an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

impl Slot {
    /// The zero-based position, equal to the attribute's place in the mapping.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One mapping entry: attribute name, relation, and bound slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    relation: RelationDescriptor,
    slot: Slot,
}

impl Field {
    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The relation the attribute maps to.
    #[must_use]
    pub fn relation(&self) -> &RelationDescriptor {
        &self.relation
    }

    /// The slot holding the attribute's value.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Checks that `value` can be emitted under this field's relation.
    ///
    /// A literal cannot be the subject of an inverse statement, so literals
    /// are rejected under bidirectional relations.
    pub(crate) fn check(&self, model: &str, value: &AttributeValue) -> Result<()> {
        match (&self.relation, value) {
            (RelationDescriptor::Bidirectional { .. }, AttributeValue::Literal(_)) => {
                Err(Error::TypeMismatch {
                    model: model.to_owned(),
                    attribute: self.name.clone(),
                    expected: NODE_SHAPES,
                    found: value.shape(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Static definition of an entity type: its class IRI and the ordered
/// mapping from attribute names to relations.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    name: String,
    type_iri: Iri,
    fields: Vec<Field>,
    slots: HashMap<String, Slot>,
}

impl ModelDescriptor {
    /// Validates and builds a descriptor.
    ///
    /// `name` identifies the model in error messages. Mapping order is the
    /// order attributes are visited in while building a graph; it never
    /// changes the resulting statement set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `type_iri` or `mapping` is `None`,
    /// or if the mapping contains an empty or duplicated attribute name.
    pub fn new(
        name: impl Into<String>,
        type_iri: Option<Iri>,
        mapping: Option<Vec<(String, RelationDescriptor)>>,
    ) -> Result<Self> {
        let name = name.into();
        let type_iri =
            type_iri.ok_or_else(|| Error::configuration(&name, "type identifier is not defined"))?;
        let mapping =
            mapping.ok_or_else(|| Error::configuration(&name, "attribute mapping is not defined"))?;

        let mut fields = Vec::with_capacity(mapping.len());
        let mut slots = HashMap::with_capacity(mapping.len());
        for (index, (attribute, relation)) in mapping.into_iter().enumerate() {
            if attribute.is_empty() {
                return Err(Error::configuration(&name, "attribute name is empty"));
            }
            if slots.insert(attribute.clone(), Slot(index)).is_some() {
                return Err(Error::configuration(
                    &name,
                    format!("attribute `{attribute}` is mapped more than once"),
                ));
            }
            fields.push(Field {
                name: attribute,
                relation,
                slot: Slot(index),
            });
        }

        Ok(Self {
            name,
            type_iri,
            fields,
            slots,
        })
    }

    /// Starts a fluent declaration of a model called `name`.
    pub fn builder(name: impl Into<String>) -> ModelDescriptorBuilder {
        ModelDescriptorBuilder {
            name: name.into(),
            type_iri: None,
            mapping: None,
        }
    }

    /// The model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class IRI every instance is typed with.
    #[must_use]
    pub fn type_iri(&self) -> &Iri {
        &self.type_iri
    }

    /// All mapping entries, in mapping order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a mapping entry by attribute name.
    #[must_use]
    pub fn field(&self, attribute: &str) -> Option<&Field> {
        self.slot(attribute).map(|slot| &self.fields[slot.0])
    }

    /// Looks up the relation an attribute maps to.
    #[must_use]
    pub fn relation(&self, attribute: &str) -> Option<&RelationDescriptor> {
        self.field(attribute).map(Field::relation)
    }

    /// Resolves an attribute name to its slot.
    #[must_use]
    pub fn slot(&self, attribute: &str) -> Option<Slot> {
        self.slots.get(attribute).copied()
    }

    /// Number of mapped attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no attribute is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fluent builder for [`ModelDescriptor`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ModelDescriptorBuilder {
    name: String,
    type_iri: Option<Iri>,
    mapping: Option<Vec<(String, RelationDescriptor)>>,
}

impl ModelDescriptorBuilder {
    /// Sets the class IRI.
    pub fn type_iri(mut self, iri: Iri) -> Self {
        self.type_iri = Some(iri);
        self
    }

    /// Appends one mapping entry.
    pub fn field(
        mut self,
        attribute: impl Into<String>,
        relation: impl Into<RelationDescriptor>,
    ) -> Self {
        self.mapping
            .get_or_insert_with(Vec::new)
            .push((attribute.into(), relation.into()));
        self
    }

    /// Replaces the mapping with `entries`. Passing an empty iterator declares
    /// a model with no attributes.
    pub fn mapping<I, K, R>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<RelationDescriptor>,
    {
        self.mapping = Some(
            entries
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        );
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    ///
    /// See [`ModelDescriptor::new`].
    pub fn build(self) -> Result<ModelDescriptor> {
        ModelDescriptor::new(self.name, self.type_iri, self.mapping)
    }

    /// Validates the declaration and wraps it for sharing across instances.
    ///
    /// # Errors
    ///
    /// See [`ModelDescriptor::new`].
    pub fn build_shared(self) -> Result<Arc<ModelDescriptor>> {
        self.build().map(Arc::new)
    }
}
