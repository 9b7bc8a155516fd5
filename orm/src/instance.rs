//! Live entities: an identifier plus attribute values conforming to a model.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

use crate::blank::{BlankIdAllocator, UuidAllocator};
use crate::builder;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::{Field, ModelDescriptor, Slot};
use crate::term::{BlankId, Identifier, Iri, Literal};

/// A shared, mutable handle to an instance.
///
/// Nested instances are held through this handle so that entities can refer
/// to each other, including in cycles. Handles are not thread-safe; a caller
/// mutating an instance from one thread while building from another must
/// synchronize externally. Reference cycles are not collected: clear one of
/// the attributes to release them.
pub type InstanceRef = Rc<RefCell<Instance>>;

/// One element of a [`AttributeValue::Sequence`].
#[derive(Clone)]
pub enum SequenceItem {
    /// An external entity, referenced by identifier only.
    Reference(Identifier),
    /// An entity whose own statements are included in the graph.
    Nested(InstanceRef),
}

/// The value of one mapped attribute.
#[derive(Clone, Default)]
pub enum AttributeValue {
    /// Not set; skipped during graph construction.
    #[default]
    Absent,
    /// A scalar value.
    Literal(Literal),
    /// An external entity, referenced by identifier only.
    Reference(Identifier),
    /// An entity whose own statements are included in the graph.
    Nested(InstanceRef),
    /// An ordered list of references and nested entities.
    Sequence(Vec<SequenceItem>),
}

impl AttributeValue {
    /// Wraps `instance` in a fresh shared handle.
    #[must_use]
    pub fn nested(instance: Instance) -> Self {
        Self::Nested(instance.into_shared())
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Literal(_) => "literal",
            Self::Reference(_) => "reference",
            Self::Nested(_) => "nested instance",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns true for [`AttributeValue::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Prints a nested handle as its identifier; following the handle could
/// recurse forever on cyclic entities.
struct NestedHandle<'a>(&'a InstanceRef);

impl fmt::Debug for NestedHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(instance) => write!(f, "{}", instance.identifier),
            Err(_) => f.write_str("<mutably borrowed>"),
        }
    }
}

impl fmt::Debug for SequenceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(id) => f.debug_tuple("Reference").field(id).finish(),
            Self::Nested(child) => f.debug_tuple("Nested").field(&NestedHandle(child)).finish(),
        }
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Literal(lit) => f.debug_tuple("Literal").field(lit).finish(),
            Self::Reference(id) => f.debug_tuple("Reference").field(id).finish(),
            Self::Nested(child) => f.debug_tuple("Nested").field(&NestedHandle(child)).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
        }
    }
}

impl From<Literal> for AttributeValue {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Literal(value.into())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Literal(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Literal(value.into())
    }
}

impl From<Identifier> for AttributeValue {
    fn from(id: Identifier) -> Self {
        Self::Reference(id)
    }
}

impl From<Iri> for AttributeValue {
    fn from(iri: Iri) -> Self {
        Self::Reference(Identifier::Named(iri))
    }
}

impl From<BlankId> for AttributeValue {
    fn from(id: BlankId) -> Self {
        Self::Reference(Identifier::Blank(id))
    }
}

impl From<Instance> for AttributeValue {
    fn from(instance: Instance) -> Self {
        Self::nested(instance)
    }
}

impl From<InstanceRef> for AttributeValue {
    fn from(handle: InstanceRef) -> Self {
        Self::Nested(handle)
    }
}

impl From<Vec<SequenceItem>> for AttributeValue {
    fn from(items: Vec<SequenceItem>) -> Self {
        Self::Sequence(items)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<Identifier> for SequenceItem {
    fn from(id: Identifier) -> Self {
        Self::Reference(id)
    }
}

impl From<Iri> for SequenceItem {
    fn from(iri: Iri) -> Self {
        Self::Reference(Identifier::Named(iri))
    }
}

impl From<Instance> for SequenceItem {
    fn from(instance: Instance) -> Self {
        Self::Nested(instance.into_shared())
    }
}

impl From<InstanceRef> for SequenceItem {
    fn from(handle: InstanceRef) -> Self {
        Self::Nested(handle)
    }
}

/// A live entity of some model.
///
/// Cloning an instance is shallow: the clone has the same identifier and
/// shares nested handles with the original.
#[derive(Debug, Clone)]
pub struct Instance {
    identifier: Identifier,
    model: Arc<ModelDescriptor>,
    values: Vec<AttributeValue>,
}

impl Instance {
    /// Creates an instance of `model`.
    ///
    /// When `identifier` is `None` a fresh blank identifier is allocated and
    /// kept for the instance's lifetime. Attributes not listed in `values`
    /// start out [`AttributeValue::Absent`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for a name outside the mapping and
    /// [`Error::TypeMismatch`] for a value that cannot be emitted under its
    /// relation (a literal under a bidirectional relation).
    pub fn new<I, K, V>(
        model: &Arc<ModelDescriptor>,
        identifier: Option<Identifier>,
        values: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttributeValue>,
    {
        Self::new_in(model, identifier, values, &UuidAllocator)
    }

    /// Like [`Instance::new`], drawing blank identifiers from `allocator`.
    ///
    /// # Errors
    ///
    /// See [`Instance::new`].
    pub fn new_in<I, K, V>(
        model: &Arc<ModelDescriptor>,
        identifier: Option<Identifier>,
        values: I,
        allocator: &dyn BlankIdAllocator,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttributeValue>,
    {
        let mut slots = vec![AttributeValue::Absent; model.len()];
        for (attribute, value) in values {
            let field = lookup(model, attribute.as_ref())?;
            let value = value.into();
            field.check(model.name(), &value)?;
            slots[field.slot().index()] = value;
        }

        Ok(Self {
            identifier: identifier_or_fresh(model, identifier, allocator),
            model: Arc::clone(model),
            values: slots,
        })
    }

    /// Creates an instance with every attribute absent.
    #[must_use]
    pub fn empty(model: &Arc<ModelDescriptor>, identifier: Option<Identifier>) -> Self {
        Self {
            identifier: identifier_or_fresh(model, identifier, &UuidAllocator),
            model: Arc::clone(model),
            values: vec![AttributeValue::Absent; model.len()],
        }
    }

    /// The identifier fixed at construction.
    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The model this instance conforms to.
    #[must_use]
    pub fn model(&self) -> &Arc<ModelDescriptor> {
        &self.model
    }

    /// Reads an attribute by name; `None` if the model does not map it.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.model.slot(attribute).and_then(|slot| self.value(slot))
    }

    /// Reads an attribute by slot.
    #[must_use]
    pub fn value(&self, slot: Slot) -> Option<&AttributeValue> {
        self.values.get(slot.index())
    }

    /// Direct, unchecked access to an attribute's value.
    ///
    /// Values assigned this way are checked when the graph is built instead.
    pub fn get_mut(&mut self, attribute: &str) -> Option<&mut AttributeValue> {
        let slot = self.model.slot(attribute)?;
        self.values.get_mut(slot.index())
    }

    /// Replaces an attribute's value, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] or [`Error::TypeMismatch`] as
    /// [`Instance::new`] does.
    pub fn set(
        &mut self,
        attribute: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<AttributeValue> {
        let field = lookup(&self.model, attribute)?;
        let value = value.into();
        field.check(self.model.name(), &value)?;
        Ok(std::mem::replace(
            &mut self.values[field.slot().index()],
            value,
        ))
    }

    /// Resets an attribute to [`AttributeValue::Absent`], returning the
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for a name outside the mapping.
    pub fn clear(&mut self, attribute: &str) -> Result<AttributeValue> {
        self.set(attribute, AttributeValue::Absent)
    }

    /// Appends to a sequence attribute. An absent attribute becomes a
    /// one-element sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for a name outside the mapping and
    /// [`Error::TypeMismatch`] if the attribute holds anything other than a
    /// sequence or nothing.
    pub fn push(&mut self, attribute: &str, item: impl Into<SequenceItem>) -> Result<()> {
        let field = lookup(&self.model, attribute)?;
        let value = &mut self.values[field.slot().index()];
        match value {
            AttributeValue::Absent => *value = AttributeValue::Sequence(vec![item.into()]),
            AttributeValue::Sequence(items) => items.push(item.into()),
            other => {
                return Err(Error::TypeMismatch {
                    model: self.model.name().to_owned(),
                    attribute: attribute.to_owned(),
                    expected: "sequence",
                    found: other.shape(),
                })
            }
        }
        Ok(())
    }

    /// Builds the statement set for this instance and everything it nests.
    ///
    /// # Errors
    ///
    /// See [`build_graph`](crate::build_graph).
    pub fn build_graph(&self) -> Result<Graph> {
        builder::build_graph(self)
    }

    /// Same as [`Instance::build_graph`]; the value handed to serializers.
    ///
    /// # Errors
    ///
    /// See [`build_graph`](crate::build_graph).
    pub fn to_graph_value(&self) -> Result<Graph> {
        self.build_graph()
    }

    /// Builds the graph and serializes it with the default prefixes.
    ///
    /// # Errors
    ///
    /// Returns graph construction errors, [`Error::UnsupportedFormat`] for
    /// an unknown format name, or [`Error::RelativeIri`] when a format that
    /// needs absolute IRIs meets a relative one (see [`Graph::serialize`]).
    pub fn serialize(&self, format: &str) -> Result<String> {
        self.build_graph()?.serialize(format)
    }

    /// Moves the instance behind a shared handle.
    #[must_use]
    pub fn into_shared(self) -> InstanceRef {
        Rc::new(RefCell::new(self))
    }
}

fn identifier_or_fresh(
    model: &ModelDescriptor,
    identifier: Option<Identifier>,
    allocator: &dyn BlankIdAllocator,
) -> Identifier {
    identifier.unwrap_or_else(|| {
        let id = allocator.allocate();
        trace!(model = model.name(), identifier = %id, "allocated blank identifier");
        id
    })
}

fn lookup<'m>(model: &'m ModelDescriptor, attribute: &str) -> Result<&'m Field> {
    model
        .field(attribute)
        .ok_or_else(|| Error::unknown_attribute(model.name(), attribute))
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get("label") {
            Some(AttributeValue::Literal(label)) => write!(f, "<{}>", label.lexical()),
            _ => match &self.identifier {
                Identifier::Named(iri) => write!(f, "<{iri}>"),
                Identifier::Blank(id) => write!(f, "<_:{id}>"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationDescriptor;
    use crate::vocab::{self, Namespace};

    fn owl_class_model() -> Result<Arc<ModelDescriptor>> {
        let ex = Namespace::new("ex", "https://example.com/")?;
        ModelDescriptor::builder("OWLClass")
            .type_iri(vocab::owl_class())
            .field("label", vocab::rdfs_label())
            .field(
                "items",
                RelationDescriptor::bidirectional(ex.term("hasItem")?, ex.term("isItemOf")?),
            )
            .build_shared()
    }

    #[test]
    fn omitted_identifier_is_blank_and_fixed() -> Result<()> {
        let model = owl_class_model()?;
        let a = Instance::new(&model, None, [("label", "a")])?;
        let b = Instance::new(&model, None, [("label", "b")])?;
        assert!(a.identifier().is_blank());
        assert_ne!(a.identifier(), b.identifier());
        Ok(())
    }

    #[test]
    fn unknown_attribute_is_rejected() -> Result<()> {
        let model = owl_class_model()?;
        let err = Instance::new(&model, None, [("colour", "red")]);
        assert!(matches!(err, Err(Error::UnknownAttribute { .. })));
        Ok(())
    }

    #[test]
    fn literal_under_bidirectional_relation_is_a_type_mismatch() -> Result<()> {
        let model = owl_class_model()?;
        let err = Instance::new(&model, None, [("items", "not an entity")]);
        assert!(matches!(
            err,
            Err(Error::TypeMismatch { ref attribute, found: "literal", .. }) if attribute == "items"
        ));
        Ok(())
    }

    #[test]
    fn set_returns_previous_value() -> Result<()> {
        let model = owl_class_model()?;
        let mut class = Instance::new(&model, None, [("label", "Individual 1")])?;
        let old = class.set("label", "Individual 1 modified")?;
        assert!(matches!(old, AttributeValue::Literal(ref l) if l.lexical() == "Individual 1"));
        assert_eq!(class.to_string(), "<Individual 1 modified>");
        Ok(())
    }

    #[test]
    fn push_turns_absent_into_sequence() -> Result<()> {
        let model = owl_class_model()?;
        let mut class = Instance::empty(&model, None);
        class.push("items", Identifier::named("https://example.com/item-9")?)?;
        class.push("items", Identifier::named("https://example.com/item-10")?)?;
        assert!(matches!(class.get("items"), Some(AttributeValue::Sequence(items)) if items.len() == 2));
        Ok(())
    }

    #[test]
    fn push_onto_literal_is_a_type_mismatch() -> Result<()> {
        let model = owl_class_model()?;
        let mut class = Instance::new(&model, None, [("label", "x")])?;
        let err = class.push("label", Identifier::named("https://example.com/a")?);
        assert!(matches!(err, Err(Error::TypeMismatch { expected: "sequence", .. })));
        Ok(())
    }

    #[test]
    fn display_falls_back_to_identifier() -> Result<()> {
        let model = owl_class_model()?;
        let class = Instance::empty(&model, Some(Identifier::named("https://example.com/c")?));
        assert_eq!(class.to_string(), "<https://example.com/c>");
        Ok(())
    }

    #[test]
    fn debug_of_cyclic_instances_terminates() -> Result<()> {
        let model = owl_class_model()?;
        let a = Instance::empty(&model, None).into_shared();
        a.borrow_mut().push("items", Rc::clone(&a))?;
        let rendered = format!("{:?}", a.borrow());
        assert!(rendered.contains("Nested"));
        Ok(())
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut out) = self.0.lock() {
                out.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_instance_traces_blank_allocation() -> Result<()> {
        let model = owl_class_model()?;
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let (blank, named) = tracing::subscriber::with_default(subscriber, || {
            let blank = Instance::empty(&model, None);
            let named = Instance::empty(&model, Some(Identifier::named("https://example.com/c")?));
            Ok::<_, Error>((blank, named))
        })?;
        assert!(blank.identifier().is_blank());
        assert!(!named.identifier().is_blank());

        let logs = captured.0.lock().map(|out| String::from_utf8_lossy(&out).into_owned());
        let logs = logs.unwrap_or_default();
        assert_eq!(logs.matches("allocated blank identifier").count(), 1);
        assert!(logs.contains(&blank.identifier().to_string()));
        Ok(())
    }
}
