//! Graph construction: turning an instance and everything it nests into a
//! statement set.
//!
//! Construction is a depth-first traversal over the instance and its nested
//! instances. Each instance contributes its type statement and one relation
//! statement per populated attribute (two for bidirectional relations).
//! A `visited` set of identifiers guards against cycles: an instance reached
//! a second time contributes nothing further. Nothing is cached, so every
//! build reflects the attribute values at the time of the call.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::instance::{AttributeValue, Instance, InstanceRef, SequenceItem};
use crate::model::{Field, RelationDescriptor};
use crate::term::{Identifier, Object, Statement};
use crate::vocab;

/// Builds the complete statement set for `instance`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if an attribute holds a value that cannot
/// be emitted under its relation, and [`Error::Borrowed`] if a nested
/// instance is mutably borrowed. In both cases nothing is returned.
pub fn build_graph(instance: &Instance) -> Result<Graph> {
    let mut visited = HashSet::new();
    let mut acc = Graph::new();
    build_graph_into(instance, &mut visited, &mut acc)?;
    Ok(acc)
}

/// Builds the statement set for `instance` into `acc`, skipping instances
/// whose identifiers are already in `visited`.
///
/// Threading the same `visited` and `acc` through several calls builds one
/// graph for several roots without repeating shared sub-graphs. On error
/// `visited` and `acc` are left as they were.
///
/// # Errors
///
/// See [`build_graph`].
pub fn build_graph_into(
    instance: &Instance,
    visited: &mut HashSet<Identifier>,
    acc: &mut Graph,
) -> Result<()> {
    let mut seen = visited.clone();
    let mut built = Graph::new();
    if let Err(err) = visit(instance, &mut seen, &mut built) {
        debug!(subject = %instance.identifier(), error = %err, "graph build aborted");
        return Err(err);
    }
    debug!(
        subject = %instance.identifier(),
        statements = built.len(),
        "built graph"
    );
    *visited = seen;
    acc.merge(built);
    Ok(())
}

fn visit(instance: &Instance, visited: &mut HashSet<Identifier>, acc: &mut Graph) -> Result<()> {
    let subject = instance.identifier();
    if !visited.insert(subject.clone()) {
        trace!(%subject, "already visited; skipping");
        return Ok(());
    }
    let model = instance.model();
    trace!(%subject, model = model.name(), "visiting instance");

    acc.add(Statement::new(
        subject.clone(),
        vocab::rdf_type(),
        Identifier::Named(model.type_iri().clone()),
    ));

    for field in model.fields() {
        let Some(value) = instance.value(field.slot()) else {
            continue;
        };
        field.check(model.name(), value)?;
        match value {
            AttributeValue::Absent => {}
            AttributeValue::Literal(lit) => {
                emit(subject, field.relation(), Object::Literal(lit.clone()), acc)?;
            }
            AttributeValue::Reference(id) => {
                emit(subject, field.relation(), Object::Node(id.clone()), acc)?;
            }
            AttributeValue::Nested(child) => visit_nested(subject, field, child, visited, acc)?,
            AttributeValue::Sequence(items) => {
                for item in items {
                    match item {
                        SequenceItem::Reference(id) => {
                            emit(subject, field.relation(), Object::Node(id.clone()), acc)?;
                        }
                        SequenceItem::Nested(child) => {
                            visit_nested(subject, field, child, visited, acc)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn visit_nested(
    subject: &Identifier,
    field: &Field,
    child: &InstanceRef,
    visited: &mut HashSet<Identifier>,
    acc: &mut Graph,
) -> Result<()> {
    let child = child.try_borrow().map_err(|_| Error::Borrowed {
        attribute: field.name().to_owned(),
    })?;
    emit(
        subject,
        field.relation(),
        Object::Node(child.identifier().clone()),
        acc,
    )?;
    visit(&child, visited, acc)
}

/// Adds the statements `relation` implies between `subject` and `object`.
///
/// A simple relation adds `(subject, relation, object)`. A bidirectional
/// relation adds `(subject, forward, object)` and `(object, inverse,
/// subject)`; a literal object cannot take part in the inverse, so it is
/// rejected and nothing is added.
///
/// # Errors
///
/// Returns [`Error::LiteralInverse`] for a literal object under a
/// bidirectional relation.
pub fn emit(
    subject: &Identifier,
    relation: &RelationDescriptor,
    object: Object,
    acc: &mut Graph,
) -> Result<()> {
    match relation {
        RelationDescriptor::Simple(predicate) => {
            acc.add(Statement::new(subject.clone(), predicate.clone(), object));
        }
        RelationDescriptor::Bidirectional { forward, inverse } => {
            let Object::Node(target) = object else {
                return Err(Error::LiteralInverse {
                    forward: forward.to_string(),
                    inverse: inverse.to_string(),
                });
            };
            acc.add(Statement::new(subject.clone(), forward.clone(), target.clone()));
            acc.add(Statement::new(target, inverse.clone(), subject.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::model::ModelDescriptor;
    use crate::term::{Iri, Literal};
    use crate::vocab::Namespace;

    fn ex(local: &str) -> Result<Iri> {
        Namespace::new("ex", "https://example.com/")?.term(local)
    }

    fn node_model() -> Result<Arc<ModelDescriptor>> {
        ModelDescriptor::builder("Node")
            .type_iri(ex("Node")?)
            .field("name", vocab::rdfs_label())
            .field("next", ex("next")?)
            .field(
                "links",
                RelationDescriptor::bidirectional(ex("linksTo")?, ex("linkedFrom")?),
            )
            .build_shared()
    }

    #[test]
    fn absent_attributes_only_yield_the_type_statement() -> Result<()> {
        let model = node_model()?;
        let node = Instance::empty(&model, Some(Identifier::named("https://example.com/n")?));
        let g = build_graph(&node)?;
        assert_eq!(g.len(), 1);
        assert!(g.contains(&Statement::new(
            node.identifier().clone(),
            vocab::rdf_type(),
            ex("Node")?
        )));
        Ok(())
    }

    #[test]
    fn bidirectional_emission_adds_both_directions() -> Result<()> {
        let s = Identifier::named("https://example.com/s")?;
        let o = Identifier::named("https://example.com/o")?;
        let rel = RelationDescriptor::bidirectional(ex("hasItem")?, ex("isItemOf")?);
        let mut g = Graph::new();
        emit(&s, &rel, Object::Node(o.clone()), &mut g)?;
        assert!(g.contains(&Statement::new(s.clone(), ex("hasItem")?, o.clone())));
        assert!(g.contains(&Statement::new(o, ex("isItemOf")?, s)));
        assert_eq!(g.len(), 2);
        Ok(())
    }

    #[test]
    fn bidirectional_emission_of_literal_adds_nothing() -> Result<()> {
        let s = Identifier::named("https://example.com/s")?;
        let rel = RelationDescriptor::bidirectional(ex("hasItem")?, ex("isItemOf")?);
        let mut g = Graph::new();
        let err = emit(&s, &rel, Object::Literal(Literal::from("x")), &mut g);
        assert!(matches!(
            err,
            Err(Error::LiteralInverse { ref forward, ref inverse })
                if forward == "https://example.com/hasItem"
                    && inverse == "https://example.com/isItemOf"
        ));
        assert!(g.is_empty());
        Ok(())
    }

    #[test]
    fn unchecked_mutation_aborts_the_build() -> Result<()> {
        let model = node_model()?;
        let mut node = Instance::new(&model, None, [("name", "n")])?;
        if let Some(slot) = node.get_mut("links") {
            *slot = AttributeValue::Literal(Literal::from("oops"));
        }
        let mut visited = HashSet::new();
        let mut acc = Graph::new();
        let err = build_graph_into(&node, &mut visited, &mut acc);
        assert!(matches!(
            err,
            Err(Error::TypeMismatch { ref attribute, .. }) if attribute == "links"
        ));
        assert!(acc.is_empty());
        assert!(visited.is_empty());
        Ok(())
    }

    #[test]
    fn self_reference_terminates() -> Result<()> {
        let model = node_model()?;
        let node = Instance::new(&model, None, [("name", "loop")])?.into_shared();
        node.borrow_mut().set("next", Rc::clone(&node))?;
        let g = node.borrow().build_graph()?;
        let id = node.borrow().identifier().clone();
        assert!(g.contains(&Statement::new(id.clone(), ex("next")?, id)));
        assert_eq!(g.len(), 3);
        node.borrow_mut().clear("next")?;
        Ok(())
    }

    #[test]
    fn mutably_borrowed_child_is_reported() -> Result<()> {
        let model = node_model()?;
        let child = Instance::empty(&model, None).into_shared();
        let parent = Instance::new(&model, None, [("next", Rc::clone(&child))])?;
        let _guard = child.borrow_mut();
        assert!(matches!(
            build_graph(&parent),
            Err(Error::Borrowed { ref attribute }) if attribute == "next"
        ));
        Ok(())
    }

    #[test]
    fn shared_visited_set_spans_several_roots() -> Result<()> {
        let model = node_model()?;
        let shared = Instance::new(&model, None, [("name", "shared")])?.into_shared();
        let a = Instance::new(&model, None, [("next", Rc::clone(&shared))])?;
        let b = Instance::new(&model, None, [("next", Rc::clone(&shared))])?;

        let mut visited = HashSet::new();
        let mut acc = Graph::new();
        build_graph_into(&a, &mut visited, &mut acc)?;
        build_graph_into(&b, &mut visited, &mut acc)?;

        // 2 for `shared`, 2 each for `a` and `b`.
        assert_eq!(acc.len(), 6);
        assert_eq!(visited.len(), 3);
        Ok(())
    }
}
