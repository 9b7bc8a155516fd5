use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use rdf_orm::{
    vocab, Graph, Identifier, Instance, ModelDescriptor, Namespace, RelationDescriptor, Result,
    Statement,
};

const EX: &str = "https://example.com/";

fn class_model() -> Result<Arc<ModelDescriptor>> {
    let ex = Namespace::new("ex", EX)?;
    ModelDescriptor::builder("OWLClass")
        .type_iri(vocab::owl_class())
        .field("label", vocab::rdfs_label())
        .field(
            "items",
            RelationDescriptor::bidirectional(ex.term("hasItem")?, ex.term("isItemOf")?),
        )
        .build_shared()
}

fn local_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,8}").unwrap()
}

fn label() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::string::string_regex("[A-Za-z0-9 \"\\\\]{0,16}").unwrap())
}

fn class_with(label: Option<&str>, items: &[String]) -> Instance {
    let model = class_model().expect("model");
    let mut class = Instance::new(
        &model,
        Some(Identifier::named(format!("{EX}class")).expect("iri")),
        [("label", label)],
    )
    .expect("instance");
    for item in items {
        class
            .push("items", Identifier::named(format!("{EX}{item}")).expect("iri"))
            .expect("push");
    }
    class
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn rebuilding_unchanged_state_is_deterministic(
        label in label(),
        items in proptest::collection::vec(local_name(), 0..8),
    ) {
        let class = class_with(label.as_deref(), &items);
        let first = class.build_graph().expect("build");
        let second = class.build_graph().expect("build");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.serialize("turtle").expect("turtle"),
            second.serialize("turtle").expect("turtle")
        );
    }

    #[test]
    fn bidirectional_items_yield_both_directions(
        items in proptest::collection::vec(local_name(), 0..8),
    ) {
        let class = class_with(None, &items);
        let graph = class.build_graph().expect("build");
        let ex = Namespace::new("ex", EX).expect("namespace");
        let has_item = ex.term("hasItem").expect("iri");
        let is_item_of = ex.term("isItemOf").expect("iri");
        let class_id = class.identifier().clone();

        let distinct: HashSet<&String> = items.iter().collect();
        prop_assert_eq!(graph.len(), 1 + 2 * distinct.len());
        for item in &distinct {
            let id = Identifier::named(format!("{EX}{item}")).expect("iri");
            let forward = Statement::new(class_id.clone(), has_item.clone(), id.clone());
            let inverse = Statement::new(id, is_item_of.clone(), class_id.clone());
            prop_assert!(graph.contains(&forward));
            prop_assert!(graph.contains(&inverse));
        }
    }

    #[test]
    fn appending_keeps_prior_statements(
        items in proptest::collection::vec(local_name(), 0..6),
        extra in local_name(),
    ) {
        let mut class = class_with(Some("c"), &items);
        let before = class.build_graph().expect("build");
        let extra_id = Identifier::named(format!("{EX}{extra}")).expect("iri");
        class.push("items", extra_id).expect("push");
        let after = class.build_graph().expect("build");

        prop_assert!(before.iter().all(|st| after.contains(st)));
        let added: Graph = after.iter().filter(|st| !before.contains(st)).cloned().collect();
        let expected = if items.contains(&extra) { 0 } else { 2 };
        prop_assert_eq!(added.len(), expected);
    }

    #[test]
    fn omitted_identifiers_are_distinct(n in 2usize..32) {
        let model = class_model().expect("model");
        let ids: HashSet<Identifier> = (0..n)
            .map(|_| Instance::empty(&model, None).identifier().clone())
            .collect();
        prop_assert_eq!(ids.len(), n);
        prop_assert!(ids.iter().all(Identifier::is_blank));
    }
}
