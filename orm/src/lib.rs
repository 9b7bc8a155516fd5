//! Object-to-graph mapping for RDF.
//!
//! The `rdf-orm` crate lets an application declare entity types as
//! [`ModelDescriptor`]s (a class IRI plus an ordered mapping from attribute
//! names to relations), create live [`Instance`]s of them, and derive the
//! complete RDF statement set for an instance and everything it nests. The
//! resulting [`Graph`] can be serialized to Turtle, N-Triples or JSON-LD.
//!
//! # Entry Point
//!
//! ```
//! use rdf_orm::{vocab, AttributeValue, Identifier, Instance, ModelDescriptor, Namespace};
//!
//! # fn main() -> rdf_orm::Result<()> {
//! let ex = Namespace::new("ex", "https://example.com/")?;
//! let price = ModelDescriptor::builder("Price")
//!     .type_iri(ex.term("Price")?)
//!     .field("value", vocab::rdf_value())
//!     .field("currency", ex.term("currency")?)
//!     .build_shared()?;
//! let item = ModelDescriptor::builder("Item")
//!     .type_iri(ex.term("Item")?)
//!     .field("label", vocab::rdfs_label())
//!     .field("price", ex.term("hasPrice")?)
//!     .build_shared()?;
//!
//! let p = Instance::new(
//!     &price,
//!     None,
//!     [("value", AttributeValue::from(15)), ("currency", AttributeValue::from("usd"))],
//! )?;
//! let i = Instance::new(
//!     &item,
//!     Some(Identifier::named("https://example.com/item-1")?),
//!     [("label", AttributeValue::from("item 1")), ("price", AttributeValue::from(p))],
//! )?;
//!
//! let graph = i.build_graph()?;
//! assert_eq!(graph.len(), 6);
//! # Ok(())
//! # }
//! ```
//!
//! # Serialization
//!
//! ```
//! # fn main() -> rdf_orm::Result<()> {
//! let graph = rdf_orm::Graph::new();
//! let turtle = graph.serialize("turtle")?;
//! let ntriples = graph.serialize("nt")?;
//! assert!(turtle.starts_with("@prefix owl:"));
//! assert!(ntriples.is_empty());
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod blank;
pub mod builder;
pub mod error;
pub mod graph;
pub mod instance;
pub mod model;
pub mod serializer;
pub mod term;
pub mod vocab;

pub use blank::{allocate, BlankIdAllocator, SequentialAllocator, UuidAllocator};
pub use builder::{build_graph, build_graph_into, emit};
pub use error::{Error, Result};
pub use graph::Graph;
pub use instance::{AttributeValue, Instance, InstanceRef, SequenceItem};
pub use model::{Field, ModelDescriptor, ModelDescriptorBuilder, RelationDescriptor, Slot};
pub use serializer::{Format, PrefixMap};
pub use term::{BlankId, Identifier, Iri, Literal, Object, Statement};
pub use vocab::Namespace;
