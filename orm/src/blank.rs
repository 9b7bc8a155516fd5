//! Blank identifier allocation.
//!
//! Instances constructed without an explicit identifier get a fresh blank
//! one from a [`BlankIdAllocator`]. The default allocator draws a random
//! UUID (v4) per call: uniqueness is practical, not guaranteed, and no
//! collision detection is performed.

use std::cell::Cell;

use uuid::Uuid;

use crate::term::{BlankId, Identifier};

/// Source of fresh blank identifiers.
pub trait BlankIdAllocator {
    /// Returns a blank identifier not returned by any earlier call.
    fn allocate(&self) -> Identifier;
}

/// Allocates blank identifiers from random v4 UUIDs (simple hex form).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidAllocator;

impl BlankIdAllocator for UuidAllocator {
    fn allocate(&self) -> Identifier {
        // 32 lowercase hex digits always form a valid label.
        Identifier::Blank(BlankId::from_generated(Uuid::new_v4().simple().to_string()))
    }
}

/// Allocates `prefix0`, `prefix1`, ... in order.
///
/// Output is deterministic. Two allocators with the same prefix hand out the
/// same labels, so do not mix their output in one graph.
#[derive(Debug)]
pub struct SequentialAllocator {
    prefix: BlankId,
    next: Cell<u64>,
}

impl SequentialAllocator {
    /// Creates an allocator whose labels start with `prefix`.
    #[must_use]
    pub fn new(prefix: BlankId) -> Self {
        Self {
            prefix,
            next: Cell::new(0),
        }
    }
}

impl BlankIdAllocator for SequentialAllocator {
    fn allocate(&self) -> Identifier {
        let n = self.next.get();
        self.next.set(n + 1);
        Identifier::Blank(BlankId::from_generated(format!("{}{n}", self.prefix)))
    }
}

/// Allocates a fresh blank identifier with the default [`UuidAllocator`].
#[must_use]
pub fn allocate() -> Identifier {
    UuidAllocator.allocate()
}
