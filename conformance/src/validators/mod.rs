//! Validators, one per serialization format.

pub mod jsonld;
pub mod ntriples;
pub mod turtle;

use std::collections::BTreeSet;

use rdf_orm::Format;
use sophia_api::source::TripleSource;
use sophia_api::term::SimpleTerm;
use sophia_turtle::parser::{nt, turtle as ttl};

use crate::report::Check;

/// Triples as read back by an independent parser.
pub(crate) type Triples = BTreeSet<[SimpleTerm<'static>; 3]>;

pub(crate) fn read_turtle(content: &str) -> Result<Triples, String> {
    ttl::parse_str(content)
        .collect_triples()
        .map_err(|e| e.to_string())
}

pub(crate) fn read_ntriples(content: &str) -> Result<Triples, String> {
    nt::parse_str(content)
        .collect_triples()
        .map_err(|e| e.to_string())
}

/// Compares the number of statements a parser read back with the number in
/// the source graph.
pub(crate) fn statement_count(format: Format, parsed: usize, expected: usize) -> Check {
    const NAME: &str = "statement count";
    if parsed == expected {
        Check::passed(format, NAME)
    } else {
        Check::failed(format, NAME, format!("expected {expected}, parsed {parsed}"))
    }
}
