//! In-memory statement store.
//!
//! [`Graph`] is a set: adding a statement that is already present is a
//! no-op, and the union of two graphs collapses shared statements. Iteration
//! follows the total order of [`Statement`], so two equal graphs always
//! serialize identically.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::serializer::{self, Format, PrefixMap};
use crate::term::{Identifier, Iri, Object, Statement};

/// A duplicate-free set of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Graph {
    statements: BTreeSet<Statement>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement. Returns false if it was already present.
    pub fn add(&mut self, statement: Statement) -> bool {
        self.statements.insert(statement)
    }

    /// Returns the union of both graphs.
    #[must_use]
    pub fn union(mut self, other: Graph) -> Graph {
        self.merge(other);
        self
    }

    /// Adds every statement of `other` to this graph.
    pub fn merge(&mut self, mut other: Graph) {
        if self.statements.len() < other.statements.len() {
            std::mem::swap(&mut self.statements, &mut other.statements);
        }
        self.statements.append(&mut other.statements);
    }

    /// Returns true if the statement is present.
    #[must_use]
    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    /// Number of distinct statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the graph has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterates statements in their total order.
    pub fn iter(&self) -> btree_set::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Objects of every statement with the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Identifier,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.statements
            .iter()
            .filter(move |st| &st.subject == subject && &st.predicate == predicate)
            .map(|st| &st.object)
    }

    /// Serializes the graph with the default prefixes.
    ///
    /// `format` is a format name such as `"turtle"`, `"nt"` or `"json-ld"`;
    /// see [`Format`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat)
    /// for an unknown format name. The default prefixes set no base, so
    /// N-Triples and JSON-LD fail with
    /// [`Error::RelativeIri`](crate::Error::RelativeIri) on graphs that hold
    /// relative IRIs; use [`Graph::serialize_with`] to set one.
    pub fn serialize(&self, format: &str) -> Result<String> {
        let format: Format = format.parse()?;
        self.serialize_with(format, &PrefixMap::default())
    }

    /// Serializes the graph with explicit prefix bindings.
    ///
    /// # Errors
    ///
    /// See [`serializer::serialize`].
    pub fn serialize_with(&self, format: Format, prefixes: &PrefixMap) -> Result<String> {
        serializer::serialize(self, format, prefixes)
    }
}

impl std::ops::Add for Graph {
    type Output = Graph;

    fn add(self, other: Graph) -> Graph {
        self.union(other)
    }
}

impl std::ops::AddAssign for Graph {
    fn add_assign(&mut self, other: Graph) {
        self.merge(other);
    }
}

impl Extend<Statement> for Graph {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        self.statements.extend(iter);
    }
}

impl FromIterator<Statement> for Graph {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Graph {
    type Item = Statement;
    type IntoIter = btree_set::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Statement;
    type IntoIter = btree_set::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Literal;
    use crate::vocab;

    fn label(subject: &str, text: &str) -> Result<Statement> {
        Ok(Statement::new(
            Identifier::named(subject)?,
            vocab::rdfs_label(),
            Literal::from(text),
        ))
    }

    #[test]
    fn identical_statements_collapse() -> Result<()> {
        let mut g = Graph::new();
        assert!(g.add(label("https://example.com/a", "A")?));
        assert!(!g.add(label("https://example.com/a", "A")?));
        assert_eq!(g.len(), 1);
        Ok(())
    }

    #[test]
    fn union_deduplicates() -> Result<()> {
        let a: Graph = [label("https://example.com/a", "A")?, label("https://example.com/b", "B")?]
            .into_iter()
            .collect();
        let b: Graph = [label("https://example.com/b", "B")?, label("https://example.com/c", "C")?]
            .into_iter()
            .collect();
        let mut both = a.clone() + b.clone();
        assert_eq!(both.len(), 3);
        both += a;
        assert_eq!(both.len(), 3);
        assert!(both.contains(&label("https://example.com/c", "C")?));
        Ok(())
    }

    #[test]
    fn objects_filters_by_subject_and_predicate() -> Result<()> {
        let g: Graph = [label("https://example.com/a", "A")?, label("https://example.com/a", "Alpha")?]
            .into_iter()
            .collect();
        let subject = Identifier::named("https://example.com/a")?;
        let predicate = vocab::rdfs_label();
        assert_eq!(g.objects(&subject, &predicate).count(), 2);
        Ok(())
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = Graph::new().serialize("rdfxml");
        assert!(matches!(err, Err(crate::Error::UnsupportedFormat(ref f)) if f == "rdfxml"));
    }
}
