//! Relationship ledger
//!
//! Remembers which relationships a single fragment build has already emitted.

use std::collections::HashSet;
use std::fmt;

use crate::core::TypeRef;

/// Kind of edge between two class blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Inherits,       // ^-
    Associates,     // ->
    AggregatesMany, // 1-0..*
}

impl RelationshipKind {
    /// Edge token placed between the two class blocks
    pub fn edge(&self) -> &'static str {
        match self {
            RelationshipKind::Inherits => "^-",
            RelationshipKind::Associates => "->",
            RelationshipKind::AggregatesMany => "1-0..*",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.edge())
    }
}

/// A directed relationship between two types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub source: TypeRef,
    pub target: TypeRef,
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(source: TypeRef, target: TypeRef, kind: RelationshipKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }
}

/// Append-only set of emitted relationships
#[derive(Debug, Clone, Default)]
pub struct RelationshipLedger {
    seen: HashSet<Relationship>,
}

impl RelationshipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relationship; returns false if it was already present
    pub fn record(&mut self, relationship: Relationship) -> bool {
        self.seen.insert(relationship)
    }

    pub fn contains(&self, relationship: &Relationship) -> bool {
        self.seen.contains(relationship)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
