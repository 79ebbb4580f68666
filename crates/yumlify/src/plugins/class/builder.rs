//! Diagram fragment builder
//!
//! Walks an ordered list of types and serializes them into a yUML class
//! diagram fragment:
//!
//! ```text
//! [Animal|+ Name : String],[Dog|+ Breed : String]^-[Animal|+ Name : String]
//! ```
//!
//! Each class-like root contributes one `^-` edge per requested ancestor,
//! then one `->` or `1-0..*` edge per qualifying property. Every edge starts
//! with the root's own block, so a root with edges is not written on its own;
//! a root without edges is written as its bare class block.
//!
//! Inheritance edges are recorded in a [`RelationshipLedger`] that lives for
//! exactly one build, so a relationship reached twice is only written once.
//! Association edges are written every time they are reached.

use std::collections::HashSet;

use tracing::{debug, span, trace, Level};

use super::ledger::{Relationship, RelationshipKind, RelationshipLedger};
use super::members::MemberSerializer;
use crate::core::{
    DetailLevel, DiagramError, DiagramStyle, DisplayNames, TypeMetadataProvider, TypeRef,
};

/// Result of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramFragment {
    /// The yUML text
    pub dsl: String,
    /// Style the fragment was requested with
    pub style: DiagramStyle,
    /// Edges in the order they were written
    pub relationships: Vec<Relationship>,
}

impl DiagramFragment {
    pub fn is_empty(&self) -> bool {
        self.dsl.is_empty()
    }

    /// Number of written edges of one kind
    pub fn count(&self, kind: RelationshipKind) -> usize {
        self.relationships.iter().filter(|r| r.kind == kind).count()
    }
}

/// Builds yUML fragments from type metadata
pub struct DiagramFragmentBuilder<'a, P: ?Sized> {
    provider: &'a P,
    names: DisplayNames,
}

impl<'a, P> DiagramFragmentBuilder<'a, P>
where
    P: TypeMetadataProvider + ?Sized,
{
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            names: DisplayNames::default(),
        }
    }

    /// Use a custom display name table
    pub fn with_names(mut self, names: DisplayNames) -> Self {
        self.names = names;
        self
    }

    /// Build the fragment text for `types`
    pub fn build(
        &self,
        types: &[TypeRef],
        style: DiagramStyle,
        detail: DetailLevel,
    ) -> Result<String, DiagramError> {
        self.build_fragment(types, style, detail)
            .map(|fragment| fragment.dsl)
    }

    /// Build the fragment together with the edges it contains
    pub fn build_fragment(
        &self,
        types: &[TypeRef],
        style: DiagramStyle,
        detail: DetailLevel,
    ) -> Result<DiagramFragment, DiagramError> {
        let build_span = span!(Level::DEBUG, "build_fragment", type_count = types.len());
        let _enter = build_span.enter();

        let mut session = Session {
            provider: self.provider,
            names: &self.names,
            members: MemberSerializer::new(self.provider, &self.names),
            requested: types.iter().copied().collect(),
            detail,
            ledger: RelationshipLedger::new(),
            written: Vec::new(),
        };

        let mut dsl = String::new();
        for &ty in types {
            let descriptor = self.provider.describe(ty)?;
            if !descriptor.kind.is_class_like() {
                trace!(
                    name = %descriptor.name,
                    kind = %descriptor.kind,
                    "Skipping non-class root"
                );
                continue;
            }

            let mut edges = session.inheritance_edges(ty)?;
            edges.extend(session.association_edges(ty)?);

            if !dsl.is_empty() {
                dsl.push(',');
            }
            if edges.is_empty() {
                dsl.push_str(&session.class_block(ty)?);
            } else {
                dsl.push_str(&edges.join(","));
            }
        }

        debug!(
            length = dsl.len(),
            edges = session.written.len(),
            ledger = session.ledger.len(),
            "Built fragment"
        );

        Ok(DiagramFragment {
            dsl,
            style,
            relationships: session.written,
        })
    }
}

/// State of one build; dropped when the build returns
struct Session<'b, P: ?Sized> {
    provider: &'b P,
    names: &'b DisplayNames,
    members: MemberSerializer<'b, P>,
    requested: HashSet<TypeRef>,
    detail: DetailLevel,
    ledger: RelationshipLedger,
    written: Vec<Relationship>,
}

impl<P> Session<'_, P>
where
    P: TypeMetadataProvider + ?Sized,
{
    /// `[<<I>>;Name|properties|methods]`
    fn class_block(&self, ty: TypeRef) -> Result<String, DiagramError> {
        let mut block = String::from("[");
        block.push_str(&self.interface_markers(ty)?);
        block.push_str(&self.names.display_name(self.provider, ty)?);

        let properties = self.members.properties(ty, self.detail)?;
        if !properties.is_empty() {
            block.push('|');
            block.push_str(&properties);
        }
        let methods = self.members.methods(ty, self.detail)?;
        if !methods.is_empty() {
            block.push('|');
            block.push_str(&methods);
        }

        block.push(']');
        Ok(block)
    }

    /// `<<Name>>;` for every implemented interface that was requested
    fn interface_markers(&self, ty: TypeRef) -> Result<String, DiagramError> {
        let mut markers = String::new();
        for &interface in &self.provider.describe(ty)?.interfaces {
            if self.requested.contains(&interface) {
                markers.push_str("<<");
                markers.push_str(&self.names.display_name(self.provider, interface)?);
                markers.push_str(">>;");
            }
        }
        Ok(markers)
    }

    /// `[child]^-[ancestor]` for every requested ancestor not yet linked
    ///
    /// Ancestors missing from the request are skipped, so a grandparent can be
    /// linked straight to the child.
    fn inheritance_edges(&mut self, ty: TypeRef) -> Result<Vec<String>, DiagramError> {
        let mut edges = Vec::new();
        for ancestor in self.provider.ancestors(ty)? {
            if !self.requested.contains(&ancestor) {
                continue;
            }

            let relationship = Relationship::new(ty, ancestor, RelationshipKind::Inherits);
            if !self.ledger.record(relationship) {
                trace!(child = %ty, %ancestor, "Inheritance edge already written");
                continue;
            }
            edges.push(self.edge(ty, ancestor, RelationshipKind::Inherits)?);
            self.written.push(relationship);
        }
        Ok(edges)
    }

    /// `[owner]->[target]` and `[owner]1-0..*[element]` per property
    fn association_edges(&mut self, ty: TypeRef) -> Result<Vec<String>, DiagramError> {
        let provider = self.provider;
        let mut edges = Vec::new();
        for property in &provider.describe(ty)?.properties {
            let value_type = property.value_type;
            if self.requested.contains(&value_type) {
                edges.push(self.edge(ty, value_type, RelationshipKind::Associates)?);
                self.written
                    .push(Relationship::new(ty, value_type, RelationshipKind::Associates));
                continue;
            }

            let value = provider.describe(value_type)?;
            let element = match value.generic_arguments.first() {
                Some(first) if value.enumerable && self.requested.contains(first) => *first,
                _ => continue,
            };
            edges.push(self.edge(ty, element, RelationshipKind::AggregatesMany)?);
            self.written
                .push(Relationship::new(ty, element, RelationshipKind::AggregatesMany));
        }
        Ok(edges)
    }

    fn edge(
        &self,
        source: TypeRef,
        target: TypeRef,
        kind: RelationshipKind,
    ) -> Result<String, DiagramError> {
        trace!(%source, %target, edge = kind.edge(), "Writing edge");
        Ok(format!(
            "{}{}{}",
            self.class_block(source)?,
            kind.edge(),
            self.class_block(target)?
        ))
    }
}
