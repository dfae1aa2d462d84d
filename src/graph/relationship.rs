use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::vocabulary::RelationKind;

/// A directed, timestamped edge between two entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub source: EntityId,
    pub target: EntityId,
    pub kind: RelationKind,
    /// Creation order. IsInZone edges carry 0; their order is zone order.
    pub timestamp: u64,
}

/// Edge query. Unset fields match anything.
///
/// ```
/// use rust_mtg::graph::RelationshipFilter;
/// use rust_mtg::core::{EntityId, RelationKind};
///
/// let blockers_of = RelationshipFilter::new()
///     .target(EntityId(12))
///     .kind(RelationKind::IsBlocking);
/// assert_eq!(blockers_of.kind, Some(RelationKind::IsBlocking));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelationshipFilter {
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub kind: Option<RelationKind>,
}

impl RelationshipFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: RelationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn matches(&self, rel: &Relationship) -> bool {
        self.source.map_or(true, |s| s == rel.source)
            && self.target.map_or(true, |t| t == rel.target)
            && self.kind.map_or(true, |k| k == rel.kind)
    }
}
