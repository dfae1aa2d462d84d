//! Engine error type.
//!
//! Errors fall into two groups. Recoverable errors (`IllegalAction`,
//! `MulliganUnavailable`, ...) are rejected before any mutation and leave
//! the game untouched. Fatal errors (see [`EngineError::is_fatal`]) mean the
//! graph no longer satisfies its invariants; the game facade aborts and
//! keeps a state dump for diagnosis.

use thiserror::Error;

use super::action::Action;
use super::entity::EntityId;
use super::player::PlayerId;
use super::vocabulary::ZoneKind;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("action {0:?} is not legal in the current state")]
    IllegalAction(Action),

    #[error("{player} has no {kind} zone")]
    MissingZone { player: PlayerId, kind: ZoneKind },

    #[error("{player} tried to draw from an empty library")]
    EmptyLibrary { player: PlayerId },

    #[error("mana payment for {card} failed after it was judged affordable")]
    CostMismatch { card: EntityId },

    #[error("card type {0} is not in the catalog")]
    UnknownCardType(u32),

    #[error("{0} does not exist")]
    UnknownEntity(EntityId),

    #[error("{0} is not a card")]
    NotACard(EntityId),

    #[error("{0} is not a zone")]
    NotAZone(EntityId),

    #[error("{card} is already in a zone")]
    AlreadyInZone { card: EntityId },

    #[error("players are created with the graph, not added later")]
    PlayerEntityAdded,

    #[error("vocabulary name {name:?} conflicts with id {id}")]
    VocabularyConflict { name: String, id: u32 },

    #[error("{player} cannot mulligan now")]
    MulliganUnavailable { player: PlayerId },

    #[error("invalid cards chosen for the library bottom: {0}")]
    InvalidBottomCards(String),

    #[error("invariant violated: {detail}")]
    InvariantViolation { detail: String, dump: String },

    #[error("the game is over")]
    GameOver,

    #[error("snapshot failed: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Whether the game must be aborted.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingZone { .. }
                | Self::CostMismatch { .. }
                | Self::UnknownCardType(_)
                | Self::UnknownEntity(_)
                | Self::NotACard(_)
                | Self::NotAZone(_)
                | Self::AlreadyInZone { .. }
                | Self::InvariantViolation { .. }
        )
    }

    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            detail: detail.into(),
            dump: String::new(),
        }
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}
