//! Core engine types: entity ids, seats, actions, RNG, configuration,
//! errors and the term vocabulary.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod vocabulary;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, PlayMode};
pub use entity::EntityId;
pub use error::{EngineError, Result};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use vocabulary::{
    Keyword, KeywordSet, ManaColor, Phase, RelationKind, Step, Term, VocabId, Vocabulary,
    ZoneKind, PLAYER_TERM,
};
