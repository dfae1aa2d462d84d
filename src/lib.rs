//! # rust-mtg
//!
//! A deterministic rule engine for a two-player trading card game.
//!
//! ## Design Principles
//!
//! 1. **One source of truth**: the whole board is a [`GameGraph`] of
//!    entities (players, zones, cards) and typed edges between them.
//!
//! 2. **Pure queries, atomic mutations**: legal moves are computed without
//!    touching state; every action either applies fully or not at all.
//!
//! 3. **Injected, not global**: the card catalog, vocabulary, config and
//!    RNG are built once and handed to the game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so a game
//!   can be copied for look-ahead or rolled back after a failed action.
//!
//! - **Seeded Randomness**: every shuffle draws from the game's ChaCha8
//!   stream. The same seed and the same history give the same game.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, actions, vocabulary, RNG, configuration, errors
//! - `mana`: Mana pools, costs and the payment planner
//! - `cards`: Card definitions, per-card components, the starter catalog
//! - `zones`: Ordered zone membership
//! - `graph`: The entity/relationship store
//! - `layers`: Continuous effects and effective characteristics
//! - `combat`: Attack and block legality, combat damage
//! - `rules`: Turn structure, legal moves, action execution, state-based actions
//! - `game`: The game facade, setup builder and play harness
//!
//! ## Example
//!
//! ```
//! use rust_mtg::cards::starter;
//! use rust_mtg::game::{play_out, GameBuilder, RandomLegal};
//! use rust_mtg::mana::ManaColor;
//!
//! let mut game = GameBuilder::new(starter::catalog())
//!     .deck(0, starter::sample_deck(ManaColor::Green, ManaColor::White))
//!     .deck(1, starter::sample_deck(ManaColor::Red, ManaColor::Black))
//!     .build(7)
//!     .unwrap();
//!
//! let mut selector = RandomLegal::new(game.fork_rng());
//! let report = play_out(&mut game, &mut selector, 20_000).unwrap();
//! assert!(report.result.is_some());
//! ```

pub mod core;
pub mod mana;
pub mod cards;
pub mod zones;
pub mod graph;
pub mod layers;
pub mod combat;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord,
    EngineError, Result,
    EntityId, PlayerId, PlayerMap,
    GameConfig, PlayMode,
    GameRng, GameRngState,
    Keyword, ManaColor, Phase, Step, ZoneKind, RelationKind, Vocabulary,
};

pub use crate::mana::{ManaCost, ManaPool};

pub use crate::cards::{CardCatalog, CardDefinition, CardTypeId};

pub use crate::zones::ZonePosition;

pub use crate::graph::{GameGraph, Relationship, RelationshipFilter};

pub use crate::layers::Characteristics;

pub use crate::combat::CombatReport;

pub use crate::rules::{GameResult, RulesEngine, StepOutcome};

pub use crate::game::{Game, GameBuilder, GameEvent, GameStatus};
