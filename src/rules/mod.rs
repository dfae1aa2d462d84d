//! Game rules: turn structure, legal moves, action execution and
//! state-based actions.
//!
//! Everything here is a free function over a [`GameGraph`](crate::graph::GameGraph)
//! plus the read-only catalog and config. The [`Game`](crate::game::Game)
//! facade strings them together and implements [`RulesEngine`].

pub mod engine;
pub mod executor;
pub mod legal;
pub mod state_based;
pub mod turn;

pub use engine::{GameResult, RulesEngine};
pub use executor::execute;
pub use legal::{acting_player, legal_moves};
pub use state_based::check_state_based_actions;
pub use turn::{check_win_loss, end_turn, next_phase, progress, steps_of, turn_sequence, StepOutcome, TURN_STRUCTURE};
