//! Rules engine trait.
//!
//! The play harness drives games through `RulesEngine` so that selectors
//! and loops never touch the graph directly:
//! - What actions are legal, and for whom
//! - How an action modifies state
//! - How the game moves on when nobody acts
//! - Whether the game is over

use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::error::Result;
use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players lost at the same time.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: must not mutate; two calls in a row return the same list
/// - `apply_action`: must be deterministic for replay
/// - `advance`: moves the turn on without an action (automatic play)
/// - `result`: `None` while the game continues
pub trait RulesEngine {
    /// The player whose decision it is.
    fn acting_player(&self) -> PlayerId;

    /// Legal actions for the acting player, in a stable order.
    fn legal_actions(&self) -> Result<Vec<Action>>;

    /// Apply an action taken from the most recent `legal_actions`.
    fn apply_action(&mut self, action: Action) -> Result<()>;

    /// Leave the current step without acting. With `force`, skip to the
    /// next phase.
    fn advance(&mut self, force: bool) -> Result<()>;

    /// Check if the game is over.
    fn result(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    fn is_terminal(&self) -> bool {
        self.result().is_some()
    }

    /// Legal actions if `player` is the one acting, otherwise none.
    fn legal_actions_for(&self, player: PlayerId) -> Result<Vec<Action>> {
        if self.acting_player() == player {
            self.legal_actions()
        } else {
            Ok(Vec::new())
        }
    }
}
