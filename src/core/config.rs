//! Game configuration.
//!
//! `GameConfig` holds the numeric rules parameters a game is created with.
//! It is plain data, serializable, and built with `with_*` methods:
//!
//! ```
//! use rust_mtg::core::{GameConfig, PlayMode};
//!
//! let config = GameConfig::default()
//!     .with_starting_life(30)
//!     .with_play_mode(PlayMode::Automatic);
//! assert_eq!(config.starting_life, 30);
//! assert_eq!(config.opening_hand_size, 7);
//! ```

use serde::{Deserialize, Serialize};

/// Whether pass actions are offered to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// `PassPriority` and `PassTurn` are appended to every legal move set.
    #[default]
    Interactive,
    /// No pass actions; the driver forces an advance when nothing is legal.
    Automatic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_life: i64,
    pub opening_hand_size: usize,
    pub lands_per_turn: u32,
    pub play_mode: PlayMode,

    /// Upper bound on step advances in one `end_turn`. Reaching it means
    /// the turn table is broken.
    pub end_turn_step_cap: usize,

    /// Skip the draw of the player who goes first on turn 1.
    pub skip_first_draw: bool,

    /// How many times each player may mulligan before the first action.
    pub max_mulligans: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            opening_hand_size: 7,
            lands_per_turn: 1,
            play_mode: PlayMode::Interactive,
            end_turn_step_cap: 64,
            skip_first_draw: false,
            max_mulligans: 6,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_lands_per_turn(mut self, lands: u32) -> Self {
        self.lands_per_turn = lands;
        self
    }

    #[must_use]
    pub fn with_play_mode(mut self, mode: PlayMode) -> Self {
        self.play_mode = mode;
        self
    }

    #[must_use]
    pub fn with_end_turn_step_cap(mut self, cap: usize) -> Self {
        self.end_turn_step_cap = cap;
        self
    }

    #[must_use]
    pub fn with_skip_first_draw(mut self, skip: bool) -> Self {
        self.skip_first_draw = skip;
        self
    }

    #[must_use]
    pub fn with_max_mulligans(mut self, max: u32) -> Self {
        self.max_mulligans = max;
        self
    }
}
