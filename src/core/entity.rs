//! Entity identification.
//!
//! Players, zones and cards are all entities in the game graph and share
//! one id space.
//!
//! ## ID Layout
//!
//! - `0..PLAYER_COUNT`: the players, in seat order
//! - `PLAYER_COUNT..`: zones, then cards, allocated monotonically
//!
//! ```
//! use rust_mtg::core::{EntityId, PlayerId};
//!
//! let p1 = EntityId::player(PlayerId::new(1));
//! assert!(p1.is_player());
//! assert_eq!(p1.as_player(), Some(PlayerId::new(1)));
//!
//! let card = EntityId(17);
//! assert!(!card.is_player());
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PLAYER_COUNT};

/// Unique identifier for any game entity.
///
/// Ordered so that graph iteration (and therefore legal-move order) follows
/// allocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Entity id of a seat.
    #[must_use]
    pub const fn player(player: PlayerId) -> Self {
        Self(player.0 as u32)
    }

    /// First id handed out to a non-player entity.
    #[must_use]
    pub const fn first_non_player() -> u32 {
        PLAYER_COUNT as u32
    }

    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 < PLAYER_COUNT as u32
    }

    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        if self.is_player() {
            Some(PlayerId(self.0 as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<PlayerId> for EntityId {
    fn from(player: PlayerId) -> Self {
        Self::player(player)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
