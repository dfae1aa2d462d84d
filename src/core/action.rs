//! Player actions.
//!
//! An [`Action`] is a verb plus the entities it points at. The legal move
//! generator produces them; the executor consumes them. Every consumer
//! matches exhaustively, so adding a verb is a compile error everywhere it
//! must be handled.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    PlayLand { card: EntityId },
    /// `target` is the enchanted creature for auras.
    CastSpell { card: EntityId, target: Option<EntityId> },
    ActivateManaAbility { card: EntityId, ability_index: usize },
    DeclareAttacker { card: EntityId },
    DeclareBlocker { blocker: EntityId, attacker: EntityId },
    PassPriority,
    PassTurn,
}

impl Action {
    /// Entities this action refers to, in declaration order.
    ///
    /// ```
    /// use rust_mtg::core::{Action, EntityId};
    ///
    /// let block = Action::DeclareBlocker { blocker: EntityId(20), attacker: EntityId(11) };
    /// assert_eq!(block.pointers().as_slice(), &[EntityId(20), EntityId(11)]);
    /// assert!(Action::PassTurn.pointers().is_empty());
    /// ```
    #[must_use]
    pub fn pointers(&self) -> SmallVec<[EntityId; 2]> {
        let mut out = SmallVec::new();
        match *self {
            Self::PlayLand { card }
            | Self::ActivateManaAbility { card, .. }
            | Self::DeclareAttacker { card } => out.push(card),
            Self::CastSpell { card, target } => {
                out.push(card);
                out.extend(target);
            }
            Self::DeclareBlocker { blocker, attacker } => {
                out.push(blocker);
                out.push(attacker);
            }
            Self::PassPriority | Self::PassTurn => {}
        }
        out
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::PassPriority | Self::PassTurn)
    }
}

/// One executed action in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub turn: u32,
    /// Position in the game's history, starting at 0.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self { player, action, turn, sequence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_pointers_include_target() {
        let aura = Action::CastSpell { card: EntityId(30), target: Some(EntityId(12)) };
        assert_eq!(aura.pointers().as_slice(), &[EntityId(30), EntityId(12)]);

        let creature = Action::CastSpell { card: EntityId(31), target: None };
        assert_eq!(creature.pointers().as_slice(), &[EntityId(31)]);
    }

    #[test]
    fn test_is_pass() {
        assert!(Action::PassPriority.is_pass());
        assert!(Action::PassTurn.is_pass());
        assert!(!Action::PlayLand { card: EntityId(5) }.is_pass());
    }

    #[test]
    fn test_record_serde() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            Action::DeclareBlocker { blocker: EntityId(40), attacker: EntityId(22) },
            3,
            17,
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
