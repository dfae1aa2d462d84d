//! Per-entity components.
//!
//! The game graph stores each of these in its own sparse map keyed by
//! entity id. A card always has a [`CardInstance`] and a [`PermanentState`];
//! creature and land cards also get the matching component, hydrated from
//! the catalog when the card entity is created.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardKind, CardTypeId};
use crate::core::player::PlayerId;
use crate::mana::ManaPool;

/// Identity of a card entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub card_type: CardTypeId,
    /// Who started the game with this card. Never changes.
    pub owner: PlayerId,
}

/// Printed power and toughness of a creature card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureComponent {
    pub base_power: i64,
    pub base_toughness: i64,
}

impl CreatureComponent {
    #[must_use]
    pub fn from_definition(def: &CardDefinition) -> Option<Self> {
        match def.kind {
            CardKind::Creature { power, toughness } => Some(Self {
                base_power: power,
                base_toughness: toughness,
            }),
            _ => None,
        }
    }
}

/// A land card and the mana its abilities can make in total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandComponent {
    pub produces: ManaPool,
}

impl LandComponent {
    #[must_use]
    pub fn from_definition(def: &CardDefinition) -> Option<Self> {
        if !def.is_land() {
            return None;
        }
        let mut produces = ManaPool::empty();
        for ability in &def.mana_abilities {
            produces.add_pool(&ability.produces);
        }
        Some(Self { produces })
    }
}

/// Status of a card as a permanent.
///
/// Reset when the card enters the battlefield, so a creature that dies and
/// returns is a new object. Off the battlefield it keeps the values it had
/// when it left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermanentState {
    pub tapped: bool,
    pub summoning_sick: bool,
    /// Damage marked this turn. Removed in the cleanup step.
    pub damage_taken: i64,
    /// Marked damage includes damage from a deathtouch source.
    pub deathtouched: bool,
    pub attacking: bool,
    /// Set when blocks close on an attacker that had at least one blocker.
    pub blocked: bool,
    /// Turn the card entered the battlefield, if it is there.
    pub turn_entered: Option<u32>,
}

impl Default for PermanentState {
    fn default() -> Self {
        Self {
            tapped: false,
            summoning_sick: true,
            damage_taken: 0,
            deathtouched: false,
            attacking: false,
            blocked: false,
            turn_entered: None,
        }
    }
}

impl PermanentState {
    pub fn clear_combat(&mut self) {
        self.attacking = false;
        self.blocked = false;
    }

    pub fn remove_damage(&mut self) {
        self.damage_taken = 0;
        self.deathtouched = false;
    }
}

/// Per-player properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub life_total: i64,
    pub mana_pool: ManaPool,
    pub lands_played_this_turn: u32,
    /// Set when the player attempts to draw from an empty library.
    pub has_lost: bool,
    pub mulligans_taken: u32,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>, life_total: i64) -> Self {
        Self {
            name: name.into(),
            life_total,
            mana_pool: ManaPool::empty(),
            lands_played_this_turn: 0,
            has_lost: false,
            mulligans_taken: 0,
        }
    }

    /// Whether the player has lost by either condition.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.has_lost || self.life_total <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::ManaAbility;
    use crate::mana::{ManaColor, ManaCost};

    #[test]
    fn test_hydrate_creature() {
        let def = CardDefinition::creature(
            CardTypeId::new(2000),
            "Grizzly Bears",
            ManaCost::parse("{1}{G}").unwrap(),
            2,
            2,
        );
        assert_eq!(
            CreatureComponent::from_definition(&def),
            Some(CreatureComponent { base_power: 2, base_toughness: 2 })
        );
        assert!(LandComponent::from_definition(&def).is_none());
    }

    #[test]
    fn test_hydrate_land() {
        let def = CardDefinition::land(CardTypeId::new(1000), "Forest")
            .with_mana_ability(ManaAbility::tap_for(ManaColor::Green));
        let land = LandComponent::from_definition(&def).unwrap();
        assert_eq!(land.produces.get(ManaColor::Green), 1);
        assert!(CreatureComponent::from_definition(&def).is_none());
    }

    #[test]
    fn test_fresh_permanent_is_sick() {
        let state = PermanentState::default();
        assert!(state.summoning_sick);
        assert!(!state.tapped);
        assert_eq!(state.damage_taken, 0);
        assert!(state.turn_entered.is_none());
    }

    #[test]
    fn test_player_defeat() {
        let mut player = PlayerState::new("Alice", 20);
        assert!(!player.is_defeated());
        player.life_total = 0;
        assert!(player.is_defeated());

        let mut decked = PlayerState::new("Bob", 20);
        decked.has_lost = true;
        assert!(decked.is_defeated());
    }
}
