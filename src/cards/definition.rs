//! Card definitions: static per-card-type data.
//!
//! A `CardDefinition` describes a card type ("Grizzly Bears": costs
//! `{1}{G}`, a 2/2 creature). Everything that varies during a game (zone,
//! tapped, damage) lives on the instance side in the game graph.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::vocabulary::{Keyword, KeywordSet};
use crate::mana::{ColorSet, ManaColor, ManaCost, ManaPool};

/// Identifies a card type, e.g. every Forest shares one `CardTypeId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardTypeId(pub u32);

impl CardTypeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardType({})", self.0)
    }
}

/// What it costs to activate an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCost {
    pub tap: bool,
}

/// An activated ability that adds mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaAbility {
    pub cost: AbilityCost,
    pub produces: ManaPool,
}

impl ManaAbility {
    /// `{T}: Add one mana of the given color.`
    #[must_use]
    pub fn tap_for(color: ManaColor) -> Self {
        Self {
            cost: AbilityCost { tap: true },
            produces: ManaPool::from_amounts(&[(color, 1)]),
        }
    }
}

/// Continuous effect an aura applies to the creature it enchants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaticEffect {
    GrantKeyword(Keyword),
    RemoveAllKeywords,
    /// Base power/toughness become the given values.
    SetBasePowerToughness { power: i64, toughness: i64 },
    ModifyPowerToughness { power: i64, toughness: i64 },
    SwitchPowerToughness,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Land,
    Creature { power: i64, toughness: i64 },
    /// An aura that enchants a creature.
    Aura { effects: SmallVec<[StaticEffect; 2]> },
}

/// Static card definition.
///
/// ```
/// use rust_mtg::cards::{CardDefinition, CardTypeId};
/// use rust_mtg::core::Keyword;
/// use rust_mtg::mana::ManaCost;
///
/// let knight = CardDefinition::creature(
///     CardTypeId::new(2100),
///     "Youthful Knight",
///     ManaCost::parse("{1}{W}").unwrap(),
///     2,
///     1,
/// )
/// .with_keyword(Keyword::FirstStrike);
///
/// assert!(knight.is_creature());
/// assert_eq!(knight.power(), Some(2));
/// assert!(knight.keyword_set().contains(Keyword::FirstStrike));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardTypeId,
    pub name: String,
    pub mana_cost: ManaCost,
    pub kind: CardKind,
    pub keywords: SmallVec<[Keyword; 4]>,
    pub mana_abilities: SmallVec<[ManaAbility; 1]>,
}

impl CardDefinition {
    fn new(id: CardTypeId, name: impl Into<String>, mana_cost: ManaCost, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            mana_cost,
            kind,
            keywords: SmallVec::new(),
            mana_abilities: SmallVec::new(),
        }
    }

    /// A land with no cost and no abilities yet.
    #[must_use]
    pub fn land(id: CardTypeId, name: impl Into<String>) -> Self {
        Self::new(id, name, ManaCost::free(), CardKind::Land)
    }

    #[must_use]
    pub fn creature(
        id: CardTypeId,
        name: impl Into<String>,
        mana_cost: ManaCost,
        power: i64,
        toughness: i64,
    ) -> Self {
        Self::new(id, name, mana_cost, CardKind::Creature { power, toughness })
    }

    #[must_use]
    pub fn aura(id: CardTypeId, name: impl Into<String>, mana_cost: ManaCost) -> Self {
        Self::new(id, name, mana_cost, CardKind::Aura { effects: SmallVec::new() })
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn with_mana_ability(mut self, ability: ManaAbility) -> Self {
        self.mana_abilities.push(ability);
        self
    }

    /// Add an effect to an aura. Ignored for other kinds.
    #[must_use]
    pub fn with_effect(mut self, effect: StaticEffect) -> Self {
        if let CardKind::Aura { effects } = &mut self.kind {
            effects.push(effect);
        }
        self
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        matches!(self.kind, CardKind::Land)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        matches!(self.kind, CardKind::Creature { .. })
    }

    #[must_use]
    pub fn is_aura(&self) -> bool {
        matches!(self.kind, CardKind::Aura { .. })
    }

    #[must_use]
    pub fn power(&self) -> Option<i64> {
        match self.kind {
            CardKind::Creature { power, .. } => Some(power),
            _ => None,
        }
    }

    #[must_use]
    pub fn toughness(&self) -> Option<i64> {
        match self.kind {
            CardKind::Creature { toughness, .. } => Some(toughness),
            _ => None,
        }
    }

    /// Effects of an aura; empty for other kinds.
    #[must_use]
    pub fn aura_effects(&self) -> &[StaticEffect] {
        match &self.kind {
            CardKind::Aura { effects } => effects,
            _ => &[],
        }
    }

    #[must_use]
    pub fn keyword_set(&self) -> KeywordSet {
        self.keywords.iter().copied().collect()
    }

    /// Colors come from the mana cost; lands are colorless.
    #[must_use]
    pub fn colors(&self) -> ColorSet {
        self.mana_cost.colors()
    }
}
