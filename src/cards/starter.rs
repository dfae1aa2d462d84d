//! A small built-in card pool.
//!
//! Five basic lands, vanilla and keyword creatures covering every keyword
//! the combat rules implement, and a few auras. Enough to run complete
//! games and scenario tests without an external card database.

use super::definition::{CardDefinition, CardTypeId, ManaAbility, StaticEffect};
use super::registry::CardCatalog;
use crate::core::vocabulary::Keyword;
use crate::mana::{ManaColor, ManaCost};

pub const FOREST: CardTypeId = CardTypeId(1000);
pub const ISLAND: CardTypeId = CardTypeId(1001);
pub const MOUNTAIN: CardTypeId = CardTypeId(1002);
pub const SWAMP: CardTypeId = CardTypeId(1003);
pub const PLAINS: CardTypeId = CardTypeId(1004);

pub const GRIZZLY_BEARS: CardTypeId = CardTypeId(2000);
pub const LLANOWAR_ELVES: CardTypeId = CardTypeId(2001);
pub const ALPINE_WATCHDOG: CardTypeId = CardTypeId(2002);
pub const ANOINTED_CHORISTER: CardTypeId = CardTypeId(2003);
pub const AVEN_GAGGLEMASTER: CardTypeId = CardTypeId(2004);
pub const SNARESPINNER: CardTypeId = CardTypeId(2005);
pub const RAGING_GOBLIN: CardTypeId = CardTypeId(2006);
pub const YOUTHFUL_KNIGHT: CardTypeId = CardTypeId(2007);
pub const FENCING_ACE: CardTypeId = CardTypeId(2008);
pub const TYPHOID_RATS: CardTypeId = CardTypeId(2009);
pub const COLOSSAL_DREADMAW: CardTypeId = CardTypeId(2010);
pub const BOGGART_BRUTE: CardTypeId = CardTypeId(2011);
pub const WALL_OF_WOOD: CardTypeId = CardTypeId(2012);
pub const KRENKOS_ENFORCER: CardTypeId = CardTypeId(2013);

pub const GIANT_STRENGTH: CardTypeId = CardTypeId(3000);
pub const FLIGHT: CardTypeId = CardTypeId(3001);
pub const KENRITHS_TRANSFORMATION: CardTypeId = CardTypeId(3002);

/// Basic land type for a color.
#[must_use]
pub fn basic_land(color: ManaColor) -> Option<CardTypeId> {
    match color {
        ManaColor::Green => Some(FOREST),
        ManaColor::Blue => Some(ISLAND),
        ManaColor::Red => Some(MOUNTAIN),
        ManaColor::Black => Some(SWAMP),
        ManaColor::White => Some(PLAINS),
        ManaColor::Colorless => None,
    }
}

fn cost(text: &str) -> ManaCost {
    // Costs below are literals in valid notation.
    ManaCost::parse(text).unwrap_or_default()
}

fn creature(id: CardTypeId, name: &str, mana: &str, power: i64, toughness: i64) -> CardDefinition {
    CardDefinition::creature(id, name, cost(mana), power, toughness)
}

/// Build the starter catalog.
#[must_use]
pub fn catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();

    for (id, name, color) in [
        (FOREST, "Forest", ManaColor::Green),
        (ISLAND, "Island", ManaColor::Blue),
        (MOUNTAIN, "Mountain", ManaColor::Red),
        (SWAMP, "Swamp", ManaColor::Black),
        (PLAINS, "Plains", ManaColor::White),
    ] {
        catalog.register(CardDefinition::land(id, name).with_mana_ability(ManaAbility::tap_for(color)));
    }

    catalog.register(creature(GRIZZLY_BEARS, "Grizzly Bears", "{1}{G}", 2, 2));
    catalog.register(
        creature(LLANOWAR_ELVES, "Llanowar Elves", "{G}", 1, 1)
            .with_mana_ability(ManaAbility::tap_for(ManaColor::Green)),
    );
    catalog.register(
        creature(ALPINE_WATCHDOG, "Alpine Watchdog", "{1}{W}", 2, 2).with_keyword(Keyword::Vigilance),
    );
    catalog.register(
        creature(ANOINTED_CHORISTER, "Anointed Chorister", "{W}", 1, 1).with_keyword(Keyword::Lifelink),
    );
    catalog.register(
        creature(AVEN_GAGGLEMASTER, "Aven Gagglemaster", "{3}{W}{W}", 4, 3).with_keyword(Keyword::Flying),
    );
    catalog.register(creature(SNARESPINNER, "Snarespinner", "{1}{G}", 1, 3).with_keyword(Keyword::Reach));
    catalog.register(creature(RAGING_GOBLIN, "Raging Goblin", "{R}", 1, 1).with_keyword(Keyword::Haste));
    catalog.register(
        creature(YOUTHFUL_KNIGHT, "Youthful Knight", "{1}{W}", 2, 1).with_keyword(Keyword::FirstStrike),
    );
    catalog.register(
        creature(FENCING_ACE, "Fencing Ace", "{1}{W}", 1, 1).with_keyword(Keyword::DoubleStrike),
    );
    catalog.register(creature(TYPHOID_RATS, "Typhoid Rats", "{B}", 1, 1).with_keyword(Keyword::Deathtouch));
    catalog.register(
        creature(COLOSSAL_DREADMAW, "Colossal Dreadmaw", "{4}{G}{G}", 6, 6).with_keyword(Keyword::Trample),
    );
    catalog.register(creature(BOGGART_BRUTE, "Boggart Brute", "{2}{R}", 3, 2).with_keyword(Keyword::Menace));
    catalog.register(creature(WALL_OF_WOOD, "Wall of Wood", "{G}", 0, 3).with_keyword(Keyword::Defender));
    catalog.register(
        creature(KRENKOS_ENFORCER, "Krenko's Enforcer", "{1}{R}{R}", 2, 2).with_keyword(Keyword::Intimidate),
    );

    catalog.register(
        CardDefinition::aura(GIANT_STRENGTH, "Giant Strength", cost("{R}{R}"))
            .with_effect(StaticEffect::ModifyPowerToughness { power: 2, toughness: 2 }),
    );
    catalog.register(
        CardDefinition::aura(FLIGHT, "Flight", cost("{U}")).with_effect(StaticEffect::GrantKeyword(Keyword::Flying)),
    );
    catalog.register(
        CardDefinition::aura(KENRITHS_TRANSFORMATION, "Kenrith's Transformation", cost("{1}{G}"))
            .with_effect(StaticEffect::RemoveAllKeywords)
            .with_effect(StaticEffect::SetBasePowerToughness { power: 3, toughness: 3 }),
    );

    catalog
}

/// Forty-card two-color deck: 17 basics of each color's land split plus
/// creatures and auras from those colors, in a fixed order.
#[must_use]
pub fn sample_deck(primary: ManaColor, secondary: ManaColor) -> Vec<CardTypeId> {
    let catalog = catalog();
    let mut spells: Vec<CardTypeId> = catalog
        .iter()
        .filter(|def| !def.is_land())
        .filter(|def| {
            def.colors()
                .iter()
                .all(|c| c == primary || c == secondary)
        })
        .map(|def| def.id)
        .collect();
    spells.sort();

    let mut deck = Vec::with_capacity(40);
    for (i, land) in [primary, secondary].into_iter().filter_map(basic_land).enumerate() {
        let count = if i == 0 { 9 } else { 8 };
        deck.extend(std::iter::repeat(land).take(count));
    }
    if spells.is_empty() {
        return deck;
    }
    let mut i = 0;
    while deck.len() < 40 {
        deck.push(spells[i % spells.len()]);
        i += 1;
    }
    deck
}
