//! Keyword predicates used by combat.
//!
//! Everything here reads effective [`Characteristics`], so keywords granted
//! or removed by auras are honored.

use crate::core::vocabulary::Keyword;
use crate::layers::Characteristics;

/// Whether `blocker` may block `attacker`, looking only at keywords.
///
/// - Flying: only creatures with flying or reach can block.
/// - Intimidate: only creatures sharing a color can block.
/// - Defender, menace and tapped state are checked elsewhere.
#[must_use]
pub fn can_block(attacker: &Characteristics, blocker: &Characteristics) -> bool {
    if attacker.has(Keyword::Flying) && !(blocker.has(Keyword::Flying) || blocker.has(Keyword::Reach)) {
        return false;
    }
    if attacker.has(Keyword::Intimidate) && !attacker.colors.intersects(blocker.colors) {
        return false;
    }
    true
}

/// Minimum number of creatures that must block `attacker` for the block
/// to stand.
#[must_use]
pub fn minimum_blockers(attacker: &Characteristics) -> usize {
    if attacker.has(Keyword::Menace) {
        2
    } else {
        1
    }
}

#[must_use]
pub fn has_vigilance(creature: &Characteristics) -> bool {
    creature.has(Keyword::Vigilance)
}

/// Deals damage in the first-strike pass.
#[must_use]
pub fn deals_first_strike_damage(creature: &Characteristics) -> bool {
    creature.has(Keyword::FirstStrike) || creature.has(Keyword::DoubleStrike)
}

/// Deals damage in the regular pass.
#[must_use]
pub fn deals_regular_combat_damage(creature: &Characteristics) -> bool {
    !creature.has(Keyword::FirstStrike) || creature.has(Keyword::DoubleStrike)
}

/// Damage that counts as lethal to `victim` from `source`.
///
/// Toughness minus damage already marked, or 1 from a deathtouch source.
/// Never below zero.
#[must_use]
pub fn lethal_damage(source: &Characteristics, victim: &Characteristics, already_marked: i64) -> i64 {
    let remaining = (victim.toughness - already_marked).max(0);
    if source.has(Keyword::Deathtouch) {
        remaining.min(1)
    } else {
        remaining
    }
}
