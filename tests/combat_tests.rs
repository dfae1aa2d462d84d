//! Combat integration tests: keyword legality and damage.

mod common;

use common::*;
use rust_mtg::cards::starter;
use rust_mtg::combat::DamageTarget;
use rust_mtg::{Action, EngineError, RelationKind, RelationshipFilter, Step, ZoneKind};
use test_log::test;

fn legal_blocks(game: &rust_mtg::Game) -> Vec<(rust_mtg::EntityId, rust_mtg::EntityId)> {
    game.legal_moves()
        .unwrap()
        .into_iter()
        .filter_map(|m| match m {
            Action::DeclareBlocker { blocker, attacker } => Some((blocker, attacker)),
            _ => None,
        })
        .collect()
}

fn legal_attackers(game: &rust_mtg::Game) -> Vec<rust_mtg::EntityId> {
    game.legal_moves()
        .unwrap()
        .into_iter()
        .filter_map(|m| match m {
            Action::DeclareAttacker { card } => Some(card),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Lifelink
// =============================================================================

#[test]
fn test_lifelink_unblocked() {
    let mut game = board(vec![], vec![starter::ANOINTED_CHORISTER], vec![]);
    let chorister = find(&game, P0, ZoneKind::Battlefield, starter::ANOINTED_CHORISTER);

    attack_with(&mut game, &[chorister]);
    block_and_resolve(&mut game, &[]);

    assert_eq!(life(&game, P0), 21);
    assert_eq!(life(&game, P1), 19);
    assert_eq!(game.last_combat().unwrap().life_gained, vec![(P0, 1)]);
}

#[test]
fn test_lifelink_blocked() {
    let mut game = board(vec![], vec![starter::ANOINTED_CHORISTER], vec![starter::GRIZZLY_BEARS]);
    let chorister = find(&game, P0, ZoneKind::Battlefield, starter::ANOINTED_CHORISTER);
    let bears = find(&game, P1, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);

    attack_with(&mut game, &[chorister]);
    block_and_resolve(&mut game, &[(bears, chorister)]);

    assert_eq!(life(&game, P0), 21);
    assert_eq!(life(&game, P1), 20);
    assert_eq!(damage(&game, bears), 1);
    assert_eq!(game.graph().card_zone_kind(chorister), Some(ZoneKind::Graveyard));
}

// =============================================================================
// Block Legality
// =============================================================================

/// A flyer can only be blocked by flying or reach.
#[test]
fn test_flying_needs_flying_or_reach() {
    let mut game = board(
        vec![],
        vec![starter::AVEN_GAGGLEMASTER],
        vec![starter::GRIZZLY_BEARS, starter::SNARESPINNER],
    );
    let aven = find(&game, P0, ZoneKind::Battlefield, starter::AVEN_GAGGLEMASTER);
    let bears = find(&game, P1, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);
    let spinner = find(&game, P1, ZoneKind::Battlefield, starter::SNARESPINNER);

    attack_with(&mut game, &[aven]);
    assert_eq!(legal_blocks(&game), vec![(spinner, aven)]);

    let illegal = Action::DeclareBlocker { blocker: bears, attacker: aven };
    let before = game.graph().clone();
    assert_eq!(game.execute_move(illegal), Err(EngineError::IllegalAction(illegal)));
    assert_eq!(game.graph(), &before);
}

/// A ground attacker can be blocked by any untapped creature.
#[test]
fn test_ground_attacker_any_blocker() {
    let mut game = board(
        vec![],
        vec![starter::GRIZZLY_BEARS],
        vec![starter::AVEN_GAGGLEMASTER, starter::SNARESPINNER],
    );
    let bears = find(&game, P0, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);
    let aven = find(&game, P1, ZoneKind::Battlefield, starter::AVEN_GAGGLEMASTER);
    let spinner = find(&game, P1, ZoneKind::Battlefield, starter::SNARESPINNER);

    attack_with(&mut game, &[bears]);
    assert_eq!(legal_blocks(&game), vec![(aven, bears), (spinner, bears)]);
}

#[test]
fn test_intimidate_needs_shared_color() {
    let mut game = board(
        vec![],
        vec![starter::KRENKOS_ENFORCER],
        vec![starter::GRIZZLY_BEARS, starter::RAGING_GOBLIN],
    );
    let enforcer = find(&game, P0, ZoneKind::Battlefield, starter::KRENKOS_ENFORCER);
    let goblin = find(&game, P1, ZoneKind::Battlefield, starter::RAGING_GOBLIN);

    attack_with(&mut game, &[enforcer]);
    assert_eq!(legal_blocks(&game), vec![(goblin, enforcer)]);
}

/// A lone blocker on a menace attacker is removed when blocks close.
#[test]
fn test_menace_single_block_falls_off() {
    let mut game = board(vec![], vec![starter::BOGGART_BRUTE], vec![starter::GRIZZLY_BEARS]);
    let brute = find(&game, P0, ZoneKind::Battlefield, starter::BOGGART_BRUTE);
    let bears = find(&game, P1, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);

    attack_with(&mut game, &[brute]);
    block_and_resolve(&mut game, &[(bears, brute)]);

    assert_eq!(life(&game, P1), 17);
    assert_eq!(damage(&game, bears), 0);
    assert_eq!(damage(&game, brute), 0);
}

/// Two blockers: damage goes to blockers in declaration order.
#[test]
fn test_multiple_blockers_in_declaration_order() {
    let mut game = board(
        vec![],
        vec![starter::BOGGART_BRUTE],
        vec![starter::GRIZZLY_BEARS, starter::GRIZZLY_BEARS],
    );
    let brute = find(&game, P0, ZoneKind::Battlefield, starter::BOGGART_BRUTE);
    let bears = permanents(&game, P1, starter::GRIZZLY_BEARS);
    let (first_id, second_id) = (bears[0], bears[1]);

    attack_with(&mut game, &[brute]);
    // Declared second-id first, so it is first in damage order.
    block_and_resolve(&mut game, &[(second_id, brute), (first_id, brute)]);

    assert_eq!(damage(&game, second_id), 2);
    assert_eq!(damage(&game, first_id), 1);
    assert_eq!(game.graph().card_zone_kind(second_id), Some(ZoneKind::Graveyard));
    assert!(game.graph().is_on_battlefield(first_id));
    assert_eq!(game.graph().card_zone_kind(brute), Some(ZoneKind::Graveyard));
    assert_eq!(life(&game, P1), 20);
}

// =============================================================================
// Attack Legality
// =============================================================================

#[test]
fn test_defender_cannot_attack_but_can_block() {
    let mut game = board(
        vec![],
        vec![starter::WALL_OF_WOOD, starter::GRIZZLY_BEARS],
        vec![starter::WALL_OF_WOOD],
    );
    let bears = find(&game, P0, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);
    let their_wall = find(&game, P1, ZoneKind::Battlefield, starter::WALL_OF_WOOD);

    pass_until(&mut game, Step::DeclareAttackers);
    assert_eq!(legal_attackers(&game), vec![bears]);

    attack_with(&mut game, &[bears]);
    assert_eq!(legal_blocks(&game), vec![(their_wall, bears)]);
}

#[test]
fn test_vigilance_does_not_tap() {
    let mut game = board(vec![], vec![starter::ALPINE_WATCHDOG], vec![]);
    let dog = find(&game, P0, ZoneKind::Battlefield, starter::ALPINE_WATCHDOG);

    attack_with(&mut game, &[dog]);
    assert!(!game.graph().permanent(dog).unwrap().tapped);
    assert!(game.graph().permanent(dog).unwrap().attacking);
    block_and_resolve(&mut game, &[]);
    assert_eq!(life(&game, P1), 18);
}

/// A creature cast this turn may attack only with haste.
#[test]
fn test_haste_ignores_summoning_sickness() {
    let mut game = board(
        vec![starter::RAGING_GOBLIN, starter::GRIZZLY_BEARS],
        vec![starter::MOUNTAIN, starter::FOREST, starter::FOREST],
        vec![],
    );
    pass_until(&mut game, Step::Main);
    for land in game.cards_in(P0, ZoneKind::Battlefield).unwrap() {
        game.execute_move(Action::ActivateManaAbility { card: land, ability_index: 0 })
            .unwrap();
    }
    let goblin = find(&game, P0, ZoneKind::Hand, starter::RAGING_GOBLIN);
    let bears = find(&game, P0, ZoneKind::Hand, starter::GRIZZLY_BEARS);
    game.execute_move(Action::CastSpell { card: goblin, target: None }).unwrap();
    game.execute_move(Action::CastSpell { card: bears, target: None }).unwrap();

    pass_until(&mut game, Step::DeclareAttackers);
    assert_eq!(legal_attackers(&game), vec![goblin]);
}

// =============================================================================
// Damage
// =============================================================================

/// First strike kills the blocker before it can strike back.
#[test]
fn test_first_strike() {
    let mut game = board(vec![], vec![starter::YOUTHFUL_KNIGHT], vec![starter::GRIZZLY_BEARS]);
    let knight = find(&game, P0, ZoneKind::Battlefield, starter::YOUTHFUL_KNIGHT);
    let bears = find(&game, P1, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);

    attack_with(&mut game, &[knight]);
    block_and_resolve(&mut game, &[(bears, knight)]);

    assert!(game.graph().is_on_battlefield(knight));
    assert_eq!(damage(&game, knight), 0);
    assert_eq!(game.graph().card_zone_kind(bears), Some(ZoneKind::Graveyard));

    let report = game.last_combat().unwrap();
    assert_eq!(report.destroyed, vec![bears]);
    assert_eq!(report.events.len(), 1);
}

#[test]
fn test_double_strike_unblocked() {
    let mut game = board(vec![], vec![starter::FENCING_ACE], vec![]);
    let ace = find(&game, P0, ZoneKind::Battlefield, starter::FENCING_ACE);

    attack_with(&mut game, &[ace]);
    block_and_resolve(&mut game, &[]);

    assert_eq!(life(&game, P1), 18);
    assert_eq!(game.last_combat().unwrap().events.len(), 2);
}

#[test]
fn test_trample_excess_to_player() {
    let mut game = board(vec![], vec![starter::COLOSSAL_DREADMAW], vec![starter::GRIZZLY_BEARS]);
    let dreadmaw = find(&game, P0, ZoneKind::Battlefield, starter::COLOSSAL_DREADMAW);
    let bears = find(&game, P1, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);

    attack_with(&mut game, &[dreadmaw]);
    block_and_resolve(&mut game, &[(bears, dreadmaw)]);

    let report = game.last_combat().unwrap();
    assert_eq!(report.damage_to(bears), 2);
    assert_eq!(report.damage_to_player(P1), 4);
    assert_eq!(life(&game, P1), 16);
    assert_eq!(damage(&game, dreadmaw), 2);
}

#[test]
fn test_deathtouch_kills_big_blocker() {
    let mut game = board(vec![], vec![starter::TYPHOID_RATS], vec![starter::COLOSSAL_DREADMAW]);
    let rats = find(&game, P0, ZoneKind::Battlefield, starter::TYPHOID_RATS);
    let dreadmaw = find(&game, P1, ZoneKind::Battlefield, starter::COLOSSAL_DREADMAW);

    attack_with(&mut game, &[rats]);
    block_and_resolve(&mut game, &[(dreadmaw, rats)]);

    assert_eq!(game.graph().card_zone_kind(dreadmaw), Some(ZoneKind::Graveyard));
    assert_eq!(game.graph().card_zone_kind(rats), Some(ZoneKind::Graveyard));
    let report = game.last_combat().unwrap();
    assert!(report
        .events
        .iter()
        .any(|e| e.source == rats && e.target == DamageTarget::Creature(dreadmaw) && e.amount == 1));
}

/// An aura's bonus counts in combat.
#[test]
fn test_giant_strength_attack() {
    let mut game = board(
        vec![starter::GIANT_STRENGTH],
        vec![starter::GRIZZLY_BEARS, starter::MOUNTAIN, starter::MOUNTAIN],
        vec![],
    );
    let bears = find(&game, P0, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);
    let aura = find(&game, P0, ZoneKind::Hand, starter::GIANT_STRENGTH);
    pass_until(&mut game, Step::Main);
    for mountain in permanents(&game, P0, starter::MOUNTAIN) {
        game.execute_move(Action::ActivateManaAbility { card: mountain, ability_index: 0 })
            .unwrap();
    }

    let casts: Vec<_> = game
        .legal_moves()
        .unwrap()
        .into_iter()
        .filter(|m| matches!(m, Action::CastSpell { .. }))
        .collect();
    assert_eq!(casts, vec![Action::CastSpell { card: aura, target: Some(bears) }]);
    game.execute_move(casts[0]).unwrap();
    let c = game.graph().characteristics(bears).unwrap();
    assert_eq!((c.power, c.toughness), (4, 4));

    attack_with(&mut game, &[bears]);
    block_and_resolve(&mut game, &[]);
    assert_eq!(life(&game, P1), 16);
}

#[test]
fn test_aura_needs_a_creature() {
    let mut game = board(vec![starter::FLIGHT], vec![starter::ISLAND], vec![]);
    pass_until(&mut game, Step::Main);
    let island = find(&game, P0, ZoneKind::Battlefield, starter::ISLAND);
    game.execute_move(Action::ActivateManaAbility { card: island, ability_index: 0 })
        .unwrap();

    assert_eq!(game.legal_moves().unwrap(), vec![Action::PassPriority, Action::PassTurn]);
}

// =============================================================================
// Damage Lifetime
// =============================================================================

/// Marked damage survives layer recomputation and is removed at cleanup.
#[test]
fn test_damage_persists_until_cleanup() {
    let mut game = board(vec![], vec![starter::GRIZZLY_BEARS], vec![starter::SNARESPINNER]);
    let bears = find(&game, P0, ZoneKind::Battlefield, starter::GRIZZLY_BEARS);
    let spinner = find(&game, P1, ZoneKind::Battlefield, starter::SNARESPINNER);

    attack_with(&mut game, &[bears]);
    block_and_resolve(&mut game, &[(spinner, bears)]);
    assert_eq!(damage(&game, spinner), 2);
    assert_eq!(damage(&game, bears), 1);

    pass_until(&mut game, Step::End);
    assert_eq!(damage(&game, spinner), 2);
    assert_eq!(damage(&game, bears), 1);
    assert!(game
        .graph()
        .get_relationships(&RelationshipFilter::new().kind(RelationKind::IsBlocking))
        .is_empty());
    assert!(!game.graph().permanent(bears).unwrap().attacking);

    game.execute_move(Action::PassTurn).unwrap();
    assert_eq!(damage(&game, spinner), 0);
    assert_eq!(damage(&game, bears), 0);
}
