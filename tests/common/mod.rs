//! Shared setup for the integration tests.

#![allow(dead_code)]

use rust_mtg::cards::{starter, CardTypeId};
use rust_mtg::game::{Game, GameBuilder};
use rust_mtg::{Action, EntityId, GameConfig, PlayerId, Step, ZoneKind};

pub const P0: PlayerId = PlayerId::new(0);
pub const P1: PlayerId = PlayerId::new(1);

pub fn forests(count: usize) -> Vec<CardTypeId> {
    vec![starter::FOREST; count]
}

/// Player 0 to act on turn 1 with the given hand and permanents, player 1
/// with the given permanents. Libraries hold ten Forests each and the first
/// draw is skipped.
pub fn board(hand: Vec<CardTypeId>, p0: Vec<CardTypeId>, p1: Vec<CardTypeId>) -> Game {
    GameBuilder::new(starter::catalog())
        .config(GameConfig::default().with_skip_first_draw(true))
        .deck(0, forests(10))
        .deck(1, forests(10))
        .opening_hand(0, hand)
        .opening_hand(1, Vec::new())
        .battlefield(0, p0)
        .battlefield(1, p1)
        .shuffle(false)
        .build(1)
        .unwrap()
}

/// Pass priority until the game reaches `step`.
pub fn pass_until(game: &mut Game, step: Step) {
    for _ in 0..32 {
        if game.turn().step == step {
            return;
        }
        game.execute_move(Action::PassPriority).unwrap();
    }
    panic!("never reached {step}: {}", game.describe_position());
}

pub fn find(game: &Game, player: PlayerId, kind: ZoneKind, card_type: CardTypeId) -> EntityId {
    game.find_card(player, kind, card_type)
        .unwrap_or_else(|| panic!("no {card_type} in {player}'s {kind}"))
}

/// All of `player`'s permanents of `card_type`, in id order.
pub fn permanents(game: &Game, player: PlayerId, card_type: CardTypeId) -> Vec<EntityId> {
    let mut cards: Vec<EntityId> = game
        .cards_in(player, ZoneKind::Battlefield)
        .unwrap()
        .into_iter()
        .filter(|c| game.graph().card_type(*c).unwrap() == card_type)
        .collect();
    cards.sort();
    cards
}

/// Declare `attackers`, then move on to the declare-blockers step.
pub fn attack_with(game: &mut Game, attackers: &[EntityId]) {
    pass_until(game, Step::DeclareAttackers);
    for card in attackers {
        game.execute_move(Action::DeclareAttacker { card: *card }).unwrap();
    }
    game.execute_move(Action::PassPriority).unwrap();
    assert_eq!(game.turn().step, Step::DeclareBlockers);
}

/// Declare blocks as (blocker, attacker) pairs, then close blocks and deal
/// combat damage.
pub fn block_and_resolve(game: &mut Game, blocks: &[(EntityId, EntityId)]) {
    for (blocker, attacker) in blocks {
        game.execute_move(Action::DeclareBlocker { blocker: *blocker, attacker: *attacker })
            .unwrap();
    }
    game.execute_move(Action::PassPriority).unwrap();
    assert_eq!(game.turn().step, Step::CombatDamage);
}

pub fn life(game: &Game, player: PlayerId) -> i64 {
    game.graph().player(player).life_total
}

pub fn damage(game: &Game, card: EntityId) -> i64 {
    game.graph().permanent(card).unwrap().damage_taken
}
