//! Legal move generation.
//!
//! [`legal_moves`] is a pure read of the graph: it assumes layers are
//! current and returns actions in a fixed order (by kind, then entity id),
//! so the same state always produces the same list.

use crate::cards::CardCatalog;
use crate::combat::{legal_attackers, legal_blocks};
use crate::core::action::Action;
use crate::core::config::{GameConfig, PlayMode};
use crate::core::entity::EntityId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::vocabulary::{Keyword, Step, ZoneKind};
use crate::graph::GameGraph;

/// The player who makes the current decision: the defending player while
/// blockers are declared, the active player otherwise.
#[must_use]
pub fn acting_player(graph: &GameGraph) -> PlayerId {
    let turn = graph.turn();
    if turn.step == Step::DeclareBlockers {
        turn.active_player.opponent()
    } else {
        turn.active_player
    }
}

/// Every action the acting player may take right now.
///
/// In interactive mode PassPriority and PassTurn are always last. In
/// automatic mode they are never offered; an empty list means the caller
/// should force the game forward.
pub fn legal_moves(graph: &GameGraph, catalog: &CardCatalog, config: &GameConfig) -> Result<Vec<Action>> {
    let mut moves = Vec::new();
    match graph.turn().step {
        Step::Main => main_step_moves(graph, catalog, config, acting_player(graph), &mut moves)?,
        Step::DeclareAttackers => {
            moves.extend(legal_attackers(graph).into_iter().map(|card| Action::DeclareAttacker { card }));
        }
        Step::DeclareBlockers => {
            moves.extend(
                legal_blocks(graph)
                    .into_iter()
                    .map(|(blocker, attacker)| Action::DeclareBlocker { blocker, attacker }),
            );
        }
        _ => {}
    }
    if config.play_mode == PlayMode::Interactive {
        moves.push(Action::PassPriority);
        moves.push(Action::PassTurn);
    }
    Ok(moves)
}

fn main_step_moves(
    graph: &GameGraph,
    catalog: &CardCatalog,
    config: &GameConfig,
    player: PlayerId,
    moves: &mut Vec<Action>,
) -> Result<()> {
    let state = graph.player(player);
    let mut hand = graph.player_cards(player, ZoneKind::Hand)?;
    hand.sort();

    let creatures: Vec<EntityId> = graph
        .battlefield_cards()
        .into_iter()
        .filter(|card| graph.characteristics(*card).map_or(false, |c| c.is_creature))
        .collect();

    let mut casts = Vec::new();
    for card in hand {
        let def = catalog.get_static_data(graph.card_type(card)?)?;
        if def.is_land() {
            if state.lands_played_this_turn < config.lands_per_turn {
                moves.push(Action::PlayLand { card });
            }
        } else if state.mana_pool.can_pay(&def.mana_cost) {
            if def.is_aura() {
                casts.extend(creatures.iter().map(|target| Action::CastSpell { card, target: Some(*target) }));
            } else {
                casts.push(Action::CastSpell { card, target: None });
            }
        }
    }
    moves.append(&mut casts);

    for card in graph.battlefield_cards() {
        if graph.controller_of(card) != Some(player) {
            continue;
        }
        let Some(permanent) = graph.permanent(card) else {
            continue;
        };
        if permanent.tapped {
            continue;
        }
        if let Some(c) = graph.characteristics(card) {
            if c.is_creature && permanent.summoning_sick && !c.has(Keyword::Haste) {
                continue;
            }
        }
        let def = catalog.get_static_data(graph.card_type(card)?)?;
        for (ability_index, ability) in def.mana_abilities.iter().enumerate() {
            if ability.cost.tap {
                moves.push(Action::ActivateManaAbility { card, ability_index });
            }
        }
    }
    Ok(())
}
