//! Action execution.
//!
//! [`execute`] trusts its caller: the action must come from the most
//! recent [`legal_moves`](super::legal::legal_moves) list. The game facade
//! checks that and rolls the graph back if execution fails part way.

use super::legal::acting_player;
use super::state_based::check_state_based_actions;
use super::turn::{end_turn, progress, StepOutcome};
use crate::cards::CardCatalog;
use crate::combat::keywords::has_vigilance;
use crate::core::action::Action;
use crate::core::config::GameConfig;
use crate::core::entity::EntityId;
use crate::core::error::{EngineError, Result};
use crate::core::player::PlayerId;
use crate::core::vocabulary::{RelationKind, ZoneKind};
use crate::graph::GameGraph;
use crate::layers::effective;
use crate::zones::ZonePosition;

/// Apply `action` for the acting player, then state-based actions.
pub fn execute(graph: &mut GameGraph, catalog: &CardCatalog, config: &GameConfig, action: Action) -> Result<StepOutcome> {
    let player = acting_player(graph);
    log::debug!("{player}: {action:?}");

    let mut outcome = match action {
        Action::PlayLand { card } => {
            put_onto_battlefield(graph, player, card)?;
            graph.player_mut(player).lands_played_this_turn += 1;
            StepOutcome::default()
        }
        Action::CastSpell { card, target } => {
            let def = catalog.get_static_data(graph.card_type(card)?)?;
            let payment = graph.player_mut(player).mana_pool.pay(&def.mana_cost).map_err(|shortfall| {
                log::warn!("{card} was offered as castable but {shortfall:?}");
                EngineError::CostMismatch { card }
            })?;
            log::trace!("{player} spent {} mana on {}", payment.total(), def.name);
            put_onto_battlefield(graph, player, card)?;
            if let Some(target) = target {
                graph.add_relationship(card, target, RelationKind::EnchantedBy)?;
            }
            StepOutcome::default()
        }
        Action::ActivateManaAbility { card, ability_index } => {
            let def = catalog.get_static_data(graph.card_type(card)?)?;
            let ability = def.mana_abilities.get(ability_index).ok_or_else(|| {
                EngineError::invariant(format!("{} has no mana ability {ability_index}", def.name))
            })?;
            if ability.cost.tap {
                graph.permanent_mut(card)?.tapped = true;
            }
            let controller = graph.controller_of(card).unwrap_or(player);
            graph.player_mut(controller).mana_pool.add_pool(&ability.produces);
            StepOutcome::default()
        }
        Action::DeclareAttacker { card } => {
            let vigilant = has_vigilance(&effective(graph, card)?);
            let state = graph.permanent_mut(card)?;
            state.attacking = true;
            if !vigilant {
                state.tapped = true;
            }
            StepOutcome::default()
        }
        Action::DeclareBlocker { blocker, attacker } => {
            graph.add_relationship(blocker, attacker, RelationKind::IsBlocking)?;
            StepOutcome::default()
        }
        Action::PassPriority => progress(graph, catalog, config, false)?,
        Action::PassTurn => {
            let active = graph.turn().active_player;
            end_turn(graph, catalog, config, active)?
        }
    };

    outcome.destroyed.extend(check_state_based_actions(graph, catalog)?);
    Ok(outcome)
}

fn put_onto_battlefield(graph: &mut GameGraph, player: PlayerId, card: EntityId) -> Result<()> {
    let battlefield = graph.zone_of_player(player, ZoneKind::Battlefield)?;
    graph.move_card_to_zone(card, battlefield, ZonePosition::Top)
}
