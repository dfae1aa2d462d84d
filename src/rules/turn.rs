//! Turn structure: phases, steps, step-exit effects and win/loss.
//!
//! [`TURN_STRUCTURE`] is the only place the phase/step layout is written
//! down. "Next step in this phase" and "first step of the next phase" are
//! both answered from it.

use serde::{Deserialize, Serialize};

use super::engine::GameResult;
use super::state_based::check_state_based_actions;
use crate::cards::CardCatalog;
use crate::combat::{close_blocks, end_combat, resolve_combat_damage, CombatReport};
use crate::core::action::Action;
use crate::core::config::GameConfig;
use crate::core::entity::EntityId;
use crate::core::error::{EngineError, Result};
use crate::core::player::PlayerId;
use crate::core::vocabulary::{Phase, Step};
use crate::graph::GameGraph;
use crate::layers::apply_layers;

/// Phases in turn order, each with its steps in order.
pub const TURN_STRUCTURE: [(Phase, &[Step]); 5] = [
    (Phase::Beginning, &[Step::Untap, Step::Upkeep, Step::Draw]),
    (Phase::PreCombatMain, &[Step::Main]),
    (
        Phase::Combat,
        &[
            Step::BeginCombat,
            Step::DeclareAttackers,
            Step::DeclareBlockers,
            Step::CombatDamage,
            Step::EndCombat,
        ],
    ),
    (Phase::PostCombatMain, &[Step::Main]),
    (Phase::Ending, &[Step::End, Step::Cleanup]),
];

fn phase_index(phase: Phase) -> Result<usize> {
    TURN_STRUCTURE
        .iter()
        .position(|(p, _)| *p == phase)
        .ok_or_else(|| EngineError::invariant(format!("phase {phase} is not in the turn structure")))
}

pub fn steps_of(phase: Phase) -> Result<&'static [Step]> {
    Ok(TURN_STRUCTURE[phase_index(phase)?].1)
}

/// The phase after `phase`, wrapping from Ending to Beginning.
pub fn next_phase(phase: Phase) -> Result<Phase> {
    Ok(TURN_STRUCTURE[(phase_index(phase)? + 1) % TURN_STRUCTURE.len()].0)
}

/// Every (phase, step) of one turn in order.
pub fn turn_sequence() -> impl Iterator<Item = (Phase, Step)> {
    TURN_STRUCTURE
        .iter()
        .flat_map(|(phase, steps)| steps.iter().map(move |step| (*phase, *step)))
}

/// What a call into the turn controller (or the executor) did besides
/// moving the turn pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Set when combat damage was resolved.
    pub combat: Option<CombatReport>,
    /// Permanents put into a graveyard by state-based actions.
    pub destroyed: Vec<EntityId>,
    /// Set when the game ended.
    pub result: Option<GameResult>,
}

impl StepOutcome {
    pub fn merge(&mut self, other: StepOutcome) {
        if other.combat.is_some() {
            self.combat = other.combat;
        }
        self.destroyed.extend(other.destroyed);
        if other.result.is_some() {
            self.result = other.result;
        }
    }
}

/// Leave the current step.
///
/// Runs the exit effects of the current step (and, when `force` is set, of
/// every later step of the current phase), then state-based actions and
/// the win/loss check. If the game is over the turn pointer stays put.
/// Otherwise it moves to the next step, or with `force` to the first step
/// of the next phase. Wrapping into the beginning phase starts the other
/// player's turn.
pub fn progress(graph: &mut GameGraph, catalog: &CardCatalog, config: &GameConfig, force: bool) -> Result<StepOutcome> {
    let turn = *graph.turn();
    let steps = steps_of(turn.phase)?;
    let index = steps
        .iter()
        .position(|s| *s == turn.step)
        .ok_or_else(|| EngineError::invariant(format!("step {} is not part of phase {}", turn.step, turn.phase)))?;
    let leaving = if force { &steps[index..] } else { &steps[index..=index] };

    let mut outcome = StepOutcome::default();
    for step in leaving {
        run_exit_effects(graph, catalog, config, *step, &mut outcome)?;
    }
    outcome.destroyed.extend(check_state_based_actions(graph, catalog)?);

    outcome.result = check_win_loss(graph);
    if let Some(result) = &outcome.result {
        log::info!("game over on turn {}: {:?}", turn.turn_number, result);
        return Ok(outcome);
    }

    let next_in_phase = if force { None } else { steps.get(index + 1).copied() };
    let (phase, step) = match next_in_phase {
        Some(step) => (turn.phase, step),
        None => {
            let phase = next_phase(turn.phase)?;
            let first = steps_of(phase)?
                .first()
                .copied()
                .ok_or_else(|| EngineError::invariant(format!("phase {phase} has no steps")))?;
            (phase, first)
        }
    };
    let state = graph.turn_mut();
    if phase == Phase::Beginning && turn.phase != Phase::Beginning {
        state.turn_number += 1;
        state.active_player = state.active_player.opponent();
        log::debug!("turn {} begins for {}", state.turn_number, state.active_player);
    }
    state.phase = phase;
    state.step = step;
    log::trace!("{}/{} -> {}/{}", turn.phase, turn.step, graph.turn().phase, graph.turn().step);
    Ok(outcome)
}

fn run_exit_effects(
    graph: &mut GameGraph,
    catalog: &CardCatalog,
    config: &GameConfig,
    step: Step,
    outcome: &mut StepOutcome,
) -> Result<()> {
    let active = graph.turn().active_player;
    match step {
        Step::Untap => {
            for card in graph.battlefield_cards() {
                if graph.controller_of(card) == Some(active) {
                    let state = graph.permanent_mut(card)?;
                    state.tapped = false;
                    state.summoning_sick = false;
                }
            }
        }
        Step::Draw => {
            if config.skip_first_draw && graph.turn().turn_number == 1 {
                return Ok(());
            }
            match graph.draw_card(active) {
                Ok(card) => log::trace!("{active} draws {card}"),
                Err(EngineError::EmptyLibrary { player }) => {
                    log::info!("{player} cannot draw and loses");
                    graph.player_mut(player).has_lost = true;
                }
                Err(err) => return Err(err),
            }
        }
        Step::DeclareBlockers => {
            close_blocks(graph)?;
            apply_layers(graph, catalog)?;
            let report = resolve_combat_damage(graph, catalog)?;
            outcome.destroyed.extend(report.destroyed.iter().copied());
            outcome.combat = Some(report);
        }
        Step::EndCombat => end_combat(graph)?,
        Step::Cleanup => {
            for player in PlayerId::both() {
                let state = graph.player_mut(player);
                state.mana_pool.clear();
                state.lands_played_this_turn = 0;
            }
            for card in graph.battlefield_cards() {
                graph.permanent_mut(card)?.remove_damage();
            }
        }
        Step::Upkeep
        | Step::Main
        | Step::BeginCombat
        | Step::DeclareAttackers
        | Step::CombatDamage
        | Step::End => {}
    }
    Ok(())
}

/// End `player`'s turn by forcing phase advances until the other player is
/// active.
pub fn end_turn(
    graph: &mut GameGraph,
    catalog: &CardCatalog,
    config: &GameConfig,
    player: PlayerId,
) -> Result<StepOutcome> {
    if graph.turn().active_player != player {
        return Err(EngineError::IllegalAction(Action::PassTurn));
    }
    let mut outcome = StepOutcome::default();
    for _ in 0..config.end_turn_step_cap {
        outcome.merge(progress(graph, catalog, config, true)?);
        if outcome.result.is_some() || graph.turn().active_player != player {
            return Ok(outcome);
        }
    }
    Err(EngineError::invariant(format!(
        "turn of {player} did not end within {} phase advances",
        config.end_turn_step_cap
    )))
}

/// A player at 0 life or below, or who drew from an empty library, has
/// lost. Both losing at once is a draw.
#[must_use]
pub fn check_win_loss(graph: &GameGraph) -> Option<GameResult> {
    let losers: Vec<PlayerId> = graph
        .players()
        .filter(|(_, state)| state.is_defeated())
        .map(|(player, _)| player)
        .collect();
    match losers.as_slice() {
        [] => None,
        [loser] => Some(GameResult::Winner(loser.opponent())),
        _ => Some(GameResult::Draw),
    }
}
