//! Automatic play.
//!
//! [`play_out`] drives any [`RulesEngine`] to completion with a
//! [`MoveSelector`]. When the selector declines, or there is nothing to
//! choose from, the game moves on by one step, so attackers and blockers
//! are still declared in automatic mode.

use crate::core::action::Action;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::rules::{GameResult, RulesEngine};

/// Picks one of the legal actions, or `None` to pass.
pub trait MoveSelector {
    fn select(&mut self, player: PlayerId, moves: &[Action]) -> Option<Action>;
}

/// Always the first legal action.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MoveSelector for FirstLegal {
    fn select(&mut self, _player: PlayerId, moves: &[Action]) -> Option<Action> {
        moves.first().copied()
    }
}

/// Uniformly random legal action from its own RNG stream.
#[derive(Clone, Debug)]
pub struct RandomLegal {
    rng: GameRng,
}

impl RandomLegal {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl MoveSelector for RandomLegal {
    fn select(&mut self, _player: PlayerId, moves: &[Action]) -> Option<Action> {
        self.rng.choose(moves).copied()
    }
}

/// How a play-out ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    /// `None` if the decision cap was hit first.
    pub result: Option<GameResult>,
    /// Actions applied.
    pub actions: usize,
    /// Advances made without an action.
    pub advances: usize,
}

/// Play until the game ends or `max_decisions` decisions have been made.
pub fn play_out<E, S>(engine: &mut E, selector: &mut S, max_decisions: usize) -> Result<PlayReport>
where
    E: RulesEngine,
    S: MoveSelector + ?Sized,
{
    let mut report = PlayReport { result: None, actions: 0, advances: 0 };
    for _ in 0..max_decisions {
        if let Some(result) = engine.result() {
            report.result = Some(result);
            return Ok(report);
        }
        let moves = engine.legal_actions()?;
        match selector.select(engine.acting_player(), &moves) {
            Some(action) => {
                engine.apply_action(action)?;
                report.actions += 1;
            }
            None => {
                engine.advance(false)?;
                report.advances += 1;
            }
        }
    }
    report.result = engine.result();
    if report.result.is_none() {
        log::warn!("play-out stopped after {max_decisions} decisions");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_legal() {
        let moves = [Action::PassPriority, Action::PassTurn];
        assert_eq!(FirstLegal.select(PlayerId::new(0), &moves), Some(Action::PassPriority));
        assert_eq!(FirstLegal.select(PlayerId::new(0), &[]), None);
    }

    #[test]
    fn test_random_legal_is_seeded() {
        let moves = [Action::PassPriority, Action::PassTurn];
        let picks = |seed| {
            let mut selector = RandomLegal::seeded(seed);
            (0..20)
                .map(|_| selector.select(PlayerId::new(0), &moves))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
        assert!(picks(3).iter().all(|m| m.is_some()));
    }
}
