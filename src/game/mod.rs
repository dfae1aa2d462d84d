//! The game facade.
//!
//! [`Game`] owns one [`GameGraph`] together with the injected catalog,
//! vocabulary, config and RNG, and is the only way callers mutate a game:
//!
//! - every submitted action is checked against a freshly computed legal
//!   set before anything changes;
//! - every mutation is all-or-nothing: the graph and RNG are restored if
//!   it fails part way;
//! - graph invariants are verified after every mutation, and a fatal error
//!   aborts the game with a state dump;
//! - everything that happened is kept as a [`GameEvent`] history that can
//!   be replayed on a game built from the same seed.

pub mod builder;
pub mod harness;

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardTypeId};
use crate::combat::CombatReport;
use crate::core::action::{Action, ActionRecord};
use crate::core::config::GameConfig;
use crate::core::entity::EntityId;
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{GameRng, GameRngState};
use crate::core::vocabulary::{Term, VocabId, Vocabulary, ZoneKind};
use crate::graph::{GameGraph, TurnState};
use crate::layers::apply_layers;
use crate::rules::{self, GameResult, RulesEngine, StepOutcome};
use crate::zones::ZonePosition;

pub use builder::GameBuilder;
pub use harness::{play_out, FirstLegal, MoveSelector, PlayReport, RandomLegal};

/// Where the game stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished(GameResult),
    /// Stopped by a fatal error. `dump` is the graph at the point of failure.
    Aborted { reason: String, dump: String },
}

/// One entry of the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Move(ActionRecord),
    /// A step advance requested without an action (automatic play).
    Advance { force: bool },
    EndTurn,
    Mulligan { player: PlayerId },
    KeepHand { player: PlayerId, bottom: Vec<EntityId> },
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    graph: GameGraph,
    rng: GameRngState,
    config: GameConfig,
    status: GameStatus,
    history: Vector<GameEvent>,
    kept: PlayerMap<bool>,
    last_combat: Option<CombatReport>,
}

#[derive(Clone, Debug)]
pub struct Game {
    graph: GameGraph,
    catalog: Arc<CardCatalog>,
    vocabulary: Arc<Vocabulary>,
    config: GameConfig,
    rng: GameRng,
    status: GameStatus,
    history: Vector<GameEvent>,
    /// Players who have finished mulliganing.
    kept: PlayerMap<bool>,
    last_combat: Option<CombatReport>,
}

impl Game {
    /// Wrap a fully set-up graph. Prefer [`GameBuilder`].
    pub fn new(
        mut graph: GameGraph,
        catalog: Arc<CardCatalog>,
        vocabulary: Arc<Vocabulary>,
        config: GameConfig,
        rng: GameRng,
    ) -> Result<Self> {
        apply_layers(&mut graph, &catalog)?;
        graph.check_invariants()?;
        Ok(Self {
            graph,
            catalog,
            vocabulary,
            config,
            rng,
            status: GameStatus::InProgress,
            history: Vector::new(),
            kept: PlayerMap::with_default(),
            last_combat: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn graph(&self) -> &GameGraph {
        &self.graph
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        self.graph.turn()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// The actions taken so far, in order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionRecord> {
        self.history.iter().filter_map(|event| match event {
            GameEvent::Move(record) => Some(record),
            _ => None,
        })
    }

    /// Damage report of the most recent combat.
    #[must_use]
    pub fn last_combat(&self) -> Option<&CombatReport> {
        self.last_combat.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match &self.status {
            GameStatus::Finished(result) => Some(result.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        rules::acting_player(&self.graph)
    }

    /// Cards in one of `player`'s zones, bottom first.
    pub fn cards_in(&self, player: PlayerId, kind: ZoneKind) -> Result<Vec<EntityId>> {
        self.graph.player_cards(player, kind)
    }

    /// The first card of `card_type` in one of `player`'s zones.
    #[must_use]
    pub fn find_card(&self, player: PlayerId, kind: ZoneKind, card_type: CardTypeId) -> Option<EntityId> {
        self.graph
            .player_cards(player, kind)
            .ok()?
            .into_iter()
            .find(|card| self.graph.card_type(*card).ok() == Some(card_type))
    }

    /// Split off an RNG stream for a move selector.
    pub fn fork_rng(&mut self) -> GameRng {
        self.rng.fork()
    }

    // === Moves ===

    /// Legal actions for the acting player. Empty once the game is over.
    pub fn legal_moves(&self) -> Result<Vec<Action>> {
        if self.status != GameStatus::InProgress {
            return Ok(Vec::new());
        }
        rules::legal_moves(&self.graph, &self.catalog, &self.config)
    }

    /// Validate and apply one action.
    pub fn execute_move(&mut self, action: Action) -> Result<StepOutcome> {
        self.ensure_in_progress()?;
        if !self.legal_moves()?.contains(&action) {
            return Err(EngineError::IllegalAction(action));
        }
        let record = ActionRecord::new(
            self.acting_player(),
            action,
            self.graph.turn().turn_number,
            self.actions().count() as u32,
        );
        let outcome = self.transact(|graph, catalog, config, _| rules::execute(graph, catalog, config, action))?;
        self.absorb(&outcome);
        self.history.push_back(GameEvent::Move(record));
        Ok(outcome)
    }

    /// Leave the current step without an action; with `force`, move to the
    /// next phase.
    pub fn progress(&mut self, force: bool) -> Result<StepOutcome> {
        self.ensure_in_progress()?;
        let outcome = self.transact(|graph, catalog, config, _| rules::progress(graph, catalog, config, force))?;
        self.absorb(&outcome);
        self.history.push_back(GameEvent::Advance { force });
        Ok(outcome)
    }

    /// End the active player's turn.
    pub fn end_turn(&mut self) -> Result<StepOutcome> {
        self.ensure_in_progress()?;
        let active = self.graph.turn().active_player;
        let outcome = self.transact(|graph, catalog, config, _| rules::end_turn(graph, catalog, config, active))?;
        self.absorb(&outcome);
        self.history.push_back(GameEvent::EndTurn);
        Ok(outcome)
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            _ => Err(EngineError::GameOver),
        }
    }

    /// Run one mutation all-or-nothing.
    fn transact<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut GameGraph, &CardCatalog, &GameConfig, &mut GameRng) -> Result<T>,
    {
        let graph_backup = self.graph.clone();
        let rng_backup = self.rng.clone();

        let result = match f(&mut self.graph, self.catalog.as_ref(), &self.config, &mut self.rng) {
            Ok(value) => apply_layers(&mut self.graph, &self.catalog)
                .and_then(|()| self.graph.check_invariants())
                .map(|()| value),
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            let dump = match err {
                EngineError::InvariantViolation { dump, .. } if !dump.is_empty() => dump.clone(),
                _ => self.graph.dump(),
            };
            self.graph = graph_backup;
            self.rng = rng_backup;
            if err.is_fatal() {
                log::error!("aborting game: {err}\n{dump}");
                self.status = GameStatus::Aborted { reason: err.to_string(), dump };
            }
        }
        result
    }

    fn absorb(&mut self, outcome: &StepOutcome) {
        if let Some(report) = &outcome.combat {
            self.last_combat = Some(report.clone());
        }
        if let Some(result) = &outcome.result {
            self.status = GameStatus::Finished(result.clone());
        }
    }

    // === Mulligan ===

    /// Whether no action or advance has happened yet.
    #[must_use]
    pub fn mulligan_window_open(&self) -> bool {
        self.history
            .iter()
            .all(|event| matches!(event, GameEvent::Mulligan { .. } | GameEvent::KeepHand { .. }))
    }

    fn ensure_can_mulligan(&self, player: PlayerId) -> Result<()> {
        self.ensure_in_progress()?;
        if !self.mulligan_window_open() || self.kept[player] {
            return Err(EngineError::MulliganUnavailable { player });
        }
        Ok(())
    }

    /// Shuffle `player`'s hand into their library and draw a new one.
    ///
    /// Allowed before the first action, until the player keeps, up to
    /// `max_mulligans` times.
    pub fn mulligan(&mut self, player: PlayerId) -> Result<()> {
        self.ensure_can_mulligan(player)?;
        if self.graph.player(player).mulligans_taken >= self.config.max_mulligans {
            return Err(EngineError::MulliganUnavailable { player });
        }
        let hand_size = self.config.opening_hand_size;
        self.transact(|graph, _, _, rng| {
            let library = graph.zone_of_player(player, ZoneKind::Library)?;
            for card in graph.player_cards(player, ZoneKind::Hand)? {
                graph.move_card_to_zone(card, library, ZonePosition::Top)?;
            }
            graph.zones_mut().shuffle_zone(library, rng);
            for _ in 0..hand_size.min(graph.zone_size(library)) {
                graph.draw_card(player)?;
            }
            graph.player_mut(player).mulligans_taken += 1;
            Ok(())
        })?;
        log::debug!("{player} mulligans ({})", self.graph.player(player).mulligans_taken);
        self.history.push_back(GameEvent::Mulligan { player });
        Ok(())
    }

    /// Keep the current hand, putting one chosen card per mulligan taken on
    /// the bottom of the library, in the order given.
    pub fn keep_hand(&mut self, player: PlayerId, bottom: &[EntityId]) -> Result<()> {
        self.ensure_can_mulligan(player)?;
        let owed = self.graph.player(player).mulligans_taken as usize;
        if bottom.len() != owed {
            return Err(EngineError::InvalidBottomCards(format!(
                "{player} must bottom {owed} cards, got {}",
                bottom.len()
            )));
        }
        let hand = self.graph.player_cards(player, ZoneKind::Hand)?;
        for (i, card) in bottom.iter().enumerate() {
            if !hand.contains(card) {
                return Err(EngineError::InvalidBottomCards(format!("{card} is not in {player}'s hand")));
            }
            if bottom[..i].contains(card) {
                return Err(EngineError::InvalidBottomCards(format!("{card} chosen twice")));
            }
        }

        self.transact(|graph, _, _, _| {
            let library = graph.zone_of_player(player, ZoneKind::Library)?;
            for card in bottom {
                graph.move_card_to_zone(*card, library, ZonePosition::Bottom)?;
            }
            Ok(())
        })?;
        self.kept[player] = true;
        self.history.push_back(GameEvent::KeepHand { player, bottom: bottom.to_vec() });
        Ok(())
    }

    // === Replay and snapshots ===

    /// Re-apply a history, e.g. on a fresh game built with the same seed.
    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) -> Result<()> {
        for event in events {
            match event {
                GameEvent::Move(record) => {
                    if record.player != self.acting_player() {
                        return Err(EngineError::IllegalAction(record.action));
                    }
                    self.execute_move(record.action)?;
                }
                GameEvent::Advance { force } => {
                    self.progress(*force)?;
                }
                GameEvent::EndTurn => {
                    self.end_turn()?;
                }
                GameEvent::Mulligan { player } => self.mulligan(*player)?,
                GameEvent::KeepHand { player, bottom } => self.keep_hand(*player, bottom)?,
            }
        }
        Ok(())
    }

    /// Serialize the mutable state (graph, RNG, history) with bincode.
    ///
    /// The catalog and vocabulary are not included; restore into a game
    /// that shares them.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        let snapshot = Snapshot {
            graph: self.graph.clone(),
            rng: self.rng.state(),
            config: self.config.clone(),
            status: self.status.clone(),
            history: self.history.clone(),
            kept: self.kept.clone(),
            last_combat: self.last_combat.clone(),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    pub fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        let snapshot: Snapshot = bincode::deserialize(bytes)?;
        snapshot.graph.check_invariants()?;
        self.graph = snapshot.graph;
        self.rng = GameRng::from_state(&snapshot.rng);
        self.config = snapshot.config;
        self.status = snapshot.status;
        self.history = snapshot.history;
        self.kept = snapshot.kept;
        self.last_combat = snapshot.last_combat;
        Ok(())
    }

    // === Display ===

    /// Name of a card, through the vocabulary when the catalog registered it.
    #[must_use]
    pub fn card_name(&self, card: EntityId) -> String {
        let Ok(card_type) = self.graph.card_type(card) else {
            return card.to_string();
        };
        self.vocabulary
            .name_of(VocabId(card_type.0))
            .and_then(|name| name.strip_prefix("card:"))
            .map(str::to_string)
            .or_else(|| self.catalog.get(card_type).map(|def| def.name.clone()))
            .unwrap_or_else(|| card_type.to_string())
    }

    /// One-line description of an action for logs and prompts.
    #[must_use]
    pub fn describe(&self, action: &Action) -> String {
        match *action {
            Action::PlayLand { card } => format!("play {}", self.card_name(card)),
            Action::CastSpell { card, target: None } => format!("cast {}", self.card_name(card)),
            Action::CastSpell { card, target: Some(target) } => {
                format!("cast {} on {}", self.card_name(card), self.card_name(target))
            }
            Action::ActivateManaAbility { card, .. } => format!("tap {} for mana", self.card_name(card)),
            Action::DeclareAttacker { card } => format!("attack with {}", self.card_name(card)),
            Action::DeclareBlocker { blocker, attacker } => {
                format!("block {} with {}", self.card_name(attacker), self.card_name(blocker))
            }
            Action::PassPriority => "pass".to_string(),
            Action::PassTurn => "end turn".to_string(),
        }
    }

    /// Current position with phase and step as vocabulary names, e.g.
    /// `turn 3 phase:combat/step:declare_attackers (Alice)`.
    #[must_use]
    pub fn describe_position(&self) -> String {
        let turn = self.graph.turn();
        let name = |id: VocabId| self.vocabulary.name_of(id).unwrap_or("?").to_string();
        format!(
            "turn {} {}/{} ({})",
            turn.turn_number,
            name(turn.phase.id()),
            name(turn.step.id()),
            self.graph.player(turn.active_player).name
        )
    }
}

impl RulesEngine for Game {
    fn acting_player(&self) -> PlayerId {
        Game::acting_player(self)
    }

    fn legal_actions(&self) -> Result<Vec<Action>> {
        self.legal_moves()
    }

    fn apply_action(&mut self, action: Action) -> Result<()> {
        self.execute_move(action).map(|_| ())
    }

    fn advance(&mut self, force: bool) -> Result<()> {
        self.progress(force).map(|_| ())
    }

    fn result(&self) -> Option<GameResult> {
        Game::result(self)
    }
}
