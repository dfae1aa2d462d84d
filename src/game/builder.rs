//! Seeded game setup.

use std::sync::Arc;

use crate::cards::{CardCatalog, CardTypeId};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::vocabulary::{Term, Vocabulary, ZoneKind};
use crate::graph::{EntityType, GameGraph};
use crate::zones::ZonePosition;

use super::Game;

/// Builder for creating a [`Game`].
///
/// Decks are listed top first. Unless an opening hand is given explicitly,
/// each player draws `opening_hand_size` cards after the optional shuffle.
/// Permanents given with [`battlefield`](Self::battlefield) start the game
/// already settled: untapped and free of summoning sickness.
///
/// ```
/// use rust_mtg::cards::starter;
/// use rust_mtg::game::GameBuilder;
/// use rust_mtg::mana::ManaColor;
///
/// let game = GameBuilder::new(starter::catalog())
///     .deck(0, starter::sample_deck(ManaColor::Green, ManaColor::Red))
///     .deck(1, starter::sample_deck(ManaColor::White, ManaColor::Blue))
///     .build(42)
///     .unwrap();
/// assert_eq!(game.turn().turn_number, 1);
/// ```
pub struct GameBuilder {
    catalog: Arc<CardCatalog>,
    config: GameConfig,
    names: [String; 2],
    decks: PlayerMap<Vec<CardTypeId>>,
    hands: PlayerMap<Option<Vec<CardTypeId>>>,
    battlefields: PlayerMap<Vec<CardTypeId>>,
    shuffle: bool,
}

impl GameBuilder {
    pub fn new(catalog: CardCatalog) -> Self {
        Self::with_shared_catalog(Arc::new(catalog))
    }

    pub fn with_shared_catalog(catalog: Arc<CardCatalog>) -> Self {
        Self {
            catalog,
            config: GameConfig::default(),
            names: ["Player 1".to_string(), "Player 2".to_string()],
            decks: PlayerMap::with_default(),
            hands: PlayerMap::with_default(),
            battlefields: PlayerMap::with_default(),
            shuffle: true,
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.names = [first.into(), second.into()];
        self
    }

    /// Library contents for seat `player` (0 or 1), top first.
    pub fn deck(mut self, player: u8, cards: Vec<CardTypeId>) -> Self {
        self.decks[PlayerId::new(player)] = cards;
        self
    }

    /// Exact opening hand for seat `player`; skips the opening draw.
    pub fn opening_hand(mut self, player: u8, cards: Vec<CardTypeId>) -> Self {
        self.hands[PlayerId::new(player)] = Some(cards);
        self
    }

    /// Permanents seat `player` starts with.
    pub fn battlefield(mut self, player: u8, cards: Vec<CardTypeId>) -> Self {
        self.battlefields[PlayerId::new(player)] = cards;
        self
    }

    /// Whether libraries are shuffled before the opening draw. On by default.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build the game.
    pub fn build(self, seed: u64) -> Result<Game> {
        let vocabulary = Vocabulary::standard().with_catalog(&self.catalog)?;
        let catalog = &*self.catalog;
        let mut graph = GameGraph::new([self.names[0].as_str(), self.names[1].as_str()], self.config.starting_life);
        let mut rng = GameRng::new(seed);

        for player in PlayerId::both() {
            for kind in ZoneKind::ALL {
                graph.add_entity(catalog, EntityType::Zone(*kind), player)?;
            }
        }

        for player in PlayerId::both() {
            let library = graph.zone_of_player(player, ZoneKind::Library)?;
            for card_type in &self.decks[player] {
                graph.place_card(catalog, *card_type, player, library, ZonePosition::Bottom)?;
            }
            if self.shuffle {
                graph.zones_mut().shuffle_zone(library, &mut rng);
            }

            match &self.hands[player] {
                Some(cards) => {
                    let hand = graph.zone_of_player(player, ZoneKind::Hand)?;
                    for card_type in cards {
                        graph.place_card(catalog, *card_type, player, hand, ZonePosition::Top)?;
                    }
                }
                None => {
                    for _ in 0..self.config.opening_hand_size.min(graph.zone_size(library)) {
                        graph.draw_card(player)?;
                    }
                }
            }

            let battlefield = graph.zone_of_player(player, ZoneKind::Battlefield)?;
            for card_type in &self.battlefields[player] {
                let card = graph.place_card(catalog, *card_type, player, battlefield, ZonePosition::Top)?;
                let state = graph.permanent_mut(card)?;
                state.summoning_sick = false;
                state.turn_entered = Some(0);
            }
        }

        log::debug!("game built with seed {seed}");
        Game::new(graph, self.catalog, Arc::new(vocabulary), self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter;
    use crate::core::error::EngineError;

    #[test]
    fn test_unshuffled_deck_draws_from_the_top() {
        let game = GameBuilder::new(starter::catalog())
            .config(GameConfig::default().with_opening_hand_size(2))
            .deck(0, vec![starter::GRIZZLY_BEARS, starter::FOREST, starter::ISLAND])
            .shuffle(false)
            .build(1)
            .unwrap();

        let p0 = PlayerId::new(0);
        let hand = game.cards_in(p0, ZoneKind::Hand).unwrap();
        let types: Vec<_> = hand.iter().map(|c| game.graph().card_type(*c).unwrap()).collect();
        assert_eq!(types, vec![starter::GRIZZLY_BEARS, starter::FOREST]);
        assert_eq!(game.cards_in(p0, ZoneKind::Library).unwrap().len(), 1);
        assert!(game.cards_in(PlayerId::new(1), ZoneKind::Hand).unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let build = |seed| {
            GameBuilder::new(starter::catalog())
                .deck(0, starter::sample_deck(crate::mana::ManaColor::Green, crate::mana::ManaColor::Red))
                .build(seed)
                .unwrap()
        };
        let hand_types = |game: &Game| -> Vec<CardTypeId> {
            game.cards_in(PlayerId::new(0), ZoneKind::Hand)
                .unwrap()
                .iter()
                .map(|c| game.graph().card_type(*c).unwrap())
                .collect()
        };
        assert_eq!(hand_types(&build(9)), hand_types(&build(9)));
        assert_eq!(build(9).graph(), build(9).graph());
    }

    #[test]
    fn test_battlefield_permanents_are_settled() {
        let game = GameBuilder::new(starter::catalog())
            .battlefield(1, vec![starter::GRIZZLY_BEARS])
            .build(0)
            .unwrap();
        let bears = game
            .find_card(PlayerId::new(1), ZoneKind::Battlefield, starter::GRIZZLY_BEARS)
            .unwrap();
        let state = game.graph().permanent(bears).unwrap();
        assert!(!state.summoning_sick);
        assert_eq!(state.turn_entered, Some(0));
        assert!(game.graph().characteristics(bears).is_some());
    }

    #[test]
    fn test_unknown_card_in_deck() {
        let err = GameBuilder::new(starter::catalog())
            .deck(0, vec![CardTypeId::new(4242)])
            .build(0)
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownCardType(4242));
    }
}
