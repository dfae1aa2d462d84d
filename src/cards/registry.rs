//! The card catalog.
//!
//! Read-only after construction; the game holds it behind an `Arc` so that
//! cloned games share one catalog.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardTypeId};
use crate::core::error::{EngineError, Result};

/// Lookup of card definitions by type id.
///
/// ```
/// use rust_mtg::cards::{CardCatalog, CardDefinition, CardTypeId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::land(CardTypeId::new(1000), "Forest"));
///
/// assert_eq!(catalog.get_static_data(CardTypeId::new(1000)).unwrap().name, "Forest");
/// assert!(catalog.get_static_data(CardTypeId::new(1)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardTypeId, CardDefinition>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if the id is already taken; catalogs are assembled once at
    /// startup and a clash is a programming error.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card type {} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    #[must_use]
    pub fn get(&self, id: CardTypeId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Static data for a card type, or `UnknownCardType`.
    pub fn get_static_data(&self, id: CardTypeId) -> Result<&CardDefinition> {
        self.cards.get(&id).ok_or(EngineError::UnknownCardType(id.0))
    }

    #[must_use]
    pub fn contains(&self, id: CardTypeId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Definitions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.values().find(|c| c.name == name)
    }
}
