//! Ordered zone membership.
//!
//! The `ZoneManager` is the storage behind every IsInZone edge. Each card
//! maps to exactly one zone entity, and each zone keeps its cards in order
//! (index 0 is the bottom, the last element is the top). Because a card's
//! location is a single map entry, a card can never be in two zones.
//!
//! ```
//! use rust_mtg::zones::{ZoneManager, ZonePosition};
//! use rust_mtg::core::EntityId;
//!
//! let library = EntityId(2);
//! let hand = EntityId(3);
//! let mut zones = ZoneManager::new();
//! zones.init_zone(library);
//! zones.init_zone(hand);
//!
//! zones.add_to_zone(EntityId(10), library, ZonePosition::Top).unwrap();
//! zones.add_to_zone(EntityId(11), library, ZonePosition::Top).unwrap();
//! assert_eq!(zones.top_card(library), Some(EntityId(11)));
//!
//! zones.move_to_zone(EntityId(11), hand, ZonePosition::Top).unwrap();
//! assert_eq!(zones.get_zone(EntityId(11)), Some(hand));
//! ```

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    Top,
    Bottom,
    /// Index from the bottom, clamped to the zone size.
    Index(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    /// card -> zone entity
    locations: OrdMap<EntityId, EntityId>,
    /// zone entity -> cards, bottom first
    zone_order: OrdMap<EntityId, Vector<EntityId>>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an empty zone.
    pub fn init_zone(&mut self, zone: EntityId) {
        self.zone_order.entry(zone).or_default();
    }

    #[must_use]
    pub fn is_zone(&self, zone: EntityId) -> bool {
        self.zone_order.contains_key(&zone)
    }

    /// Put a card that is not yet anywhere into `zone`.
    pub fn add_to_zone(&mut self, card: EntityId, zone: EntityId, position: ZonePosition) -> Result<()> {
        if self.locations.contains_key(&card) {
            return Err(EngineError::AlreadyInZone { card });
        }
        let order = self.zone_order.get_mut(&zone).ok_or(EngineError::NotAZone(zone))?;
        insert_at(order, card, position);
        self.locations.insert(card, zone);
        Ok(())
    }

    /// Move a card, replacing its single location. Returns the old zone.
    ///
    /// Moving into the same zone repositions the card.
    pub fn move_to_zone(&mut self, card: EntityId, zone: EntityId, position: ZonePosition) -> Result<EntityId> {
        if !self.is_zone(zone) {
            return Err(EngineError::NotAZone(zone));
        }
        let old_zone = self
            .locations
            .get(&card)
            .copied()
            .ok_or(EngineError::UnknownEntity(card))?;

        if let Some(order) = self.zone_order.get_mut(&old_zone) {
            if let Some(index) = order.index_of(&card) {
                order.remove(index);
            }
        }
        if let Some(order) = self.zone_order.get_mut(&zone) {
            insert_at(order, card, position);
        }
        self.locations.insert(card, zone);
        Ok(old_zone)
    }

    #[must_use]
    pub fn get_zone(&self, card: EntityId) -> Option<EntityId> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn is_in_zone(&self, card: EntityId, zone: EntityId) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// Cards in a zone, bottom first. Empty for unknown zones.
    pub fn cards_in_zone(&self, zone: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.zone_order.get(&zone).into_iter().flat_map(|order| order.iter().copied())
    }

    #[must_use]
    pub fn zone_size(&self, zone: EntityId) -> usize {
        self.zone_order.get(&zone).map_or(0, Vector::len)
    }

    #[must_use]
    pub fn top_card(&self, zone: EntityId) -> Option<EntityId> {
        self.zone_order.get(&zone).and_then(|order| order.back().copied())
    }

    /// All (card, zone) pairs in card id order.
    pub fn locations(&self) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
        self.locations.iter().map(|(card, zone)| (*card, *zone))
    }

    /// Zone entities in id order.
    pub fn zones(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.zone_order.keys().copied()
    }

    pub fn shuffle_zone(&mut self, zone: EntityId, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            let mut cards: Vec<EntityId> = order.iter().copied().collect();
            rng.shuffle(&mut cards);
            *order = cards.into_iter().collect();
        }
    }
}

fn insert_at(order: &mut Vector<EntityId>, card: EntityId, position: ZonePosition) {
    match position {
        ZonePosition::Top => order.push_back(card),
        ZonePosition::Bottom => order.push_front(card),
        ZonePosition::Index(i) => {
            let index = i.min(order.len());
            order.insert(index, card);
        }
    }
}
