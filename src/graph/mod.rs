//! The game graph: every entity, every relationship, every component.
//!
//! `GameGraph` is the single mutable source of truth for a game in
//! progress. Entities (players, zones, cards) are nodes; ownership, zone
//! membership, auras and blocks are directed edges.
//!
//! ## Storage
//!
//! - Components live in sparse `im::OrdMap`s keyed by [`EntityId`], so
//!   iteration is in id order and cloning a graph is O(1).
//! - IsInZone edges are stored in a [`ZoneManager`], which keeps zone order
//!   and makes "one zone per card" structural.
//! - All other edges live in an `im::Vector` in insertion order.
//!
//! ## Invariants
//!
//! - Every card is in exactly one zone.
//! - Each player controls exactly one zone of each [`ZoneKind`].
//! - The active player is a live player entity; the turn number never
//!   decreases.
//! - IsBlocking and EnchantedBy edges only connect permanents that are on
//!   the battlefield.
//!
//! [`GameGraph::check_invariants`] verifies all of them.

pub mod dump;
pub mod relationship;

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{
    CardCatalog, CardInstance, CardTypeId, CreatureComponent, LandComponent, PermanentState,
    PlayerState,
};
use crate::core::entity::EntityId;
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::vocabulary::{Phase, RelationKind, Step, Term, ZoneKind};
use crate::layers::Characteristics;
use crate::zones::{ZoneManager, ZonePosition};

pub use relationship::{Relationship, RelationshipFilter};

/// What kind of thing an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Player,
    Zone(ZoneKind),
    Card(CardTypeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: EntityType,
}

/// Where the game is in its turn structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Starts at 1.
    pub turn_number: u32,
    pub phase: Phase,
    pub step: Step,
    pub active_player: PlayerId,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            turn_number: 1,
            phase: Phase::Beginning,
            step: Step::Untap,
            active_player: PlayerId::new(0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameGraph {
    next_entity_id: u32,
    next_timestamp: u64,

    // === Nodes ===
    entities: OrdMap<EntityId, Entity>,

    // === Edges ===
    relationships: Vector<Relationship>,
    zones: ZoneManager,
    /// Controls edges by target. Derived from `relationships`.
    controllers: OrdMap<EntityId, PlayerId>,

    // === Components ===
    players: PlayerMap<PlayerState>,
    cards: OrdMap<EntityId, CardInstance>,
    creatures: OrdMap<EntityId, CreatureComponent>,
    lands: OrdMap<EntityId, LandComponent>,
    permanents: OrdMap<EntityId, PermanentState>,
    /// Layer output for permanents on the battlefield.
    characteristics: OrdMap<EntityId, Characteristics>,

    turn: TurnState,
}

impl GameGraph {
    /// A graph holding just the two player entities.
    #[must_use]
    pub fn new(names: [&str; 2], starting_life: i64) -> Self {
        let mut entities = OrdMap::new();
        for player in PlayerId::both() {
            let id = EntityId::player(player);
            entities.insert(id, Entity { id, entity_type: EntityType::Player });
        }
        Self {
            next_entity_id: EntityId::first_non_player(),
            next_timestamp: 1,
            entities,
            relationships: Vector::new(),
            zones: ZoneManager::new(),
            controllers: OrdMap::new(),
            players: PlayerMap::new(|p| PlayerState::new(names[p.index()], starting_life)),
            cards: OrdMap::new(),
            creatures: OrdMap::new(),
            lands: OrdMap::new(),
            permanents: OrdMap::new(),
            characteristics: OrdMap::new(),
            turn: TurnState::default(),
        }
    }

    // === Entities ===

    /// Create a zone or card entity owned by `owner`.
    ///
    /// Cards are hydrated from the catalog and start untapped, undamaged,
    /// not attacking and summoning sick. The owner gets a Controls edge to
    /// the new entity. A card is not in any zone until placed with
    /// [`add_relationship`](Self::add_relationship) or
    /// [`place_card`](Self::place_card).
    pub fn add_entity(&mut self, catalog: &CardCatalog, entity_type: EntityType, owner: PlayerId) -> Result<EntityId> {
        if let EntityType::Card(card_type) = entity_type {
            // Resolve before allocating so a bad id leaves no trace.
            catalog.get_static_data(card_type)?;
        }
        let id = EntityId(self.next_entity_id);

        match entity_type {
            EntityType::Player => return Err(EngineError::PlayerEntityAdded),
            EntityType::Zone(_) => self.zones.init_zone(id),
            EntityType::Card(card_type) => {
                let def = catalog.get_static_data(card_type)?;
                self.cards.insert(id, CardInstance { card_type, owner });
                if let Some(creature) = CreatureComponent::from_definition(def) {
                    self.creatures.insert(id, creature);
                }
                if let Some(land) = LandComponent::from_definition(def) {
                    self.lands.insert(id, land);
                }
                self.permanents.insert(id, PermanentState::default());
            }
        }

        self.next_entity_id += 1;
        self.entities.insert(id, Entity { id, entity_type });
        self.add_relationship(EntityId::player(owner), id, RelationKind::Controls)?;
        Ok(id)
    }

    /// Create a card and put it into `zone` in one step.
    pub fn place_card(
        &mut self,
        catalog: &CardCatalog,
        card_type: CardTypeId,
        owner: PlayerId,
        zone: EntityId,
        position: ZonePosition,
    ) -> Result<EntityId> {
        let card = self.add_entity(catalog, EntityType::Card(card_type), owner)?;
        self.zones.add_to_zone(card, zone, position)?;
        if self.zone_kind(zone) == Some(ZoneKind::Battlefield) {
            self.enter_battlefield(card);
        }
        Ok(card)
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    #[must_use]
    pub fn entity_type(&self, id: EntityId) -> Option<EntityType> {
        self.entities.get(&id).map(|e| e.entity_type)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    // === Relationships ===

    /// Add an edge.
    ///
    /// An IsInZone edge places a card that is not yet in any zone (on top);
    /// use [`move_card_to_zone`](Self::move_card_to_zone) to relocate.
    pub fn add_relationship(&mut self, source: EntityId, target: EntityId, kind: RelationKind) -> Result<()> {
        for id in [source, target] {
            if !self.entities.contains_key(&id) {
                return Err(EngineError::UnknownEntity(id));
            }
        }
        match kind {
            RelationKind::IsInZone => {
                if !self.cards.contains_key(&source) {
                    return Err(EngineError::NotACard(source));
                }
                self.zones.add_to_zone(source, target, ZonePosition::Top)?;
                if self.zone_kind(target) == Some(ZoneKind::Battlefield) {
                    self.enter_battlefield(source);
                }
            }
            RelationKind::Controls => {
                let player = source.as_player().ok_or_else(|| {
                    EngineError::invariant(format!("{source} cannot control {target}"))
                })?;
                self.controllers.insert(target, player);
                self.push_edge(source, target, kind);
            }
            RelationKind::EnchantedBy | RelationKind::IsBlocking => self.push_edge(source, target, kind),
        }
        Ok(())
    }

    fn push_edge(&mut self, source: EntityId, target: EntityId, kind: RelationKind) {
        let timestamp = self.next_timestamp();
        self.relationships.push_back(Relationship { source, target, kind, timestamp });
    }

    /// Remove every non-zone edge matching `filter`. Returns how many went.
    pub fn remove_relationships(&mut self, filter: &RelationshipFilter) -> usize {
        let before = self.relationships.len();
        let mut kept = Vector::new();
        for rel in self.relationships.iter() {
            if filter.kind != Some(RelationKind::IsInZone) && filter.matches(rel) {
                if rel.kind == RelationKind::Controls {
                    self.controllers.remove(&rel.target);
                }
            } else {
                kept.push_back(*rel);
            }
        }
        self.relationships = kept;
        before - self.relationships.len()
    }

    /// Edges matching `filter`.
    ///
    /// IsInZone edges come first, grouped by zone in zone order (bottom
    /// first); the rest follow in insertion order.
    #[must_use]
    pub fn get_relationships(&self, filter: &RelationshipFilter) -> Vec<Relationship> {
        let mut out = Vec::new();
        if filter.kind.map_or(true, |k| k == RelationKind::IsInZone) {
            let zones: Vec<EntityId> = match filter.target {
                Some(zone) => vec![zone],
                None => self.zones.zones().collect(),
            };
            for zone in zones {
                for card in self.zones.cards_in_zone(zone) {
                    let rel = Relationship {
                        source: card,
                        target: zone,
                        kind: RelationKind::IsInZone,
                        timestamp: 0,
                    };
                    if filter.matches(&rel) {
                        out.push(rel);
                    }
                }
            }
        }
        out.extend(self.relationships.iter().filter(|r| filter.matches(r)).copied());
        out
    }

    pub(crate) fn next_timestamp(&mut self) -> u64 {
        let ts = self.next_timestamp;
        self.next_timestamp += 1;
        ts
    }

    // === Zones ===

    /// The unique zone of `kind` controlled by `player`.
    pub fn zone_of_player(&self, player: PlayerId, kind: ZoneKind) -> Result<EntityId> {
        let mut found = None;
        for rel in self.relationships.iter() {
            if rel.kind != RelationKind::Controls || rel.source != EntityId::player(player) {
                continue;
            }
            if self.entity_type(rel.target) == Some(EntityType::Zone(kind)) {
                if found.is_some() {
                    return Err(EngineError::invariant(format!("{player} controls two {kind} zones")));
                }
                found = Some(rel.target);
            }
        }
        found.ok_or(EngineError::MissingZone { player, kind })
    }

    /// Kind of a zone entity.
    #[must_use]
    pub fn zone_kind(&self, zone: EntityId) -> Option<ZoneKind> {
        match self.entity_type(zone)? {
            EntityType::Zone(kind) => Some(kind),
            _ => None,
        }
    }

    /// Cards in a zone, bottom first.
    pub fn cards_in(&self, zone: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.zones.cards_in_zone(zone)
    }

    /// Cards in one of a player's zones, bottom first.
    pub fn player_cards(&self, player: PlayerId, kind: ZoneKind) -> Result<Vec<EntityId>> {
        let zone = self.zone_of_player(player, kind)?;
        Ok(self.cards_in(zone).collect())
    }

    #[must_use]
    pub fn zone_size(&self, zone: EntityId) -> usize {
        self.zones.zone_size(zone)
    }

    /// Zone entity a card is in.
    #[must_use]
    pub fn zone_of(&self, card: EntityId) -> Option<EntityId> {
        self.zones.get_zone(card)
    }

    /// Kind of the zone a card is in.
    #[must_use]
    pub fn card_zone_kind(&self, card: EntityId) -> Option<ZoneKind> {
        self.zone_of(card).and_then(|zone| self.zone_kind(zone))
    }

    #[must_use]
    pub fn is_on_battlefield(&self, card: EntityId) -> bool {
        self.card_zone_kind(card) == Some(ZoneKind::Battlefield)
    }

    /// Every card on either battlefield, in id order.
    #[must_use]
    pub fn battlefield_cards(&self) -> Vec<EntityId> {
        self.cards
            .keys()
            .copied()
            .filter(|card| self.is_on_battlefield(*card))
            .collect()
    }

    /// Move a card, replacing its IsInZone edge.
    ///
    /// Leaving the battlefield drops every aura and block edge that touches
    /// the card and clears its combat flags; the rest of its permanent state
    /// stays readable as last-known information. Entering the battlefield
    /// starts a fresh permanent state.
    pub fn move_card_to_zone(&mut self, card: EntityId, zone: EntityId, position: ZonePosition) -> Result<()> {
        if !self.cards.contains_key(&card) {
            return Err(EngineError::NotACard(card));
        }
        let to_kind = self.zone_kind(zone).ok_or(EngineError::NotAZone(zone))?;
        let from = self.zones.move_to_zone(card, zone, position)?;
        if from == zone {
            return Ok(());
        }

        if self.zone_kind(from) == Some(ZoneKind::Battlefield) {
            for kind in [RelationKind::EnchantedBy, RelationKind::IsBlocking] {
                self.remove_relationships(&RelationshipFilter::new().source(card).kind(kind));
                self.remove_relationships(&RelationshipFilter::new().target(card).kind(kind));
            }
            self.characteristics.remove(&card);
            if let Some(state) = self.permanents.get_mut(&card) {
                state.clear_combat();
            }
        }
        if to_kind == ZoneKind::Battlefield {
            self.permanents.insert(card, PermanentState::default());
            self.enter_battlefield(card);
        }
        log::trace!("{card} moved to {to_kind}");
        Ok(())
    }

    fn enter_battlefield(&mut self, card: EntityId) {
        let turn = self.turn.turn_number;
        if let Some(state) = self.permanents.get_mut(&card) {
            state.turn_entered = Some(turn);
        }
    }

    /// Move the top card of `player`'s library to their hand.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<EntityId> {
        let library = self.zone_of_player(player, ZoneKind::Library)?;
        let hand = self.zone_of_player(player, ZoneKind::Hand)?;
        let card = self
            .zones
            .top_card(library)
            .ok_or(EngineError::EmptyLibrary { player })?;
        self.move_card_to_zone(card, hand, ZonePosition::Top)?;
        Ok(card)
    }

    pub(crate) fn zones_mut(&mut self) -> &mut ZoneManager {
        &mut self.zones
    }

    // === Components ===

    /// Player holding the Controls edge to `entity`.
    #[must_use]
    pub fn controller_of(&self, entity: EntityId) -> Option<PlayerId> {
        self.controllers.get(&entity).copied()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerState)> {
        self.players.iter()
    }

    #[must_use]
    pub fn card(&self, card: EntityId) -> Option<&CardInstance> {
        self.cards.get(&card)
    }

    pub fn card_type(&self, card: EntityId) -> Result<CardTypeId> {
        self.cards
            .get(&card)
            .map(|c| c.card_type)
            .ok_or(EngineError::NotACard(card))
    }

    /// Every card entity in id order.
    pub fn cards(&self) -> impl Iterator<Item = (EntityId, &CardInstance)> {
        self.cards.iter().map(|(id, card)| (*id, card))
    }

    #[must_use]
    pub fn creature(&self, card: EntityId) -> Option<&CreatureComponent> {
        self.creatures.get(&card)
    }

    #[must_use]
    pub fn land(&self, card: EntityId) -> Option<&LandComponent> {
        self.lands.get(&card)
    }

    #[must_use]
    pub fn permanent(&self, card: EntityId) -> Option<&PermanentState> {
        self.permanents.get(&card)
    }

    pub fn permanent_mut(&mut self, card: EntityId) -> Result<&mut PermanentState> {
        self.permanents.get_mut(&card).ok_or(EngineError::NotACard(card))
    }

    /// Effective characteristics of a permanent on the battlefield.
    #[must_use]
    pub fn characteristics(&self, card: EntityId) -> Option<&Characteristics> {
        self.characteristics.get(&card)
    }

    pub(crate) fn set_characteristics(&mut self, values: OrdMap<EntityId, Characteristics>) {
        self.characteristics = values;
    }

    // === Turn ===

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnState {
        &mut self.turn
    }

    // === Invariants ===

    /// Verify the graph invariants, returning a violation with a state dump.
    pub fn check_invariants(&self) -> Result<()> {
        self.find_violation().map_or(Ok(()), |detail| {
            Err(EngineError::InvariantViolation { detail, dump: self.dump() })
        })
    }

    fn find_violation(&self) -> Option<String> {
        for card in self.cards.keys() {
            match self.zones.get_zone(*card) {
                None => return Some(format!("{card} is in no zone")),
                Some(zone) if self.zone_kind(zone).is_none() => {
                    return Some(format!("{card} is in {zone}, which is not a zone"))
                }
                Some(_) => {}
            }
        }

        for player in PlayerId::both() {
            for kind in ZoneKind::ALL {
                if let Err(err) = self.zone_of_player(player, *kind) {
                    return Some(err.to_string());
                }
            }
        }

        let active = EntityId::player(self.turn.active_player);
        if self.entity_type(active) != Some(EntityType::Player) {
            return Some(format!("active player {active} is not a player"));
        }
        if self.turn.turn_number == 0 {
            return Some("turn number is 0".to_string());
        }

        for rel in self.relationships.iter() {
            if matches!(rel.kind, RelationKind::EnchantedBy | RelationKind::IsBlocking)
                && !(self.is_on_battlefield(rel.source) && self.is_on_battlefield(rel.target))
            {
                return Some(format!(
                    "{} edge {} -> {} outlived the battlefield",
                    rel.kind, rel.source, rel.target
                ));
            }
        }
        None
    }
}
