//! Continuous-effect resolution.
//!
//! [`apply_layers`] recomputes the effective characteristics of every
//! permanent on the battlefield from scratch:
//!
//! 1. Reset to printed values (power/toughness from the creature
//!    component, keywords and colors from the catalog).
//! 2. Collect one [`ContinuousEffect`] per static effect of every aura,
//!    stamped with the timestamp of its EnchantedBy edge.
//! 3. Apply them in layer order, sublayer order, then timestamp order.
//!
//! Layers 1-5 have no effect producers in the card pool; the ordering
//! still reserves their place so new effects slot in without reordering.
//! Marked damage is not a characteristic and is never touched here.

pub mod effect;

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, StaticEffect};
use crate::core::entity::EntityId;
use crate::core::error::Result;
use crate::core::vocabulary::{Keyword, KeywordSet, RelationKind};
use crate::graph::{GameGraph, RelationshipFilter};
use crate::mana::ColorSet;

pub use effect::{placement, ContinuousEffect, Layer, LayerKey, PtSublayer};

/// Effective characteristics of a permanent after all layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Characteristics {
    pub is_creature: bool,
    pub power: i64,
    pub toughness: i64,
    pub keywords: KeywordSet,
    pub colors: ColorSet,
}

impl Characteristics {
    #[must_use]
    pub fn has(&self, keyword: Keyword) -> bool {
        self.keywords.contains(keyword)
    }
}

/// Recompute characteristics for every permanent on the battlefield.
pub fn apply_layers(graph: &mut GameGraph, catalog: &CardCatalog) -> Result<()> {
    let mut values = OrdMap::new();
    for card in graph.battlefield_cards() {
        let def = catalog.get_static_data(graph.card_type(card)?)?;
        let creature = graph.creature(card);
        values.insert(
            card,
            Characteristics {
                is_creature: creature.is_some(),
                power: creature.map_or(0, |c| c.base_power),
                toughness: creature.map_or(0, |c| c.base_toughness),
                keywords: def.keyword_set(),
                colors: def.colors(),
            },
        );
    }

    let mut effects = collect_effects(graph, catalog)?;
    effects.sort_by_key(ContinuousEffect::key);
    for effect in &effects {
        if let Some(target) = values.get_mut(&effect.affected) {
            apply_effect(target, &effect.effect);
        }
    }

    graph.set_characteristics(values);
    Ok(())
}

fn collect_effects(graph: &GameGraph, catalog: &CardCatalog) -> Result<Vec<ContinuousEffect>> {
    let mut effects = Vec::new();
    for rel in graph.get_relationships(&RelationshipFilter::new().kind(RelationKind::EnchantedBy)) {
        let def = catalog.get_static_data(graph.card_type(rel.source)?)?;
        for static_effect in def.aura_effects() {
            effects.push(ContinuousEffect {
                source: rel.source,
                affected: rel.target,
                effect: *static_effect,
                timestamp: rel.timestamp,
            });
        }
    }
    Ok(effects)
}

fn apply_effect(target: &mut Characteristics, effect: &StaticEffect) {
    match *effect {
        StaticEffect::GrantKeyword(keyword) => target.keywords.insert(keyword),
        StaticEffect::RemoveAllKeywords => target.keywords.clear(),
        StaticEffect::SetBasePowerToughness { power, toughness } => {
            target.power = power;
            target.toughness = toughness;
        }
        StaticEffect::ModifyPowerToughness { power, toughness } => {
            target.power += power;
            target.toughness += toughness;
        }
        StaticEffect::SwitchPowerToughness => {
            std::mem::swap(&mut target.power, &mut target.toughness);
        }
    }
}

/// Effective characteristics, failing if the card is not on the battlefield.
pub fn effective(graph: &GameGraph, card: EntityId) -> Result<Characteristics> {
    graph
        .characteristics(card)
        .copied()
        .ok_or_else(|| crate::core::EngineError::invariant(format!("{card} has no characteristics")))
}
