//! State-based actions.
//!
//! Checked after every step-exit and between combat damage passes. Each
//! round recomputes layers first, then:
//!
//! - a creature with toughness 0 or less dies;
//! - a creature with damage at least its toughness dies;
//! - a creature with any deathtouch damage dies;
//! - an aura that enchants nothing goes to its owner's graveyard.
//!
//! Rounds repeat until nothing changes, since a dying creature can leave an
//! aura unattached and a removed aura can shrink a creature.

use crate::cards::CardCatalog;
use crate::core::entity::EntityId;
use crate::core::error::{EngineError, Result};
use crate::core::vocabulary::{RelationKind, ZoneKind};
use crate::graph::{GameGraph, RelationshipFilter};
use crate::layers::apply_layers;
use crate::zones::ZonePosition;

/// Apply state-based actions until stable. Returns the permanents put into
/// a graveyard, in the order they went.
pub fn check_state_based_actions(graph: &mut GameGraph, catalog: &CardCatalog) -> Result<Vec<EntityId>> {
    let mut removed = Vec::new();
    // Every round removes at least one permanent, so the battlefield bounds
    // the number of rounds.
    let max_rounds = graph.battlefield_cards().len() + 1;
    for _ in 0..max_rounds {
        apply_layers(graph, catalog)?;
        let doomed = doomed_permanents(graph, catalog)?;
        if doomed.is_empty() {
            return Ok(removed);
        }
        for card in doomed {
            let owner = graph.card(card).map(|c| c.owner).ok_or(EngineError::NotACard(card))?;
            let graveyard = graph.zone_of_player(owner, ZoneKind::Graveyard)?;
            graph.move_card_to_zone(card, graveyard, ZonePosition::Top)?;
            log::debug!("{card} put into {owner}'s graveyard");
            removed.push(card);
        }
    }
    Err(EngineError::invariant("state-based actions did not settle"))
}

fn doomed_permanents(graph: &GameGraph, catalog: &CardCatalog) -> Result<Vec<EntityId>> {
    let mut doomed = Vec::new();
    for card in graph.battlefield_cards() {
        if let (Some(c), Some(state)) = (graph.characteristics(card), graph.permanent(card)) {
            if c.is_creature {
                let lethal = state.damage_taken >= c.toughness || (state.deathtouched && state.damage_taken > 0);
                if c.toughness <= 0 || lethal {
                    doomed.push(card);
                    continue;
                }
            }
        }

        if catalog.get_static_data(graph.card_type(card)?)?.is_aura() {
            let attached = graph
                .get_relationships(&RelationshipFilter::new().source(card).kind(RelationKind::EnchantedBy))
                .iter()
                .any(|rel| graph.is_on_battlefield(rel.target));
            if !attached {
                doomed.push(card);
            }
        }
    }
    Ok(doomed)
}
