//! Combat: who may attack, who may block whom, and combat damage.
//!
//! ## Flow
//!
//! 1. DeclareAttackers: the active player flags attackers one at a time
//!    ([`legal_attackers`]).
//! 2. DeclareBlockers: the defending player adds IsBlocking edges one at a
//!    time ([`legal_blocks`]). When the step ends, [`close_blocks`] drops
//!    blocks that violate a minimum-blockers requirement and marks the
//!    remaining blocked attackers.
//! 3. Damage is resolved right after blocks close
//!    ([`damage::resolve_combat_damage`]).
//! 4. EndCombat clears attack flags and block edges ([`end_combat`]).

pub mod damage;
pub mod keywords;

use crate::core::entity::EntityId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::vocabulary::{Keyword, RelationKind};
use crate::graph::{GameGraph, RelationshipFilter};

pub use damage::{resolve_combat_damage, CombatReport, DamageEvent, DamagePass, DamageTarget};
pub use keywords::{can_block, minimum_blockers};

/// The player being attacked this turn.
#[must_use]
pub fn defending_player(graph: &GameGraph) -> PlayerId {
    graph.turn().active_player.opponent()
}

/// Whether `card` could be declared as an attacker right now.
///
/// The creature must be the active player's, untapped, not already
/// attacking and without defender. It must also have been under its
/// controller's control since the start of the turn (entered on an
/// earlier turn and no longer summoning sick), unless it has haste.
#[must_use]
pub fn can_attack(graph: &GameGraph, card: EntityId) -> bool {
    let (Some(c), Some(state)) = (graph.characteristics(card), graph.permanent(card)) else {
        return false;
    };
    if !c.is_creature || graph.controller_of(card) != Some(graph.turn().active_player) {
        return false;
    }
    if state.tapped || state.attacking || c.has(Keyword::Defender) {
        return false;
    }
    let settled = !state.summoning_sick
        && state
            .turn_entered
            .map_or(false, |turn| turn < graph.turn().turn_number);
    settled || c.has(Keyword::Haste)
}

#[must_use]
pub fn legal_attackers(graph: &GameGraph) -> Vec<EntityId> {
    graph
        .battlefield_cards()
        .into_iter()
        .filter(|card| can_attack(graph, *card))
        .collect()
}

/// Creatures currently flagged as attacking, in id order.
#[must_use]
pub fn attackers(graph: &GameGraph) -> Vec<EntityId> {
    graph
        .battlefield_cards()
        .into_iter()
        .filter(|card| graph.permanent(*card).map_or(false, |s| s.attacking))
        .collect()
}

/// Blockers of `attacker` in declaration order.
#[must_use]
pub fn blockers_of(graph: &GameGraph, attacker: EntityId) -> Vec<EntityId> {
    graph
        .get_relationships(&RelationshipFilter::new().target(attacker).kind(RelationKind::IsBlocking))
        .into_iter()
        .map(|rel| rel.source)
        .collect()
}

/// The attacker `blocker` is blocking, if any.
#[must_use]
pub fn blocking_target(graph: &GameGraph, blocker: EntityId) -> Option<EntityId> {
    graph
        .get_relationships(&RelationshipFilter::new().source(blocker).kind(RelationKind::IsBlocking))
        .first()
        .map(|rel| rel.target)
}

/// Every (blocker, attacker) pair the defending player may still declare.
///
/// A blocker is an untapped creature of the defending player that is not
/// blocking yet; the pair must pass the keyword restrictions.
#[must_use]
pub fn legal_blocks(graph: &GameGraph) -> Vec<(EntityId, EntityId)> {
    let defender = defending_player(graph);
    let attacking = attackers(graph);
    let mut pairs = Vec::new();
    for blocker in graph.battlefield_cards() {
        let (Some(bc), Some(state)) = (graph.characteristics(blocker), graph.permanent(blocker)) else {
            continue;
        };
        if !bc.is_creature
            || state.tapped
            || graph.controller_of(blocker) != Some(defender)
            || blocking_target(graph, blocker).is_some()
        {
            continue;
        }
        for attacker in &attacking {
            if let Some(ac) = graph.characteristics(*attacker) {
                if can_block(ac, bc) {
                    pairs.push((blocker, *attacker));
                }
            }
        }
    }
    pairs
}

/// Finalize blocks when the declare-blockers step ends.
///
/// Attackers whose blockers fall short of [`minimum_blockers`] lose all of
/// them. Every attacker left with a blocker is marked blocked. Returns the
/// blockers whose blocks were removed.
pub fn close_blocks(graph: &mut GameGraph) -> Result<Vec<EntityId>> {
    let mut removed = Vec::new();
    for attacker in attackers(graph) {
        let blockers = blockers_of(graph, attacker);
        if blockers.is_empty() {
            continue;
        }
        let required = graph.characteristics(attacker).map_or(1, minimum_blockers);
        if blockers.len() < required {
            log::debug!("{attacker} needs {required} blockers, dropping {blockers:?}");
            graph.remove_relationships(
                &RelationshipFilter::new().target(attacker).kind(RelationKind::IsBlocking),
            );
            removed.extend(blockers);
        } else {
            graph.permanent_mut(attacker)?.blocked = true;
        }
    }
    Ok(removed)
}

/// Clear attack flags and all block edges.
pub fn end_combat(graph: &mut GameGraph) -> Result<()> {
    for card in attackers(graph) {
        graph.permanent_mut(card)?.clear_combat();
    }
    graph.remove_relationships(&RelationshipFilter::new().kind(RelationKind::IsBlocking));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{starter, CardCatalog, CardTypeId};
    use crate::core::vocabulary::{Term, ZoneKind};
    use crate::graph::EntityType;
    use crate::layers::apply_layers;
    use crate::zones::ZonePosition;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn setup() -> (GameGraph, CardCatalog) {
        let catalog = starter::catalog();
        let mut graph = GameGraph::new(["A", "B"], 20);
        for player in PlayerId::both() {
            for kind in ZoneKind::ALL {
                graph.add_entity(&catalog, EntityType::Zone(*kind), player).unwrap();
            }
        }
        graph.turn_mut().turn_number = 2;
        (graph, catalog)
    }

    /// A permanent that has been around since an earlier turn.
    fn settled(graph: &mut GameGraph, catalog: &CardCatalog, card_type: CardTypeId, owner: PlayerId) -> EntityId {
        let bf = graph.zone_of_player(owner, ZoneKind::Battlefield).unwrap();
        let card = graph.place_card(catalog, card_type, owner, bf, ZonePosition::Top).unwrap();
        let state = graph.permanent_mut(card).unwrap();
        state.summoning_sick = false;
        state.turn_entered = Some(1);
        card
    }

    #[test]
    fn test_can_attack_requires_settled_creature() {
        let (mut graph, catalog) = setup();
        let old = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P0);
        let bf = graph.zone_of_player(P0, ZoneKind::Battlefield).unwrap();
        let fresh = graph
            .place_card(&catalog, starter::GRIZZLY_BEARS, P0, bf, ZonePosition::Top)
            .unwrap();
        let theirs = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P1);
        let land = settled(&mut graph, &catalog, starter::FOREST, P0);
        apply_layers(&mut graph, &catalog).unwrap();

        assert!(can_attack(&graph, old));
        assert!(!can_attack(&graph, fresh));
        assert!(!can_attack(&graph, theirs));
        assert!(!can_attack(&graph, land));
        assert_eq!(legal_attackers(&graph), vec![old]);

        graph.permanent_mut(old).unwrap().tapped = true;
        assert!(!can_attack(&graph, old));
    }

    #[test]
    fn test_close_blocks_enforces_menace() {
        let (mut graph, catalog) = setup();
        let brute = settled(&mut graph, &catalog, starter::BOGGART_BRUTE, P0);
        let bears = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P0);
        let first = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P1);
        let second = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P1);
        apply_layers(&mut graph, &catalog).unwrap();
        graph.permanent_mut(brute).unwrap().attacking = true;
        graph.permanent_mut(bears).unwrap().attacking = true;

        graph.add_relationship(first, brute, RelationKind::IsBlocking).unwrap();
        graph.add_relationship(second, bears, RelationKind::IsBlocking).unwrap();
        assert_eq!(legal_blocks(&graph), Vec::new());

        assert_eq!(close_blocks(&mut graph).unwrap(), vec![first]);
        assert!(blockers_of(&graph, brute).is_empty());
        assert!(!graph.permanent(brute).unwrap().blocked);
        assert_eq!(blockers_of(&graph, bears), vec![second]);
        assert!(graph.permanent(bears).unwrap().blocked);
    }

    #[test]
    fn test_end_combat_clears_everything() {
        let (mut graph, catalog) = setup();
        let attacker = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P0);
        let blocker = settled(&mut graph, &catalog, starter::GRIZZLY_BEARS, P1);
        apply_layers(&mut graph, &catalog).unwrap();
        graph.permanent_mut(attacker).unwrap().attacking = true;
        graph.add_relationship(blocker, attacker, RelationKind::IsBlocking).unwrap();
        close_blocks(&mut graph).unwrap();
        assert_eq!(blocking_target(&graph, blocker), Some(attacker));

        end_combat(&mut graph).unwrap();
        assert!(attackers(&graph).is_empty());
        assert_eq!(blocking_target(&graph, blocker), None);
        assert!(!graph.permanent(attacker).unwrap().blocked);
    }
}
