//! Combat damage assignment.
//!
//! Damage within a pass is simultaneous: every assignment is computed from
//! the same snapshot, then all of it is dealt at once. When any combatant
//! has first strike or double strike there are two passes with a
//! state-based check between them; otherwise there is one regular pass.
//!
//! A blocked attacker assigns damage to its blockers in the order they were
//! declared. Each blocker but the last gets at most lethal damage; the last
//! gets the rest, unless the attacker has trample, in which case the last
//! blocker also gets only lethal damage and the excess goes to the
//! defending player.

use serde::{Deserialize, Serialize};

use super::keywords::{deals_first_strike_damage, deals_regular_combat_damage, lethal_damage};
use super::{attackers, blockers_of, defending_player};
use crate::cards::CardCatalog;
use crate::core::entity::EntityId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::vocabulary::Keyword;
use crate::graph::GameGraph;
use crate::layers::Characteristics;
use crate::rules::state_based::check_state_based_actions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamagePass {
    FirstStrike,
    Regular,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageTarget {
    Creature(EntityId),
    Player(PlayerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub source: EntityId,
    pub target: DamageTarget,
    pub amount: i64,
    pub pass: DamagePass,
}

/// What combat damage did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Non-zero damage, in the order it was dealt.
    pub events: Vec<DamageEvent>,
    /// Lifelink gains.
    pub life_gained: Vec<(PlayerId, i64)>,
    /// Permanents put into the graveyard by state-based actions between
    /// the first-strike and regular passes.
    pub destroyed: Vec<EntityId>,
}

impl CombatReport {
    #[must_use]
    pub fn damage_to_player(&self, player: PlayerId) -> i64 {
        self.events
            .iter()
            .filter(|e| e.target == DamageTarget::Player(player))
            .map(|e| e.amount)
            .sum()
    }

    #[must_use]
    pub fn damage_to(&self, creature: EntityId) -> i64 {
        self.events
            .iter()
            .filter(|e| e.target == DamageTarget::Creature(creature))
            .map(|e| e.amount)
            .sum()
    }

    #[must_use]
    pub fn damage_by(&self, source: EntityId) -> i64 {
        self.events.iter().filter(|e| e.source == source).map(|e| e.amount).sum()
    }
}

struct Assignment {
    event: DamageEvent,
    lifelink: bool,
    deathtouch: bool,
}

/// Resolve combat damage for the current attackers and blocks.
pub fn resolve_combat_damage(graph: &mut GameGraph, catalog: &CardCatalog) -> Result<CombatReport> {
    let mut report = CombatReport::default();
    let attacking = attackers(graph);
    if attacking.is_empty() {
        return Ok(report);
    }

    let mut combatants = attacking.clone();
    for attacker in &attacking {
        combatants.extend(blockers_of(graph, *attacker));
    }
    let has_first_strike = combatants
        .iter()
        .filter_map(|c| graph.characteristics(*c))
        .any(deals_first_strike_damage);

    if has_first_strike {
        let struck = deal_pass(graph, DamagePass::FirstStrike, &[], &mut report)?;
        report.destroyed = check_state_based_actions(graph, catalog)?;
        deal_pass(graph, DamagePass::Regular, &struck, &mut report)?;
    } else {
        deal_pass(graph, DamagePass::Regular, &[], &mut report)?;
    }
    Ok(report)
}

fn participates(c: &Characteristics, card: EntityId, pass: DamagePass, struck_first: &[EntityId]) -> bool {
    match pass {
        DamagePass::FirstStrike => deals_first_strike_damage(c),
        DamagePass::Regular => {
            deals_regular_combat_damage(c) && (!struck_first.contains(&card) || c.has(Keyword::DoubleStrike))
        }
    }
}

/// One simultaneous damage pass. Returns the creatures that dealt damage.
fn deal_pass(
    graph: &mut GameGraph,
    pass: DamagePass,
    struck_first: &[EntityId],
    report: &mut CombatReport,
) -> Result<Vec<EntityId>> {
    let defender = defending_player(graph);
    let mut pending = Vec::new();
    let assign = |pending: &mut Vec<Assignment>, source: EntityId, c: &Characteristics, target, amount| {
        pending.push(Assignment {
            event: DamageEvent { source, target, amount, pass },
            lifelink: c.has(Keyword::Lifelink),
            deathtouch: c.has(Keyword::Deathtouch),
        });
    };

    for attacker in attackers(graph) {
        let Some(ac) = graph.characteristics(attacker).copied() else {
            continue;
        };
        let blockers: Vec<EntityId> = blockers_of(graph, attacker)
            .into_iter()
            .filter(|b| graph.characteristics(*b).is_some())
            .collect();

        if participates(&ac, attacker, pass, struck_first) {
            let power = ac.power.max(0);
            if blockers.is_empty() {
                let blocked = graph.permanent(attacker).map_or(false, |s| s.blocked);
                if !blocked || ac.has(Keyword::Trample) {
                    assign(&mut pending, attacker, &ac, DamageTarget::Player(defender), power);
                }
            } else {
                let mut remaining = power;
                for (i, blocker) in blockers.iter().enumerate() {
                    let last = i + 1 == blockers.len();
                    let amount = if last && !ac.has(Keyword::Trample) {
                        remaining
                    } else {
                        let bc = graph.characteristics(*blocker).copied();
                        let marked = graph.permanent(*blocker).map_or(0, |s| s.damage_taken);
                        bc.map_or(0, |bc| remaining.min(lethal_damage(&ac, &bc, marked)))
                    };
                    assign(&mut pending, attacker, &ac, DamageTarget::Creature(*blocker), amount);
                    remaining -= amount;
                }
                if remaining > 0 && ac.has(Keyword::Trample) {
                    assign(&mut pending, attacker, &ac, DamageTarget::Player(defender), remaining);
                }
            }
        }

        for blocker in &blockers {
            let Some(bc) = graph.characteristics(*blocker).copied() else {
                continue;
            };
            if participates(&bc, *blocker, pass, struck_first) {
                assign(&mut pending, *blocker, &bc, DamageTarget::Creature(attacker), bc.power.max(0));
            }
        }
    }

    let mut dealt = Vec::new();
    for Assignment { event, lifelink, deathtouch } in pending {
        if event.amount <= 0 {
            continue;
        }
        match event.target {
            DamageTarget::Creature(victim) => {
                let state = graph.permanent_mut(victim)?;
                state.damage_taken += event.amount;
                state.deathtouched |= deathtouch;
            }
            DamageTarget::Player(player) => graph.player_mut(player).life_total -= event.amount,
        }
        if lifelink {
            if let Some(controller) = graph.controller_of(event.source) {
                graph.player_mut(controller).life_total += event.amount;
                report.life_gained.push((controller, event.amount));
            }
        }
        log::debug!("{:?}: {} deals {} to {:?}", pass, event.source, event.amount, event.target);
        if !dealt.contains(&event.source) {
            dealt.push(event.source);
        }
        report.events.push(event);
    }
    Ok(dealt)
}
