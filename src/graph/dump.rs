//! Human-readable state dump for diagnostics.

use std::fmt::Write;

use super::{EntityType, GameGraph};
use crate::core::player::PlayerId;
use crate::core::vocabulary::{RelationKind, ZoneKind};

impl GameGraph {
    /// Multi-line description of the whole graph.
    ///
    /// Attached to invariant violations and logged when a game aborts.
    /// Zones that cannot be resolved are reported inline rather than
    /// failing the dump.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let turn = self.turn();
        let _ = writeln!(
            out,
            "turn {} {}/{} active={}",
            turn.turn_number, turn.phase, turn.step, turn.active_player
        );

        for player in PlayerId::both() {
            let state = self.player(player);
            let _ = writeln!(
                out,
                "{player} {:?}: life={} pool={} lands_played={} lost={}",
                state.name, state.life_total, state.mana_pool, state.lands_played_this_turn, state.has_lost
            );
            for kind in [
                ZoneKind::Library,
                ZoneKind::Hand,
                ZoneKind::Battlefield,
                ZoneKind::Graveyard,
                ZoneKind::Exile,
            ] {
                match self.zone_of_player(player, kind) {
                    Ok(zone) => {
                        let cards: Vec<String> = self.cards_in(zone).map(|c| self.describe_card(c)).collect();
                        let _ = writeln!(out, "  {kind} {zone}: [{}]", cards.join(", "));
                    }
                    Err(err) => {
                        let _ = writeln!(out, "  {kind}: <{err}>");
                    }
                }
            }
        }

        for rel in self.relationships.iter() {
            if rel.kind != RelationKind::Controls {
                let _ = writeln!(out, "  {} -{}-> {} @{}", rel.source, rel.kind, rel.target, rel.timestamp);
            }
        }
        out
    }

    fn describe_card(&self, card: crate::core::EntityId) -> String {
        let Some(EntityType::Card(card_type)) = self.entity_type(card) else {
            return format!("{card}?");
        };
        let mut text = format!("{}:{}", card.0, card_type.0);
        if let Some(state) = self.permanent(card) {
            if state.tapped {
                text.push_str(" T");
            }
            if state.attacking {
                text.push_str(" A");
            }
            if state.damage_taken > 0 {
                let _ = write!(text, " dmg={}", state.damage_taken);
            }
        }
        if let Some(c) = self.characteristics(card) {
            if c.is_creature {
                let _ = write!(text, " {}/{}", c.power, c.toughness);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use crate::cards::starter;
    use crate::core::player::PlayerId;
    use crate::core::vocabulary::{Term, ZoneKind};
    use crate::graph::{EntityType, GameGraph};
    use crate::zones::ZonePosition;

    #[test]
    fn test_dump_lists_zones_and_players() {
        let catalog = starter::catalog();
        let mut graph = GameGraph::new(["Alice", "Bob"], 20);
        for player in PlayerId::both() {
            for kind in ZoneKind::ALL {
                graph.add_entity(&catalog, EntityType::Zone(*kind), player).unwrap();
            }
        }
        let hand = graph.zone_of_player(PlayerId::new(0), ZoneKind::Hand).unwrap();
        graph
            .place_card(&catalog, starter::FOREST, PlayerId::new(0), hand, ZonePosition::Top)
            .unwrap();

        let dump = graph.dump();
        assert!(dump.starts_with("turn 1 beginning/untap"));
        assert!(dump.contains("\"Alice\": life=20"));
        assert!(dump.contains(":1000"));
    }

    #[test]
    fn test_dump_survives_missing_zone() {
        let graph = GameGraph::new(["A", "B"], 20);
        assert!(graph.dump().contains("has no library zone"));
    }
}
