//! Zone membership.
//!
//! Zones themselves are entities in the game graph (one per player per
//! [`ZoneKind`](crate::core::ZoneKind)). This module tracks which cards are
//! in which zone entity, and in what order.

pub mod manager;

pub use manager::{ZoneManager, ZonePosition};
