//! Cards: static definitions, the catalog, per-entity components, and a
//! built-in starter pool.
//!
//! ## Key Types
//!
//! - `CardTypeId`: identifies a card type (every Forest shares one)
//! - `CardDefinition`: printed data, built with `with_*` methods
//! - `CardCatalog`: read-only lookup by `CardTypeId`
//! - `CardInstance`, `CreatureComponent`, `LandComponent`,
//!   `PermanentState`, `PlayerState`: typed components stored in the graph

pub mod definition;
pub mod instance;
pub mod registry;
pub mod starter;

pub use definition::{AbilityCost, CardDefinition, CardKind, CardTypeId, ManaAbility, StaticEffect};
pub use instance::{CardInstance, CreatureComponent, LandComponent, PermanentState, PlayerState};
pub use registry::CardCatalog;
