//! Continuous effects and their place in the layer order.

use serde::{Deserialize, Serialize};

use crate::cards::StaticEffect;
use crate::core::entity::EntityId;

/// The seven layers in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Copy = 1,
    Control = 2,
    Text = 3,
    Type = 4,
    Color = 5,
    Ability = 6,
    PowerToughness = 7,
}

/// Sublayers of layer 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PtSublayer {
    /// 7a: characteristic-defining abilities.
    Defining,
    /// 7b: effects that set base power/toughness.
    Set,
    /// 7c: modifications.
    Modify,
    /// 7d: switching.
    Switch,
}

/// Ordering key: layer, then sublayer, then timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerKey {
    pub layer: Layer,
    pub sublayer: Option<PtSublayer>,
    pub timestamp: u64,
}

/// One static effect applied to one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContinuousEffect {
    pub source: EntityId,
    pub affected: EntityId,
    pub effect: StaticEffect,
    pub timestamp: u64,
}

impl ContinuousEffect {
    #[must_use]
    pub fn key(&self) -> LayerKey {
        let (layer, sublayer) = placement(&self.effect);
        LayerKey { layer, sublayer, timestamp: self.timestamp }
    }
}

/// Layer (and sublayer) a static effect applies in.
#[must_use]
pub fn placement(effect: &StaticEffect) -> (Layer, Option<PtSublayer>) {
    match effect {
        StaticEffect::GrantKeyword(_) | StaticEffect::RemoveAllKeywords => (Layer::Ability, None),
        StaticEffect::SetBasePowerToughness { .. } => (Layer::PowerToughness, Some(PtSublayer::Set)),
        StaticEffect::ModifyPowerToughness { .. } => (Layer::PowerToughness, Some(PtSublayer::Modify)),
        StaticEffect::SwitchPowerToughness => (Layer::PowerToughness, Some(PtSublayer::Switch)),
    }
}
