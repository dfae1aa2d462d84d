//! The payment planner.
//!
//! [`plan_payment`] is the only place that decides which mana pays for a
//! cost. Both the affordability check used by legal-move generation and
//! the deduction performed when a spell is cast go through it, so a spell
//! that was offered can always be paid.

use serde::{Deserialize, Serialize};

use super::color::ManaColor;
use super::cost::ManaCost;
use super::pool::ManaPool;

/// Mana a payment takes out of the pool, per color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    spent: [u32; 6],
}

impl Payment {
    #[must_use]
    pub const fn spent(&self, color: ManaColor) -> u32 {
        self.spent[color.index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.spent.iter().sum()
    }
}

/// First requirement the pool could not meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortfall {
    /// `None` for the generic part of the cost.
    pub color: Option<ManaColor>,
    pub missing: u32,
}

/// Decide how `pool` pays `cost` without touching the pool.
///
/// Colored requirements are met first from their own color. The generic
/// remainder drains the pool in [`ManaColor::GENERIC_PAYMENT_ORDER`]
/// (colorless, then W, U, B, R, G).
pub fn plan_payment(pool: &ManaPool, cost: &ManaCost) -> Result<Payment, Shortfall> {
    let mut payment = Payment::default();
    let mut available = [0u32; 6];
    for color in ManaColor::GENERIC_PAYMENT_ORDER {
        available[color.index()] = pool.get(color);
    }

    for color in ManaColor::GENERIC_PAYMENT_ORDER {
        let need = cost.colored(color);
        let have = available[color.index()];
        if have < need {
            return Err(Shortfall {
                color: Some(color),
                missing: need - have,
            });
        }
        available[color.index()] -= need;
        payment.spent[color.index()] += need;
    }

    let mut generic = cost.generic;
    for color in ManaColor::GENERIC_PAYMENT_ORDER {
        if generic == 0 {
            break;
        }
        let take = generic.min(available[color.index()]);
        available[color.index()] -= take;
        payment.spent[color.index()] += take;
        generic -= take;
    }

    if generic > 0 {
        return Err(Shortfall { color: None, missing: generic });
    }
    Ok(payment)
}
