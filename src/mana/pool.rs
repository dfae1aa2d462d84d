use serde::{Deserialize, Serialize};

use super::color::ManaColor;
use super::cost::ManaCost;
use super::payment::{plan_payment, Payment, Shortfall};

/// Unspent mana, one counter per color including colorless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    amounts: [u32; 6],
}

impl ManaPool {
    #[must_use]
    pub const fn empty() -> Self {
        Self { amounts: [0; 6] }
    }

    /// Pool holding exactly the given amounts.
    ///
    /// ```
    /// use rust_mtg::mana::{ManaColor, ManaPool};
    ///
    /// let pool = ManaPool::from_amounts(&[(ManaColor::Green, 2), (ManaColor::Red, 1)]);
    /// assert_eq!(pool.get(ManaColor::Green), 2);
    /// assert_eq!(pool.total(), 3);
    /// ```
    #[must_use]
    pub fn from_amounts(amounts: &[(ManaColor, u32)]) -> Self {
        let mut pool = Self::empty();
        for &(color, amount) in amounts {
            pool.add(color, amount);
        }
        pool
    }

    #[must_use]
    pub const fn get(&self, color: ManaColor) -> u32 {
        self.amounts[color.index()]
    }

    pub fn add(&mut self, color: ManaColor, amount: u32) {
        self.amounts[color.index()] += amount;
    }

    /// Add every counter of `other` to this pool.
    pub fn add_pool(&mut self, other: &ManaPool) {
        for (mine, theirs) in self.amounts.iter_mut().zip(other.amounts) {
            *mine += theirs;
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn clear(&mut self) {
        self.amounts = [0; 6];
    }

    /// Non-zero counters in canonical color order.
    pub fn iter(&self) -> impl Iterator<Item = (ManaColor, u32)> + '_ {
        ManaColor::GENERIC_PAYMENT_ORDER
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, n)| *n > 0)
    }

    /// Whether `cost` could be paid from this pool right now.
    #[must_use]
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        plan_payment(self, cost).is_ok()
    }

    /// Pay `cost`, deducting exactly what the planner chose.
    ///
    /// On failure the pool is left untouched.
    pub fn pay(&mut self, cost: &ManaCost) -> Result<Payment, Shortfall> {
        let payment = plan_payment(self, cost)?;
        for color in ManaColor::GENERIC_PAYMENT_ORDER {
            self.amounts[color.index()] -= payment.spent(color);
        }
        Ok(payment)
    }
}

impl std::fmt::Display for ManaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        for (color, amount) in self.iter() {
            for _ in 0..amount {
                write!(f, "{{{}}}", color.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_clear() {
        let mut pool = ManaPool::empty();
        pool.add(ManaColor::Blue, 2);
        pool.add_pool(&ManaPool::from_amounts(&[(ManaColor::Blue, 1), (ManaColor::Black, 1)]));
        assert_eq!(pool.get(ManaColor::Blue), 3);
        assert_eq!(pool.total(), 4);

        pool.clear();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_failed_pay_leaves_pool() {
        let mut pool = ManaPool::from_amounts(&[(ManaColor::Green, 1)]);
        let cost = ManaCost::parse("{1}{G}").unwrap();
        assert!(!pool.can_pay(&cost));
        assert!(pool.pay(&cost).is_err());
        assert_eq!(pool.get(ManaColor::Green), 1);
    }

    #[test]
    fn test_pay_deducts() {
        let mut pool = ManaPool::from_amounts(&[(ManaColor::Green, 2), (ManaColor::White, 1)]);
        let cost = ManaCost::parse("{1}{G}").unwrap();
        pool.pay(&cost).unwrap();
        // generic drains white before green
        assert_eq!(pool.get(ManaColor::White), 0);
        assert_eq!(pool.get(ManaColor::Green), 1);
    }

    #[test]
    fn test_display() {
        let pool = ManaPool::from_amounts(&[(ManaColor::Red, 2), (ManaColor::Colorless, 1)]);
        assert_eq!(pool.to_string(), "{C}{R}{R}");
        assert_eq!(ManaPool::empty().to_string(), "(empty)");
    }
}
