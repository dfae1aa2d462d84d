//! Mana: colors, pools, costs and payment.
//!
//! ## Payment
//!
//! ```
//! use rust_mtg::mana::{ManaColor, ManaCost, ManaPool};
//!
//! let mut pool = ManaPool::from_amounts(&[(ManaColor::Green, 1), (ManaColor::Red, 1)]);
//! let bears = ManaCost::parse("{1}{G}").unwrap();
//!
//! assert!(pool.can_pay(&bears));
//! pool.pay(&bears).unwrap();
//! assert!(pool.is_empty());
//! ```

pub mod color;
pub mod cost;
pub mod payment;
pub mod pool;

pub use color::{ColorSet, ManaColor};
pub use cost::{ManaCost, ParseManaCostError};
pub use payment::{plan_payment, Payment, Shortfall};
pub use pool::ManaPool;
