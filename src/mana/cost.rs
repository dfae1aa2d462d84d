use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::{ColorSet, ManaColor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseManaCostError {
    #[error("unterminated symbol in {0:?}")]
    Unterminated(String),
    #[error("unknown mana symbol {{{0}}}")]
    UnknownSymbol(String),
}

/// A spell's mana cost: a generic amount plus per-color requirements.
///
/// A `{C}` symbol is a colorless requirement, which only colorless mana can
/// satisfy; it is not generic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    pub generic: u32,
    colored: [u32; 6],
}

impl ManaCost {
    #[must_use]
    pub const fn free() -> Self {
        Self { generic: 0, colored: [0; 6] }
    }

    #[must_use]
    pub fn with_generic(mut self, amount: u32) -> Self {
        self.generic += amount;
        self
    }

    #[must_use]
    pub fn with_colored(mut self, color: ManaColor, amount: u32) -> Self {
        self.colored[color.index()] += amount;
        self
    }

    /// Parse a cost in `{2}{G}{G}` notation. The empty string is free.
    ///
    /// ```
    /// use rust_mtg::mana::{ManaColor, ManaCost};
    ///
    /// let cost = ManaCost::parse("{2}{R}{G}").unwrap();
    /// assert_eq!(cost.generic, 2);
    /// assert_eq!(cost.colored(ManaColor::Red), 1);
    /// assert_eq!(cost.mana_value(), 4);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseManaCostError> {
        let mut cost = Self::free();
        let mut rest = text.trim();
        while let Some(open) = rest.strip_prefix('{') {
            let close = open
                .find('}')
                .ok_or_else(|| ParseManaCostError::Unterminated(text.to_string()))?;
            let symbol = &open[..close];
            if let Ok(amount) = symbol.parse::<u32>() {
                cost.generic += amount;
            } else {
                let mut chars = symbol.chars();
                match (chars.next().and_then(ManaColor::from_symbol), chars.next()) {
                    (Some(color), None) => cost.colored[color.index()] += 1,
                    _ => return Err(ParseManaCostError::UnknownSymbol(symbol.to_string())),
                }
            }
            rest = &open[close + 1..];
        }
        if rest.is_empty() {
            Ok(cost)
        } else {
            Err(ParseManaCostError::UnknownSymbol(rest.to_string()))
        }
    }

    #[must_use]
    pub const fn colored(&self, color: ManaColor) -> u32 {
        self.colored[color.index()]
    }

    /// Total amount of mana the cost asks for.
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.generic + self.colored.iter().sum::<u32>()
    }

    /// Colors of the symbols in the cost.
    #[must_use]
    pub fn colors(&self) -> ColorSet {
        ManaColor::COLORS
            .into_iter()
            .filter(|c| self.colored(*c) > 0)
            .collect()
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generic > 0 || self.mana_value() == 0 {
            write!(f, "{{{}}}", self.generic)?;
        }
        for color in ManaColor::GENERIC_PAYMENT_ORDER {
            for _ in 0..self.colored(color) {
                write!(f, "{{{}}}", color.symbol())?;
            }
        }
        Ok(())
    }
}
