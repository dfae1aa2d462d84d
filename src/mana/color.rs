//! Mana colors and color sets.

use serde::{Deserialize, Serialize};

pub use crate::core::vocabulary::ManaColor;

impl ManaColor {
    /// Order in which generic costs drain the pool.
    pub const GENERIC_PAYMENT_ORDER: [ManaColor; 6] = [
        ManaColor::Colorless,
        ManaColor::White,
        ManaColor::Blue,
        ManaColor::Black,
        ManaColor::Red,
        ManaColor::Green,
    ];

    /// The five colors, excluding colorless.
    pub const COLORS: [ManaColor; 5] = [
        ManaColor::White,
        ManaColor::Blue,
        ManaColor::Black,
        ManaColor::Red,
        ManaColor::Green,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::White => 'W',
            Self::Blue => 'U',
            Self::Black => 'B',
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Colorless => 'C',
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'W' => Some(Self::White),
            'U' => Some(Self::Blue),
            'B' => Some(Self::Black),
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'C' => Some(Self::Colorless),
            _ => None,
        }
    }
}

/// Set of the five colors. Colorless is the empty set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSet(u8);

impl ColorSet {
    #[must_use]
    pub const fn colorless() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, color: ManaColor) {
        if color != ManaColor::Colorless {
            self.0 |= 1 << color.index();
        }
    }

    #[must_use]
    pub const fn contains(self, color: ManaColor) -> bool {
        self.0 & (1 << color as usize) != 0
    }

    #[must_use]
    pub const fn is_colorless(self) -> bool {
        self.0 == 0
    }

    /// Whether the two sets share at least one color.
    #[must_use]
    pub const fn intersects(self, other: ColorSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = ManaColor> {
        ManaColor::COLORS.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<ManaColor> for ColorSet {
    fn from_iter<I: IntoIterator<Item = ManaColor>>(iter: I) -> Self {
        let mut set = Self::colorless();
        for color in iter {
            set.insert(color);
        }
        set
    }
}
