//! The three-counter ore bundle shared by every calculator.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// One of the three ore currencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OreKind {
    /// Shiny ore, the bulk currency.
    Shiny,
    /// Glowy ore.
    Glowy,
    /// Starry ore, only needed by Epic equipment.
    Starry,
}

impl OreKind {
    /// All ore kinds in display order.
    pub const ALL: [OreKind; 3] = [OreKind::Shiny, OreKind::Glowy, OreKind::Starry];

    pub fn name(self) -> &'static str {
        match self {
            OreKind::Shiny => "Shiny",
            OreKind::Glowy => "Glowy",
            OreKind::Starry => "Starry",
        }
    }
}

impl fmt::Display for OreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Amounts of each ore kind. Values are expected to stay non-negative.
///
/// Bundles are plain values: arithmetic always returns a new bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OreBundle {
    #[serde(default)]
    pub shiny: Decimal,
    #[serde(default)]
    pub glowy: Decimal,
    #[serde(default)]
    pub starry: Decimal,
}

impl OreBundle {
    /// The empty bundle.
    pub const ZERO: OreBundle = OreBundle {
        shiny: Decimal::ZERO,
        glowy: Decimal::ZERO,
        starry: Decimal::ZERO,
    };

    pub fn new(shiny: Decimal, glowy: Decimal, starry: Decimal) -> Self {
        Self {
            shiny,
            glowy,
            starry,
        }
    }

    /// Build a bundle from whole ore units.
    ///
    /// Example:
    /// let b = OreBundle::units(1000, 54, 0);
    /// assert_eq!(b.shiny, Decimal::new(1000, 0));
    pub fn units(shiny: i64, glowy: i64, starry: i64) -> Self {
        Self::new(
            Decimal::from(shiny),
            Decimal::from(glowy),
            Decimal::from(starry),
        )
    }

    /// Amount of a single ore kind.
    pub fn get(&self, kind: OreKind) -> Decimal {
        match kind {
            OreKind::Shiny => self.shiny,
            OreKind::Glowy => self.glowy,
            OreKind::Starry => self.starry,
        }
    }

    /// Apply `f` to every ore kind.
    pub fn map(self, mut f: impl FnMut(OreKind, Decimal) -> Decimal) -> Self {
        Self {
            shiny: f(OreKind::Shiny, self.shiny),
            glowy: f(OreKind::Glowy, self.glowy),
            starry: f(OreKind::Starry, self.starry),
        }
    }

    pub fn is_zero(&self) -> bool {
        OreKind::ALL.iter().all(|&k| self.get(k).is_zero())
    }

    /// True when no field is negative.
    pub fn is_non_negative(&self) -> bool {
        OreKind::ALL.iter().all(|&k| self.get(k) >= Decimal::ZERO)
    }

    /// Multiply every field by `factor`.
    pub fn scale(self, factor: Decimal) -> Self {
        self.map(|_, v| v * factor)
    }

    /// Pointwise `self - other`, floored at zero.
    pub fn saturating_sub(self, other: OreBundle) -> Self {
        self.map(|k, v| (v - other.get(k)).max(Decimal::ZERO))
    }

    /// Round every field to whole units, halves away from zero.
    pub fn round_units(self) -> Self {
        self.map(|_, v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl Add for OreBundle {
    type Output = OreBundle;

    fn add(self, rhs: OreBundle) -> OreBundle {
        self.map(|k, v| v + rhs.get(k))
    }
}

impl AddAssign for OreBundle {
    fn add_assign(&mut self, rhs: OreBundle) {
        *self = *self + rhs;
    }
}

impl Sum for OreBundle {
    fn sum<I: Iterator<Item = OreBundle>>(iter: I) -> Self {
        iter.fold(OreBundle::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a OreBundle> for OreBundle {
    fn sum<I: Iterator<Item = &'a OreBundle>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for OreBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shiny {} / glowy {} / starry {}",
            self.shiny.normalize(),
            self.glowy.normalize(),
            self.starry.normalize()
        )
    }
}
