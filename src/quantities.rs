//! Quantities
//!
//! Whole units for per-item products, exact weights for weighed ones.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;

/// Number of fractional digits a weight is displayed to.
pub const WEIGHT_DP: u32 = 3;

/// Accumulated quantity per product name, across every add for that product.
pub type QuantityTally = FxHashMap<String, Decimal>;

/// An exact weight (kilograms).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(Decimal);

impl Weight {
    /// Creates a new weight.
    pub fn new(value: Decimal) -> Self {
        Weight(value)
    }

    /// The exact decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Truncated (never rounded up) to three decimal places.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut truncated = self
            .0
            .round_dp_with_strategy(WEIGHT_DP, RoundingStrategy::ToZero);
        truncated.rescale(WEIGHT_DP);

        write!(f, "{truncated}")
    }
}

/// The quantity recorded for a single added line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// A whole number of items.
    Units(u64),

    /// A weight, for products priced per kilogram.
    Weight(Weight),
}

impl Quantity {
    /// The exact decimal amount, regardless of unit.
    pub fn amount(&self) -> Decimal {
        match self {
            Quantity::Units(units) => Decimal::from(*units),
            Quantity::Weight(weight) => weight.amount(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Units(units) => write!(f, "{units}"),
            Quantity::Weight(weight) => write!(f, "{weight} kg"),
        }
    }
}
