//! Shared helpers for offer tests

use rust_decimal::Decimal;

use crate::quantities::QuantityTally;

/// Build a quantity tally from `(name, quantity)` pairs.
pub(super) fn tally(entries: &[(&str, Decimal)]) -> QuantityTally {
    entries
        .iter()
        .map(|(name, quantity)| ((*name).to_string(), *quantity))
        .collect()
}
