//! Prices
//!
//! Exact decimal money amounts. Everything is kept in [`Decimal`] so offer maths never picks up
//! binary floating point drift; truncation only happens at the edges (weighed line prices and
//! display).

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Deref, Mul, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso::Currency;

/// Number of fractional digits a price is displayed (and rounded down) to.
pub const PRICE_DP: u32 = 2;

/// An exact price in major currency units (e.g. pounds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// Zero.
    pub const ZERO: Price = Price {
        value: Decimal::ZERO,
    };

    /// The smallest displayable amount, one minor unit.
    pub const MINOR_UNIT: Price = Price {
        value: Decimal::from_parts(1, 0, 0, false, PRICE_DP),
    };

    /// Creates a new Price
    pub fn new(value: Decimal) -> Self {
        Price { value }
    }

    /// Creates a price from minor units (pence/cents).
    pub fn from_minor(minor: i64) -> Self {
        Price {
            value: Decimal::new(minor, PRICE_DP),
        }
    }

    /// The exact decimal amount.
    pub fn amount(&self) -> Decimal {
        self.value
    }

    /// Whether this price is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Truncates toward zero to whole minor units, never rounding up.
    #[must_use]
    pub fn truncated(&self) -> Self {
        Price {
            value: self
                .value
                .round_dp_with_strategy(PRICE_DP, RoundingStrategy::ToZero),
        }
    }

    /// Truncates to whole minor units, clamped so the result is at least one minor unit.
    ///
    /// Used for weighed goods, where fractional unit prices multiplied by fractional weights leave
    /// sub-penny amounts that must never show up as a free line.
    #[must_use]
    pub fn round_down_to_cents(&self) -> Self {
        self.truncated().max(Price::MINOR_UNIT)
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(self, rhs: Price) -> Option<Price> {
        self.value.checked_add(rhs.value).map(Price::new)
    }

    /// Checked subtraction, `None` on overflow.
    pub fn checked_sub(self, rhs: Price) -> Option<Price> {
        self.value.checked_sub(rhs.value).map(Price::new)
    }

    /// Checked multiplication by a quantity, `None` on overflow.
    pub fn checked_mul(self, rhs: Decimal) -> Option<Price> {
        self.value.checked_mul(rhs).map(Price::new)
    }

    /// Number of significant fractional digits, ignoring trailing zeros.
    pub fn significant_dp(&self) -> u32 {
        self.value.normalize().scale()
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Price::new(value)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Price::new)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price::new(self.value + rhs.value)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        self.value += rhs.value;
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Price) -> Price {
        Price::new(self.value - rhs.value)
    }
}

impl Mul<Decimal> for Price {
    type Output = Price;

    fn mul(self, rhs: Decimal) -> Price {
        Price::new(self.value * rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Plain two-digit amount without a currency symbol, truncated.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut truncated = self.truncated().value;
        truncated.rescale(PRICE_DP);

        write!(f, "{truncated}")
    }
}

/// Returns the display symbol for a currency, if it has a well-known one.
pub fn currency_symbol(currency: &Currency) -> Option<&'static str> {
    match currency.iso_alpha_code {
        "GBP" => Some("£"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        _ => None,
    }
}

/// Format a price as a currency string, truncated (never rounded up) to two decimal places.
pub fn format_price(price: Price, currency: &Currency) -> String {
    let mut magnitude = price.truncated().value.abs();
    magnitude.rescale(PRICE_DP);

    let sign = if price.truncated().value.is_sign_negative() && !magnitude.is_zero() {
        "-"
    } else {
        ""
    };

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{magnitude}"),
        None => format!("{sign}{magnitude} {}", currency.iso_alpha_code),
    }
}
