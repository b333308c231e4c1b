//! Product Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    prices::Price,
    products::{PricingUnit, Product},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name, defaults to the fixture key
    #[serde(default)]
    pub name: Option<String>,

    /// Product price (e.g., "0.50 GBP"), per kilogram for weighed products
    pub price: String,

    /// Pricing unit, `item` unless given
    #[serde(default)]
    pub unit: PricingUnit,
}

impl ProductFixture {
    /// Convert to a `Product` and the currency its price was given in
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed or is rejected by [`Product::new`].
    pub fn try_into_product(
        self,
        key: &str,
    ) -> Result<(Product, &'static Currency), FixtureError> {
        let (price, currency) = parse_price(&self.price)?;
        let name = self.name.unwrap_or_else(|| key.to_string());

        Ok((Product::new(name, price, self.unit)?, currency))
    }
}

/// Parse price string (e.g., "2.99 GBP") into a price and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not
/// an ISO 4217 code.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let price = amount
        .parse::<Price>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = iso::find(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    Ok((price, currency))
}
