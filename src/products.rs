//! Products

use serde::Deserialize;
use thiserror::Error;

use crate::prices::{PRICE_DP, Price};

/// Errors raised while defining a product.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// The catalogue price has more precision than a currency can show; almost certainly a typo.
    #[error("Invalid product price {price} for {name}: must not have more than 2 decimal places")]
    InvalidPrice {
        /// Product name
        name: String,

        /// The exact price as given
        price: rust_decimal::Decimal,
    },

    /// Catalogue prices cannot be below zero.
    #[error("Invalid product price {price} for {name}: must not be negative")]
    NegativePrice {
        /// Product name
        name: String,

        /// The price as given
        price: rust_decimal::Decimal,
    },
}

/// How a product is priced and how its quantities are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum PricingUnit {
    /// Sold in whole units; quantities must be integers.
    #[default]
    #[serde(rename = "item")]
    PerItem,

    /// Sold by weight (per kilogram); quantities may be fractional.
    #[serde(rename = "kg")]
    PerWeight,
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    price: Price,
    unit: PricingUnit,
}

impl Product {
    /// Create a product, validating its price.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidPrice`] if `price` has more than two significant decimal
    /// places (e.g. `0.333`). Trailing zeros are fine (`0.300`).
    ///
    /// Returns [`ProductError::NegativePrice`] if `price` is below zero. Free products are allowed.
    pub fn new(
        name: impl Into<String>,
        price: Price,
        unit: PricingUnit,
    ) -> Result<Self, ProductError> {
        let name = name.into();

        if price < Price::ZERO {
            return Err(ProductError::NegativePrice {
                name,
                price: price.amount(),
            });
        }

        if price.significant_dp() > PRICE_DP {
            return Err(ProductError::InvalidPrice {
                name,
                price: price.amount(),
            });
        }

        Ok(Product { name, price, unit })
    }

    /// Create a product sold in whole units.
    ///
    /// # Errors
    ///
    /// See [`Product::new`].
    pub fn per_item(name: impl Into<String>, price: Price) -> Result<Self, ProductError> {
        Self::new(name, price, PricingUnit::PerItem)
    }

    /// Create a product sold by weight.
    ///
    /// # Errors
    ///
    /// See [`Product::new`].
    pub fn per_weight(name: impl Into<String>, price: Price) -> Result<Self, ProductError> {
        Self::new(name, price, PricingUnit::PerWeight)
    }

    /// Product name, also its catalogue key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price per unit, or per kilogram for weighed products
    pub fn price(&self) -> Price {
        self.price
    }

    /// Pricing unit
    pub fn unit(&self) -> PricingUnit {
        self.unit
    }
}
