//! Cart
//!
//! A single customer's checkout. Products are added by name with a quantity string; totals and
//! offer savings are derived from the current contents every time they are asked for.

use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    catalogue::Catalogue,
    offers::{Offer, OfferRule},
    prices::Price,
    products::{PricingUnit, Product},
    quantities::{Quantity, QuantityTally, Weight},
};

/// Why a quantity string was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Not parseable as a decimal number.
    #[error("must be a valid number")]
    NotANumber,

    /// Zero or negative.
    #[error("must be a positive value")]
    NotPositive,

    /// Fractional, for a product sold in whole units.
    #[error("must be specified in integers")]
    NotWhole,

    /// Too large to count or price.
    #[error("is too large")]
    TooLarge,
}

/// Errors raised while adding products to a cart.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The product is not in the catalogue.
    #[error("Unexpected Item in Bagging Area: {0}")]
    InvalidProduct(String),

    /// The quantity could not be used for the product.
    #[error("Product quantity for {product} {reason}")]
    InvalidQuantity {
        /// Product name
        product: String,

        /// The violated rule
        reason: QuantityError,
    },
}

/// One recorded add to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedLine {
    /// Product name
    pub product_name: String,

    /// Quantity added by this line alone
    pub quantity: Quantity,

    /// Line price; already rounded down to whole minor units for weighed products
    pub price: Price,

    /// Price per kilogram, for weighed products
    pub price_per_weight: Option<Price>,
}

/// An offer that produced a saving.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOffer {
    /// Offer description
    pub description: String,

    /// Amount saved
    pub amount: Price,
}

/// Shopping cart
#[derive(Debug)]
pub struct Cart<'a> {
    catalogue: &'a Catalogue,
    offers: &'a [Offer],
    quantities: QuantityTally,
    lines: Vec<AddedLine>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart pricing from `catalogue`, with `offers` evaluated in the given order.
    pub fn new(catalogue: &'a Catalogue, offers: &'a [Offer]) -> Self {
        Cart {
            catalogue,
            offers,
            quantities: QuantityTally::default(),
            lines: Vec::new(),
        }
    }

    /// Add a single unit of a product.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_product`].
    pub fn add_one(&mut self, name: &str) -> Result<AddedLine, CartError> {
        self.add_product(name, "1")
    }

    /// Add a product, with `quantity` given as a decimal string (a weight in kilograms for
    /// weighed products). Returns the recorded line.
    ///
    /// Nothing is changed if the add is rejected.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidProduct`]: `name` is not in the catalogue.
    /// - [`CartError::InvalidQuantity`]: `quantity` is not a number, is not positive, is
    ///   fractional for a product sold in whole units, or is too large to price.
    pub fn add_product(&mut self, name: &str, quantity: &str) -> Result<AddedLine, CartError> {
        let catalogue = self.catalogue;

        let Some(product) = catalogue.get(name) else {
            warn!(product = name, "unknown product");
            return Err(CartError::InvalidProduct(name.to_string()));
        };

        let (tally, line) = parse_quantity(product, quantity)
            .and_then(|quantity| self.price_line(product, quantity))
            .map_err(|reason| CartError::InvalidQuantity {
                product: product.name().to_string(),
                reason,
            })
            .inspect_err(|error| {
                warn!(product = name, %error, "rejected quantity");
            })?;

        debug!(
            product = name,
            quantity = %line.quantity,
            price = %line.price,
            "added line"
        );

        self.quantities.insert(product.name().to_string(), tally);
        self.lines.push(line.clone());

        Ok(line)
    }

    /// Price a new line and the product's new tally without touching the cart.
    ///
    /// Everything later derived from the cart (the sub-total, and any offer's discount on the
    /// whole tally) must stay within [`Decimal`] range.
    fn price_line(
        &self,
        product: &Product,
        quantity: Quantity,
    ) -> Result<(Decimal, AddedLine), QuantityError> {
        let amount = quantity.amount();
        let unit_price = product.price();

        let tally = self
            .quantity_of(product.name())
            .checked_add(amount)
            .ok_or(QuantityError::TooLarge)?;

        unit_price
            .checked_mul(tally)
            .ok_or(QuantityError::TooLarge)?;

        let price = unit_price
            .checked_mul(amount)
            .ok_or(QuantityError::TooLarge)?;

        let line = match product.unit() {
            PricingUnit::PerItem => AddedLine {
                product_name: product.name().to_string(),
                quantity,
                price,
                price_per_weight: None,
            },
            PricingUnit::PerWeight => AddedLine {
                product_name: product.name().to_string(),
                quantity,
                price: price.round_down_to_cents(),
                price_per_weight: Some(unit_price),
            },
        };

        self.sub_total()
            .checked_add(line.price)
            .ok_or(QuantityError::TooLarge)?;

        Ok((tally, line))
    }

    /// Sum of every line price.
    pub fn sub_total(&self) -> Price {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// Offers that currently produce a saving, in configured offer order.
    ///
    /// Recomputed from the current quantities on every call.
    pub fn applied_offers(&self) -> SmallVec<[AppliedOffer; 4]> {
        let currency = self.currency();

        self.offers
            .iter()
            .filter_map(|offer| {
                let amount = offer.check_and_apply(&self.quantities);

                trace!(offer = ?offer, %amount, "evaluated offer");

                amount.is_positive().then(|| AppliedOffer {
                    description: offer.description(currency),
                    amount,
                })
            })
            .collect()
    }

    /// Total saved by every applied offer.
    pub fn savings(&self) -> Price {
        self.applied_offers().iter().map(|offer| offer.amount).sum()
    }

    /// Amount to pay.
    pub fn total(&self) -> Price {
        self.sub_total() - self.savings()
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[AddedLine] {
        &self.lines
    }

    /// Accumulated quantity per product.
    pub fn quantities(&self) -> &QuantityTally {
        &self.quantities
    }

    /// Accumulated quantity of one product (zero if never added).
    pub fn quantity_of(&self, name: &str) -> Decimal {
        self.quantities.get(name).copied().unwrap_or_default()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency prices are displayed in.
    pub fn currency(&self) -> &'static Currency {
        self.catalogue.currency()
    }

    /// Get the configured offers.
    pub fn offers(&self) -> &[Offer] {
        self.offers
    }
}

/// Validate a quantity string against a product's pricing unit.
fn parse_quantity(product: &Product, input: &str) -> Result<Quantity, QuantityError> {
    let quantity =
        Decimal::from_str(input.trim()).map_err(|_parse_error| QuantityError::NotANumber)?;

    if quantity <= Decimal::ZERO {
        return Err(QuantityError::NotPositive);
    }

    match product.unit() {
        PricingUnit::PerWeight => Ok(Quantity::Weight(Weight::new(quantity))),
        PricingUnit::PerItem => {
            if !quantity.fract().is_zero() {
                return Err(QuantityError::NotWhole);
            }

            quantity
                .to_u64()
                .map(Quantity::Units)
                .ok_or(QuantityError::TooLarge)
        }
    }
}
