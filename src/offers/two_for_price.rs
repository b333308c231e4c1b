//! Two for Price
//!
//! A pair of the same product for a fixed bundle price.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use smallvec::smallvec;

use crate::{
    offers::{MatchedRun, OfferError, OfferEvaluation, OfferRule, complete_bundles},
    prices::{Price, format_price},
    products::Product,
    quantities::QuantityTally,
};

const BUNDLE_SIZE: u64 = 2;

/// A "2 for a fixed price" offer on a single product
#[derive(Debug, Clone)]
pub struct TwoForPrice {
    product: Product,
    bundle_price: Price,
    saving_per_bundle: Price,
}

impl TwoForPrice {
    /// Create a new "2 for `bundle_price`" offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::BundleNotDiscounted`] if `bundle_price` is not lower than two units
    /// at catalogue price, which would turn the "saving" into a markup, or
    /// [`OfferError::PriceOverflow`] if the pair cannot be priced.
    pub fn new(product: Product, bundle_price: Price) -> Result<Self, OfferError> {
        let overflow = || OfferError::PriceOverflow(product.name().to_string());

        let full_price = product
            .price()
            .checked_mul(Decimal::from(BUNDLE_SIZE))
            .ok_or_else(overflow)?;

        if bundle_price >= full_price {
            return Err(OfferError::BundleNotDiscounted {
                product: product.name().to_string(),
                bundle_price: bundle_price.amount(),
                full_price: full_price.amount(),
            });
        }

        let saving_per_bundle = full_price
            .checked_sub(bundle_price)
            .ok_or_else(overflow)?;

        Ok(Self {
            product,
            bundle_price,
            saving_per_bundle,
        })
    }

    /// Return the product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Return the price paid for a pair
    pub fn bundle_price(&self) -> Price {
        self.bundle_price
    }
}

impl OfferRule for TwoForPrice {
    fn evaluate<'a>(&'a self, quantities: &QuantityTally) -> Option<OfferEvaluation<'a>> {
        let quantity = quantities.get(self.product.name()).copied()?;
        let (bundles, units) = complete_bundles(quantity, BUNDLE_SIZE)?;

        Some(OfferEvaluation {
            matched: smallvec![MatchedRun {
                product: &self.product,
                units,
            }],
            discount: self.saving_per_bundle.checked_mul(bundles)?,
        })
    }

    fn description(&self, currency: &Currency) -> String {
        format!(
            "{} 2 for {}",
            self.product.name(),
            format_price(self.bundle_price, currency)
        )
    }
}
