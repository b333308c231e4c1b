//! Offers
//!
//! The closed set of promotional offers a cart can be priced with. Every offer is immutable
//! configuration: evaluating it against a quantity tally returns an [`OfferEvaluation`] (the
//! units it consumed and the discount) rather than stashing anything on the offer, so a single
//! offer can be shared between any number of carts.

use std::fmt::Debug;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    prices::Price,
    products::Product,
    quantities::QuantityTally,
};

mod cheapest_from_set;
mod three_for_two;
mod two_for_price;

#[cfg(test)]
mod test_support;

pub use cheapest_from_set::CheapestFromSetForPrice;
pub use three_for_two::ThreeForTwo;
pub use two_for_price::TwoForPrice;

/// Errors raised while configuring an offer.
#[derive(Debug, Error, PartialEq)]
pub enum OfferError {
    /// The bundle would cost the same or more than buying the items individually.
    #[error(
        "Bundle price {bundle_price} for {product} is not lower than the full price {full_price}"
    )]
    BundleNotDiscounted {
        /// Product the offer targets
        product: String,

        /// Configured bundle price
        bundle_price: Decimal,

        /// Price of the bundle's items at catalogue price
        full_price: Decimal,
    },

    /// A bundle must contain at least one item.
    #[error("Offer {0} must bundle at least one item")]
    EmptyBundle(String),

    /// Bundle arithmetic does not fit in a decimal.
    #[error("Offer on {0} cannot be priced: amount is too large")]
    PriceOverflow(String),

    /// A set offer needs at least one product to choose from.
    #[error("Offer {0} has no eligible products")]
    NoProducts(String),

    /// The same product was listed twice in a set offer.
    #[error("Offer {category} lists {product} more than once")]
    DuplicateProduct {
        /// Offer category
        category: String,

        /// Repeated product name
        product: String,
    },
}

/// A run of identically priced units of one product consumed by an offer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedRun<'a> {
    /// Product the units belong to
    pub product: &'a Product,

    /// Number of whole units
    pub units: Decimal,
}

/// Result of evaluating an eligible offer.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferEvaluation<'a> {
    /// Units that make up the complete bundles, cheapest first.
    pub matched: SmallVec<[MatchedRun<'a>; 4]>,

    /// Amount taken off the sub-total
    pub discount: Price,
}

impl OfferEvaluation<'_> {
    /// Total number of matched units
    pub fn matched_units(&self) -> Decimal {
        self.matched.iter().map(|run| run.units).sum()
    }
}

/// Behaviour shared by every offer.
pub trait OfferRule: Debug {
    /// Evaluate this offer against the current quantities.
    ///
    /// Returns `None` if the offer is not eligible.
    fn evaluate<'a>(&'a self, quantities: &QuantityTally) -> Option<OfferEvaluation<'a>>;

    /// Human-readable description, with prices shown in `currency`.
    fn description(&self, currency: &Currency) -> String;

    /// Whether the minimum qualifying quantity is met.
    fn is_eligible(&self, quantities: &QuantityTally) -> bool {
        self.evaluate(quantities).is_some()
    }

    /// The discount if eligible, otherwise zero.
    fn check_and_apply(&self, quantities: &QuantityTally) -> Price {
        self.evaluate(quantities)
            .map_or(Price::ZERO, |evaluation| evaluation.discount)
    }
}

/// Offer enum
#[derive(Debug, Clone)]
pub enum Offer {
    /// Every third unit of a product free
    ThreeForTwo(ThreeForTwo),

    /// Pairs of a product for a fixed price
    TwoForPrice(TwoForPrice),

    /// Bundles of the cheapest units from a set of products for a fixed price
    CheapestFromSetForPrice(CheapestFromSetForPrice),
}

impl Offer {
    /// "3 for 2" on a product.
    pub fn three_for_two(product: Product) -> Self {
        Offer::ThreeForTwo(ThreeForTwo::new(product))
    }

    /// "2 for `bundle_price`" on a product.
    ///
    /// # Errors
    ///
    /// See [`TwoForPrice::new`].
    pub fn two_for_price(product: Product, bundle_price: Price) -> Result<Self, OfferError> {
        TwoForPrice::new(product, bundle_price).map(Offer::TwoForPrice)
    }

    /// "3 for `bundle_price`" across a set of products, discounting the cheapest units.
    ///
    /// # Errors
    ///
    /// See [`CheapestFromSetForPrice::new`].
    pub fn three_from_set_for_price(
        products: impl Into<Vec<Product>>,
        bundle_price: Price,
        category: impl Into<String>,
    ) -> Result<Self, OfferError> {
        CheapestFromSetForPrice::new(products, 3, bundle_price, category)
            .map(Offer::CheapestFromSetForPrice)
    }
}

impl OfferRule for Offer {
    fn evaluate<'a>(&'a self, quantities: &QuantityTally) -> Option<OfferEvaluation<'a>> {
        match self {
            Offer::ThreeForTwo(three_for_two) => three_for_two.evaluate(quantities),
            Offer::TwoForPrice(two_for_price) => two_for_price.evaluate(quantities),
            Offer::CheapestFromSetForPrice(cheapest_from_set) => {
                cheapest_from_set.evaluate(quantities)
            }
        }
    }

    fn description(&self, currency: &Currency) -> String {
        match self {
            Offer::ThreeForTwo(three_for_two) => three_for_two.description(currency),
            Offer::TwoForPrice(two_for_price) => two_for_price.description(currency),
            Offer::CheapestFromSetForPrice(cheapest_from_set) => {
                cheapest_from_set.description(currency)
            }
        }
    }
}

impl From<ThreeForTwo> for Offer {
    fn from(offer: ThreeForTwo) -> Self {
        Offer::ThreeForTwo(offer)
    }
}

impl From<TwoForPrice> for Offer {
    fn from(offer: TwoForPrice) -> Self {
        Offer::TwoForPrice(offer)
    }
}

impl From<CheapestFromSetForPrice> for Offer {
    fn from(offer: CheapestFromSetForPrice) -> Self {
        Offer::CheapestFromSetForPrice(offer)
    }
}

/// Number of whole units in a tallied quantity; any fractional part is ignored.
pub(crate) fn whole_units(quantity: Decimal) -> Decimal {
    quantity.trunc().max(Decimal::ZERO)
}

/// Complete bundles in `quantity` at `size` per bundle, and the units they consume.
///
/// Returns `None` if not even one complete bundle is present.
pub(crate) fn complete_bundles(quantity: Decimal, size: u64) -> Option<(Decimal, Decimal)> {
    let size = Decimal::from(size.max(1));
    let units = whole_units(quantity);
    let bundled = units.checked_sub(units.checked_rem(size)?)?;
    let bundles = bundled.checked_div(size)?;

    (bundles > Decimal::ZERO).then_some((bundles, bundled))
}
