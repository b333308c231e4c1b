//! Cheapest from Set for Price
//!
//! Mix-and-match bundles drawn from a set of products (e.g. "any 3 ales for £6"). Every unit of
//! every listed product in the cart is flattened into one list ordered by unit price, and the
//! cheapest units are the ones put into bundles. Units left over after the last complete bundle
//! are charged in full.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use smallvec::SmallVec;

use crate::{
    offers::{MatchedRun, OfferError, OfferEvaluation, OfferRule, complete_bundles, whole_units},
    prices::{Price, format_price},
    products::Product,
    quantities::QuantityTally,
};

/// A "cheapest N from a set for a fixed price" offer
#[derive(Debug, Clone)]
pub struct CheapestFromSetForPrice {
    products: Vec<Product>,
    size: u64,
    bundle_price: Price,
    category: String,
}

impl CheapestFromSetForPrice {
    /// Create a new set offer bundling `size` units for `bundle_price`.
    ///
    /// `category` names the set in the offer description (e.g. "ales").
    ///
    /// # Errors
    ///
    /// - [`OfferError::EmptyBundle`]: `size` is zero.
    /// - [`OfferError::NoProducts`]: `products` is empty.
    /// - [`OfferError::DuplicateProduct`]: a product name appears more than once.
    pub fn new(
        products: impl Into<Vec<Product>>,
        size: u64,
        bundle_price: Price,
        category: impl Into<String>,
    ) -> Result<Self, OfferError> {
        let products = products.into();
        let category = category.into();

        if size == 0 {
            return Err(OfferError::EmptyBundle(category));
        }

        if products.is_empty() {
            return Err(OfferError::NoProducts(category));
        }

        for (idx, product) in products.iter().enumerate() {
            if products
                .iter()
                .take(idx)
                .any(|earlier| earlier.name() == product.name())
            {
                return Err(OfferError::DuplicateProduct {
                    category,
                    product: product.name().to_string(),
                });
            }
        }

        Ok(Self {
            products,
            size,
            bundle_price,
            category,
        })
    }

    /// Return the eligible products, in configured order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Return the bundle size
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Return the price paid for a complete bundle
    pub fn bundle_price(&self) -> Price {
        self.bundle_price
    }

    /// Return the category label
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units of each listed product present in the cart, cheapest first.
    ///
    /// Products with equal prices keep their configured order.
    fn units_by_price<'a>(
        &'a self,
        quantities: &QuantityTally,
    ) -> SmallVec<[MatchedRun<'a>; 4]> {
        let mut runs: SmallVec<[MatchedRun<'a>; 4]> = self
            .products
            .iter()
            .filter_map(|product| {
                let units = whole_units(*quantities.get(product.name())?);

                (units > Decimal::ZERO).then_some(MatchedRun { product, units })
            })
            .collect();

        // Stable, so equal prices stay in configured order.
        runs.sort_by_key(|run| run.product.price());

        runs
    }
}

impl OfferRule for CheapestFromSetForPrice {
    fn evaluate<'a>(&'a self, quantities: &QuantityTally) -> Option<OfferEvaluation<'a>> {
        let runs = self.units_by_price(quantities);
        let eligible_units = runs
            .iter()
            .try_fold(Decimal::ZERO, |total, run| total.checked_add(run.units))?;

        let (bundles, mut remaining) = complete_bundles(eligible_units, self.size)?;
        let mut matched: SmallVec<[MatchedRun<'a>; 4]> = SmallVec::new();

        for run in runs {
            if remaining.is_zero() {
                break;
            }

            let units = run.units.min(remaining);
            remaining = remaining.checked_sub(units)?;

            matched.push(MatchedRun {
                product: run.product,
                units,
            });
        }

        let full_price = matched.iter().try_fold(Price::ZERO, |total, run| {
            total.checked_add(run.product.price().checked_mul(run.units)?)
        })?;

        Some(OfferEvaluation {
            matched,
            discount: full_price.checked_sub(self.bundle_price.checked_mul(bundles)?)?,
        })
    }

    fn description(&self, currency: &Currency) -> String {
        format!(
            "{} {} for {}",
            self.category,
            self.size,
            format_price(self.bundle_price, currency)
        )
    }
}
