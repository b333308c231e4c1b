//! Offer Fixtures

use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    offers::{CheapestFromSetForPrice, Offer},
    prices::Price,
    products::Product,
};

const DEFAULT_SET_SIZE: u64 = 3;

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Offers, in evaluation order
    pub offers: Vec<OfferFixture>,
}

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferFixture {
    /// "3 for 2" on a single product
    ThreeForTwo {
        /// Product key
        product: String,
    },

    /// "2 for a fixed price" on a single product
    TwoForPrice {
        /// Product key
        product: String,

        /// Price paid for a pair (e.g., "1.00 GBP")
        price: String,
    },

    /// "N for a fixed price" across a set, cheapest units first
    CheapestFromSetForPrice {
        /// Product keys
        products: Vec<String>,

        /// Bundle size
        #[serde(default = "default_set_size")]
        size: u64,

        /// Price paid for a bundle (e.g., "6.00 GBP")
        price: String,

        /// Label used in the offer description
        category: String,
    },
}

fn default_set_size() -> u64 {
    DEFAULT_SET_SIZE
}

impl OfferFixture {
    /// Convert to an `Offer`, resolving product keys with `lookup`
    ///
    /// # Errors
    ///
    /// Returns an error if a product is unknown, a price cannot be parsed or is in a different
    /// currency, or the offer itself is rejected.
    pub fn try_into_offer<'p>(
        self,
        currency: &'static Currency,
        lookup: impl Fn(&str) -> Option<&'p Product>,
    ) -> Result<Offer, FixtureError> {
        let resolve = |key: &str| {
            lookup(key)
                .cloned()
                .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
        };

        match self {
            OfferFixture::ThreeForTwo { product } => {
                Ok(Offer::three_for_two(resolve(product.as_str())?))
            }
            OfferFixture::TwoForPrice { product, price } => Ok(Offer::two_for_price(
                resolve(product.as_str())?,
                offer_price(&price, currency)?,
            )?),
            OfferFixture::CheapestFromSetForPrice {
                products,
                size,
                price,
                category,
            } => {
                let products = products
                    .iter()
                    .map(String::as_str)
                    .map(&resolve)
                    .collect::<Result<Vec<_>, _>>()?;

                let offer = CheapestFromSetForPrice::new(
                    products,
                    size,
                    offer_price(&price, currency)?,
                    category,
                )?;

                Ok(offer.into())
            }
        }
    }
}

/// Parse an offer price, which must be in the catalogue currency.
fn offer_price(s: &str, currency: &'static Currency) -> Result<Price, FixtureError> {
    let (price, offer_currency) = parse_price(s)?;

    if offer_currency != currency {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            offer_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::offers::{OfferError, OfferRule};

    use super::*;

    fn coke() -> Result<Product, crate::products::ProductError> {
        Product::per_item("coke", Price::new(dec!(0.70)))
    }

    #[test]
    fn two_for_price_resolves_product_and_price() -> TestResult {
        let coke = coke()?;
        let fixture: OfferFixture =
            serde_norway::from_str("type: two_for_price\nproduct: coke\nprice: 1.00 GBP\n")?;

        let offer = fixture.try_into_offer(GBP, |key| (key == "coke").then_some(&coke))?;

        assert_eq!(offer.description(GBP), "coke 2 for £1.00");

        Ok(())
    }

    #[test]
    fn set_size_defaults_to_three() -> TestResult {
        let coke = coke()?;
        let fixture: OfferFixture = serde_norway::from_str(
            "type: cheapest_from_set_for_price\nproducts: [coke]\nprice: 1.50 GBP\ncategory: drinks\n",
        )?;

        let Offer::CheapestFromSetForPrice(offer) =
            fixture.try_into_offer(GBP, |key| (key == "coke").then_some(&coke))?
        else {
            panic!("expected a set offer");
        };

        assert_eq!(offer.size(), 3);
        assert_eq!(offer.category(), "drinks");

        Ok(())
    }

    #[test]
    fn unknown_product_is_reported() -> TestResult {
        let fixture: OfferFixture = serde_norway::from_str("type: three_for_two\nproduct: beans\n")?;

        assert!(matches!(
            fixture.try_into_offer(GBP, |_key| None),
            Err(FixtureError::ProductNotFound(key)) if key == "beans"
        ));

        Ok(())
    }

    #[test]
    fn price_in_other_currency_is_rejected() -> TestResult {
        let coke = coke()?;
        let fixture: OfferFixture =
            serde_norway::from_str("type: two_for_price\nproduct: coke\nprice: 1.00 USD\n")?;

        let result = fixture.try_into_offer(GBP, |_key| Some(&coke));

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found))
                if expected == GBP.iso_alpha_code && found == USD.iso_alpha_code
        ));

        Ok(())
    }

    #[test]
    fn offer_validation_errors_are_wrapped() -> TestResult {
        let coke = coke()?;
        let fixture: OfferFixture =
            serde_norway::from_str("type: two_for_price\nproduct: coke\nprice: 1.40 GBP\n")?;

        assert!(matches!(
            fixture.try_into_offer(GBP, |_key| Some(&coke)),
            Err(FixtureError::Offer(OfferError::BundleNotDiscounted { .. }))
        ));

        Ok(())
    }

    #[test]
    fn unknown_offer_type_fails_to_parse() {
        let result: Result<OfferFixture, _> =
            serde_norway::from_str("type: buy_one_get_two\nproduct: coke\n");

        assert!(result.is_err());
    }
}
