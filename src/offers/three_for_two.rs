//! Three for Two
//!
//! Buy three of a product, pay for two. Every complete group of three takes one unit's price
//! off; leftover units are charged in full.

use rusty_money::iso::Currency;
use smallvec::smallvec;

use crate::{
    offers::{MatchedRun, OfferEvaluation, OfferRule, complete_bundles},
    products::Product,
    quantities::QuantityTally,
};

const BUNDLE_SIZE: u64 = 3;

/// A "3 for 2" offer on a single product
#[derive(Debug, Clone)]
pub struct ThreeForTwo {
    product: Product,
}

impl ThreeForTwo {
    /// Create a new "3 for 2" offer.
    pub fn new(product: Product) -> Self {
        Self { product }
    }

    /// Return the product
    pub fn product(&self) -> &Product {
        &self.product
    }
}

impl OfferRule for ThreeForTwo {
    fn evaluate<'a>(&'a self, quantities: &QuantityTally) -> Option<OfferEvaluation<'a>> {
        let quantity = quantities.get(self.product.name()).copied()?;
        let (bundles, units) = complete_bundles(quantity, BUNDLE_SIZE)?;

        Some(OfferEvaluation {
            matched: smallvec![MatchedRun {
                product: &self.product,
                units,
            }],
            discount: self.product.price().checked_mul(bundles)?,
        })
    }

    fn description(&self, _currency: &Currency) -> String {
        format!("{} 3 for 2", self.product.name())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{offers::test_support::tally, prices::Price};

    use super::*;

    fn offer() -> Result<ThreeForTwo, crate::products::ProductError> {
        Ok(ThreeForTwo::new(Product::per_item(
            "beans",
            Price::new(dec!(1.00)),
        )?))
    }

    #[test]
    fn five_units_discount_one() -> TestResult {
        let offer = offer()?;

        let evaluation = offer.evaluate(&tally(&[("beans", dec!(5))]));

        let Some(evaluation) = evaluation else {
            panic!("expected offer to be eligible");
        };

        assert_eq!(evaluation.discount, Price::new(dec!(1.00)));
        assert_eq!(evaluation.matched_units(), dec!(3));

        Ok(())
    }

    #[test]
    fn exactly_three_is_eligible() -> TestResult {
        let offer = offer()?;

        assert!(offer.is_eligible(&tally(&[("beans", dec!(3))])));
        assert_eq!(
            offer.check_and_apply(&tally(&[("beans", dec!(3))])),
            Price::new(dec!(1.00))
        );

        Ok(())
    }

    #[test]
    fn two_units_are_not_eligible() -> TestResult {
        let offer = offer()?;

        assert!(!offer.is_eligible(&tally(&[("beans", dec!(2))])));
        assert_eq!(offer.check_and_apply(&tally(&[("beans", dec!(2))])), Price::ZERO);

        Ok(())
    }

    #[test]
    fn absent_product_is_not_eligible() -> TestResult {
        let offer = offer()?;

        assert!(!offer.is_eligible(&tally(&[("coke", dec!(9))])));

        Ok(())
    }

    #[test]
    fn every_complete_group_is_discounted() -> TestResult {
        let offer = offer()?;

        assert_eq!(
            offer.check_and_apply(&tally(&[("beans", dec!(9))])),
            Price::new(dec!(3.00))
        );

        Ok(())
    }

    #[test]
    fn adding_more_never_loses_the_discount() -> TestResult {
        let offer = offer()?;

        // u64::MAX, then three more
        let before = offer.check_and_apply(&tally(&[("beans", dec!(18446744073709551615))]));
        let after = offer.check_and_apply(&tally(&[("beans", dec!(18446744073709551618))]));

        assert_eq!(before, Price::new(dec!(6148914691236517205)));
        assert_eq!(after, Price::new(dec!(6148914691236517206)));

        Ok(())
    }

    #[test]
    fn description_names_product() -> TestResult {
        assert_eq!(offer()?.description(GBP), "beans 3 for 2");

        Ok(())
    }
}
