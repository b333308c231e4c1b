//! End-to-end checkout tests against the `supermarket` fixture set.
//!
//! Catalogue: beans £0.50, coke £0.70, onions £0.29/kg, oranges £1.99/kg, arbor ale £2.20,
//! kaleidoscope £2.50, butcombe £2.10.
//!
//! Offers, in evaluation order: beans 3 for 2, coke 2 for £1.00, any 3 ales for £6.00.

use rust_decimal_macros::dec;
use testresult::TestResult;

use supermarket_pricing::prelude::*;

fn supermarket() -> Result<(Catalogue, Vec<Offer>), FixtureError> {
    Fixture::from_set("supermarket")?.into_parts()
}

fn plain_receipt(cart: &Cart<'_>) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = Vec::new();
    Receipt::from_cart(cart).write_to(&mut out)?;

    Ok(String::from_utf8(out)?)
}

#[test]
fn receipt_without_offers() -> TestResult {
    let (catalogue, offers) = supermarket()?;
    let mut cart = Cart::new(&catalogue, &offers);

    cart.add_one("beans")?;
    cart.add_one("butcombe")?;
    cart.add_one("coke")?;
    cart.add_product("onions", "1.2777")?;
    cart.add_one("beans")?;

    assert_eq!(cart.total(), Price::new(dec!(4.17)));
    assert!(cart.applied_offers().is_empty());

    assert_eq!(
        plain_receipt(&cart)?,
        "| Beans                |  £0.50 |\n\
         | Butcombe             |  £2.10 |\n\
         | Coke                 |  £0.70 |\n\
         | Onions               |        |\n\
         | 1.277 kg @ £0.29/kg  |  £0.37 |\n\
         | Beans                |  £0.50 |\n\
         | **Total to Pay**     |  £4.17 |\n"
    );

    Ok(())
}

#[test]
fn receipt_with_offers() -> TestResult {
    let (catalogue, offers) = supermarket()?;
    let mut cart = Cart::new(&catalogue, &offers);

    for name in ["beans", "beans", "beans", "coke", "coke"] {
        cart.add_one(name)?;
    }

    cart.add_product("oranges", "0.2")?;

    for name in ["arbor ale", "kaleidoscope", "kaleidoscope", "butcombe"] {
        cart.add_one(name)?;
    }

    assert_eq!(cart.sub_total(), Price::new(dec!(12.59)));
    assert_eq!(cart.savings(), Price::new(dec!(1.70)));
    assert_eq!(cart.total(), Price::new(dec!(10.89)));

    assert_eq!(
        plain_receipt(&cart)?,
        "| Beans                |  £0.50 |\n\
         | Beans                |  £0.50 |\n\
         | Beans                |  £0.50 |\n\
         | Coke                 |  £0.70 |\n\
         | Coke                 |  £0.70 |\n\
         | Oranges              |        |\n\
         | 0.200 kg @ £1.99/kg  |  £0.39 |\n\
         | Arbor ale            |  £2.20 |\n\
         | Kaleidoscope         |  £2.50 |\n\
         | Kaleidoscope         |  £2.50 |\n\
         | Butcombe             |  £2.10 |\n\
         | **Sub-total**        | £12.59 |\n\
         | **Savings**          |        |\n\
         | Beans 3 for 2        | -£0.50 |\n\
         | Coke 2 for £1.00     | -£0.40 |\n\
         | Ales 3 for £6.00     | -£0.80 |\n\
         | **Total savings**    |  £1.70 |\n\
         | **Total to Pay**     | £10.89 |\n"
    );

    Ok(())
}

#[test]
fn quantities_added_in_one_line() -> TestResult {
    let (catalogue, offers) = supermarket()?;
    let mut cart = Cart::new(&catalogue, &offers);

    cart.add_product("beans", "3")?;
    cart.add_product("coke", "2")?;

    let receipt = Receipt::from_cart(&cart);

    assert_eq!(receipt.lines().len(), 2);
    assert_eq!(receipt.sub_total(), Price::new(dec!(2.90)));
    assert_eq!(receipt.savings(), Price::new(dec!(0.90)));
    assert_eq!(receipt.total(), Price::new(dec!(2.00)));

    let mut out = Vec::new();
    receipt.write_to(&mut out)?;
    let output = String::from_utf8(out)?;

    assert!(output.starts_with("| Beans x 3            |  £1.50 |\n"));
    assert!(output.contains("| Coke x 2             |  £1.40 |\n"));

    Ok(())
}

#[test]
fn offers_are_shared_between_carts() -> TestResult {
    let (catalogue, offers) = supermarket()?;

    let mut first = Cart::new(&catalogue, &offers);
    let mut second = Cart::new(&catalogue, &offers);

    first.add_product("beans", "3")?;
    second.add_product("beans", "2")?;

    assert_eq!(first.savings(), Price::new(dec!(0.50)));
    assert_eq!(second.savings(), Price::ZERO);
    assert_eq!(first.savings(), Price::new(dec!(0.50)));

    Ok(())
}

#[test]
fn rejected_items_leave_cart_unchanged() -> TestResult {
    let (catalogue, offers) = supermarket()?;
    let mut cart = Cart::new(&catalogue, &offers);

    cart.add_one("beans")?;

    let unknown = cart.add_one("caviar");
    let fractional = cart.add_product("beans", "1.5");

    assert_eq!(
        unknown.err().map(|err| err.to_string()),
        Some("Unexpected Item in Bagging Area: caviar".to_string())
    );
    assert_eq!(
        fractional.err().map(|err| err.to_string()),
        Some("Product quantity for beans must be specified in integers".to_string())
    );
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), Price::new(dec!(0.50)));

    Ok(())
}

#[test]
fn table_receipt_lists_items_and_totals() -> TestResult {
    let (catalogue, offers) = supermarket()?;
    let mut cart = Cart::new(&catalogue, &offers);

    cart.add_product("kaleidoscope", "2")?;
    cart.add_one("butcombe")?;
    cart.add_product("onions", "0.5")?;

    let mut out = Vec::new();
    Receipt::from_cart(&cart).write_table_to(&mut out)?;
    let output = String::from_utf8(out)?;

    assert!(output.contains("Kaleidoscope"));
    assert!(output.contains("0.500 kg @ £0.29/kg"));
    assert!(output.contains("Ales 3 for £6.00"));
    assert!(output.contains("-£1.10"));
    assert!(output.contains("£6.14"));

    Ok(())
}

#[test]
fn oversized_quantities_are_rejected_or_priced() -> TestResult {
    let (catalogue, offers) = supermarket()?;
    let mut cart = Cart::new(&catalogue, &offers);

    assert!(matches!(
        cart.add_product("oranges", "50000000000000000000000000000"),
        Err(CartError::InvalidQuantity {
            reason: QuantityError::TooLarge,
            ..
        })
    ));
    assert!(cart.is_empty());

    cart.add_product("arbor ale", "18446744073709551615")?;
    cart.add_product("kaleidoscope", "18446744073709551615")?;

    assert_eq!(cart.savings(), Price::new(dec!(12912720851596686130.5)));
    assert_eq!(cart.applied_offers().len(), 1);

    Ok(())
}
