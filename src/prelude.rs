//! Supermarket Pricing prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddedLine, AppliedOffer, Cart, CartError, QuantityError},
    catalogue::Catalogue,
    fixtures::{Fixture, FixtureError},
    offers::{
        CheapestFromSetForPrice, Offer, OfferError, OfferEvaluation, OfferRule, ThreeForTwo,
        TwoForPrice,
    },
    prices::{Price, format_price},
    products::{PricingUnit, Product, ProductError},
    quantities::{Quantity, Weight},
    receipt::{Receipt, ReceiptError},
};
