//! Supermarket Pricing
//!
//! A supermarket checkout pricing engine: a product catalogue, multi-buy offers, and a cart that
//! totals items sold by unit or by weight and applies every eligible offer. Amounts are exact
//! decimals and only ever truncated for display.

pub mod cart;
pub mod catalogue;
pub mod fixtures;
pub mod offers;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod quantities;
pub mod receipt;
