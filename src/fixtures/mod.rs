//! Fixtures
//!
//! Catalogue and offer sets described in YAML, loaded from `<base>/products/<set>.yml` and
//! `<base>/offers/<set>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    catalogue::Catalogue,
    fixtures::{offers::OffersFixture, products::ProductsFixture},
    offers::{Offer, OfferError},
    products::{Product, ProductError},
};

pub mod offers;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products or offers
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Product rejected
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Offer rejected
    #[error(transparent)]
    Offer(#[from] OfferError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Fixture key -> product
    products: FxHashMap<String, Product>,

    /// Offers in the order they were loaded
    offers: Vec<Offer>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            offers: Vec::new(),
            currency: None,
        }
    }

    /// Load a complete fixture set (products and offers with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_offers(name)?;

        Ok(fixture)
    }

    /// Build a fixture from YAML documents rather than files
    ///
    /// # Errors
    ///
    /// Returns an error if either document cannot be parsed or contains invalid data.
    pub fn from_yaml(products_yaml: &str, offers_yaml: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .add_products(products_yaml)?
            .add_offers(offers_yaml)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.add_products(&contents)
    }

    /// Load offers from a YAML fixture file
    ///
    /// Products must already be loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if an offer is invalid.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("offers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.add_offers(&contents)
    }

    fn add_products(&mut self, yaml: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

        for (key, product_fixture) in fixture.products {
            let (product, currency) = product_fixture.try_into_product(&key)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.products.insert(key, product);
        }

        Ok(self)
    }

    fn add_offers(&mut self, yaml: &str) -> Result<&mut Self, FixtureError> {
        let currency = self.currency()?;
        let fixture: OffersFixture = serde_norway::from_str(yaml)?;

        for offer_fixture in fixture.offers {
            let offer = offer_fixture.try_into_offer(currency, |key| self.products.get(key))?;

            self.offers.push(offer);
        }

        Ok(self)
    }

    /// Get a product by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get all offers, in evaluation order
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Build a catalogue from the loaded products
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalogue(&self) -> Result<Catalogue, FixtureError> {
        Ok(Catalogue::with_products(
            self.products.values().cloned(),
            self.currency()?,
        ))
    }

    /// Consume the fixture, returning its catalogue and offers
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn into_parts(self) -> Result<(Catalogue, Vec<Offer>), FixtureError> {
        let currency = self.currency()?;

        Ok((
            Catalogue::with_products(self.products.into_values(), currency),
            self.offers,
        ))
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
