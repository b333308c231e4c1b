//! Catalogue

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;

use crate::products::Product;

/// Read-only lookup of products by name, priced in a single currency.
#[derive(Debug, Clone)]
pub struct Catalogue {
    currency: &'static Currency,
    products: FxHashMap<String, Product>,
}

impl Catalogue {
    /// Create an empty catalogue.
    pub fn new(currency: &'static Currency) -> Self {
        Catalogue {
            currency,
            products: FxHashMap::default(),
        }
    }

    /// Create a catalogue from the given products, keyed by product name.
    ///
    /// A later product with the same name replaces an earlier one.
    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
        currency: &'static Currency,
    ) -> Self {
        let mut catalogue = Catalogue::new(currency);
        catalogue.extend(products);
        catalogue
    }

    /// Add a product, returning any product it replaced.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.name().to_string(), product)
    }

    /// Look up a product by name.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    /// Get the number of products in the catalogue.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over all products, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Get the currency prices are displayed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Extend<Product> for Catalogue {
    fn extend<I: IntoIterator<Item = Product>>(&mut self, iter: I) {
        for product in iter {
            self.insert(product);
        }
    }
}
