//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::products::{MemoryCatalog, Product, ProductId};

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

    /// Duplicate product id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Loads product catalogs from YAML fixture files.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: MemoryCatalog,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Fixture {
            base_path: base_path.into(),
            catalog: MemoryCatalog::new(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is
    /// malformed, or if a product id appears twice.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            let product: Product = product_fixture.try_into()?;

            if self.catalog.contains(product.id) {
                return Err(FixtureError::DuplicateProduct(product.id));
            }

            self.catalog.insert(product);
        }

        Ok(self)
    }

    /// The catalog loaded so far.
    #[must_use]
    pub fn catalog(&self) -> &MemoryCatalog {
        &self.catalog
    }

    /// Consume the fixture, handing over the loaded catalog.
    #[must_use]
    pub fn into_catalog(self) -> MemoryCatalog {
        self.catalog
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
