//! Products

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from the product lookup collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product exists for the given id.
    #[error("Product {0} not found")]
    NotFound(ProductId),
}

/// A denormalized snapshot of a catalog record.
///
/// The price is normalized to [`Money`] before it reaches the cart; later
/// price changes in the catalog never affect lines already added.
#[derive(Debug, Clone)]
pub struct Product {
    /// Catalog id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price at lookup time
    pub price: Money<'static, Currency>,

    /// Product image, if any
    pub image_url: Option<String>,
}

/// Product lookup collaborator (the catalog service boundary).
pub trait ProductCatalog {
    /// Resolve a product snapshot by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no product exists for `id`;
    /// the caller must abort the cart mutation that asked for it.
    fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

/// In-memory catalog for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: FxHashMap<ProductId, Product>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, replacing any prior entry for its id.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Check whether a product with the given id is present.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for MemoryCatalog {
    fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
