//! Durable cart storage

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::Cart;

mod records;

/// Key under which the cart payload lives in the durable slot.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors from the platform key-value slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The slot is disabled or otherwise unreachable.
    #[error("storage slot unavailable: {0}")]
    Unavailable(String),

    /// The slot refused the write for lack of space.
    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// Per-browser durable key-value slot (the platform boundary).
///
/// Writes are full-value overwrites; the storage layer never merges, so a
/// later write always wins.
pub trait StorageSlot {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the slot cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the slot cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory slot for tests and storage-less sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: FxHashMap<String, String>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with a raw value; lets tests plant corrupt payloads.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slot = Self::new();
        slot.values.insert(key.to_string(), value.to_string());
        slot
    }

    /// Peek at the raw stored value under `key`, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl StorageSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persistence adapter between the cart store and a durable slot.
///
/// Both directions are fail-open: a missing, unreadable, or corrupt slot
/// loads as an empty cart, and failed writes leave the cart in-memory for
/// the session. Failures are logged and never reach the user — cart data is
/// not worth blocking the storefront over.
#[derive(Debug)]
pub struct CartStorage<S> {
    slot: S,
    currency: &'static Currency,
}

impl<S: StorageSlot> CartStorage<S> {
    /// Create an adapter over a slot for a storefront currency.
    pub fn new(slot: S, currency: &'static Currency) -> Self {
        CartStorage { slot, currency }
    }

    /// Load the persisted cart, or an empty one when the slot is missing,
    /// unreadable, or corrupt.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.slot.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(self.currency),
            Err(error) => {
                warn!(%error, "cart load failed; starting empty");
                return Cart::new(self.currency);
            }
        };

        match serde_json::from_str::<records::CartRecord>(&raw) {
            Ok(record) => record.into_cart(self.currency).unwrap_or_else(|| {
                warn!("persisted cart violates invariants; starting empty");
                Cart::new(self.currency)
            }),
            Err(error) => {
                warn!(%error, "persisted cart is unreadable; starting empty");
                Cart::new(self.currency)
            }
        }
    }

    /// Persist the cart as a full-state overwrite (last writer wins).
    /// Failures are swallowed; the cart degrades to in-memory.
    pub fn save(&mut self, cart: &Cart) {
        let record = records::CartRecord::from_cart(cart);

        let payload = match serde_json::to_string(&record) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "cart serialization failed; skipping sync");
                return;
            }
        };

        match self.slot.set(CART_STORAGE_KEY, &payload) {
            Ok(()) => debug!(lines = cart.len(), "cart synced"),
            Err(error) => warn!(%error, "cart sync failed; cart is in-memory only"),
        }
    }

    /// Get the storefront currency this adapter loads carts in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Borrow the underlying slot.
    #[must_use]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Tear the adapter down, handing the slot back.
    #[must_use]
    pub fn into_slot(self) -> S {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::products::{Product, ProductId};

    use super::*;

    /// Slot that fails every operation; models disabled browser storage.
    #[derive(Debug, Default)]
    struct BrokenSlot;

    impl StorageSlot for BrokenSlot {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }
    }

    fn bookshelf() -> Product {
        Product {
            id: ProductId(9),
            name: "Modular Bookshelf".to_string(),
            price: Money::from_minor(29_900, USD),
            image_url: None,
        }
    }

    #[test]
    fn load_from_empty_slot_returns_empty_cart() {
        let storage = CartStorage::new(MemorySlot::new(), USD);

        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let mut storage = CartStorage::new(MemorySlot::new(), USD);

        let mut cart = Cart::new(USD);
        cart.add_item(&bookshelf(), 2)?;
        storage.save(&cart);

        let loaded = storage.load();
        let line = loaded.line(ProductId(9)).expect("expected line");

        assert_eq!(line.quantity(), 2);
        assert_eq!(line.price(), &Money::from_minor(29_900, USD));

        Ok(())
    }

    #[test]
    fn corrupt_payload_loads_as_empty_cart() {
        let slot = MemorySlot::with_value(CART_STORAGE_KEY, "{not json at all");
        let storage = CartStorage::new(slot, USD);

        assert!(storage.load().is_empty());
    }

    #[test]
    fn invariant_breaking_payload_loads_as_empty_cart() {
        let payload = r#"{"currency":"USD","items":[{"product_id":9,"name":"Modular Bookshelf","price_minor":29900,"quantity":0}]}"#;
        let slot = MemorySlot::with_value(CART_STORAGE_KEY, payload);
        let storage = CartStorage::new(slot, USD);

        assert!(storage.load().is_empty());
    }

    #[test]
    fn unreadable_slot_loads_as_empty_cart() {
        let storage = CartStorage::new(BrokenSlot, USD);

        assert!(storage.load().is_empty());
    }

    #[test]
    fn failed_save_is_swallowed() -> TestResult {
        let mut storage = CartStorage::new(BrokenSlot, USD);

        let mut cart = Cart::new(USD);
        cart.add_item(&bookshelf(), 1)?;

        // Must not panic or surface the quota error.
        storage.save(&cart);

        Ok(())
    }

    #[test]
    fn save_overwrites_prior_value_unconditionally() -> TestResult {
        let mut storage = CartStorage::new(MemorySlot::new(), USD);

        let mut cart = Cart::new(USD);
        cart.add_item(&bookshelf(), 1)?;
        storage.save(&cart);

        cart.clear();
        storage.save(&cart);

        assert!(storage.load().is_empty());

        Ok(())
    }
}
