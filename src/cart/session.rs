//! Cart session

use crate::{
    cart::{Cart, CartError},
    products::{Product, ProductId},
    storage::{CartStorage, StorageSlot},
};

/// A cart store composed with its persistence adapter.
///
/// Every successful mutation is followed by a synchronous full-state sync,
/// so a reload resumes from the last mutation that completed. Sync failures
/// never surface here; the adapter degrades the cart to in-memory for the
/// session.
#[derive(Debug)]
pub struct CartSession<S> {
    cart: Cart,
    storage: CartStorage<S>,
}

impl<S: StorageSlot> CartSession<S> {
    /// Open a session, loading any persisted cart. A missing, unreadable,
    /// or corrupt slot starts the session with an empty cart.
    pub fn open(storage: CartStorage<S>) -> Self {
        let cart = storage.load();

        CartSession { cart, storage }
    }

    /// Read access to the underlying cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a product snapshot, then sync.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from the store; nothing is synced on error.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        self.cart.add_item(product, quantity)?;
        self.storage.save(&self.cart);

        Ok(())
    }

    /// Set a line's quantity, then sync.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from the store; nothing is synced on error.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        self.cart.update_quantity(id, quantity)?;
        self.storage.save(&self.cart);

        Ok(())
    }

    /// Remove a line, then sync.
    pub fn remove_item(&mut self, id: ProductId) {
        self.cart.remove_item(id);
        self.storage.save(&self.cart);
    }

    /// Empty the cart, then sync.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.storage.save(&self.cart);
    }

    /// Tear the session down, handing the adapter back; used to simulate a
    /// reload.
    #[must_use]
    pub fn into_storage(self) -> CartStorage<S> {
        self.storage
    }
}
