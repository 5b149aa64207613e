//! Cart line items

use rusty_money::{Money, iso::Currency};

use crate::products::{Product, ProductId};

/// One cart entry: a product snapshot and the quantity the user intends to
/// purchase.
///
/// The name and price are denormalized from the product at add time so the
/// line stays renderable without a live catalog lookup. Quantity is always
/// at least 1; a line that should vanish is removed, never zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product_id: ProductId,
    name: String,
    price: Money<'static, Currency>,
    quantity: u32,
}

impl LineItem {
    /// Snapshot a product into a new line. Callers guarantee `quantity >= 1`.
    pub(crate) fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Rebuild a line from persisted parts. Callers guarantee `quantity >= 1`.
    pub(crate) fn from_stored(
        product_id: ProductId,
        name: String,
        price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name,
            price,
            quantity,
        }
    }

    /// Returns the id of the product this line snapshots.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the product name captured at add time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price captured at add time.
    #[must_use]
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Returns the quantity of this line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    /// Unit price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money<'static, Currency> {
        let minor = self
            .price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity));

        Money::from_minor(minor, self.price.currency())
    }
}
