//! Cart store

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{TotalError, cart_total, item_count},
    products::{Product, ProductId},
};

pub mod line;
pub mod session;

pub use line::LineItem;
pub use session::CartSession;

/// Errors related to cart mutation or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product's currency differs from the cart currency.
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// No line exists for the given product.
    #[error("No cart line for product {0}")]
    LineNotFound(ProductId),

    /// Quantities below 1 are rejected; removing the line is explicit.
    #[error("Quantity for product {0} cannot drop below 1; use remove_item")]
    QuantityFloor(ProductId),
}

/// Single source of truth for what the user intends to purchase.
///
/// Lines are kept in insertion order, keyed by unique product id; adding a
/// product already in the cart merges quantities instead of creating a
/// duplicate line. Totals are derived on every read and never stored. The
/// store is an explicitly constructed value, injected wherever counts or
/// totals are displayed; nothing mutates its lines except the operations
/// here.
#[derive(Debug)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from already-validated lines. Callers guarantee a
    /// single currency, unique product ids, and quantities of at least 1.
    pub(crate) fn with_lines(items: Vec<LineItem>, currency: &'static Currency) -> Self {
        Cart { items, currency }
    }

    /// Add a product snapshot to the cart.
    ///
    /// An existing line for the same product keeps its add-time price and
    /// gains `quantity`; otherwise a new line snapshots the product's name
    /// and price. A zero quantity is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CurrencyMismatch` if the product's currency
    /// differs from the cart's; the cart is unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id() == product.id)
        {
            existing.add_quantity(quantity);
        } else {
            self.items.push(LineItem::new(product, quantity));
        }

        Ok(())
    }

    /// Set the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - `CartError::QuantityFloor` for a zero quantity; dropping a line to
    ///   zero must go through [`Cart::remove_item`] so deletion is never
    ///   accidental.
    /// - `CartError::LineNotFound` when no line exists for `id`.
    ///
    /// The cart is unchanged on any error.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::QuantityFloor(id));
        }

        let line = self
            .items
            .iter_mut()
            .find(|line| line.product_id() == id)
            .ok_or(CartError::LineNotFound(id))?;

        line.set_quantity(quantity);

        Ok(())
    }

    /// Remove the line for the given product; no-op if absent.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|line| line.product_id() != id);
    }

    /// Empty the cart; used after a settled checkout or a manual clear.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Calculate the cart total, recomputed on every read.
    ///
    /// # Errors
    ///
    /// Returns a `TotalError` if there was a money arithmetic or currency
    /// mismatch error.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        cart_total(&self.items)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        item_count(&self.items)
    }

    /// Get the line for the given product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.product_id() == id)
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn product(id: i32, name: &str, price_minor: i64) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            price: Money::from_minor(price_minor, USD),
            image_url: None,
        }
    }

    #[test]
    fn new_cart_is_empty_with_zero_total() -> TestResult {
        let cart = Cart::new(USD);

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn add_item_creates_line_with_snapshot() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 1)?;

        let line = cart.line(ProductId(7)).expect("expected line");
        assert_eq!(line.name(), "Ambient Desk Lamp");
        assert_eq!(line.quantity(), 1);
        assert_eq!(cart.total()?, Money::from_minor(7900, USD));

        Ok(())
    }

    #[test]
    fn add_item_merges_quantity_and_keeps_first_price() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 1)?;

        // Catalog price changed between adds; the first snapshot wins.
        cart.add_item(&product(7, "Ambient Desk Lamp", 9900), 2)?;

        assert_eq!(cart.len(), 1);
        let line = cart.line(ProductId(7)).expect("expected line");
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.price(), &Money::from_minor(7900, USD));
        assert_eq!(cart.total()?, Money::from_minor(23_700, USD));

        Ok(())
    }

    #[test]
    fn add_item_with_zero_quantity_is_noop() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 0)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn add_item_currency_mismatch_errors() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 1);

        match result {
            Err(CartError::CurrencyMismatch(id, product_currency, cart_currency)) => {
                assert_eq!(id, ProductId(7));
                assert_eq!(product_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_sets_new_value() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 1)?;

        cart.update_quantity(ProductId(7), 5)?;

        let line = cart.line(ProductId(7)).expect("expected line");
        assert_eq!(line.quantity(), 5);

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_is_rejected_without_mutation() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 3)?;

        let err = cart.update_quantity(ProductId(7), 0).err();

        assert_eq!(err, Some(CartError::QuantityFloor(ProductId(7))));
        let line = cart.line(ProductId(7)).expect("expected line");
        assert_eq!(line.quantity(), 3);

        Ok(())
    }

    #[test]
    fn update_quantity_for_missing_line_errors() {
        let mut cart = Cart::new(USD);

        let err = cart.update_quantity(ProductId(42), 2).err();

        assert_eq!(err, Some(CartError::LineNotFound(ProductId(42))));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_item_deletes_line_and_tolerates_absence() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(&product(7, "Ambient Desk Lamp", 7900), 1)?;

        cart.remove_item(ProductId(7));
        cart.remove_item(ProductId(7));

        assert!(cart.is_empty());
        assert_eq!(cart.total()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(&product(1, "Nordic Wood Chair", 12_900), 2)?;
        cart.add_item(&product(2, "Milano Coffee Table", 34_900), 1)?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);

        Ok(())
    }

    #[test]
    fn iter_returns_lines_in_insertion_order() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(&product(2, "Milano Coffee Table", 34_900), 1)?;
        cart.add_item(&product(1, "Nordic Wood Chair", 12_900), 1)?;

        let ids: Vec<ProductId> = cart.iter().map(LineItem::product_id).collect();

        assert_eq!(ids, vec![ProductId(2), ProductId(1)]);

        Ok(())
    }

    #[test]
    fn count_and_total_track_mixed_lines() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(&product(1, "Nordic Wood Chair", 12_900), 2)?;
        cart.add_item(&product(2, "Plush Throw Pillow", 3900), 4)?;

        assert_eq!(cart.count(), 6);
        assert_eq!(cart.total()?, Money::from_minor(41_400, USD));

        Ok(())
    }
}
