//! Durable cart records

use rustc_hash::FxHashSet;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, LineItem},
    products::ProductId,
};

/// Serialized cart payload. The total is derived state and never stored.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartRecord {
    pub currency: String,
    pub items: Vec<LineRecord>,
}

/// One serialized cart line; the price snapshot is kept in minor units.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LineRecord {
    pub product_id: i32,
    pub name: String,
    pub price_minor: i64,
    pub quantity: u32,
}

impl CartRecord {
    pub(crate) fn from_cart(cart: &Cart) -> Self {
        CartRecord {
            currency: cart.currency().iso_alpha_code.to_string(),
            items: cart
                .iter()
                .map(|line| LineRecord {
                    product_id: line.product_id().0,
                    name: line.name().to_string(),
                    price_minor: line.price().to_minor_units(),
                    quantity: line.quantity(),
                })
                .collect(),
        }
    }

    /// Rebuild a cart from this record.
    ///
    /// Returns `None` when the record violates cart invariants: an unknown
    /// currency code, a currency other than the storefront's, a zero
    /// quantity, or a duplicate product id. Callers treat `None` as a
    /// corrupt slot.
    pub(crate) fn into_cart(self, expected: &'static Currency) -> Option<Cart> {
        let currency = iso::find(&self.currency)?;

        if currency != expected {
            return None;
        }

        let mut seen = FxHashSet::default();
        let mut lines = Vec::with_capacity(self.items.len());

        for item in self.items {
            if item.quantity == 0 || !seen.insert(item.product_id) {
                return None;
            }

            lines.push(LineItem::from_stored(
                ProductId(item.product_id),
                item.name,
                Money::from_minor(item.price_minor, currency),
                item.quantity,
            ));
        }

        Some(Cart::with_lines(lines, currency))
    }
}
