//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Product fixtures in file order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog id
    pub id: i32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "149.00 USD")
    pub price: String,

    /// Product image, if any
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            price,
            image_url: fixture.image_url,
        })
    }
}

/// Parse a price string (e.g., "149.00 USD") into money
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = iso::find(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}
