//! Prices

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::LineItem;

/// Errors that can occur while totalling cart lines.
#[derive(Debug, Error, PartialEq)]
pub enum TotalError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoLines,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total of a list of cart lines, quantities included.
///
/// # Errors
///
/// - [`TotalError::NoLines`]: No lines were provided, so currency could not be determined.
/// - [`TotalError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn cart_total(lines: &[LineItem]) -> Result<Money<'static, Currency>, TotalError> {
    let first = lines.first().ok_or(TotalError::NoLines)?;

    let total = lines.iter().try_fold(
        Money::from_minor(0, first.price().currency()),
        |acc, line| acc.add(line.line_total()),
    )?;

    Ok(total)
}

/// Sum of quantities across all lines; drives the header badge count.
#[must_use]
pub fn item_count(lines: &[LineItem]) -> u32 {
    lines.iter().map(LineItem::quantity).sum()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::products::{Product, ProductId};

    use super::*;

    fn line(id: i32, price_minor: i64, quantity: u32) -> LineItem {
        let product = Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            price: Money::from_minor(price_minor, USD),
            image_url: None,
        };

        LineItem::new(&product, quantity)
    }

    #[test]
    fn test_cart_total() -> TestResult {
        let lines = [line(1, 100, 2), line(2, 250, 1)];

        assert_eq!(cart_total(&lines)?, Money::from_minor(450, USD));

        Ok(())
    }

    #[test]
    fn test_cart_total_empty() {
        let lines: [LineItem; 0] = [];

        assert!(matches!(cart_total(&lines), Err(TotalError::NoLines)));
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let lines = [line(1, 100, 3), line(2, 250, 4)];

        assert_eq!(item_count(&lines), 7);
    }
}
