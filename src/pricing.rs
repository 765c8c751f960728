//! Prices

use rust_decimal::Decimal;
use thiserror::Error;

use crate::items::Item;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// The sum of the item prices left the representable decimal range.
    #[error("total price overflowed the decimal range")]
    Overflow,
}

/// Calculates the total price of a list of items
///
/// An empty list totals to zero.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the sum does not fit in a [`Decimal`].
pub fn total_price(items: &[Item]) -> Result<Decimal, TotalPriceError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.price())
            .ok_or(TotalPriceError::Overflow)
    })
}
