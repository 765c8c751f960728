//! Items

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while constructing an item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The item price was below zero (item name, price).
    #[error("item {0:?} has negative price {1}")]
    NegativePrice(String, Decimal),
}

/// A named, priced entry placed into a cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    name: String,
    price: Decimal,
}

impl Item {
    /// Creates a new item with the given name and price.
    ///
    /// The name is taken as-is; uniqueness and non-emptiness are left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NegativePrice`] if `price` is below zero.
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self, ItemError> {
        let name = name.into();

        if price < Decimal::ZERO {
            return Err(ItemError::NegativePrice(name, price));
        }

        Ok(Self { name, price })
    }

    /// Returns the name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of the item
    pub fn price(&self) -> Decimal {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_item_exposes_name_and_price() -> TestResult {
        let item = Item::new("Laptop", dec!(1200.00))?;

        assert_eq!(item.name(), "Laptop");
        assert_eq!(item.price(), dec!(1200.00));

        Ok(())
    }

    #[test]
    fn new_item_rejects_negative_price() {
        let result = Item::new("Refund", dec!(-0.01));

        assert_eq!(
            result,
            Err(ItemError::NegativePrice("Refund".to_string(), dec!(-0.01)))
        );
    }

    #[test]
    fn new_item_accepts_zero_and_negative_zero() -> TestResult {
        let free = Item::new("Sticker", Decimal::ZERO)?;
        let negative_zero = Item::new("Sticker", Decimal::ZERO * dec!(-1))?;

        assert_eq!(free.price(), Decimal::ZERO);
        assert!(negative_zero.price().is_zero());

        Ok(())
    }

    #[test]
    fn new_item_allows_empty_name() -> TestResult {
        let item = Item::new("", dec!(1.00))?;

        assert!(item.name().is_empty());

        Ok(())
    }
}
