//! Cart

use std::slice::Iter;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::DiscountStrategy,
    items::Item,
    pricing::{TotalPriceError, total_price},
};

/// Errors raised while pricing a cart with a discount applied.
///
/// The strategy's own error is carried unchanged in [`CartError::Discount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError<E> {
    /// The cart total could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// The discount strategy failed.
    #[error(transparent)]
    Discount(E),
}

/// An ordered collection of items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Create a new cart with the given items, keeping their order.
    pub fn with_items(items: impl Into<Vec<Item>>) -> Self {
        Cart {
            items: items.into(),
        }
    }

    /// Append an item to the cart.
    pub fn add_item(&mut self, item: Item) {
        debug!(name = item.name(), price = %item.price(), "adding item to cart");

        self.items.push(item);
    }

    /// Calculate the total price of the cart.
    ///
    /// Recomputed from the items on every call; an empty cart totals to zero.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the sum does not fit in a [`Decimal`].
    pub fn total_price(&self) -> Result<Decimal, TotalPriceError> {
        total_price(&self.items)
    }

    /// Calculate the total price with `strategy` applied.
    ///
    /// # Errors
    ///
    /// - [`CartError::TotalPrice`]: the cart total could not be calculated.
    /// - [`CartError::Discount`]: the strategy failed; its error is passed through unchanged.
    pub fn discounted_total<S>(&self, strategy: &S) -> Result<Decimal, CartError<S::Error>>
    where
        S: DiscountStrategy + ?Sized,
    {
        let total = self.total_price()?;
        let discounted = strategy.apply(total).map_err(CartError::Discount)?;

        debug!(%total, %discounted, items = self.len(), "applied discount to cart");

        Ok(discounted)
    }

    /// Get the items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> Iter<'_, Item> {
        self.items.iter()
    }

    /// Get the number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Item;
    type IntoIter = Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Item> for Cart {
    fn extend<T: IntoIterator<Item = Item>>(&mut self, iter: T) {
        for item in iter {
            self.add_item(item);
        }
    }
}
