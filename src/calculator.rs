//! Discount calculator
//!
//! Holds a single, swappable discount strategy and applies it to carts.

use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    discounts::{DiscountError, DiscountStrategy, NoDiscount},
};

type BoxedStrategy = Box<dyn Fn(Decimal) -> Result<Decimal, DiscountError>>;

/// Applies an owned discount strategy to carts.
pub struct DiscountCalculator {
    strategy: BoxedStrategy,
}

impl DiscountCalculator {
    /// Create a calculator using `strategy`.
    pub fn new<S>(strategy: S) -> Self
    where
        S: DiscountStrategy + 'static,
        S::Error: Into<DiscountError>,
    {
        Self {
            strategy: boxed(strategy),
        }
    }

    /// Replace the current strategy.
    pub fn set_strategy<S>(&mut self, strategy: S)
    where
        S: DiscountStrategy + 'static,
        S::Error: Into<DiscountError>,
    {
        debug!("replacing discount strategy");

        self.strategy = boxed(strategy);
    }

    /// Calculate the final price of `cart` under the current strategy.
    ///
    /// # Errors
    ///
    /// - [`CartError::TotalPrice`]: the cart total could not be calculated.
    /// - [`CartError::Discount`]: the strategy failed.
    pub fn final_price(&self, cart: &Cart) -> Result<Decimal, CartError<DiscountError>> {
        let total = cart.total_price()?;

        (self.strategy)(total).map_err(CartError::Discount)
    }
}

impl Default for DiscountCalculator {
    fn default() -> Self {
        Self::new(NoDiscount)
    }
}

impl fmt::Debug for DiscountCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountCalculator").finish_non_exhaustive()
    }
}

fn boxed<S>(strategy: S) -> BoxedStrategy
where
    S: DiscountStrategy + 'static,
    S::Error: Into<DiscountError>,
{
    Box::new(move |price: Decimal| -> Result<Decimal, DiscountError> {
        strategy.apply(price).map_err(Into::into)
    })
}
