//! Cart pricing prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::DiscountCalculator,
    cart::{Cart, CartError},
    discounts::{
        Chain, ChainError, Discount, DiscountError, DiscountStrategy, DiscountStrategyExt, NoDiscount,
        PercentageOff, ThresholdFlatOff,
    },
    fixtures::{CartFixture, FixtureError},
    items::{Item, ItemError},
    pricing::{TotalPriceError, total_price},
    receipt::{Receipt, ReceiptError},
};
