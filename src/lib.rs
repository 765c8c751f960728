//! Cart Pricing
//!
//! Totals the items in a shopping cart using exact decimal arithmetic and
//! applies pluggable discount strategies to the total.
//!
//! ```
//! use cart_pricing::prelude::*;
//! use decimal_percentage::Percentage;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cart = Cart::new();
//! cart.add_item(Item::new("Laptop", Decimal::new(1200_00, 2))?);
//! cart.add_item(Item::new("Mouse", Decimal::new(50_00, 2))?);
//! cart.add_item(Item::new("Keyboard", Decimal::new(150_00, 2))?);
//!
//! assert_eq!(cart.total_price()?, Decimal::new(1400_00, 2));
//!
//! let ten_percent_off = PercentageOff::new(Percentage::from(Decimal::new(10, 2)));
//! assert_eq!(cart.discounted_total(&ten_percent_off)?, Decimal::new(1260_00, 2));
//!
//! let fifty_off_over_300 = ThresholdFlatOff::new(Decimal::new(300_00, 2), Decimal::new(50_00, 2));
//! assert_eq!(cart.discounted_total(&fifty_off_over_300)?, Decimal::new(1350_00, 2));
//! # Ok(())
//! # }
//! ```

pub mod calculator;
pub mod cart;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod receipt;
