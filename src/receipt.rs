//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    discounts::DiscountStrategy,
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Savings arithmetic left the representable decimal range.
    #[error("receipt arithmetic overflowed the decimal range")]
    Overflow,

    /// The receipt could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Final receipt
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Receipt {
    subtotal: Decimal,
    total: Decimal,
}

impl Receipt {
    /// Build a receipt for `cart` with `strategy` applied to its total.
    ///
    /// # Errors
    ///
    /// - [`CartError::TotalPrice`]: the cart total could not be calculated.
    /// - [`CartError::Discount`]: the strategy's error, unchanged.
    pub fn new<S>(cart: &Cart, strategy: &S) -> Result<Self, CartError<S::Error>>
    where
        S: DiscountStrategy + ?Sized,
    {
        let subtotal = cart.total_price()?;
        let total = strategy.apply(subtotal).map_err(CartError::Discount)?;

        Ok(Receipt { subtotal, total })
    }

    /// Total before the discount.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Total after the discount.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Calculate the savings made by applying the discount.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Overflow`] if the subtraction overflows.
    pub fn savings(&self) -> Result<Decimal, ReceiptError> {
        self.subtotal
            .checked_sub(self.total)
            .ok_or(ReceiptError::Overflow)
    }

    /// Calculates the savings as a fraction of the subtotal.
    ///
    /// A zero subtotal yields zero percent.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Overflow`] if the calculation overflows.
    pub fn savings_percent(&self) -> Result<Percentage, ReceiptError> {
        if self.subtotal.is_zero() {
            return Ok(Percentage::from(Decimal::ZERO));
        }

        let savings = self.savings()?;

        savings
            .checked_div(self.subtotal)
            .map(Percentage::from)
            .ok_or(ReceiptError::Overflow)
    }

    /// Prints the cart items and the receipt totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &Cart,
        currency: &'static Currency,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Price"]);

        for (idx, item) in cart.iter().enumerate() {
            builder.push_record([
                format!("#{}", idx + 1),
                item.name().to_string(),
                format_money(item.price(), currency),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "{table}")?;

        let points = percent_points_from_fractional_percentage(self.savings_percent()?);

        writeln!(out, " Subtotal: {}", format_money(self.subtotal, currency))?;
        writeln!(out, " Total:    {}", format_money(self.total, currency))?;
        writeln!(
            out,
            " Savings:  {} ({points:.2}%)",
            format_money(self.savings()?, currency)
        )?;

        Ok(())
    }
}

/// Format a decimal amount in `currency`.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}
