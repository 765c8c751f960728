//! Discounts
//!
//! A discount strategy maps a cart total to a discounted total. Any
//! `Fn(Decimal) -> Decimal` closure is a strategy, as are the built-in
//! [`PercentageOff`], [`ThresholdFlatOff`] and [`NoDiscount`] values.
//! Strategies can be chained with [`DiscountStrategyExt::then`].

use std::convert::Infallible;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Discount arithmetic left the representable decimal range.
    #[error("discount arithmetic overflowed the decimal range")]
    Overflow,
}

impl From<Infallible> for DiscountError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Maps a total price to a discounted price.
///
/// Implementations must be pure: the result depends only on `price` and the
/// strategy's own configuration.
pub trait DiscountStrategy {
    /// Error produced when the discount cannot be computed.
    type Error;

    /// Applies the discount to `price`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the strategy cannot produce a result.
    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error>;
}

impl<F> DiscountStrategy for F
where
    F: Fn(Decimal) -> Decimal,
{
    type Error = Infallible;

    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
        Ok(self(price))
    }
}

/// Take a percentage off the price (e.g., "10% off").
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PercentageOff {
    rate: Percentage,
}

impl PercentageOff {
    /// Creates a new percentage-off discount.
    pub fn new(rate: Percentage) -> Self {
        Self { rate }
    }

    /// Returns the discount rate.
    pub fn rate(&self) -> Percentage {
        self.rate
    }
}

impl DiscountStrategy for PercentageOff {
    type Error = DiscountError;

    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
        let rate = self.rate * Decimal::ONE; // decimal_percentage crate doesn't expose the underlying Decimal

        Decimal::ONE
            .checked_sub(rate)
            .and_then(|remaining| price.checked_mul(remaining))
            .ok_or(DiscountError::Overflow)
    }
}

/// Subtract a flat amount once the price is strictly above a threshold
/// (e.g., "50 off orders over 300").
///
/// The result is not clamped, so a large amount can produce a negative price.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ThresholdFlatOff {
    threshold: Decimal,
    amount: Decimal,
}

impl ThresholdFlatOff {
    /// Creates a new threshold discount.
    pub fn new(threshold: Decimal, amount: Decimal) -> Self {
        Self { threshold, amount }
    }

    /// Returns the price the total must exceed.
    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Returns the amount taken off.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl DiscountStrategy for ThresholdFlatOff {
    type Error = DiscountError;

    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
        if price > self.threshold {
            price
                .checked_sub(self.amount)
                .ok_or(DiscountError::Overflow)
        } else {
            Ok(price)
        }
    }
}

/// A discount chosen at runtime, e.g. from a fixture file.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Discount {
    /// Take a percentage off the total.
    PercentageOff(PercentageOff),

    /// Take a flat amount off totals above a threshold.
    ThresholdFlatOff(ThresholdFlatOff),
}

impl DiscountStrategy for Discount {
    type Error = DiscountError;

    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
        match self {
            Discount::PercentageOff(discount) => discount.apply(price),
            Discount::ThresholdFlatOff(discount) => discount.apply(price),
        }
    }
}

impl From<PercentageOff> for Discount {
    fn from(discount: PercentageOff) -> Self {
        Discount::PercentageOff(discount)
    }
}

impl From<ThresholdFlatOff> for Discount {
    fn from(discount: ThresholdFlatOff) -> Self {
        Discount::ThresholdFlatOff(discount)
    }
}

/// Leaves the price unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NoDiscount;

impl DiscountStrategy for NoDiscount {
    type Error = Infallible;

    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
        Ok(price)
    }
}

/// Two strategies applied in sequence, the output of `first` feeding `second`.
#[derive(Debug, Copy, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    /// Creates a new chain of two strategies.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

/// Error from one side of a [`Chain`], carried unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError<A, B> {
    /// The first strategy failed.
    #[error(transparent)]
    First(A),

    /// The second strategy failed.
    #[error(transparent)]
    Second(B),
}

impl<A, B> From<ChainError<A, B>> for DiscountError
where
    A: Into<DiscountError>,
    B: Into<DiscountError>,
{
    fn from(error: ChainError<A, B>) -> Self {
        match error {
            ChainError::First(error) => error.into(),
            ChainError::Second(error) => error.into(),
        }
    }
}

impl<A, B> DiscountStrategy for Chain<A, B>
where
    A: DiscountStrategy,
    B: DiscountStrategy,
{
    type Error = ChainError<A::Error, B::Error>;

    fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
        let intermediate = self.first.apply(price).map_err(ChainError::First)?;

        self.second.apply(intermediate).map_err(ChainError::Second)
    }
}

/// Combinators available on every [`DiscountStrategy`].
pub trait DiscountStrategyExt: DiscountStrategy + Sized {
    /// Applies `self`, then `next` to the result.
    fn then<B: DiscountStrategy>(self, next: B) -> Chain<Self, B> {
        Chain::new(self, next)
    }
}

impl<S: DiscountStrategy> DiscountStrategyExt for S {}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn ten_percent_off() -> PercentageOff {
        PercentageOff::new(Percentage::from(dec!(0.10)))
    }

    fn fifty_off_over_300() -> ThresholdFlatOff {
        ThresholdFlatOff::new(dec!(300.00), dec!(50.00))
    }

    #[test]
    fn percentage_off_takes_rate_from_price() -> TestResult {
        assert_eq!(ten_percent_off().apply(dec!(1400.00))?, dec!(1260.00));

        Ok(())
    }

    #[test]
    fn percentage_off_zero_and_full_rates() -> TestResult {
        let nothing = PercentageOff::new(Percentage::from(Decimal::ZERO));
        let everything = PercentageOff::new(Percentage::from(Decimal::ONE));

        assert_eq!(nothing.apply(dec!(99.99))?, dec!(99.99));
        assert_eq!(everything.apply(dec!(99.99))?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn percentage_off_overflow_returns_error() {
        let discount = PercentageOff::new(Percentage::from(dec!(-1)));

        assert_eq!(discount.apply(Decimal::MAX), Err(DiscountError::Overflow));
    }

    #[test]
    fn threshold_applies_above_threshold() -> TestResult {
        assert_eq!(fifty_off_over_300().apply(dec!(1400.00))?, dec!(1350.00));

        Ok(())
    }

    #[test]
    fn threshold_boundary_is_exclusive() -> TestResult {
        assert_eq!(fifty_off_over_300().apply(dec!(300.00))?, dec!(300.00));
        assert_eq!(fifty_off_over_300().apply(dec!(299.99))?, dec!(299.99));

        Ok(())
    }

    #[test]
    fn threshold_result_is_not_clamped() -> TestResult {
        let discount = ThresholdFlatOff::new(dec!(10.00), dec!(100.00));

        assert_eq!(discount.apply(dec!(20.00))?, dec!(-80.00));

        Ok(())
    }

    #[test]
    fn threshold_overflow_returns_error() {
        let discount = ThresholdFlatOff::new(Decimal::MIN, Decimal::MAX);

        assert_eq!(discount.apply(dec!(-1)), Err(DiscountError::Overflow));
    }

    #[test]
    fn discount_enum_delegates_to_variant() -> TestResult {
        let percentage = Discount::from(ten_percent_off());
        let threshold = Discount::from(fifty_off_over_300());

        assert_eq!(percentage.apply(dec!(1400.00))?, dec!(1260.00));
        assert_eq!(threshold.apply(dec!(1400.00))?, dec!(1350.00));
        assert_eq!(threshold.apply(dec!(300.00))?, dec!(300.00));

        Ok(())
    }

    #[test]
    fn no_discount_is_identity() -> TestResult {
        assert_eq!(NoDiscount.apply(dec!(12.34))?, dec!(12.34));

        Ok(())
    }

    #[test]
    fn closures_are_strategies() -> TestResult {
        let half_price = |price: Decimal| price / dec!(2);

        assert_eq!(half_price.apply(dec!(10.00))?, dec!(5.00));

        Ok(())
    }

    #[test]
    fn chain_matches_manual_composition() -> TestResult {
        let price = dec!(1400.00);
        let chained = ten_percent_off().then(fifty_off_over_300());

        let manual = fifty_off_over_300().apply(ten_percent_off().apply(price)?)?;

        assert_eq!(chained.apply(price)?, manual);
        assert_eq!(chained.apply(price)?, dec!(1210.00));

        Ok(())
    }

    #[test]
    fn chain_order_matters() -> TestResult {
        let price = dec!(1400.00);
        let threshold_first = fifty_off_over_300().then(ten_percent_off());

        assert_eq!(threshold_first.apply(price)?, dec!(1215.00));

        Ok(())
    }

    #[test]
    fn chain_mixes_closures_and_builtins() -> TestResult {
        let plus_shipping = |price: Decimal| price + dec!(5.00);
        let chained = plus_shipping.then(NoDiscount).then(fifty_off_over_300());

        assert_eq!(chained.apply(dec!(296.00))?, dec!(251.00));

        Ok(())
    }

    #[test]
    fn chain_propagates_first_error() {
        let chained = PercentageOff::new(Percentage::from(dec!(-1))).then(NoDiscount);

        assert_eq!(
            chained.apply(Decimal::MAX),
            Err(ChainError::First(DiscountError::Overflow))
        );
    }

    #[test]
    fn chain_keeps_custom_errors_unchanged() -> TestResult {
        #[derive(Debug, PartialEq)]
        struct Declined;

        struct DeclineOver1000;

        impl DiscountStrategy for DeclineOver1000 {
            type Error = Declined;

            fn apply(&self, price: Decimal) -> Result<Decimal, Self::Error> {
                if price > dec!(1000) { Err(Declined) } else { Ok(price) }
            }
        }

        let chained = fifty_off_over_300().then(DeclineOver1000);

        assert_eq!(chained.apply(dec!(1400.00)), Err(ChainError::Second(Declined)));
        assert_eq!(chained.apply(dec!(1000.00)), Ok(dec!(950.00)));

        Ok(())
    }

    #[test]
    fn chain_error_converts_into_discount_error() {
        let error: ChainError<DiscountError, Infallible> = ChainError::First(DiscountError::Overflow);

        assert_eq!(DiscountError::from(error), DiscountError::Overflow);
    }
}
