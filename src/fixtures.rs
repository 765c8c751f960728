//! Fixtures
//!
//! Carts and named discounts described in YAML:
//!
//! ```yaml
//! currency: USD
//! items:
//!   - name: Laptop
//!     price: "1200.00"
//! discounts:
//!   ten_percent:
//!     type: percentage_off
//!     rate: "10%"
//!   over_300:
//!     type: threshold_flat_off
//!     threshold: 300
//!     amount: 50
//! ```
//!
//! Discounts are keyed by name and kept in file order. Numeric values may be
//! quoted or bare; quote them to keep every digit of a long decimal.

use std::{fmt, fs, path::Path, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, JPY, USD};
use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::Cart,
    discounts::{Discount, PercentageOff, ThresholdFlatOff},
    items::{Item, ItemError},
};

const SAMPLE: &str = include_str!("../fixtures/sample.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Item rejected during construction
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// Cart file as it appears in YAML
#[derive(Debug, Deserialize)]
struct CartFile {
    #[serde(default = "default_currency")]
    currency: String,

    items: Vec<ItemFixture>,

    #[serde(default, deserialize_with = "named_discounts")]
    discounts: Vec<(String, DiscountConfig)>,
}

fn default_currency() -> String {
    USD.iso_alpha_code.to_string()
}

/// Item Fixture
#[derive(Debug, Deserialize)]
struct ItemFixture {
    name: String,

    /// Item price (e.g., "12.99")
    price: String,
}

/// Discount configuration, tagged by `type`
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum DiscountConfig {
    PercentageOff {
        rate: NumberText,
    },
    ThresholdFlatOff {
        threshold: NumberText,
        amount: NumberText,
    },
}

/// Numeric field written either quoted (`"0.10"`) or as a bare YAML number (`0.10`).
///
/// Tagged enums buffer their fields, so bare numbers reach us already typed
/// and are turned back into text here.
#[derive(Debug)]
struct NumberText(String);

impl<'de> Deserialize<'de> for NumberText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberTextVisitor)
    }
}

struct NumberTextVisitor;

impl Visitor<'_> for NumberTextVisitor {
    type Value = NumberText;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(NumberText(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(NumberText(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(NumberText(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(NumberText(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Shortest representation that reads back as the same float, so `0.10` becomes "0.1".
        Ok(NumberText(v.to_string()))
    }
}

/// Reads the `discounts` map into `(name, config)` pairs in file order.
fn named_discounts<'de, D>(deserializer: D) -> Result<Vec<(String, DiscountConfig)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NamedDiscounts;

    impl<'de> Visitor<'de> for NamedDiscounts {
        type Value = Vec<(String, DiscountConfig)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of discount names to discounts")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut discounts: Vec<(String, DiscountConfig)> =
                Vec::with_capacity(map.size_hint().unwrap_or_default());

            while let Some((name, config)) = map.next_entry::<String, DiscountConfig>()? {
                if discounts.iter().any(|(existing, _)| *existing == name) {
                    return Err(de::Error::custom(format_args!(
                        "duplicate discount name `{name}`"
                    )));
                }

                discounts.push((name, config));
            }

            Ok(discounts)
        }
    }

    deserializer.deserialize_map(NamedDiscounts)
}

impl TryFrom<DiscountConfig> for Discount {
    type Error = FixtureError;

    fn try_from(config: DiscountConfig) -> Result<Self, Self::Error> {
        match config {
            DiscountConfig::PercentageOff { rate } => {
                Ok(PercentageOff::new(parse_percentage(&rate.0)?).into())
            }
            DiscountConfig::ThresholdFlatOff { threshold, amount } => Ok(ThresholdFlatOff::new(
                parse_price(&threshold.0)?,
                parse_price(&amount.0)?,
            )
            .into()),
        }
    }
}

/// A cart, its display currency and the named discounts to try against it.
#[derive(Debug)]
pub struct CartFixture {
    currency: &'static Currency,
    cart: Cart,
    discounts: Vec<(String, Discount)>,
}

impl CartFixture {
    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any value is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        debug!(path = %path.display(), "loading cart fixture");

        contents.parse()
    }

    /// The built-in laptop, mouse and keyboard cart with two sample discounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture fails to parse.
    pub fn sample() -> Result<Self, FixtureError> {
        SAMPLE.parse()
    }

    /// Get the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Get the named discounts in file order.
    pub fn discounts(&self) -> &[(String, Discount)] {
        &self.discounts
    }

    /// Get the display currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl FromStr for CartFixture {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file: CartFile = serde_norway::from_str(s)?;
        let currency = parse_currency(&file.currency)?;

        let mut cart = Cart::new();

        for item in file.items {
            cart.add_item(Item::new(item.name, parse_price(&item.price)?)?);
        }

        let discounts = file
            .discounts
            .into_iter()
            .map(|(name, config)| -> Result<_, FixtureError> {
                Ok((name, Discount::try_from(config)?))
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        debug!(
            items = cart.len(),
            discounts = discounts.len(),
            currency = currency.iso_alpha_code,
            "parsed cart fixture"
        );

        Ok(CartFixture {
            currency,
            cart,
            discounts,
        })
    }
}

/// Parse a decimal price string (e.g., "12.99").
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not a decimal number.
pub fn parse_price(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or if the value is invalid.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        // Parse as percentage (e.g., "15%" -> 0.15)
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        value
            .checked_div(Decimal::ONE_HUNDRED)
            .map(Percentage::from)
            .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
    } else {
        let value = trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD, EUR and JPY.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "JPY" => Ok(JPY),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
