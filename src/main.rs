//! Cart pricing demo
//!
//! Prints the raw total of a cart, then a receipt for each discount.
//!
//! Without `--fixture`, the built-in laptop, mouse and keyboard cart is used.
//! Use `--rate`, or `--threshold` together with `--amount`, to try an extra discount.
//! Set `RUST_LOG=debug` to see pricing events on stderr.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cart_pricing::{
    discounts::{Discount, PercentageOff, ThresholdFlatOff},
    fixtures::{CartFixture, parse_currency, parse_percentage},
    receipt::{Receipt, format_money},
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogFormat {
    /// Human readable single-line output
    #[default]
    Compact,

    /// JSON lines
    Json,
}

/// Arguments for the cart pricing demo
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML cart fixture to load instead of the built-in sample
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Extra percentage-off discount (e.g. "15%" or "0.15")
    #[arg(short, long)]
    rate: Option<String>,

    /// Threshold for an extra flat-off discount
    #[arg(short, long, requires = "amount")]
    threshold: Option<Decimal>,

    /// Amount taken off totals above `--threshold`
    #[arg(short, long, requires = "threshold")]
    amount: Option<Decimal>,

    /// Display currency, overriding the fixture's
    #[arg(short, long)]
    currency: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t)]
    log_format: LogFormat,
}

fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

fn extra_discounts(args: &Args) -> Result<Vec<(String, Discount)>> {
    let mut discounts = Vec::new();

    if let Some(rate) = args.rate.as_deref() {
        let percent = parse_percentage(rate)?;

        discounts.push((format!("{rate} off"), PercentageOff::new(percent).into()));
    }

    if let (Some(threshold), Some(amount)) = (args.threshold, args.amount) {
        discounts.push((
            format!("{amount} off over {threshold}"),
            ThresholdFlatOff::new(threshold, amount).into(),
        ));
    }

    Ok(discounts)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_format)?;

    let fixture = match &args.fixture {
        Some(path) => CartFixture::from_path(path)
            .with_context(|| format!("loading fixture {}", path.display()))?,
        None => CartFixture::sample()?,
    };

    let currency = match args.currency.as_deref() {
        Some(code) => parse_currency(code)?,
        None => fixture.currency(),
    };

    let cart = fixture.cart();

    let extras = extra_discounts(&args)?;

    info!(
        items = cart.len(),
        discounts = fixture.discounts().len() + extras.len(),
        "pricing cart"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Total: {}", format_money(cart.total_price()?, currency))?;

    for (name, discount) in fixture.discounts().iter().chain(&extras) {
        let receipt = Receipt::new(cart, discount)?;

        writeln!(handle, "\n{name}")?;

        receipt.write_to(&mut handle, cart, currency)?;
    }

    Ok(())
}
