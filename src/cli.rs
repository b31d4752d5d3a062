//! Command line interface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rusty_money::iso::{Currency, GBP};
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

use crate::{
    fixtures::{Fixture, FixtureError, parse_currency, parse_decimal},
    items::{Item, ItemError, parse_price},
    price_list::{PriceList, PriceListError},
    search::ComboSearch,
};

/// Errors raised while turning arguments into a search.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrapped fixture error
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Wrapped price list error
    #[error(transparent)]
    PriceList(#[from] PriceListError),

    /// Wrapped item error
    #[error(transparent)]
    Item(#[from] ItemError),

    /// A `--price` minimum count was not an integer
    #[error("invalid minimum count in '{0}', expected PRICE or PRICE:MIN")]
    InvalidMinCount(String),

    /// The logging subscriber could not be installed
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] TryInitError),
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `total: ..., combination: [...]` line per result
    Lines,

    /// A table with totals, margins and grouped prices
    Table,
}

/// How log events are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable single-line events
    Compact,

    /// One JSON object per event
    Json,
}

/// Find the cheapest baskets of priced items that clear a spend threshold.
///
/// Items come from a fixture, from `--price` arguments, or both. Settings given
/// on the command line override the fixture's.
#[derive(Debug, Parser)]
#[command(name = "spendfloor", version)]
pub struct SearchArgs {
    /// Fixture set to load from `./fixtures`
    #[arg(short, long, conflicts_with = "file")]
    pub fixture: Option<String>,

    /// Fixture file to load
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Item price with an optional minimum count, e.g. `30` or `12.50:2`
    #[arg(short, long = "price", value_name = "PRICE[:MIN]")]
    pub prices: Vec<String>,

    /// Total a combination must exceed
    #[arg(short, long)]
    pub threshold: Option<String>,

    /// Maximum picks per item
    #[arg(short, long)]
    pub cap: Option<u32>,

    /// Maximum combinations shown
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Give up after visiting this many search nodes
    #[arg(long)]
    pub node_budget: Option<u64>,

    /// ISO currency code used when printing amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log level, overridden by `RUST_LOG`
    #[arg(long, env = "SPENDFLOOR_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log event format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl SearchArgs {
    /// Build the price list, search settings and currency described by the arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] if the fixture cannot be loaded or an argument is invalid.
    pub fn resolve(&self) -> Result<(PriceList, ComboSearch, &'static Currency), CliError> {
        let fixture = match (&self.fixture, &self.file) {
            (Some(name), _) => Some(Fixture::from_set(name)?),
            (None, Some(path)) => Some(Fixture::from_path(path)?),
            (None, None) => None,
        };

        let (mut price_list, mut search, mut currency) = match fixture {
            Some(fixture) => fixture.into_parts(),
            None => (PriceList::new(), ComboSearch::default(), GBP),
        };

        for price in &self.prices {
            price_list.add(parse_price_arg(price)?)?;
        }

        if let Some(threshold) = self.threshold.as_deref() {
            search = search.with_threshold(parse_decimal(threshold)?);
        }

        if let Some(cap) = self.cap {
            search = search.with_cap(cap);
        }

        if let Some(limit) = self.limit {
            search = search.with_limit(limit);
        }

        if self.node_budget.is_some() {
            search = search.with_node_budget(self.node_budget);
        }

        if let Some(code) = self.currency.as_deref() {
            currency = parse_currency(code)?;
        }

        Ok((price_list, search, currency))
    }
}

/// Parse a `PRICE` or `PRICE:MIN` argument into an item.
///
/// # Errors
///
/// Returns [`CliError::Item`] for a bad price or negative minimum, or
/// [`CliError::InvalidMinCount`] if the minimum is not an integer.
pub fn parse_price_arg(arg: &str) -> Result<Item, CliError> {
    let Some((price, min_count)) = arg.split_once(':') else {
        return Ok(Item::new(parse_price(arg)?));
    };

    let min_count = min_count
        .trim()
        .parse::<i64>()
        .map_err(|_err| CliError::InvalidMinCount(arg.to_string()))?;

    Ok(Item::new(parse_price(price)?).try_with_min_count(min_count)?)
}

/// Install a global `tracing` subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`CliError::Logging`] if a global subscriber is already installed.
pub fn init_logging(log_level: &str, log_format: LogFormat) -> Result<(), CliError> {
    match log_format {
        LogFormat::Compact => init_with_layer(
            log_level,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Json => init_with_layer(
            log_level,
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
        ),
    }
}

fn build_env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn init_with_layer<L>(log_level: &str, fmt_layer: L) -> Result<(), CliError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(log_level))
        .try_init()?;

    Ok(())
}
