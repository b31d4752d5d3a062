//! Fixtures
//!
//! Price lists and search settings stored as YAML:
//!
//! ```yaml
//! currency: GBP
//! threshold: "100"
//! cap: 10
//! limit: 10
//! items:
//!   - price: "30"
//!   - price: "12.50"
//!     min: 2
//!   - price: "8"
//!     active: false
//! ```
//!
//! Prices and the threshold are quoted so they are read as exact decimals.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use rusty_money::{
    Findable,
    iso::{Currency, GBP},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    fixtures::items::ItemFixture,
    items::{Item, ItemError},
    price_list::{PriceList, PriceListError},
    search::ComboSearch,
};

pub mod items;

/// Default directory searched by [`Fixture::from_set`]
pub const FIXTURES_DIR: &str = "./fixtures";

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A decimal setting could not be parsed
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// An item entry was rejected
    #[error("Invalid item: {0}")]
    Item(#[from] ItemError),

    /// The items do not fit in a price list
    #[error("Invalid price list: {0}")]
    PriceList(#[from] PriceListError),
}

/// Raw fixture document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchFixture {
    /// ISO currency code used when reporting, defaults to GBP
    #[serde(default)]
    pub currency: Option<String>,

    /// Total a combination must exceed (e.g., "100")
    #[serde(default)]
    pub threshold: Option<String>,

    /// Maximum picks per item
    #[serde(default)]
    pub cap: Option<u32>,

    /// Maximum combinations returned
    #[serde(default)]
    pub limit: Option<usize>,

    /// Maximum search nodes visited
    #[serde(default)]
    pub node_budget: Option<u64>,

    /// Priced items
    pub items: Vec<ItemFixture>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    price_list: PriceList,
    search: ComboSearch,
    currency: &'static Currency,
}

impl FromStr for Fixture {
    type Err = FixtureError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let fixture: SearchFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }
}

impl TryFrom<SearchFixture> for Fixture {
    type Error = FixtureError;

    fn try_from(fixture: SearchFixture) -> Result<Self, Self::Error> {
        let currency = match fixture.currency.as_deref() {
            Some(code) => parse_currency(code)?,
            None => GBP,
        };

        let mut search = ComboSearch::default().with_node_budget(fixture.node_budget);

        if let Some(threshold) = fixture.threshold.as_deref() {
            search = search.with_threshold(parse_decimal(threshold)?);
        }

        if let Some(cap) = fixture.cap {
            search = search.with_cap(cap);
        }

        if let Some(limit) = fixture.limit {
            search = search.with_limit(limit);
        }

        let items = fixture
            .items
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            price_list: PriceList::with_items(items)?,
            search,
            currency,
        })
    }
}

impl Fixture {
    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid items.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        contents.parse()
    }

    /// Load `<name>.yml` from [`FIXTURES_DIR`].
    ///
    /// # Errors
    ///
    /// See [`Fixture::from_path`].
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(FIXTURES_DIR, name)
    }

    /// Load `<name>.yml` from `base_path`.
    ///
    /// # Errors
    ///
    /// See [`Fixture::from_path`].
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        Self::from_path(base_path.into().join(format!("{name}.yml")))
    }

    /// Items loaded from the fixture
    pub fn price_list(&self) -> &PriceList {
        &self.price_list
    }

    /// Search settings from the fixture, defaults filled in
    pub fn search(&self) -> ComboSearch {
        self.search
    }

    /// Currency used when reporting
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Split the fixture into its parts.
    pub fn into_parts(self) -> (PriceList, ComboSearch, &'static Currency) {
        (self.price_list, self.search, self.currency)
    }
}

/// Parse a decimal setting such as `"99.50"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidDecimal`] if the text is not a decimal number.
pub fn parse_decimal(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidDecimal(s.to_string()))
}

/// Look up an ISO currency by code, e.g. `"GBP"`.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if the code is not an ISO currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    Currency::find(code.trim()).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}
