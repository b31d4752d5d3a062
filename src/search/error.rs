//! Search errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while searching for combinations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The caller's items or parameters were rejected before searching.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// The search visited more nodes than its configured budget allows.
    #[error("search exceeded its budget of {budget} nodes")]
    BudgetExceeded {
        /// Configured node budget
        budget: u64,
    },
}

/// Malformed or out-of-range search input.
///
/// Item indexes refer to positions in the slice passed to the search, inactive items included.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    /// No active items were provided.
    #[error("at least one active item is required")]
    NoItems,

    /// An item's price is zero or negative.
    #[error("item {index} has price {price}, prices must be greater than zero")]
    NonPositivePrice {
        /// Index of the offending item
        index: usize,

        /// The rejected price
        price: Decimal,
    },

    /// An item must be picked more often than the cap allows.
    #[error("item {index} has minimum count {min_count}, above the cap of {cap}")]
    MinCountExceedsCap {
        /// Index of the offending item
        index: usize,

        /// The item's minimum count
        min_count: u32,

        /// Cap on picks per item
        cap: u32,
    },

    /// The result limit was zero.
    #[error("result limit must be at least 1")]
    ZeroLimit,
}
