//! Items

use rust_decimal::{Decimal, prelude::FromPrimitive};
use thiserror::Error;

/// Errors raised while turning caller input into items.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    /// Price text could not be parsed as a decimal number.
    #[error("price '{0}' is not a valid number")]
    InvalidPrice(String),

    /// Price parsed, but is zero or negative.
    #[error("price {0} must be greater than zero")]
    NonPositivePrice(Decimal),

    /// Floating point price was NaN or infinite.
    #[error("price {0} is not a finite number")]
    NonFinitePrice(f64),

    /// Minimum count entered as a negative integer.
    #[error("minimum count must be a non-negative integer, got {0}")]
    NegativeMinCount(i64),
}

/// A priced item that may be picked one or more times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    price: Decimal,
    min_count: u32,
    active: bool,
}

impl Item {
    /// Creates a new active item with no minimum count.
    pub fn new(price: Decimal) -> Self {
        Self::with_min_count(price, 0)
    }

    /// Creates a new active item that must be picked at least `min_count` times.
    pub fn with_min_count(price: Decimal, min_count: u32) -> Self {
        Self {
            price,
            min_count,
            active: true,
        }
    }

    /// Creates a new active item from a floating point price.
    ///
    /// # Errors
    ///
    /// - [`ItemError::NonFinitePrice`]: the price is NaN or infinite.
    /// - [`ItemError::NonPositivePrice`]: the price is zero or negative.
    pub fn try_from_f64(price: f64) -> Result<Self, ItemError> {
        let price = Decimal::from_f64(price).ok_or(ItemError::NonFinitePrice(price))?;

        if price <= Decimal::ZERO {
            return Err(ItemError::NonPositivePrice(price));
        }

        Ok(Self::new(price))
    }

    /// Returns a copy of this item with the minimum count taken from a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NegativeMinCount`] if `min_count` is negative or does not fit a `u32`.
    pub fn try_with_min_count(self, min_count: i64) -> Result<Self, ItemError> {
        let min_count =
            u32::try_from(min_count).map_err(|_err| ItemError::NegativeMinCount(min_count))?;

        Ok(Self { min_count, ..self })
    }

    /// Returns a copy of this item marked inactive.
    #[must_use]
    pub fn inactive(self) -> Self {
        Self {
            active: false,
            ..self
        }
    }

    /// Returns the price of the item
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns how many times the item must appear in every combination
    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    /// Whether the item takes part in searches
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_price(&mut self, price: Decimal) {
        self.price = price;
    }

    pub(crate) fn set_min_count(&mut self, min_count: u32) {
        self.min_count = min_count;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Parses user-entered price text such as `"29.90"`.
///
/// # Errors
///
/// - [`ItemError::InvalidPrice`]: the text is not a decimal number.
/// - [`ItemError::NonPositivePrice`]: the number is zero or negative.
pub fn parse_price(text: &str) -> Result<Decimal, ItemError> {
    let price = text
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| ItemError::InvalidPrice(text.to_string()))?;

    if price <= Decimal::ZERO {
        return Err(ItemError::NonPositivePrice(price));
    }

    Ok(price)
}
