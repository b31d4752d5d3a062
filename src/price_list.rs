//! Price List
//!
//! An editable list of priced items. Items can be switched off without being
//! removed; searches only ever see the active ones.

use rust_decimal::Decimal;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::{
    combination::Combination,
    items::{Item, ItemError, parse_price},
    search::{ComboSearch, SearchError},
};

/// Maximum number of items a price list holds
pub const MAX_ITEMS: usize = 20;

new_key_type! {
    /// Price List Key
    pub struct PriceKey;
}

/// Errors raised while editing a price list.
#[derive(Debug, Error, PartialEq)]
pub enum PriceListError {
    /// The list already holds [`MAX_ITEMS`] items.
    #[error("price list is full, at most {max} items can be added")]
    Full {
        /// Maximum number of items
        max: usize,
    },

    /// No item exists for the key.
    #[error("item {0:?} not found")]
    NotFound(PriceKey),

    /// Wrapped item input error
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// Price List
#[derive(Debug, Clone, Default)]
pub struct PriceList {
    items: SlotMap<PriceKey, Item>,
    order: Vec<PriceKey>,
}

impl PriceList {
    /// Create an empty price list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a price list holding the given items.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::Full`] if there are more than [`MAX_ITEMS`] items.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self, PriceListError> {
        let mut list = Self::new();

        items.into_iter().try_for_each(|item| list.add(item).map(|_| ()))?;

        Ok(list)
    }

    /// Add an item to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::Full`] if the list already holds [`MAX_ITEMS`] items.
    pub fn add(&mut self, item: Item) -> Result<PriceKey, PriceListError> {
        if self.len() >= MAX_ITEMS {
            return Err(PriceListError::Full { max: MAX_ITEMS });
        }

        let key = self.items.insert(item);

        self.order.push(key);

        Ok(key)
    }

    /// Parse price text and add an active item with no minimum count.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::Item`] if the text is not a positive number, or
    /// [`PriceListError::Full`] if the list is full.
    pub fn add_text(&mut self, price: &str) -> Result<PriceKey, PriceListError> {
        let price = parse_price(price)?;

        self.add(Item::new(price))
    }

    /// Remove an item, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::NotFound`] if the key is unknown.
    pub fn remove(&mut self, key: PriceKey) -> Result<Item, PriceListError> {
        let item = self.items.remove(key).ok_or(PriceListError::NotFound(key))?;

        self.order.retain(|&k| k != key);

        Ok(item)
    }

    /// Flip whether an item takes part in searches, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::NotFound`] if the key is unknown.
    pub fn toggle(&mut self, key: PriceKey) -> Result<bool, PriceListError> {
        let item = self.get_mut(key)?;
        let active = !item.is_active();

        item.set_active(active);

        Ok(active)
    }

    /// Switch an item on or off.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::NotFound`] if the key is unknown.
    pub fn set_active(&mut self, key: PriceKey, active: bool) -> Result<(), PriceListError> {
        self.get_mut(key)?.set_active(active);

        Ok(())
    }

    /// Set how many times an item must be picked.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::Item`] if `min_count` is negative, or
    /// [`PriceListError::NotFound`] if the key is unknown.
    pub fn set_min_count(&mut self, key: PriceKey, min_count: i64) -> Result<(), PriceListError> {
        let min_count =
            u32::try_from(min_count).map_err(|_err| ItemError::NegativeMinCount(min_count))?;

        self.get_mut(key)?.set_min_count(min_count);

        Ok(())
    }

    /// Replace an item's price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::Item`] if the price is not positive, or
    /// [`PriceListError::NotFound`] if the key is unknown.
    pub fn set_price(&mut self, key: PriceKey, price: Decimal) -> Result<(), PriceListError> {
        if price <= Decimal::ZERO {
            return Err(ItemError::NonPositivePrice(price).into());
        }

        self.get_mut(key)?.set_price(price);

        Ok(())
    }

    /// Parse price text and replace an item's price with it.
    ///
    /// # Errors
    ///
    /// See [`PriceList::set_price`] and [`parse_price`].
    pub fn set_price_text(&mut self, key: PriceKey, price: &str) -> Result<(), PriceListError> {
        self.set_price(key, parse_price(price)?)
    }

    /// Get an item.
    ///
    /// # Errors
    ///
    /// Returns [`PriceListError::NotFound`] if the key is unknown.
    pub fn get(&self, key: PriceKey) -> Result<&Item, PriceListError> {
        self.items.get(key).ok_or(PriceListError::NotFound(key))
    }

    fn get_mut(&mut self, key: PriceKey) -> Result<&mut Item, PriceListError> {
        self.items.get_mut(key).ok_or(PriceListError::NotFound(key))
    }

    /// Iterate over keys and items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PriceKey, &Item)> {
        self.order
            .iter()
            .filter_map(|&key| self.items.get(key).map(|item| (key, item)))
    }

    /// Keys of the active items, aligned with [`PriceList::snapshot`].
    pub fn active_keys(&self) -> Vec<PriceKey> {
        self.iter()
            .filter(|(_, item)| item.is_active())
            .map(|(key, _)| key)
            .collect()
    }

    /// Copy the active items out, in insertion order.
    pub fn snapshot(&self) -> Vec<Item> {
        self.iter()
            .map(|(_, item)| *item)
            .filter(Item::is_active)
            .collect()
    }

    /// Search the active items.
    ///
    /// # Errors
    ///
    /// See [`ComboSearch::run`].
    pub fn search(&self, search: &ComboSearch) -> Result<Vec<Combination>, SearchError> {
        search.run(&self.snapshot())
    }

    /// Number of items, active or not
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the list holds no items
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
