//! spendfloor prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    combination::{Combination, Composition},
    fixtures::{Fixture, FixtureError},
    items::{Item, ItemError, parse_price},
    price_list::{MAX_ITEMS, PriceKey, PriceList, PriceListError},
    report::{Report, ReportError},
    search::{ComboSearch, InvalidInput, SearchError, SearchOutcome, search},
};
