//! spendfloor
//!
//! Finds the cheapest baskets of priced items whose total clears a spend
//! threshold, such as the "spend £100, save £20" offers found at checkouts.
//!
//! Each item may be required a minimum number of times and is capped at a
//! maximum; the search returns the smallest qualifying totals together with the
//! prices that make them up.
//!
//! ```
//! use rust_decimal::Decimal;
//! use spendfloor::prelude::*;
//!
//! let items = [Item::new(Decimal::new(30, 0))];
//! let combinations = ComboSearch::default().run(&items)?;
//!
//! assert_eq!(combinations[0].total(), Decimal::new(120, 0));
//! # Ok::<(), SearchError>(())
//! ```

pub mod cli;
pub mod combination;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod price_list;
pub mod report;
pub mod search;
