//! Combination Search
//!
//! Enumerates baskets built from a list of priced items, where each item is
//! picked between its minimum count and a shared cap, and returns the cheapest
//! baskets whose total is strictly greater than a threshold.
//!
//! The search starts from the basket holding every item's minimum count and
//! adds one unit at a time, in non-decreasing item order so each count vector
//! is reached at most once. A branch stops as soon as its total crosses the
//! threshold: the basket that crossed is recorded and never extended.
//!
//! Baskets with equal totals are returned in the order the search first
//! reached them.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    combination::{Combination, Composition, canonical_form},
    items::Item,
};

mod error;
mod state;

pub use error::{InvalidInput, SearchError};

use state::SearchState;

/// Reference spend threshold
pub const DEFAULT_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Reference cap on picks per item
pub const DEFAULT_CAP: u32 = 10;

/// Reference number of combinations returned
pub const DEFAULT_LIMIT: usize = 10;

type Prices = SmallVec<[Decimal; 20]>;
type MinCounts = SmallVec<[u32; 20]>;

/// Distinct qualifying combinations with the order they were first reached in
type Found = FxHashMap<Composition, (usize, Combination)>;

/// Search settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboSearch {
    threshold: Decimal,
    cap: u32,
    limit: usize,
    node_budget: Option<u64>,
}

impl Default for ComboSearch {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_CAP, DEFAULT_LIMIT)
    }
}

/// Combinations found by a search, with counters describing the work done.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Cheapest qualifying combinations, ascending by total
    pub combinations: Vec<Combination>,

    /// Search nodes visited
    pub nodes: u64,

    /// Distinct qualifying combinations found before truncating to the limit
    pub distinct: usize,
}

impl ComboSearch {
    /// Create search settings without a node budget.
    pub const fn new(threshold: Decimal, cap: u32, limit: usize) -> Self {
        Self {
            threshold,
            cap,
            limit,
            node_budget: None,
        }
    }

    /// Set the total a combination must exceed.
    #[must_use]
    pub const fn with_threshold(self, threshold: Decimal) -> Self {
        Self { threshold, ..self }
    }

    /// Set the maximum number of picks per item.
    #[must_use]
    pub const fn with_cap(self, cap: u32) -> Self {
        Self { cap, ..self }
    }

    /// Set the maximum number of combinations returned.
    #[must_use]
    pub const fn with_limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }

    /// Limit the number of search nodes visited, or lift the limit with `None`.
    #[must_use]
    pub const fn with_node_budget(self, node_budget: Option<u64>) -> Self {
        Self {
            node_budget,
            ..self
        }
    }

    /// Total a combination must exceed
    pub const fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Maximum picks per item
    pub const fn cap(&self) -> u32 {
        self.cap
    }

    /// Maximum combinations returned
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Node budget, if any
    pub const fn node_budget(&self) -> Option<u64> {
        self.node_budget
    }

    /// Find the cheapest combinations of the active `items` whose total exceeds the threshold.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidInput`]: no active items, a non-positive price, a minimum
    ///   count above the cap, or a zero limit.
    /// - [`SearchError::BudgetExceeded`]: the node budget ran out before the search finished.
    pub fn run(&self, items: &[Item]) -> Result<Vec<Combination>, SearchError> {
        Ok(self.explore(items)?.combinations)
    }

    /// Like [`ComboSearch::run`], also reporting how much of the search tree was visited.
    ///
    /// # Errors
    ///
    /// See [`ComboSearch::run`].
    #[tracing::instrument(
        name = "combo_search.explore",
        level = "debug",
        skip_all,
        fields(
            items = items.len(),
            threshold = %self.threshold,
            cap = self.cap,
            limit = self.limit
        ),
        err
    )]
    pub fn explore(&self, items: &[Item]) -> Result<SearchOutcome, SearchError> {
        let (prices, min_counts) = self.validate(items)?;

        let mut state = SearchState::seeded(&prices, &min_counts, self.cap, self.node_budget);
        let mut found = Found::default();

        self.backtrack(&mut state, &mut found)?;

        let distinct = found.len();
        let combinations = rank(found, self.limit);

        debug!(
            nodes = state.nodes(),
            distinct,
            returned = combinations.len(),
            "search complete"
        );

        Ok(SearchOutcome {
            combinations,
            nodes: state.nodes(),
            distinct,
        })
    }

    /// Check parameters and split the active items into prices and minimum counts.
    fn validate(&self, items: &[Item]) -> Result<(Prices, MinCounts), InvalidInput> {
        if self.limit == 0 {
            return Err(InvalidInput::ZeroLimit);
        }

        let mut prices = Prices::new();
        let mut min_counts = MinCounts::new();

        for (index, item) in items.iter().enumerate().filter(|(_, item)| item.is_active()) {
            if item.price() <= Decimal::ZERO {
                return Err(InvalidInput::NonPositivePrice {
                    index,
                    price: item.price(),
                });
            }

            if item.min_count() > self.cap {
                return Err(InvalidInput::MinCountExceedsCap {
                    index,
                    min_count: item.min_count(),
                    cap: self.cap,
                });
            }

            prices.push(item.price());
            min_counts.push(item.min_count());
        }

        if prices.is_empty() {
            return Err(InvalidInput::NoItems);
        }

        Ok((prices, min_counts))
    }

    /// Depth-first walk over the additions, driven by the frame stack in `state`.
    fn backtrack(
        &self,
        state: &mut SearchState<'_>,
        found: &mut Found,
    ) -> Result<(), SearchError> {
        state.visit()?;

        if self.record(state, found) {
            return Ok(());
        }

        while let Some(index) = state.next_branch() {
            if !state.push(index) {
                continue;
            }

            state.visit()?;

            if self.record(state, found) {
                state.pop(index);
            } else {
                state.descend(index);
            }
        }

        Ok(())
    }

    /// Record the current composition if it qualifies, returning whether it did.
    fn record(&self, state: &SearchState<'_>, found: &mut Found) -> bool {
        if state.sum() <= self.threshold {
            return false;
        }

        let discovered = found.len();

        found
            .entry(canonical_form(state.composition()))
            .or_insert_with(|| (discovered, state.to_combination()));

        true
    }
}

/// Find the cheapest `limit` combinations of the active `items` whose total exceeds `threshold`,
/// picking each item at most `cap` times.
///
/// # Errors
///
/// See [`ComboSearch::run`].
pub fn search(
    items: &[Item],
    threshold: Decimal,
    cap: u32,
    limit: usize,
) -> Result<Vec<Combination>, SearchError> {
    ComboSearch::new(threshold, cap, limit).run(items)
}

/// Order distinct combinations by total, then discovery order, and keep the first `limit`.
fn rank(found: Found, limit: usize) -> Vec<Combination> {
    let mut ranked: Vec<(usize, Combination)> = found.into_values().collect();

    ranked.sort_unstable_by_key(|(discovered, combination)| (combination.total(), *discovered));
    ranked.truncate(limit);

    ranked.into_iter().map(|(_, combination)| combination).collect()
}
