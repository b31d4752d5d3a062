//! Search State

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    combination::{Combination, Composition, Quantities},
    search::SearchError,
};

/// A branch of the search still being explored.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Item added on entering the branch, `None` for the starting basket
    picked: Option<usize>,

    /// Next item to try adding
    next: usize,
}

/// Mutable state owned by a single search call.
///
/// Every [`SearchState::push`] that returns `true` must be paired either with a
/// [`SearchState::pop`] of the same index or with a [`SearchState::descend`],
/// whose frame pops the item once its branch is exhausted.
#[derive(Debug)]
pub(crate) struct SearchState<'a> {
    frames: Vec<Frame>,
    prices: &'a [Decimal],
    remaining: SmallVec<[u32; 20]>,
    counts: Quantities,
    composition: Composition,
    sum: Decimal,
    nodes: u64,
    node_budget: Option<u64>,
}

impl<'a> SearchState<'a> {
    /// Seed the state with each price repeated `min_counts[i]` times.
    ///
    /// `prices` and `min_counts` must have equal lengths and every minimum must be
    /// at most `cap`; the caller validates both.
    pub(crate) fn seeded(
        prices: &'a [Decimal],
        min_counts: &[u32],
        cap: u32,
        node_budget: Option<u64>,
    ) -> Self {
        let mut composition = Composition::new();
        let mut sum = Decimal::ZERO;

        for (&price, &min_count) in prices.iter().zip(min_counts) {
            for _ in 0..min_count {
                composition.push(price);
                sum += price;
            }
        }

        Self {
            frames: vec![Frame {
                picked: None,
                next: 0,
            }],
            prices,
            remaining: min_counts
                .iter()
                .map(|&min_count| cap.saturating_sub(min_count))
                .collect(),
            counts: Quantities::from_slice(min_counts),
            composition,
            sum,
            nodes: 0,
            node_budget,
        }
    }

    /// Number of items being searched
    pub(crate) fn item_count(&self) -> usize {
        self.prices.len()
    }

    /// Running total of the current composition
    pub(crate) fn sum(&self) -> Decimal {
        self.sum
    }

    /// Nodes visited so far
    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Count a visited node against the budget.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::BudgetExceeded`] once the budget is used up.
    pub(crate) fn visit(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;

        match self.node_budget {
            Some(budget) if self.nodes > budget => Err(SearchError::BudgetExceeded { budget }),
            _ => Ok(()),
        }
    }

    /// Add one unit of item `index`, returning `false` if it has no picks left.
    pub(crate) fn push(&mut self, index: usize) -> bool {
        let (Some(remaining), Some(count), Some(&price)) = (
            self.remaining.get_mut(index),
            self.counts.get_mut(index),
            self.prices.get(index),
        ) else {
            return false;
        };

        if *remaining == 0 {
            return false;
        }

        *remaining -= 1;
        *count += 1;

        self.composition.push(price);
        self.sum += price;

        true
    }

    /// Undo the last successful [`SearchState::push`] of item `index`.
    pub(crate) fn pop(&mut self, index: usize) {
        if let (Some(remaining), Some(count)) =
            (self.remaining.get_mut(index), self.counts.get_mut(index))
        {
            *remaining += 1;
            *count -= 1;
        }

        if let Some(price) = self.composition.pop() {
            self.sum -= price;
        }
    }

    /// Explore the branch opened by the last push of item `index`.
    ///
    /// Items before `index` are not tried again below it, so each count vector is
    /// reached once.
    pub(crate) fn descend(&mut self, index: usize) {
        self.frames.push(Frame {
            picked: Some(index),
            next: index,
        });
    }

    /// Next item to try adding, leaving exhausted branches on the way.
    ///
    /// Returns `None` once every branch has been explored.
    pub(crate) fn next_branch(&mut self) -> Option<usize> {
        let item_count = self.item_count();

        loop {
            let frame = self.frames.last_mut()?;

            if frame.next < item_count {
                let index = frame.next;

                frame.next += 1;

                return Some(index);
            }

            if let Some(Frame {
                picked: Some(index),
                ..
            }) = self.frames.pop()
            {
                self.pop(index);
            }
        }
    }

    /// Current composition
    pub(crate) fn composition(&self) -> &[Decimal] {
        &self.composition
    }

    /// Copy the current composition out as a result.
    pub(crate) fn to_combination(&self) -> Combination {
        Combination::new(self.sum, self.composition.clone(), self.counts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> [Decimal; 2] {
        [Decimal::new(60, 0), Decimal::new(40, 0)]
    }

    #[test]
    fn seeded_builds_base_from_minimums() {
        let prices = prices();
        let state = SearchState::seeded(&prices, &[2, 1], 10, None);

        assert_eq!(state.sum(), Decimal::new(160, 0));
        assert_eq!(state.composition().len(), 3);
        assert_eq!(state.to_combination().quantities(), &[2, 1]);
    }

    #[test]
    fn push_respects_remaining_picks() {
        let prices = prices();
        let mut state = SearchState::seeded(&prices, &[1, 0], 2, None);

        assert!(state.push(0), "one pick left under the cap");
        assert!(!state.push(0), "cap reached");
        assert!(!state.push(5), "unknown index");
        assert_eq!(state.sum(), Decimal::new(120, 0));
    }

    #[test]
    fn pop_restores_previous_state() {
        let prices = prices();
        let mut state = SearchState::seeded(&prices, &[0, 0], 10, None);

        assert!(state.push(1), "item has picks left");
        state.pop(1);

        assert_eq!(state.sum(), Decimal::ZERO);
        assert!(state.composition().is_empty());
        assert_eq!(state.to_combination().quantities(), &[0, 0]);
    }

    #[test]
    fn branches_walk_items_in_order() {
        let prices = prices();
        let mut state = SearchState::seeded(&prices, &[0, 0], 10, None);

        assert_eq!(state.next_branch(), Some(0));
        assert_eq!(state.next_branch(), Some(1));
        assert_eq!(state.next_branch(), None);
    }

    #[test]
    fn leaving_a_branch_undoes_its_pick() {
        let prices = prices();
        let mut state = SearchState::seeded(&prices, &[0, 0], 10, None);

        assert_eq!(state.next_branch(), Some(0));
        assert!(state.push(0), "item has picks left");
        state.descend(0);

        assert_eq!(state.next_branch(), Some(0), "repeats come first");
        assert_eq!(state.next_branch(), Some(1));
        assert_eq!(state.sum(), Decimal::new(60, 0));

        // the branch below 60 is exhausted, so the root moves on to 40
        assert_eq!(state.next_branch(), Some(1));
        assert_eq!(state.sum(), Decimal::ZERO);
        assert!(state.composition().is_empty());
        assert_eq!(state.next_branch(), None);
    }

    #[test]
    fn visit_enforces_node_budget() {
        let prices = prices();
        let mut state = SearchState::seeded(&prices, &[0, 0], 10, Some(2));

        assert_eq!(state.visit(), Ok(()));
        assert_eq!(state.visit(), Ok(()));
        assert_eq!(
            state.visit(),
            Err(SearchError::BudgetExceeded { budget: 2 })
        );
        assert_eq!(state.nodes(), 3);
    }
}
