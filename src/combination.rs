//! Combinations

use rust_decimal::Decimal;
use smallvec::SmallVec;

/// Prices making up one combination.
pub type Composition = SmallVec<[Decimal; 16]>;

/// How many times each item of the searched snapshot was picked.
pub type Quantities = SmallVec<[u32; 20]>;

/// A qualifying combination found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    /// Sum of all prices in the combination
    total: Decimal,

    /// Prices in selection order: minimum counts first, then additions
    prices: Composition,

    /// Pick count per active item, aligned with the searched snapshot
    quantities: Quantities,
}

impl Combination {
    pub(crate) fn new(total: Decimal, prices: Composition, quantities: Quantities) -> Self {
        Self {
            total,
            prices,
            quantities,
        }
    }

    /// Sum of all prices in the combination
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Prices in the order they were picked
    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// Pick count per active item
    pub fn quantities(&self) -> &[u32] {
        &self.quantities
    }

    /// Sorted prices; two combinations with equal canonical forms are the same basket.
    pub fn canonical(&self) -> Composition {
        canonical_form(&self.prices)
    }

    /// Whether both combinations contain the same prices, ignoring order.
    pub fn same_composition(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }

    /// How far the total lands above `threshold`.
    pub fn surplus(&self, threshold: Decimal) -> Decimal {
        self.total - threshold
    }

    /// Number of prices in the combination
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the combination holds no prices
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Sorts a composition into its canonical form.
pub(crate) fn canonical_form(prices: &[Decimal]) -> Composition {
    let mut canonical = Composition::from_slice(prices);

    canonical.sort_unstable();

    canonical
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn combination(prices: &[i64]) -> Combination {
        let prices: Composition = prices.iter().map(|&p| Decimal::new(p, 0)).collect();
        let total = prices.iter().sum();

        Combination::new(total, prices, smallvec![])
    }

    #[test]
    fn canonical_sorts_prices() {
        let combo = combination(&[60, 40, 60]);

        let expected: Composition = smallvec![
            Decimal::new(40, 0),
            Decimal::new(60, 0),
            Decimal::new(60, 0)
        ];

        assert_eq!(combo.canonical(), expected);
        assert_eq!(combo.prices().first(), Some(&Decimal::new(60, 0)));
    }

    #[test]
    fn same_composition_ignores_order() {
        assert!(combination(&[60, 40]).same_composition(&combination(&[40, 60])));
        assert!(!combination(&[60, 40]).same_composition(&combination(&[60, 60])));
    }

    #[test]
    fn canonical_treats_equal_decimals_with_different_scales_alike() {
        let a = Combination::new(
            Decimal::new(150, 1),
            smallvec![Decimal::new(150, 1)],
            smallvec![1],
        );
        let b = Combination::new(
            Decimal::new(1500, 2),
            smallvec![Decimal::new(1500, 2)],
            smallvec![1],
        );

        assert!(a.same_composition(&b));
    }

    #[test]
    fn surplus_and_len() {
        let combo = combination(&[30, 30, 30, 30]);

        assert_eq!(combo.total(), Decimal::new(120, 0));
        assert_eq!(combo.surplus(Decimal::ONE_HUNDRED), Decimal::new(20, 0));
        assert_eq!(combo.len(), 4);
        assert!(!combo.is_empty());
    }
}
