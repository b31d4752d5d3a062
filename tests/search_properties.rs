//! Search properties, checked against a brute-force enumeration of every count vector

use std::cmp::Reverse;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use testresult::TestResult;

use spendfloor::{
    combination::{Combination, Composition},
    items::Item,
    search::ComboSearch,
};

/// Small deterministic generator for varied inputs
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> i64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        i64::try_from((self.0 >> 33) % bound).unwrap_or_default()
    }
}

fn random_case(rng: &mut Lcg) -> (Vec<Item>, ComboSearch) {
    let item_count = rng.next(4) + 1;

    let items = (0..item_count)
        .map(|_| {
            let price = Decimal::new((rng.next(43) + 6) * 50, 2);
            let min_count = u32::try_from(rng.next(3)).unwrap_or_default();

            Item::with_min_count(price, min_count)
        })
        .collect();

    let search = ComboSearch::default()
        .with_threshold(Decimal::new(rng.next(40) + 20, 0))
        .with_cap(4)
        .with_limit(usize::try_from(rng.next(6) + 1).unwrap_or(1));

    (items, search)
}

/// Every count vector the search should stop at, cheapest first.
///
/// A vector is a stopping point when it crosses the threshold and either is the
/// starting basket, or dropping one unit of its highest-indexed extra pick puts it
/// back at or below the threshold.
///
/// The search adds lower-indexed items first, so it reaches count vectors in
/// descending lexicographic order. Equal totals keep that order, and of several
/// vectors holding the same prices only the first reached is kept.
fn brute_force(items: &[Item], search: &ComboSearch) -> Vec<(Decimal, Composition)> {
    let prices: Vec<Decimal> = items.iter().map(Item::price).collect();
    let mins: Vec<u32> = items.iter().map(Item::min_count).collect();

    let mut counts = mins.clone();
    let mut stops = Vec::<(Decimal, Reverse<Vec<u32>>, Composition)>::new();

    loop {
        let total: Decimal = prices
            .iter()
            .zip(&counts)
            .map(|(&price, &count)| price * Decimal::from(count))
            .sum();

        let last_extra = counts
            .iter()
            .zip(&mins)
            .zip(&prices)
            .rev()
            .find(|((count, min), _)| count > min)
            .map(|(_, &price)| price);

        let stopped = total > search.threshold()
            && last_extra.is_none_or(|price| total - price <= search.threshold());

        if stopped {
            let mut canonical = Composition::new();

            for (&price, &count) in prices.iter().zip(&counts) {
                canonical.extend(std::iter::repeat_n(
                    price,
                    usize::try_from(count).unwrap_or_default(),
                ));
            }

            canonical.sort_unstable();
            stops.push((total, Reverse(counts.clone()), canonical));
        }

        // odometer over [min, cap] per item
        let mut carried = true;

        for (count, &min) in counts.iter_mut().zip(&mins) {
            if *count < search.cap() {
                *count += 1;
                carried = false;

                break;
            }

            *count = min;
        }

        if carried {
            break;
        }
    }

    stops.sort_unstable();

    let mut seen = FxHashSet::<Composition>::default();

    stops
        .into_iter()
        .filter(|(_, _, canonical)| seen.insert(canonical.clone()))
        .map(|(total, _, canonical)| (total, canonical))
        .take(search.limit())
        .collect()
}

fn check_invariants(items: &[Item], search: &ComboSearch, result: &[Combination]) {
    assert!(result.len() <= search.limit(), "too many results");

    for pair in result.windows(2) {
        if let [a, b] = pair {
            assert!(a.total() <= b.total(), "results out of order");
            assert!(!a.same_composition(b), "duplicate composition");
        }
    }

    for combination in result {
        assert!(
            combination.total() > search.threshold(),
            "total does not exceed threshold"
        );

        let sum: Decimal = combination.prices().iter().sum();

        assert_eq!(sum, combination.total(), "total does not match prices");
        assert_eq!(
            combination.quantities().len(),
            items.len(),
            "quantities not aligned with items"
        );

        for (item, &count) in items.iter().zip(combination.quantities()) {
            assert!(count >= item.min_count(), "minimum count violated");
            assert!(count <= search.cap(), "cap violated");
        }
    }
}

#[test]
fn matches_brute_force_on_generated_inputs() -> TestResult {
    let mut rng = Lcg(0x5eed);

    for _ in 0..200 {
        let (items, search) = random_case(&mut rng);

        let result = search.run(&items)?;

        check_invariants(&items, &search, &result);

        let actual: Vec<(Decimal, Composition)> = result
            .iter()
            .map(|combination| (combination.total(), combination.canonical()))
            .collect();

        assert_eq!(actual, brute_force(&items, &search), "items: {items:?}");
    }

    Ok(())
}

#[test]
fn equal_totals_keep_the_order_they_were_reached() -> TestResult {
    let items = [
        Item::new(Decimal::new(60, 0)),
        Item::new(Decimal::new(40, 0)),
        Item::new(Decimal::new(30, 0)),
    ];

    let result = ComboSearch::default().run(&items)?;

    let tied: Vec<Composition> = result
        .iter()
        .filter(|combination| combination.total() == Decimal::new(120, 0))
        .map(Combination::canonical)
        .collect();

    let expected: Vec<Composition> = [
        vec![60, 60],
        vec![30, 30, 60],
        vec![40, 40, 40],
        vec![30, 30, 30, 30],
    ]
    .into_iter()
    .map(|prices| prices.into_iter().map(Decimal::from).collect())
    .collect();

    assert_eq!(tied, expected);

    Ok(())
}

#[test]
fn repeated_searches_are_identical() -> TestResult {
    let items = [
        Item::new(Decimal::new(1999, 2)),
        Item::with_min_count(Decimal::new(2450, 2), 1),
        Item::new(Decimal::new(899, 2)),
    ];
    let search = ComboSearch::default();

    let first = search.run(&items)?;

    for _ in 0..5 {
        assert_eq!(search.run(&items)?, first, "search should be deterministic");
    }

    Ok(())
}

#[test]
fn searches_run_independently_on_threads() -> TestResult {
    let items = vec![Item::new(Decimal::new(60, 0)), Item::new(Decimal::new(40, 0))];
    let expected = ComboSearch::default().run(&items)?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let items = items.clone();

            std::thread::spawn(move || ComboSearch::default().run(&items))
        })
        .collect();

    for handle in handles {
        let result = handle.join().map_err(|_err| "search thread panicked")??;

        assert_eq!(result, expected);
    }

    Ok(())
}
