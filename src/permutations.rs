//! Distinct orderings of a piece usage multiset.
//!
//! Two uses of the same shape are interchangeable, so searching both of
//! their relative orders would repeat work. Orders are enumerated as
//! distinct permutations of the multiset of shape indices.

use rustc_hash::FxHashMap;

/// Number of distinct permutations: `n! / (c_1! * c_2! * ... * c_k!)`.
///
/// Computed incrementally as a product of binomial coefficients so
/// intermediate values stay small. Saturates at `u128::MAX`.
pub fn count_unique_permutations(items: &[usize]) -> u128 {
    let mut counts: FxHashMap<usize, u128> = FxHashMap::default();
    let mut total: u128 = 1;
    let mut placed: u128 = 0;

    for &item in items {
        let count = counts.entry(item).or_insert(0);
        *count += 1;
        placed += 1;
        // multiply by C(placed, count) / C(placed - 1, count - 1) = placed / count
        total = match total.checked_mul(placed) {
            Some(product) => product / *count,
            None => return u128::MAX,
        };
    }

    total
}

/// Iterator over the distinct permutations of a multiset, in lexicographic
/// order starting from the sorted arrangement.
#[derive(Debug, Clone)]
pub struct MultisetPermutations {
    current: Vec<usize>,
    exhausted: bool,
}

impl MultisetPermutations {
    pub fn new(items: &[usize]) -> Self {
        let mut current = items.to_vec();
        current.sort_unstable();
        Self {
            current,
            exhausted: false,
        }
    }
}

impl Iterator for MultisetPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();
        self.exhausted = !next_permutation(&mut self.current);
        Some(item)
    }
}

/// Advances `items` to the next lexicographic arrangement.
///
/// Returns `false` when `items` is already the last arrangement.
fn next_permutation(items: &mut [usize]) -> bool {
    // rightmost position whose value can still grow
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    // the suffix after the pivot is non-increasing: swap with the rightmost larger value
    let Some(successor) = items.iter().rposition(|&value| value > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
