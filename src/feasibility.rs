//! Bounded subset-sum check used to prune placements that leave a gap no
//! combination of remaining pieces can span.

use crate::geometry::Size;

/// Maximum number of pieces combined to span one gap.
pub const MAX_TERMS: usize = 5;

/// True iff `target` is a sum of 1 to [`MAX_TERMS`] values, each taken from
/// a different piece in `remaining`, one side length per piece.
///
/// Sums that need more than [`MAX_TERMS`] pieces are reported unreachable.
pub fn can_reach(remaining: &[Size], target: usize) -> bool {
    if target == 0 {
        return false;
    }

    // reachable[k][s]: some k distinct pieces contribute sides summing to s
    let mut reachable = vec![vec![false; target + 1]; MAX_TERMS + 1];
    reachable[0][0] = true;

    for piece in remaining {
        // walk term counts downwards so each piece is used at most once
        for terms in (1..=MAX_TERMS).rev() {
            for side in piece.orientations().map(|size| size.height) {
                for sum in (side..=target).rev() {
                    if reachable[terms - 1][sum - side] {
                        reachable[terms][sum] = true;
                    }
                }
            }
        }
        if reachable[1..].iter().any(|sums| sums[target]) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sizes(pairs: &[(usize, usize)]) -> Vec<Size> {
        pairs.iter().map(|&(h, w)| Size::new(h, w)).collect()
    }

    #[test]
    fn test_reachable_by_combining_two_pieces() {
        let remaining = sizes(&[(1, 2), (3, 4)]);
        assert!(can_reach(&remaining, 5), "1 + 4 should reach 5");
        assert!(can_reach(&remaining, 4));
        assert!(can_reach(&remaining, 6));
        assert!(!can_reach(&remaining, 100));
    }

    #[test]
    fn test_piece_contributes_one_side_only() {
        // 1 + 2 would need both sides of the same piece
        assert!(!can_reach(&sizes(&[(1, 2)]), 3));
    }

    #[test]
    fn test_zero_target_and_no_pieces_unreachable() {
        assert!(!can_reach(&sizes(&[(1, 2)]), 0));
        assert!(!can_reach(&[], 1));
    }

    #[test]
    fn test_more_than_five_terms_unreachable() {
        let remaining = sizes(&[(1, 1); 6]);
        assert!(can_reach(&remaining, 5));
        assert!(!can_reach(&remaining, 6));
    }

    /// Exhaustive reference: every subset of at most five pieces, every side choice.
    fn brute_force(remaining: &[Size], target: usize) -> bool {
        fn go(remaining: &[Size], target: usize, sum: usize, terms: usize) -> bool {
            if terms > 0 && sum == target {
                return true;
            }
            if terms == MAX_TERMS || sum >= target {
                return false;
            }
            remaining.iter().enumerate().any(|(i, piece)| {
                [piece.height, piece.width]
                    .into_iter()
                    .any(|side| go(&remaining[i + 1..], target, sum + side, terms + 1))
            })
        }
        go(remaining, target, 0, 0)
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(
            pairs in prop::collection::vec((1usize..8, 1usize..8), 0..7),
            target in 1usize..30,
        ) {
            let remaining: Vec<Size> = pairs.iter().map(|&(h, w)| Size::new(h, w)).collect();
            prop_assert_eq!(can_reach(&remaining, target), brute_force(&remaining, target));
        }
    }
}
