//! Depth-first backtracking over one fixed piece order.
//!
//! Each level places the next piece of the order on every branch produced
//! by [`branches`] and recurses. The multiset of pieces still to be placed
//! is updated in place on the way down and restored on the way back up, so
//! sibling branches always see the same remaining pieces.

use crate::geometry::Size;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::placement::{branches, Branch};

/// How many completions one search reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolutionPolicy {
    /// Stop at the first full tiling.
    #[default]
    First,
    /// Explore every branch and collect every full tiling.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub policy: SolutionPolicy,
    /// Reject placements whose adjacent gaps no remaining pieces can span.
    pub feasibility_pruning: bool,
}

/// Result of searching one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one tiling; exactly one under [`SolutionPolicy::First`].
    Solved(Vec<Grid>),
    Exhausted,
}

impl SearchOutcome {
    pub fn into_grids(self) -> Vec<Grid> {
        match self {
            SearchOutcome::Solved(grids) => grids,
            SearchOutcome::Exhausted => Vec::new(),
        }
    }
}

/// A full tiling together with the order that produced it.
///
/// Label `k` in the grid is the piece at `order[k - 1]`, so the order maps
/// labels back to shape indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub order: Vec<usize>,
    pub grid: Grid,
}

/// Sizes of the pieces not yet placed on the current search path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainingPieces {
    sizes: Vec<Size>,
}

impl RemainingPieces {
    pub fn new(sizes: Vec<Size>) -> Self {
        Self { sizes }
    }

    /// Removes one piece of `size`. Returns `false` if none is left.
    pub fn remove(&mut self, size: Size) -> bool {
        match self.sizes.iter().position(|&s| s == size) {
            Some(index) => {
                self.sizes.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn restore(&mut self, size: Size) {
        self.sizes.push(size);
    }

    pub fn as_slice(&self) -> &[Size] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl FromIterator<Size> for RemainingPieces {
    fn from_iter<I: IntoIterator<Item = Size>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Searches for tilings placing `order` in sequence, starting from `start`.
///
/// `remaining` must hold the sizes of every piece in `order`; it is left
/// unchanged when the search returns.
pub fn search(
    order: &[Piece],
    start: &Branch,
    remaining: &mut RemainingPieces,
    options: SearchOptions,
) -> SearchOutcome {
    let mut found = Vec::new();
    explore(order, start, 0, remaining, options, &mut found);

    if found.is_empty() {
        SearchOutcome::Exhausted
    } else {
        SearchOutcome::Solved(found)
    }
}

/// Returns `true` if any tiling was found below `state`.
fn explore(
    order: &[Piece],
    state: &Branch,
    index: usize,
    remaining: &mut RemainingPieces,
    options: SearchOptions,
    found: &mut Vec<Grid>,
) -> bool {
    let Some(piece) = order.get(index) else {
        found.push(state.grid.clone());
        return true;
    };

    remaining.remove(piece.size);

    let pruning = options.feasibility_pruning.then_some(remaining.as_slice());
    let next_states = branches(state, piece, pruning);

    let mut solved = false;
    for next in &next_states {
        if explore(order, next, index + 1, remaining, options, found) {
            solved = true;
            if options.policy == SolutionPolicy::First {
                break;
            }
        }
    }

    remaining.restore(piece.size);
    solved
}
