//! Placement transitions and branch generation.
//!
//! A [`Branch`] is one search state: a grid snapshot plus its frontier.
//! [`branches`] expands a state by one piece, keeping only placements on the
//! topmost row that admits the piece at all.

use crate::feasibility::can_reach;
use crate::frontier::Frontier;
use crate::geometry::{fits, Point, Size};
use crate::grid::{Grid, PieceId, EMPTY};
use crate::pieces::Piece;

/// A grid snapshot and the anchors available on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub grid: Grid,
    pub frontier: Frontier,
}

impl Branch {
    /// The empty container with the top-left cell as the only anchor.
    pub fn initial(dims: Size) -> Self {
        Self {
            grid: Grid::new(dims),
            frontier: Frontier::initial(),
        }
    }
}

/// Stamps a piece at `origin` and updates the frontier. Inputs are untouched.
pub fn place(grid: &Grid, frontier: &Frontier, origin: Point, size: Size, id: PieceId) -> Branch {
    let grid = grid.stamp(origin, size, id);
    let frontier = frontier.advance(&grid, origin, size);
    Branch { grid, frontier }
}

/// All next states for `piece`, restricted to the minimum legal anchor row.
///
/// Anchors are tried in `(row, col)` order, each with the piece as given and
/// then swapped. When `remaining` is provided, a placement leaving a gap no
/// remaining pieces can span is not legal, so a row whose placements are all
/// rejected gives way to the next row down.
pub fn branches(state: &Branch, piece: &Piece, remaining: Option<&[Size]>) -> Vec<Branch> {
    let grid = &state.grid;
    let candidates: Vec<(Point, Size)> = state
        .frontier
        .sorted()
        .into_iter()
        .flat_map(|anchor| piece.size.orientations().map(move |size| (anchor, size)))
        .filter(|&(anchor, size)| {
            fits(grid.dims(), anchor, size) && grid.region_is_empty(anchor, size)
        })
        .filter(|&(anchor, size)| {
            remaining.map_or(true, |r| gaps_spannable(grid, anchor, size, r))
        })
        .collect();

    let Some(top_row) = candidates.iter().map(|(anchor, _)| anchor.row).min() else {
        return Vec::new();
    };

    candidates
        .into_iter()
        .filter(|(anchor, _)| anchor.row == top_row)
        .map(|(anchor, size)| place(grid, &state.frontier, anchor, size, piece.id))
        .collect()
}

/// True iff the empty runs right of the piece's top row and below its left
/// column can each be spanned by remaining pieces.
fn gaps_spannable(grid: &Grid, origin: Point, size: Size, remaining: &[Size]) -> bool {
    let right_gap = empty_run(grid, Point::new(origin.row, origin.col + size.width), |p| {
        Point::new(p.row, p.col + 1)
    });
    let below_gap = empty_run(grid, Point::new(origin.row + size.height, origin.col), |p| {
        Point::new(p.row + 1, p.col)
    });

    [right_gap, below_gap]
        .into_iter()
        .all(|gap| gap == 0 || can_reach(remaining, gap))
}

/// Number of consecutive empty cells starting at `start`, stepping with `next`.
fn empty_run(grid: &Grid, start: Point, next: impl Fn(Point) -> Point) -> usize {
    std::iter::successors(Some(start), |&p| Some(next(p)))
        .take_while(|&p| grid.get_checked(p) == Some(EMPTY))
        .count()
}
