//! Anchor tracking for the placement search.
//!
//! The frontier is the set of cells where the next piece may have its
//! top-left corner. It is not every empty cell: an anchor is an empty cell
//! whose upper neighbour and left neighbour are both filled (or outside the
//! grid). Placing a piece can only expose new anchors directly below its
//! bottom edge and directly right of its right edge, so the frontier is
//! updated incrementally with at most one removal and two insertions.

use rustc_hash::FxHashSet;

use crate::geometry::{in_bounds, Axis, Point, Size};
use crate::grid::{Grid, EMPTY};

/// Unordered set of anchors. Never holds a filled cell or a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frontier {
    anchors: FxHashSet<Point>,
}

impl Frontier {
    /// The frontier of an empty grid: only the top-left cell.
    pub fn initial() -> Self {
        let mut anchors = FxHashSet::default();
        anchors.insert(Point::ORIGIN);
        Self { anchors }
    }

    /// Recomputes the frontier of `grid` from scratch.
    ///
    /// Matches the incrementally maintained frontier for any grid reached
    /// by placing pieces on anchors, starting from [`Frontier::initial`].
    pub fn derive(grid: &Grid) -> Self {
        let dims = grid.dims();
        let filled = |point: Option<Point>| point.map_or(true, |p| !grid.is_empty_at(p));

        let anchors = (0..dims.height)
            .flat_map(|row| (0..dims.width).map(move |col| Point::new(row, col)))
            .filter(|&point| grid.is_empty_at(point))
            .filter(|&point| {
                let above = point.row.checked_sub(1).map(|row| Point::new(row, point.col));
                let left = point.col.checked_sub(1).map(|col| Point::new(point.row, col));
                filled(above) && filled(left)
            })
            .collect();

        Self { anchors }
    }

    /// Frontier after a piece of `size` was stamped at `origin`.
    ///
    /// `grid` must already contain the piece. `origin` is consumed and the
    /// anchors exposed along the bottom and right edges are added.
    pub fn advance(&self, grid: &Grid, origin: Point, size: Size) -> Self {
        let mut anchors = self.anchors.clone();
        anchors.remove(&origin);
        anchors.extend(exposed_anchor(grid, origin, size, Axis::Rows));
        anchors.extend(exposed_anchor(grid, origin, size, Axis::Cols));
        Self { anchors }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.anchors.contains(&point)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.anchors.iter().copied()
    }

    /// Anchors in `(row, col)` order.
    pub fn sorted(&self) -> Vec<Point> {
        let mut anchors: Vec<Point> = self.iter().collect();
        anchors.sort_unstable();
        anchors
    }
}

/// Finds the anchor exposed beyond one edge of a freshly placed piece.
///
/// Works in coordinates seen along `axis`: for `Axis::Rows` this scans the
/// row below the piece, for `Axis::Cols` the same procedure runs on the
/// transposed grid and scans the column to the right of the piece.
fn exposed_anchor(grid: &Grid, origin: Point, size: Size, axis: Axis) -> Option<Point> {
    let dims = grid.dims().along(axis);
    let origin = origin.along(axis);
    let size = size.along(axis);
    let is_empty = |point: Point| grid.get(point.along(axis)) == EMPTY;

    let below = origin.row + size.height;
    if below >= dims.height {
        return None;
    }

    // leftmost empty cell bordering the piece; none means the edge is sealed
    let first_empty = (origin.col..origin.col + size.width)
        .find(|&col| is_empty(Point::new(below, col)))?;

    if first_empty > origin.col {
        return Some(Point::new(below, first_empty).along(axis));
    }

    // an empty diagonal cell means the neighbouring region supplies this anchor
    let diagonal = origin
        .col
        .checked_sub(1)
        .map(|col| Point::new(below, col))
        .filter(|&point| in_bounds(point, dims));
    match diagonal {
        Some(point) if is_empty(point) => None,
        _ => Some(Point::new(below, origin.col).along(axis)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::fits;
    use proptest::prelude::*;

    fn place(grid: &Grid, frontier: &Frontier, origin: Point, size: Size, id: u16) -> (Grid, Frontier) {
        let grid = grid.stamp(origin, size, id);
        let frontier = frontier.advance(&grid, origin, size);
        (grid, frontier)
    }

    #[test]
    fn test_first_piece_exposes_bottom_and_right_anchors() {
        let grid = Grid::new(Size::new(3, 3));
        let (_, frontier) = place(&grid, &Frontier::initial(), Point::ORIGIN, Size::new(2, 2), 1);

        assert_eq!(frontier.sorted(), vec![Point::new(0, 2), Point::new(2, 0)]);
    }

    #[test]
    fn test_full_height_piece_only_exposes_right_anchor() {
        let grid = Grid::new(Size::new(3, 3));
        let (_, frontier) = place(&grid, &Frontier::initial(), Point::ORIGIN, Size::new(3, 2), 1);

        assert_eq!(frontier.sorted(), vec![Point::new(0, 2)]);
    }

    #[test]
    fn test_empty_diagonal_suppresses_bottom_anchor() {
        // 1 . .      1 2 .
        // . . .  ->  . 2 .
        // . . .      . . .
        let grid = Grid::new(Size::new(3, 3));
        let (grid, frontier) = place(&grid, &Frontier::initial(), Point::ORIGIN, Size::new(1, 1), 1);
        let (_, frontier) = place(&grid, &frontier, Point::new(0, 1), Size::new(2, 1), 2);

        // (2, 1) has an empty left neighbour, so only the right edge yields an anchor
        assert_eq!(frontier.sorted(), vec![Point::new(0, 2), Point::new(1, 0)]);
    }

    #[test]
    fn test_partially_covered_edge_anchors_at_first_gap() {
        // 1 3 3
        // 2 . .
        // 2 . .
        let grid = Grid::new(Size::new(3, 3));
        let (grid, frontier) = place(&grid, &Frontier::initial(), Point::ORIGIN, Size::new(1, 1), 1);
        let (grid, frontier) = place(&grid, &frontier, Point::new(1, 0), Size::new(2, 1), 2);
        let (_, frontier) = place(&grid, &frontier, Point::new(0, 1), Size::new(1, 2), 3);

        assert_eq!(frontier.sorted(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn test_sealed_edge_exposes_nothing() {
        let grid = Grid::new(Size::new(2, 2));
        let (grid, frontier) = place(&grid, &Frontier::initial(), Point::ORIGIN, Size::new(2, 1), 1);
        let (grid, frontier) = place(&grid, &frontier, Point::new(0, 1), Size::new(2, 1), 2);

        assert!(frontier.is_empty());
        assert!(grid.is_complete());
    }

    #[test]
    fn test_derive_on_empty_grid_is_initial() {
        let grid = Grid::new(Size::new(4, 5));
        assert_eq!(Frontier::derive(&grid), Frontier::initial());
    }

    #[test]
    fn test_derive_matches_incremental_updates() {
        let grid = Grid::new(Size::new(4, 4));
        let steps = [
            (Point::new(0, 0), Size::new(1, 1)),
            (Point::new(0, 1), Size::new(2, 1)),
            (Point::new(0, 2), Size::new(1, 2)),
            (Point::new(1, 0), Size::new(3, 1)),
            (Point::new(1, 2), Size::new(1, 2)),
        ];
        let mut state = (grid, Frontier::initial());
        for (id, (origin, size)) in steps.into_iter().enumerate() {
            assert!(state.1.contains(origin), "{origin} is not an anchor before step {id}");
            state = place(&state.0, &state.1, origin, size, id as u16 + 1);
            assert_eq!(
                state.1,
                Frontier::derive(&state.0),
                "Incremental frontier diverged after step {id}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_incremental_matches_derived(
            height in 1usize..7,
            width in 1usize..7,
            moves in prop::collection::vec((1usize..4, 1usize..4, any::<usize>(), any::<bool>()), 1..20),
        ) {
            let mut grid = Grid::new(Size::new(height, width));
            let mut frontier = Frontier::initial();
            let mut id = 0u16;

            for (h, w, pick, swap) in moves {
                let anchors = frontier.sorted();
                if anchors.is_empty() {
                    break;
                }
                let origin = anchors[pick % anchors.len()];
                let size = if swap { Size::new(w, h) } else { Size::new(h, w) };
                if !fits(grid.dims(), origin, size) || !grid.region_is_empty(origin, size) {
                    continue;
                }

                id += 1;
                grid = grid.stamp(origin, size, id);
                frontier = frontier.advance(&grid, origin, size);

                prop_assert!(frontier.iter().all(|p| grid.is_empty_at(p)), "anchor on a filled cell");
                prop_assert_eq!(&frontier, &Frontier::derive(&grid));
            }
        }
    }
}
