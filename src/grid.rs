//! Grid representation for rectangle tilings.
//!
//! The grid is a flat row-major buffer where each cell contains a piece
//! label (1-based) or 0 for empty. Grids are never mutated once built:
//! [`Grid::stamp`] returns a new snapshot, so sibling search branches can
//! keep sharing the grid they were derived from.

use rustc_hash::FxHashMap;

use crate::geometry::{in_bounds, Point, Size};

/// Label stored in a grid cell.
pub type PieceId = u16;

/// Label of an unfilled cell.
pub const EMPTY: PieceId = 0;

/// Converts a cell coordinate to a linear index.
///
/// Index order is row-major: `idx = row * width + col`.
#[inline(always)]
pub const fn point_to_idx(point: Point, width: usize) -> usize {
    point.row * width + point.col
}

/// Converts a linear cell index back to a cell coordinate.
#[inline(always)]
pub const fn idx_to_point(idx: usize, width: usize) -> Point {
    Point::new(idx / width, idx % width)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dims: Size,
    cells: Box<[PieceId]>,
}

impl Grid {
    /// An all-empty grid of the given dimensions.
    pub fn new(dims: Size) -> Self {
        Self {
            dims,
            cells: vec![EMPTY; dims.height * dims.width].into_boxed_slice(),
        }
    }

    /// Builds a grid from rows of labels. Returns `None` for ragged input.
    pub fn from_rows(rows: &[Vec<PieceId>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            dims: Size::new(rows.len(), width),
            cells: rows.concat().into_boxed_slice(),
        })
    }

    #[inline]
    pub fn dims(&self) -> Size {
        self.dims
    }

    /// Label at `point`. The point must be inside the grid.
    #[inline]
    pub fn get(&self, point: Point) -> PieceId {
        self.cells[point_to_idx(point, self.dims.width)]
    }

    /// Label at `point`, or `None` if the point lies outside the grid.
    #[inline]
    pub fn get_checked(&self, point: Point) -> Option<PieceId> {
        in_bounds(point, self.dims).then(|| self.get(point))
    }

    #[inline]
    pub fn is_empty_at(&self, point: Point) -> bool {
        self.get(point) == EMPTY
    }

    /// True iff every cell of the `size` rectangle at `origin` is empty.
    ///
    /// The rectangle must fit inside the grid.
    pub fn region_is_empty(&self, origin: Point, size: Size) -> bool {
        (origin.row..origin.row + size.height).all(|row| {
            let start = point_to_idx(Point::new(row, origin.col), self.dims.width);
            self.cells[start..start + size.width]
                .iter()
                .all(|&cell| cell == EMPTY)
        })
    }

    /// Returns a copy of this grid with the `size` rectangle at `origin`
    /// labelled `id`.
    pub fn stamp(&self, origin: Point, size: Size, id: PieceId) -> Self {
        let mut cells = self.cells.clone();
        for row in origin.row..origin.row + size.height {
            let start = point_to_idx(Point::new(row, origin.col), self.dims.width);
            cells[start..start + size.width].fill(id);
        }
        Self {
            dims: self.dims,
            cells,
        }
    }

    /// True iff no cell is empty.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&cell| cell != EMPTY)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[PieceId]> {
        self.cells.chunks(self.dims.width.max(1))
    }

    /// Checks that this grid is a complete tiling by the given pieces.
    ///
    /// `sizes[k]` is the size of the piece labelled `k + 1`. Every cell must
    /// be filled, every label must be in range, and the cells bearing each
    /// label must form one rectangle matching an orientation of its piece.
    pub fn is_valid_tiling(&self, sizes: &[Size]) -> bool {
        if !self.is_complete() {
            return false;
        }
        let bounds = piece_bounds(self);
        if bounds.len() != sizes.len() {
            return false;
        }
        bounds.iter().all(|(&id, &(top_left, bottom_right, count))| {
            let Some(&expected) = sizes.get(usize::from(id) - 1) else {
                return false;
            };
            let actual = Size::new(
                bottom_right.row - top_left.row + 1,
                bottom_right.col - top_left.col + 1,
            );
            // a bounding box fully covered by its own label is a rectangle
            actual.area() == count
                && (actual == expected || actual == expected.transposed())
        })
    }
}

/// Bounding box and cell count of every non-empty label in the grid.
///
/// Maps each label to `(top_left, bottom_right, cell_count)`.
pub fn piece_bounds(grid: &Grid) -> FxHashMap<PieceId, (Point, Point, u64)> {
    let mut bounds: FxHashMap<PieceId, (Point, Point, u64)> = FxHashMap::default();
    for (idx, &id) in grid.cells.iter().enumerate() {
        if id == EMPTY {
            continue;
        }
        let point = idx_to_point(idx, grid.dims.width);
        let entry = bounds.entry(id).or_insert((point, point, 0));
        entry.0.row = entry.0.row.min(point.row);
        entry.0.col = entry.0.col.min(point.col);
        entry.1.row = entry.1.row.max(point.row);
        entry.1.col = entry.1.col.max(point.col);
        entry.2 += 1;
    }
    bounds
}

/// Row-major text: one line per row, labels separated by single spaces.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for (col, label) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{label}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for idx in 0..12 {
            let point = idx_to_point(idx, 3);
            assert!(point.row < 4 && point.col < 3, "{idx} produced {point}");
            assert_eq!(point_to_idx(point, 3), idx, "Roundtrip failed for index {idx}");
        }
    }

    #[test]
    fn test_stamp_leaves_original_untouched() {
        let empty = Grid::new(Size::new(3, 3));
        let stamped = empty.stamp(Point::new(1, 1), Size::new(2, 1), 4);

        assert!(empty.region_is_empty(Point::ORIGIN, Size::new(3, 3)));
        assert_eq!(stamped.get(Point::new(1, 1)), 4);
        assert_eq!(stamped.get(Point::new(2, 1)), 4);
        assert_eq!(stamped.get(Point::new(1, 2)), EMPTY);
        assert!(!stamped.region_is_empty(Point::new(0, 0), Size::new(2, 2)));
        assert!(stamped.region_is_empty(Point::new(0, 2), Size::new(3, 1)));
    }

    #[test]
    fn test_get_checked_outside_grid() {
        let grid = Grid::new(Size::new(2, 2));
        assert_eq!(grid.get_checked(Point::new(1, 1)), Some(EMPTY));
        assert_eq!(grid.get_checked(Point::new(2, 0)), None);
    }

    #[test]
    fn test_display_is_row_major() {
        let grid = Grid::new(Size::new(2, 3))
            .stamp(Point::ORIGIN, Size::new(2, 1), 1)
            .stamp(Point::new(0, 1), Size::new(1, 2), 2);
        assert_eq!(grid.to_string(), "1 2 2\n1 0 0\n");
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&[vec![1, 2], vec![3]]).is_none());
        let grid = Grid::from_rows(&[vec![1, 2], vec![1, 2]]).unwrap();
        assert_eq!(grid.dims(), Size::new(2, 2));
        assert!(grid.is_complete());
    }

    #[test]
    fn test_valid_tiling_accepts_either_orientation() {
        let grid = Grid::from_rows(&[vec![1, 1, 2], vec![1, 1, 2], vec![1, 1, 2]]).unwrap();
        assert!(grid.is_valid_tiling(&[Size::new(3, 2), Size::new(3, 1)]));
        assert!(grid.is_valid_tiling(&[Size::new(2, 3), Size::new(1, 3)]));
        assert!(!grid.is_valid_tiling(&[Size::new(3, 1), Size::new(3, 2)]));
    }

    #[test]
    fn test_valid_tiling_rejects_non_rectangular_label() {
        // label 1 forms an L
        let grid = Grid::from_rows(&[vec![1, 2], vec![1, 1]]).unwrap();
        assert!(!grid.is_valid_tiling(&[Size::new(2, 2), Size::new(1, 1)]));
        let bounds = piece_bounds(&grid);
        assert_eq!(bounds[&1], (Point::new(0, 0), Point::new(1, 1), 3));
    }
}
