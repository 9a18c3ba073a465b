//! Rectangle geometry on an integer grid.
//!
//! Coordinates are `(row, col)` with the origin at the top-left cell. Sizes
//! are `(height, width)`. Pieces have no fixed orientation: a non-square piece
//! may be placed as given or with its sides swapped.

use serde::{Deserialize, Serialize};

/// A cell coordinate. Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Swaps row and column.
    #[inline]
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }

    /// Returns this point seen along `axis` (identity for `Axis::Rows`).
    #[inline]
    pub const fn along(self, axis: Axis) -> Self {
        match axis {
            Axis::Rows => self,
            Axis::Cols => self.transposed(),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Height and width of a piece or container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Size {
    pub height: usize,
    pub width: usize,
}

impl Size {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub const fn area(&self) -> u64 {
        self.height as u64 * self.width as u64
    }

    pub const fn transposed(self) -> Self {
        Self {
            height: self.width,
            width: self.height,
        }
    }

    pub const fn is_square(&self) -> bool {
        self.height == self.width
    }

    #[inline]
    pub const fn along(self, axis: Axis) -> Self {
        match axis {
            Axis::Rows => self,
            Axis::Cols => self.transposed(),
        }
    }

    /// Distinct orientations of a piece: the given one, then the swapped one
    /// unless the piece is square.
    pub fn orientations(self) -> impl Iterator<Item = Size> {
        let swapped = (!self.is_square()).then(|| self.transposed());
        std::iter::once(self).chain(swapped)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Selects which edge of a placed piece is being examined.
///
/// `Rows` looks at the row below a piece; `Cols` looks at the column to its
/// right by reading the grid with rows and columns swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

/// True iff a `size` rectangle anchored at `origin` lies inside `dims`.
#[inline]
pub fn fits(dims: Size, origin: Point, size: Size) -> bool {
    origin.row + size.height <= dims.height && origin.col + size.width <= dims.width
}

/// True iff `point` addresses a cell inside `dims`.
#[inline]
pub fn in_bounds(point: Point, dims: Size) -> bool {
    point.row < dims.height && point.col < dims.width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_inclusive_of_far_edge() {
        let dims = Size::new(4, 3);
        assert!(fits(dims, Point::new(0, 0), Size::new(4, 3)));
        assert!(fits(dims, Point::new(2, 1), Size::new(2, 2)));
        assert!(!fits(dims, Point::new(2, 1), Size::new(3, 2)));
        assert!(!fits(dims, Point::new(0, 2), Size::new(1, 2)));
    }

    #[test]
    fn test_in_bounds() {
        let dims = Size::new(2, 5);
        assert!(in_bounds(Point::new(1, 4), dims));
        assert!(!in_bounds(Point::new(2, 0), dims));
        assert!(!in_bounds(Point::new(0, 5), dims));
    }

    #[test]
    fn test_square_has_single_orientation() {
        let orientations: Vec<Size> = Size::new(2, 2).orientations().collect();
        assert_eq!(orientations, vec![Size::new(2, 2)]);
    }

    #[test]
    fn test_rectangle_orientations_given_then_swapped() {
        let orientations: Vec<Size> = Size::new(3, 1).orientations().collect();
        assert_eq!(orientations, vec![Size::new(3, 1), Size::new(1, 3)]);
    }

    #[test]
    fn test_along_cols_is_an_involution() {
        let p = Point::new(3, 7);
        assert_eq!(p.along(Axis::Cols).along(Axis::Cols), p);
        assert_eq!(Size::new(2, 9).along(Axis::Cols), Size::new(9, 2));
    }
}
