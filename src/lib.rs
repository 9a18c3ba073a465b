//! Exact Rectangle Tiling Solver Library
//!
//! Finds arrangements of rectangular pieces that fill a rectangular container
//! with no gaps and no overlaps. Each distinct order of the pieces is searched
//! independently by depth-first placement on a small set of anchor cells,
//! always filling the topmost open row first.

pub mod driver;
pub mod error;
pub mod feasibility;
pub mod frontier;
pub mod geometry;
pub mod grid;
pub mod permutations;
pub mod persistence;
pub mod pieces;
pub mod placement;
pub mod solver;

pub use driver::{run, solve_order, RunOptions, RunSummary};
pub use error::{ConfigError, Error};
pub use geometry::{Point, Size};
pub use grid::Grid;
pub use pieces::{Puzzle, PuzzleSpec};
pub use solver::{SearchOptions, Solution, SolutionPolicy};
