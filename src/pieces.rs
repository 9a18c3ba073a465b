//! Puzzle definitions and piece types.
//!
//! A puzzle is a container plus a list of distinct shapes and a usage list
//! naming which shapes are placed (with repeats). Definitions are read from
//! JSON and validated once before any search starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};
use crate::geometry::Size;
use crate::grid::PieceId;

/// One piece in a search order.
///
/// `id` is the label stamped into the grid and is unique within the order;
/// `shape` indexes the puzzle's shape list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub shape: usize,
    pub size: Size,
}

/// Serialized form of a puzzle definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleSpec {
    pub container: Size,
    pub shapes: Vec<Size>,
    pub usage: Vec<usize>,
}

/// A validated puzzle: the container area equals the total piece area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    container: Size,
    shapes: Vec<Size>,
    usage: Vec<usize>,
}

impl Puzzle {
    /// Largest number of pieces that still gives every piece its own label.
    pub const MAX_PIECES: usize = PieceId::MAX as usize - 1;

    pub fn new(container: Size, shapes: Vec<Size>, usage: Vec<usize>) -> Result<Self, ConfigError> {
        if container.area() == 0 {
            return Err(ConfigError::ZeroDimension {
                what: format!("container {container}"),
            });
        }
        if let Some((index, shape)) = shapes.iter().enumerate().find(|(_, s)| s.area() == 0) {
            return Err(ConfigError::ZeroDimension {
                what: format!("shape {index} ({shape})"),
            });
        }
        if let Some(&index) = usage.iter().find(|&&index| index >= shapes.len()) {
            return Err(ConfigError::UnknownShape {
                index,
                available: shapes.len(),
            });
        }
        if usage.len() > Self::MAX_PIECES {
            return Err(ConfigError::TooManyPieces {
                count: usage.len(),
                limit: Self::MAX_PIECES,
            });
        }

        let pieces: u64 = usage.iter().map(|&index| shapes[index].area()).sum();
        if pieces != container.area() {
            return Err(ConfigError::AreaMismatch {
                container: container.area(),
                pieces,
            });
        }

        Ok(Self {
            container,
            shapes,
            usage,
        })
    }

    /// Reads and validates a JSON puzzle definition.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let spec: PuzzleSpec = serde_json::from_str(&text)?;
        Ok(Self::try_from(spec)?)
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn shapes(&self) -> &[Size] {
        &self.shapes
    }

    /// Shape indices placed by this puzzle, with repeats.
    pub fn usage(&self) -> &[usize] {
        &self.usage
    }

    /// The pieces of one order, labelled `1..=len` by position.
    pub fn pieces_in_order(&self, order: &[usize]) -> Vec<Piece> {
        order
            .iter()
            .enumerate()
            .map(|(position, &shape)| Piece {
                id: (position + 1) as PieceId,
                shape,
                size: self.shapes[shape],
            })
            .collect()
    }
}

impl TryFrom<PuzzleSpec> for Puzzle {
    type Error = ConfigError;

    fn try_from(spec: PuzzleSpec) -> Result<Self, Self::Error> {
        Self::new(spec.container, spec.shapes, spec.usage)
    }
}
