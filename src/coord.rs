//! Grid coordinates.
//!
//! Every layer of the core speaks `Coord`: the knowledge base names its
//! propositions after it, the belief grid indexes by it, and the planner
//! keeps its frontier and paths as sequences of it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An immutable `(row, col)` cell position in an `n × n` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, growing downwards.
    pub row: usize,
    /// Column index, growing rightwards.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The origin cell `(0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if the coordinate lies inside an `size × size` grid.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Fails with `OutOfBounds` unless the coordinate lies inside the grid.
    pub fn ensure_in_bounds(self, size: usize) -> Result<(), ValidationError> {
        if self.in_bounds(size) {
            Ok(())
        } else {
            Err(ValidationError::OutOfBounds { coord: self, size })
        }
    }

    /// In-bounds 4-neighbors, in the fixed order up, down, left, right.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Coord> {
        let Coord { row, col } = self;
        let candidates = [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            Some(Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            Some(Coord::new(row, col + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |c| c.in_bounds(size))
    }

    /// Returns true if `other` is one of this cell's 4-neighbors.
    #[must_use]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Signed `(self - other)` delta, used to name the move from `self` to `other`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn delta_from(self, other: Coord) -> (isize, isize) {
        (
            self.row as isize - other.row as isize,
            self.col as isize - other.col as isize,
        )
    }

    /// All cells of an `size × size` grid in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Coord> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
