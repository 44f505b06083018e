//! Error types for the maze reasoning core.
//!
//! Errors are strongly typed using thiserror. Conditions the game treats as
//! ordinary outcomes (an inconsistent hypothesis, an unreachable A* goal, a
//! wrong prediction) are not errors and never appear here.

use thiserror::Error;

use crate::coord::Coord;

/// Validation errors that occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Grid size {size} is too small (minimum: {min})")]
    GridTooSmall {
        size: usize,
        min: usize,
    },

    #[error("Coordinate {coord} is outside a {size}x{size} grid")]
    OutOfBounds {
        coord: Coord,
        size: usize,
    },

    #[error("Percept has {actual} bits, expected {expected}")]
    PerceptLength {
        actual: usize,
        expected: usize,
    },

    #[error("Percept bit {index} has value {value}, expected 0 or 1")]
    PerceptBit {
        index: usize,
        value: u8,
    },

    #[error("Literal name cannot be empty")]
    EmptyLiteral,

    #[error("Cannot parse proposition from '{name}'")]
    UnknownProposition {
        name: String,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Execution errors that occur while answering queries or planning.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("SAT oracle failed: {message}")]
    Oracle {
        message: String,
    },

    #[error("Frontier exhausted: no reachable cell left to explore from {position}")]
    FrontierExhausted {
        position: Coord,
    },

    #[error("Diagnostic sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl MazeError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

impl From<std::io::Error> for MazeError {
    fn from(err: std::io::Error) -> Self {
        Self::Execution(ExecutionError::Sink(err))
    }
}

/// Result type alias for maze operations.
pub type MazeResult<T> = Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_grid_size() {
        let err = ValidationError::GridTooSmall { size: 1, min: 2 };
        let msg = format!("{err}");
        assert!(msg.contains("too small"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_validation_error_out_of_bounds() {
        let err = ValidationError::OutOfBounds {
            coord: Coord::new(7, 1),
            size: 6,
        };
        let msg = format!("{err}");
        assert!(msg.contains("(7, 1)"));
        assert!(msg.contains("6x6"));
    }

    #[test]
    fn test_execution_error_frontier() {
        let err = ExecutionError::FrontierExhausted {
            position: Coord::new(2, 3),
        };
        assert!(format!("{err}").contains("(2, 3)"));
    }

    #[test]
    fn test_maze_error_from_validation() {
        let err: MazeError = ValidationError::EmptyLiteral.into();
        assert!(err.is_validation());
        assert!(!err.is_execution());
    }

    #[test]
    fn test_maze_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: MazeError = io.into();
        assert!(err.is_execution());
        assert!(format!("{err}").contains("disk full"));
    }

    #[test]
    fn test_maze_error_internal() {
        let err = MazeError::internal("unexpected state");
        assert!(err.is_internal());
        assert!(format!("{err}").contains("unexpected state"));
    }
}
