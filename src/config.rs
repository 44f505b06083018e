//! Per-variant configuration.
//!
//! A maze is either logical (hazards are deduced with a SAT oracle) or
//! Bayesian (hazards are tracked as per-cell marginal probabilities). Each
//! variant carries its own typed configuration, validated once at
//! construction.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::ValidationError;

/// Default side length of the square maze.
pub const DEFAULT_SIZE: usize = 6;

/// Default number of precipices placed in a logical maze.
pub const DEFAULT_MAX_PRECIPICES: usize = 3;

/// Configuration of the logical (SAT-backed) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicalConfig {
    /// Side length of the grid.
    pub size: usize,
    /// Cell the player starts on.
    pub start: Coord,
    /// Number of distinct precipices after which every other unknown cell is
    /// assumed precipice-free.
    pub max_precipices: usize,
}

impl Default for LogicalConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start: Coord::origin(),
            max_precipices: DEFAULT_MAX_PRECIPICES,
        }
    }
}

impl LogicalConfig {
    /// Default configuration for an `size × size` grid.
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.size == 0 {
            return Err(ValidationError::GridTooSmall { size: 0, min: 1 });
        }
        self.start.ensure_in_bounds(self.size)?;
        if self.max_precipices == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "max_precipices must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration of the Bayesian variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesianConfig {
    /// Side length of the grid.
    pub size: usize,
    /// Cell the player starts on. Nothing can occupy it.
    pub start: Coord,
}

impl Default for BayesianConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start: Coord::origin(),
        }
    }
}

impl BayesianConfig {
    /// Default configuration for an `size × size` grid.
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Validate configuration.
    ///
    /// The uniform prior spreads each channel over the `n² − 1` cells other
    /// than the start, so a 1×1 grid is rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.size < 2 {
            return Err(ValidationError::GridTooSmall {
                size: self.size,
                min: 2,
            });
        }
        self.start.ensure_in_bounds(self.size)?;
        Ok(())
    }
}

/// Maze variant selector, as loaded from JSON by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Variant {
    Logical(LogicalConfig),
    Bayesian(BayesianConfig),
}

impl Variant {
    /// Grid side length of the selected variant.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Logical(c) => c.size,
            Self::Bayesian(c) => c.size,
        }
    }

    /// Validate the selected variant's configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Logical(c) => c.validate(),
            Self::Bayesian(c) => c.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LogicalConfig::default().validate().unwrap();
        BayesianConfig::default().validate().unwrap();
    }

    #[test]
    fn logical_accepts_single_cell() {
        LogicalConfig::with_size(1).validate().unwrap();
    }

    #[test]
    fn bayesian_rejects_single_cell() {
        let err = BayesianConfig::with_size(1).validate().unwrap_err();
        assert_eq!(err, ValidationError::GridTooSmall { size: 1, min: 2 });
    }

    #[test]
    fn rejects_start_out_of_bounds() {
        let mut c = LogicalConfig::with_size(3);
        c.start = Coord::new(3, 0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_precipices() {
        let mut c = LogicalConfig::default();
        c.max_precipices = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn variant_json_is_tagged() {
        let v: Variant = serde_json::from_str(r#"{"variant":"bayesian","size":4}"#).unwrap();
        assert_eq!(v, Variant::Bayesian(BayesianConfig::with_size(4)));
        assert_eq!(v.size(), 4);

        let json = serde_json::to_string(&Variant::Logical(LogicalConfig::default())).unwrap();
        assert!(json.contains("\"variant\":\"logical\""));
    }
}
