//! Bayesian belief grid for the probabilistic maze.
//!
//! Each cell holds one marginal probability per belief channel: "the cause of
//! this channel is here". Channels are filtered independently, so a cell's
//! vector need not sum to one.

use serde::{Deserialize, Serialize};

use crate::config::BayesianConfig;
use crate::coord::Coord;
use crate::error::{MazeResult, ValidationError};
use crate::percept::{BayesianPercept, BeliefChannel};

/// Denominators at or below this are treated as zero.
const EPSILON: f64 = 1e-12;

/// Marginal belief per channel for one cell.
pub type BeliefVector = [f64; BeliefChannel::COUNT];

/// Per-cell, per-channel marginal beliefs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefGrid {
    config: BayesianConfig,
    /// Row-major cells.
    cells: Vec<BeliefVector>,
}

impl BeliefGrid {
    /// Uniform prior over every cell except the start, which is all zero.
    pub fn new(config: BayesianConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let n = config.size;
        #[allow(clippy::cast_precision_loss)]
        let prior = 1.0 / (n * n - 1) as f64;
        let mut grid = Self {
            config,
            cells: vec![[prior; BeliefChannel::COUNT]; n * n],
        };
        let start = grid.index(config.start);
        grid.cells[start] = [0.0; BeliefChannel::COUNT];
        Ok(grid)
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.config.size
    }

    /// The grid's configuration.
    #[must_use]
    pub const fn config(&self) -> &BayesianConfig {
        &self.config
    }

    /// The cell itself plus its in-bounds 4-neighbors.
    #[must_use]
    pub fn adjacent_set(&self, at: Coord) -> Vec<Coord> {
        let mut set = vec![at];
        set.extend(at.neighbors(self.size()));
        set
    }

    /// Belief vector of a cell.
    pub fn belief(&self, at: Coord) -> Result<&BeliefVector, ValidationError> {
        at.ensure_in_bounds(self.size())?;
        Ok(&self.cells[self.index(at)])
    }

    /// Belief that `channel`'s cause occupies `at`.
    pub fn probability(&self, at: Coord, channel: BeliefChannel) -> Result<f64, ValidationError> {
        Ok(self.belief(at)?[channel.index()])
    }

    /// Sum of the lethal channels at `at`.
    pub fn death_probability(&self, at: Coord) -> Result<f64, ValidationError> {
        let belief = self.belief(at)?;
        Ok(BeliefChannel::ALL
            .iter()
            .filter(|c| c.is_lethal())
            .map(|c| belief[c.index()])
            .sum())
    }

    /// Applies a decoded percept sensed at `position`.
    pub fn observe(&mut self, percept: &BayesianPercept, position: Coord) -> MazeResult<()> {
        self.update(percept.channels, position)
    }

    /// Applies the first five bits of a raw percept sensed at `position`.
    pub fn update_bits(&mut self, bits: &[u8], position: Coord) -> MazeResult<()> {
        let percept = BayesianPercept::from_bits(bits)?;
        self.observe(&percept, position)
    }

    /// Filters every channel given whether its stimulus was sensed at
    /// `position`.
    ///
    /// For channel `k`, `p` is the current belief mass inside the range
    /// (position plus 4-neighbors). A sensed stimulus keeps only in-range
    /// mass and divides by `p`; a silent one keeps only out-of-range mass and
    /// divides by `1 - p`. A vanishing denominator skips normalization.
    pub fn update(&mut self, sensed: [bool; BeliefChannel::COUNT], position: Coord) -> MazeResult<()> {
        position.ensure_in_bounds(self.size())?;
        let range = self.adjacent_set(position);
        let mut in_range = vec![false; self.cells.len()];
        for &cell in &range {
            in_range[self.index(cell)] = true;
        }

        for channel in BeliefChannel::ALL {
            let k = channel.index();
            let p: f64 = range.iter().map(|&c| self.cells[self.index(c)][k]).sum();
            let (denominator, keep_in_range) = if sensed[k] { (p, true) } else { (1.0 - p, false) };

            for (cell, &inside) in self.cells.iter_mut().zip(&in_range) {
                let likelihood = if inside == keep_in_range { 1.0 } else { 0.0 };
                let weighted = likelihood * cell[k];
                let posterior = if denominator.abs() <= EPSILON {
                    weighted
                } else {
                    weighted / denominator
                };
                cell[k] = sanitize(posterior);
            }
        }
        Ok(())
    }

    fn index(&self, at: Coord) -> usize {
        at.row * self.size() + at.col
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
