//! Prediction check against the driver's ground truth.
//!
//! The core cannot see the maze. Drivers that can may compare a
//! `Classification` with the real cell contents; disagreements are logged and
//! returned, never raised.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::agent::logical::Classification;
use crate::coord::Coord;

/// What a cell really holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellContent {
    Empty,
    Monster,
    Precipice,
    Exit,
    /// The goal object. Harmless, so never contradicts a prediction.
    Goal,
}

/// One wrong prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// The misclassified cell.
    pub cell: Coord,
    /// What the agent reported.
    pub predicted: CellContent,
    /// What the cell holds.
    pub actual: CellContent,
}

/// Compares every classified cell with `truth` and reports the mismatches.
pub fn verify_predictions<F>(classification: &Classification, truth: F) -> Vec<Mismatch>
where
    F: Fn(Coord) -> CellContent,
{
    let groups = [
        (CellContent::Empty, &classification.safe),
        (CellContent::Monster, &classification.monster),
        (CellContent::Precipice, &classification.precipice),
        (CellContent::Exit, &classification.exit),
    ];

    let mut mismatches = Vec::new();
    for (predicted, cells) in groups {
        for &cell in cells {
            let actual = truth(cell);
            if actual == CellContent::Goal || actual == predicted {
                continue;
            }
            warn!(%cell, ?predicted, ?actual, "incorrect prediction");
            mismatches.push(Mismatch {
                cell,
                predicted,
                actual,
            });
        }
    }
    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_wrong_cells() {
        let classification = Classification {
            safe: vec![Coord::new(0, 1), Coord::new(1, 0)],
            monster: vec![Coord::new(2, 2)],
            precipice: vec![],
            exit: vec![Coord::new(1, 1)],
        };
        let truth = |c: Coord| match (c.row, c.col) {
            (1, 0) => CellContent::Precipice,
            (2, 2) => CellContent::Monster,
            (1, 1) => CellContent::Goal,
            _ => CellContent::Empty,
        };
        let mismatches = verify_predictions(&classification, truth);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                cell: Coord::new(1, 0),
                predicted: CellContent::Empty,
                actual: CellContent::Precipice,
            }]
        );
    }

    #[test]
    fn empty_classification_has_no_mismatch() {
        let mismatches = verify_predictions(&Classification::default(), |_| CellContent::Monster);
        assert!(mismatches.is_empty());
    }
}
