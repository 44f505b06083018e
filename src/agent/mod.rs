//! Inference agents.
//!
//! `LogicalAgent` deduces cell contents with a SAT-backed knowledge base;
//! `BeliefGrid` tracks them as per-channel marginal probabilities.

pub mod bayesian;
pub mod logical;
pub mod verify;

pub use bayesian::{BeliefGrid, BeliefVector};
pub use logical::{maze_axioms, Classification, LogicalAgent};
pub use verify::{verify_predictions, CellContent, Mismatch};
