//! # Labyrinth - inference and search core for a grid-maze agent
//!
//! An agent explores an `n × n` maze one cell per turn. From local percepts it
//! works out where hazards and the exit are, then decides where to go next.
//!
//! ## Core Concepts
//!
//! - **KnowledgeBase**: monotonic propositional clause store with SAT-backed entailment
//! - **LogicalAgent**: encodes the maze axioms and classifies cells from percepts
//! - **BeliefGrid**: per-cell marginal probabilities updated by Bayes' rule
//! - **SearchEngine**: frontier selection plus A* over visited cells, one action per turn
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labyrinth::{Coord, Knowledge, LogicalAgent, LogicalConfig, LogicalPercept, SearchEngine};
//!
//! let config = LogicalConfig::with_size(4);
//! let mut agent = LogicalAgent::new(config)?;
//! let mut search = SearchEngine::new(config.size)?;
//!
//! let start = Coord::origin();
//! let percept = LogicalPercept::from_bits(&[0, 0, 0, 1, 0, 1, 0, 0, 0])?;
//! let known = agent.process_percept(&percept, start, &[start], false, false)?;
//! let action = search.plan_next_move(Knowledge::Safe(&known.safe), start, &[start])?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod coord;
pub mod error;
pub mod percept;

pub mod agent;
pub mod logic;
pub mod search;

// Re-export primary types at crate root for convenience
pub use action::{actions_for_path, Action};
pub use config::{BayesianConfig, LogicalConfig, Variant};
pub use coord::Coord;
pub use error::{ExecutionError, MazeError, MazeResult, ValidationError};
pub use percept::{BayesianPercept, BeliefChannel, LogicalPercept, StimulusChannel, Walls};

pub use agent::{
    maze_axioms, verify_predictions, BeliefGrid, CellContent, Classification, LogicalAgent,
    Mismatch,
};
pub use logic::{
    Cause, KbId, KbSnapshot, KnowledgeBase, NoopTrace, Proposition, SatOracle, SymbolTable,
    TraceSink, TracingSink, VarisatOracle,
};
pub use search::{a_star_on_known, Frontier, Knowledge, PlanState, SearchEngine};
