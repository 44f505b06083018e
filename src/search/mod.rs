//! Exploration and path planning.

pub mod astar;
pub mod frontier;
pub mod planner;

pub use astar::a_star_on_known;
pub use frontier::Frontier;
pub use planner::{Knowledge, PlanState, SearchEngine};
