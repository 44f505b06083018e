//! Propositional reasoning: symbols, clauses, and entailment.
//!
//! The knowledge base is monotonic: clauses are appended and never removed
//! until an explicit reset. Satisfiability is delegated to a `SatOracle`.

pub mod kb;
pub mod oracle;
pub mod proposition;
pub mod symbols;
pub mod trace;

pub use kb::{KbId, KbSnapshot, KnowledgeBase};
pub use oracle::{Model, SatOracle, VarisatOracle};
pub use proposition::{Cause, Proposition};
pub use symbols::{DimacsClause, DimacsLit, SymbolTable, NEGATION};
pub use trace::{NoopTrace, TraceSink, TracingSink};
