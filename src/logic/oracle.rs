//! Satisfiability oracle abstraction.
//!
//! The knowledge base never decides satisfiability itself. It hands clause
//! sets to a `SatOracle`, which must treat them as read-only input: every call
//! starts from scratch and leaves no state behind.

use varisat::{ExtendFormula, Lit, Solver};

use crate::error::ExecutionError;
use crate::logic::symbols::{DimacsClause, DimacsLit};

/// A satisfying assignment: one signed literal per variable, in variable order.
pub type Model = Vec<DimacsLit>;

/// Minimal interface to a boolean satisfiability engine.
pub trait SatOracle: Send + Sync {
    /// Returns one model of the conjunction of `clauses`, or `None` if it is
    /// unsatisfiable.
    fn solve_one(&self, clauses: &[&[DimacsLit]]) -> Result<Option<Model>, ExecutionError>;

    /// Returns every model of the conjunction of `clauses`.
    ///
    /// This is eager and exponential in the number of unconstrained
    /// variables. Only call it on small formulas.
    fn solve_all(&self, clauses: &[&[DimacsLit]]) -> Result<Vec<Model>, ExecutionError>;
}

/// `SatOracle` backed by the varisat CDCL solver.
#[derive(Debug, Default, Clone, Copy)]
pub struct VarisatOracle;

impl VarisatOracle {
    /// Creates the oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn oracle_err(err: impl std::fmt::Display) -> ExecutionError {
    ExecutionError::Oracle {
        message: err.to_string(),
    }
}

fn to_lits(clause: &[DimacsLit]) -> Vec<Lit> {
    clause.iter().map(|&l| Lit::from_dimacs(l)).collect()
}

fn load(clauses: &[&[DimacsLit]]) -> Solver<'static> {
    let mut solver = Solver::new();
    for clause in clauses {
        solver.add_clause(&to_lits(clause));
    }
    solver
}

fn next_model(solver: &mut Solver<'_>) -> Result<Option<Model>, ExecutionError> {
    if !solver.solve().map_err(oracle_err)? {
        return Ok(None);
    }
    Ok(solver
        .model()
        .map(|lits| lits.iter().map(|l| l.to_dimacs()).collect()))
}

impl SatOracle for VarisatOracle {
    fn solve_one(&self, clauses: &[&[DimacsLit]]) -> Result<Option<Model>, ExecutionError> {
        let mut solver = load(clauses);
        next_model(&mut solver)
    }

    fn solve_all(&self, clauses: &[&[DimacsLit]]) -> Result<Vec<Model>, ExecutionError> {
        let mut solver = load(clauses);
        let mut models = Vec::new();
        while let Some(model) = next_model(&mut solver)? {
            // Block this exact assignment so the next solve must differ.
            let blocking: DimacsClause = model.iter().map(|&l| -l).collect();
            solver.add_clause(&to_lits(&blocking));
            models.push(model);
        }
        Ok(models)
    }
}
