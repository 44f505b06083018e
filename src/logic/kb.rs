//! Propositional knowledge base.
//!
//! The knowledge base is a monotonic conjunction of DIMACS clauses paired
//! with the symbol table that names their variables. Clauses are appended,
//! never removed, until an explicit `reset`.
//!
//! Queries (`entails`, `is_consistent_with`, `all_models`) run against a
//! scratch view of the clause list and never mutate it. Query literals whose
//! names the table has never seen are given temporary ids for the duration
//! of the query only.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MazeError, MazeResult, ValidationError};
use crate::logic::oracle::{SatOracle, VarisatOracle};
use crate::logic::symbols::{split_literal, DimacsClause, DimacsLit, SymbolTable};
use crate::logic::trace::{NoopTrace, TraceSink};

/// Stable identifier for a knowledge base, carried in trace events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KbId(Uuid);

impl KbId {
    /// Create a new random knowledge-base ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KbId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for KbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serializable view of a knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbSnapshot {
    /// Knowledge-base identity.
    pub id: KbId,
    /// Symbol names; the symbol with id `k` is at index `k - 1`.
    pub symbols: Vec<String>,
    /// Clauses in insertion order.
    pub clauses: Vec<DimacsClause>,
}

/// Monotonic propositional knowledge base backed by a SAT oracle.
pub struct KnowledgeBase {
    id: KbId,
    symbols: SymbolTable,
    clauses: Vec<DimacsClause>,
    seen: HashSet<DimacsClause>,
    oracle: Box<dyn SatOracle>,
    trace: Box<dyn TraceSink>,
}

impl fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("id", &self.id)
            .field("symbols", &self.symbols.len())
            .field("clauses", &self.clauses.len())
            .finish_non_exhaustive()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    /// Creates an empty knowledge base using varisat and no tracing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Box::new(VarisatOracle::new()), Box::new(NoopTrace))
    }

    /// Creates an empty knowledge base reporting to `trace`.
    #[must_use]
    pub fn with_trace(trace: Box<dyn TraceSink>) -> Self {
        Self::with_parts(Box::new(VarisatOracle::new()), trace)
    }

    /// Creates an empty knowledge base with an explicit oracle and trace sink.
    #[must_use]
    pub fn with_parts(oracle: Box<dyn SatOracle>, trace: Box<dyn TraceSink>) -> Self {
        Self {
            id: KbId::new(),
            symbols: SymbolTable::new(),
            clauses: Vec::new(),
            seen: HashSet::new(),
            oracle,
            trace,
        }
    }

    /// Knowledge-base identity.
    #[must_use]
    pub const fn id(&self) -> KbId {
        self.id
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if the knowledge base holds no clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The symbol table interpreting the clauses.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Clauses in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[DimacsClause] {
        &self.clauses
    }

    /// Clears clauses and symbols together.
    pub fn reset(&mut self) {
        self.symbols.clear();
        self.clauses.clear();
        self.seen.clear();
    }

    /// Appends a disjunction of literal names.
    ///
    /// Returns `false` if an identical integer clause (same literals in the
    /// same order) is already present; the knowledge base is then unchanged.
    pub fn add_clause<S: AsRef<str>>(&mut self, literals: &[S]) -> Result<bool, ValidationError> {
        for literal in literals {
            split_literal(literal.as_ref())?;
        }
        let dimacs = literals
            .iter()
            .map(|l| self.symbols.intern(l.as_ref()))
            .collect::<Result<DimacsClause, _>>()?;

        if self.seen.contains(&dimacs) {
            return Ok(false);
        }
        let names: Vec<&str> = literals.iter().map(AsRef::as_ref).collect();
        self.trace.clause_added(self.id, &names, &dimacs);
        self.seen.insert(dimacs.clone());
        self.clauses.push(dimacs);
        Ok(true)
    }

    /// Appends a single-literal clause.
    pub fn add_unit(&mut self, literal: &str) -> Result<bool, ValidationError> {
        self.add_clause(&[literal])
    }

    /// Appends every clause of `clauses`, in order.
    pub fn add_clauses<S: AsRef<str>>(&mut self, clauses: &[Vec<S>]) -> Result<(), ValidationError> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Entailment query.
    ///
    /// Each literal of `query` is negated on its own and added as a unit
    /// clause to a scratch copy of the clause list; the answer is true iff
    /// that scratch set is unsatisfiable. For a single literal this is plain
    /// entailment. For several literals it holds when the knowledge base
    /// entails at least their disjunction, so callers that need every literal
    /// entailed must ask once per literal.
    pub fn entails<S: AsRef<str>>(&self, query: &[S]) -> MazeResult<bool> {
        let lits = self.resolve_query(query.iter().map(AsRef::as_ref))?;
        let negated: Vec<[DimacsLit; 1]> = lits.iter().map(|&l| [-l]).collect();

        let mut view = self.view();
        view.extend(negated.iter().map(|c| c.as_slice()));
        let entailed = self.oracle.solve_one(&view)?.is_none();

        let names: Vec<&str> = query.iter().map(AsRef::as_ref).collect();
        self.trace.entailment(self.id, &names, entailed);
        Ok(entailed)
    }

    /// Shorthand for `entails(&[literal])`.
    pub fn entails_literal(&self, literal: &str) -> MazeResult<bool> {
        self.entails(&[literal])
    }

    /// Is the knowledge base still satisfiable once `clauses` are added?
    ///
    /// Each entry is added as one full clause. An already-unsatisfiable
    /// knowledge base yields `false`.
    pub fn is_consistent_with<S: AsRef<str>>(&self, clauses: &[Vec<S>]) -> MazeResult<bool> {
        let flat = clauses.iter().flat_map(|c| c.iter().map(AsRef::as_ref));
        let lits = self.resolve_query(flat)?;

        let mut extra: Vec<&[DimacsLit]> = Vec::with_capacity(clauses.len());
        let mut offset = 0;
        for clause in clauses {
            extra.push(&lits[offset..offset + clause.len()]);
            offset += clause.len();
        }

        let mut view = self.view();
        view.extend(extra);
        let consistent = self.oracle.solve_one(&view)?.is_some();
        self.trace.consistency(self.id, clauses.len(), consistent);
        Ok(consistent)
    }

    /// Every satisfying assignment of the knowledge base, as literal names.
    ///
    /// This is eager, not lazy. The number of models grows exponentially with
    /// the number of unconstrained symbols; keep grids tiny.
    pub fn all_models(&self) -> MazeResult<Vec<Vec<String>>> {
        let models = self.oracle.solve_all(&self.view())?;
        models
            .iter()
            .map(|model| {
                self.symbols
                    .translate_back(model)
                    .ok_or_else(|| MazeError::internal("oracle returned a variable outside the symbol table"))
            })
            .collect()
    }

    /// Symbolic form of a stored clause.
    #[must_use]
    pub fn clause_names(&self, index: usize) -> Option<Vec<String>> {
        self.clauses
            .get(index)
            .and_then(|c| self.symbols.translate_back(c))
    }

    /// Writes a human-readable listing of every clause.
    pub fn dump<W: Write>(&self, out: &mut W) -> MazeResult<()> {
        writeln!(
            out,
            "There are {} clauses with {} symbols",
            self.clauses.len(),
            self.symbols.len()
        )?;
        self.write_clauses(out)
    }

    /// Writes the clause listing (without the summary line) to a file.
    pub fn dump_to_file(&self, path: impl AsRef<Path>) -> MazeResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_clauses(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Serializable view of the knowledge base.
    #[must_use]
    pub fn snapshot(&self) -> KbSnapshot {
        KbSnapshot {
            id: self.id,
            symbols: self.symbols.names().to_vec(),
            clauses: self.clauses.clone(),
        }
    }

    /// Pretty JSON rendering of `snapshot()`.
    pub fn snapshot_json(&self) -> MazeResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| MazeError::internal(format!("serialize knowledge base: {e}")))
    }

    fn write_clauses<W: Write>(&self, out: &mut W) -> MazeResult<()> {
        for (i, dimacs) in self.clauses.iter().enumerate() {
            let names = self.symbols.translate_back(dimacs).unwrap_or_default();
            writeln!(out, "#{i}: {dimacs:?} ==> {names:?}")?;
        }
        Ok(())
    }

    fn view(&self) -> Vec<&[DimacsLit]> {
        self.clauses.iter().map(Vec::as_slice).collect()
    }

    /// Resolves query literals without touching the symbol table. Unknown
    /// base names share one temporary id per name, above every real id.
    fn resolve_query<'a>(
        &self,
        literals: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<DimacsLit>, ValidationError> {
        #[allow(clippy::cast_possible_wrap)]
        let mut next_fresh = self.symbols.len() as DimacsLit;
        let mut fresh: HashMap<&str, DimacsLit> = HashMap::new();

        literals
            .map(|literal| -> Result<DimacsLit, ValidationError> {
                if let Some(id) = self.symbols.lookup(literal)? {
                    return Ok(id);
                }
                let (sign, base) = split_literal(literal)?;
                let id = *fresh.entry(base).or_insert_with(|| {
                    next_fresh += 1;
                    next_fresh
                });
                Ok(sign * id)
            })
            .collect()
    }
}
