//! Symbol table mapping proposition names to signed DIMACS integers.

use std::collections::HashMap;

use crate::error::ValidationError;

/// Leading marker that negates a literal name.
pub const NEGATION: char = '-';

/// A signed DIMACS literal. The magnitude is the symbol id, the sign the polarity.
pub type DimacsLit = isize;

/// A clause in DIMACS form: a disjunction of signed literals.
pub type DimacsClause = Vec<DimacsLit>;

/// Bidirectional mapping between symbol names and positive integer ids.
///
/// Ids are assigned 1, 2, 3, ... in order of first appearance and never
/// change for the lifetime of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: Vec<String>,
    index: HashMap<String, DimacsLit>,
}

/// Splits a literal name into `(sign, base name)`.
pub(crate) fn split_literal(literal: &str) -> Result<(DimacsLit, &str), ValidationError> {
    let (sign, base) = match literal.strip_prefix(NEGATION) {
        Some(rest) => (-1, rest),
        None => (1, literal),
    };
    if base.is_empty() {
        return Err(ValidationError::EmptyLiteral);
    }
    Ok((sign, base))
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signed id of `literal`, allocating an id for its base name
    /// if it has not been seen before.
    ///
    /// A leading `-` only flips the sign; `-X` and `X` share one id no matter
    /// which polarity appeared first.
    pub fn intern(&mut self, literal: &str) -> Result<DimacsLit, ValidationError> {
        let (sign, base) = split_literal(literal)?;
        if let Some(&id) = self.index.get(base) {
            return Ok(sign * id);
        }
        self.names.push(base.to_string());
        #[allow(clippy::cast_possible_wrap)]
        let id = self.names.len() as DimacsLit;
        self.index.insert(base.to_string(), id);
        Ok(sign * id)
    }

    /// Returns the signed id of `literal` without allocating.
    pub fn lookup(&self, literal: &str) -> Result<Option<DimacsLit>, ValidationError> {
        let (sign, base) = split_literal(literal)?;
        Ok(self.index.get(base).map(|&id| sign * id))
    }

    /// Returns the literal name for a signed id, if the id is known.
    #[must_use]
    pub fn name_of(&self, lit: DimacsLit) -> Option<String> {
        let base = self.names.get(lit.unsigned_abs().checked_sub(1)?)?;
        Some(if lit < 0 {
            format!("{NEGATION}{base}")
        } else {
            base.clone()
        })
    }

    /// Reconstructs the literal names of a DIMACS clause.
    ///
    /// Returns `None` if any id is unknown to this table.
    #[must_use]
    pub fn translate_back(&self, clause: &[DimacsLit]) -> Option<Vec<String>> {
        clause.iter().map(|&lit| self.name_of(lit)).collect()
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no symbol has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Base names in id order (id 1 first).
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Forgets every symbol.
    pub fn clear(&mut self) {
        self.names.clear();
        self.index.clear();
    }
}
