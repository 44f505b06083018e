//! Observability port for the knowledge base.
//!
//! The knowledge base reports clause additions and query answers to an
//! injected `TraceSink`. `NoopTrace` discards them; `TracingSink` forwards
//! them to `tracing` at TRACE level.

use crate::logic::kb::KbId;
use crate::logic::symbols::DimacsLit;

/// Receives knowledge-base events. Every method defaults to doing nothing.
pub trait TraceSink: Send + Sync {
    /// A clause was appended to the knowledge base.
    fn clause_added(&self, _kb: KbId, _literals: &[&str], _dimacs: &[DimacsLit]) {}

    /// An entailment query was answered.
    fn entailment(&self, _kb: KbId, _query: &[&str], _entailed: bool) {}

    /// A consistency check was answered.
    fn consistency(&self, _kb: KbId, _clause_count: usize, _consistent: bool) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {}

/// Forwards events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn clause_added(&self, kb: KbId, literals: &[&str], dimacs: &[DimacsLit]) {
        tracing::trace!(%kb, ?literals, ?dimacs, "clause added");
    }

    fn entailment(&self, kb: KbId, query: &[&str], entailed: bool) {
        tracing::trace!(%kb, ?query, entailed, "entailment query");
    }

    fn consistency(&self, kb: KbId, clause_count: usize, consistent: bool) {
        tracing::trace!(%kb, clause_count, consistent, "consistency check");
    }
}
