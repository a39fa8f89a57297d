//! Matching Engine Boundary
//!
//! The harness talks to an engine only through the two traits here:
//! compile a rule set once, then per iteration open a fresh session,
//! insert facts, and ask for the satisfied-rule count. Any engine that
//! honors this contract can be plugged under the driver and measured.
//!
//! # Components
//!
//! - [`RuleEngine`] / [`EvaluationSession`] - the boundary traits
//! - [`reference`] - the in-crate engine both scenarios run against

pub mod reference;

pub use reference::{ReferenceEngine, ReferenceSession, RuleBase};

use crate::error::CompileError;
use crate::models::Fact;
use crate::rules::RuleSet;

/// An engine that can compile rule sets and open evaluation sessions.
pub trait RuleEngine {
    /// Compiled, immutable form of a rule set, shareable across sessions
    type RuleBase;
    type Session: EvaluationSession;

    /// Validate and compile a rule set.
    ///
    /// All compilation faults are setup faults: they abort the run before
    /// any session is opened or any timing starts.
    fn compile(&self, rules: RuleSet) -> Result<Self::RuleBase, CompileError>;

    /// Open a fresh session with empty working memory.
    ///
    /// Never fails for a successfully compiled rule base.
    fn open_session(&self, base: &Self::RuleBase) -> Self::Session;
}

/// One evaluation session: a working memory that accepts facts and is
/// then evaluated exactly once.
pub trait EvaluationSession {
    /// Add one fact to working memory
    fn insert(&mut self, fact: Fact);

    /// Count the rules satisfied by at least one combination of inserted
    /// facts.
    ///
    /// Consumes the session: all inserts happen before the one evaluation,
    /// and a session is never reused across iterations.
    fn evaluate_all(self) -> usize;
}
