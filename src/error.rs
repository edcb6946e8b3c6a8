//! Error channel for contract and invariant violations.
//!
//! Resource exhaustion and "optimal reached" are *not* errors: an optimizer
//! that runs out of budget or hits the known optimum terminates cleanly and
//! reports a normal [`crate::optimize::harness::BestSolution`] instead.

use thiserror::Error;

/// Failure modes the core surfaces to callers.
///
/// `InvariantViolation` indicates a bug in this crate (a counter produced a
/// negative count, `spine`/`vertexOnSpine` drifted out of sync, ...) and is
/// only constructed by the one-shot validators; hot paths instead rely on
/// `debug_assert!` so the target complexity (O(1) swap-gain, O(m log m)
/// counting, ...) isn't undermined by per-call bookkeeping in release
/// builds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A bug: some structural invariant of the graph or embedding does not
    /// hold. Never expected to trigger outside of `debug_assert!`-style
    /// checks and the explicit `validate` methods.
    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },
    /// A caller mistake: page budget below 1, a connectivity-requiring
    /// heuristic invoked on a disconnected graph, or similar.
    #[error("contract violation: {detail}")]
    ContractViolation { detail: String },
}

impl CoreError {
    pub fn invariant(detail: impl Into<String>) -> Self {
        CoreError::InvariantViolation { detail: detail.into() }
    }

    pub fn contract(detail: impl Into<String>) -> Self {
        CoreError::ContractViolation { detail: detail.into() }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
