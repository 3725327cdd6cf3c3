//! The evidence-fusion update engine.
//!
//! A single pure operation: fold a batch of conditionally-independent test
//! results into a [`BeliefState`] via Bayes' rule. The engine holds no state
//! of its own; independent sessions may update concurrently as long as each
//! owns its `BeliefState`.

use std::fmt;

use crate::error::FusionError;
use crate::model::{BeliefState, Evidence};

/// Non-fatal advisory: the belief entered the update absorbed at 0 or 1, so
/// the batch cannot move it and is effectively discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryWarning {
    /// The absorbed posterior (0.0 or 1.0) in effect before the update.
    pub posterior: f64,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "belief is absorbed at {}; further evidence cannot move it",
            self.posterior
        )
    }
}

/// Outcome of one successful update call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Update {
    /// The new posterior, also appended to the belief's history.
    pub posterior: f64,
    /// Present when the belief was already at a boundary going in.
    pub boundary: Option<BoundaryWarning>,
}

/// Start a diagnostic session from a prior. Equivalent to
/// [`BeliefState::new`]; exposed here so the engine's two operations live
/// side by side.
pub fn create_belief(prior: f64) -> Result<BeliefState, FusionError> {
    BeliefState::new(prior)
}

/// Fuse a batch of evidence into the belief as one atomic update step.
///
/// The joint likelihood of the batch under each hypothesis is the product of
/// the per-test conditional likelihoods, evaluated left to right in the
/// order given — the conditional-independence assumption made explicit.
/// Exactly one posterior is appended to the history per successful call, no
/// matter how many items the batch holds; applying the same items one call
/// at a time yields the same final posterior with one history entry each.
///
/// Fails without touching the history when the batch is empty or when the
/// total evidence probability is exactly zero (the batch is impossible
/// under both hypotheses).
pub fn update(belief: &mut BeliefState, evidence: &[Evidence]) -> Result<Update, FusionError> {
    if evidence.is_empty() {
        return Err(FusionError::EmptyEvidence);
    }

    let p_d = belief.posterior();
    let p_not_d = 1.0 - p_d;

    let boundary = if p_d == 0.0 || p_d == 1.0 {
        tracing::warn!(
            posterior = p_d,
            "belief is absorbed at a boundary; evidence cannot move it"
        );
        Some(BoundaryWarning { posterior: p_d })
    } else {
        None
    };

    let mut likelihood_d = 1.0;
    let mut likelihood_not_d = 1.0;
    for item in evidence {
        let (l_d, l_not_d) = item.likelihoods();
        likelihood_d *= l_d;
        likelihood_not_d *= l_not_d;
    }

    let p_evidence = p_d * likelihood_d + p_not_d * likelihood_not_d;
    if p_evidence == 0.0 {
        return Err(FusionError::DegenerateEvidence);
    }

    // The clamp only absorbs division rounding; the exact quotient is
    // already in [0, 1] whenever p_evidence > 0.
    let posterior = ((p_d * likelihood_d) / p_evidence).clamp(0.0, 1.0);
    belief.record(posterior);

    Ok(Update {
        posterior,
        boundary,
    })
}
