//! Trajectory statistics: odds, Bayes factors, and strength-of-evidence
//! classification on the standard interpretation scale.

use serde::{Deserialize, Serialize};

use crate::model::BeliefState;

/// Natural-log odds of a probability. Returns `-inf` at 0 and `+inf` at 1.
pub fn log_odds(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Net Bayes factor between two points of a trajectory: posterior odds over
/// prior odds. Greater than 1 means the evidence favoured the hypothesis.
/// Returns a non-finite value when either end sits at a boundary.
pub fn bayes_factor(prior: f64, posterior: f64) -> f64 {
    let prior_odds = prior / (1.0 - prior);
    let posterior_odds = posterior / (1.0 - posterior);
    posterior_odds / prior_odds
}

/// Strength of evidence on the conventional Bayes-factor scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// BF < 3 — barely worth mentioning.
    Negligible,
    /// 3 <= BF < 10.
    Substantial,
    /// 10 <= BF < 30.
    Strong,
    /// 30 <= BF < 100.
    VeryStrong,
    /// BF >= 100.
    Decisive,
}

impl EvidenceStrength {
    /// Classify the magnitude of a Bayes factor. Factors below 1 are folded
    /// to their reciprocal so strength is direction-free; NaN classifies as
    /// negligible.
    pub fn from_bayes_factor(bf: f64) -> Self {
        let magnitude = if bf < 1.0 { 1.0 / bf } else { bf };
        if magnitude.is_nan() || magnitude < 3.0 {
            EvidenceStrength::Negligible
        } else if magnitude < 10.0 {
            EvidenceStrength::Substantial
        } else if magnitude < 30.0 {
            EvidenceStrength::Strong
        } else if magnitude < 100.0 {
            EvidenceStrength::VeryStrong
        } else {
            EvidenceStrength::Decisive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EvidenceStrength::Negligible => "negligible",
            EvidenceStrength::Substantial => "substantial",
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::VeryStrong => "very strong",
            EvidenceStrength::Decisive => "decisive",
        }
    }
}

/// Aggregate view of one session's posterior trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    /// Number of successful update calls.
    pub updates: usize,
    pub prior: f64,
    pub posterior: f64,
    /// Highest posterior seen anywhere on the trajectory.
    pub peak: f64,
    /// Lowest posterior seen anywhere on the trajectory.
    pub trough: f64,
    /// Posterior odds over prior odds across the whole session. `None` when
    /// either end sits at a boundary and the odds ratio is not finite
    /// (JSON cannot carry infinities).
    pub net_bayes_factor: Option<f64>,
    /// `true` when the net movement favoured the hypothesis.
    pub supports_hypothesis: bool,
    pub strength: EvidenceStrength,
}

/// Summarize a belief trajectory end to end.
pub fn summarize(belief: &BeliefState) -> TrajectorySummary {
    let history = belief.history();
    let prior = belief.prior();
    let posterior = belief.posterior();
    let peak = history.iter().cloned().fold(f64::MIN, f64::max);
    let trough = history.iter().cloned().fold(f64::MAX, f64::min);
    let bf = bayes_factor(prior, posterior);

    TrajectorySummary {
        updates: belief.updates(),
        prior,
        posterior,
        peak,
        trough,
        net_bayes_factor: bf.is_finite().then_some(bf),
        supports_hypothesis: posterior > prior,
        // Classify from the raw factor so an infinite one still reads as
        // decisive.
        strength: EvidenceStrength::from_bayes_factor(bf),
    }
}
