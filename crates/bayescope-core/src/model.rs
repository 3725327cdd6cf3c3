//! Core data model types for bayescope.
//!
//! [`Evidence`] describes one diagnostic test's discriminating power and its
//! observed outcome; [`BeliefState`] carries the prior and the append-only
//! posterior trajectory for one diagnostic session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{check_probability, FusionError};

/// Observed result of a diagnostic test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Positive,
    Negative,
}

impl TestOutcome {
    /// Returns `true` for a positive result.
    pub fn is_positive(self) -> bool {
        matches!(self, TestOutcome::Positive)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOutcome::Positive => write!(f, "positive"),
            TestOutcome::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for TestOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(TestOutcome::Positive),
            "negative" | "neg" | "-" => Ok(TestOutcome::Negative),
            other => Err(format!("unknown test outcome: {other}")),
        }
    }
}

/// One diagnostic test result: the test's characteristics plus what it read.
///
/// Fields are private so the probability-range invariant cannot be bypassed;
/// construction goes through [`Evidence::new`], including serde input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEvidence")]
pub struct Evidence {
    /// P(positive | hypothesis true), in [0, 1].
    sensitivity: f64,
    /// P(positive | hypothesis false), in [0, 1].
    false_positive_rate: f64,
    /// The observed result.
    outcome: TestOutcome,
}

/// Unvalidated serde mirror of [`Evidence`].
#[derive(Debug, Deserialize)]
struct RawEvidence {
    sensitivity: f64,
    false_positive_rate: f64,
    outcome: TestOutcome,
}

impl TryFrom<RawEvidence> for Evidence {
    type Error = FusionError;

    fn try_from(raw: RawEvidence) -> Result<Self, Self::Error> {
        Evidence::new(raw.sensitivity, raw.false_positive_rate, raw.outcome)
    }
}

impl Evidence {
    /// Build a validated evidence item.
    ///
    /// A sensitivity or false-positive rate of exactly 0 or 1 is legal (a
    /// deterministic test) even though it can drive the posterior to an
    /// absorbing boundary.
    pub fn new(
        sensitivity: f64,
        false_positive_rate: f64,
        outcome: TestOutcome,
    ) -> Result<Self, FusionError> {
        Ok(Self {
            sensitivity: check_probability("sensitivity", sensitivity)?,
            false_positive_rate: check_probability("false_positive_rate", false_positive_rate)?,
            outcome,
        })
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    pub fn outcome(&self) -> TestOutcome {
        self.outcome
    }

    /// Returns `true` if the test can move a posterior at all. A test whose
    /// sensitivity equals its false-positive rate carries zero
    /// discriminating power.
    pub fn discriminates(&self) -> bool {
        self.sensitivity != self.false_positive_rate
    }

    /// Per-test conditional likelihoods `(P(outcome | D), P(outcome | not D))`.
    pub(crate) fn likelihoods(&self) -> (f64, f64) {
        match self.outcome {
            TestOutcome::Positive => (self.sensitivity, self.false_positive_rate),
            TestOutcome::Negative => (1.0 - self.sensitivity, 1.0 - self.false_positive_rate),
        }
    }
}

/// The belief trajectory of one diagnostic session.
///
/// `history[0]` is always the prior; each successful update appends exactly
/// one posterior. The history is append-only and privately owned: readers
/// get a slice, and the only mutation point is the update engine. A
/// `BeliefState` must be exclusively owned by one logical session; sharing
/// one across threads requires caller-side locking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefState {
    prior: f64,
    history: Vec<f64>,
}

impl BeliefState {
    /// Start a session from a prior probability of the hypothesis.
    ///
    /// A prior of exactly 0 or 1 is accepted but logged as a boundary
    /// advisory: no evidence can move an absorbed belief.
    pub fn new(prior: f64) -> Result<Self, FusionError> {
        let prior = check_probability("prior", prior)?;
        if prior == 0.0 || prior == 1.0 {
            tracing::warn!(prior, "prior is an absorbing boundary; evidence cannot move it");
        }
        Ok(Self {
            prior,
            history: vec![prior],
        })
    }

    /// The prior this session started from.
    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// The current posterior (the last element of the history).
    pub fn posterior(&self) -> f64 {
        // history is never empty: it starts with the prior.
        *self.history.last().unwrap_or(&self.prior)
    }

    /// The full posterior trajectory, prior first. Never retroactively
    /// modified, so a renderer may snapshot it after any update.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Number of successful update calls so far.
    pub fn updates(&self) -> usize {
        self.history.len() - 1
    }

    /// Returns `true` if the current posterior sits at 0 or 1.
    pub fn at_boundary(&self) -> bool {
        let p = self.posterior();
        p == 0.0 || p == 1.0
    }

    pub(crate) fn record(&mut self, posterior: f64) {
        self.history.push(posterior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_display_and_parse() {
        assert_eq!(TestOutcome::Positive.to_string(), "positive");
        assert_eq!("positive".parse::<TestOutcome>().unwrap(), TestOutcome::Positive);
        assert_eq!("+".parse::<TestOutcome>().unwrap(), TestOutcome::Positive);
        assert_eq!("NEG".parse::<TestOutcome>().unwrap(), TestOutcome::Negative);
        assert!("maybe".parse::<TestOutcome>().is_err());
    }

    #[test]
    fn evidence_rejects_out_of_range_at_construction() {
        let err = Evidence::new(1.5, 0.1, TestOutcome::Positive).unwrap_err();
        assert_eq!(
            err,
            FusionError::InvalidProbability {
                field: "sensitivity",
                value: 1.5
            }
        );
        assert!(Evidence::new(0.9, -0.01, TestOutcome::Negative).is_err());
    }

    #[test]
    fn deterministic_tests_are_legal() {
        assert!(Evidence::new(0.0, 0.0, TestOutcome::Positive).is_ok());
        assert!(Evidence::new(1.0, 1.0, TestOutcome::Negative).is_ok());
    }

    #[test]
    fn evidence_likelihoods_flip_on_negative_outcome() {
        let pos = Evidence::new(0.95, 0.02, TestOutcome::Positive).unwrap();
        assert_eq!(pos.likelihoods(), (0.95, 0.02));

        let neg = Evidence::new(0.95, 0.02, TestOutcome::Negative).unwrap();
        let (ld, lnd) = neg.likelihoods();
        assert!((ld - 0.05).abs() < 1e-12);
        assert!((lnd - 0.98).abs() < 1e-12);
    }

    #[test]
    fn evidence_serde_revalidates_on_deserialize() {
        let good = r#"{"sensitivity":0.9,"false_positive_rate":0.1,"outcome":"positive"}"#;
        let ev: Evidence = serde_json::from_str(good).unwrap();
        assert_eq!(ev.outcome(), TestOutcome::Positive);

        let bad = r#"{"sensitivity":1.9,"false_positive_rate":0.1,"outcome":"positive"}"#;
        assert!(serde_json::from_str::<Evidence>(bad).is_err());
    }

    #[test]
    fn belief_state_starts_with_prior() {
        let belief = BeliefState::new(0.001).unwrap();
        assert_eq!(belief.prior(), 0.001);
        assert_eq!(belief.posterior(), 0.001);
        assert_eq!(belief.history(), &[0.001]);
        assert_eq!(belief.updates(), 0);
        assert!(!belief.at_boundary());
    }

    #[test]
    fn belief_state_rejects_invalid_prior() {
        assert!(BeliefState::new(-0.5).is_err());
        assert!(BeliefState::new(1.0001).is_err());
        assert!(BeliefState::new(f64::NAN).is_err());
    }

    #[test]
    fn boundary_priors_are_accepted() {
        assert!(BeliefState::new(0.0).unwrap().at_boundary());
        assert!(BeliefState::new(1.0).unwrap().at_boundary());
    }
}
