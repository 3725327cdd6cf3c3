//! Evidence-fusion error types.
//!
//! Defined in `bayescope-core` so callers can classify failures without
//! string matching. All three conditions are raised synchronously at the
//! offending call and never leave a `BeliefState` half-updated.

use thiserror::Error;

/// Errors that can occur when constructing evidence or fusing it into a
/// belief state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FusionError {
    /// A probability parameter lies outside the closed interval [0, 1].
    /// Raised at construction time, never deferred to update time.
    #[error("{field} is {value}, expected a probability in [0, 1]")]
    InvalidProbability { field: &'static str, value: f64 },

    /// `update` was called with an empty evidence batch.
    #[error("update called with an empty evidence batch")]
    EmptyEvidence,

    /// The evidence batch has zero marginal likelihood under both
    /// hypotheses, so the posterior is undefined.
    #[error("evidence is impossible under both hypotheses (zero marginal likelihood)")]
    DegenerateEvidence,
}

impl FusionError {
    /// Returns `true` if the same session may succeed when retried with
    /// different evidence. Range violations are caller bugs and are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FusionError::DegenerateEvidence | FusionError::EmptyEvidence
        )
    }
}

/// Validate one probability parameter, naming the offending field.
pub(crate) fn check_probability(field: &'static str, value: f64) -> Result<f64, FusionError> {
    // NaN fails the range test as well.
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(FusionError::InvalidProbability { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_probability_accepts_boundaries() {
        assert_eq!(check_probability("prior", 0.0), Ok(0.0));
        assert_eq!(check_probability("prior", 1.0), Ok(1.0));
        assert_eq!(check_probability("prior", 0.5), Ok(0.5));
    }

    #[test]
    fn check_probability_rejects_out_of_range_and_nan() {
        assert!(check_probability("sensitivity", 1.5).is_err());
        assert!(check_probability("sensitivity", -0.1).is_err());
        assert!(check_probability("sensitivity", f64::NAN).is_err());
    }

    #[test]
    fn recoverability_classification() {
        assert!(FusionError::DegenerateEvidence.is_recoverable());
        assert!(FusionError::EmptyEvidence.is_recoverable());
        assert!(!FusionError::InvalidProbability {
            field: "prior",
            value: 2.0
        }
        .is_recoverable());
    }

    #[test]
    fn display_names_the_field() {
        let err = FusionError::InvalidProbability {
            field: "false_positive_rate",
            value: -0.2,
        };
        assert!(err.to_string().contains("false_positive_rate"));
        assert!(err.to_string().contains("-0.2"));
    }
}
