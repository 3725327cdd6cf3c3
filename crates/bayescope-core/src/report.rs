//! Session report types with JSON persistence.
//!
//! A report snapshots one finished session: the prior, the complete ordered
//! posterior history, a record per update step, and the trajectory summary.
//! This is the only serialization surface the engine offers; it preserves
//! `prior` and the full `history` in order.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::BeliefState;
use crate::statistics::{summarize, TrajectorySummary};

/// A complete session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Session name.
    pub session: String,
    /// The prior the session started from.
    pub prior: f64,
    /// The full posterior trajectory, prior first, in update order.
    pub history: Vec<f64>,
    /// One record per update step.
    pub steps: Vec<StepRecord>,
    /// Aggregate trajectory statistics.
    pub summary: TrajectorySummary,
}

/// Record of one update step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Tests fused in this step.
    pub label: String,
    /// How many evidence items the step fused.
    pub evidence_count: usize,
    /// Posterior after the step.
    pub posterior: f64,
    /// Whether the belief was absorbed at a boundary going into the step.
    pub boundary_warning: bool,
}

impl SessionReport {
    /// Snapshot a finished session.
    pub fn new(session: impl Into<String>, belief: &BeliefState, steps: Vec<StepRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            session: session.into(),
            prior: belief.prior(),
            history: belief.history().to_vec(),
            steps,
            summary: summarize(belief),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_belief, update};
    use crate::model::{Evidence, TestOutcome};

    fn finished_session() -> (BeliefState, Vec<StepRecord>) {
        let mut belief = create_belief(0.001).unwrap();
        let ev = Evidence::new(0.95, 0.02, TestOutcome::Positive).unwrap();
        let u = update(&mut belief, &[ev]).unwrap();
        let steps = vec![StepRecord {
            label: "ELISA".into(),
            evidence_count: 1,
            posterior: u.posterior,
            boundary_warning: u.boundary.is_some(),
        }];
        (belief, steps)
    }

    #[test]
    fn report_preserves_prior_and_ordered_history() {
        let (belief, steps) = finished_session();
        let report = SessionReport::new("Lyme panel", &belief, steps);
        assert_eq!(report.prior, 0.001);
        assert_eq!(report.history, belief.history());
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.summary.updates, 1);
    }

    #[test]
    fn json_round_trip() {
        let (belief, steps) = finished_session();
        let report = SessionReport::new("Lyme panel", &belief, steps);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/session.json");
        report.save_json(&path).unwrap();

        let loaded = SessionReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.history, report.history);
        assert_eq!(loaded.steps[0].label, "ELISA");
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn load_missing_report_fails_with_path_in_error() {
        let err = SessionReport::load_json(Path::new("no-such-report.json")).unwrap_err();
        assert!(format!("{err:#}").contains("no-such-report.json"));
    }
}
