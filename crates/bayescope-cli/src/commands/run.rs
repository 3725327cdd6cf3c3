//! The `bayescope run` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use bayescope_core::engine::{create_belief, update};
use bayescope_core::parser::{parse_session, Session};
use bayescope_core::report::{SessionReport, StepRecord};

pub fn execute(session_path: PathBuf, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let session = parse_session(&session_path)?;
    let report = fuse_session(&session)?;

    if quiet {
        println!("{:.6}", report.summary.posterior);
    } else {
        print_trajectory(&session, &report);
    }

    if let Some(path) = output {
        report
            .save_json(&path)
            .with_context(|| format!("failed to save report for '{}'", session.name))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Run every fusion step of the session and build its report.
fn fuse_session(session: &Session) -> Result<SessionReport> {
    let mut belief = create_belief(session.prior)?;
    let mut steps = Vec::with_capacity(session.steps.len());

    for step in &session.steps {
        let evidence = step.evidence();
        let outcome = update(&mut belief, &evidence)
            .with_context(|| format!("failed to fuse step '{}'", step.label()))?;
        if let Some(warning) = outcome.boundary {
            tracing::warn!(step = %step.label(), %warning, "boundary advisory");
        }
        steps.push(StepRecord {
            label: step.label(),
            evidence_count: evidence.len(),
            posterior: outcome.posterior,
            boundary_warning: outcome.boundary.is_some(),
        });
    }

    Ok(SessionReport::new(session.name.clone(), &belief, steps))
}

fn print_trajectory(session: &Session, report: &SessionReport) {
    println!("Session: {} (prior {})", session.name, session.prior);
    if !session.description.is_empty() {
        println!("{}", session.description);
    }

    let mut table = Table::new();
    table.set_header(vec!["Step", "Tests", "Evidence", "Posterior", "Note"]);
    table.add_row(vec![
        Cell::new("0"),
        Cell::new("(prior)"),
        Cell::new("-"),
        Cell::new(format!("{:.6}", report.prior)),
        Cell::new(""),
    ]);
    for (i, step) in report.steps.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&step.label),
            Cell::new(step.evidence_count),
            Cell::new(format!("{:.6}", step.posterior)),
            Cell::new(if step.boundary_warning {
                "boundary: evidence discarded"
            } else {
                ""
            }),
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "Posterior after {} update(s): {:.6} (net Bayes factor {}, {} evidence {})",
        summary.updates,
        summary.posterior,
        format_bayes_factor(summary.net_bayes_factor),
        summary.strength.label(),
        if summary.supports_hypothesis {
            "for the hypothesis"
        } else {
            "against the hypothesis"
        },
    );
    println!("\n{}", crate::chart::trajectory(&report.history));
}

/// A boundary trajectory has no finite odds ratio.
pub(crate) fn format_bayes_factor(bf: Option<f64>) -> String {
    match bf {
        Some(bf) => format!("{bf:.3}"),
        None => "undefined (boundary)".to_string(),
    }
}
