//! The `bayescope show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use bayescope_core::report::SessionReport;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    println!(
        "Session: {} ({}, report {})",
        report.session,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id
    );

    let mut table = Table::new();
    table.set_header(vec!["Step", "Tests", "Posterior"]);
    table.add_row(vec![
        Cell::new("0"),
        Cell::new("(prior)"),
        Cell::new(format!("{:.6}", report.prior)),
    ]);
    for (i, step) in report.steps.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&step.label),
            Cell::new(format!("{:.6}", step.posterior)),
        ]);
    }
    println!("{table}");

    println!(
        "Final posterior: {:.6} ({} evidence, net Bayes factor {})",
        report.summary.posterior,
        report.summary.strength.label(),
        super::run::format_bayes_factor(report.summary.net_bayes_factor),
    );
    println!("\n{}", crate::chart::bars(&report.history, 40));
    println!("{}", crate::chart::trajectory(&report.history));

    Ok(())
}
