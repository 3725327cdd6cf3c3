//! Plain-text rendering of a posterior trajectory.
//!
//! A read-only consumer of the belief history: it receives an immutable
//! slice and has no way to mutate the session it came from.

use std::fmt::Write;

/// Height of the trajectory chart in rows.
const CHART_HEIGHT: usize = 10;

/// Per-point horizontal bar chart of the history, one row per entry.
///
/// ```text
///   0  0.0010 |
///   1  0.0454 |##
///   2  0.4612 |##################
/// ```
pub fn bars(history: &[f64], width: usize) -> String {
    let mut out = String::new();
    for (i, p) in history.iter().enumerate() {
        let bar_len = (p * width as f64).round() as usize;
        let bar: String = "#".repeat(bar_len.min(width));
        let _ = writeln!(out, "  {i:>3}  {p:.4} |{bar}");
    }
    out
}

/// Fixed-height line chart of the history on a [0, 1] vertical axis.
///
/// The axis is absolute rather than fitted to the data: a trajectory that
/// never leaves [0.4, 0.6] should look flat.
pub fn trajectory(history: &[f64]) -> String {
    let mut out = String::new();
    for row in (0..CHART_HEIGHT).rev() {
        let label = match row {
            r if r == CHART_HEIGHT - 1 => "1.0 ",
            r if r == CHART_HEIGHT / 2 => "0.5 ",
            0 => "0.0 ",
            _ => "    ",
        };
        let _ = write!(out, "{label}|");
        for p in history {
            // A point lands in the row covering its value; 1.0 goes to the
            // top row.
            let bucket = ((p * CHART_HEIGHT as f64) as usize).min(CHART_HEIGHT - 1);
            let _ = write!(out, "{}", if bucket == row { " *" } else { "  " });
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "    +{}", "--".repeat(history.len()));
    out
}
