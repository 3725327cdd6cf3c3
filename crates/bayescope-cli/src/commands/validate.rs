//! The `bayescope validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(session_path: PathBuf) -> Result<()> {
    let sessions = if session_path.is_dir() {
        bayescope_core::parser::load_session_directory(&session_path)?
    } else {
        vec![bayescope_core::parser::parse_session(&session_path)?]
    };

    let mut total_warnings = 0;

    for session in &sessions {
        println!(
            "Session: {} ({} tests, {} steps)",
            session.name,
            session.steps.iter().map(|s| s.tests.len()).sum::<usize>(),
            session.steps.len()
        );

        let warnings = bayescope_core::parser::validate_session(session);
        for w in &warnings {
            let prefix = w
                .test
                .as_ref()
                .map(|name| format!("  [{name}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All sessions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
