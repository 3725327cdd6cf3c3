//! The `bayescope init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("sessions")?;
    let example_path = std::path::Path::new("sessions/example.toml");
    if example_path.exists() {
        println!("sessions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SESSION)?;
        println!("Created sessions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit sessions/example.toml with your tests");
    println!("  2. Run: bayescope validate --session sessions/example.toml");
    println!("  3. Run: bayescope run --session sessions/example.toml");

    Ok(())
}

const EXAMPLE_SESSION: &str = r#"# bayescope session
#
# `prior` is the probability of the hypothesis before any evidence.
# Each [[tests]] entry is one diagnostic test result; tests that share a
# `step` value are fused together in a single atomic update.

[session]
name = "Example panel"
description = "Rare condition screened by three independent tests"
prior = 0.001

[[tests]]
name = "ELISA"
sensitivity = 0.95
false_positive_rate = 0.02
outcome = "positive"

[[tests]]
name = "Western blot"
sensitivity = 0.90
false_positive_rate = 0.05
outcome = "positive"

[[tests]]
name = "PCR"
sensitivity = 0.92
false_positive_rate = 0.03
outcome = "negative"
"#;
