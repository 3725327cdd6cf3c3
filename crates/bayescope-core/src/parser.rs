//! TOML session parser.
//!
//! Loads diagnostic sessions from TOML files and directories, and runs an
//! advisory validation pass over them. A session file carries a `[session]`
//! header (name, description, prior) and any number of `[[tests]]` entries;
//! tests that share a `step` index are fused in a single atomic update,
//! every other test gets an update call of its own.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Evidence, TestOutcome};

/// Intermediate TOML structure for parsing session files.
#[derive(Debug, Deserialize)]
struct TomlSessionFile {
    session: TomlSessionHeader,
    #[serde(default)]
    tests: Vec<TomlTest>,
}

#[derive(Debug, Deserialize)]
struct TomlSessionHeader {
    name: String,
    #[serde(default)]
    description: String,
    prior: f64,
}

#[derive(Debug, Deserialize)]
struct TomlTest {
    name: String,
    sensitivity: f64,
    false_positive_rate: f64,
    outcome: String,
    #[serde(default)]
    step: Option<u32>,
}

/// One named test inside a session.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTest {
    pub name: String,
    pub evidence: Evidence,
}

/// One atomic update step: every test in it is fused in a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionStep {
    pub tests: Vec<NamedTest>,
}

impl FusionStep {
    /// Short label naming the tests in the step.
    pub fn label(&self) -> String {
        self.tests
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// The evidence batch to hand to the update engine.
    pub fn evidence(&self) -> Vec<Evidence> {
        self.tests.iter().map(|t| t.evidence).collect()
    }
}

/// A parsed diagnostic session: a prior plus an ordered plan of update steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub name: String,
    pub description: String,
    pub prior: f64,
    pub steps: Vec<FusionStep>,
}

/// Parse a single TOML file into a `Session`.
pub fn parse_session(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;
    parse_session_str(&content, path)
}

/// Parse a TOML string into a `Session` (useful for testing).
pub fn parse_session_str(content: &str, source_path: &Path) -> Result<Session> {
    let parsed: TomlSessionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    // Steps keep the order of first appearance; tests sharing an explicit
    // step index fuse into that step, everything else stands alone.
    let mut steps: Vec<(Option<u32>, FusionStep)> = Vec::new();
    for test in parsed.tests {
        let outcome: TestOutcome = test
            .outcome
            .parse()
            .map_err(|e: String| anyhow::anyhow!("test '{}': {e}", test.name))?;
        let evidence = Evidence::new(test.sensitivity, test.false_positive_rate, outcome)
            .with_context(|| format!("test '{}' has an invalid parameter", test.name))?;
        let named = NamedTest {
            name: test.name,
            evidence,
        };

        match test.step {
            Some(idx) => {
                if let Some((_, step)) = steps.iter_mut().find(|(s, _)| *s == Some(idx)) {
                    step.tests.push(named);
                } else {
                    steps.push((Some(idx), FusionStep { tests: vec![named] }));
                }
            }
            None => steps.push((None, FusionStep { tests: vec![named] })),
        }
    }

    Ok(Session {
        name: parsed.session.name,
        description: parsed.session.description,
        prior: parsed.session.prior,
        steps: steps.into_iter().map(|(_, s)| s).collect(),
    })
}

/// Load all `.toml` session files from a directory, sorted by file name.
pub fn load_session_directory(dir: &Path) -> Result<Vec<Session>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    paths.iter().map(|p| parse_session(p)).collect()
}

/// Advisory finding from session validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Test the warning refers to, if any.
    pub test: Option<String>,
    pub message: String,
}

/// Validate a session, returning advisory warnings. None of these block a
/// run; the engine enforces the hard invariants itself.
pub fn validate_session(session: &Session) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !(0.0..=1.0).contains(&session.prior) {
        warnings.push(ValidationWarning {
            test: None,
            message: format!("prior {} is not a probability in [0, 1]", session.prior),
        });
    } else if session.prior == 0.0 || session.prior == 1.0 {
        warnings.push(ValidationWarning {
            test: None,
            message: format!(
                "prior {} is an absorbing boundary; evidence cannot move it",
                session.prior
            ),
        });
    }

    if session.steps.is_empty() {
        warnings.push(ValidationWarning {
            test: None,
            message: "session has no tests".into(),
        });
    }

    for step in &session.steps {
        for test in &step.tests {
            let ev = &test.evidence;
            if !ev.discriminates() {
                warnings.push(ValidationWarning {
                    test: Some(test.name.clone()),
                    message: "sensitivity equals false-positive rate; the test carries no \
                              discriminating power"
                        .into(),
                });
            } else if ev.sensitivity() < ev.false_positive_rate() {
                warnings.push(ValidationWarning {
                    test: Some(test.name.clone()),
                    message: "sensitivity is below the false-positive rate; a positive result \
                              argues against the hypothesis"
                        .into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const EXAMPLE: &str = r#"
[session]
name = "Lyme panel"
description = "Three independent serology tests"
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

    fn src() -> PathBuf {
        PathBuf::from("test.toml")
    }

    #[test]
    fn parse_basic_session() {
        let session = parse_session_str(EXAMPLE, &src()).unwrap();
        assert_eq!(session.name, "Lyme panel");
        assert_eq!(session.prior, 0.001);
        assert_eq!(session.steps.len(), 3);
        assert_eq!(session.steps[0].label(), "ELISA");
        assert_eq!(session.steps[0].tests[0].evidence.sensitivity(), 0.95);
        assert!(validate_session(&session).is_empty());
    }

    #[test]
    fn shared_step_index_fuses_tests() {
        let toml = r#"
[session]
name = "batched"
prior = 0.01

[[tests]]
name = "a"
sensitivity = 0.9
false_positive_rate = 0.1
outcome = "+"
step = 1

[[tests]]
name = "b"
sensitivity = 0.8
false_positive_rate = 0.2
outcome = "-"
step = 1

[[tests]]
name = "c"
sensitivity = 0.7
false_positive_rate = 0.3
outcome = "+"
"#;
        let session = parse_session_str(toml, &src()).unwrap();
        assert_eq!(session.steps.len(), 2);
        assert_eq!(session.steps[0].label(), "a + b");
        assert_eq!(session.steps[0].evidence().len(), 2);
        assert_eq!(session.steps[1].label(), "c");
    }

    #[test]
    fn invalid_probability_fails_at_parse_time() {
        let toml = r#"
[session]
name = "bad"
prior = 0.5

[[tests]]
name = "broken"
sensitivity = 1.5
false_positive_rate = 0.1
outcome = "positive"
"#;
        let err = parse_session_str(toml, &src()).unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }

    #[test]
    fn unknown_outcome_fails() {
        let toml = r#"
[session]
name = "bad"
prior = 0.5

[[tests]]
name = "odd"
sensitivity = 0.9
false_positive_rate = 0.1
outcome = "inconclusive"
"#;
        assert!(parse_session_str(toml, &src()).is_err());
    }

    #[test]
    fn validation_flags_weak_and_reversed_tests() {
        let toml = r#"
[session]
name = "advisories"
prior = 1.0

[[tests]]
name = "coin flip"
sensitivity = 0.5
false_positive_rate = 0.5
outcome = "positive"

[[tests]]
name = "backwards"
sensitivity = 0.2
false_positive_rate = 0.6
outcome = "negative"
"#;
        let session = parse_session_str(toml, &src()).unwrap();
        let warnings = validate_session(&session);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].message.contains("absorbing boundary"));
        assert_eq!(warnings[1].test.as_deref(), Some("coin flip"));
        assert_eq!(warnings[2].test.as_deref(), Some("backwards"));
    }

    #[test]
    fn empty_session_warns() {
        let toml = r#"
[session]
name = "empty"
prior = 0.3
"#;
        let session = parse_session_str(toml, &src()).unwrap();
        let warnings = validate_session(&session);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no tests"));
    }
}
