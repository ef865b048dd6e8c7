//! Case outcomes and the run report.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, HarnessResult};

/// Terminal state of a test case.
///
/// `Collected → {Skipped | Eligible} → {Passed | Failed | Error}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// The body returned `Ok`.
    Passed,
    /// The body returned an error or panicked.
    Failed(String),
    /// The harness could not provide what the body asked for.
    Error(String),
    /// The case was not run; holds the reason.
    Skipped(String),
}

impl Outcome {
    /// Returns true for `Failed` and `Error`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Error(_))
    }

    /// Short label used in console output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "ok",
            Self::Failed(_) => "FAILED",
            Self::Error(_) => "ERROR",
            Self::Skipped(_) => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str(self.label()),
            Self::Failed(msg) | Self::Error(msg) | Self::Skipped(msg) => {
                write!(f, "{} ({msg})", self.label())
            }
        }
    }
}

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case id, e.g. `test_rates[LIF]`.
    pub id: String,
    /// Source file of the test definition.
    pub file: String,
    /// What happened.
    pub outcome: Outcome,
    /// Wall-clock time spent in the body, in seconds. Zero when skipped.
    pub elapsed_secs: f64,
}

/// Outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed.
    pub failed: usize,
    /// Cases that errored.
    pub errors: usize,
    /// Cases that were skipped.
    pub skipped: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed; {} failed; {} errors; {} skipped",
            self.passed, self.failed, self.errors, self.skipped
        )
    }
}

/// Outcomes of every collected case, in run order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Per-case results.
    pub cases: Vec<CaseReport>,
}

impl Report {
    /// Append a case result.
    pub fn push(&mut self, case: CaseReport) {
        self.cases.push(case);
    }

    /// Count outcomes.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.cases
            .iter()
            .fold(Summary::default(), |mut summary, case| {
                match case.outcome {
                    Outcome::Passed => summary.passed += 1,
                    Outcome::Failed(_) => summary.failed += 1,
                    Outcome::Error(_) => summary.errors += 1,
                    Outcome::Skipped(_) => summary.skipped += 1,
                }
                summary
            })
    }

    /// Returns true if no case failed or errored.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.cases.iter().any(|c| c.outcome.is_failure())
    }

    /// Outcome of the case with the given id.
    #[must_use]
    pub fn outcome(&self, id: &str) -> Option<&Outcome> {
        self.cases.iter().find(|c| c.id == id).map(|c| &c.outcome)
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Report`] if the file cannot be created or written.
    pub fn write_json(&self, path: &Path) -> HarnessResult<()> {
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, self).map_err(io::Error::from)?;
            writer.flush()
        };
        write().map_err(|source| HarnessError::Report {
            path: path.to_path_buf(),
            source,
        })
    }
}
