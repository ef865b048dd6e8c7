//! Errors and the skip signal.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

use crate::param::Param;

/// A problem with the harness itself rather than with the code under test.
///
/// When a test body propagates one of these, the case is reported as
/// `Error`, not `Failed`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HarnessError {
    /// A test requested a fixture that no plugin registered.
    #[error("fixture `{0}` is not registered")]
    FixtureNotRegistered(&'static str),

    /// A test read a parameter it did not declare.
    #[error("test `{test}` did not declare parameter `{param}`")]
    ParamNotDeclared {
        /// The test definition name.
        test: String,
        /// The parameter that was read.
        param: Param,
    },

    /// A test declared the same parameter twice.
    #[error("test `{test}` declares parameter `{param}` more than once")]
    DuplicateParam {
        /// The test definition name.
        test: String,
        /// The repeated parameter.
        param: Param,
    },

    /// Two test definitions share an identity.
    #[error("test `{0}` is registered more than once")]
    DuplicateTest(String),

    /// The JSON report could not be written.
    #[error("failed to write report to {path}")]
    Report {
        /// Destination path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for harness operations.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

/// Signal that a test should be skipped.
///
/// Returned by the marker gate before a test runs, or from inside a test body
/// (as an `anyhow::Error`) to skip at runtime. A skipped test is reported as
/// neither passed nor failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("skipped: {reason}")]
pub struct Skip {
    reason: Cow<'static, str>,
}

impl Skip {
    /// Create a skip signal with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason given for skipping.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Skip the current test from inside its body.
///
/// ```
/// use axon_testing::skip;
///
/// fn body() -> anyhow::Result<()> {
///     if cfg!(target_os = "none") {
///         return skip("no operating system");
///     }
///     Ok(())
/// }
/// # body().unwrap();
/// ```
///
/// # Errors
///
/// Always returns the [`Skip`] signal.
pub fn skip<T>(reason: impl Into<Cow<'static, str>>) -> anyhow::Result<T> {
    Err(Skip::new(reason).into())
}
