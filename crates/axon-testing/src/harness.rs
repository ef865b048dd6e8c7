//! The harness runner.
//!
//! Each registered [`TestDef`](crate::TestDef) is expanded into cases, each
//! case passes through the marker gate, and eligible cases run with a fresh
//! set of [`Fixtures`]:
//!
//! ```text
//! Collected ──gate──> Skipped(reason)
//!     │
//!     └────────────> Eligible ──body──> Passed | Failed | Error
//! ```
//!
//! Cases run one at a time on the calling thread.

use std::any::Any;
use std::collections::HashSet;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::time::Instant;

use crate::case::TestCase;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult, Skip};
use crate::fixture::Fixtures;
use crate::logging::init_tracing;
use crate::marker::check_markers;
use crate::options::HarnessOptions;
use crate::report::{CaseReport, Outcome, Report};

/// Runs the tests of a [`HarnessConfig`] under a set of [`HarnessOptions`].
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    options: HarnessOptions,
}

impl Harness {
    /// Create a harness.
    #[must_use]
    pub fn new(config: HarnessConfig, options: HarnessOptions) -> Self {
        Self { config, options }
    }

    /// The registered configuration.
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// Expand every definition into cases and apply the name filter.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateTest`] if two definitions share an
    /// identity, or [`HarnessError::DuplicateParam`] from expansion.
    pub fn collect(&self) -> HarnessResult<Vec<TestCase>> {
        let mut seen = HashSet::new();
        let mut cases = Vec::new();

        for def in self.config.tests() {
            if !seen.insert(def.identity()) {
                return Err(HarnessError::DuplicateTest(def.identity().to_string()));
            }
            cases.extend(
                def.expand()?
                    .into_iter()
                    .filter(|case| self.options.matches(case.id())),
            );
        }

        tracing::debug!(
            definitions = self.config.tests().len(),
            cases = cases.len(),
            "collected test cases"
        );
        Ok(cases)
    }

    /// Gate and run a single case.
    #[must_use]
    pub fn run_case(&self, case: &TestCase) -> Outcome {
        if let Err(skip) = check_markers(case.markers(), &self.options) {
            tracing::debug!(case = case.id(), reason = skip.reason(), "case skipped");
            return Outcome::Skipped(skip.reason().to_owned());
        }

        let mut fixtures = Fixtures::new(
            case.identity().clone(),
            case.params().clone(),
            self.config.simulator(),
            self.config.reference_simulator(),
        );

        tracing::trace!(case = case.id(), seed = fixtures.seed(), "running case");
        let body = case.body();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| body(&mut fixtures))) {
            Ok(Ok(())) => Outcome::Passed,
            Ok(Err(err)) => classify(&err),
            Err(payload) => Outcome::Failed(panic_message(payload.as_ref())),
        };

        match &outcome {
            Outcome::Failed(msg) => tracing::warn!(case = case.id(), %msg, "case failed"),
            Outcome::Error(msg) => tracing::warn!(case = case.id(), %msg, "case errored"),
            _ => tracing::debug!(case = case.id(), outcome = outcome.label(), "case finished"),
        }
        outcome
    }

    /// Collect and run every case.
    ///
    /// # Errors
    ///
    /// Returns collection errors; failures inside test bodies are recorded
    /// in the report instead.
    pub fn run(&self) -> HarnessResult<Report> {
        let mut report = Report::default();
        for case in self.collect()? {
            let start = Instant::now();
            let outcome = self.run_case(&case);
            let elapsed_secs = if matches!(outcome, Outcome::Skipped(_)) {
                0.0
            } else {
                start.elapsed().as_secs_f64()
            };
            report.push(CaseReport {
                id: case.id().to_owned(),
                file: case.identity().file().to_owned(),
                outcome,
                elapsed_secs,
            });
        }
        Ok(report)
    }
}

fn classify(err: &anyhow::Error) -> Outcome {
    if let Some(skip) = err.downcast_ref::<Skip>() {
        Outcome::Skipped(skip.reason().to_owned())
    } else if err.downcast_ref::<HarnessError>().is_some() {
        Outcome::Error(format!("{err:#}"))
    } else {
        Outcome::Failed(format!("{err:#}"))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "test panicked".to_owned()
    }
}

/// Entry point for `harness = false` test targets.
///
/// Parses options from the command line, runs the suite, prints a
/// libtest-style summary and returns the process exit code.
///
/// ```no_run
/// use axon_testing::{run_main, HarnessConfig};
/// use std::process::ExitCode;
///
/// fn main() -> ExitCode {
///     let config = HarnessConfig::with_defaults();
///     run_main(config)
/// }
/// ```
#[must_use]
pub fn run_main(config: HarnessConfig) -> ExitCode {
    init_tracing();
    let harness = Harness::new(config, HarnessOptions::from_env());
    match execute(&harness, &mut io::stdout()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W: Write>(harness: &Harness, out: &mut W) -> anyhow::Result<bool> {
    if harness.options().list {
        let cases = harness.collect()?;
        for case in &cases {
            writeln!(out, "{}: test", case.id())?;
        }
        writeln!(out)?;
        writeln!(out, "{} tests", cases.len())?;
        return Ok(true);
    }

    let report = harness.run()?;

    writeln!(out)?;
    writeln!(out, "running {} tests", report.cases.len())?;
    for case in &report.cases {
        writeln!(out, "test {} ... {}", case.id, case.outcome.label())?;
    }

    let failures: Vec<_> = report
        .cases
        .iter()
        .filter(|c| c.outcome.is_failure())
        .collect();
    if !failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "failures:")?;
        for case in &failures {
            writeln!(out, "    {}: {}", case.id, case.outcome)?;
        }
    }

    let status = if report.success() { "ok" } else { "FAILED" };
    writeln!(out)?;
    writeln!(out, "test result: {status}. {}", report.summary())?;

    if let Some(path) = &harness.options().report_json {
        report.write_json(path)?;
        tracing::info!(path = %path.display(), "wrote JSON report");
    }

    Ok(report.success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::TestDef;
    use crate::identity::TestIdentity;

    fn harness_with(def: TestDef) -> Harness {
        let mut config = HarnessConfig::with_defaults();
        config.add_test(def);
        Harness::new(config, HarnessOptions::default())
    }

    fn only_outcome(def: TestDef) -> Outcome {
        let report = harness_with(def).run().unwrap();
        assert_eq!(report.cases.len(), 1);
        report.cases[0].outcome.clone()
    }

    fn id(name: &str) -> TestIdentity {
        TestIdentity::new("src/harness.rs", name)
    }

    #[test]
    fn test_passing_body() {
        assert_eq!(only_outcome(TestDef::new(id("ok"), |_| Ok(()))), Outcome::Passed);
    }

    #[test]
    fn test_error_return_is_failure() {
        let outcome = only_outcome(TestDef::new(id("bad"), |_| anyhow::bail!("rates diverged")));
        assert_eq!(outcome, Outcome::Failed("rates diverged".into()));
    }

    #[test]
    fn test_panic_is_failure() {
        let outcome = only_outcome(TestDef::new(id("panics"), |_| {
            assert_eq!(1 + 1, 3, "arithmetic is broken");
            Ok(())
        }));
        match outcome {
            Outcome::Failed(msg) => assert!(msg.contains("arithmetic is broken")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_runtime_skip() {
        let outcome = only_outcome(TestDef::new(id("skips"), |_| crate::skip("no gpu")));
        assert_eq!(outcome, Outcome::Skipped("no gpu".into()));
    }

    #[test]
    fn test_fixture_problem_is_error() {
        let outcome = only_outcome(TestDef::new(id("needs_nl"), |fx| {
            fx.nl()?;
            Ok(())
        }));
        assert!(matches!(outcome, Outcome::Error(_)));
    }

    #[test]
    fn test_missing_simulator_is_error() {
        let mut config = HarnessConfig::new();
        config.add_test(TestDef::new(id("needs_sim"), |fx| {
            fx.simulator()?;
            Ok(())
        }));
        let report = Harness::new(config, HarnessOptions::default()).run().unwrap();
        assert_eq!(
            report.cases[0].outcome,
            Outcome::Error("fixture `Simulator` is not registered".into())
        );
    }

    #[test]
    fn test_duplicate_definitions_rejected() {
        let mut config = HarnessConfig::with_defaults();
        config
            .add_test(TestDef::new(id("twice"), |_| Ok(())))
            .add_test(TestDef::new(id("twice"), |_| Ok(())));
        let err = Harness::new(config, HarnessOptions::default())
            .collect()
            .unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateTest(_)));
    }

    fn execute_to_string(harness: &Harness) -> (bool, String) {
        let mut out = Vec::new();
        let success = execute(harness, &mut out).unwrap();
        (success, String::from_utf8(out).unwrap())
    }

    fn mixed_config() -> HarnessConfig {
        let mut config = HarnessConfig::with_defaults();
        config
            .add_test(TestDef::new(id("passes"), |_| Ok(())))
            .add_test(TestDef::new(id("fails"), |_| anyhow::bail!("rates diverged")))
            .add_test(TestDef::new(id("rates"), |_| Ok(())).param(crate::Param::NonDirectNeuronModel));
        config
    }

    #[test]
    fn test_execute_list_does_not_run() {
        let options = HarnessOptions::from_args(["axon-tests", "--list"]);
        let (success, out) = execute_to_string(&Harness::new(mixed_config(), options));
        assert!(success);
        assert_eq!(
            out,
            "passes: test\nfails: test\nrates[LIF]: test\nrates[LIFRate]: test\n\n4 tests\n"
        );
    }

    #[test]
    fn test_execute_reports_failure() {
        let options = HarnessOptions::from_args(["axon-tests"]);
        let (success, out) = execute_to_string(&Harness::new(mixed_config(), options));
        assert!(!success);
        assert!(out.contains("test passes ... ok\n"));
        assert!(out.contains("test fails ... FAILED\n"));
        assert!(out.contains("    fails: FAILED (rates diverged)\n"));
        assert!(out.ends_with("test result: FAILED. 3 passed; 1 failed; 0 errors; 0 skipped\n"));
    }

    #[test]
    fn test_execute_succeeds_with_skips() {
        let mut config = HarnessConfig::with_defaults();
        config
            .add_test(TestDef::new(id("passes"), |_| Ok(())))
            .add_test(TestDef::new(id("bench"), |_| Ok(())).mark(crate::Marker::Benchmark));
        let options = HarnessOptions::from_args(["axon-tests"]);
        let (success, out) = execute_to_string(&Harness::new(config, options));
        assert!(success);
        assert!(out.ends_with("test result: ok. 1 passed; 0 failed; 0 errors; 1 skipped\n"));
    }

    #[test]
    fn test_execute_writes_json_report() {
        let path = std::env::temp_dir().join(format!("axon-execute-{}.json", std::process::id()));
        let path_arg = path.to_string_lossy().into_owned();
        let options = HarnessOptions::from_args(["axon-tests", "--report-json", path_arg.as_str()]);
        let (success, _) = execute_to_string(&Harness::new(mixed_config(), options));
        assert!(!success);

        let text = std::fs::read_to_string(&path).unwrap();
        let report: Report = serde_json::from_str(&text).unwrap();
        assert_eq!(report.cases.len(), 4);
        assert_eq!(report.outcome("passes"), Some(&Outcome::Passed));
        assert_eq!(
            report.outcome("fails"),
            Some(&Outcome::Failed("rates diverged".into()))
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_execute_report_error_propagates() {
        let path = std::env::temp_dir()
            .join("axon-execute-missing-dir")
            .join("report.json");
        let path_arg = path.to_string_lossy().into_owned();
        let options = HarnessOptions::from_args(["axon-tests", "--report-json", path_arg.as_str()]);
        let harness = Harness::new(mixed_config(), options);
        let err = execute(&harness, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.downcast_ref::<HarnessError>().is_some());
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "test panicked");
    }
}
