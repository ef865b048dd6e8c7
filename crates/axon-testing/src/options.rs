//! Command line options for the test harness.
//!
//! | Flag | Default | Effect |
//! |---|---|---|
//! | `--benchmarks` | off | Also run tests marked benchmark |
//! | `--noexamples` | off | Do not run tests marked example |
//! | `--optional` | off | Also run tests marked optional |
//! | `[FILTER]` | none | Only run cases whose id contains the substring |
//! | `--list` | off | List collected cases and exit |
//! | `--report-json <PATH>` | none | Write a JSON report |
//!
//! The three category flags can also be set through `AXON_BENCHMARKS`,
//! `AXON_NOEXAMPLES` and `AXON_OPTIONAL`; any value other than an empty
//! string, `0`, `false`, `no`, `off`, `n` or `f` turns the flag on.
//!
//! The flags `cargo test` and `cargo bench` forward to libtest harnesses are
//! accepted. `--skip <PATTERN>` drops cases whose id contains the pattern;
//! the rest are ignored.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};

/// Options controlling which tests run and how results are reported.
#[derive(Parser, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(name = "axon-tests", about = "Run an Axon simulator test suite")]
#[allow(clippy::struct_excessive_bools)]
pub struct HarnessOptions {
    /// Also run benchmarking tests
    #[arg(
        long,
        env = "AXON_BENCHMARKS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub benchmarks: bool,

    /// Do not run examples
    #[arg(
        long,
        env = "AXON_NOEXAMPLES",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub noexamples: bool,

    /// Also run optional tests that may use optional packages
    #[arg(
        long,
        env = "AXON_OPTIONAL",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub optional: bool,

    /// Only run cases whose id contains this substring
    #[arg(value_name = "FILTER")]
    pub filter: Option<String>,

    /// List collected cases without running them
    #[arg(long)]
    pub list: bool,

    /// Write a JSON report of all outcomes to this path
    #[arg(long, value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    #[command(flatten)]
    #[serde(skip)]
    pub(crate) libtest: LibtestCompat,
}

/// Arguments libtest understands that have no effect on this harness.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct LibtestCompat {
    #[arg(long, hide = true)]
    nocapture: bool,
    #[arg(long, hide = true)]
    show_output: bool,
    #[arg(long, hide = true)]
    exact: bool,
    #[arg(long, hide = true)]
    ignored: bool,
    #[arg(long, hide = true)]
    include_ignored: bool,
    #[arg(long, hide = true)]
    bench: bool,
    #[arg(short, long, hide = true)]
    quiet: bool,
    #[arg(long, hide = true, value_name = "N")]
    test_threads: Option<usize>,
    #[arg(long, hide = true, value_name = "WHEN")]
    color: Option<String>,
    #[arg(long, hide = true, value_name = "FORMAT")]
    format: Option<String>,
    #[arg(long, hide = true, value_name = "PATTERN")]
    skip: Vec<String>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            benchmarks: false,
            noexamples: false,
            optional: false,
            filter: None,
            list: false,
            report_json: None,
            libtest: LibtestCompat::default(),
        }
    }
}

impl HarnessOptions {
    /// Parse options from the process arguments and environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse()
    }

    /// Parse options from an explicit argument list (first item is the
    /// program name).
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }

    /// Whether tests marked example should run.
    #[must_use]
    pub const fn run_examples(&self) -> bool {
        !self.noexamples
    }

    /// Returns true if a case id passes the name filter and no `--skip`
    /// pattern. Matching is a case-sensitive substring test.
    #[must_use]
    pub fn matches(&self, case_id: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |filter| case_id.contains(filter))
            && !self
                .libtest
                .skip
                .iter()
                .any(|pattern| case_id.contains(pattern.as_str()))
    }
}
