//! Test category markers and the skip gate.
//!
//! A test can carry any combination of [`Markers`]. Before a case runs, the
//! gate walks the categories in a fixed order (benchmark, example, optional)
//! and skips the case on the first category the options do not enable.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::Skip;
use crate::options::HarnessOptions;

bitflags! {
    /// Set of category markers attached to a test.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Markers: u8 {
        /// Benchmarking test, opt-in via `--benchmarks`.
        const BENCHMARK = 1 << 0;
        /// Example-based test, opt-out via `--noexamples`.
        const EXAMPLE = 1 << 1;
        /// Test using optional dependencies, opt-in via `--optional`.
        const OPTIONAL = 1 << 2;
    }
}

/// A single test category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Benchmarking test.
    Benchmark,
    /// Example-based test.
    Example,
    /// Test that may use optional packages.
    Optional,
}

impl Marker {
    /// Every category, in gate order.
    pub const ALL: [Self; 3] = [Self::Benchmark, Self::Example, Self::Optional];

    /// The flag bit for this category.
    #[must_use]
    pub const fn flag(self) -> Markers {
        match self {
            Self::Benchmark => Markers::BENCHMARK,
            Self::Example => Markers::EXAMPLE,
            Self::Optional => Markers::OPTIONAL,
        }
    }

    /// Skip reason reported when this category is not enabled.
    #[must_use]
    pub const fn skip_reason(self) -> &'static str {
        match self {
            Self::Benchmark => "benchmarks not requested",
            Self::Example => "examples not requested",
            Self::Optional => "optional tests not requested",
        }
    }

    /// Whether `options` allow tests in this category to run.
    #[must_use]
    pub const fn enabled(self, options: &HarnessOptions) -> bool {
        match self {
            Self::Benchmark => options.benchmarks,
            Self::Example => options.run_examples(),
            Self::Optional => options.optional,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Benchmark => write!(f, "benchmark"),
            Self::Example => write!(f, "example"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

impl From<Marker> for Markers {
    fn from(marker: Marker) -> Self {
        marker.flag()
    }
}

impl Markers {
    /// Returns true if the set includes `marker`.
    #[must_use]
    pub fn has(self, marker: Marker) -> bool {
        self.contains(marker.flag())
    }
}

/// Decide whether a test carrying `markers` may run under `options`.
///
/// # Errors
///
/// Returns the [`Skip`] signal for the first marked category that is not
/// enabled.
///
/// # Example
///
/// ```
/// use axon_testing::{check_markers, HarnessOptions, Markers};
///
/// let options = HarnessOptions::default();
/// let skip = check_markers(Markers::BENCHMARK, &options).unwrap_err();
/// assert_eq!(skip.reason(), "benchmarks not requested");
/// assert!(check_markers(Markers::EXAMPLE, &options).is_ok());
/// ```
pub fn check_markers(markers: Markers, options: &HarnessOptions) -> Result<(), Skip> {
    match Marker::ALL
        .into_iter()
        .find(|&marker| markers.has(marker) && !marker.enabled(options))
    {
        Some(marker) => Err(Skip::new(marker.skip_reason())),
        None => Ok(()),
    }
}
