//! # Axon Testing
//!
//! Test configuration for Axon simulator backends.
//!
//! This crate supplies what a simulator test suite needs around the tests
//! themselves:
//!
//! - **Seeds**: a per-test seed and seeded RNG derived from the test's
//!   identity, reproducible across runs and machines
//! - **Fixtures**: the simulator under test and the reference simulator
//! - **Parametrization**: fan a test out over neuron models (`nl`,
//!   `nl_nodirect`)
//! - **Markers**: benchmark, example and optional tests gated by
//!   `--benchmarks`, `--noexamples` and `--optional`
//!
//! ## Usage
//!
//! In a `harness = false` test target:
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! use axon::{Network, Population, Simulator};
//! use axon_testing::{run_main, test_def, Fixtures, HarnessConfig, Param};
//!
//! fn test_runs(fx: &mut Fixtures) -> anyhow::Result<()> {
//!     let mut net = Network::new();
//!     net.add(Population::new("ens", fx.nl()?, 10));
//!     let mut sim = fx.build(&net)?;
//!     sim.run(0.1);
//!     anyhow::ensure!(sim.n_steps() == 100);
//!     Ok(())
//! }
//!
//! fn main() -> ExitCode {
//!     let mut config = HarnessConfig::with_defaults();
//!     config.add_test(test_def!(test_runs).param(Param::NeuronModel));
//!     run_main(config)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod case;
pub mod config;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod identity;
pub mod logging;
pub mod marker;
pub mod options;
pub mod param;
pub mod plugin;
pub mod report;
pub mod seed;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use case::{TestCase, TestDef, TestFn};
pub use config::HarnessConfig;
pub use error::{skip, HarnessError, HarnessResult, Skip};
pub use fixture::Fixtures;
pub use harness::{run_main, Harness};
pub use identity::TestIdentity;
pub use marker::{check_markers, Marker, Markers};
pub use options::HarnessOptions;
pub use param::{parametrize, Param, ParamSet};
pub use plugin::{AxonPlugin, HarnessPlugin};
pub use report::{CaseReport, Outcome, Report, Summary};
pub use seed::{function_seed, test_rng, test_seed, MAX_SEED};
