//! Harness-level tests.
//!
//! - `gating.rs`: marker gating through the full runner
//! - `fanout.rs`: parametrized expansion through the full runner
//! - `determinism.rs`: seeds and simulators are reproducible per test
//! - `helpers.rs`: harness construction utilities

mod helpers;
