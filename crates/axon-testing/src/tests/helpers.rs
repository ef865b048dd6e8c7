//! Test helper functions for building harnesses and networks.

use std::sync::{Arc, Mutex};

use axon::{Network, NeuronType, Population};

use crate::case::TestDef;
use crate::config::HarnessConfig;
use crate::harness::Harness;
use crate::identity::TestIdentity;
use crate::options::HarnessOptions;

/// Identity in this test module.
pub fn id(name: &str) -> TestIdentity {
    TestIdentity::new("src/tests/helpers.rs", name)
}

/// A harness with the default plugin and the given tests.
pub fn harness(options: HarnessOptions, defs: impl IntoIterator<Item = TestDef>) -> Harness {
    let mut config = HarnessConfig::with_defaults();
    for def in defs {
        config.add_test(def);
    }
    Harness::new(config, options)
}

/// Options with each category flag set explicitly.
pub fn options(benchmarks: bool, noexamples: bool, optional: bool) -> HarnessOptions {
    HarnessOptions {
        benchmarks,
        noexamples,
        optional,
        ..HarnessOptions::default()
    }
}

/// A test that always passes.
pub fn passing(name: &str) -> TestDef {
    TestDef::new(id(name), |_| Ok(()))
}

/// Shared log the test bodies append to, for checking what actually ran.
#[derive(Debug, Clone, Default)]
pub struct RunLog(Arc<Mutex<Vec<String>>>);

impl RunLog {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// One population of `n` neurons of the given model.
pub fn single_population(neuron_type: NeuronType, n: usize, input: f64) -> Network {
    let mut net = Network::new();
    net.add(Population::new("ens", neuron_type, n).with_input(input));
    net
}
