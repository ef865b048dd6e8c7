//! Harness configuration: the registration surface for plugins and tests.

use axon::SimulatorHandle;

use crate::case::TestDef;
use crate::plugin::{AxonPlugin, HarnessPlugin};

/// Everything a [`Harness`](crate::Harness) needs besides its options.
#[derive(Debug, Default)]
pub struct HarnessConfig {
    simulator: Option<SimulatorHandle>,
    reference_simulator: Option<SimulatorHandle>,
    tests: Vec<TestDef>,
    plugins: Vec<&'static str>,
}

impl HarnessConfig {
    /// Empty configuration: no fixtures, no tests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with [`AxonPlugin`] registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.register_plugin(&AxonPlugin);
        config
    }

    /// Let `plugin` register its fixtures and tests.
    pub fn register_plugin(&mut self, plugin: &dyn HarnessPlugin) -> &mut Self {
        tracing::debug!(plugin = plugin.name(), "registering harness plugin");
        plugin.register(self);
        self.plugins.push(plugin.name());
        self
    }

    /// Set the simulator under test.
    pub fn set_simulator(&mut self, handle: SimulatorHandle) -> &mut Self {
        self.simulator = Some(handle);
        self
    }

    /// Set the reference simulator.
    pub fn set_reference_simulator(&mut self, handle: SimulatorHandle) -> &mut Self {
        self.reference_simulator = Some(handle);
        self
    }

    /// Add a test definition.
    pub fn add_test(&mut self, def: TestDef) -> &mut Self {
        self.tests.push(def);
        self
    }

    /// The registered simulator under test.
    #[must_use]
    pub fn simulator(&self) -> Option<SimulatorHandle> {
        self.simulator
    }

    /// The registered reference simulator.
    #[must_use]
    pub fn reference_simulator(&self) -> Option<SimulatorHandle> {
        self.reference_simulator
    }

    /// Registered test definitions, in registration order.
    #[must_use]
    pub fn tests(&self) -> &[TestDef] {
        &self.tests
    }

    /// Names of registered plugins, in registration order.
    #[must_use]
    pub fn plugins(&self) -> &[&'static str] {
        &self.plugins
    }
}
