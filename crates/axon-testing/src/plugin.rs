//! Explicit plugin registration.
//!
//! Fixtures and tests are never discovered by naming convention. A
//! [`HarnessPlugin`] registers what it provides against a
//! [`HarnessConfig`](crate::HarnessConfig), in the order plugins are added.
//!
//! # Example
//!
//! ```
//! use axon_testing::{AxonPlugin, HarnessConfig, HarnessPlugin};
//!
//! struct Defaults;
//!
//! impl HarnessPlugin for Defaults {
//!     fn name(&self) -> &'static str {
//!         "defaults"
//!     }
//!
//!     fn register(&self, config: &mut HarnessConfig) {
//!         AxonPlugin.register(config);
//!     }
//! }
//!
//! let mut config = HarnessConfig::new();
//! config.register_plugin(&Defaults);
//! assert_eq!(config.plugins(), ["defaults"]);
//! assert!(config.simulator().is_some());
//! ```

use axon::{ReferenceSimulator, SimulatorHandle};

use crate::config::HarnessConfig;

/// Something that contributes fixtures or tests to a harness.
pub trait HarnessPlugin {
    /// Name recorded in [`HarnessConfig::plugins`].
    fn name(&self) -> &'static str;

    /// Register fixtures and tests.
    fn register(&self, config: &mut HarnessConfig);
}

/// Registers the reference simulator as both the simulator under test and
/// the reference simulator.
///
/// Backends that want to run the shared suite register this plugin first and
/// then override the simulator under test with
/// [`HarnessConfig::set_simulator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AxonPlugin;

impl HarnessPlugin for AxonPlugin {
    fn name(&self) -> &'static str {
        "axon"
    }

    fn register(&self, config: &mut HarnessConfig) {
        let reference = SimulatorHandle::of::<ReferenceSimulator>();
        config
            .set_simulator(reference)
            .set_reference_simulator(reference);
    }
}
