//! Per-case fixtures injected into test bodies.
//!
//! A fresh [`Fixtures`] value is built for every case, so nothing a test
//! does to its RNG can leak into another test.

use axon::{Network, NeuronType, ReferenceSimulator, Simulator, SimulatorHandle};
use rand_chacha::ChaCha8Rng;

use crate::error::{HarnessError, HarnessResult};
use crate::identity::TestIdentity;
use crate::param::{Param, ParamSet};
use crate::seed::{test_rng, test_seed};

/// Fixture name of the simulator under test.
pub const SIMULATOR: &str = "Simulator";
/// Fixture name of the reference simulator.
pub const REF_SIMULATOR: &str = "RefSimulator";

/// Values available to a running test case.
#[derive(Debug)]
pub struct Fixtures {
    identity: TestIdentity,
    params: ParamSet,
    simulator: Option<SimulatorHandle>,
    reference_simulator: Option<SimulatorHandle>,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Fixtures {
    pub(crate) fn new(
        identity: TestIdentity,
        params: ParamSet,
        simulator: Option<SimulatorHandle>,
        reference_simulator: Option<SimulatorHandle>,
    ) -> Self {
        let seed = test_seed(&identity);
        let rng = test_rng(&identity);
        Self {
            identity,
            params,
            simulator,
            reference_simulator,
            seed,
            rng,
        }
    }

    /// Fixtures for use outside the harness runner, e.g. from a plain
    /// `#[test]` function. Both simulator fixtures are the reference backend.
    ///
    /// ```
    /// use axon_testing::{identity, Fixtures};
    ///
    /// let fx = Fixtures::standalone(identity!(test_probe));
    /// assert_eq!(fx.simulator().unwrap().name(), "reference");
    /// ```
    #[must_use]
    pub fn standalone(identity: TestIdentity) -> Self {
        let handle = SimulatorHandle::of::<ReferenceSimulator>();
        Self::new(identity, ParamSet::default(), Some(handle), Some(handle))
    }

    /// Bind parameter values, replacing any previous bindings.
    #[must_use]
    pub fn with_params(mut self, params: ParamSet) -> Self {
        self.params = params;
        self
    }

    /// Identity of the running test.
    #[must_use]
    pub fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// The simulator under test.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureNotRegistered`] if no plugin registered one.
    pub fn simulator(&self) -> HarnessResult<SimulatorHandle> {
        self.simulator
            .ok_or(HarnessError::FixtureNotRegistered(SIMULATOR))
    }

    /// The reference simulator. Use this only for reference-specific tests.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureNotRegistered`] if no plugin registered one.
    pub fn reference_simulator(&self) -> HarnessResult<SimulatorHandle> {
        self.reference_simulator
            .ok_or(HarnessError::FixtureNotRegistered(REF_SIMULATOR))
    }

    /// Seed derived from the test identity (offset 0).
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator seeded from the test identity (offset 1).
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// All bound parameter values.
    #[must_use]
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Value bound to `param`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ParamNotDeclared`] if the test did not declare it.
    pub fn param(&self, param: Param) -> HarnessResult<NeuronType> {
        self.params
            .get(param)
            .ok_or_else(|| HarnessError::ParamNotDeclared {
                test: self.identity.name().to_owned(),
                param,
            })
    }

    /// The `nl` parameter: any neuron model.
    ///
    /// # Errors
    ///
    /// See [`Fixtures::param`].
    pub fn nl(&self) -> HarnessResult<NeuronType> {
        self.param(Param::NeuronModel)
    }

    /// The `nl_nodirect` parameter: a neuron model other than Direct.
    ///
    /// # Errors
    ///
    /// See [`Fixtures::param`].
    pub fn nl_nodirect(&self) -> HarnessResult<NeuronType> {
        self.param(Param::NonDirectNeuronModel)
    }

    /// Build the simulator under test for `network`, seeded with [`Fixtures::seed`].
    ///
    /// # Errors
    ///
    /// Fails if the fixture is missing or the backend rejects the network.
    pub fn build(&self, network: &Network) -> anyhow::Result<Box<dyn Simulator>> {
        Ok(self.simulator()?.build(network, self.seed)?)
    }
}
