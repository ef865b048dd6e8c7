//! Simulator backends.
//!
//! [`Simulator`] is the object-safe contract every backend implements.
//! [`BuildSimulator`] adds construction, and [`SimulatorHandle`] erases the
//! concrete type so test code can receive "the simulator under test" as a
//! plain value.
//!
//! # Determinism
//!
//! A backend built twice from the same [`Network`] and seed must produce
//! identical outputs step for step. The [`ReferenceSimulator`] draws all
//! per-neuron randomness from a `ChaCha8Rng` seeded once at build time.
//!
//! # Example
//!
//! ```
//! use axon::{Network, NeuronType, Population, ReferenceSimulator, SimulatorHandle};
//!
//! let mut net = Network::new();
//! net.add(Population::new("ens", NeuronType::lif_rate(), 20).with_input(0.5));
//!
//! let handle = SimulatorHandle::of::<ReferenceSimulator>();
//! let mut sim = handle.build(&net, 7).unwrap();
//! sim.run_steps(10);
//!
//! assert_eq!(sim.n_steps(), 10);
//! assert_eq!(sim.probe("ens").unwrap().len(), 20);
//! ```

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SimulatorResult;
use crate::network::Network;
use crate::neuron::{NeuronState, NeuronType};

// =============================================================================
// Simulator Traits
// =============================================================================

/// A running simulation.
pub trait Simulator: fmt::Debug {
    /// Timestep in seconds.
    fn dt(&self) -> f64;

    /// Number of steps taken so far.
    fn n_steps(&self) -> u64;

    /// Seed the simulator was built with.
    fn seed(&self) -> u64;

    /// Advance by one timestep.
    fn step(&mut self);

    /// Latest output of the population with the given label.
    fn probe(&self, label: &str) -> Option<&[f64]>;

    /// Simulated time in seconds.
    #[allow(clippy::cast_precision_loss)]
    fn time(&self) -> f64 {
        self.n_steps() as f64 * self.dt()
    }

    /// Advance by `steps` timesteps.
    fn run_steps(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Advance by (approximately) `seconds` of simulated time.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn run(&mut self, seconds: f64) {
        let steps = (seconds / self.dt()).round().max(0.0) as u64;
        self.run_steps(steps);
    }
}

/// A simulator that can be constructed from a network description.
pub trait BuildSimulator: Simulator + Sized + 'static {
    /// Backend name reported by [`SimulatorHandle::name`].
    const NAME: &'static str;

    /// Build a simulator for `network` with deterministic `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulatorError`](crate::SimulatorError) if the network is
    /// invalid for this backend.
    fn build(network: &Network, seed: u64) -> SimulatorResult<Self>;
}

type BuildFn = fn(&Network, u64) -> SimulatorResult<Box<dyn Simulator>>;

fn build_boxed<S: BuildSimulator>(network: &Network, seed: u64) -> SimulatorResult<Box<dyn Simulator>> {
    Ok(Box::new(S::build(network, seed)?))
}

/// A named, type-erased simulator constructor.
#[derive(Clone, Copy)]
pub struct SimulatorHandle {
    name: &'static str,
    build: BuildFn,
}

impl SimulatorHandle {
    /// Handle for backend `S`.
    #[must_use]
    pub fn of<S: BuildSimulator>() -> Self {
        Self {
            name: S::NAME,
            build: build_boxed::<S>,
        }
    }

    /// Backend name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Build a simulator for `network`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's build error.
    pub fn build(&self, network: &Network, seed: u64) -> SimulatorResult<Box<dyn Simulator>> {
        (self.build)(network, seed)
    }
}

impl fmt::Debug for SimulatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SimulatorHandle").field(&self.name).finish()
    }
}

impl PartialEq for SimulatorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SimulatorHandle {}

// =============================================================================
// Reference Simulator
// =============================================================================

/// Range of per-neuron gains drawn at build time.
const GAIN_RANGE: std::ops::Range<f64> = 0.5..2.0;
/// Range of per-neuron biases drawn at build time.
const BIAS_RANGE: std::ops::Range<f64> = 0.5..1.5;

#[derive(Debug, Clone)]
pub(crate) struct PopulationState {
    pub(crate) label: String,
    pub(crate) neuron_type: NeuronType,
    pub(crate) current: Vec<f64>,
    pub(crate) output: Vec<f64>,
    pub(crate) state: NeuronState,
}

/// Straightforward single-threaded backend.
///
/// Each neuron receives `gain * input + bias`, with gain and bias drawn from
/// the seeded RNG. Direct populations use unit gain and zero bias so their
/// output equals the input signal.
#[derive(Debug, Clone)]
pub struct ReferenceSimulator {
    dt: f64,
    seed: u64,
    n_steps: u64,
    pub(crate) populations: Vec<PopulationState>,
}

impl BuildSimulator for ReferenceSimulator {
    const NAME: &'static str = "reference";

    fn build(network: &Network, seed: u64) -> SimulatorResult<Self> {
        network.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let populations = network
            .populations
            .iter()
            .map(|p| {
                let current = if p.neuron_type.is_direct() {
                    vec![p.input; p.n_neurons]
                } else {
                    (0..p.n_neurons)
                        .map(|_| {
                            let gain = rng.gen_range(GAIN_RANGE);
                            let bias = rng.gen_range(BIAS_RANGE);
                            gain * p.input + bias
                        })
                        .collect()
                };
                PopulationState {
                    label: p.label.clone(),
                    neuron_type: p.neuron_type,
                    current,
                    output: vec![0.0; p.n_neurons],
                    state: NeuronState::new(p.n_neurons),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            seed,
            dt = network.dt,
            populations = populations.len(),
            "built reference simulator"
        );

        Ok(Self {
            dt: network.dt,
            seed,
            n_steps: 0,
            populations,
        })
    }
}

impl Simulator for ReferenceSimulator {
    fn dt(&self) -> f64 {
        self.dt
    }

    fn n_steps(&self) -> u64 {
        self.n_steps
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn step(&mut self) {
        for pop in &mut self.populations {
            pop.neuron_type
                .step(self.dt, &pop.current, &mut pop.output, &mut pop.state);
        }
        self.n_steps += 1;
    }

    fn probe(&self, label: &str) -> Option<&[f64]> {
        self.populations
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.output.as_slice())
    }
}

impl ReferenceSimulator {
    /// Input current of every neuron in a population.
    #[must_use]
    pub fn currents(&self, label: &str) -> Option<&[f64]> {
        self.populations
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.current.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulatorError;
    use crate::network::Population;

    fn single(neuron_type: NeuronType, n: usize, input: f64) -> Network {
        let mut net = Network::new();
        net.add(Population::new("ens", neuron_type, n).with_input(input));
        net
    }

    #[test]
    fn test_handle_name_and_eq() {
        let a = SimulatorHandle::of::<ReferenceSimulator>();
        let b = SimulatorHandle::of::<ReferenceSimulator>();
        assert_eq!(a.name(), "reference");
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "SimulatorHandle(\"reference\")");
    }

    #[test]
    fn test_build_rejects_invalid_network() {
        let err = ReferenceSimulator::build(&single(NeuronType::lif(), 0, 0.0), 0).unwrap_err();
        assert_eq!(err, SimulatorError::EmptyPopulation("ens".into()));
    }

    #[test]
    fn test_time_advances() {
        let mut sim = ReferenceSimulator::build(&single(NeuronType::lif(), 5, 0.0), 1).unwrap();
        assert_eq!(sim.time(), 0.0);
        sim.run(0.1);
        assert_eq!(sim.n_steps(), 100);
        assert!((sim.time() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_direct_output_equals_input() {
        let mut sim = ReferenceSimulator::build(&single(NeuronType::direct(), 3, 0.25), 9).unwrap();
        sim.step();
        assert_eq!(sim.probe("ens").unwrap(), &[0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_same_seed_same_currents() {
        let net = single(NeuronType::lif_rate(), 50, 0.3);
        let a = ReferenceSimulator::build(&net, 42).unwrap();
        let b = ReferenceSimulator::build(&net, 42).unwrap();
        let c = ReferenceSimulator::build(&net, 43).unwrap();
        assert_eq!(a.currents("ens"), b.currents("ens"));
        assert_ne!(a.currents("ens"), c.currents("ens"));
    }

    #[test]
    fn test_currents_within_drawn_range() {
        let sim = ReferenceSimulator::build(&single(NeuronType::lif(), 200, 0.0), 5).unwrap();
        for &j in sim.currents("ens").unwrap() {
            assert!(BIAS_RANGE.contains(&j));
        }
    }

    #[test]
    fn test_probe_unknown_label() {
        let sim = ReferenceSimulator::build(&single(NeuronType::lif(), 1, 0.0), 0).unwrap();
        assert!(sim.probe("missing").is_none());
    }
}
