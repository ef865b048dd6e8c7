//! # Axon
//!
//! Neuron models and a seeded reference simulator.
//!
//! Axon provides the pieces a simulator test suite needs to talk about:
//!
//! - **Neuron models**: the closed set [`NeuronType::ALL`] (LIF, LIFRate, Direct)
//! - **Networks**: populations of neurons driven by constant input
//! - **Simulators**: the [`Simulator`] contract, a type-erased
//!   [`SimulatorHandle`], and the [`ReferenceSimulator`] backend
//! - **Hashing**: [`hash_simulator`] for determinism checks
//!
//! ## Quick Start
//!
//! ```
//! use axon::{Network, NeuronType, Population, ReferenceSimulator, BuildSimulator, Simulator};
//!
//! let mut net = Network::new();
//! net.add(Population::new("ens", NeuronType::lif(), 10).with_input(1.0));
//!
//! let mut sim = ReferenceSimulator::build(&net, 42).unwrap();
//! sim.run(0.5);
//! assert_eq!(sim.n_steps(), 500);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod hash;
pub mod network;
pub mod neuron;
pub mod simulator;

// Re-exports for convenience
pub use error::{SimulatorError, SimulatorResult};
pub use hash::hash_simulator;
pub use network::{Network, Population, DEFAULT_DT};
pub use neuron::{LifParams, NeuronState, NeuronType};
pub use simulator::{BuildSimulator, ReferenceSimulator, Simulator, SimulatorHandle};
