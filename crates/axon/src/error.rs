//! Errors raised while building or stepping a simulator.

use thiserror::Error;

/// An error produced by a [`Simulator`](crate::Simulator) backend.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimulatorError {
    /// The network timestep is not a positive finite number.
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    /// A population was declared with zero neurons.
    #[error("population `{0}` has no neurons")]
    EmptyPopulation(String),

    /// Two populations share the same label.
    #[error("duplicate population label `{0}`")]
    DuplicateLabel(String),

    /// Neuron model parameters are out of range.
    #[error("invalid neuron parameters: {0}")]
    InvalidParameters(&'static str),
}

/// Result type for simulator operations.
pub type SimulatorResult<T> = std::result::Result<T, SimulatorError>;
