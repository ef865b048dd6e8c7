//! Network description consumed by simulator backends.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{SimulatorError, SimulatorResult};
use crate::neuron::NeuronType;

/// Default simulator timestep in seconds.
pub const DEFAULT_DT: f64 = 0.001;

/// A group of identical neurons driven by a constant input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Unique label used to probe the population's output.
    pub label: String,
    /// Neuron model shared by every neuron in the population.
    pub neuron_type: NeuronType,
    /// Number of neurons.
    pub n_neurons: usize,
    /// Constant input signal fed to every neuron.
    pub input: f64,
}

impl Population {
    /// Create a population.
    #[must_use]
    pub fn new(label: impl Into<String>, neuron_type: NeuronType, n_neurons: usize) -> Self {
        Self {
            label: label.into(),
            neuron_type,
            n_neurons,
            input: 0.0,
        }
    }

    /// Set the constant input signal.
    #[must_use]
    pub fn with_input(mut self, input: f64) -> Self {
        self.input = input;
        self
    }
}

/// A set of populations simulated with a fixed timestep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Timestep in seconds.
    pub dt: f64,
    /// Populations, in insertion order.
    pub populations: Vec<Population>,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            populations: Vec::new(),
        }
    }
}

impl Network {
    /// Create an empty network with the default timestep.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network with a custom timestep.
    #[must_use]
    pub fn with_dt(dt: f64) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    /// Add a population.
    pub fn add(&mut self, population: Population) -> &mut Self {
        self.populations.push(population);
        self
    }

    /// Look up a population by label.
    #[must_use]
    pub fn population(&self, label: &str) -> Option<&Population> {
        self.populations.iter().find(|p| p.label == label)
    }

    /// Check the network can be simulated.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulatorError`] for a bad timestep, an empty population,
    /// a duplicate label, or invalid neuron parameters.
    pub fn validate(&self) -> SimulatorResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SimulatorError::InvalidTimestep(self.dt));
        }

        let mut labels = HashSet::new();
        for population in &self.populations {
            if population.n_neurons == 0 {
                return Err(SimulatorError::EmptyPopulation(population.label.clone()));
            }
            if !labels.insert(population.label.as_str()) {
                return Err(SimulatorError::DuplicateLabel(population.label.clone()));
            }
            population.neuron_type.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::LifParams;

    #[test]
    fn test_validate_ok() {
        let mut net = Network::new();
        net.add(Population::new("a", NeuronType::lif(), 10))
            .add(Population::new("b", NeuronType::direct(), 1));
        assert!(net.validate().is_ok());
        assert_eq!(net.population("b").map(|p| p.n_neurons), Some(1));
        assert!(net.population("c").is_none());
    }

    #[test]
    fn test_validate_timestep() {
        assert_eq!(
            Network::with_dt(0.0).validate(),
            Err(SimulatorError::InvalidTimestep(0.0))
        );
        assert!(Network::with_dt(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_empty_and_duplicate() {
        let mut net = Network::new();
        net.add(Population::new("a", NeuronType::lif(), 0));
        assert_eq!(
            net.validate(),
            Err(SimulatorError::EmptyPopulation("a".into()))
        );

        let mut net = Network::new();
        net.add(Population::new("a", NeuronType::lif(), 1))
            .add(Population::new("a", NeuronType::lif_rate(), 1));
        assert_eq!(
            net.validate(),
            Err(SimulatorError::DuplicateLabel("a".into()))
        );
    }

    #[test]
    fn test_validate_neuron_params() {
        let mut net = Network::new();
        net.add(Population::new(
            "bad",
            NeuronType::Lif(LifParams::new(-1.0, 0.0)),
            1,
        ));
        assert!(matches!(
            net.validate(),
            Err(SimulatorError::InvalidParameters(_))
        ));
    }
}
