//! Neuron models.
//!
//! A [`NeuronType`] maps input current to output activity. The set of models
//! is closed:
//!
//! - **LIF**: spiking leaky integrate-and-fire. Output is `1/dt` on a spike
//!   step and zero otherwise.
//! - **LIFRate**: the steady-state firing rate of the same LIF neuron.
//! - **Direct**: passes the input current through unchanged.
//!
//! # Model Dynamics
//!
//! ```text
//! LIF voltage update over the non-refractory part of a step:
//!     V(t+dt) = V(t) + (J - V(t)) * (1 - exp(-dt' / tau_rc))
//!
//! Spike when V > 1; the spike time inside the step is interpolated and
//! the remaining refractory period carries over into the next step.
//!
//! LIFRate:
//!     r(J) = 1 / (tau_ref + tau_rc * ln(1 + 1 / (J - 1)))   for J > 1
//!     r(J) = 0                                              otherwise
//! ```
//!
//! # Example
//!
//! ```
//! use axon::NeuronType;
//!
//! let lif = NeuronType::lif();
//! assert_eq!(lif.name(), "LIF");
//! assert_eq!(lif.rate(0.5), 0.0);
//! assert!(lif.rate(2.0) > 60.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimulatorError, SimulatorResult};

/// Time constants shared by the LIF and LIFRate models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifParams {
    /// Membrane RC time constant in seconds.
    pub tau_rc: f64,
    /// Absolute refractory period in seconds.
    pub tau_ref: f64,
}

impl LifParams {
    /// Default time constants (`tau_rc = 20ms`, `tau_ref = 2ms`).
    pub const DEFAULT: Self = Self {
        tau_rc: 0.02,
        tau_ref: 0.002,
    };

    /// Create parameters with custom time constants.
    #[must_use]
    pub const fn new(tau_rc: f64, tau_ref: f64) -> Self {
        Self { tau_rc, tau_ref }
    }

    /// Check that both time constants are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidParameters`] if `tau_rc` is not
    /// positive or `tau_ref` is negative.
    pub fn validate(&self) -> SimulatorResult<()> {
        if !(self.tau_rc > 0.0 && self.tau_rc.is_finite()) {
            return Err(SimulatorError::InvalidParameters(
                "LIF: tau_rc must be positive",
            ));
        }
        if !(self.tau_ref >= 0.0 && self.tau_ref.is_finite()) {
            return Err(SimulatorError::InvalidParameters(
                "LIF: tau_ref must be non-negative",
            ));
        }
        Ok(())
    }

    fn rate(&self, current: f64) -> f64 {
        if current > 1.0 {
            1.0 / (self.tau_ref + self.tau_rc * (1.0 / (current - 1.0)).ln_1p())
        } else {
            0.0
        }
    }
}

impl Default for LifParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A neuron model variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NeuronType {
    /// Spiking leaky integrate-and-fire.
    Lif(LifParams),
    /// Rate-based leaky integrate-and-fire.
    LifRate(LifParams),
    /// Identity: output equals input current.
    Direct,
}

impl NeuronType {
    /// Every neuron model, in canonical order.
    pub const ALL: [Self; 3] = [
        Self::Lif(LifParams::DEFAULT),
        Self::LifRate(LifParams::DEFAULT),
        Self::Direct,
    ];

    /// The neuron models that have real dynamics (everything but `Direct`).
    pub const NON_DIRECT: [Self; 2] = [
        Self::Lif(LifParams::DEFAULT),
        Self::LifRate(LifParams::DEFAULT),
    ];

    /// Spiking LIF with default parameters.
    #[must_use]
    pub const fn lif() -> Self {
        Self::Lif(LifParams::DEFAULT)
    }

    /// Rate LIF with default parameters.
    #[must_use]
    pub const fn lif_rate() -> Self {
        Self::LifRate(LifParams::DEFAULT)
    }

    /// The direct (no-op) model.
    #[must_use]
    pub const fn direct() -> Self {
        Self::Direct
    }

    /// Short display name, also used in parametrized test ids.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lif(_) => "LIF",
            Self::LifRate(_) => "LIFRate",
            Self::Direct => "Direct",
        }
    }

    /// Returns true for the direct model.
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        matches!(self, Self::Direct)
    }

    /// Returns true if the model emits discrete spikes.
    #[must_use]
    pub const fn is_spiking(&self) -> bool {
        matches!(self, Self::Lif(_))
    }

    /// Validate the model parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidParameters`] for bad LIF constants.
    pub fn validate(&self) -> SimulatorResult<()> {
        match self {
            Self::Lif(params) | Self::LifRate(params) => params.validate(),
            Self::Direct => Ok(()),
        }
    }

    /// Steady-state output for a constant input current.
    ///
    /// For LIF and LIFRate this is the firing rate in Hz. For Direct it is
    /// the current itself.
    #[must_use]
    pub fn rate(&self, current: f64) -> f64 {
        match self {
            Self::Lif(params) | Self::LifRate(params) => params.rate(current),
            Self::Direct => current,
        }
    }

    /// Advance `state` by one step of length `dt`, writing outputs.
    ///
    /// `current`, `output` and the vectors inside `state` must all have the
    /// same length.
    pub fn step(&self, dt: f64, current: &[f64], output: &mut [f64], state: &mut NeuronState) {
        debug_assert_eq!(current.len(), output.len());
        debug_assert_eq!(current.len(), state.len());

        match self {
            Self::Lif(params) => step_lif(params, dt, current, output, state),
            Self::LifRate(params) => {
                for (out, &j) in output.iter_mut().zip(current) {
                    *out = params.rate(j);
                }
            }
            Self::Direct => output.copy_from_slice(current),
        }
    }
}

impl fmt::Display for NeuronType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn step_lif(params: &LifParams, dt: f64, current: &[f64], output: &mut [f64], state: &mut NeuronState) {
    let NeuronState {
        voltage,
        refractory_time,
    } = state;

    for i in 0..current.len() {
        let j = current[i];
        refractory_time[i] -= dt;
        let delta_t = (dt - refractory_time[i]).clamp(0.0, dt);
        let mut v = voltage[i] - (j - voltage[i]) * (-delta_t / params.tau_rc).exp_m1();

        if v > 1.0 {
            // v only crosses threshold when j > 1, so the log argument stays in (-1, 0]
            let t_spike = dt + params.tau_rc * (-(v - 1.0) / (j - 1.0)).ln_1p();
            output[i] = 1.0 / dt;
            refractory_time[i] = params.tau_ref + t_spike;
            v = 0.0;
        } else {
            output[i] = 0.0;
        }

        voltage[i] = v.max(0.0);
    }
}

/// Per-neuron dynamic state. Only LIF makes use of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeuronState {
    /// Membrane voltage (normalized, threshold at 1).
    pub voltage: Vec<f64>,
    /// Remaining refractory time in seconds.
    pub refractory_time: Vec<f64>,
}

impl NeuronState {
    /// Resting state for `n` neurons.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            voltage: vec![0.0; n],
            refractory_time: vec![0.0; n],
        }
    }

    /// Number of neurons tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    /// Returns true if no neurons are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}
