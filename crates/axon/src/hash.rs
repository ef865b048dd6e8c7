//! State hashing for determinism verification.
//!
//! Two reference simulators built from the same network and seed, stepped the
//! same number of times, must produce identical state hashes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::simulator::{PopulationState, ReferenceSimulator, Simulator};

/// Compute a deterministic hash of simulator state.
///
/// This hash includes:
/// - Step count, timestep and seed
/// - Every population's currents, outputs and neuron state
#[must_use]
pub fn hash_simulator(sim: &ReferenceSimulator) -> u64 {
    let mut hasher = DefaultHasher::new();

    sim.n_steps().hash(&mut hasher);
    sim.dt().to_bits().hash(&mut hasher);
    sim.seed().hash(&mut hasher);

    for pop in &sim.populations {
        hash_population(pop, &mut hasher);
    }

    hasher.finish()
}

fn hash_population<H: Hasher>(pop: &PopulationState, hasher: &mut H) {
    pop.label.hash(hasher);
    pop.neuron_type.name().hash(hasher);
    hash_floats(&pop.current, hasher);
    hash_floats(&pop.output, hasher);
    hash_floats(&pop.state.voltage, hasher);
    hash_floats(&pop.state.refractory_time, hasher);
}

/// Hash floats as bits to avoid float comparison issues.
fn hash_floats<H: Hasher>(values: &[f64], hasher: &mut H) {
    values.len().hash(hasher);
    for value in values {
        value.to_bits().hash(hasher);
    }
}
