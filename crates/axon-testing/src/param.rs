//! Neuron-model parametrization.
//!
//! A test that declares [`Param::NeuronModel`] (`nl`) runs once per neuron
//! model; one that declares [`Param::NonDirectNeuronModel`] (`nl_nodirect`)
//! runs once per model that has real dynamics. Declaring both runs the
//! cartesian product.

use std::fmt;

use axon::NeuronType;
use serde::{Deserialize, Serialize};

/// A parameter a test can declare to be fanned out over neuron models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Param {
    /// `nl`: every neuron model (LIF, LIFRate, Direct).
    NeuronModel,
    /// `nl_nodirect`: every neuron model except Direct (LIF, LIFRate).
    NonDirectNeuronModel,
}

impl Param {
    /// Every parameter the harness knows how to fan out.
    pub const ALL: [Self; 2] = [Self::NeuronModel, Self::NonDirectNeuronModel];

    /// Parameter name as written in test declarations.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NeuronModel => "nl",
            Self::NonDirectNeuronModel => "nl_nodirect",
        }
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The neuron models this parameter takes, in case order.
    #[must_use]
    pub fn values(self) -> &'static [NeuronType] {
        match self {
            Self::NeuronModel => &NeuronType::ALL,
            Self::NonDirectNeuronModel => &NeuronType::NON_DIRECT,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete parameter values bound for one test case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    bindings: Vec<(Param, NeuronType)>,
}

impl ParamSet {
    /// Value bound to `param`, if the test declared it.
    #[must_use]
    pub fn get(&self, param: Param) -> Option<NeuronType> {
        self.bindings
            .iter()
            .find(|(p, _)| *p == param)
            .map(|&(_, value)| value)
    }

    /// Returns true if no parameters are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &(Param, NeuronType)> {
        self.bindings.iter()
    }

    /// Case id suffix, e.g. `[LIF]` or `[LIF-LIFRate]`. Empty when unbound.
    #[must_use]
    pub fn id_suffix(&self) -> String {
        if self.bindings.is_empty() {
            return String::new();
        }
        let names: Vec<_> = self.bindings.iter().map(|(_, n)| n.name()).collect();
        format!("[{}]", names.join("-"))
    }
}

/// Expand declared parameters into one [`ParamSet`] per case.
///
/// The first declared parameter varies slowest. No parameters yields a
/// single empty set.
///
/// # Example
///
/// ```
/// use axon_testing::{parametrize, Param};
///
/// assert_eq!(parametrize(&[]).len(), 1);
/// assert_eq!(parametrize(&[Param::NeuronModel]).len(), 3);
/// assert_eq!(parametrize(&[Param::NonDirectNeuronModel]).len(), 2);
/// assert_eq!(parametrize(&[Param::NeuronModel, Param::NonDirectNeuronModel]).len(), 6);
/// ```
#[must_use]
pub fn parametrize(params: &[Param]) -> Vec<ParamSet> {
    params.iter().fold(vec![ParamSet::default()], |sets, &param| {
        sets.iter()
            .flat_map(|set| {
                param.values().iter().map(move |&value| {
                    let mut next = set.clone();
                    next.bindings.push((param, value));
                    next
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for param in Param::ALL {
            assert_eq!(Param::from_name(param.name()), Some(param));
        }
        assert_eq!(Param::from_name("neuron"), None);
    }

    #[test]
    fn test_any_model_expands_to_three() {
        let sets = parametrize(&[Param::NeuronModel]);
        let ids: Vec<_> = sets.iter().map(ParamSet::id_suffix).collect();
        assert_eq!(ids, ["[LIF]", "[LIFRate]", "[Direct]"]);
    }

    #[test]
    fn test_non_direct_excludes_direct() {
        let sets = parametrize(&[Param::NonDirectNeuronModel]);
        assert_eq!(sets.len(), 2);
        assert!(sets
            .iter()
            .all(|s| !s.get(Param::NonDirectNeuronModel).unwrap().is_direct()));
    }

    #[test]
    fn test_product_order() {
        let sets = parametrize(&[Param::NeuronModel, Param::NonDirectNeuronModel]);
        let ids: Vec<_> = sets.iter().map(ParamSet::id_suffix).collect();
        assert_eq!(
            ids,
            [
                "[LIF-LIF]",
                "[LIF-LIFRate]",
                "[LIFRate-LIF]",
                "[LIFRate-LIFRate]",
                "[Direct-LIF]",
                "[Direct-LIFRate]",
            ]
        );
        assert_eq!(sets[5].get(Param::NeuronModel), Some(NeuronType::Direct));
    }

    #[test]
    fn test_unparametrized() {
        let sets = parametrize(&[]);
        assert_eq!(sets.len(), 1);
        assert!(sets[0].is_empty());
        assert_eq!(sets[0].id_suffix(), "");
        assert_eq!(sets[0].get(Param::NeuronModel), None);
    }
}
