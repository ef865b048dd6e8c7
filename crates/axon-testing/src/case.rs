//! Test definitions and the concrete cases they expand into.

use std::fmt;
use std::sync::Arc;

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::Fixtures;
use crate::identity::TestIdentity;
use crate::marker::{Marker, Markers};
use crate::param::{parametrize, Param, ParamSet};

/// Shared test body.
pub type TestFn = Arc<dyn Fn(&mut Fixtures) -> anyhow::Result<()> + Send + Sync>;

/// A logical test: one body, its markers and the parameters it declares.
///
/// # Example
///
/// ```
/// use axon_testing::{Marker, Param, TestDef, TestIdentity};
///
/// let def = TestDef::new(TestIdentity::new("tests/rates.rs", "test_rates"), |fx| {
///     let _model = fx.nl()?;
///     Ok(())
/// })
/// .param(Param::NeuronModel)
/// .mark(Marker::Benchmark);
///
/// let cases = def.expand().unwrap();
/// assert_eq!(cases.len(), 3);
/// assert_eq!(cases[0].id(), "test_rates[LIF]");
/// ```
#[derive(Clone)]
pub struct TestDef {
    identity: TestIdentity,
    markers: Markers,
    params: Vec<Param>,
    body: TestFn,
}

impl TestDef {
    /// Define a test with no markers and no parameters.
    pub fn new<F>(identity: TestIdentity, body: F) -> Self
    where
        F: Fn(&mut Fixtures) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            identity,
            markers: Markers::empty(),
            params: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// Attach a category marker.
    #[must_use]
    pub fn mark(mut self, marker: Marker) -> Self {
        self.markers |= marker.flag();
        self
    }

    /// Declare a parameter to fan out over.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Identity of the definition.
    #[must_use]
    pub fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// Attached markers.
    #[must_use]
    pub fn markers(&self) -> Markers {
        self.markers
    }

    /// Declared parameters, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Expand into one [`TestCase`] per parameter combination.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateParam`] if a parameter is declared twice.
    pub fn expand(&self) -> HarnessResult<Vec<TestCase>> {
        for (i, param) in self.params.iter().enumerate() {
            if self.params[..i].contains(param) {
                return Err(HarnessError::DuplicateParam {
                    test: self.identity.name().to_owned(),
                    param: *param,
                });
            }
        }

        Ok(parametrize(&self.params)
            .into_iter()
            .map(|params| TestCase {
                id: format!("{}{}", self.identity.name(), params.id_suffix()),
                identity: self.identity.clone(),
                markers: self.markers,
                params,
                body: Arc::clone(&self.body),
            })
            .collect())
    }
}

impl fmt::Debug for TestDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDef")
            .field("identity", &self.identity)
            .field("markers", &self.markers)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// One concrete, independently reported invocation of a [`TestDef`].
#[derive(Clone)]
pub struct TestCase {
    id: String,
    identity: TestIdentity,
    markers: Markers,
    params: ParamSet,
    body: TestFn,
}

impl TestCase {
    /// Case id: the test name plus a parameter suffix such as `[LIF]`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identity of the originating definition.
    #[must_use]
    pub fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// Markers inherited from the definition.
    #[must_use]
    pub fn markers(&self) -> Markers {
        self.markers
    }

    /// Parameter values bound for this case.
    #[must_use]
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub(crate) fn body(&self) -> &TestFn {
        &self.body
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("markers", &self.markers)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Build a [`TestDef`] from a test function in the calling file.
///
/// ```
/// use axon_testing::{test_def, Fixtures};
///
/// fn test_seeded(fx: &mut Fixtures) -> anyhow::Result<()> {
///     anyhow::ensure!(fx.seed() < axon_testing::MAX_SEED);
///     Ok(())
/// }
///
/// let def = test_def!(test_seeded);
/// assert_eq!(def.identity().name(), "test_seeded");
/// ```
#[macro_export]
macro_rules! test_def {
    ($name:ident) => {
        $crate::TestDef::new($crate::identity!($name), $name)
    };
}
