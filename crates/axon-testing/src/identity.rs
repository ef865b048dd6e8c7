//! Test identity: where a test is defined and what it is called.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a test definition by source file and function name.
///
/// Seeds are derived from this value alone, so every parametrized case of
/// one definition shares the same seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestIdentity {
    file: String,
    name: String,
}

impl TestIdentity {
    /// Create an identity from a source path and test name.
    #[must_use]
    pub fn new(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
        }
    }

    /// Source file the test is defined in.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Test function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.name)
    }
}

/// Identity of a function in the calling source file.
///
/// ```
/// let id = axon_testing::identity!(test_rates);
/// assert_eq!(id.name(), "test_rates");
/// assert!(id.file().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! identity {
    ($name:ident) => {
        $crate::TestIdentity::new(file!(), stringify!($name))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = TestIdentity::new("tests/neurons.rs", "test_lif");
        assert_eq!(id.to_string(), "tests/neurons.rs::test_lif");
    }

    #[test]
    fn test_macro_uses_current_file() {
        let id = crate::identity!(test_macro_uses_current_file);
        assert_eq!(id.file(), file!());
        assert_eq!(id.name(), "test_macro_uses_current_file");
    }
}
