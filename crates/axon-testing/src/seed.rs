//! Seed derivation from test identity.
//!
//! Seeds are pure functions of a [`TestIdentity`] and a small offset, so the
//! same test gets the same randomness on every run and every machine, and no
//! generator state is shared between tests.
//!
//! ```text
//! function_seed(id, offset) = (xxh64(file || 0x00 || name) + offset) mod MAX_SEED
//! ```
//!
//! Offset 0 feeds the `seed` fixture (typically passed to a simulator) and
//! offset 1 seeds the `rng` fixture, so the two always differ.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use xxhash_rust::xxh64::xxh64;

use crate::identity::TestIdentity;

/// Exclusive upper bound of derived seeds (`2^31 - 1`).
pub const MAX_SEED: u64 = 2_147_483_647;

/// Offset used for the `seed` fixture.
pub const SEED_OFFSET: u64 = 0;

/// Offset used for the `rng` fixture.
pub const RNG_OFFSET: u64 = 1;

/// Derive a seed in `[0, MAX_SEED)` from a test identity.
///
/// # Example
///
/// ```
/// use axon_testing::{function_seed, TestIdentity, MAX_SEED};
///
/// let id = TestIdentity::new("tests/ensemble.rs", "test_encoders");
/// let seed = function_seed(&id, 0);
/// assert_eq!(seed, function_seed(&id, 0));
/// assert!(seed < MAX_SEED);
/// ```
#[must_use]
pub fn function_seed(identity: &TestIdentity, offset: u64) -> u64 {
    identity_hash(identity).wrapping_add(offset) % MAX_SEED
}

/// The `seed` fixture value for a test.
#[must_use]
pub fn test_seed(identity: &TestIdentity) -> u64 {
    function_seed(identity, SEED_OFFSET)
}

/// The `rng` fixture for a test: a fresh generator seeded from its identity.
#[must_use]
pub fn test_rng(identity: &TestIdentity) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(function_seed(identity, RNG_OFFSET))
}

fn identity_hash(identity: &TestIdentity) -> u64 {
    let file = identity.file().as_bytes();
    let name = identity.name().as_bytes();

    let mut buf = Vec::with_capacity(file.len() + 1 + name.len());
    buf.extend_from_slice(file);
    buf.push(0);
    buf.extend_from_slice(name);
    xxh64(&buf, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::Rng;

    fn id(name: &str) -> TestIdentity {
        TestIdentity::new("tests/test_seed.rs", name)
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(test_seed(&id("a")), test_seed(&id("a")));
        assert_eq!(function_seed(&id("a"), 5), function_seed(&id("a"), 5));
    }

    #[test]
    fn test_seed_differs_from_rng_seed() {
        for name in ["a", "b", "test_lif", "test_direct_mode"] {
            assert_ne!(function_seed(&id(name), SEED_OFFSET), function_seed(&id(name), RNG_OFFSET));
        }
    }

    #[test]
    fn test_seed_depends_on_file_and_name() {
        let a = TestIdentity::new("tests/a.rs", "test_x");
        let b = TestIdentity::new("tests/b.rs", "test_x");
        let c = TestIdentity::new("tests/a.rs", "test_y");
        assert_ne!(test_seed(&a), test_seed(&b));
        assert_ne!(test_seed(&a), test_seed(&c));
    }

    #[test]
    fn test_separator_prevents_concatenation_collisions() {
        let a = TestIdentity::new("ab", "c");
        let b = TestIdentity::new("a", "bc");
        assert_ne!(test_seed(&a), test_seed(&b));
    }

    #[test]
    fn test_rng_streams_are_reproducible() {
        let mut r1 = test_rng(&id("stream"));
        let mut r2 = test_rng(&id("stream"));
        let a: Vec<u32> = (0..8).map(|_| r1.gen()).collect();
        let b: Vec<u32> = (0..8).map(|_| r2.gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rng_streams_are_independent_per_test() {
        let mut r1 = test_rng(&id("first"));
        let mut r2 = test_rng(&id("second"));
        let a: Vec<u64> = (0..4).map(|_| r1.gen()).collect();
        let b: Vec<u64> = (0..4).map(|_| r2.gen()).collect();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_seed_bounded_and_stable(file in ".*", name in ".*", offset in any::<u64>()) {
            let identity = TestIdentity::new(file, name);
            let seed = function_seed(&identity, offset);
            prop_assert!(seed < MAX_SEED);
            prop_assert_eq!(seed, function_seed(&identity, offset));
        }

        #[test]
        fn prop_offsets_zero_and_one_differ(file in "[a-z/]{1,24}\\.rs", name in "test_[a-z_]{1,24}") {
            let identity = TestIdentity::new(file, name);
            prop_assert_ne!(test_seed(&identity), function_seed(&identity, RNG_OFFSET));
        }
    }
}
