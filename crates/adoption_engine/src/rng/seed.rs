//! Deterministic seed partitioning.
//!
//! Every (scenario, path) pair draws from its own stream. The stream seed
//! is a SplitMix64 mix of the run seed, the scenario tag and the path
//! index, so results do not depend on evaluation order or thread count.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finaliser.
#[inline]
pub fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of one path's shock stream.
///
/// # Examples
///
/// ```rust
/// use adoption_engine::rng::derive_path_seed;
///
/// let a = derive_path_seed(42, 1, 0);
/// assert_eq!(a, derive_path_seed(42, 1, 0));
/// assert_ne!(a, derive_path_seed(42, 1, 1));
/// assert_ne!(a, derive_path_seed(42, 2, 0));
/// ```
#[inline]
pub fn derive_path_seed(base_seed: u64, scenario_tag: u64, path_index: usize) -> u64 {
    let scenario_seed = splitmix64(splitmix64(base_seed) ^ scenario_tag);
    splitmix64(scenario_seed ^ path_index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_splitmix_reference_value() {
        // First output of SplitMix64 seeded with 0
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
    }

    #[test]
    fn test_path_seeds_distinct() {
        let seeds: HashSet<u64> = (0..10_000).map(|i| derive_path_seed(42, 1, i)).collect();
        assert_eq!(seeds.len(), 10_000);
    }

    #[test]
    fn test_scenario_tags_partition_streams() {
        let a: HashSet<u64> = (0..1_000).map(|i| derive_path_seed(7, 1, i)).collect();
        let b: HashSet<u64> = (0..1_000).map(|i| derive_path_seed(7, 2, i)).collect();
        assert!(a.is_disjoint(&b));
    }
}
