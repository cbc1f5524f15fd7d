//! Property-based tests for challenge offset derivation.
//!
//! Tests the following invariants:
//! - CHL-1: derivation is deterministic
//! - CHL-2: every offset lies in [0, total_leaves)
//! - CHL-3: any input change reshuffles the draw
//! - CHL-4: challenge i is independent of K

use crate::strategies::*;
use pdp_core::generate_offsets;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// CHL-1: identical inputs always yield identical offsets.
    #[test]
    fn prop_offsets_deterministic(
        seed in bytes32_strategy(),
        data_set_id in any::<u64>(),
        period_index in any::<u64>(),
        k in 1u32..32,
        total_leaves in 1u64..1_000_000,
    ) {
        let a = generate_offsets(&seed, data_set_id, period_index, k, total_leaves);
        let b = generate_offsets(&seed, data_set_id, period_index, k, total_leaves);
        prop_assert_eq!(a, b, "offset derivation must be deterministic");
    }

    /// CHL-2: offsets never escape the live address space.
    #[test]
    fn prop_offsets_in_range(
        seed in bytes32_strategy(),
        data_set_id in any::<u64>(),
        period_index in any::<u64>(),
        k in 1u32..32,
        total_leaves in 1u64..1_000_000,
    ) {
        let offsets = generate_offsets(&seed, data_set_id, period_index, k, total_leaves);
        prop_assert_eq!(offsets.len(), k as usize);
        for &o in &offsets {
            prop_assert!(o < total_leaves, "offset {} >= {}", o, total_leaves);
        }
    }

    /// CHL-3a: a different seed reshuffles the draw. The address
    /// space is kept large so a full collision is vanishingly rare.
    #[test]
    fn prop_seed_changes_offsets(
        seed1 in bytes32_strategy(),
        seed2 in bytes32_strategy(),
        data_set_id in any::<u64>(),
        period_index in any::<u64>(),
    ) {
        prop_assume!(seed1 != seed2);
        let a = generate_offsets(&seed1, data_set_id, period_index, 8, 1 << 48);
        let b = generate_offsets(&seed2, data_set_id, period_index, 8, 1 << 48);
        prop_assert_ne!(a, b, "different seeds must draw different offsets");
    }

    /// CHL-3b: a different period reshuffles the draw.
    #[test]
    fn prop_period_changes_offsets(
        seed in bytes32_strategy(),
        data_set_id in any::<u64>(),
        period1 in any::<u64>(),
        period2 in any::<u64>(),
    ) {
        prop_assume!(period1 != period2);
        let a = generate_offsets(&seed, data_set_id, period1, 8, 1 << 48);
        let b = generate_offsets(&seed, data_set_id, period2, 8, 1 << 48);
        prop_assert_ne!(a, b, "different periods must draw different offsets");
    }

    /// CHL-3c: a different data set reshuffles the draw.
    #[test]
    fn prop_data_set_changes_offsets(
        seed in bytes32_strategy(),
        id1 in any::<u64>(),
        id2 in any::<u64>(),
        period_index in any::<u64>(),
    ) {
        prop_assume!(id1 != id2);
        let a = generate_offsets(&seed, id1, period_index, 8, 1 << 48);
        let b = generate_offsets(&seed, id2, period_index, 8, 1 << 48);
        prop_assert_ne!(a, b, "different data sets must draw different offsets");
    }

    /// CHL-4: growing K extends the sequence without reshuffling the
    /// earlier draws.
    #[test]
    fn prop_prefix_stable_in_k(
        seed in bytes32_strategy(),
        data_set_id in any::<u64>(),
        period_index in any::<u64>(),
        k1 in 1u32..16,
        extra in 1u32..16,
        total_leaves in 1u64..1_000_000,
    ) {
        let short = generate_offsets(&seed, data_set_id, period_index, k1, total_leaves);
        let long = generate_offsets(&seed, data_set_id, period_index, k1 + extra, total_leaves);
        prop_assert_eq!(&short[..], &long[..k1 as usize]);
    }
}

/// Degenerate inputs yield no challenges.
#[test]
fn test_degenerate_inputs() {
    let seed = [0u8; 32];
    assert!(generate_offsets(&seed, 0, 0, 0, 100).is_empty());
    assert!(generate_offsets(&seed, 0, 0, 5, 0).is_empty());
}

/// A single-leaf data set is always challenged at offset zero.
#[test]
fn test_single_leaf_always_offset_zero() {
    for i in 0..64u64 {
        let mut seed = [0u8; 32];
        seed[..8].copy_from_slice(&i.to_le_bytes());
        assert_eq!(generate_offsets(&seed, i, i, 3, 1), vec![0, 0, 0]);
    }
}
