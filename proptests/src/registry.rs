//! Property-based tests for registry batch atomicity and access
//! control.
//!
//! Tests the following invariants:
//! - REG-1: a batch with any invalid entry leaves no trace
//! - REG-2: totals always equal the sum of live piece sizes
//! - REG-3: a non-provider identity can never mutate state

use std::sync::Arc;

use crate::strategies::*;
use pdp_registry::{DataSetParams, DataSetRegistry, NoopListener, SeededBeacon};
use proptest::prelude::*;

fn registry() -> DataSetRegistry {
    DataSetRegistry::new(Arc::new(SeededBeacon::new([9u8; 32])))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// REG-1: poisoning one entry of an add batch (unaligned size)
    /// rolls back the whole batch.
    #[test]
    fn prop_add_batch_atomic(
        provider in bytes32_strategy(),
        sizes in proptest::collection::vec(1u64..64, 1..10),
        poison_at in any::<usize>(),
        commitment in bytes32_strategy(),
    ) {
        let reg = registry();
        let id = reg
            .create_data_set(provider, Arc::new(NoopListener), DataSetParams::default(), 0)
            .expect("create");

        let mut batch: Vec<([u8; 32], u64)> =
            sizes.iter().map(|&leaves| (commitment, leaves * 32)).collect();
        let poison_idx = poison_at % batch.len();
        batch[poison_idx].1 += 1; // no longer leaf-aligned

        prop_assert!(reg.add_pieces(provider, id, &batch).is_err());
        prop_assert_eq!(reg.total_leaves(id).expect("exists"), 0);
        prop_assert_eq!(reg.status(id, 0).expect("exists").next_piece_id, 0);
    }

    /// REG-2: after adds and deletes, the registry total equals the
    /// sum over surviving pieces.
    #[test]
    fn prop_total_tracks_live_pieces(
        provider in bytes32_strategy(),
        sizes in proptest::collection::vec(1u64..64, 1..12),
        delete_selector in any::<u64>(),
        commitment in bytes32_strategy(),
    ) {
        let reg = registry();
        let id = reg
            .create_data_set(provider, Arc::new(NoopListener), DataSetParams::default(), 0)
            .expect("create");

        let batch: Vec<([u8; 32], u64)> =
            sizes.iter().map(|&leaves| (commitment, leaves * 32)).collect();
        let ids = reg.add_pieces(provider, id, &batch).expect("add");

        let victim = ids[(delete_selector % ids.len() as u64) as usize];
        reg.delete_pieces(provider, id, &[victim]).expect("delete");

        let expected: u64 = sizes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i as u64 != victim)
            .map(|(_, &leaves)| leaves)
            .sum();
        prop_assert_eq!(reg.total_leaves(id).expect("exists"), expected);
    }

    /// REG-3: a stranger's mutations are rejected and change nothing.
    #[test]
    fn prop_stranger_cannot_mutate(
        provider in bytes32_strategy(),
        stranger in bytes32_strategy(),
        size in 1u64..64,
        commitment in bytes32_strategy(),
    ) {
        prop_assume!(provider != stranger);

        let reg = registry();
        let id = reg
            .create_data_set(provider, Arc::new(NoopListener), DataSetParams::default(), 0)
            .expect("create");
        reg.add_pieces(provider, id, &[(commitment, size * 32)]).expect("add");

        prop_assert!(reg.add_pieces(stranger, id, &[(commitment, 32)]).is_err());
        prop_assert!(reg.delete_pieces(stranger, id, &[0]).is_err());
        prop_assert!(reg.prove_data(stranger, id, &[], 0).is_err());

        let status = reg.status(id, 0).expect("exists");
        prop_assert_eq!(status.total_leaves, size);
        prop_assert_eq!(status.live_pieces, 1);
        prop_assert_eq!(status.period_index, 0);
    }
}
