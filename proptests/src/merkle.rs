//! Property-based tests for Merkle commitments.
//!
//! Tests the following invariants:
//! - MRK-1: honest proofs verify for every leaf position
//! - MRK-2: tampering with the leaf, any sibling, or the offset
//!   breaks verification
//! - MRK-3: roots are deterministic and leaf-order sensitive

use crate::strategies::*;
use pdp_core::merkle::{verify_proof, MerkleTree};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// MRK-1: every leaf of every tree round-trips.
    #[test]
    fn prop_round_trip(leaves in leaves_strategy(64)) {
        let tree = MerkleTree::build(&leaves).expect("non-empty");
        for (i, leaf) in leaves.iter().enumerate() {
            let siblings = tree.siblings(i as u64).expect("in range");
            prop_assert!(
                verify_proof(leaf, i as u64, &siblings, &tree.root()),
                "leaf {} failed", i
            );
        }
    }

    /// MRK-2a: flipping any single bit of the leaf breaks the proof.
    #[test]
    fn prop_flipped_leaf_fails(
        leaves in leaves_strategy(64),
        selector in any::<u64>(),
        bit in 0usize..256,
    ) {
        let tree = MerkleTree::build(&leaves).expect("non-empty");
        let idx = selector % leaves.len() as u64;
        let siblings = tree.siblings(idx).expect("in range");

        let mut tampered = leaves[idx as usize];
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify_proof(&tampered, idx, &siblings, &tree.root()));
    }

    /// MRK-2b: flipping any single bit of any sibling breaks the proof.
    #[test]
    fn prop_tampered_sibling_fails(
        leaves in leaves_strategy(64),
        selector in any::<u64>(),
        bit in 0usize..256,
    ) {
        let tree = MerkleTree::build(&leaves).expect("non-empty");
        let idx = selector % leaves.len() as u64;
        let mut siblings = tree.siblings(idx).expect("in range");
        prop_assume!(!siblings.is_empty());

        let level = selector as usize % siblings.len();
        siblings[level][bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify_proof(&leaves[idx as usize], idx, &siblings, &tree.root()));
    }

    /// MRK-2c: a proof presented at the wrong offset fails.
    #[test]
    fn prop_wrong_offset_fails(
        leaves in leaves_strategy(64),
        selector in any::<u64>(),
        shift in 1u64..64,
    ) {
        prop_assume!(leaves.len() >= 2);
        let tree = MerkleTree::build(&leaves).expect("non-empty");
        let idx = selector % leaves.len() as u64;
        let wrong = (idx + shift) % leaves.len() as u64;
        prop_assume!(wrong != idx);

        let siblings = tree.siblings(idx).expect("in range");
        prop_assert!(!verify_proof(&leaves[idx as usize], wrong, &siblings, &tree.root()));
    }

    /// MRK-3: rebuilding yields the same root; swapping two distinct
    /// leaves changes it.
    #[test]
    fn prop_root_order_sensitive(leaves in leaves_strategy(64), selector in any::<u64>()) {
        let tree = MerkleTree::build(&leaves).expect("non-empty");
        prop_assert_eq!(
            tree.root(),
            MerkleTree::build(&leaves).expect("non-empty").root()
        );

        prop_assume!(leaves.len() >= 2);
        let i = (selector % leaves.len() as u64) as usize;
        let j = (i + 1) % leaves.len();
        prop_assume!(leaves[i] != leaves[j]);

        let mut swapped = leaves.clone();
        swapped.swap(i, j);
        prop_assert_ne!(
            tree.root(),
            MerkleTree::build(&swapped).expect("non-empty").root()
        );
    }
}
