//! Shared proptest strategies for property-based testing.
//!
//! This module provides reusable strategies for generating:
//! - 32-byte digests and beacon seeds
//! - Piece leaf counts
//! - Insert/delete histories for the leaf index
//! - Merkle leaf sets

use proptest::prelude::*;

/// Generate a 32-byte digest/seed.
pub fn bytes32_strategy() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Generate a piece leaf count, kept small so exhaustive offset scans
/// stay cheap.
pub fn leaf_count_strategy() -> impl Strategy<Value = u64> {
    1u64..32
}

/// One step of a leaf index history.
///
/// `Delete` carries a selector rather than a concrete slot: the test
/// interprets it modulo the live slots at that point, so every
/// generated history is valid by construction.
#[derive(Clone, Copy, Debug)]
pub enum IndexOp {
    Insert(u64),
    Delete(u64),
}

/// Generate an interleaved insert/delete history.
///
/// Deletes are biased to one third of the operations; a delete on an
/// empty index is interpreted as a no-op by the test driver.
pub fn index_history_strategy(max_ops: usize) -> impl Strategy<Value = Vec<IndexOp>> {
    prop::collection::vec(
        prop_oneof![
            2 => leaf_count_strategy().prop_map(IndexOp::Insert),
            1 => any::<u64>().prop_map(IndexOp::Delete),
        ],
        1..max_ops,
    )
}

/// Generate a non-empty set of 32-byte Merkle leaves.
pub fn leaves_strategy(max_len: usize) -> impl Strategy<Value = Vec<[u8; 32]>> {
    prop::collection::vec(bytes32_strategy(), 1..max_len)
}

/// Apply a generated history to both the real index and a naive
/// model (leaf count per slot, zero = dead). Returns the model.
pub fn replay_history(index: &mut pdp_core::LeafIndex, ops: &[IndexOp]) -> Vec<u64> {
    let mut model: Vec<u64> = Vec::new();
    for &op in ops {
        match op {
            IndexOp::Insert(count) => {
                index.insert(count).expect("non-zero count");
                model.push(count);
            }
            IndexOp::Delete(selector) => {
                let live: Vec<u64> = (0..model.len() as u64)
                    .filter(|&s| model[s as usize] > 0)
                    .collect();
                if live.is_empty() {
                    continue;
                }
                let slot = live[(selector % live.len() as u64) as usize];
                index.delete(slot).expect("live slot");
                model[slot as usize] = 0;
            }
        }
    }
    model
}
