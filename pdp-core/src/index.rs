//! Logical leaf index over a mutable sequence of variable-size pieces.
//!
//! Every piece in a data set is a multiple of the 32-byte leaf unit.
//! The index flattens all live pieces into a single address space
//! `[0, total_leaves)` and answers "which piece owns global leaf k"
//! without storing an explicit offset per piece, so that deleting a
//! piece (which shifts the logical offset of everything after it)
//! costs O(log n) instead of an O(n) re-index.
//!
//! Internally this is a Fenwick (binary indexed) tree over per-slot
//! leaf counts. Slots are append-only; deletion tombstones a slot by
//! zeroing its contribution. The tree's semantics are defined purely
//! by the current live leaf counts, never by insertion history.

use crate::error::{CoreError, Result};

/// Fenwick-backed map from global leaf offsets to piece slots.
#[derive(Debug, Clone, Default)]
pub struct LeafIndex {
    /// 1-based Fenwick array of subtree leaf-count sums (`tree[0]` unused).
    tree: Vec<u64>,
    /// Per-slot live leaf count; zero marks a tombstone.
    counts: Vec<u64>,
    /// Cached sum of all live leaf counts.
    total: u64,
    /// Number of live (non-tombstoned) slots.
    live: u64,
}

#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl LeafIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            tree: vec![0],
            counts: Vec::new(),
            total: 0,
            live: 0,
        }
    }

    /// Append a new piece slot holding `leaf_count` leaves.
    ///
    /// Returns the assigned slot. Slots are never reused, so the slot
    /// doubles as a stable piece identifier for the caller.
    pub fn insert(&mut self, leaf_count: u64) -> Result<u64> {
        if leaf_count == 0 {
            return Err(CoreError::InvalidLeafCount { size_bytes: 0 });
        }

        let slot = self.counts.len();
        let i = slot + 1; // 1-based Fenwick position

        // The new node covers the range (i - lowbit(i), i]; fold in the
        // already-built subtrees below it so the append stays O(log n).
        let mut node = leaf_count;
        let mut j = i - 1;
        while j > i - lowbit(i) {
            node += self.tree[j];
            j -= lowbit(j);
        }

        self.counts.push(leaf_count);
        self.tree.push(node);
        self.total += leaf_count;
        self.live += 1;
        Ok(slot as u64)
    }

    /// Tombstone a slot, removing its leaves from the address space.
    ///
    /// The logical offsets of every piece after `slot` shift down by
    /// the removed leaf count; no per-piece state needs touching.
    pub fn delete(&mut self, slot: u64) -> Result<u64> {
        let idx = slot as usize;
        let delta = match self.counts.get(idx) {
            Some(&c) if c > 0 => c,
            _ => return Err(CoreError::UnknownPiece { slot }),
        };

        self.counts[idx] = 0;
        let mut i = idx + 1;
        while i < self.tree.len() {
            self.tree[i] -= delta;
            i += lowbit(i);
        }
        self.total -= delta;
        self.live -= 1;
        Ok(delta)
    }

    /// Total live leaves; equals the upper bound of the address space.
    pub fn total_leaves(&self) -> u64 {
        self.total
    }

    /// Number of slots ever created, tombstones included.
    pub fn slot_count(&self) -> u64 {
        self.counts.len() as u64
    }

    /// Number of live pieces.
    pub fn live_pieces(&self) -> u64 {
        self.live
    }

    /// Whether `slot` exists and is not tombstoned.
    pub fn is_live(&self, slot: u64) -> bool {
        self.counts.get(slot as usize).is_some_and(|&c| c > 0)
    }

    /// Live leaf count of `slot`, if it is live.
    pub fn leaf_count(&self, slot: u64) -> Option<u64> {
        match self.counts.get(slot as usize) {
            Some(&c) if c > 0 => Some(c),
            _ => None,
        }
    }

    /// Map a global leaf offset to `(slot, local_offset)`.
    ///
    /// Performs the Fenwick find-by-prefix-rank descent: walk down from
    /// the highest power-of-two node, stepping right while the
    /// accumulated sum stays at or below the target. Terminates at the
    /// unique live slot whose half-open range contains `offset`.
    pub fn resolve(&self, offset: u64) -> Result<(u64, u64)> {
        if offset >= self.total {
            return Err(CoreError::OffsetOutOfRange {
                offset,
                total_leaves: self.total,
            });
        }

        let n = self.counts.len();
        let mut pos = 0usize;
        let mut remaining = offset;
        let mut step = if n == 0 {
            0
        } else {
            1usize << (usize::BITS - 1 - n.leading_zeros())
        };

        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= remaining {
                remaining -= self.tree[next];
                pos = next;
            }
            step >>= 1;
        }

        // `pos` slots lie fully before the offset; the containing slot
        // is the next one. A tombstone can never be selected because it
        // contributes nothing to any prefix sum.
        debug_assert!(self.counts[pos] > 0);
        debug_assert!(remaining < self.counts[pos]);
        Ok((pos as u64, remaining))
    }

    /// Sum of live leaf counts over slots `[0, slot)`.
    #[cfg(test)]
    fn prefix_sum(&self, slot: u64) -> u64 {
        let mut i = slot as usize;
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= lowbit(i);
        }
        sum
    }
}
