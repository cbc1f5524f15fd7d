//! BLAKE3-based Merkle commitments over 32-byte leaves.
//!
//! A piece is committed as the root of a binary Merkle tree whose
//! leaves are the piece's consecutive 32-byte units. Verification
//! recomputes the root from a challenged leaf and its sibling path,
//! using the local leaf offset's bits to decide concatenation order
//! at each level.
//!
//! # Design
//!
//! - Domain-separated hashing: leaf hash = BLAKE3(0x00 || leaf)
//! - Internal node hash = BLAKE3(0x01 || left || right)
//! - Non-power-of-two leaf counts are padded by duplicating the last
//!   node at each odd level

use crate::error::{CoreError, Result};
use crate::LEAF_SIZE;

/// Domain separator for leaf hashes (prevents second-preimage attacks)
const LEAF_DOMAIN: u8 = 0x00;

/// Domain separator for internal node hashes
const NODE_DOMAIN: u8 = 0x01;

/// Hash a 32-byte leaf: BLAKE3(0x00 || leaf)
pub fn hash_leaf(leaf: &[u8; 32]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_DOMAIN]);
    hasher.update(leaf);
    *hasher.finalize().as_bytes()
}

/// Hash an internal node: BLAKE3(0x01 || left || right)
pub fn hash_node(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[NODE_DOMAIN]);
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// Split raw piece bytes into 32-byte leaves.
///
/// Fails with `InvalidLeafCount` unless the length is a non-zero
/// multiple of the leaf unit.
pub fn leaves_from_piece(data: &[u8]) -> Result<Vec<[u8; 32]>> {
    let len = data.len() as u64;
    if len == 0 || len % LEAF_SIZE != 0 {
        return Err(CoreError::InvalidLeafCount { size_bytes: len });
    }
    Ok(data
        .chunks_exact(LEAF_SIZE as usize)
        .map(|chunk| {
            let mut leaf = [0u8; 32];
            leaf.copy_from_slice(chunk);
            leaf
        })
        .collect())
}

/// Recompute a Merkle root from a leaf and its sibling path.
///
/// Bit `i` of `local_offset` selects the running hash's side at level
/// `i`: zero means the running hash is the left child.
pub fn compute_root(leaf: &[u8; 32], local_offset: u64, siblings: &[[u8; 32]]) -> [u8; 32] {
    let mut current = hash_leaf(leaf);
    for (level, sibling) in siblings.iter().enumerate() {
        current = if (local_offset >> level) & 1 == 0 {
            hash_node(&current, sibling)
        } else {
            hash_node(sibling, &current)
        };
    }
    current
}

/// Verify that `leaf` at `local_offset` hashes up to `root`.
pub fn verify_proof(
    leaf: &[u8; 32],
    local_offset: u64,
    siblings: &[[u8; 32]],
    root: &[u8; 32],
) -> bool {
    compute_root(leaf, local_offset, siblings) == *root
}

/// A full Merkle tree over 32-byte leaves, kept level by level so that
/// sibling paths can be extracted for any leaf.
///
/// Storage providers build this once per piece to obtain the committed
/// root, and again at proving time to answer challenges.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `levels[0]` holds the hashed leaves, the last level the root.
    levels: Vec<Vec<[u8; 32]>>,
    leaf_count: usize,
}

impl MerkleTree {
    /// Build a tree over the given leaves.
    pub fn build(leaves: &[[u8; 32]]) -> Result<Self> {
        if leaves.is_empty() {
            return Err(CoreError::InvalidLeafCount { size_bytes: 0 });
        }

        let hashed: Vec<[u8; 32]> = leaves.iter().map(hash_leaf).collect();
        let mut levels: Vec<Vec<[u8; 32]>> = vec![hashed.clone()];

        let mut current = hashed;
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                let left = &pair[0];
                // Odd level: duplicate the last node
                let right = pair.get(1).unwrap_or(left);
                next.push(hash_node(left, right));
            }
            levels.push(next.clone());
            current = next;
        }

        Ok(Self {
            levels,
            leaf_count: leaves.len(),
        })
    }

    /// Build directly from raw piece bytes.
    pub fn from_piece(data: &[u8]) -> Result<Self> {
        Self::build(&leaves_from_piece(data)?)
    }

    /// The committed root.
    pub fn root(&self) -> [u8; 32] {
        self.levels
            .last()
            .and_then(|l| l.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    /// Number of leaves the tree was built over (before padding).
    pub fn leaf_count(&self) -> u64 {
        self.leaf_count as u64
    }

    /// Sibling path for the leaf at `local_offset`, ordered from the
    /// leaf's sibling up to one below the root.
    pub fn siblings(&self, local_offset: u64) -> Result<Vec<[u8; 32]>> {
        if local_offset >= self.leaf_count as u64 {
            return Err(CoreError::OffsetOutOfRange {
                offset: local_offset,
                total_leaves: self.leaf_count as u64,
            });
        }

        let mut siblings = Vec::with_capacity(self.levels.len() - 1);
        let mut idx = local_offset as usize;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = idx ^ 1;
            // An unpaired rightmost node is its own sibling
            siblings.push(*level.get(sibling_idx).unwrap_or(&level[idx]));
            idx /= 2;
        }
        Ok(siblings)
    }
}
