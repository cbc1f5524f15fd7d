//! Wire types shared between the registry and external callers.
//!
//! All multi-byte integers are unsigned fixed-width; digests are 32
//! bytes. Types carry SCALE codec derives for the wire and serde
//! derives for JSON-facing consumers.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::LEAF_SIZE;

/// A committed chunk of data within a data set.
///
/// Immutable once added, except for deletion (tombstoning). The id is
/// assigned by the registry and never reused within a data set.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Piece {
    /// Registry-assigned piece id, unique per data set
    pub id: u64,
    /// Merkle root committing the piece's leaves
    pub commitment: [u8; 32],
    /// Piece size in 32-byte leaf units
    pub leaf_count: u64,
}

impl Piece {
    /// Build a piece record from a byte size, validating the leaf
    /// alignment rule.
    pub fn from_size(id: u64, commitment: [u8; 32], size_bytes: u64) -> Result<Self> {
        if size_bytes == 0 || size_bytes % LEAF_SIZE != 0 {
            return Err(CoreError::InvalidLeafCount { size_bytes });
        }
        Ok(Self {
            id,
            commitment,
            leaf_count: size_bytes / LEAF_SIZE,
        })
    }

    /// Piece size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.leaf_count * LEAF_SIZE
    }
}

/// An inclusion proof for one challenged leaf.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Proof {
    /// The challenged 32-byte leaf
    pub leaf: [u8; 32],
    /// Global leaf offset this proof answers
    pub leaf_offset: u64,
    /// Sibling digests, ordered from the leaf's sibling up to one
    /// below the root
    pub siblings: Vec<[u8; 32]>,
}
