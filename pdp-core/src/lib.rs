//! Deterministic primitives for proof-of-data-possession verification.
//!
//! This crate holds the pure parts of the verification engine: the
//! logical leaf index that maps a mutable collection of variable-size
//! pieces onto one flat leaf address space, the challenge derivation,
//! and Merkle proof verification. None of it performs I/O or reads a
//! clock; every function is a deterministic map from its inputs.
//!
//! # Architecture
//!
//! ```text
//! COMMIT PHASE:
//!   Piece Data → 32-byte Leaves → BLAKE3 Merkle Tree → Committed Root
//!
//! CHALLENGE PHASE:
//!   Beacon Seed + (data set, period) → K global leaf offsets
//!
//! VERIFY PHASE:
//!   Offset → LeafIndex::resolve → (piece, local offset)
//!          → recompute root from proof → compare to committed root
//! ```

pub mod challenge;
pub mod error;
pub mod index;
pub mod merkle;
pub mod types;

pub use challenge::generate_offsets;
pub use error::{CoreError, Result};
pub use index::LeafIndex;
pub use merkle::MerkleTree;
pub use types::{Piece, Proof};

/// Size of the addressable leaf unit in bytes. Piece sizes must be a
/// multiple of this.
pub const LEAF_SIZE: u64 = 32;

/// Default number of challenged leaves per proving period.
pub const DEFAULT_CHALLENGES_PER_PROOF: u32 = 5;
