//! Error types for the pdp-core crate.

use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the deterministic verification primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A piece must contribute at least one leaf
    #[error("Invalid leaf count: piece size must be a non-zero multiple of 32 bytes (got {size_bytes} bytes)")]
    InvalidLeafCount { size_bytes: u64 },

    /// The referenced piece slot is deleted or was never created
    #[error("Unknown piece: slot {slot} is deleted or does not exist")]
    UnknownPiece { slot: u64 },

    /// A global leaf offset beyond the live address space
    #[error("Offset {offset} out of range (total leaves: {total_leaves})")]
    OffsetOutOfRange { offset: u64, total_leaves: u64 },

    /// Submitted proofs do not match the generated challenge set
    #[error("Challenge mismatch at proof {index}: expected offset {expected}, got {got}")]
    ChallengeMismatch { index: u32, expected: u64, got: u64 },

    /// Wrong number of proofs for the configured challenge count
    #[error("Challenge mismatch: expected {expected} proofs, got {got}")]
    WrongProofCount { expected: u32, got: u32 },

    /// A Merkle proof did not recompute to the committed root
    #[error("Proof verification failed at proof {index} (piece slot {slot})")]
    ProofVerificationFailed { index: u32, slot: u64 },
}
