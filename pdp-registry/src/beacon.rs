//! Randomness oracle interface.
//!
//! The registry never produces randomness. It reads a 32-byte value
//! for a given epoch from an injected source that is assumed
//! tamper-evident and unbiasable by any protocol participant (a chain
//! randomness beacon in production). Keeping the source behind a
//! trait makes challenge generation fully reproducible under test.

/// Read-only view of an external randomness beacon.
pub trait RandomnessSource: Send + Sync {
    /// The beacon value at `epoch`.
    ///
    /// Epochs the registry asks about are always in the past by the
    /// time a proof is verified, so the value is assumed available.
    fn value_at(&self, epoch: u64) -> [u8; 32];
}

/// Deterministic beacon derived from a fixed root secret.
///
/// Suitable for tests and single-node devnets; a real deployment
/// injects a chain beacon instead.
#[derive(Clone, Debug)]
pub struct SeededBeacon {
    root: [u8; 32],
}

impl SeededBeacon {
    pub fn new(root: [u8; 32]) -> Self {
        Self { root }
    }
}

impl RandomnessSource for SeededBeacon {
    fn value_at(&self, epoch: u64) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"PDP_BEACON_V1");
        hasher.update(&self.root);
        hasher.update(&epoch.to_le_bytes());
        *hasher.finalize().as_bytes()
    }
}
