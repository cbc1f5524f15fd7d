//! Challenge derivation using deterministic seeding.
//!
//! Each proving period, K global leaf offsets are derived from:
//! - Beacon seed (randomness fixed before the provider could bias it)
//! - Data set id (prevent cross-data-set replay)
//! - Period index (prevent cross-period replay)
//! - Challenge index (independent draws within one period)
//!
//! The generator is pure and stateless. Grinding resistance is an
//! epoch-selection discipline enforced by the proving-period
//! scheduler: the seed's epoch is committed before the provider can
//! observe the beacon value for it, so retrying or delaying cannot
//! draw a more favorable challenge set.

/// Domain separator for challenge derivation
const CHALLENGE_DOMAIN: &[u8] = b"PDP_CHALLENGE_V1";

/// Derive the digest behind a single challenge offset.
pub fn challenge_digest(
    seed: &[u8; 32],
    data_set_id: u64,
    period_index: u64,
    challenge_index: u32,
) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(CHALLENGE_DOMAIN);
    hasher.update(seed);
    hasher.update(&data_set_id.to_le_bytes());
    hasher.update(&period_index.to_le_bytes());
    hasher.update(&challenge_index.to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// Generate the K challenged leaf offsets for one proving period.
///
/// Offsets are uniform over `[0, total_leaves)`: the digest's low 128
/// bits are reduced modulo the leaf count, which keeps the modulo bias
/// far below anything observable for realistic data set sizes.
/// Duplicate offsets are legitimate draws and are kept; order is the
/// derivation order and is significant for proof submission.
pub fn generate_offsets(
    seed: &[u8; 32],
    data_set_id: u64,
    period_index: u64,
    k: u32,
    total_leaves: u64,
) -> Vec<u64> {
    if total_leaves == 0 || k == 0 {
        return Vec::new();
    }

    (0..k)
        .map(|i| {
            let digest = challenge_digest(seed, data_set_id, period_index, i);
            let mut wide = [0u8; 16];
            wide.copy_from_slice(&digest[..16]);
            (u128::from_le_bytes(wide) % u128::from(total_leaves)) as u64
        })
        .collect()
}
