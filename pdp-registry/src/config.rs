//! Per-data-set proving parameters.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use pdp_core::DEFAULT_CHALLENGES_PER_PROOF;

fn default_challenge_delay() -> u64 {
    60
}

fn default_window_length() -> u64 {
    30
}

fn default_challenges_per_proof() -> u32 {
    DEFAULT_CHALLENGES_PER_PROOF
}

/// Parameters fixed at data set creation.
///
/// Epoch units are whatever the host chain counts time in (block
/// heights on-chain, seconds against a local beacon); the registry
/// only compares them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetParams {
    /// Gap between closing one period and the next challenge epoch
    #[serde(default = "default_challenge_delay")]
    pub challenge_delay: u64,

    /// Length of the challenge window in epochs
    #[serde(default = "default_window_length")]
    pub window_length: u64,

    /// Number of challenged leaves per proof submission (K)
    #[serde(default = "default_challenges_per_proof")]
    pub challenges_per_proof: u32,
}

impl Default for DataSetParams {
    fn default() -> Self {
        Self {
            challenge_delay: default_challenge_delay(),
            window_length: default_window_length(),
            challenges_per_proof: default_challenges_per_proof(),
        }
    }
}

impl DataSetParams {
    /// Reject degenerate parameter sets up front.
    pub fn validate(&self) -> Result<()> {
        // A zero delay would commit the next challenge epoch at
        // submission time, whose beacon value the provider can
        // already observe and grind against.
        if self.challenge_delay == 0 {
            return Err(RegistryError::InvalidParams(
                "challenge_delay must be non-zero".into(),
            ));
        }
        if self.window_length == 0 {
            return Err(RegistryError::InvalidParams(
                "window_length must be non-zero".into(),
            ));
        }
        if self.challenges_per_proof == 0 {
            return Err(RegistryError::InvalidParams(
                "challenges_per_proof must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
