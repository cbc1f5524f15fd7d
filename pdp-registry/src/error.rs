//! Error types for the pdp-registry crate.

use pdp_core::CoreError;
use thiserror::Error;

/// Result type alias using RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors reported by data set operations.
///
/// Faults (missed or failed proving periods) are deliberately not in
/// this taxonomy: they are recorded outcomes, not errors, and the
/// data set keeps operating after one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is not the data set's storage provider
    #[error("Unauthorized: caller is not the storage provider of data set {data_set_id}")]
    Unauthorized { data_set_id: u64 },

    /// No data set registered under this id
    #[error("Unknown data set: {data_set_id}")]
    UnknownDataSet { data_set_id: u64 },

    /// The data set has no live leaves, so no challenge can be drawn
    /// and no submission can prove possession
    #[error("Data set {data_set_id} has no live leaves to challenge")]
    EmptyDataSet { data_set_id: u64 },

    /// Proof submitted outside the challenge window
    #[error(
        "Not within challenge window: now={now}, window=[{challenge_epoch}, {window_end})"
    )]
    NotWithinWindow {
        now: u64,
        challenge_epoch: u64,
        window_end: u64,
    },

    /// next_proving_period called while a valid proof could still be
    /// submitted
    #[error("Window not yet elapsed: now={now}, window ends at {window_end}")]
    WindowNotYetElapsed { now: u64, window_end: u64 },

    /// The rescheduled challenge epoch must lie in the future
    #[error("Invalid challenge epoch {requested}: must be after current epoch {now}")]
    InvalidChallengeEpoch { requested: u64, now: u64 },

    /// Degenerate data set parameters
    #[error("Invalid data set parameters: {0}")]
    InvalidParams(String),

    /// Validation or proof failure from the deterministic core
    #[error(transparent)]
    Core(#[from] CoreError),
}
