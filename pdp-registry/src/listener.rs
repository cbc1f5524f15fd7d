//! Listener capability for data set lifecycle notifications.
//!
//! A listener is supplied per data set at creation and invoked
//! synchronously after each state commit. Notifications are
//! fire-and-forget: they return nothing and must never fail the
//! triggering operation, so fault accounting, payment suspension and
//! similar business logic stay entirely on the collaborator's side.

use std::fmt;

/// Why a proving period was recorded as faulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultReason {
    /// The challenge window closed without a successful proof
    MissedWindow,
}

impl fmt::Display for FaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultReason::MissedWindow => write!(f, "missed challenge window"),
        }
    }
}

/// Notifications emitted by the registry after state commits.
///
/// Implementations must be cheap and must not panic; they run inside
/// the mutating call, while the data set entry is still held.
pub trait DataSetListener: Send + Sync {
    fn on_pieces_added(&self, data_set_id: u64, piece_ids: &[u64]);

    fn on_pieces_deleted(&self, data_set_id: u64, piece_ids: &[u64]);

    fn on_proof_accepted(&self, data_set_id: u64, period_index: u64);

    fn on_fault(&self, data_set_id: u64, period_index: u64, reason: FaultReason);

    fn on_period_advanced(&self, data_set_id: u64, next_challenge_epoch: u64);
}

/// Listener that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl DataSetListener for NoopListener {
    fn on_pieces_added(&self, _data_set_id: u64, _piece_ids: &[u64]) {}
    fn on_pieces_deleted(&self, _data_set_id: u64, _piece_ids: &[u64]) {}
    fn on_proof_accepted(&self, _data_set_id: u64, _period_index: u64) {}
    fn on_fault(&self, _data_set_id: u64, _period_index: u64, _reason: FaultReason) {}
    fn on_period_advanced(&self, _data_set_id: u64, _next_challenge_epoch: u64) {}
}
