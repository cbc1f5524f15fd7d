//! Proving-period state machine.
//!
//! One `ProvingPeriod` per data set tracks where the set sits in the
//! challenge cycle:
//!
//! ```text
//! AwaitingChallengeEpoch ──(epoch reached)──▶ WithinChallengeWindow
//!     WithinChallengeWindow ──(valid proof)──▶ ProofAccepted
//!     WithinChallengeWindow ──(window end)───▶ Faulted
//! {ProofAccepted, Faulted} ──(advance)──▶ AwaitingChallengeEpoch (next period)
//! ```
//!
//! Chain time is always passed in; the machine never reads a clock.
//! Time-driven transitions are derived on observation, so a missed
//! window is visible as `Faulted` the moment `now` passes the window
//! end, even before anyone calls `next_proving_period` to record it.

use serde::{Deserialize, Serialize};

/// Position of a data set within its proving cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodState {
    /// Chain time has not reached the challenge epoch; no proof may
    /// be submitted yet
    AwaitingChallengeEpoch,
    /// Inside `[challenge_epoch, challenge_epoch + window_length)`
    WithinChallengeWindow,
    /// A valid proof was accepted for the current period
    ProofAccepted,
    /// The window closed without a successful proof
    Faulted,
}

/// Challenge-cycle bookkeeping for one data set.
#[derive(Clone, Debug)]
pub struct ProvingPeriod {
    challenge_epoch: u64,
    window_length: u64,
    period_index: u64,
    fault_count: u64,
    state: PeriodState,
}

impl ProvingPeriod {
    /// Start the first period with its challenge epoch already
    /// committed (grinding discipline: the epoch is fixed before the
    /// provider can observe the beacon value for it).
    pub fn new(first_challenge_epoch: u64, window_length: u64) -> Self {
        Self {
            challenge_epoch: first_challenge_epoch,
            window_length,
            period_index: 0,
            fault_count: 0,
            state: PeriodState::AwaitingChallengeEpoch,
        }
    }

    pub fn challenge_epoch(&self) -> u64 {
        self.challenge_epoch
    }

    pub fn window_end(&self) -> u64 {
        self.challenge_epoch.saturating_add(self.window_length)
    }

    pub fn period_index(&self) -> u64 {
        self.period_index
    }

    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }

    /// The state as observed at chain time `now`.
    ///
    /// For the two time-driven states the answer is derived from
    /// `now` alone; a recorded outcome (`ProofAccepted`/`Faulted`
    /// pending advance) is sticky until the period rolls over.
    pub fn state_at(&self, now: u64) -> PeriodState {
        match self.state {
            PeriodState::AwaitingChallengeEpoch | PeriodState::WithinChallengeWindow => {
                if now < self.challenge_epoch {
                    PeriodState::AwaitingChallengeEpoch
                } else if now < self.window_end() {
                    PeriodState::WithinChallengeWindow
                } else {
                    PeriodState::Faulted
                }
            }
            recorded => recorded,
        }
    }

    /// Whether a proof may be submitted at `now`.
    pub fn in_window(&self, now: u64) -> bool {
        self.state_at(now) == PeriodState::WithinChallengeWindow
    }

    /// Record a successful proof for the current period.
    pub fn accept_proof(&mut self) {
        debug_assert!(matches!(
            self.state,
            PeriodState::AwaitingChallengeEpoch | PeriodState::WithinChallengeWindow
        ));
        self.state = PeriodState::ProofAccepted;
    }

    /// Record a fault for the current period. Returns the running
    /// fault tally.
    pub fn record_fault(&mut self) -> u64 {
        self.state = PeriodState::Faulted;
        self.fault_count += 1;
        self.fault_count
    }

    /// Open the next period with a freshly committed challenge epoch.
    ///
    /// Only legal once the current period's outcome is recorded; this
    /// is the acknowledgment that resets the cycle.
    pub fn advance(&mut self, next_challenge_epoch: u64) {
        debug_assert!(matches!(
            self.state,
            PeriodState::ProofAccepted | PeriodState::Faulted
        ));
        self.period_index += 1;
        self.challenge_epoch = next_challenge_epoch;
        self.state = PeriodState::AwaitingChallengeEpoch;
    }
}
