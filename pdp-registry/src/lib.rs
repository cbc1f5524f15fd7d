//! Data set registry and proving-period scheduling.
//!
//! This crate owns all mutable per-data-set state and composes the
//! deterministic primitives from `pdp-core` into the externally
//! visible operations: create a data set, add/delete pieces, submit a
//! proof, advance a missed period.
//!
//! Chain time never comes from a clock: every time-sensitive
//! operation takes an explicit epoch argument, and randomness is read
//! from an injected [`RandomnessSource`]. That keeps the whole crate
//! deterministic under test.
//!
//! # Control flow
//!
//! ```text
//! create_data_set ──▶ DataSet { LeafIndex, ProvingPeriod, listener }
//! add/delete pieces ──▶ LeafIndex updates, listener notified
//! challenge epoch arrives ──▶ challenge window opens
//! prove_data ──▶ beacon seed → K offsets → resolve → verify roots
//!     success ──▶ next period scheduled, on_proof_accepted
//! window missed ──▶ next_proving_period ──▶ fault recorded, on_fault
//! ```

pub mod beacon;
pub mod config;
pub mod error;
pub mod listener;
pub mod registry;
pub mod scheduler;

pub use beacon::{RandomnessSource, SeededBeacon};
pub use config::DataSetParams;
pub use error::{RegistryError, Result};
pub use listener::{DataSetListener, FaultReason, NoopListener};
pub use registry::{DataSetRegistry, DataSetStatus, ProviderId};
pub use scheduler::{PeriodState, ProvingPeriod};
