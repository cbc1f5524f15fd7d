//! Data set registry: owns per-data-set state and exposes the
//! mutating operations.
//!
//! Every operation is atomic: it either completes fully (index,
//! piece table and period state updated together) or reports an
//! error with no observable state change. Batch mutations validate
//! all inputs before touching anything. Each data set lives in its
//! own `DashMap` entry, so mutations on different data sets do not
//! contend and a mutation on one data set is serialized against all
//! other access to it.
//!
//! Listener notifications fire synchronously after the state commit,
//! while the entry is still held; listeners must not call back into
//! the registry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use pdp_core::{generate_offsets, merkle, CoreError, LeafIndex, Piece, Proof};

use crate::beacon::RandomnessSource;
use crate::config::DataSetParams;
use crate::error::{RegistryError, Result};
use crate::listener::{DataSetListener, FaultReason};
use crate::scheduler::{PeriodState, ProvingPeriod};

/// Identity of a storage provider (public key bytes).
pub type ProviderId = [u8; 32];

/// One data set: ordered pieces under a single storage provider,
/// proven as a unit.
struct DataSet {
    storage_provider: ProviderId,
    /// Piece records indexed by piece id. Ids are assigned
    /// sequentially and never reused, so the id doubles as the leaf
    /// index slot; liveness lives in the index.
    pieces: Vec<Piece>,
    index: LeafIndex,
    period: ProvingPeriod,
    params: DataSetParams,
    listener: Arc<dyn DataSetListener>,
}

/// Read-only snapshot of a data set, taken under the entry lock so
/// all fields are mutually consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSetStatus {
    pub storage_provider: ProviderId,
    pub total_leaves: u64,
    pub live_pieces: u64,
    pub next_piece_id: u64,
    pub challenge_epoch: u64,
    pub window_end: u64,
    pub period_index: u64,
    pub fault_count: u64,
    pub state: PeriodState,
}

/// Registry of all data sets, keyed by data set id.
pub struct DataSetRegistry {
    randomness: Arc<dyn RandomnessSource>,
    data_sets: DashMap<u64, DataSet>,
    next_data_set_id: AtomicU64,
}

impl DataSetRegistry {
    pub fn new(randomness: Arc<dyn RandomnessSource>) -> Self {
        Self {
            randomness,
            data_sets: DashMap::new(),
            next_data_set_id: AtomicU64::new(0),
        }
    }

    /// Register a new, empty data set.
    ///
    /// The first challenge epoch is committed immediately as
    /// `now + challenge_delay`; the provider cannot later choose a
    /// different beacon epoch for it.
    pub fn create_data_set(
        &self,
        storage_provider: ProviderId,
        listener: Arc<dyn DataSetListener>,
        params: DataSetParams,
        now: u64,
    ) -> Result<u64> {
        params.validate()?;

        let id = self.next_data_set_id.fetch_add(1, Ordering::Relaxed);
        let first_epoch = now.saturating_add(params.challenge_delay);
        let data_set = DataSet {
            storage_provider,
            pieces: Vec::new(),
            index: LeafIndex::new(),
            period: ProvingPeriod::new(first_epoch, params.window_length),
            params,
            listener,
        };
        self.data_sets.insert(id, data_set);

        info!(
            data_set_id = id,
            provider = %hex::encode(storage_provider),
            challenge_epoch = first_epoch,
            "Data set created"
        );
        Ok(id)
    }

    /// Append pieces to a data set. All-or-nothing: every entry is
    /// validated before any piece is inserted.
    ///
    /// Returns the assigned piece ids, in input order.
    pub fn add_pieces(
        &self,
        caller: ProviderId,
        data_set_id: u64,
        pieces: &[([u8; 32], u64)],
    ) -> Result<Vec<u64>> {
        let mut entry = self.entry_mut(data_set_id)?;
        let ds = entry.value_mut();
        authorize(ds, caller, data_set_id)?;

        // Validate the whole batch up front
        let first_id = ds.pieces.len() as u64;
        let validated: Vec<Piece> = pieces
            .iter()
            .enumerate()
            .map(|(i, &(commitment, size_bytes))| {
                Piece::from_size(first_id + i as u64, commitment, size_bytes)
            })
            .collect::<pdp_core::Result<_>>()?;

        let mut assigned = Vec::with_capacity(validated.len());
        for piece in validated {
            let slot = ds.index.insert(piece.leaf_count)?;
            debug_assert_eq!(slot, piece.id);
            assigned.push(piece.id);
            ds.pieces.push(piece);
        }

        debug!(
            data_set_id,
            added = assigned.len(),
            total_leaves = ds.index.total_leaves(),
            "Pieces added"
        );
        if !assigned.is_empty() {
            ds.listener.on_pieces_added(data_set_id, &assigned);
        }
        Ok(assigned)
    }

    /// Tombstone pieces. All-or-nothing: the batch fails with
    /// `UnknownPiece` if any id is dead, missing, or repeated.
    pub fn delete_pieces(
        &self,
        caller: ProviderId,
        data_set_id: u64,
        piece_ids: &[u64],
    ) -> Result<()> {
        let mut entry = self.entry_mut(data_set_id)?;
        let ds = entry.value_mut();
        authorize(ds, caller, data_set_id)?;

        let mut seen = std::collections::HashSet::with_capacity(piece_ids.len());
        for &id in piece_ids {
            if !ds.index.is_live(id) || !seen.insert(id) {
                return Err(CoreError::UnknownPiece { slot: id }.into());
            }
        }

        for &id in piece_ids {
            ds.index.delete(id)?;
        }

        debug!(
            data_set_id,
            deleted = piece_ids.len(),
            total_leaves = ds.index.total_leaves(),
            "Pieces deleted"
        );
        if !piece_ids.is_empty() {
            ds.listener.on_pieces_deleted(data_set_id, piece_ids);
        }
        Ok(())
    }

    /// Submit the K proofs for the current challenge window.
    ///
    /// Verification is all-or-nothing: a single mismatched offset or
    /// failing Merkle path rejects the submission and leaves period
    /// state untouched, so the provider may retry within the window.
    /// On success the period closes and the next challenge epoch is
    /// committed as `now + challenge_delay`.
    pub fn prove_data(
        &self,
        caller: ProviderId,
        data_set_id: u64,
        proofs: &[Proof],
        now: u64,
    ) -> Result<()> {
        let mut entry = self.entry_mut(data_set_id)?;
        let ds = entry.value_mut();
        authorize(ds, caller, data_set_id)?;

        if !ds.period.in_window(now) {
            return Err(RegistryError::NotWithinWindow {
                now,
                challenge_epoch: ds.period.challenge_epoch(),
                window_end: ds.period.window_end(),
            });
        }

        // The seed's epoch was committed before the window opened, so
        // the provider had no way to grind for a friendlier draw.
        let seed = self.randomness.value_at(ds.period.challenge_epoch());
        let offsets = generate_offsets(
            &seed,
            data_set_id,
            ds.period.period_index(),
            ds.params.challenges_per_proof,
            ds.index.total_leaves(),
        );

        verify_submission(ds, data_set_id, &offsets, proofs)?;

        let period_index = ds.period.period_index();
        let next_epoch = now.saturating_add(ds.params.challenge_delay);
        ds.period.accept_proof();
        ds.listener.on_proof_accepted(data_set_id, period_index);
        ds.period.advance(next_epoch);
        ds.listener.on_period_advanced(data_set_id, next_epoch);

        info!(
            data_set_id,
            period_index,
            proofs = proofs.len(),
            next_challenge_epoch = next_epoch,
            "Proof accepted"
        );
        Ok(())
    }

    /// Close a missed period: record a fault and reschedule.
    ///
    /// Callable by anyone once the window has elapsed without a
    /// successful proof; this is the liveness escape valve that keeps
    /// a data set from deadlocking after data loss.
    pub fn next_proving_period(
        &self,
        data_set_id: u64,
        next_challenge_epoch: u64,
        now: u64,
    ) -> Result<()> {
        let mut entry = self.entry_mut(data_set_id)?;
        let ds = entry.value_mut();

        if ds.period.state_at(now) != PeriodState::Faulted {
            return Err(RegistryError::WindowNotYetElapsed {
                now,
                window_end: ds.period.window_end(),
            });
        }
        if next_challenge_epoch <= now {
            return Err(RegistryError::InvalidChallengeEpoch {
                requested: next_challenge_epoch,
                now,
            });
        }

        let period_index = ds.period.period_index();
        let fault_count = ds.period.record_fault();
        ds.listener
            .on_fault(data_set_id, period_index, FaultReason::MissedWindow);
        ds.period.advance(next_challenge_epoch);
        ds.listener
            .on_period_advanced(data_set_id, next_challenge_epoch);

        warn!(
            data_set_id,
            period_index,
            fault_count,
            next_challenge_epoch,
            "Proving period missed, fault recorded"
        );
        Ok(())
    }

    /// The challenged leaf offsets the provider must answer in the
    /// current window.
    pub fn challenge_offsets(&self, data_set_id: u64, now: u64) -> Result<Vec<u64>> {
        let entry = self.entry(data_set_id)?;
        let ds = entry.value();

        if !ds.period.in_window(now) {
            return Err(RegistryError::NotWithinWindow {
                now,
                challenge_epoch: ds.period.challenge_epoch(),
                window_end: ds.period.window_end(),
            });
        }

        let seed = self.randomness.value_at(ds.period.challenge_epoch());
        Ok(generate_offsets(
            &seed,
            data_set_id,
            ds.period.period_index(),
            ds.params.challenges_per_proof,
            ds.index.total_leaves(),
        ))
    }

    /// A live piece record.
    pub fn piece(&self, data_set_id: u64, piece_id: u64) -> Result<Piece> {
        let entry = self.entry(data_set_id)?;
        let ds = entry.value();
        if !ds.index.is_live(piece_id) {
            return Err(CoreError::UnknownPiece { slot: piece_id }.into());
        }
        Ok(ds.pieces[piece_id as usize].clone())
    }

    /// Total live leaves of a data set.
    pub fn total_leaves(&self, data_set_id: u64) -> Result<u64> {
        Ok(self.entry(data_set_id)?.index.total_leaves())
    }

    /// Consistent snapshot of a data set at chain time `now`.
    pub fn status(&self, data_set_id: u64, now: u64) -> Result<DataSetStatus> {
        let entry = self.entry(data_set_id)?;
        let ds = entry.value();
        Ok(DataSetStatus {
            storage_provider: ds.storage_provider,
            total_leaves: ds.index.total_leaves(),
            live_pieces: ds.index.live_pieces(),
            next_piece_id: ds.pieces.len() as u64,
            challenge_epoch: ds.period.challenge_epoch(),
            window_end: ds.period.window_end(),
            period_index: ds.period.period_index(),
            fault_count: ds.period.fault_count(),
            state: ds.period.state_at(now),
        })
    }

    /// Number of registered data sets.
    pub fn data_set_count(&self) -> usize {
        self.data_sets.len()
    }

    fn entry(&self, data_set_id: u64) -> Result<dashmap::mapref::one::Ref<'_, u64, DataSet>> {
        self.data_sets
            .get(&data_set_id)
            .ok_or(RegistryError::UnknownDataSet { data_set_id })
    }

    fn entry_mut(
        &self,
        data_set_id: u64,
    ) -> Result<dashmap::mapref::one::RefMut<'_, u64, DataSet>> {
        self.data_sets
            .get_mut(&data_set_id)
            .ok_or(RegistryError::UnknownDataSet { data_set_id })
    }
}

fn authorize(ds: &DataSet, caller: ProviderId, data_set_id: u64) -> Result<()> {
    if ds.storage_provider != caller {
        return Err(RegistryError::Unauthorized { data_set_id });
    }
    Ok(())
}

/// Check a full proof submission against the generated offsets.
///
/// Pure: reads the data set but mutates nothing, so a failure leaves
/// no trace.
fn verify_submission(
    ds: &DataSet,
    data_set_id: u64,
    offsets: &[u64],
    proofs: &[Proof],
) -> Result<()> {
    // The count check is against the configured K, not the drawn
    // offsets: with zero live leaves the draw comes up empty, and an
    // empty submission must not pass vacuously.
    let expected = ds.params.challenges_per_proof;
    if proofs.len() as u32 != expected {
        return Err(CoreError::WrongProofCount {
            expected,
            got: proofs.len() as u32,
        }
        .into());
    }
    // Exactly K proofs but no derivable challenges: the data set
    // holds no live leaves and cannot be proven at all.
    if offsets.len() as u32 != expected {
        return Err(RegistryError::EmptyDataSet { data_set_id });
    }

    for (i, (proof, &expected)) in proofs.iter().zip(offsets).enumerate() {
        if proof.leaf_offset != expected {
            return Err(CoreError::ChallengeMismatch {
                index: i as u32,
                expected,
                got: proof.leaf_offset,
            }
            .into());
        }

        let (slot, local_offset) = ds.index.resolve(expected)?;
        let committed_root = ds.pieces[slot as usize].commitment;
        if !merkle::verify_proof(&proof.leaf, local_offset, &proof.siblings, &committed_root) {
            debug!(
                proof_index = i,
                piece_slot = slot,
                local_offset,
                root = %hex::encode(committed_root),
                "Merkle path does not recompute to committed root"
            );
            return Err(CoreError::ProofVerificationFailed {
                index: i as u32,
                slot,
            }
            .into());
        }
    }
    Ok(())
}
