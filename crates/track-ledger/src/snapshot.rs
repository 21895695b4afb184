//! Snapshot schema for host-side durability.
//!
//! The ledger itself is memory-resident. Hosts persist it by capturing a
//! [`LedgerSnapshot`], encoding it, and storing the bytes wherever they
//! keep state; restore validates before any state is adopted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use track_types::{BatchId, ItemId};

use crate::records::{BatchRecord, ItemRecord};

/// Complete, detached copy of ledger state.
///
/// The ordered maps make the encoding deterministic: equal states produce
/// equal bytes and equal digests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Highest item id ever issued.
    pub items_issued: u64,
    /// Highest batch id ever issued.
    pub batches_issued: u64,
    /// Every item record, keyed by id.
    pub items: BTreeMap<ItemId, ItemRecord>,
    /// Every batch record, keyed by id.
    pub batches: BTreeMap<BatchId, BatchRecord>,
}

impl LedgerSnapshot {
    /// A snapshot of a ledger that has issued nothing.
    pub fn empty() -> Self {
        Self {
            items_issued: 0,
            batches_issued: 0,
            items: BTreeMap::new(),
            batches: BTreeMap::new(),
        }
    }

    /// Compact binary encoding for storage.
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Decode bytes produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Content digest over the canonical JSON encoding.
    ///
    /// Suitable for change detection and integrity checks on stored
    /// snapshots.
    pub fn digest(&self) -> Result<[u8; 32], SnapshotError> {
        let encoded =
            serde_json::to_vec(self).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"track-snapshot-v1:");
        hasher.update(&encoded);
        Ok(*hasher.finalize().as_bytes())
    }
}

/// Errors produced by snapshot encoding, decoding, and restore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot encode failed: {0}")]
    Encode(String),

    #[error("snapshot decode failed: {0}")]
    Decode(String),

    #[error("snapshot rejected: {reason}")]
    Rejected { reason: String },
}
