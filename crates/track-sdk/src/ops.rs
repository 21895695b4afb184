use std::fmt;

use serde::{Deserialize, Serialize};

use track_ledger::LedgerError;
use track_types::{BatchId, ItemId, ItemStatus, PrincipalId};

/// Unique identifier for a submission (UUID v7 for time-ordering).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(uuid::Uuid);

impl SubmissionId {
    /// Generate a new time-ordered submission ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubmissionId({})", self.short_id())
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single ledger mutation, described as data.
///
/// Hosts queue these and hand them to `Tracker::submit`; the caller is
/// attached per operation, so one submission can interleave principals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    CreateItem { metadata: String },
    TransferOwnership { item: ItemId, new_owner: PrincipalId },
    UpdateStatus { item: ItemId, new_status: ItemStatus },
    CreateBatch { items: Vec<ItemId> },
}

/// What a successful operation produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpOutcome {
    ItemCreated { item: ItemId },
    OwnershipTransferred { item: ItemId, new_owner: PrincipalId },
    StatusUpdated { item: ItemId, new_status: ItemStatus },
    BatchCreated { batch: BatchId },
}

/// Result of one operation within a submission.
///
/// Operations succeed or fail independently; a failure is recorded here
/// as a value and the submission carries on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpReceipt {
    /// Position within the submission, starting at 0.
    pub index: usize,
    pub caller: PrincipalId,
    pub operation: Operation,
    pub result: Result<OpOutcome, LedgerError>,
}

impl OpReceipt {
    /// Returns `true` if the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// An ordered group of operations for `Tracker::submit`.
#[derive(Clone, Debug, Default)]
pub struct Submission {
    ops: Vec<(PrincipalId, Operation)>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary operation on behalf of `caller`.
    pub fn op(mut self, caller: &PrincipalId, operation: Operation) -> Self {
        self.ops.push((caller.clone(), operation));
        self
    }

    pub fn create_item(self, caller: &PrincipalId, metadata: impl Into<String>) -> Self {
        self.op(
            caller,
            Operation::CreateItem {
                metadata: metadata.into(),
            },
        )
    }

    pub fn transfer_ownership(
        self,
        caller: &PrincipalId,
        item: ItemId,
        new_owner: &PrincipalId,
    ) -> Self {
        self.op(
            caller,
            Operation::TransferOwnership {
                item,
                new_owner: new_owner.clone(),
            },
        )
    }

    pub fn update_status(self, caller: &PrincipalId, item: ItemId, new_status: ItemStatus) -> Self {
        self.op(caller, Operation::UpdateStatus { item, new_status })
    }

    pub fn create_batch(self, caller: &PrincipalId, items: Vec<ItemId>) -> Self {
        self.op(caller, Operation::CreateBatch { items })
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn into_ops(self) -> Vec<(PrincipalId, Operation)> {
        self.ops
    }
}

/// Result of applying a submission: one receipt per operation, in order.
#[derive(Clone, Debug)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub receipts: Vec<OpReceipt>,
}

impl SubmissionReceipt {
    /// Returns `true` if every operation succeeded.
    pub fn all_ok(&self) -> bool {
        self.receipts.iter().all(OpReceipt::is_ok)
    }

    /// Number of operations that succeeded.
    pub fn ok_count(&self) -> usize {
        self.receipts.iter().filter(|r| r.is_ok()).count()
    }

    /// Number of operations that failed.
    pub fn err_count(&self) -> usize {
        self.receipts.len() - self.ok_count()
    }
}
