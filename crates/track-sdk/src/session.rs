use tracing::{debug, info};

use track_ledger::{
    BatchRecord, HoldingsProjection, InMemoryLedger, ItemRecord, LedgerConfig, LedgerError,
    LedgerReader, LedgerSnapshot, LedgerStats, LedgerWriter, ProjectionBuilder, StateValidator,
    ValidationReport,
};
use track_types::{BatchId, ItemId, ItemStatus, PrincipalId};

use crate::error::SdkResult;
use crate::ops::{OpOutcome, OpReceipt, Operation, Submission, SubmissionId, SubmissionReceipt};

/// High-level tracking API.
///
/// Owns an in-memory ledger and exposes the surface hosts embed: typed
/// single operations, grouped submissions with per-operation receipts,
/// read-side projections, and snapshot capture/restore.
#[derive(Debug)]
pub struct Tracker {
    ledger: InMemoryLedger,
}

impl Tracker {
    /// Start a tracker with the default configuration.
    pub fn init() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Start a tracker with a specific configuration.
    pub fn with_config(config: LedgerConfig) -> Self {
        info!("tracker initialized");
        Self {
            ledger: InMemoryLedger::new(config),
        }
    }

    /// Adopt previously captured state. The snapshot is validated before
    /// any of it is adopted.
    pub fn restore(config: LedgerConfig, snapshot: LedgerSnapshot) -> SdkResult<Self> {
        let ledger = InMemoryLedger::restore(config, snapshot)?;
        info!("tracker restored from snapshot");
        Ok(Self { ledger })
    }

    // ---- Item operations ----

    pub fn create_item(&self, caller: &PrincipalId, metadata: &str) -> SdkResult<ItemId> {
        Ok(self.ledger.create_item(caller, metadata)?)
    }

    pub fn get_item(&self, id: ItemId) -> Option<ItemRecord> {
        self.ledger.get_item(id)
    }

    pub fn transfer_ownership(
        &self,
        caller: &PrincipalId,
        item: ItemId,
        new_owner: &PrincipalId,
    ) -> SdkResult<()> {
        Ok(self.ledger.transfer_ownership(caller, item, new_owner)?)
    }

    pub fn update_status(
        &self,
        caller: &PrincipalId,
        item: ItemId,
        new_status: ItemStatus,
    ) -> SdkResult<()> {
        Ok(self.ledger.update_status(caller, item, new_status)?)
    }

    // ---- Batch operations ----

    pub fn create_batch(&self, caller: &PrincipalId, items: &[ItemId]) -> SdkResult<BatchId> {
        Ok(self.ledger.create_batch(caller, items)?)
    }

    pub fn get_batch(&self, id: BatchId) -> Option<BatchRecord> {
        self.ledger.get_batch(id)
    }

    // ---- Grouped submissions ----

    /// Apply a submission's operations in order.
    ///
    /// Each operation succeeds or fails on its own: a failed operation
    /// changes nothing, and the submission simply moves on to the next
    /// one. The returned receipt records one result per operation, in
    /// submission order.
    pub fn submit(&self, submission: Submission) -> SubmissionReceipt {
        let id = SubmissionId::new();
        let ops = submission.into_ops();
        debug!(submission = %id, ops = ops.len(), "applying submission");

        let receipts = ops
            .into_iter()
            .enumerate()
            .map(|(index, (caller, operation))| {
                let result = self.apply(&caller, &operation);
                OpReceipt {
                    index,
                    caller,
                    operation,
                    result,
                }
            })
            .collect();

        SubmissionReceipt { id, receipts }
    }

    fn apply(
        &self,
        caller: &PrincipalId,
        operation: &Operation,
    ) -> Result<OpOutcome, LedgerError> {
        match operation {
            Operation::CreateItem { metadata } => self
                .ledger
                .create_item(caller, metadata)
                .map(|item| OpOutcome::ItemCreated { item }),
            Operation::TransferOwnership { item, new_owner } => self
                .ledger
                .transfer_ownership(caller, *item, new_owner)
                .map(|()| OpOutcome::OwnershipTransferred {
                    item: *item,
                    new_owner: new_owner.clone(),
                }),
            Operation::UpdateStatus { item, new_status } => self
                .ledger
                .update_status(caller, *item, *new_status)
                .map(|()| OpOutcome::StatusUpdated {
                    item: *item,
                    new_status: *new_status,
                }),
            Operation::CreateBatch { items } => self
                .ledger
                .create_batch(caller, items)
                .map(|batch| OpOutcome::BatchCreated { batch }),
        }
    }

    // ---- Read-side projections ----

    pub fn stats(&self) -> LedgerStats {
        ProjectionBuilder::stats(&self.ledger)
    }

    pub fn holdings(&self) -> HoldingsProjection {
        ProjectionBuilder::holdings(&self.ledger)
    }

    pub fn item_count(&self) -> u64 {
        self.ledger.item_count()
    }

    pub fn batch_count(&self) -> u64 {
        self.ledger.batch_count()
    }

    // ---- State capture ----

    /// Capture the full ledger state for host-side persistence.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// Check current state against every ledger invariant.
    pub fn verify(&self) -> ValidationReport {
        StateValidator::validate(&self.ledger.snapshot(), self.ledger.config())
    }

    // ---- Accessors ----

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::init()
    }
}
