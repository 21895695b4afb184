use track_types::{BatchId, ItemId, ItemStatus, PrincipalId};

use crate::error::LedgerError;
use crate::records::{BatchRecord, ItemRecord};

/// Write boundary for ledger mutations.
///
/// All implementations must satisfy these invariants:
/// - Operations are atomic: a failed operation leaves no trace, not even
///   a consumed id.
/// - Ids are issued strictly increasing per entity kind, starting at 1.
/// - Ownership-gated operations verify the caller before any change.
/// - Status changes only ever move forward through the lifecycle order.
/// - Batches are immutable once created and never affect their members.
pub trait LedgerWriter: Send + Sync {
    /// Register a new item owned by `caller`, in the initial lifecycle
    /// stage, and return its freshly issued id.
    ///
    /// Fails with `InvalidInput` if the metadata is empty or over the
    /// configured bound, and `CounterOverflow` if the item id sequence
    /// is exhausted.
    fn create_item(&self, caller: &PrincipalId, metadata: &str) -> Result<ItemId, LedgerError>;

    /// Reassign an item to `new_owner`. Only the current owner may do
    /// this; transferring to the current owner is a legal no-op.
    ///
    /// Fails with `NotFound` if the item does not exist and
    /// `Unauthorized` if `caller` is not the recorded owner.
    fn transfer_ownership(
        &self,
        caller: &PrincipalId,
        item: ItemId,
        new_owner: &PrincipalId,
    ) -> Result<(), LedgerError>;

    /// Move an item to a later lifecycle stage. Only the current owner
    /// may do this.
    ///
    /// Fails with `NotFound` if the item does not exist, `Unauthorized`
    /// if `caller` is not the recorded owner, and `InvalidTransition`
    /// if the move is not forward (or not adjacent, when the ledger is
    /// configured to require adjacency).
    fn update_status(
        &self,
        caller: &PrincipalId,
        item: ItemId,
        new_status: ItemStatus,
    ) -> Result<(), LedgerError>;

    /// Create an immutable batch grouping the given items, owned by
    /// `caller`, and return its freshly issued id. Member order is kept
    /// verbatim; duplicates are permitted.
    ///
    /// Fails with `InvalidInput` if the member list is empty or over the
    /// configured bound, `NotFound` naming the first member (in list
    /// order) that does not resolve to an item, and `CounterOverflow` if
    /// the batch id sequence is exhausted.
    fn create_batch(&self, caller: &PrincipalId, items: &[ItemId]) -> Result<BatchId, LedgerError>;
}

/// Read boundary for ledger queries.
///
/// Reads have no failure conditions: an absent entity is `None`, never an
/// error. Returned records are snapshots, detached from live state.
pub trait LedgerReader: Send + Sync {
    /// The item's current record, if it exists.
    fn get_item(&self, id: ItemId) -> Option<ItemRecord>;

    /// The batch's record, if it exists.
    fn get_batch(&self, id: BatchId) -> Option<BatchRecord>;

    /// Number of items ever created. Equal to the highest issued item id.
    fn item_count(&self) -> u64;

    /// Number of batches ever created. Equal to the highest issued batch id.
    fn batch_count(&self) -> u64;

    /// All item ids, ascending.
    fn item_ids(&self) -> Vec<ItemId>;

    /// All batch ids, ascending.
    fn batch_ids(&self) -> Vec<BatchId>;
}
