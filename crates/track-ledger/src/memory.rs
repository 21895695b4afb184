use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use track_types::{BatchId, EntityKind, ItemId, ItemStatus, PrincipalId};

use crate::allocator::IdAllocator;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::guard::OwnershipGuard;
use crate::records::{BatchRecord, ItemRecord};
use crate::snapshot::{LedgerSnapshot, SnapshotError};
use crate::traits::{LedgerReader, LedgerWriter};
use crate::transition::TransitionEngine;
use crate::validation::StateValidator;

/// In-memory ledger implementation for tests, local demos, and embedding.
///
/// All state lives behind a single `RwLock`. An operation takes the write
/// lock once, validates everything it needs, and only then mutates, so the
/// state left behind by a failed call is indistinguishable from the state
/// before it. The host is expected to serialize writers; the lock makes
/// interleaved readers safe, not concurrent writers fast.
pub struct InMemoryLedger {
    config: LedgerConfig,
    transitions: TransitionEngine,
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    allocator: IdAllocator,
    items: BTreeMap<ItemId, ItemRecord>,
    batches: BTreeMap<BatchId, BatchRecord>,
}

impl InMemoryLedger {
    pub fn new(config: LedgerConfig) -> Self {
        let transitions = TransitionEngine::from_config(&config);
        Self {
            config,
            transitions,
            inner: RwLock::new(LedgerState::default()),
        }
    }

    /// The configuration this ledger was built with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Capture the full ledger state as a detached snapshot.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.inner.read().expect("lock poisoned");
        LedgerSnapshot {
            items_issued: state.allocator.last_issued(EntityKind::Item),
            batches_issued: state.allocator.last_issued(EntityKind::Batch),
            items: state.items.clone(),
            batches: state.batches.clone(),
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// The snapshot is validated against `config` before any state is
    /// adopted; a snapshot that violates ledger invariants is refused
    /// wholesale.
    pub fn restore(config: LedgerConfig, snapshot: LedgerSnapshot) -> Result<Self, SnapshotError> {
        let report = StateValidator::validate(&snapshot, &config);
        if let Some(violation) = report.violations.first() {
            return Err(SnapshotError::Rejected {
                reason: violation.description.clone(),
            });
        }

        let transitions = TransitionEngine::from_config(&config);
        let state = LedgerState {
            allocator: IdAllocator::with_issued(snapshot.items_issued, snapshot.batches_issued),
            items: snapshot.items,
            batches: snapshot.batches,
        };

        debug!(
            items = state.items.len(),
            batches = state.batches.len(),
            "ledger restored from snapshot"
        );

        Ok(Self {
            config,
            transitions,
            inner: RwLock::new(state),
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl LedgerWriter for InMemoryLedger {
    fn create_item(&self, caller: &PrincipalId, metadata: &str) -> Result<ItemId, LedgerError> {
        check_metadata(metadata, self.config.max_metadata_chars)?;

        let mut state = self.inner.write().expect("lock poisoned");
        let id = ItemId::new(state.allocator.next(EntityKind::Item)?);
        state.items.insert(id, ItemRecord::new(caller.clone(), metadata));

        debug!(item = %id, owner = %caller, "item created");
        Ok(id)
    }

    fn transfer_ownership(
        &self,
        caller: &PrincipalId,
        item: ItemId,
        new_owner: &PrincipalId,
    ) -> Result<(), LedgerError> {
        let mut state = self.inner.write().expect("lock poisoned");
        let record = state.items.get_mut(&item).ok_or(LedgerError::NotFound {
            kind: EntityKind::Item,
            id: item.get(),
        })?;
        OwnershipGuard::ensure_owner(&record.owner, caller, EntityKind::Item, item.get())?;

        record.owner = new_owner.clone();

        debug!(item = %item, from = %caller, to = %new_owner, "ownership transferred");
        Ok(())
    }

    fn update_status(
        &self,
        caller: &PrincipalId,
        item: ItemId,
        new_status: ItemStatus,
    ) -> Result<(), LedgerError> {
        let mut state = self.inner.write().expect("lock poisoned");
        let record = state.items.get_mut(&item).ok_or(LedgerError::NotFound {
            kind: EntityKind::Item,
            id: item.get(),
        })?;
        OwnershipGuard::ensure_owner(&record.owner, caller, EntityKind::Item, item.get())?;
        self.transitions.check(record.status, new_status)?;

        let previous = record.status;
        record.status = new_status;

        debug!(item = %item, from = %previous, to = %new_status, "status updated");
        Ok(())
    }

    fn create_batch(&self, caller: &PrincipalId, items: &[ItemId]) -> Result<BatchId, LedgerError> {
        check_batch_members(items, self.config.max_batch_items)?;

        let mut state = self.inner.write().expect("lock poisoned");
        // Members are checked in list order so the reported missing id is
        // deterministic.
        for member in items {
            if !state.items.contains_key(member) {
                return Err(LedgerError::NotFound {
                    kind: EntityKind::Item,
                    id: member.get(),
                });
            }
        }

        let id = BatchId::new(state.allocator.next(EntityKind::Batch)?);
        state
            .batches
            .insert(id, BatchRecord::new(caller.clone(), items.to_vec()));

        debug!(batch = %id, owner = %caller, members = items.len(), "batch created");
        Ok(id)
    }
}

impl LedgerReader for InMemoryLedger {
    fn get_item(&self, id: ItemId) -> Option<ItemRecord> {
        let state = self.inner.read().expect("lock poisoned");
        state.items.get(&id).cloned()
    }

    fn get_batch(&self, id: BatchId) -> Option<BatchRecord> {
        let state = self.inner.read().expect("lock poisoned");
        state.batches.get(&id).cloned()
    }

    fn item_count(&self) -> u64 {
        let state = self.inner.read().expect("lock poisoned");
        state.allocator.last_issued(EntityKind::Item)
    }

    fn batch_count(&self) -> u64 {
        let state = self.inner.read().expect("lock poisoned");
        state.allocator.last_issued(EntityKind::Batch)
    }

    fn item_ids(&self) -> Vec<ItemId> {
        let state = self.inner.read().expect("lock poisoned");
        state.items.keys().copied().collect()
    }

    fn batch_ids(&self) -> Vec<BatchId> {
        let state = self.inner.read().expect("lock poisoned");
        state.batches.keys().copied().collect()
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read().expect("lock poisoned");
        f.debug_struct("InMemoryLedger")
            .field("items", &state.items.len())
            .field("batches", &state.batches.len())
            .finish()
    }
}

fn check_metadata(metadata: &str, max_chars: usize) -> Result<(), LedgerError> {
    if metadata.is_empty() {
        return Err(LedgerError::InvalidInput {
            reason: "metadata must not be empty".into(),
        });
    }
    let chars = metadata.chars().count();
    if chars > max_chars {
        return Err(LedgerError::InvalidInput {
            reason: format!("metadata is {chars} characters, limit is {max_chars}"),
        });
    }
    Ok(())
}

fn check_batch_members(items: &[ItemId], max_items: usize) -> Result<(), LedgerError> {
    if items.is_empty() {
        return Err(LedgerError::InvalidInput {
            reason: "batch must contain at least one item".into(),
        });
    }
    if items.len() > max_items {
        return Err(LedgerError::InvalidInput {
            reason: format!("batch has {} members, limit is {max_items}", items.len()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployer() -> PrincipalId {
        PrincipalId::account("deployer")
    }

    fn wallet(n: u8) -> PrincipalId {
        PrincipalId::account(format!("wallet_{n}"))
    }

    // -----------------------------------------------------------------------
    // Item creation
    // -----------------------------------------------------------------------

    #[test]
    fn item_ids_start_at_one_and_increase() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        assert_eq!(ledger.create_item(&owner, "first").unwrap(), ItemId::new(1));
        assert_eq!(ledger.create_item(&owner, "second").unwrap(), ItemId::new(2));
        assert_eq!(ledger.create_item(&owner, "third").unwrap(), ItemId::new(3));
        assert_eq!(ledger.item_count(), 3);
    }

    #[test]
    fn created_item_is_owned_unmodified_and_initial() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let id = ledger.create_item(&owner, "Test Item #1").unwrap();
        let record = ledger.get_item(id).unwrap();

        assert_eq!(record.owner, owner);
        assert_eq!(record.metadata, "Test Item #1");
        assert_eq!(record.status, ItemStatus::Created);
    }

    #[test]
    fn missing_item_reads_as_none() {
        let ledger = InMemoryLedger::default();
        assert!(ledger.get_item(ItemId::new(99)).is_none());
    }

    #[test]
    fn empty_metadata_is_rejected_without_consuming_an_id() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let error = ledger.create_item(&owner, "").unwrap_err();
        assert_eq!(
            error,
            LedgerError::InvalidInput {
                reason: "metadata must not be empty".into()
            }
        );
        assert_eq!(ledger.item_count(), 0);

        // The failed creation did not burn an id.
        assert_eq!(ledger.create_item(&owner, "ok").unwrap(), ItemId::new(1));
    }

    #[test]
    fn oversized_metadata_is_rejected_without_consuming_an_id() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let oversized = "x".repeat(257);
        assert!(matches!(
            ledger.create_item(&owner, &oversized).unwrap_err(),
            LedgerError::InvalidInput { .. }
        ));
        assert_eq!(ledger.create_item(&owner, "ok").unwrap(), ItemId::new(1));
    }

    #[test]
    fn metadata_bound_counts_characters_not_bytes() {
        let ledger = InMemoryLedger::default();
        // 256 two-byte characters: within the character bound.
        let metadata = "é".repeat(256);
        assert!(ledger.create_item(&deployer(), &metadata).is_ok());
    }

    #[test]
    fn whitespace_metadata_is_content() {
        let ledger = InMemoryLedger::default();
        assert!(ledger.create_item(&deployer(), "   ").is_ok());
    }

    // -----------------------------------------------------------------------
    // Ownership transfer
    // -----------------------------------------------------------------------

    #[test]
    fn owner_transfers_and_authority_follows() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let carrier = wallet(1);

        let id = ledger.create_item(&owner, "parcel").unwrap();
        ledger.transfer_ownership(&owner, id, &carrier).unwrap();

        assert_eq!(ledger.get_item(id).unwrap().owner, carrier);

        // The previous owner lost all authority over the item.
        let error = ledger.transfer_ownership(&owner, id, &owner).unwrap_err();
        assert_eq!(
            error,
            LedgerError::Unauthorized {
                kind: EntityKind::Item,
                id: id.get()
            }
        );

        // And the new owner can pass it on.
        ledger.transfer_ownership(&carrier, id, &wallet(2)).unwrap();
        assert_eq!(ledger.get_item(id).unwrap().owner, wallet(2));
    }

    #[test]
    fn transfer_of_missing_item_is_not_found() {
        let ledger = InMemoryLedger::default();
        let error = ledger
            .transfer_ownership(&deployer(), ItemId::new(5), &wallet(1))
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::NotFound {
                kind: EntityKind::Item,
                id: 5
            }
        );
    }

    #[test]
    fn transfer_to_self_is_a_legal_no_op() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let id = ledger.create_item(&owner, "kept").unwrap();
        ledger.transfer_ownership(&owner, id, &owner).unwrap();
        assert_eq!(ledger.get_item(id).unwrap().owner, owner);
    }

    // -----------------------------------------------------------------------
    // Status updates
    // -----------------------------------------------------------------------

    #[test]
    fn owner_advances_status() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let id = ledger.create_item(&owner, "parcel").unwrap();
        ledger.update_status(&owner, id, ItemStatus::InTransit).unwrap();
        assert_eq!(ledger.get_item(id).unwrap().status, ItemStatus::InTransit);

        ledger.update_status(&owner, id, ItemStatus::Delivered).unwrap();
        assert_eq!(ledger.get_item(id).unwrap().status, ItemStatus::Delivered);
    }

    #[test]
    fn status_update_requires_current_ownership() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let carrier = wallet(1);

        let id = ledger.create_item(&owner, "parcel").unwrap();
        ledger.transfer_ownership(&owner, id, &carrier).unwrap();

        let error = ledger
            .update_status(&owner, id, ItemStatus::InTransit)
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::Unauthorized {
                kind: EntityKind::Item,
                id: id.get()
            }
        );
        // The refused update left the status alone.
        assert_eq!(ledger.get_item(id).unwrap().status, ItemStatus::Created);
    }

    #[test]
    fn status_never_moves_backward_or_repeats() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let id = ledger.create_item(&owner, "parcel").unwrap();
        ledger.update_status(&owner, id, ItemStatus::InTransit).unwrap();

        let repeat = ledger
            .update_status(&owner, id, ItemStatus::InTransit)
            .unwrap_err();
        assert_eq!(
            repeat,
            LedgerError::InvalidTransition {
                from: ItemStatus::InTransit,
                to: ItemStatus::InTransit
            }
        );

        let backward = ledger
            .update_status(&owner, id, ItemStatus::Created)
            .unwrap_err();
        assert_eq!(
            backward,
            LedgerError::InvalidTransition {
                from: ItemStatus::InTransit,
                to: ItemStatus::Created
            }
        );

        assert_eq!(ledger.get_item(id).unwrap().status, ItemStatus::InTransit);
    }

    #[test]
    fn skipping_a_stage_is_legal_by_default() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let id = ledger.create_item(&owner, "express").unwrap();
        ledger.update_status(&owner, id, ItemStatus::Delivered).unwrap();
        assert_eq!(ledger.get_item(id).unwrap().status, ItemStatus::Delivered);
    }

    #[test]
    fn adjacency_config_refuses_skips() {
        let ledger = InMemoryLedger::new(LedgerConfig::strict());
        let owner = deployer();

        let id = ledger.create_item(&owner, "slow lane").unwrap();
        let error = ledger
            .update_status(&owner, id, ItemStatus::Delivered)
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::InvalidTransition {
                from: ItemStatus::Created,
                to: ItemStatus::Delivered
            }
        );

        ledger.update_status(&owner, id, ItemStatus::InTransit).unwrap();
        ledger.update_status(&owner, id, ItemStatus::Delivered).unwrap();
    }

    #[test]
    fn status_update_of_missing_item_is_not_found() {
        let ledger = InMemoryLedger::default();
        let error = ledger
            .update_status(&deployer(), ItemId::new(3), ItemStatus::InTransit)
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::NotFound {
                kind: EntityKind::Item,
                id: 3
            }
        );
    }

    // -----------------------------------------------------------------------
    // Batch creation
    // -----------------------------------------------------------------------

    #[test]
    fn batch_groups_existing_items() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let a = ledger.create_item(&owner, "Item #1").unwrap();
        let b = ledger.create_item(&owner, "Item #2").unwrap();

        let batch = ledger.create_batch(&owner, &[a, b]).unwrap();
        assert_eq!(batch, BatchId::new(1));

        let record = ledger.get_batch(batch).unwrap();
        assert_eq!(record.owner, owner);
        assert_eq!(record.items, vec![a, b]);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn missing_batch_reads_as_none() {
        let ledger = InMemoryLedger::default();
        assert!(ledger.get_batch(BatchId::new(1)).is_none());
    }

    #[test]
    fn empty_batch_is_rejected() {
        let ledger = InMemoryLedger::default();
        let error = ledger.create_batch(&deployer(), &[]).unwrap_err();
        assert_eq!(
            error,
            LedgerError::InvalidInput {
                reason: "batch must contain at least one item".into()
            }
        );
        assert_eq!(ledger.batch_count(), 0);
    }

    #[test]
    fn oversized_batch_is_rejected_before_member_checks() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let id = ledger.create_item(&owner, "only").unwrap();

        let members = vec![id; 11];
        assert!(matches!(
            ledger.create_batch(&owner, &members).unwrap_err(),
            LedgerError::InvalidInput { .. }
        ));
    }

    #[test]
    fn batch_at_the_member_bound_is_accepted() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let id = ledger.create_item(&owner, "only").unwrap();

        // Ten members sits exactly on the default bound.
        let batch = ledger.create_batch(&owner, &vec![id; 10]).unwrap();
        assert_eq!(ledger.get_batch(batch).unwrap().len(), 10);
    }

    #[test]
    fn batch_reports_first_missing_member_in_order() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let a = ledger.create_item(&owner, "real").unwrap();

        let error = ledger
            .create_batch(&owner, &[a, ItemId::new(7), ItemId::new(8)])
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::NotFound {
                kind: EntityKind::Item,
                id: 7
            }
        );

        // The failed creation burned no batch id.
        assert_eq!(ledger.batch_count(), 0);
        assert_eq!(ledger.create_batch(&owner, &[a]).unwrap(), BatchId::new(1));
    }

    #[test]
    fn batch_permits_duplicates_and_preserves_order() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let a = ledger.create_item(&owner, "a").unwrap();
        let b = ledger.create_item(&owner, "b").unwrap();

        let batch = ledger.create_batch(&owner, &[b, a, b]).unwrap();
        assert_eq!(ledger.get_batch(batch).unwrap().items, vec![b, a, b]);
    }

    #[test]
    fn batch_may_group_items_owned_by_others() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let other = wallet(1);

        // Membership is an existence check only: neither the member's
        // owner nor its lifecycle stage is consulted.
        let theirs = ledger.create_item(&other, "not mine").unwrap();
        ledger.update_status(&other, theirs, ItemStatus::InTransit).unwrap();

        let batch = ledger.create_batch(&owner, &[theirs]).unwrap();
        let record = ledger.get_batch(batch).unwrap();
        assert_eq!(record.owner, owner);
        assert_eq!(record.items, vec![theirs]);

        // Batching changed nothing about the member.
        let item = ledger.get_item(theirs).unwrap();
        assert_eq!(item.owner, other);
        assert_eq!(item.status, ItemStatus::InTransit);
    }

    #[test]
    fn batch_membership_never_touches_items() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let carrier = wallet(1);

        let a = ledger.create_item(&owner, "boxed").unwrap();
        let batch = ledger.create_batch(&owner, &[a]).unwrap();

        // The member is unchanged by batching, and the batch is unchanged
        // by later member activity.
        assert_eq!(ledger.get_item(a).unwrap().owner, owner);
        ledger.transfer_ownership(&owner, a, &carrier).unwrap();
        ledger.update_status(&carrier, a, ItemStatus::InTransit).unwrap();
        assert_eq!(ledger.get_batch(batch).unwrap().items, vec![a]);
        assert_eq!(ledger.get_batch(batch).unwrap().owner, owner);
    }

    #[test]
    fn id_listings_are_ascending() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        for n in 0..5 {
            ledger.create_item(&owner, format!("item {n}").as_str()).unwrap();
        }
        ledger.create_batch(&owner, &[ItemId::new(1)]).unwrap();
        ledger.create_batch(&owner, &[ItemId::new(2)]).unwrap();

        let items = ledger.item_ids();
        assert_eq!(items.len(), 5);
        assert!(items.windows(2).all(|w| w[0] < w[1]));

        let batches = ledger.batch_ids();
        assert_eq!(batches, vec![BatchId::new(1), BatchId::new(2)]);
    }

    // -----------------------------------------------------------------------
    // Concurrent read safety
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(InMemoryLedger::default());
        let owner = deployer();
        let id = ledger.create_item(&owner, "shared").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                let expected_owner = owner.clone();
                thread::spawn(move || {
                    let record = ledger.get_item(id).expect("item should exist");
                    assert_eq!(record.owner, expected_owner);
                    assert_eq!(record.status, ItemStatus::Created);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format_shows_counts() {
        let ledger = InMemoryLedger::default();
        ledger.create_item(&deployer(), "x").unwrap();
        let debug = format!("{ledger:?}");
        assert!(debug.contains("InMemoryLedger"));
        assert!(debug.contains("items"));
    }
}
