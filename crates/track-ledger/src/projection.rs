use std::collections::BTreeMap;

use track_types::{BatchId, ItemId, ItemStatus, PrincipalId};

use crate::traits::LedgerReader;

/// Aggregate counts over the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerStats {
    pub item_count: u64,
    pub batch_count: u64,
    /// Items per lifecycle stage. Stages with no items are absent.
    pub items_by_status: BTreeMap<ItemStatus, u64>,
}

/// Items and batches grouped by the principal that holds them.
///
/// Owners and the ids under them are ordered, so two builds over the same
/// state are identical.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HoldingsProjection {
    pub owners: BTreeMap<PrincipalId, OwnerHoldings>,
}

/// One owner's slice of the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct OwnerHoldings {
    /// Item ids currently owned, ascending.
    pub items: Vec<ItemId>,
    /// Batch ids created, ascending. Batch ownership never moves.
    pub batches: Vec<BatchId>,
}

/// Deterministic read-side projection builders.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    /// Aggregate counts, including a per-stage item breakdown.
    pub fn stats<R: LedgerReader>(reader: &R) -> LedgerStats {
        let mut items_by_status = BTreeMap::new();
        for id in reader.item_ids() {
            if let Some(record) = reader.get_item(id) {
                *items_by_status.entry(record.status).or_insert(0u64) += 1;
            }
        }

        LedgerStats {
            item_count: reader.item_count(),
            batch_count: reader.batch_count(),
            items_by_status,
        }
    }

    /// Current holdings, grouped by owner.
    pub fn holdings<R: LedgerReader>(reader: &R) -> HoldingsProjection {
        let mut owners: BTreeMap<PrincipalId, OwnerHoldings> = BTreeMap::new();

        for id in reader.item_ids() {
            if let Some(record) = reader.get_item(id) {
                owners.entry(record.owner).or_default().items.push(id);
            }
        }
        for id in reader.batch_ids() {
            if let Some(record) = reader.get_batch(id) {
                owners.entry(record.owner).or_default().batches.push(id);
            }
        }

        HoldingsProjection { owners }
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    use super::*;

    fn deployer() -> PrincipalId {
        PrincipalId::account("deployer")
    }

    fn carrier() -> PrincipalId {
        PrincipalId::account("carrier")
    }

    #[test]
    fn stats_break_items_down_by_stage() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();

        let a = ledger.create_item(&owner, "a").unwrap();
        let b = ledger.create_item(&owner, "b").unwrap();
        ledger.create_item(&owner, "c").unwrap();
        ledger.update_status(&owner, a, ItemStatus::InTransit).unwrap();
        ledger.update_status(&owner, b, ItemStatus::Delivered).unwrap();
        ledger.create_batch(&owner, &[a, b]).unwrap();

        let stats = ProjectionBuilder::stats(&ledger);
        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.batch_count, 1);
        assert_eq!(stats.items_by_status.get(&ItemStatus::Created), Some(&1));
        assert_eq!(stats.items_by_status.get(&ItemStatus::InTransit), Some(&1));
        assert_eq!(stats.items_by_status.get(&ItemStatus::Delivered), Some(&1));
    }

    #[test]
    fn empty_ledger_has_empty_stats() {
        let ledger = InMemoryLedger::default();
        let stats = ProjectionBuilder::stats(&ledger);
        assert_eq!(stats.item_count, 0);
        assert_eq!(stats.batch_count, 0);
        assert!(stats.items_by_status.is_empty());
    }

    #[test]
    fn holdings_follow_ownership_transfers() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        let carrier = carrier();

        let a = ledger.create_item(&owner, "moves").unwrap();
        let b = ledger.create_item(&owner, "stays").unwrap();
        let batch = ledger.create_batch(&owner, &[a, b]).unwrap();

        let before = ProjectionBuilder::holdings(&ledger);
        assert_eq!(before.owners[&owner].items, vec![a, b]);
        assert_eq!(before.owners[&owner].batches, vec![batch]);
        assert!(!before.owners.contains_key(&carrier));

        ledger.transfer_ownership(&owner, a, &carrier).unwrap();

        let after = ProjectionBuilder::holdings(&ledger);
        assert_eq!(after.owners[&owner].items, vec![b]);
        assert_eq!(after.owners[&carrier].items, vec![a]);
        // The batch stays with its creator regardless of member transfers.
        assert_eq!(after.owners[&owner].batches, vec![batch]);
    }

    #[test]
    fn holdings_builds_are_deterministic() {
        let ledger = InMemoryLedger::default();
        let owner = deployer();
        for n in 0..4 {
            ledger.create_item(&owner, format!("item {n}").as_str()).unwrap();
        }

        let first = ProjectionBuilder::holdings(&ledger);
        let second = ProjectionBuilder::holdings(&ledger);
        assert_eq!(first, second);
    }
}
