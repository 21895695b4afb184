use serde::{Deserialize, Serialize};

use track_types::EntityKind;

use crate::error::LedgerError;

/// Issues ledger-local entity ids.
///
/// Each entity kind draws from its own sequence. Sequences start at 1,
/// advance by exactly 1 per issued id, and never repeat a value. The
/// allocator only advances when an id is actually handed out: callers
/// validate everything else first, so a rejected operation leaves both
/// sequences where they were.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    items_issued: u64,
    batches_issued: u64,
}

impl IdAllocator {
    /// A fresh allocator. The first id issued for either kind is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an allocator from previously issued counts.
    pub fn with_issued(items_issued: u64, batches_issued: u64) -> Self {
        Self {
            items_issued,
            batches_issued,
        }
    }

    /// Issue the next id for `kind`.
    ///
    /// Fails with [`LedgerError::CounterOverflow`] once the sequence is
    /// exhausted. The sequence does not advance on failure.
    pub fn next(&mut self, kind: EntityKind) -> Result<u64, LedgerError> {
        let counter = self.counter_mut(kind);
        let issued = counter
            .checked_add(1)
            .ok_or(LedgerError::CounterOverflow { kind })?;
        *counter = issued;
        Ok(issued)
    }

    /// The most recently issued id for `kind`, or 0 if none has been issued.
    pub fn last_issued(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Item => self.items_issued,
            EntityKind::Batch => self.batches_issued,
        }
    }

    fn counter_mut(&mut self, kind: EntityKind) -> &mut u64 {
        match kind {
            EntityKind::Item => &mut self.items_issued,
            EntityKind::Batch => &mut self.batches_issued,
        }
    }
}
