use serde::{Deserialize, Serialize};

use track_types::{ItemId, ItemStatus, PrincipalId};

/// Stored state of a single tracked item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Current owner. Changes only through ownership transfer.
    pub owner: PrincipalId,
    /// Caller-supplied description, fixed at creation.
    pub metadata: String,
    /// Current lifecycle stage. Only moves forward.
    pub status: ItemStatus,
}

impl ItemRecord {
    /// A freshly registered item: owned by its creator, in the initial stage.
    pub fn new(owner: PrincipalId, metadata: impl Into<String>) -> Self {
        Self {
            owner,
            metadata: metadata.into(),
            status: ItemStatus::initial(),
        }
    }
}

/// Stored state of an item batch.
///
/// A batch is a fixed grouping: once created, its member list never
/// changes. Members keep their creation order, duplicates included, and
/// each member id resolved to a live item at the moment of creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// The caller that created the batch.
    pub owner: PrincipalId,
    /// Member item ids in creation order.
    pub items: Vec<ItemId>,
}

impl BatchRecord {
    pub fn new(owner: PrincipalId, items: Vec<ItemId>) -> Self {
        Self { owner, items }
    }

    /// Number of member ids, duplicates counted.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
