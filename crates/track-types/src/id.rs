use std::fmt;

use serde::{Deserialize, Serialize};

/// The two kinds of entities the ledger assigns ids to.
///
/// Items and batches draw from independent id sequences, so an `ItemId`
/// and a `BatchId` with the same raw value name unrelated entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Item,
    Batch,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Item => "item",
            Self::Batch => "batch",
        };
        write!(f, "{name}")
    }
}

/// Ledger-assigned identifier for a tracked item.
///
/// Item ids are issued in a strictly increasing sequence starting at 1.
/// An issued id is never reassigned, even if the operation that consumed
/// it later fails.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw id. Ids are normally issued by the ledger's allocator.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Ledger-assigned identifier for an item batch.
///
/// Batch ids are issued from their own sequence, independent of item ids.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BatchId(u64);

impl BatchId {
    /// Wrap a raw id. Ids are normally issued by the ledger's allocator.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BatchId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
