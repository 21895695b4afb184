//! Item lifecycle statuses.
//!
//! Statuses form a closed total order. Items enter the ledger at the first
//! stage and only ever move forward; the ordering of the variants below is
//! the ordering the transition rules enforce.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Lifecycle stage of a tracked item.
///
/// The numeric codes are the wire representation: serialization uses the
/// code, not the variant name, so stored state stays stable if a variant
/// is ever renamed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ItemStatus {
    /// Registered with the ledger, still held by its creator.
    Created = 1,
    /// Handed off and moving between custodians.
    InTransit = 2,
    /// Reached its final custodian. No further transitions exist.
    Delivered = 3,
}

impl ItemStatus {
    /// The stage every newly created item starts in.
    pub const fn initial() -> Self {
        Self::Created
    }

    /// The numeric wire code for this stage.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a numeric wire code back to a stage.
    pub fn from_code(code: u8) -> Result<Self, TypeError> {
        match code {
            1 => Ok(Self::Created),
            2 => Ok(Self::InTransit),
            3 => Ok(Self::Delivered),
            other => Err(TypeError::UnknownStatusCode(other)),
        }
    }

    /// Returns `true` if no stage follows this one.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// All stages in forward order.
    pub const fn all() -> [ItemStatus; 3] {
        [Self::Created, Self::InTransit, Self::Delivered]
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::InTransit => "in-transit",
            Self::Delivered => "delivered",
        };
        write!(f, "{name}")
    }
}

impl TryFrom<u8> for ItemStatus {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<ItemStatus> for u8 {
    fn from(status: ItemStatus) -> Self {
        status.code()
    }
}
