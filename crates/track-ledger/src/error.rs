use track_types::{EntityKind, ItemStatus};

/// Errors produced by ledger operations.
///
/// Every failure an operation can report is one of these five kinds. They
/// are ordinary values: the ledger never panics on a failed operation, and
/// a failed operation leaves no partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    #[error("caller does not own {kind} {id}")]
    Unauthorized { kind: EntityKind, id: u64 },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: ItemStatus, to: ItemStatus },

    #[error("{kind} id counter exhausted")]
    CounterOverflow { kind: EntityKind },
}
