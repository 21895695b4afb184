//! High-level SDK for the Track Ledger.
//!
//! Provides a unified API for programmatic access to the tracking ledger.
//! This is the main entry point for applications embedding the ledger.

pub mod error;
pub mod ops;
pub mod session;

pub use error::{SdkError, SdkResult};
pub use ops::{OpOutcome, OpReceipt, Operation, Submission, SubmissionId, SubmissionReceipt};
pub use session::Tracker;

// Re-export key types
pub use track_types::{BatchId, EntityKind, ItemId, ItemStatus, PrincipalId};
pub use track_ledger::{
    BatchRecord, ItemRecord, LedgerConfig, LedgerError, LedgerSnapshot, ValidationReport,
};
