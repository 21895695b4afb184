//! Item and batch tracking ledger core.
//!
//! This crate is the heart of the tracking system. It provides:
//! - Per-kind id allocation with strictly increasing, never-reused ids
//! - Item records with ownership-gated transfer and forward-only status
//! - Immutable item batches with creation-time membership checks
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger` implementation for tests and embedding
//! - Snapshot capture/restore with invariant validation
//! - Projection builders (stats, holdings by owner)

pub mod allocator;
pub mod config;
pub mod error;
pub mod guard;
pub mod memory;
pub mod projection;
pub mod records;
pub mod snapshot;
pub mod traits;
pub mod transition;
pub mod validation;

pub use allocator::IdAllocator;
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use guard::OwnershipGuard;
pub use memory::InMemoryLedger;
pub use projection::{HoldingsProjection, LedgerStats, OwnerHoldings, ProjectionBuilder};
pub use records::{BatchRecord, ItemRecord};
pub use snapshot::{LedgerSnapshot, SnapshotError};
pub use traits::{LedgerReader, LedgerWriter};
pub use transition::TransitionEngine;
pub use validation::{StateValidator, ValidationReport, Violation, ViolationKind};
