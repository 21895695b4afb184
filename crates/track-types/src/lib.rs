//! Foundation types for the Track Ledger.
//!
//! This crate provides the identity, identifier, and lifecycle types used
//! throughout the tracking system. Every other track crate depends on
//! `track-types`.
//!
//! # Key Types
//!
//! - [`PrincipalId`] — Opaque caller identity derived from account material
//! - [`ItemId`] / [`BatchId`] — Ledger-assigned entity identifiers
//! - [`EntityKind`] — Which id sequence an entity belongs to
//! - [`ItemStatus`] — Ordered lifecycle stages for tracked items

pub mod error;
pub mod id;
pub mod principal;
pub mod status;

pub use error::TypeError;
pub use id::{BatchId, EntityKind, ItemId};
pub use principal::{PrincipalId, PrincipalMaterial};
pub use status::ItemStatus;
