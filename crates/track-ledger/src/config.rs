use serde::{Deserialize, Serialize};

/// Configuration for a ledger instance.
///
/// Bounds are enforced before any state changes, so an operation that
/// violates them fails without consuming an id or touching a record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Maximum metadata length in characters. Empty metadata is always
    /// rejected regardless of this bound.
    pub max_metadata_chars: usize,
    /// Maximum number of member ids in a batch. Empty batches are always
    /// rejected regardless of this bound.
    pub max_batch_items: usize,
    /// When `true`, status updates must move exactly one stage forward.
    /// When `false` (the default), any strictly forward move is legal,
    /// including skipping intermediate stages.
    pub require_adjacent_transitions: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_metadata_chars: 256,
            max_batch_items: 10,
            require_adjacent_transitions: false,
        }
    }
}

impl LedgerConfig {
    /// A configuration that forces items through every lifecycle stage
    /// one step at a time.
    pub fn strict() -> Self {
        Self {
            require_adjacent_transitions: true,
            ..Default::default()
        }
    }
}
