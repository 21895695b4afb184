use track_types::ItemStatus;

use crate::config::LedgerConfig;
use crate::error::LedgerError;

/// Lifecycle transition rules.
///
/// Statuses form a total order and items only ever move forward through
/// it. By default any strictly forward move is legal, including moves
/// that skip intermediate stages; a ledger configured for adjacency
/// accepts only single-step moves.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEngine {
    require_adjacent: bool,
}

impl TransitionEngine {
    pub fn new(require_adjacent: bool) -> Self {
        Self { require_adjacent }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.require_adjacent_transitions)
    }

    /// Check whether an item currently at `from` may move to `to`.
    ///
    /// Same-status moves and backward moves are always refused. With
    /// adjacency required, forward skips are refused as well.
    pub fn check(&self, from: ItemStatus, to: ItemStatus) -> Result<(), LedgerError> {
        if to <= from {
            return Err(LedgerError::InvalidTransition { from, to });
        }
        if self.require_adjacent && to.code() != from.code() + 1 {
            return Err(LedgerError::InvalidTransition { from, to });
        }
        Ok(())
    }
}
