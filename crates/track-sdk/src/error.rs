use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("ledger error: {0}")]
    Ledger(#[from] track_ledger::LedgerError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] track_ledger::SnapshotError),
}

pub type SdkResult<T> = Result<T, SdkError>;
