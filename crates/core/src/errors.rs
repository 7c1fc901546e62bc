use thiserror::Error;

/// Unified error type for the entire stock-ledger-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// Selling more shares than are held is NOT an error here: it is recorded
/// per transaction as [`ProfitOutcome::InsufficientShares`] and the walk
/// carries on.
///
/// [`ProfitOutcome::InsufficientShares`]: crate::models::summary::ProfitOutcome::InsufficientShares
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Unknown month: '{0}' is not present in the dataset")]
    UnknownMonth(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
