use tracing::debug;

use crate::errors::CoreError;
use crate::models::monthly_data::MonthlyData;

/// Loads transaction datasets shaped as `{ "January": [ {...}, ... ], ... }`.
///
/// The object's key order becomes the month order of the ledger walk.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parse and validate a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<MonthlyData, CoreError> {
        let data: MonthlyData = serde_json::from_str(json)?;
        data.validate()?;
        debug!(
            months = data.len(),
            transactions = data.transaction_count(),
            "loaded dataset"
        );
        Ok(data)
    }

    /// Parse and validate a dataset from raw JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<MonthlyData, CoreError> {
        let json = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::Deserialization(format!("Dataset is not valid UTF-8: {e}")))?;
        Self::from_json_str(json)
    }

    /// Load a dataset from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<MonthlyData, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::from_json_bytes(&bytes)
    }

    /// Serialize a dataset back to pretty JSON, months in their current order.
    pub fn to_json(data: &MonthlyData) -> Result<String, CoreError> {
        serde_json::to_string_pretty(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize dataset: {e}")))
    }
}
