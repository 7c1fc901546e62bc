use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::CoreError;
use crate::models::monthly_data::MonthlyData;
use crate::models::settings::Settings;

/// Minimal key-value persistence for host UI state (the selected month).
///
/// The ledger itself never reads from a store; hosts restore a value at
/// startup and pass it in explicitly.
pub trait SelectionStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySelectionStore {
    values: HashMap<String, String>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a small JSON object file (`{"selectedMonth": "March"}`).
///
/// Read once on open, rewritten in full on every `set`. A missing file is
/// an empty store.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSelectionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "selection state file is unreadable, starting empty"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SelectionStore for FileSelectionStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize selection state: {e}")))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Pick the month to open on startup.
///
/// Order of preference: the stored selection, `settings.default_month`, the
/// first month of the dataset. Values that do not name a month in `data` are
/// skipped. Returns `None` only for an empty dataset.
pub fn resolve_initial_month(
    store: &dyn SelectionStore,
    data: &MonthlyData,
    settings: &Settings,
) -> Result<Option<String>, CoreError> {
    if let Some(stored) = store.get(&settings.selection_key)? {
        if data.contains_month(&stored) {
            return Ok(Some(stored));
        }
        warn!(month = %stored, "stored selection is not in the dataset, ignoring it");
    }

    if data.contains_month(&settings.default_month) {
        return Ok(Some(settings.default_month.clone()));
    }

    Ok(data.first_month().map(str::to_string))
}
