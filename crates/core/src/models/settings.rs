use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Upper bound for `decimal_places`; anything beyond is noise for money.
pub const MAX_DECIMAL_PLACES: usize = 8;

/// Host-side settings: which month to open by default, how to print money,
/// and under which key the last selected month is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Month opened when nothing (valid) has been stored yet
    pub default_month: String,

    /// Prefix for formatted amounts (e.g. "$")
    pub currency_symbol: String,

    /// Fraction digits for formatted amounts
    pub decimal_places: usize,

    /// Key of the persisted selected month in a `SelectionStore`
    pub selection_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_month: "January".to_string(),
            currency_symbol: "$".to_string(),
            decimal_places: 2,
            selection_key: "selectedMonth".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(CoreError::ValidationError(format!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.decimal_places
            )));
        }
        if self.selection_key.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "selection_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}
