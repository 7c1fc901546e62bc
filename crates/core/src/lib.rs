pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    monthly_data::MonthlyData, settings::Settings, summary::LedgerSummary,
    transaction::Transaction,
};
use services::{
    ledger_service::LedgerService,
    report_service::{ReportService, SummaryReport},
};
use storage::{
    dataset::DatasetLoader,
    selection::{resolve_initial_month, SelectionStore},
};
use tracing::info;

use errors::CoreError;

/// Main entry point for the Stock Ledger core library.
/// Holds the transaction dataset, host settings, and the services that work on them.
#[must_use]
pub struct StockLedger {
    data: MonthlyData,
    settings: Settings,
    ledger_service: LedgerService,
    report_service: ReportService,
}

impl std::fmt::Debug for StockLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockLedger")
            .field("months", &self.data.len())
            .field("transactions", &self.data.transaction_count())
            .field("settings", &self.settings)
            .finish()
    }
}

impl StockLedger {
    /// Wrap a dataset with default settings.
    /// Every transaction is validated first.
    pub fn new(data: MonthlyData) -> Result<Self, CoreError> {
        Self::with_settings(data, Settings::default())
    }

    /// Wrap a dataset with custom settings. Settings and transactions are validated first.
    pub fn with_settings(data: MonthlyData, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        data.validate()?;
        Ok(Self::build(data, settings))
    }

    /// Parse a JSON dataset (`{"January": [...], ...}`).
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Self::new(DatasetLoader::from_json_str(json)?)
    }

    /// Load a JSON dataset from disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        Self::new(DatasetLoader::from_file(path)?)
    }

    /// Group a flat list of dated transactions into calendar months.
    pub fn from_dated_transactions(transactions: Vec<Transaction>) -> Result<Self, CoreError> {
        Self::new(MonthlyData::from_dated_transactions(transactions)?)
    }

    // ── Dataset ─────────────────────────────────────────────────────

    /// Month names in walk order (what a month selector lists).
    #[must_use]
    pub fn months(&self) -> Vec<&str> {
        self.data.months()
    }

    #[must_use]
    pub fn data(&self) -> &MonthlyData {
        &self.data
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Export the dataset as pretty JSON, months in walk order.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        DatasetLoader::to_json(&self.data)
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Compute the cumulative summary up to and including `month`.
    pub fn summary(&self, month: &str) -> Result<LedgerSummary, CoreError> {
        self.ledger_service.compute_summary(&self.data, month)
    }

    /// Compute the summary for `month` and format it for display.
    pub fn report(&self, month: &str) -> Result<SummaryReport, CoreError> {
        let summary = self.summary(month)?;
        Ok(self.report_service.build_report(&summary))
    }

    /// Plain-text report for `month`.
    pub fn render_text(&self, month: &str) -> Result<String, CoreError> {
        let summary = self.summary(month)?;
        Ok(self.render_summary(&summary))
    }

    /// Plain-text report for an already computed summary.
    #[must_use]
    pub fn render_summary(&self, summary: &LedgerSummary) -> String {
        let report = self.report_service.build_report(summary);
        self.report_service.render_text(&report)
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Select a month: compute its summary and remember the choice in `store`.
    /// Nothing is persisted if the month is unknown.
    pub fn select_month(
        &self,
        store: &mut dyn SelectionStore,
        month: &str,
    ) -> Result<LedgerSummary, CoreError> {
        let summary = self.summary(month)?;
        store.set(&self.settings.selection_key, month)?;
        info!(month, "selected month");
        Ok(summary)
    }

    /// Month to open on startup, restored from `store` when still valid.
    pub fn restore_selection(&self, store: &dyn SelectionStore) -> Result<Option<String>, CoreError> {
        resolve_initial_month(store, &self.data, &self.settings)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(data: MonthlyData, settings: Settings) -> Self {
        let report_service = ReportService::new(&settings);
        Self {
            data,
            settings,
            ledger_service: LedgerService::new(),
            report_service,
        }
    }
}
