use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chart::ChartDataPoint;
use super::holding::HoldingPosition;
use super::transaction::{TradeType, Transaction};

/// Display text the original dashboard showed for a rejected sale.
pub const INSUFFICIENT_SHARES_LABEL: &str = "Error: Insufficient Shares";

/// Result of processing a single SELL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProfitOutcome {
    /// Realized profit (negative for a loss) at the average cost of the moment
    #[serde(rename = "ok")]
    Realized(f64),
    /// The sale exceeded the units held; nothing was booked
    InsufficientShares,
}

impl ProfitOutcome {
    /// The realized amount, if the sale went through.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            ProfitOutcome::Realized(v) => Some(*v),
            ProfitOutcome::InsufficientShares => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ProfitOutcome::InsufficientShares)
    }
}

impl std::fmt::Display for ProfitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfitOutcome::Realized(v) => write!(f, "{v}"),
            ProfitOutcome::InsufficientShares => f.write_str(INSUFFICIENT_SHARES_LABEL),
        }
    }
}

/// A transaction of the selected month, enriched with its outcome.
///
/// `profit` is `None` for BUYs: no realized profit concept applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<ProfitOutcome>,
}

impl AnnotatedTransaction {
    pub fn new(transaction: Transaction, profit: Option<ProfitOutcome>) -> Self {
        Self {
            transaction,
            profit,
        }
    }

    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.transaction.trade_type == TradeType::Sell
    }
}

/// Everything the dashboard shows for one selected month.
///
/// All aggregates are cumulative from the first month of the dataset through
/// `selected_month` inclusive. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Month this summary was computed for
    pub selected_month: String,

    /// Open positions keyed by symbol; closed positions are never listed
    pub holdings: BTreeMap<String, HoldingPosition>,

    /// Net cash effect: sale proceeds minus purchase costs
    pub cash_delta: f64,

    /// Sum of `quantity * price` over every BUY
    pub amount_purchased: f64,

    /// Sum of `quantity * price` over every accepted SELL
    pub amount_sold: f64,

    /// Sum of realized profit over every accepted SELL
    pub profit_loss: f64,

    /// `amount_purchased - amount_sold`
    pub remaining_in_shares: f64,

    /// The selected month's transactions, SELLs annotated with their outcome
    pub annotated_transactions: Vec<AnnotatedTransaction>,

    /// One point per processed month, first month through the selected one
    pub monthly_series: Vec<ChartDataPoint>,
}

impl LedgerSummary {
    /// Number of rejected sales in the selected month.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.annotated_transactions
            .iter()
            .filter(|t| t.profit.is_some_and(|p| p.is_error()))
            .count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    #[must_use]
    pub fn holding(&self, symbol: &str) -> Option<&HoldingPosition> {
        self.holdings.get(symbol)
    }
}
