use serde::{Deserialize, Serialize};

use crate::models::chart::ChartDataPoint;
use crate::models::settings::Settings;
use crate::models::summary::{AnnotatedTransaction, LedgerSummary, ProfitOutcome};
use crate::models::transaction::TradeType;

/// Placeholder for a cell that does not apply to the row.
pub const EMPTY_CELL: &str = "-";

/// Colour hint for a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Gain,
    Loss,
}

/// One table row, every cell already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: String,
    pub symbol: String,
    pub trade_type: String,
    pub quantity: String,
    /// Unit price for BUYs, `-` otherwise
    pub purchase_price: String,
    /// Unit price for SELLs, `-` otherwise
    pub selling_price: String,
    /// `quantity * price`
    pub total: String,
    /// Realized profit, the insufficient-shares label, or `-`
    pub profit: String,
    /// Green for BUY, red for SELL
    pub trade_tone: Tone,
    /// Green only for a strictly positive realized profit
    pub profit_tone: Tone,
}

/// Display-ready rendition of a [`LedgerSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub title: String,
    pub amount_purchased: String,
    pub amount_sold: String,
    pub profit_loss: String,
    pub remaining_in_shares: String,
    /// `SYMBOL: qty` pairs joined with ", "
    pub shares_remaining: String,
    pub rows: Vec<TransactionRow>,
    pub chart: Vec<ChartDataPoint>,
}

/// Formats ledger summaries for presentation.
///
/// Rounding happens here and only here; the summary itself stays unrounded.
pub struct ReportService {
    currency_symbol: String,
    decimal_places: usize,
}

impl ReportService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            decimal_places: settings.decimal_places,
        }
    }

    /// `-18.0` → `-$18.00` with the default settings.
    #[must_use]
    pub fn format_currency(&self, value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        format!(
            "{sign}{}{:.*}",
            self.currency_symbol,
            self.decimal_places,
            value.abs()
        )
    }

    pub fn build_report(&self, summary: &LedgerSummary) -> SummaryReport {
        let shares_remaining = summary
            .holdings
            .iter()
            .map(|(symbol, position)| format!("{symbol}: {}", position.quantity))
            .collect::<Vec<_>>()
            .join(", ");

        SummaryReport {
            title: format!("Summary for {}", summary.selected_month),
            amount_purchased: self.format_currency(summary.amount_purchased),
            amount_sold: self.format_currency(summary.amount_sold),
            profit_loss: self.format_currency(summary.profit_loss),
            remaining_in_shares: self.format_currency(summary.remaining_in_shares),
            shares_remaining,
            rows: summary
                .annotated_transactions
                .iter()
                .map(|t| self.build_row(t))
                .collect(),
            chart: summary.monthly_series.clone(),
        }
    }

    fn build_row(&self, annotated: &AnnotatedTransaction) -> TransactionRow {
        let tx = &annotated.transaction;
        let price = self.format_currency(tx.price);
        let (purchase_price, selling_price, trade_tone) = match tx.trade_type {
            TradeType::Buy => (price, EMPTY_CELL.to_string(), Tone::Gain),
            TradeType::Sell => (EMPTY_CELL.to_string(), price, Tone::Loss),
        };

        let profit = match annotated.profit {
            Some(ProfitOutcome::Realized(v)) if v != 0.0 => self.format_currency(v),
            // A break-even sale shows no figure
            Some(ProfitOutcome::Realized(_)) => EMPTY_CELL.to_string(),
            Some(outcome @ ProfitOutcome::InsufficientShares) => outcome.to_string(),
            None => EMPTY_CELL.to_string(),
        };
        let profit_tone = match annotated.profit.and_then(|p| p.value()) {
            Some(v) if v > 0.0 => Tone::Gain,
            _ => Tone::Loss,
        };

        TransactionRow {
            date: tx.date.clone(),
            symbol: tx.symbol.clone(),
            trade_type: tx.trade_type.to_string(),
            quantity: tx.quantity.to_string(),
            purchase_price,
            selling_price,
            total: self.format_currency(tx.notional()),
            profit,
            trade_tone,
            profit_tone,
        }
    }

    /// Plain-text rendition for terminals and logs.
    #[must_use]
    pub fn render_text(&self, report: &SummaryReport) -> String {
        let mut lines = vec![
            report.title.clone(),
            format!("Amount Purchased: {}", report.amount_purchased),
            format!("Amount Sold: {}", report.amount_sold),
            format!("Profit/Loss: {}", report.profit_loss),
            format!("Amount Remaining in Shares: {}", report.remaining_in_shares),
            format!("Shares Remaining: {}", report.shares_remaining),
            String::new(),
            table_line([
                "Date",
                "Symbol",
                "Type",
                "Quantity",
                "Purchase Price",
                "Selling Price",
                "Total",
                "Profit/Loss",
            ]),
        ];
        lines.extend(report.rows.iter().map(|row| {
            table_line([
                row.date.as_str(),
                row.symbol.as_str(),
                row.trade_type.as_str(),
                row.quantity.as_str(),
                row.purchase_price.as_str(),
                row.selling_price.as_str(),
                row.total.as_str(),
                row.profit.as_str(),
            ])
        }));
        lines.push(String::new());

        lines.push(format!("{:<12} {:>10} {:>10}", "Month", "Purchased", "Sold"));
        lines.extend(
            report
                .chart
                .iter()
                .map(|p| format!("{:<12} {:>10} {:>10}", p.month, p.purchased, p.sold)),
        );

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn table_line(cells: [&str; 8]) -> String {
    let [date, symbol, kind, quantity, purchase, selling, total, profit] = cells;
    format!("{date:<12} {symbol:<8} {kind:<5} {quantity:>10} {purchase:>14} {selling:>14} {total:>14} {profit:>26}")
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
