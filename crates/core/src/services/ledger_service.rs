use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::chart::ChartDataPoint;
use crate::models::holding::HoldingPosition;
use crate::models::monthly_data::{MonthEntry, MonthlyData};
use crate::models::summary::{AnnotatedTransaction, LedgerSummary, ProfitOutcome};
use crate::models::transaction::{TradeType, Transaction};

/// Computes ledger summaries with an average-cost walk over monthly transactions.
///
/// Pure business logic — no I/O, no shared state. Every call starts from an
/// empty ledger, so the same input always yields the same summary.
pub struct LedgerService;

/// Running totals threaded through the walk.
#[derive(Debug, Default)]
struct LedgerState {
    holdings: BTreeMap<String, HoldingPosition>,
    cash: f64,
    purchased: f64,
    sold: f64,
    profit_loss: f64,
    remaining_in_shares: f64,
}

/// A transaction paired with what the walk decided for it.
type Processed<'a> = (&'a Transaction, Option<ProfitOutcome>);

/// Fold accumulator: ledger state plus the chart series built so far and
/// the processed records of the most recent month.
#[derive(Default)]
struct Walk<'a> {
    state: LedgerState,
    series: Vec<ChartDataPoint>,
    last_month: Vec<Processed<'a>>,
}

impl LedgerState {
    /// Apply one month in recorded order. Returns the month's chart point and
    /// one processed record per transaction, in the same order.
    fn apply_month<'a>(&mut self, entry: &'a MonthEntry) -> (ChartDataPoint, Vec<Processed<'a>>) {
        let mut point = ChartDataPoint::new(entry.month.as_str());
        let processed = entry
            .transactions
            .iter()
            .map(|tx| (tx, self.apply(tx, &mut point)))
            .collect();

        self.remaining_in_shares = self.purchased - self.sold;
        (point, processed)
    }

    fn apply(&mut self, tx: &Transaction, point: &mut ChartDataPoint) -> Option<ProfitOutcome> {
        match tx.trade_type {
            TradeType::Buy => {
                self.buy(tx);
                point.purchased += tx.quantity;
                None
            }
            TradeType::Sell => {
                let outcome = self.sell(tx);
                if !outcome.is_error() {
                    point.sold += tx.quantity;
                }
                Some(outcome)
            }
        }
    }

    fn buy(&mut self, tx: &Transaction) {
        let cost = tx.quantity * tx.price;
        let position = self.holdings.entry(tx.symbol.clone()).or_default();
        position.quantity += tx.quantity;
        position.total_cost += cost;
        self.cash -= cost;
        self.purchased += cost;
    }

    fn sell(&mut self, tx: &Transaction) -> ProfitOutcome {
        let held = self.holdings.get(&tx.symbol).map_or(0.0, |p| p.quantity);
        let Some(position) = self
            .holdings
            .get_mut(&tx.symbol)
            .filter(|p| p.can_sell(tx.quantity))
        else {
            warn!(
                symbol = %tx.symbol,
                date = %tx.date,
                quantity = tx.quantity,
                held,
                "insufficient shares to sell, transaction skipped"
            );
            return ProfitOutcome::InsufficientShares;
        };

        // Average cost is taken from the current totals on every sale
        let avg_cost = position.total_cost / position.quantity;
        let profit = tx.quantity * (tx.price - avg_cost);
        position.quantity -= tx.quantity;
        position.total_cost -= tx.quantity * avg_cost;

        let proceeds = tx.quantity * tx.price;
        self.cash += proceeds;
        self.sold += proceeds;
        self.profit_loss += profit;
        ProfitOutcome::Realized(profit)
    }
}

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the summary for `selected_month`.
    ///
    /// Months are walked in the dataset's own order, from the first one up
    /// to and including `selected_month`; later months are never touched.
    /// Fails with [`CoreError::UnknownMonth`] if the month is not in `data`.
    pub fn compute_summary(
        &self,
        data: &MonthlyData,
        selected_month: &str,
    ) -> Result<LedgerSummary, CoreError> {
        let window = data
            .iter()
            .position(|e| e.month == selected_month)
            .ok_or_else(|| CoreError::UnknownMonth(selected_month.to_string()))?
            + 1;

        let walk = data.iter().take(window).fold(Walk::default(), |mut walk, entry| {
            let (point, processed) = walk.state.apply_month(entry);
            debug!(
                month = %point.month,
                purchased = point.purchased,
                sold = point.sold,
                "processed month"
            );
            walk.series.push(point);
            walk.last_month = processed;
            walk
        });

        let Walk {
            mut state,
            series,
            last_month,
        } = walk;

        state.holdings.retain(|_, position| !position.is_closed());

        let selected = data.get(selected_month).unwrap_or_default();
        let annotated_transactions = Self::annotate(selected, &last_month);

        Ok(LedgerSummary {
            selected_month: selected_month.to_string(),
            holdings: state.holdings,
            cash_delta: state.cash,
            amount_purchased: state.purchased,
            amount_sold: state.sold,
            profit_loss: state.profit_loss,
            remaining_in_shares: state.remaining_in_shares,
            annotated_transactions,
            monthly_series: series,
        })
    }

    /// Attach outcomes to the selected month's transactions.
    ///
    /// Matching is positional: the n-th transaction takes the n-th processed
    /// record, and only if their `(date, symbol)` agree. Duplicate keys in a
    /// month therefore each keep their own outcome.
    fn annotate(transactions: &[Transaction], processed: &[Processed<'_>]) -> Vec<AnnotatedTransaction> {
        transactions
            .iter()
            .enumerate()
            .map(|(idx, tx)| {
                let profit = processed
                    .get(idx)
                    .filter(|(done, _)| done.same_key(tx))
                    .and_then(|(_, outcome)| *outcome);
                AnnotatedTransaction::new(tx.clone(), profit)
            })
            .collect()
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
