use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    /// Buying shares; adds to the position at the execution price
    #[serde(rename = "BUY")]
    Buy,
    /// Selling shares; depletes the position at its average cost
    #[serde(rename = "SELL")]
    Sell,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeType::Buy => write!(f, "BUY"),
            TradeType::Sell => write!(f, "SELL"),
        }
    }
}

/// A single recorded trade.
///
/// `date` is kept as the raw identifier from the dataset. The ledger walk
/// never parses it; it is only used to match transactions back to their
/// computed outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date identifier as recorded (e.g. "2024-01-15")
    pub date: String,

    /// Ticker symbol (e.g. "AAPL")
    pub symbol: String,

    /// Buy or Sell
    #[serde(rename = "type")]
    pub trade_type: TradeType,

    /// Number of units traded (always positive)
    pub quantity: f64,

    /// Unit price at execution (always positive)
    pub price: f64,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        symbol: impl Into<String>,
        trade_type: TradeType,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            date: date.into(),
            symbol: symbol.into(),
            trade_type,
            quantity,
            price,
        }
    }

    /// Convenience constructors for the two trade directions
    pub fn buy(date: impl Into<String>, symbol: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self::new(date, symbol, TradeType::Buy, quantity, price)
    }

    pub fn sell(date: impl Into<String>, symbol: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self::new(date, symbol, TradeType::Sell, quantity, price)
    }

    /// Cash value of the trade: `quantity * price`.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }

    /// True when both `date` and `symbol` agree with `other`.
    #[must_use]
    pub fn same_key(&self, other: &Transaction) -> bool {
        self.date == other.date && self.symbol == other.symbol
    }
}
