use serde::{Deserialize, Serialize};

/// A single bar-chart data point: one month of trading activity.
///
/// The core generates these, the frontend just renders them. Both figures
/// count units traded in that month alone (not cumulative, not cash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Month name as it appears in the dataset
    pub month: String,

    /// Units bought during the month
    pub purchased: f64,

    /// Units sold during the month (invalid sells excluded)
    pub sold: f64,
}

impl ChartDataPoint {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            purchased: 0.0,
            sold: 0.0,
        }
    }
}
