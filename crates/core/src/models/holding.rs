use serde::{Deserialize, Serialize};

/// Units of one symbol currently held, with the cost basis still attached
/// to them under the average-cost method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingPosition {
    /// Units held (never negative)
    pub quantity: f64,

    /// Purchase cost not yet released by sales
    pub total_cost: f64,
}

impl HoldingPosition {
    pub fn new(quantity: f64, total_cost: f64) -> Self {
        Self {
            quantity,
            total_cost,
        }
    }

    /// Running average cost per unit, or `None` for an empty position.
    ///
    /// Always recomputed from the current totals.
    #[must_use]
    pub fn average_cost(&self) -> Option<f64> {
        if self.quantity > 0.0 {
            Some(self.total_cost / self.quantity)
        } else {
            None
        }
    }

    /// A position is closed once its quantity hits exactly zero.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.quantity == 0.0
    }

    /// Whether `quantity` units can be sold from this position.
    #[must_use]
    pub fn can_sell(&self, quantity: f64) -> bool {
        self.quantity >= quantity
    }
}
