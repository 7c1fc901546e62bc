use chrono::{Datelike, NaiveDate};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::transaction::Transaction;

/// One month's bucket of transactions, in recorded order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthEntry {
    pub month: String,
    pub transactions: Vec<Transaction>,
}

/// Ordered mapping of month name → transactions.
///
/// Iteration order is insertion order and defines the cumulative window of
/// the ledger walk. It is never re-sorted by name, so "February" may come
/// before "January" if the dataset says so.
///
/// Serialized as a JSON object keyed by month; document key order is kept
/// on both read and write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyData {
    entries: Vec<MonthEntry>,
}

impl MonthlyData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a month, or replace its transactions in place if it already exists.
    pub fn insert_month(&mut self, month: impl Into<String>, transactions: Vec<Transaction>) {
        let month = month.into();
        match self.entries.iter_mut().find(|e| e.month == month) {
            Some(entry) => entry.transactions = transactions,
            None => self.entries.push(MonthEntry {
                month,
                transactions,
            }),
        }
    }

    /// Builder-style variant of [`insert_month`](Self::insert_month).
    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        self.insert_month(month, transactions);
        self
    }

    /// Month names in iteration order.
    #[must_use]
    pub fn months(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.month.as_str()).collect()
    }

    #[must_use]
    pub fn get(&self, month: &str) -> Option<&[Transaction]> {
        self.entries
            .iter()
            .find(|e| e.month == month)
            .map(|e| e.transactions.as_slice())
    }

    #[must_use]
    pub fn contains_month(&self, month: &str) -> bool {
        self.entries.iter().any(|e| e.month == month)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn first_month(&self) -> Option<&str> {
        self.entries.first().map(|e| e.month.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of transactions across all months.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.entries.iter().map(|e| e.transactions.len()).sum()
    }

    /// Group a flat list of transactions by the calendar month of their
    /// `YYYY-MM-DD` date.
    ///
    /// Months come out in chronological order; transactions keep their
    /// relative input order inside a month. Month keys are English month
    /// names ("January"), or "January 2025" style when the list spans more
    /// than one year.
    pub fn from_dated_transactions(transactions: Vec<Transaction>) -> Result<Self, CoreError> {
        let mut buckets: BTreeMap<(i32, u32), Vec<Transaction>> = BTreeMap::new();

        for tx in transactions {
            let date = NaiveDate::parse_from_str(&tx.date, "%Y-%m-%d").map_err(|e| {
                CoreError::ValidationError(format!(
                    "Cannot group transaction for {} by month: invalid date '{}' ({e})",
                    tx.symbol, tx.date
                ))
            })?;
            buckets
                .entry((date.year(), date.month()))
                .or_default()
                .push(tx);
        }

        let multi_year = buckets
            .keys()
            .next()
            .zip(buckets.keys().next_back())
            .is_some_and(|(first, last)| first.0 != last.0);

        let mut data = Self::new();
        for ((year, month), txs) in buckets {
            // Day 1 of a month parsed from a valid date always exists
            let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
                continue;
            };
            let name = if multi_year {
                first_day.format("%B %Y").to_string()
            } else {
                first_day.format("%B").to_string()
            };
            data.insert_month(name, txs);
        }
        data.validate()?;
        Ok(data)
    }

    /// Check every transaction before it reaches the ledger walk.
    ///
    /// Rules:
    /// - Symbol must be non-empty
    /// - Quantity and price must be finite and positive
    pub fn validate(&self) -> Result<(), CoreError> {
        for entry in &self.entries {
            for (idx, tx) in entry.transactions.iter().enumerate() {
                if tx.symbol.trim().is_empty() {
                    return Err(CoreError::ValidationError(format!(
                        "{} transaction #{idx}: symbol must not be empty",
                        entry.month
                    )));
                }
                if !tx.quantity.is_finite() || tx.quantity <= 0.0 {
                    return Err(CoreError::ValidationError(format!(
                        "{} transaction #{idx} ({}): quantity must be positive, got {}",
                        entry.month, tx.symbol, tx.quantity
                    )));
                }
                if !tx.price.is_finite() || tx.price <= 0.0 {
                    return Err(CoreError::ValidationError(format!(
                        "{} transaction #{idx} ({}): price must be positive, got {}",
                        entry.month, tx.symbol, tx.price
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Serialize for MonthlyData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.month, &entry.transactions)?;
        }
        map.end()
    }
}

struct MonthlyDataVisitor;

impl<'de> Visitor<'de> for MonthlyDataVisitor {
    type Value = MonthlyData;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an object mapping month names to transaction lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut data = MonthlyData::new();
        while let Some((month, transactions)) = access.next_entry::<String, Vec<Transaction>>()? {
            if data.contains_month(&month) {
                return Err(serde::de::Error::custom(format!("duplicate month '{month}'")));
            }
            data.entries.push(MonthEntry {
                month,
                transactions,
            });
        }
        Ok(data)
    }
}

impl<'de> Deserialize<'de> for MonthlyData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MonthlyDataVisitor)
    }
}
