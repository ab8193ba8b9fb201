use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which snapshot bucket a transaction feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    /// Money put aside; increments `savings`
    #[default]
    Savings,
    /// Money spent; increments `expenditures`
    Expenditure,
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionCategory::Savings => write!(f, "Savings"),
            TransactionCategory::Expenditure => write!(f, "Expenditure"),
        }
    }
}

impl std::str::FromStr for TransactionCategory {
    type Err = crate::errors::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Savings" => Ok(TransactionCategory::Savings),
            "Expenditure" => Ok(TransactionCategory::Expenditure),
            other => Err(crate::errors::CoreError::ValidationError(format!(
                "Unknown category '{other}': expected Savings or Expenditure"
            ))),
        }
    }
}

/// A single ledger record.
///
/// Entries are append-only: once written they are never edited or deleted.
/// Ids are UUIDv7, so ordering by id matches insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Unique identifier (time-ordered)
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Free-text description, e.g. "Sold bike"
    pub description: String,

    /// Sign-bearing amount. Entries created by this library are always positive.
    pub amount: Decimal,

    /// Savings or Expenditure
    pub category: TransactionCategory,

    /// When the transaction was recorded
    pub date: DateTime<Utc>,
}

impl TransactionEntry {
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        amount: Decimal,
        category: TransactionCategory,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            description: description.into(),
            amount,
            category,
            date,
        }
    }
}
