use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::transaction::TransactionCategory;
use crate::errors::CoreError;

/// Largest amount accepted from a form field: one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Rows written by older clients carry `null` for a blank field.
fn null_as_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

/// The single running-totals row kept per user.
///
/// This is a baseline, not a sum of the ledger: it is written once by the
/// finance setup form and then bumped incrementally whenever a transaction
/// is added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSnapshot {
    /// Monthly income
    #[serde(default, deserialize_with = "null_as_zero")]
    pub income: Decimal,

    /// Monthly expenditures
    #[serde(default, deserialize_with = "null_as_zero")]
    pub expenditures: Decimal,

    /// Savings balance
    #[serde(default, deserialize_with = "null_as_zero")]
    pub savings: Decimal,
}

impl FinanceSnapshot {
    pub fn new(income: Decimal, expenditures: Decimal, savings: Decimal) -> Self {
        Self {
            income,
            expenditures,
            savings,
        }
    }

    /// Money on hand before any ledger entry is applied: income plus savings.
    /// Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn total_money(&self) -> Decimal {
        self.income.saturating_add(self.savings)
    }

    /// Apply a partial update in place. Fields absent from the patch are kept.
    pub fn apply(&mut self, patch: &SnapshotPatch) {
        if let Some(income) = patch.income {
            self.income = income;
        }
        if let Some(expenditures) = patch.expenditures {
            self.expenditures = expenditures;
        }
        if let Some(savings) = patch.savings {
            self.savings = savings;
        }
    }
}

/// A partial snapshot update. Only the `Some` fields are written, so an
/// update to `savings` never clobbers a concurrent change to `expenditures`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenditures: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Decimal>,
}

impl SnapshotPatch {
    /// Build the patch that adds `amount` to the bucket matching `category`.
    ///
    /// Fails with `ValidationError` if the new total does not fit in a `Decimal`.
    pub fn increment(
        current: &FinanceSnapshot,
        category: TransactionCategory,
        amount: Decimal,
    ) -> Result<Self, CoreError> {
        let bucket = match category {
            TransactionCategory::Savings => current.savings,
            TransactionCategory::Expenditure => current.expenditures,
        };
        let total = bucket.checked_add(amount).ok_or_else(|| {
            CoreError::ValidationError(format!("{category} total is out of range"))
        })?;

        Ok(match category {
            TransactionCategory::Savings => Self {
                savings: Some(total),
                ..Self::default()
            },
            TransactionCategory::Expenditure => Self {
                expenditures: Some(total),
                ..Self::default()
            },
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income.is_none() && self.expenditures.is_none() && self.savings.is_none()
    }
}
