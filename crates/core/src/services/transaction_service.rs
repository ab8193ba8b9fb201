use chrono::{DateTime, Utc};
use log::{debug, error};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::finance::SnapshotPatch;
use crate::models::transaction::{TransactionCategory, TransactionEntry};
use crate::providers::traits::FinanceStore;
use super::{check_upper_bound, parse_decimal};

/// Records ledger entries and keeps the snapshot bucket totals in step.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate, append to the ledger, then bump the matching snapshot bucket.
    ///
    /// Steps run strictly in order, each awaited before the next:
    /// 1. append the entry (failure -> `Persistence`, nothing else touched)
    /// 2. read the snapshot
    /// 3. add the amount to `savings` or `expenditures`
    /// 4. write back only that field
    ///
    /// There is no transaction across the two tables. If 2 or 4 fails the
    /// entry stays recorded and `SnapshotStale` is returned.
    pub async fn add_transaction(
        &self,
        store: &dyn FinanceStore,
        user_id: Uuid,
        description: &str,
        raw_amount: &str,
        category: TransactionCategory,
        now: DateTime<Utc>,
    ) -> Result<TransactionEntry, CoreError> {
        let description = validate_description(description)?;
        let amount = parse_amount(raw_amount)?;

        let entry = TransactionEntry::new(user_id, description, amount, category, now);

        store.append_transaction(&entry).await.map_err(|e| {
            error!("Transaction insert error: {e}");
            into_persistence(e)
        })?;

        let transaction_id = entry.id;
        let stale = move |reason: String| CoreError::SnapshotStale {
            transaction_id,
            reason,
        };

        let current = match store.get_snapshot(user_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                error!("Finance fetch error: no finance row for {user_id}");
                return Err(stale(CoreError::SnapshotNotFound(user_id).to_string()));
            }
            Err(e) => {
                error!("Finance fetch error: {e}");
                return Err(stale(e.to_string()));
            }
        };

        let patch = SnapshotPatch::increment(&current, category, amount).map_err(|e| {
            error!("Finance update error: {e}");
            stale(e.to_string())
        })?;
        if let Err(e) = store.update_snapshot(user_id, &patch).await {
            error!("Finance update error: {e}");
            return Err(stale(e.to_string()));
        }

        debug!("Recorded {category} transaction {} of {amount}", entry.id);
        Ok(entry)
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a transaction amount. Must be a finite number strictly above zero
/// and no larger than [`MAX_AMOUNT`](crate::models::finance::MAX_AMOUNT).
pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
    let amount = parse_decimal(raw, "Amount")
        .map_err(|_| invalid_amount())?;
    if amount <= Decimal::ZERO {
        return Err(invalid_amount());
    }
    check_upper_bound(amount, "Amount")
}

fn invalid_amount() -> CoreError {
    CoreError::ValidationError("Please enter a valid positive number for amount.".into())
}

fn validate_description(description: &str) -> Result<&str, CoreError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError("Description is required".into()));
    }
    Ok(trimmed)
}

fn into_persistence(e: CoreError) -> CoreError {
    match e {
        CoreError::Persistence(_) => e,
        other => CoreError::Persistence(other.to_string()),
    }
}
