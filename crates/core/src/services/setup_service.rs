use log::{debug, error};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::finance::FinanceSnapshot;
use crate::providers::traits::FinanceStore;
use super::{check_upper_bound, parse_decimal};

/// Handles the "finance information" form: the baseline snapshot.
pub struct SetupService;

impl SetupService {
    pub fn new() -> Self {
        Self
    }

    /// Existing figures to prefill the form with, if setup was done before.
    pub async fn load_snapshot(
        &self,
        store: &dyn FinanceStore,
        user_id: Uuid,
    ) -> Result<Option<FinanceSnapshot>, CoreError> {
        store.get_snapshot(user_id).await
    }

    /// Validate the raw form values and upsert the user's snapshot.
    ///
    /// Income and expenditures are required; a blank savings field means zero.
    /// Every value must be a finite number `>= 0`.
    pub async fn save_snapshot(
        &self,
        store: &dyn FinanceStore,
        user_id: Uuid,
        raw_income: &str,
        raw_expenditures: &str,
        raw_savings: &str,
    ) -> Result<FinanceSnapshot, CoreError> {
        let snapshot = parse_snapshot(raw_income, raw_expenditures, raw_savings)?;

        store
            .upsert_snapshot(user_id, &snapshot)
            .await
            .map_err(|e| {
                error!("Upsert error: {e}");
                match e {
                    CoreError::Persistence(_) => e,
                    other => CoreError::Persistence(other.to_string()),
                }
            })?;

        debug!("Saved finance information for {user_id}");
        Ok(snapshot)
    }
}

impl Default for SetupService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the three setup form fields into a snapshot.
pub fn parse_snapshot(
    raw_income: &str,
    raw_expenditures: &str,
    raw_savings: &str,
) -> Result<FinanceSnapshot, CoreError> {
    let income = parse_non_negative(raw_income, "Income")?;
    let expenditures = parse_non_negative(raw_expenditures, "Expenditures")?;
    let savings = if raw_savings.trim().is_empty() {
        Decimal::ZERO
    } else {
        parse_non_negative(raw_savings, "Savings")?
    };
    Ok(FinanceSnapshot::new(income, expenditures, savings))
}

fn parse_non_negative(raw: &str, field: &str) -> Result<Decimal, CoreError> {
    let value = parse_decimal(raw, field)?;
    if value < Decimal::ZERO {
        return Err(CoreError::ValidationError(format!(
            "{field} must not be negative"
        )));
    }
    // "-0" parses as a negative zero
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    check_upper_bound(value, field)
}
