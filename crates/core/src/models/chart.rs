use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionEntry;

/// A single point of the cumulative balance series.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPoint {
    /// Date of the ledger entry this point follows (or the baseline date)
    pub date: DateTime<Utc>,

    /// Running income + savings + inflows
    pub total_money: Decimal,

    /// Running expenditures + outflows
    pub expenditures: Decimal,
}

/// One named value of the snapshot breakdown, used for pie and bar charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: Decimal,
}

impl ChartSlice {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Everything the dashboard draws, computed in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCharts {
    /// Income / Expenditures / Savings share
    pub pie: Vec<ChartSlice>,

    /// Same breakdown, for the bar chart
    pub bar: Vec<ChartSlice>,

    /// Cumulative balance over time
    pub line: Vec<DerivedPoint>,

    /// Ledger entries, newest first
    pub recent: Vec<TransactionEntry>,
}

impl DashboardCharts {
    /// `false` when the user has not entered finance information yet.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.line.is_empty()
    }
}
