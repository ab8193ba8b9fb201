use chrono::{DateTime, Utc};

use crate::models::chart::{ChartSlice, DashboardCharts};
use crate::models::finance::FinanceSnapshot;
use crate::models::transaction::TransactionEntry;
use crate::services::series_service::SeriesService;

/// Generates chart-ready data sets for the dashboard.
///
/// The core computes all the numbers; the frontend only renders.
/// - Pie and bar: the snapshot split into Income / Expenditures / Savings
/// - Line: the cumulative series from [`SeriesService`]
/// - Recent: the ledger, newest first
pub struct ChartService {
    series_service: SeriesService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            series_service: SeriesService::new(),
        }
    }

    /// Build every dashboard data set. Without a snapshot all sets are empty
    /// except `recent`.
    pub fn build(
        &self,
        snapshot: Option<&FinanceSnapshot>,
        ledger: &[TransactionEntry],
        now: DateTime<Utc>,
    ) -> DashboardCharts {
        let breakdown = snapshot.map(breakdown).unwrap_or_default();

        let mut recent = ledger.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        DashboardCharts {
            pie: breakdown.clone(),
            bar: breakdown,
            line: self.series_service.build_series(snapshot, ledger, now),
            recent,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// The snapshot as named slices, in display order.
#[must_use]
pub fn breakdown(snapshot: &FinanceSnapshot) -> Vec<ChartSlice> {
    vec![
        ChartSlice::new("Income", snapshot.income),
        ChartSlice::new("Expenditures", snapshot.expenditures),
        ChartSlice::new("Savings", snapshot.savings),
    ]
}
