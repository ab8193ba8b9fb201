use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::chart::DerivedPoint;
use crate::models::finance::FinanceSnapshot;
use crate::models::transaction::TransactionEntry;

/// Rebuilds a running balance sheet from the snapshot baseline and the ledger.
///
/// The snapshot gives the starting position, the ledger gives the changes.
/// No historical snapshots are stored anywhere; the series is recomputed on
/// every render. Pure business logic, no I/O.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Derive the cumulative (total money, expenditures) series.
    ///
    /// 1. No snapshot -> empty series (caller shows a "no data" state)
    /// 2. Ledger sorted ascending by date, ties by id (insertion order)
    /// 3. Baseline point: `income + savings` and `expenditures`, dated at the
    ///    earliest entry, or `now` for an empty ledger
    /// 4. One point per entry with the running totals
    ///
    /// The result always has `ledger.len() + 1` points when a snapshot exists.
    /// Running totals saturate at `Decimal::MAX` instead of overflowing.
    pub fn build_series(
        &self,
        snapshot: Option<&FinanceSnapshot>,
        ledger: &[TransactionEntry],
        now: DateTime<Utc>,
    ) -> Vec<DerivedPoint> {
        let Some(snapshot) = snapshot else {
            return Vec::new();
        };

        let mut ordered: Vec<&TransactionEntry> = ledger.iter().collect();
        ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        let mut total_money = snapshot.total_money();
        let mut expenditures = snapshot.expenditures;

        let mut series = Vec::with_capacity(ordered.len() + 1);
        series.push(DerivedPoint {
            date: ordered.first().map_or(now, |e| e.date),
            total_money,
            expenditures,
        });

        for entry in ordered {
            if is_inflow(entry.amount) {
                total_money = total_money.saturating_add(entry.amount);
            } else {
                expenditures = expenditures.saturating_add(entry.amount.abs());
            }
            series.push(DerivedPoint {
                date: entry.date,
                total_money,
                expenditures,
            });
        }

        series
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an amount counts towards total money.
///
/// Only strictly positive amounts do; zero falls into the expenditures
/// bucket (where it adds nothing).
#[must_use]
pub fn is_inflow(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}
