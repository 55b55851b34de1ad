//! Month-by-month cash flow and the paged trend window.
//!
//! Transactions are bucketed by their `YYYY-MM` month key. Because that key
//! format sorts lexicographically in calendar order, plain string ordering is
//! chronological ordering and no date parsing is needed.
//!
//! The window is paged from the most recent end: offset 0 holds the latest
//! six months that have any activity, offset 1 the six before those, and so on.
//! Months without transactions are never synthesized, so a window may cover
//! more than six calendar months of real time and may hold fewer than six
//! entries.

use crate::schema::{Transaction, TransactionType};
use crate::utils::{finite_or_zero, month_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of months in one page of the trend chart.
pub const TREND_WINDOW_MONTHS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

impl MonthlyFlow {
    fn add(&mut self, kind: TransactionType, amount: f64) {
        match kind {
            TransactionType::Income => self.income += amount,
            TransactionType::Expense => self.expense += amount,
        }
        self.net = self.income - self.expense;
    }
}

/// Month key to accumulated flow, ascending by month.
pub type MonthlySeries = BTreeMap<String, MonthlyFlow>;

/// One bar group of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// A month and its transactions, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup<'a> {
    pub month: String,
    pub transactions: Vec<&'a Transaction>,
}

/// Buckets every transaction by month key.
///
/// A transaction whose amount is unusable contributes 0 but its month is still
/// present in the result.
pub fn group_by_month(transactions: &[Transaction]) -> MonthlySeries {
    let mut series = MonthlySeries::new();

    for tx in transactions {
        series
            .entry(month_key(&tx.date).to_string())
            .or_default()
            .add(tx.kind, finite_or_zero(tx.amount));
    }

    series
}

/// All month keys, oldest first.
pub fn sorted_month_keys(series: &MonthlySeries) -> Vec<String> {
    series.keys().cloned().collect()
}

/// The month keys shown at `offset`, oldest first.
pub fn window_month_keys(series: &MonthlySeries, offset: usize) -> Vec<String> {
    window_month_keys_sized(series, offset, TREND_WINDOW_MONTHS)
}

pub(crate) fn window_month_keys_sized(
    series: &MonthlySeries,
    offset: usize,
    window: usize,
) -> Vec<String> {
    // Series keys are already ascending; walk them backwards for most recent first.
    let descending: Vec<&String> = series.keys().rev().collect();

    let start = offset.saturating_mul(window);
    if start >= descending.len() {
        return Vec::new();
    }
    let end = start.saturating_add(window).min(descending.len());

    let mut selected: Vec<String> = descending[start..end].iter().map(|k| (*k).clone()).collect();
    selected.sort();
    selected
}

/// Trend chart points for the window at `offset`, oldest first.
pub fn trend_window(series: &MonthlySeries, offset: usize) -> Vec<TrendPoint> {
    trend_window_sized(series, offset, TREND_WINDOW_MONTHS)
}

pub(crate) fn trend_window_sized(
    series: &MonthlySeries,
    offset: usize,
    window: usize,
) -> Vec<TrendPoint> {
    window_month_keys_sized(series, offset, window)
        .into_iter()
        .map(|month| {
            let flow = series.get(&month).copied().unwrap_or_default();
            TrendPoint {
                month,
                income: flow.income,
                expense: flow.expense,
                net: flow.net,
            }
        })
        .collect()
}

/// Whether a page of older months exists beyond `offset`.
pub fn can_go_older(total_months: usize, offset: usize) -> bool {
    can_go_older_sized(total_months, offset, TREND_WINDOW_MONTHS)
}

pub(crate) fn can_go_older_sized(total_months: usize, offset: usize, window: usize) -> bool {
    offset
        .checked_mul(window)
        .and_then(|start| start.checked_add(window))
        .map_or(false, |end| end < total_months)
}

pub fn can_go_newer(offset: usize) -> bool {
    offset > 0
}

/// Transactions grouped under their month key. Months run most recent first,
/// and within a month transactions run by date, latest first. Transactions
/// sharing a date keep their input order.
pub fn group_transactions_by_month(transactions: &[Transaction]) -> Vec<MonthGroup<'_>> {
    let mut months: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();

    for tx in transactions {
        months.entry(month_key(&tx.date)).or_default().push(tx);
    }

    months
        .into_iter()
        .rev()
        .map(|(month, mut txs)| {
            txs.sort_by(|a, b| b.date.cmp(&a.date));
            MonthGroup {
                month: month.to_string(),
                transactions: txs,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordId;

    fn tx(id: &str, kind: TransactionType, amount: f64, date: &str) -> Transaction {
        Transaction {
            id: RecordId::new(id),
            kind,
            amount,
            category: "General".to_string(),
            description: None,
            date: date.to_string(),
        }
    }

    fn months_of(points: &[TrendPoint]) -> Vec<&str> {
        points.iter().map(|p| p.month.as_str()).collect()
    }

    /// One income transaction per month for `count` consecutive months starting Jan 2023.
    fn history(count: u32) -> Vec<Transaction> {
        (0..count)
            .map(|i| {
                let year = 2023 + (i / 12) as i32;
                let month = i % 12 + 1;
                tx(
                    &format!("t{}", i),
                    TransactionType::Income,
                    100.0 + i as f64,
                    &format!("{:04}-{:02}-10", year, month),
                )
            })
            .collect()
    }

    #[test]
    fn test_grouping_example() {
        let txs = vec![
            tx("1", TransactionType::Income, 1000.0, "2024-01-03"),
            tx("2", TransactionType::Expense, 400.0, "2024-01-20"),
            tx("3", TransactionType::Income, 500.0, "2024-02-11"),
        ];
        let series = group_by_month(&txs);

        assert_eq!(
            series["2024-01"],
            MonthlyFlow {
                income: 1000.0,
                expense: 400.0,
                net: 600.0
            }
        );
        assert_eq!(
            series["2024-02"],
            MonthlyFlow {
                income: 500.0,
                expense: 0.0,
                net: 500.0
            }
        );

        let window = trend_window(&series, 0);
        assert_eq!(months_of(&window), vec!["2024-01", "2024-02"]);
        assert_eq!(window[0].net, 600.0);
    }

    #[test]
    fn test_grouping_is_order_independent() {
        let mut txs = vec![
            tx("1", TransactionType::Income, 10.0, "2024-03-01"),
            tx("2", TransactionType::Expense, 4.0, "2024-01-01"),
            tx("3", TransactionType::Income, 7.0, "2024-01-09"),
            tx("4", TransactionType::Expense, 1.0, "2024-03-30"),
        ];
        let forward = group_by_month(&txs);
        txs.reverse();
        assert_eq!(group_by_month(&txs), forward);
    }

    #[test]
    fn test_unusable_amount_still_marks_month() {
        let txs = vec![tx("1", TransactionType::Expense, f64::NAN, "2024-05-01")];
        let series = group_by_month(&txs);
        assert_eq!(series.len(), 1);
        assert_eq!(series["2024-05"], MonthlyFlow::default());
        assert_eq!(window_month_keys(&series, 0), vec!["2024-05"]);
    }

    #[test]
    fn test_no_gap_filling() {
        let txs = vec![
            tx("1", TransactionType::Income, 1.0, "2023-01-01"),
            tx("2", TransactionType::Income, 1.0, "2023-07-01"),
            tx("3", TransactionType::Income, 1.0, "2024-12-01"),
        ];
        let series = group_by_month(&txs);
        assert_eq!(
            window_month_keys(&series, 0),
            vec!["2023-01", "2023-07", "2024-12"]
        );
    }

    #[test]
    fn test_malformed_dates_produce_garbage_keys() {
        let txs = vec![
            tx("1", TransactionType::Income, 5.0, "2024"),
            tx("2", TransactionType::Income, 5.0, ""),
            tx("3", TransactionType::Income, 5.0, "2024-02-01"),
        ];
        let series = group_by_month(&txs);
        assert_eq!(sorted_month_keys(&series), vec!["", "2024", "2024-02"]);
    }

    #[test]
    fn test_window_offsets() {
        let series = group_by_month(&history(14));
        // 2023-01 .. 2024-02
        assert_eq!(
            window_month_keys(&series, 0),
            vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
        );
        assert_eq!(
            window_month_keys(&series, 1),
            vec!["2023-03", "2023-04", "2023-05", "2023-06", "2023-07", "2023-08"]
        );
        assert_eq!(window_month_keys(&series, 2), vec!["2023-01", "2023-02"]);
        assert!(window_month_keys(&series, 3).is_empty());
        assert!(window_month_keys(&series, usize::MAX).is_empty());
    }

    #[test]
    fn test_window_is_contiguous_descending_block() {
        let series = group_by_month(&history(20));
        let mut descending = sorted_month_keys(&series);
        descending.reverse();

        for offset in 0..5 {
            let window = window_month_keys(&series, offset);
            assert!(window.len() <= TREND_WINDOW_MONTHS);
            let mut expected: Vec<String> = descending
                .iter()
                .skip(offset * TREND_WINDOW_MONTHS)
                .take(TREND_WINDOW_MONTHS)
                .cloned()
                .collect();
            expected.sort();
            assert_eq!(window, expected, "offset {}", offset);
        }
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(!can_go_older(0, 0));
        assert!(!can_go_older(6, 0));
        assert!(can_go_older(7, 0));
        assert!(can_go_older(13, 1));
        assert!(!can_go_older(12, 1));
        assert!(!can_go_older(5, usize::MAX));

        assert!(!can_go_newer(0));
        assert!(can_go_newer(1));
    }

    #[test]
    fn test_group_transactions_by_month() {
        let txs = vec![
            tx("a", TransactionType::Expense, 1.0, "2024-01-05"),
            tx("b", TransactionType::Expense, 1.0, "2024-02-01"),
            tx("c", TransactionType::Income, 1.0, "2024-01-28"),
            tx("d", TransactionType::Income, 1.0, "2024-01-05"),
        ];
        let groups = group_transactions_by_month(&txs);

        let months: Vec<&str> = groups.iter().map(|g| g.month.as_str()).collect();
        assert_eq!(months, vec!["2024-02", "2024-01"]);

        let jan: Vec<&str> = groups[1]
            .transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(jan, vec!["c", "a", "d"]);
    }
}
