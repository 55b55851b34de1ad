//! # Ledger Insights
//!
//! A library for turning personal ledger records (transactions, assets,
//! liabilities and goals) into the summary views a finance dashboard shows.
//!
//! ## Core Concepts
//!
//! - **Snapshot**: An immutable copy of the four record collections as last delivered by the store
//! - **Totals**: Net worth (assets minus liabilities) and net cash flow (income minus expenses)
//! - **Category Mapping**: Amounts summed per category, for charts
//! - **Month Key**: The `YYYY-MM` prefix of a date, used to bucket transactions by month
//! - **Trend Window**: A page of at most six months of activity, paged back from the most recent
//! - **Goal Progress**: Completion percentage with a capped bar and an uncapped label
//!
//! Every view is recomputed from scratch for each snapshot. Nothing here does
//! I/O or keeps state between calls, and degenerate input (unparsable amounts,
//! zero targets, out-of-range pages) degrades to zero or empty results instead
//! of errors.
//!
//! ## Example
//!
//! ```rust
//! use ledger_insights::*;
//!
//! let snapshot = LedgerSnapshot::from_json(r#"{
//!     "transactions": [
//!         {"id": "t1", "type": "income", "amount": 1000, "category": "Salary", "date": "2024-01-25"},
//!         {"id": "t2", "type": "expense", "amount": "400", "category": "Rent", "date": "2024-01-01"},
//!         {"id": "t3", "type": "income", "amount": 500, "category": "Salary", "date": "2024-02-25"}
//!     ],
//!     "goals": [
//!         {"id": "g1", "name": "Holiday", "targetAmount": 0, "currentAmount": 50, "type": "saving"}
//!     ]
//! }"#).unwrap();
//!
//! let dashboard = Dashboard::compute(&snapshot, &ViewControls::new());
//!
//! assert_eq!(dashboard.cash_flow.net_cash_flow, 1100.0);
//! assert_eq!(dashboard.trend[0].month, "2024-01");
//! assert_eq!(dashboard.trend[0].net, 600.0);
//! assert_eq!(dashboard.goals[0].bar_percent, 0.0);
//! ```

pub mod categories;
pub mod config;
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod goals;
pub mod ingestion;
pub mod schema;
pub mod totals;
pub mod trend;
pub mod utils;

pub use categories::{
    aggregate_by_category, asset_categories, breakdown_transactions, liability_categories,
    to_chart_data, transaction_categories, CategoryTotal, CategoryTotals, TransactionBreakdown,
};
pub use config::DashboardConfig;
pub use controls::ViewControls;
pub use dashboard::Dashboard;
pub use error::{LedgerError, Result};
pub use forms::{
    AssetDraft, EditState, GoalDraft, LiabilityDraft, RecordDraft, StoreCommand, TransactionDraft,
};
pub use goals::{summarize_goals, GoalProgress, GoalSummary, LABEL_DECIMALS};
pub use ingestion::{IngestReport, StoreDocument};
pub use schema::*;
pub use totals::{
    calculate_balance_totals, calculate_cash_flow_totals, total_assets, total_liabilities,
    BalanceTotals, CashFlowTotals,
};
pub use trend::{
    can_go_newer, can_go_older, group_by_month, group_transactions_by_month, sorted_month_keys,
    trend_window, window_month_keys, MonthGroup, MonthlyFlow, MonthlySeries, TrendPoint,
    TREND_WINDOW_MONTHS,
};
pub use utils::*;

/// Computes every dashboard view for `snapshot` with the default six-month window.
pub fn compute_dashboard<'a>(snapshot: &'a LedgerSnapshot, controls: &ViewControls) -> Dashboard<'a> {
    Dashboard::compute(snapshot, controls)
}
