use crate::categories::{
    asset_categories, breakdown_transactions, liability_categories, to_chart_data, CategoryTotal,
    CategoryTotals, TransactionBreakdown,
};
use crate::config::DashboardConfig;
use crate::controls::ViewControls;
use crate::error::Result;
use crate::goals::{summarize_goals_with_decimals, GoalSummary};
use crate::schema::LedgerSnapshot;
use crate::totals::{calculate_balance_totals, calculate_cash_flow_totals, BalanceTotals, CashFlowTotals};
use crate::trend::{
    can_go_newer, can_go_older_sized, group_by_month, group_transactions_by_month,
    sorted_month_keys, trend_window_sized, MonthGroup, TrendPoint,
};
use log::{debug, info};
use serde::Serialize;

/// Every derived view of one snapshot.
///
/// Built in one pass from an immutable [`LedgerSnapshot`]; nothing is cached
/// between calls, so a new snapshot simply means a new `Dashboard`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard<'a> {
    pub balance: BalanceTotals,
    pub cash_flow: CashFlowTotals,
    pub asset_categories: CategoryTotals,
    pub liability_categories: CategoryTotals,
    /// Month the income/expense breakdown covers; `None` means all history
    pub selected_month: Option<String>,
    pub transaction_categories: TransactionBreakdown,
    /// Every month with activity, oldest first
    pub months: Vec<String>,
    pub offset: usize,
    pub trend: Vec<TrendPoint>,
    pub can_go_older: bool,
    pub can_go_newer: bool,
    pub monthly_transactions: Vec<MonthGroup<'a>>,
    pub goals: Vec<GoalSummary>,
}

impl<'a> Dashboard<'a> {
    pub fn compute(snapshot: &'a LedgerSnapshot, controls: &ViewControls) -> Self {
        Self::build(snapshot, controls, &DashboardConfig::default())
    }

    pub fn compute_with_config(
        snapshot: &'a LedgerSnapshot,
        controls: &ViewControls,
        config: &DashboardConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(snapshot, controls, config))
    }

    fn build(snapshot: &'a LedgerSnapshot, controls: &ViewControls, config: &DashboardConfig) -> Self {
        debug!(
            "Snapshot contains {} transactions, {} assets, {} liabilities and {} goals",
            snapshot.transactions.len(),
            snapshot.assets.len(),
            snapshot.liabilities.len(),
            snapshot.goals.len()
        );

        let series = group_by_month(&snapshot.transactions);
        let months = sorted_month_keys(&series);
        let months_desc: Vec<String> = months.iter().rev().cloned().collect();

        let selected_month = controls
            .resolve_selected_month(&months_desc)
            .map(str::to_string);

        let offset = controls.offset;
        let trend = trend_window_sized(&series, offset, config.window_months);
        debug!(
            "Trend window at offset {} covers {} of {} months",
            offset,
            trend.len(),
            months.len()
        );

        let dashboard = Self {
            balance: calculate_balance_totals(&snapshot.assets, &snapshot.liabilities),
            cash_flow: calculate_cash_flow_totals(&snapshot.transactions),
            asset_categories: asset_categories(&snapshot.assets),
            liability_categories: liability_categories(&snapshot.liabilities),
            transaction_categories: breakdown_transactions(
                &snapshot.transactions,
                selected_month.as_deref(),
            ),
            selected_month,
            can_go_older: can_go_older_sized(months.len(), offset, config.window_months),
            can_go_newer: can_go_newer(offset),
            months,
            offset,
            trend,
            monthly_transactions: group_transactions_by_month(&snapshot.transactions),
            goals: summarize_goals_with_decimals(&snapshot.goals, config.label_decimals),
        };

        info!(
            "Computed dashboard: net worth {:.2}, net cash flow {:.2}",
            dashboard.balance.net_worth, dashboard.cash_flow.net_cash_flow
        );

        dashboard
    }

    pub fn asset_chart(&self) -> Vec<CategoryTotal> {
        to_chart_data(&self.asset_categories)
    }

    pub fn liability_chart(&self) -> Vec<CategoryTotal> {
        to_chart_data(&self.liability_categories)
    }

    pub fn income_chart(&self) -> Vec<CategoryTotal> {
        to_chart_data(&self.transaction_categories.income)
    }

    pub fn expense_chart(&self) -> Vec<CategoryTotal> {
        to_chart_data(&self.transaction_categories.expense)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::schema::{Asset, Goal, GoalType, Liability, RecordId, Transaction, TransactionType};

    fn tx(kind: TransactionType, amount: f64, category: &str, date: &str) -> Transaction {
        Transaction {
            id: RecordId::new(format!("{}-{}", date, category)),
            kind,
            amount,
            category: category.to_string(),
            description: None,
            date: date.to_string(),
        }
    }

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            transactions: vec![
                tx(TransactionType::Income, 1000.0, "Salary", "2024-01-25"),
                tx(TransactionType::Expense, 400.0, "Rent", "2024-01-01"),
                tx(TransactionType::Income, 500.0, "Salary", "2024-02-25"),
                tx(TransactionType::Expense, 120.0, "Food", "2024-02-10"),
            ],
            assets: vec![Asset {
                id: RecordId::new("a1"),
                name: "Savings".to_string(),
                value: 5000.0,
                category: "Cash".to_string(),
                date_added: "2024-01-01".to_string(),
            }],
            liabilities: vec![Liability {
                id: RecordId::new("l1"),
                name: "Card".to_string(),
                amount: 1500.0,
                category: "Credit".to_string(),
                date_added: "2024-01-01".to_string(),
                due_date: None,
            }],
            goals: vec![Goal {
                id: RecordId::new("g1"),
                name: "Trip".to_string(),
                target_amount: 2000.0,
                current_amount: 500.0,
                due_date: None,
                kind: GoalType::Saving,
            }],
        }
    }

    #[test]
    fn test_compute_defaults_to_latest_month() {
        let snapshot = snapshot();
        let dashboard = Dashboard::compute(&snapshot, &ViewControls::new());

        assert_eq!(dashboard.balance.net_worth, 3500.0);
        assert_eq!(dashboard.cash_flow.net_cash_flow, 980.0);
        assert_eq!(dashboard.selected_month.as_deref(), Some("2024-02"));
        assert_eq!(dashboard.transaction_categories.income["Salary"], 500.0);
        assert!(!dashboard.transaction_categories.expense.contains_key("Rent"));
        assert_eq!(dashboard.months, vec!["2024-01", "2024-02"]);
        assert_eq!(dashboard.trend.len(), 2);
        assert!(!dashboard.can_go_older);
        assert!(!dashboard.can_go_newer);
        assert_eq!(dashboard.monthly_transactions[0].month, "2024-02");
        assert_eq!(dashboard.goals[0].label, "25.00%");
    }

    #[test]
    fn test_explicit_month_and_offset() {
        let snapshot = snapshot();
        let controls = ViewControls::new()
            .with_selected_month("2024-01")
            .with_offset(1);
        let dashboard = Dashboard::compute(&snapshot, &controls);

        assert_eq!(dashboard.transaction_categories.expense["Rent"], 400.0);
        assert!(dashboard.trend.is_empty());
        assert!(dashboard.can_go_newer);
        assert!(!dashboard.can_go_older);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = LedgerSnapshot::default();
        let dashboard = Dashboard::compute(&snapshot, &ViewControls::new());

        assert_eq!(dashboard.balance, BalanceTotals::default());
        assert_eq!(dashboard.selected_month, None);
        assert!(dashboard.months.is_empty());
        assert!(dashboard.trend.is_empty());
        assert!(dashboard.monthly_transactions.is_empty());
        assert!(dashboard.asset_chart().is_empty());
        assert!(dashboard.goals.is_empty());
    }

    #[test]
    fn test_custom_config() {
        let snapshot = snapshot();
        let config = DashboardConfig {
            window_months: 1,
            label_decimals: 0,
        };
        let dashboard =
            Dashboard::compute_with_config(&snapshot, &ViewControls::new(), &config).unwrap();
        assert_eq!(dashboard.trend.len(), 1);
        assert_eq!(dashboard.trend[0].month, "2024-02");
        assert!(dashboard.can_go_older);
        assert_eq!(dashboard.goals[0].label, "25%");

        let bad = DashboardConfig {
            window_months: 0,
            label_decimals: 2,
        };
        assert!(matches!(
            Dashboard::compute_with_config(&snapshot, &ViewControls::new(), &bad),
            Err(LedgerError::InvalidWindowSize(0))
        ));
    }

    #[test]
    fn test_to_json() {
        let snapshot = snapshot();
        let json = Dashboard::compute(&snapshot, &ViewControls::new())
            .to_json()
            .unwrap();
        assert!(json.contains("\"netWorth\": 3500.0"));
        assert!(json.contains("\"canGoOlder\": false"));
    }
}
