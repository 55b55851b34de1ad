use ledger_insights::*;

fn main() -> Result<()> {
    let snapshot = LedgerSnapshot::from_json(
        r#"{
        "transactions": [
            {"id": "t1", "type": "income", "amount": 42000, "category": "Salary", "date": "2024-01-25"},
            {"id": "t2", "type": "expense", "amount": 12000, "category": "Rent", "date": "2024-01-01"},
            {"id": "t3", "type": "expense", "amount": "3,500", "category": "Food", "date": "2024-01-14"},
            {"id": "t4", "type": "income", "amount": 42000, "category": "Salary", "date": "2024-02-25"},
            {"id": "t5", "type": "expense", "amount": 12000, "category": "Rent", "date": "2024-02-01"},
            {"id": "t6", "type": "expense", "amount": "4100.50", "category": "Food", "date": "2024-02-11"},
            {"id": "t7", "type": "income", "amount": 5000, "category": "Freelance", "date": "2024-03-03"}
        ],
        "assets": [
            {"id": "a1", "name": "Savings account", "value": 150000, "category": "Cash", "dateAdded": "2023-12-01"},
            {"id": "a2", "name": "Index fund", "value": "80000", "category": "Investments", "dateAdded": "2023-12-01"}
        ],
        "liabilities": [
            {"id": "l1", "name": "Car loan", "amount": 220000, "category": "Loans", "dateAdded": "2023-06-01", "dueDate": "2028-06-01"}
        ],
        "goals": [
            {"id": "g1", "name": "Emergency fund", "targetAmount": 200000, "currentAmount": 150000, "type": "saving"},
            {"id": "g2", "name": "Car loan", "targetAmount": 220000, "currentAmount": 0, "type": "debt_repayment"},
            {"id": "g3", "name": "Someday", "targetAmount": 0, "currentAmount": 1000, "type": "investment"}
        ]
    }"#,
    )?;

    let mut controls = ViewControls::new();
    let dashboard = Dashboard::compute(&snapshot, &controls);

    println!("Net worth:     {:>12.2}", dashboard.balance.net_worth);
    println!("Net cash flow: {:>12.2}", dashboard.cash_flow.net_cash_flow);

    println!("\nAssets by category:");
    for slice in dashboard.asset_chart() {
        println!("  {:<12} {:>12.2}", slice.category, slice.total);
    }

    println!(
        "\nExpenses for {}:",
        dashboard.selected_month.as_deref().unwrap_or("all months")
    );
    for slice in dashboard.expense_chart() {
        println!("  {:<12} {:>12.2}", slice.category, slice.total);
    }

    println!("\nTrend (offset {}):", dashboard.offset);
    for point in &dashboard.trend {
        println!(
            "  {}  income {:>10.2}  expense {:>10.2}  net {:>10.2}",
            point.month, point.income, point.expense, point.net
        );
    }

    if !controls.older(dashboard.months.len()) {
        println!("  (no older months)");
    }

    println!("\nGoals:");
    for goal in &dashboard.goals {
        let status = if goal.applicable { goal.label.as_str() } else { "n/a" };
        println!("  {:<16} {:>8}  bar {:>6.2}%", goal.name, status, goal.bar_percent);
    }

    Ok(())
}
