use crate::schema::{Asset, Liability, Transaction, TransactionType};
use crate::utils::finite_or_zero;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTotals {
    pub total_assets: f64,
    pub total_liabilities: f64,
    /// Assets minus liabilities
    pub net_worth: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses
    pub net_cash_flow: f64,
}

pub fn total_assets(assets: &[Asset]) -> f64 {
    assets.iter().map(|a| finite_or_zero(a.value)).sum()
}

pub fn total_liabilities(liabilities: &[Liability]) -> f64 {
    liabilities.iter().map(|l| finite_or_zero(l.amount)).sum()
}

pub fn calculate_balance_totals(assets: &[Asset], liabilities: &[Liability]) -> BalanceTotals {
    let total_assets = total_assets(assets);
    let total_liabilities = total_liabilities(liabilities);

    BalanceTotals {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

pub fn calculate_cash_flow_totals(transactions: &[Transaction]) -> CashFlowTotals {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;

    for tx in transactions {
        let amount = finite_or_zero(tx.amount);
        match tx.kind {
            TransactionType::Income => total_income += amount,
            TransactionType::Expense => total_expenses += amount,
        }
    }

    CashFlowTotals {
        total_income,
        total_expenses,
        net_cash_flow: total_income - total_expenses,
    }
}
