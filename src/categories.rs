use crate::schema::{Asset, Liability, Transaction, TransactionType};
use crate::utils::{finite_or_zero, month_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name to summed amount. Iterates in lexicographic category order.
pub type CategoryTotals = BTreeMap<String, f64>;

/// One slice of a category chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Income and expense category totals over the same set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionBreakdown {
    pub income: CategoryTotals,
    pub expense: CategoryTotals,
}

/// Groups `records` by `category`, summing `amount`.
///
/// Categories are used verbatim: no trimming, no case folding. Non-finite
/// amounts contribute 0 but still register their category.
pub fn aggregate_by_category<'a, T, C, A>(
    records: impl IntoIterator<Item = &'a T>,
    category: C,
    amount: A,
) -> CategoryTotals
where
    T: 'a,
    C: Fn(&T) -> &str,
    A: Fn(&T) -> f64,
{
    let mut totals = CategoryTotals::new();

    for record in records {
        *totals.entry(category(record).to_string()).or_insert(0.0) +=
            finite_or_zero(amount(record));
    }

    totals
}

pub fn to_chart_data(totals: &CategoryTotals) -> Vec<CategoryTotal> {
    totals
        .iter()
        .map(|(category, total)| CategoryTotal {
            category: category.clone(),
            total: *total,
        })
        .collect()
}

pub fn asset_categories(assets: &[Asset]) -> CategoryTotals {
    aggregate_by_category(assets, |a| a.category.as_str(), |a| a.value)
}

pub fn liability_categories(liabilities: &[Liability]) -> CategoryTotals {
    aggregate_by_category(liabilities, |l| l.category.as_str(), |l| l.amount)
}

/// Category totals for one transaction type, optionally limited to one month key.
pub fn transaction_categories(
    transactions: &[Transaction],
    kind: TransactionType,
    month: Option<&str>,
) -> CategoryTotals {
    aggregate_by_category(
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .filter(|t| month.map_or(true, |m| month_key(&t.date) == m)),
        |t| t.category.as_str(),
        |t| t.amount,
    )
}

pub fn breakdown_transactions(
    transactions: &[Transaction],
    month: Option<&str>,
) -> TransactionBreakdown {
    TransactionBreakdown {
        income: transaction_categories(transactions, TransactionType::Income, month),
        expense: transaction_categories(transactions, TransactionType::Expense, month),
    }
}
