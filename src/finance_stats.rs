use crate::models::{ExpenseCategory, Transaction, TransactionType};
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
}

fn in_month(transaction: &Transaction, year: i32, month: u32) -> bool {
    transaction.date.year() == year && transaction.date.month() == month
}

pub fn monthly_summary(transactions: &[Transaction], year: i32, month: u32) -> FinancialSummary {
    let mut summary = FinancialSummary::default();
    for transaction in transactions.iter().filter(|t| in_month(t, year, month)) {
        match transaction.kind {
            TransactionType::Income => summary.income += transaction.amount,
            TransactionType::Expense => summary.expenses += transaction.amount,
        }
    }
    summary.balance = summary.income - summary.expenses;
    summary
}

/// Expense totals for the month, largest first. Categories with nothing
/// spent are left out.
pub fn expenses_by_category(
    transactions: &[Transaction],
    year: i32,
    month: u32,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<ExpenseCategory, f64> = HashMap::new();
    for transaction in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && in_month(t, year, month))
    {
        *totals.entry(transaction.category).or_default() += transaction.amount;
    }

    // Walk the fixed category order so ties come out stable.
    let mut result: Vec<CategoryTotal> = ExpenseCategory::ALL
        .iter()
        .filter_map(|category| {
            totals
                .get(category)
                .filter(|amount| **amount != 0.0)
                .map(|amount| CategoryTotal {
                    category: *category,
                    amount: *amount,
                })
        })
        .collect();
    result.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    result
}
