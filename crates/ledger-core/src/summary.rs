//! Summary metrics and per-category expense totals

use std::collections::BTreeMap;

use crate::transactions::{Ledger, Transaction};

/// Headline numbers shown above the chart
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryMetrics {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub count: usize,
}

/// Expense total for one category label
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    /// Fraction of the charted total, 0.0..=1.0
    pub share: f64,
}

/// Calculate income, expense, balance and count
pub fn summarize(transactions: &[Transaction]) -> SummaryMetrics {
    let total_income: f64 = transactions.iter().map(|t| t.income).sum();
    let total_expense: f64 = transactions.iter().map(|t| t.expense).sum();

    SummaryMetrics {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        count: transactions.len(),
    }
}

/// Calculate total expenses by category, ordered by label.
///
/// Returns None when there is nothing to chart: the file had no category
/// column, or no record has both a positive expense and a category.
pub fn expenses_by_category(ledger: &Ledger) -> Option<Vec<CategoryTotal>> {
    if !ledger.has_category_column {
        return None;
    }

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in ledger.transactions.iter().filter(|t| t.expense > 0.0) {
        if let Some(category) = tx.category.as_deref() {
            *totals.entry(category).or_insert(0.0) += tx.expense;
        }
    }

    if totals.is_empty() {
        return None;
    }

    let grand_total: f64 = totals.values().sum();
    Some(
        totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_string(),
                amount,
                share: amount / grand_total,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(day: u32, description: &str, income: f64, expense: f64, category: Option<&str>) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description: description.to_string(),
            income,
            expense,
            income_text: income.to_string(),
            expense_text: expense.to_string(),
            category: category.map(str::to_string),
        }
    }

    fn ledger(transactions: Vec<Transaction>) -> Ledger {
        Ledger {
            source: "test.csv".to_string(),
            has_category_column: true,
            transactions,
        }
    }

    #[test]
    fn test_example_scenario() {
        let ledger = ledger(vec![
            tx(1, "Lunch", 0.0, 20.0, Some("Food")),
            tx(2, "Salary", 1000.0, 0.0, Some("Income")),
        ]);

        let summary = summarize(&ledger.transactions);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expense, 20.0);
        assert_eq!(summary.balance, 980.0);
        assert_eq!(summary.count, 2);

        let categories = expenses_by_category(&ledger).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category, "Food");
        assert_eq!(categories[0].amount, 20.0);
        assert_eq!(categories[0].share, 1.0);
    }

    #[test]
    fn test_empty_ledger() {
        let summary = summarize(&[]);
        assert_eq!(summary, SummaryMetrics::default());
        assert_eq!(expenses_by_category(&ledger(Vec::new())), None);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let summary = summarize(&[tx(1, "Rent", 0.0, 800.0, Some("Housing")), tx(2, "Pay", 500.5, 0.0, None)]);
        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
        assert_eq!(summary.balance, -299.5);
    }

    #[test]
    fn test_categories_sum_to_total_expense() {
        let ledger = ledger(vec![
            tx(1, "Coffee", 0.0, 4.5, Some("Food")),
            tx(2, "Books", 0.0, 60.0, Some("Study")),
            tx(3, "Dinner", 0.0, 25.5, Some("Food")),
            tx(4, "Allowance", 300.0, 0.0, Some("Income")),
        ]);

        let categories = expenses_by_category(&ledger).unwrap();
        let labels: Vec<_> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, ["Food", "Study"]);
        assert_eq!(categories[0].amount, 30.0);

        let sum: f64 = categories.iter().map(|c| c.amount).sum();
        assert_eq!(sum, summarize(&ledger.transactions).total_expense);
        let shares: f64 = categories.iter().map(|c| c.share).sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncategorised_expenses_are_not_charted() {
        let ledger = ledger(vec![tx(1, "Misc", 0.0, 10.0, None), tx(2, "Gift", 50.0, 0.0, Some("Income"))]);
        assert_eq!(expenses_by_category(&ledger), None);
    }

    #[test]
    fn test_no_category_column_omits_chart() {
        let mut ledger = ledger(vec![tx(1, "Lunch", 0.0, 20.0, None)]);
        ledger.has_category_column = false;
        assert_eq!(expenses_by_category(&ledger), None);
    }
}
