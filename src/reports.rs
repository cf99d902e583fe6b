use std::collections::{BTreeMap, BTreeSet};

use crate::models::Transaction;
use crate::store::BudgetData;

/// Categories excluded from spending math: money movement, not spending.
pub const EXCLUDED_CATEGORIES: &[&str] =
    &["Transfer/Payment", "Credit Payment", "Income", "Interest", "Ignore", "Refund"];

/// Recurring-obligation categories, summarized apart from discretionary
/// spending.
pub const FIXED_CATEGORIES: &[&str] =
    &["Rent", "Utilities", "Internet", "Storage", "Subscriptions", "Insurance", "Phone"];

pub fn is_excluded(category: &str) -> bool {
    EXCLUDED_CATEGORIES.contains(&category)
}

pub fn is_fixed(category: &str) -> bool {
    FIXED_CATEGORIES.contains(&category)
}

fn is_income(category: &str) -> bool {
    category == "Income" || category == "Interest"
}

/// Distinct `YYYY-MM` keys present in the collection, newest first.
pub fn available_months(transactions: &[Transaction]) -> Vec<String> {
    let months: BTreeSet<String> = transactions.iter().map(|t| t.month.clone()).collect();
    months.into_iter().rev().collect()
}

/// "2025-01" -> "Jan 2025".
pub fn month_label(month: &str) -> String {
    const NAMES: [&str; 12] =
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    let Some((year, m)) = month.split_once('-') else {
        return month.to_string();
    };
    match m.parse::<usize>() {
        Ok(n) if (1..=12).contains(&n) => format!("{} {year}", NAMES[n - 1]),
        _ => month.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Spending summary
// ---------------------------------------------------------------------------

pub struct CategoryRow {
    pub category: String,
    pub spent: f64,
    /// Monthly target for variable rows, the fixed-expense estimate for
    /// fixed rows; None when neither is configured.
    pub target: Option<f64>,
}

pub struct SpendingSummary {
    pub variable: Vec<CategoryRow>,
    pub fixed: Vec<CategoryRow>,
    pub variable_total: f64,
    pub fixed_total: f64,
    pub income_total: f64,
    pub subscriptions_total: f64,
}

impl SpendingSummary {
    pub fn total_expenses(&self) -> f64 {
        self.variable_total + self.fixed_total
    }

    pub fn net(&self) -> f64 {
        self.income_total - self.total_expenses()
    }
}

/// Per-category spending for `[from, to]`: absolute sums of categorized,
/// non-excluded transactions, split into variable vs fixed groups, with
/// income (Income + Interest) alongside.
pub fn spending_summary(data: &BudgetData, from: &str, to: &str) -> SpendingSummary {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    let mut income_total = 0.0;
    for t in &data.transactions {
        if t.date.as_str() < from || t.date.as_str() > to {
            continue;
        }
        let Some(category) = t.category.as_deref() else { continue };
        if is_income(category) {
            income_total += t.amount.abs();
        }
        if is_excluded(category) {
            continue;
        }
        *by_category.entry(category).or_default() += t.amount.abs();
    }

    let mut variable = Vec::new();
    let mut fixed = Vec::new();
    let mut variable_total = 0.0;
    let mut fixed_total = 0.0;
    for category in &data.categories {
        if is_excluded(category) {
            continue;
        }
        let spent = by_category.get(category.as_str()).copied().unwrap_or(0.0);
        if is_fixed(category) {
            fixed_total += spent;
            fixed.push(CategoryRow {
                category: category.clone(),
                spent,
                target: data.fixed_expenses.get(category).copied(),
            });
        } else {
            variable_total += spent;
            variable.push(CategoryRow {
                category: category.clone(),
                spent,
                target: data.budget_targets.get(category).copied(),
            });
        }
    }

    let subscriptions_total = data.subscriptions.iter().map(|s| s.amount).sum();

    SpendingSummary { variable, fixed, variable_total, fixed_total, income_total, subscriptions_total }
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

pub struct MonthFlow {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthFlow {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Income vs expenses per month over `[from, to]`, oldest first. Only
/// categorized transactions participate.
pub fn cashflow_by_month(transactions: &[Transaction], from: &str, to: &str) -> Vec<MonthFlow> {
    let mut flows: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for t in transactions {
        if t.date.as_str() < from || t.date.as_str() > to {
            continue;
        }
        let Some(category) = t.category.as_deref() else { continue };
        let entry = flows.entry(t.month.clone()).or_default();
        if is_income(category) {
            entry.0 += t.amount.abs();
        } else if !is_excluded(category) {
            entry.1 += t.amount.abs();
        }
    }
    flows
        .into_iter()
        .map(|(month, (income, expenses))| MonthFlow { month, income, expenses })
        .collect()
}

/// Month × variable-category spend matrix for `[from, to]`: one row per
/// month (oldest first), one value per non-excluded, non-fixed category in
/// catalog order.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[String],
    from: &str,
    to: &str,
) -> (Vec<String>, Vec<(String, Vec<f64>)>) {
    let variable: Vec<String> = categories
        .iter()
        .filter(|c| !is_excluded(c) && !is_fixed(c))
        .cloned()
        .collect();

    let mut per_month: BTreeMap<String, BTreeMap<&str, f64>> = BTreeMap::new();
    for t in transactions {
        if t.date.as_str() < from || t.date.as_str() > to {
            continue;
        }
        let Some(category) = t.category.as_deref() else { continue };
        if is_excluded(category) {
            continue;
        }
        *per_month.entry(t.month.clone()).or_default().entry(category).or_default() +=
            t.amount.abs();
    }

    let rows = per_month
        .into_iter()
        .map(|(month, sums)| {
            let values =
                variable.iter().map(|c| sums.get(c.as_str()).copied().unwrap_or(0.0)).collect();
            (month, values)
        })
        .collect();
    (variable, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{month_key, new_id, AccountId};
    use crate::store::BudgetData;

    fn txn(date: &str, amount: f64, category: Option<&str>) -> Transaction {
        Transaction {
            id: new_id(),
            date: date.to_string(),
            description: "txn".to_string(),
            amount,
            category: category.map(str::to_string),
            account: AccountId::WfChecking,
            reviewed: false,
            month: month_key(date),
        }
    }

    fn data_with(transactions: Vec<Transaction>) -> BudgetData {
        BudgetData { transactions, ..BudgetData::default() }
    }

    #[test]
    fn test_category_classification() {
        assert!(is_excluded("Transfer/Payment"));
        assert!(is_excluded("Refund"));
        assert!(is_fixed("Rent"));
        assert!(!is_fixed("Groceries"));
        assert!(!is_excluded("Groceries"));
    }

    #[test]
    fn test_available_months_newest_first() {
        let txns =
            vec![txn("2025-01-10", -1.0, None), txn("2025-03-10", -1.0, None), txn("2025-01-20", -1.0, None)];
        assert_eq!(available_months(&txns), vec!["2025-03", "2025-01"]);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2025-01"), "Jan 2025");
        assert_eq!(month_label("2024-12"), "Dec 2024");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn test_spending_summary_splits_fixed_and_variable() {
        let data = data_with(vec![
            txn("2025-11-05", -42.10, Some("Groceries")),
            txn("2025-11-06", -57.90, Some("Groceries")),
            txn("2025-11-07", -1200.0, Some("Rent")),
            txn("2025-11-08", 2000.0, Some("Income")),
            txn("2025-11-09", -300.0, Some("Transfer/Payment")),
            txn("2025-11-10", -99.0, None),
            txn("2025-12-01", -500.0, Some("Groceries")),
        ]);
        let summary = spending_summary(&data, "2025-11-01", "2025-11-30");
        assert_eq!(summary.variable_total, 100.0);
        assert_eq!(summary.fixed_total, 1200.0);
        assert_eq!(summary.income_total, 2000.0);
        assert_eq!(summary.total_expenses(), 1300.0);
        assert_eq!(summary.net(), 700.0);

        let groceries = summary.variable.iter().find(|r| r.category == "Groceries").unwrap();
        assert_eq!(groceries.spent, 100.0);
        // Default budget targets seed Groceries at 400/mo.
        assert_eq!(groceries.target, Some(400.0));

        let rent = summary.fixed.iter().find(|r| r.category == "Rent").unwrap();
        assert_eq!(rent.spent, 1200.0);
    }

    #[test]
    fn test_spending_summary_counts_default_subscriptions() {
        let data = data_with(Vec::new());
        let summary = spending_summary(&data, "2025-01-01", "2025-12-31");
        assert!(summary.subscriptions_total > 0.0);
        assert_eq!(summary.income_total, 0.0);
    }

    #[test]
    fn test_cashflow_by_month() {
        let txns = vec![
            txn("2025-10-05", -50.0, Some("Groceries")),
            txn("2025-10-20", 1000.0, Some("Income")),
            txn("2025-11-05", -30.0, Some("Eating Out")),
            txn("2025-11-06", -70.0, Some("Transfer/Payment")),
            txn("2025-11-07", -10.0, None),
        ];
        let flows = cashflow_by_month(&txns, "2025-10-01", "2025-11-30");
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].month, "2025-10");
        assert_eq!(flows[0].income, 1000.0);
        assert_eq!(flows[0].expenses, 50.0);
        assert_eq!(flows[0].net(), 950.0);
        assert_eq!(flows[1].month, "2025-11");
        assert_eq!(flows[1].expenses, 30.0);
    }

    #[test]
    fn test_category_breakdown_matrix() {
        let data = data_with(Vec::new());
        let txns = vec![
            txn("2025-10-05", -50.0, Some("Groceries")),
            txn("2025-11-05", -30.0, Some("Groceries")),
            txn("2025-11-06", -20.0, Some("Eating Out")),
            txn("2025-11-07", -999.0, Some("Rent")),
        ];
        let (categories, rows) = category_breakdown(&txns, &data.categories, "2025-10-01", "2025-11-30");
        assert!(categories.contains(&"Groceries".to_string()));
        assert!(!categories.contains(&"Rent".to_string()));
        assert!(!categories.contains(&"Income".to_string()));
        assert_eq!(rows.len(), 2);
        let g = categories.iter().position(|c| c == "Groceries").unwrap();
        assert_eq!(rows[0].1[g], 50.0);
        assert_eq!(rows[1].1[g], 30.0);
    }
}
