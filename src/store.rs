use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, Result};
use crate::models::{new_id, AccountId, BalanceSnapshot, Subscription, Transaction};

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Groceries",
    "Eating Out",
    "Coffee/Drinks",
    "Gas/Transport",
    "Travel",
    "Doctors/Health",
    "Home/Cat/Shipping",
    "Alcohol/Snacks/Entertainment",
    "Clothing/Beauty",
    "Education/Books",
    "Gifts/Donations",
    "Fitness/Wellness",
    "Misc",
    "Rent",
    "Utilities",
    "Storage",
    "Subscriptions",
    "Insurance",
    "Phone",
    "Internet",
    "Transfer/Payment",
    "Income",
    "Refund",
    "Ignore",
];

const DEFAULT_BUDGET_TARGETS: &[(&str, f64)] = &[
    ("Groceries", 400.0),
    ("Eating Out", 200.0),
    ("Coffee/Drinks", 50.0),
    ("Gas/Transport", 50.0),
    ("Travel", 0.0),
    ("Doctors/Health", 400.0),
    ("Fitness/Wellness", 50.0),
    ("Home/Cat/Shipping", 100.0),
    ("Alcohol/Snacks/Entertainment", 100.0),
    ("Clothing/Beauty", 100.0),
    ("Education/Books", 50.0),
    ("Gifts/Donations", 50.0),
    ("Misc", 100.0),
];

const DEFAULT_FIXED_EXPENSES: &[(&str, f64)] = &[
    ("Rent", 0.0),
    ("Utilities", 0.0),
    ("Internet", 0.0),
    ("Storage", 116.0),
    ("Subscriptions", 0.0),
    ("Insurance", 0.0),
    ("Phone", 45.0),
];

const DEFAULT_SUBSCRIPTIONS: &[(&str, f64)] = &[
    ("Flo", 15.0),
    ("Hulu", 20.56),
    ("Planet Fitness", 10.83),
    ("iCloud", 2.99),
    ("Spotify", 11.90),
    ("Audible", 13.30),
    ("Spectrum", 35.17),
];

/// The whole budget: one aggregate, replaced wholesale on every mutation.
/// Fields missing from a persisted document fall back to these defaults,
/// so older data files migrate by omission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetData {
    pub transactions: Vec<Transaction>,
    pub balance_snapshots: Vec<BalanceSnapshot>,
    pub budget_targets: BTreeMap<String, f64>,
    pub fixed_expenses: BTreeMap<String, f64>,
    pub categories: Vec<String>,
    pub subscriptions: Vec<Subscription>,
}

impl Default for BudgetData {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            balance_snapshots: Vec::new(),
            budget_targets: DEFAULT_BUDGET_TARGETS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            fixed_expenses: DEFAULT_FIXED_EXPENSES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            subscriptions: DEFAULT_SUBSCRIPTIONS
                .iter()
                .map(|(name, amount)| Subscription { name: name.to_string(), amount: *amount })
                .collect(),
        }
    }
}

fn valid_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| BudgetError::Other(format!("Invalid date '{date}', expected YYYY-MM-DD")))
}

impl BudgetData {
    // -- transactions ------------------------------------------------------

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions.extend(transactions);
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Err(BudgetError::UnknownTransaction(id.to_string()));
        }
        Ok(())
    }

    /// Set or clear a transaction's category. A named category must exist
    /// in the catalog.
    pub fn set_category(&mut self, id: &str, category: Option<&str>) -> Result<()> {
        if let Some(name) = category {
            if !self.categories.iter().any(|c| c == name) {
                return Err(BudgetError::UnknownCategory(name.to_string()));
            }
        }
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BudgetError::UnknownTransaction(id.to_string()))?;
        txn.category = category.map(str::to_string);
        Ok(())
    }

    // -- snapshots ---------------------------------------------------------

    pub fn add_snapshot(&mut self, date: &str, values: &[(AccountId, f64)]) -> Result<String> {
        valid_date(date)?;
        let id = new_id();
        self.balance_snapshots.push(BalanceSnapshot {
            id: id.clone(),
            date: date.to_string(),
            balances: values.iter().copied().collect(),
        });
        Ok(id)
    }

    pub fn delete_snapshot(&mut self, id: &str) -> Result<()> {
        let before = self.balance_snapshots.len();
        self.balance_snapshots.retain(|s| s.id != id);
        if self.balance_snapshots.len() == before {
            return Err(BudgetError::Other(format!("No snapshot with id: {id}")));
        }
        Ok(())
    }

    /// Fold a balance observed during import into the snapshot history:
    /// update the snapshot already on that date, or start a new one carrying
    /// the latest snapshot's other account values forward.
    pub fn record_latest_balance(&mut self, account: AccountId, date: &str, balance: f64) {
        if let Some(snap) = self.balance_snapshots.iter_mut().find(|s| s.date == date) {
            snap.balances.insert(account, balance);
            return;
        }
        let mut balances = self
            .balance_snapshots
            .iter()
            .reduce(|best, s| if s.date > best.date { s } else { best })
            .map(|s| s.balances.clone())
            .unwrap_or_default();
        balances.insert(account, balance);
        self.balance_snapshots.push(BalanceSnapshot {
            id: new_id(),
            date: date.to_string(),
            balances,
        });
    }

    // -- categories --------------------------------------------------------

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(BudgetError::Other("Category name cannot be empty".to_string()));
        }
        if self.categories.iter().any(|c| c == name) {
            return Err(BudgetError::Other(format!("Category already exists: {name}")));
        }
        self.categories.push(name.to_string());
        Ok(())
    }

    /// Remove a category from the catalog. Refused while any transaction
    /// still references it.
    pub fn remove_category(&mut self, name: &str) -> Result<()> {
        if !self.categories.iter().any(|c| c == name) {
            return Err(BudgetError::UnknownCategory(name.to_string()));
        }
        if self.transactions.iter().any(|t| t.category.as_deref() == Some(name)) {
            return Err(BudgetError::CategoryInUse(name.to_string()));
        }
        self.categories.retain(|c| c != name);
        Ok(())
    }

    /// Rename a category and cascade to transactions, budget targets and
    /// fixed expenses.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.categories.iter().any(|c| c == old) {
            return Err(BudgetError::UnknownCategory(old.to_string()));
        }
        if new.trim().is_empty() {
            return Err(BudgetError::Other("Category name cannot be empty".to_string()));
        }
        if new != old && self.categories.iter().any(|c| c == new) {
            return Err(BudgetError::Other(format!("Category already exists: {new}")));
        }
        for c in self.categories.iter_mut() {
            if c == old {
                *c = new.to_string();
            }
        }
        for t in self.transactions.iter_mut() {
            if t.category.as_deref() == Some(old) {
                t.category = Some(new.to_string());
            }
        }
        if let Some(v) = self.budget_targets.remove(old) {
            self.budget_targets.insert(new.to_string(), v);
        }
        if let Some(v) = self.fixed_expenses.remove(old) {
            self.fixed_expenses.insert(new.to_string(), v);
        }
        Ok(())
    }

    // -- budget targets and subscriptions ----------------------------------

    pub fn set_budget_target(&mut self, category: &str, amount: f64) -> Result<()> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(BudgetError::UnknownCategory(category.to_string()));
        }
        if amount < 0.0 {
            return Err(BudgetError::Other("Budget target must be >= 0".to_string()));
        }
        self.budget_targets.insert(category.to_string(), amount);
        Ok(())
    }

    pub fn unset_budget_target(&mut self, category: &str) -> Result<()> {
        self.budget_targets
            .remove(category)
            .map(|_| ())
            .ok_or_else(|| BudgetError::Other(format!("No budget target for: {category}")))
    }

    pub fn add_subscription(&mut self, name: &str, amount: f64) {
        self.subscriptions.push(Subscription { name: name.to_string(), amount });
    }

    pub fn remove_subscription(&mut self, name: &str) -> Result<()> {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.name != name);
        if self.subscriptions.len() == before {
            return Err(BudgetError::Other(format!("No subscription named: {name}")));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Persistence: one JSON document, read and written wholesale
// ---------------------------------------------------------------------------

pub fn parse(content: &str) -> Result<BudgetData> {
    serde_json::from_str(content).map_err(|e| BudgetError::Store(e.to_string()))
}

/// Missing file means a fresh start; a file that exists but does not parse
/// is surfaced as an error rather than silently replaced.
pub fn load(path: &Path) -> Result<BudgetData> {
    if !path.exists() {
        return Ok(BudgetData::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| BudgetError::Store(format!("{}: {e}", path.display())))
}

pub fn save(path: &Path, data: &BudgetData) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|e| BudgetError::Store(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::month_key;

    fn txn(date: &str, category: Option<&str>) -> Transaction {
        Transaction {
            id: new_id(),
            date: date.to_string(),
            description: "txn".to_string(),
            amount: -10.0,
            category: category.map(str::to_string),
            account: AccountId::WfChecking,
            reviewed: false,
            month: month_key(date),
        }
    }

    #[test]
    fn test_defaults_are_seeded() {
        let data = BudgetData::default();
        assert_eq!(data.categories.len(), 24);
        assert_eq!(data.budget_targets.get("Groceries"), Some(&400.0));
        assert_eq!(data.fixed_expenses.get("Storage"), Some(&116.0));
        assert_eq!(data.subscriptions.len(), 7);
        assert!(data.transactions.is_empty());
    }

    #[test]
    fn test_parse_fills_missing_fields_with_defaults() {
        let data = parse(r#"{"transactions": []}"#).unwrap();
        assert_eq!(data.categories.len(), 24);
        assert_eq!(data.budget_targets.get("Eating Out"), Some(&200.0));
    }

    #[test]
    fn test_parse_keeps_persisted_fields() {
        let data = parse(r#"{"categories": ["Only One"], "budgetTargets": {"Only One": 5.0}}"#).unwrap();
        assert_eq!(data.categories, vec!["Only One"]);
        assert_eq!(data.budget_targets.get("Only One"), Some(&5.0));
        // Untouched fields still default.
        assert_eq!(data.subscriptions.len(), 7);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("{not json").is_err());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data = load(&dir.path().join("budget.json")).unwrap();
        assert_eq!(data.categories.len(), 24);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.json");
        let mut data = BudgetData::default();
        data.add_transactions(vec![txn("2025-11-05", Some("Groceries"))]);
        data.add_snapshot("2025-11-14", &[(AccountId::WfCredit, 477.50)]).unwrap();
        save(&path, &data).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.transactions.len(), 1);
        assert_eq!(loaded.transactions[0].category.as_deref(), Some("Groceries"));
        assert_eq!(loaded.balance_snapshots[0].value(AccountId::WfCredit), 477.50);
    }

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let json = serde_json::to_value(BudgetData::default()).unwrap();
        assert!(json.get("balanceSnapshots").is_some());
        assert!(json.get("budgetTargets").is_some());
        assert!(json.get("fixedExpenses").is_some());
    }

    #[test]
    fn test_set_category_validates() {
        let mut data = BudgetData::default();
        data.add_transactions(vec![txn("2025-11-05", None)]);
        let id = data.transactions[0].id.clone();

        assert!(data.set_category(&id, Some("Nope")).is_err());
        data.set_category(&id, Some("Groceries")).unwrap();
        assert_eq!(data.transactions[0].category.as_deref(), Some("Groceries"));
        data.set_category(&id, None).unwrap();
        assert_eq!(data.transactions[0].category, None);
        assert!(data.set_category("missing", Some("Groceries")).is_err());
    }

    #[test]
    fn test_remove_category_refuses_while_in_use() {
        let mut data = BudgetData::default();
        data.add_transactions(vec![txn("2025-11-05", Some("Groceries"))]);
        match data.remove_category("Groceries") {
            Err(BudgetError::CategoryInUse(name)) => assert_eq!(name, "Groceries"),
            other => panic!("expected CategoryInUse, got {other:?}"),
        }
        data.transactions.clear();
        data.remove_category("Groceries").unwrap();
        assert!(!data.categories.iter().any(|c| c == "Groceries"));
    }

    #[test]
    fn test_rename_category_cascades() {
        let mut data = BudgetData::default();
        data.add_transactions(vec![txn("2025-11-05", Some("Groceries"))]);
        data.rename_category("Groceries", "Food").unwrap();
        assert!(data.categories.iter().any(|c| c == "Food"));
        assert!(!data.categories.iter().any(|c| c == "Groceries"));
        assert_eq!(data.transactions[0].category.as_deref(), Some("Food"));
        assert_eq!(data.budget_targets.get("Food"), Some(&400.0));
        assert!(data.budget_targets.get("Groceries").is_none());
    }

    #[test]
    fn test_rename_rejects_existing_target_name() {
        let mut data = BudgetData::default();
        assert!(data.rename_category("Groceries", "Eating Out").is_err());
    }

    #[test]
    fn test_add_snapshot_validates_date() {
        let mut data = BudgetData::default();
        assert!(data.add_snapshot("2025-13-40", &[]).is_err());
        assert!(data.add_snapshot("11/14/2025", &[]).is_err());
        data.add_snapshot("2025-11-14", &[(AccountId::WfChecking, 1000.0)]).unwrap();
        assert_eq!(data.balance_snapshots.len(), 1);
    }

    #[test]
    fn test_record_latest_balance_merges_same_date() {
        let mut data = BudgetData::default();
        data.add_snapshot("2025-11-14", &[(AccountId::WfChecking, 1000.0)]).unwrap();
        data.record_latest_balance(AccountId::SofiSavings, "2025-11-14", 5000.0);
        assert_eq!(data.balance_snapshots.len(), 1);
        assert_eq!(data.balance_snapshots[0].value(AccountId::SofiSavings), 5000.0);
        assert_eq!(data.balance_snapshots[0].value(AccountId::WfChecking), 1000.0);
    }

    #[test]
    fn test_record_latest_balance_carries_forward() {
        let mut data = BudgetData::default();
        data.add_snapshot("2025-11-01", &[(AccountId::WfChecking, 900.0), (AccountId::WfCredit, 477.5)])
            .unwrap();
        data.record_latest_balance(AccountId::WfChecking, "2025-11-20", 1000.0);
        assert_eq!(data.balance_snapshots.len(), 2);
        let new_snap = data.balance_snapshots.iter().find(|s| s.date == "2025-11-20").unwrap();
        assert_eq!(new_snap.value(AccountId::WfChecking), 1000.0);
        assert_eq!(new_snap.value(AccountId::WfCredit), 477.5);
    }

    #[test]
    fn test_record_latest_balance_with_no_history() {
        let mut data = BudgetData::default();
        data.record_latest_balance(AccountId::Venmo, "2025-11-20", 42.0);
        assert_eq!(data.balance_snapshots.len(), 1);
        assert_eq!(data.balance_snapshots[0].value(AccountId::Venmo), 42.0);
        assert_eq!(data.balance_snapshots[0].value(AccountId::WfChecking), 0.0);
    }

    #[test]
    fn test_budget_target_rules() {
        let mut data = BudgetData::default();
        assert!(data.set_budget_target("Nope", 100.0).is_err());
        assert!(data.set_budget_target("Groceries", -5.0).is_err());
        data.set_budget_target("Groceries", 450.0).unwrap();
        assert_eq!(data.budget_targets.get("Groceries"), Some(&450.0));
        data.unset_budget_target("Groceries").unwrap();
        assert!(data.unset_budget_target("Groceries").is_err());
    }

    #[test]
    fn test_subscriptions() {
        let mut data = BudgetData::default();
        data.add_subscription("Nebula", 3.0);
        assert!(data.subscriptions.iter().any(|s| s.name == "Nebula"));
        data.remove_subscription("Nebula").unwrap();
        assert!(data.remove_subscription("Nebula").is_err());
    }

    #[test]
    fn test_delete_transaction() {
        let mut data = BudgetData::default();
        data.add_transactions(vec![txn("2025-11-05", None)]);
        let id = data.transactions[0].id.clone();
        data.delete_transaction(&id).unwrap();
        assert!(data.transactions.is_empty());
        assert!(data.delete_transaction(&id).is_err());
    }
}
