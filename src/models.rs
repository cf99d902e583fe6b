use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::BudgetError;

// ---------------------------------------------------------------------------
// Accounts: fixed catalog, not user-extensible
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountId {
    WfChecking,
    WfCredit,
    DiscoverCredit,
    SofiChecking,
    SofiSavings,
    Venmo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
}

pub struct Account {
    pub id: AccountId,
    pub label: &'static str,
    pub kind: AccountKind,
}

pub const ACCOUNTS: &[Account] = &[
    Account { id: AccountId::WfChecking, label: "Wells Fargo Checking", kind: AccountKind::Checking },
    Account { id: AccountId::WfCredit, label: "Wells Fargo Credit", kind: AccountKind::Credit },
    Account { id: AccountId::DiscoverCredit, label: "Discover Credit", kind: AccountKind::Credit },
    Account { id: AccountId::SofiChecking, label: "SoFi Checking", kind: AccountKind::Checking },
    Account { id: AccountId::SofiSavings, label: "SoFi Savings", kind: AccountKind::Savings },
    Account { id: AccountId::Venmo, label: "Venmo", kind: AccountKind::Checking },
];

impl AccountId {
    pub fn all() -> impl Iterator<Item = AccountId> {
        ACCOUNTS.iter().map(|a| a.id)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::WfChecking => "wf_checking",
            Self::WfCredit => "wf_credit",
            Self::DiscoverCredit => "discover_credit",
            Self::SofiChecking => "sofi_checking",
            Self::SofiSavings => "sofi_savings",
            Self::Venmo => "venmo",
        }
    }

    pub fn label(&self) -> &'static str {
        ACCOUNTS.iter().find(|a| a.id == *self).map(|a| a.label).unwrap_or("")
    }

    pub fn kind(&self) -> AccountKind {
        ACCOUNTS
            .iter()
            .find(|a| a.id == *self)
            .map(|a| a.kind)
            .unwrap_or(AccountKind::Checking)
    }

    /// Credit (liability) accounts store owed amounts; everything else is
    /// an asset balance.
    pub fn is_credit(&self) -> bool {
        self.kind() == AccountKind::Credit
    }
}

impl std::str::FromStr for AccountId {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountId::all()
            .find(|a| a.key() == s)
            .ok_or_else(|| BudgetError::UnknownAccount(s.to_string()))
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single imported financial event. Immutable once created except for the
/// user-editable `category` and `reviewed` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ISO `YYYY-MM-DD` posting date.
    pub date: String,
    pub description: String,
    /// Negative = outflow, positive = inflow. The credit-account sign
    /// convention lives in the reconciler, not here.
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    pub account: AccountId,
    #[serde(default)]
    pub reviewed: bool,
    /// `YYYY-MM`, derived from `date` and stored for fast grouping.
    pub month: String,
}

/// A manually recorded true balance per account as of a date. Credit
/// accounts record the amount owed as a non-negative magnitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub id: String,
    pub date: String,
    #[serde(flatten)]
    pub balances: BTreeMap<AccountId, f64>,
}

impl BalanceSnapshot {
    pub fn value(&self, account: AccountId) -> f64 {
        self.balances.get(&account).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Opaque identifier, assigned once at creation and never reused.
pub fn new_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// `YYYY-MM` grouping key for an ISO date.
pub fn month_key(date: &str) -> String {
    date.get(..7).unwrap_or(date).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_round_trip_keys() {
        for account in AccountId::all() {
            let parsed: AccountId = account.key().parse().unwrap();
            assert_eq!(parsed, account);
        }
    }

    #[test]
    fn test_unknown_account_rejected() {
        assert!("chase_checking".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_credit_classification() {
        assert!(AccountId::WfCredit.is_credit());
        assert!(AccountId::DiscoverCredit.is_credit());
        assert!(!AccountId::WfChecking.is_credit());
        assert!(!AccountId::SofiSavings.is_credit());
        assert!(!AccountId::Venmo.is_credit());
    }

    #[test]
    fn test_account_serializes_as_snake_case_key() {
        let json = serde_json::to_string(&AccountId::DiscoverCredit).unwrap();
        assert_eq!(json, "\"discover_credit\"");
    }

    #[test]
    fn test_snapshot_missing_account_defaults_to_zero() {
        let snap = BalanceSnapshot {
            id: new_id(),
            date: "2025-01-01".to_string(),
            balances: BTreeMap::from([(AccountId::WfChecking, 100.0)]),
        };
        assert_eq!(snap.value(AccountId::WfChecking), 100.0);
        assert_eq!(snap.value(AccountId::Venmo), 0.0);
    }

    #[test]
    fn test_snapshot_json_shape_is_flat() {
        let snap = BalanceSnapshot {
            id: "abc123".to_string(),
            date: "2025-11-14".to_string(),
            balances: BTreeMap::from([(AccountId::WfCredit, 477.50)]),
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["wf_credit"], 477.50);
        assert_eq!(json["date"], "2025-11-14");
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key("2025-11-05"), "2025-11");
        assert_eq!(month_key("2025-01"), "2025-01");
    }

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(new_id(), id);
    }
}
