use std::collections::BTreeMap;

use crate::models::{AccountId, BalanceSnapshot, Transaction};

/// Computed state for one account: the reference snapshot value, the signed
/// sum of transactions posted strictly after it, and the resulting balance.
/// For credit accounts `snapshot` and `current` are owed magnitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub snapshot: f64,
    pub txn_delta: f64,
    pub current: f64,
    pub txn_count: usize,
    pub is_credit: bool,
}

#[derive(Debug, Clone)]
pub struct ComputedBalances {
    /// Date of the reference snapshot.
    pub as_of: String,
    pub accounts: BTreeMap<AccountId, AccountState>,
    /// Sum of `current` over non-credit accounts.
    pub total_liquid: f64,
    /// Sum of raw snapshot values over non-credit accounts, for the
    /// since-snapshot delta.
    pub prev_total_liquid: f64,
}

/// Reference snapshot: greatest date wins; among equal dates the first
/// recorded one is kept.
fn latest_snapshot(snapshots: &[BalanceSnapshot]) -> Option<&BalanceSnapshot> {
    snapshots.iter().reduce(|best, s| if s.date > best.date { s } else { best })
}

fn delta_after(transactions: &[Transaction], account: AccountId, date: &str) -> (f64, usize) {
    let mut sum = 0.0;
    let mut count = 0;
    for t in transactions {
        if t.account == account && t.date.as_str() > date {
            sum += t.amount;
            count += 1;
        }
    }
    (sum, count)
}

fn account_state(
    snapshot: &BalanceSnapshot,
    transactions: &[Transaction],
    account: AccountId,
) -> AccountState {
    let snapshot_val = snapshot.value(account);
    let (txn_delta, txn_count) = delta_after(transactions, account, &snapshot.date);
    let is_credit = account.is_credit();
    // Credit: the snapshot stores what is owed; charges come in negative
    // (growing the debt) and payments positive, so owed = snapshot - delta.
    let current = if is_credit { snapshot_val - txn_delta } else { snapshot_val + txn_delta };
    AccountState { snapshot: snapshot_val, txn_delta, current, txn_count, is_credit }
}

/// Current balances for every account: reference snapshot adjusted by all
/// transactions dated strictly after it. None when no snapshot exists;
/// an absent baseline is not a zero balance.
pub fn compute_balances(
    snapshots: &[BalanceSnapshot],
    transactions: &[Transaction],
) -> Option<ComputedBalances> {
    let latest = latest_snapshot(snapshots)?;

    let mut accounts = BTreeMap::new();
    let mut total_liquid = 0.0;
    let mut prev_total_liquid = 0.0;
    for account in AccountId::all() {
        let state = account_state(latest, transactions, account);
        if !state.is_credit {
            total_liquid += state.current;
            prev_total_liquid += state.snapshot;
        }
        accounts.insert(account, state);
    }

    Some(ComputedBalances { as_of: latest.date.clone(), accounts, total_liquid, prev_total_liquid })
}

/// One point on the balance-over-time chart. Credit accounts are reported
/// as absolute owed magnitudes.
#[derive(Debug, Clone)]
pub struct SeriesPoint {
    pub date: String,
    pub balances: BTreeMap<AccountId, f64>,
    pub total_liquid: f64,
    /// True for the synthetic "as of today" point.
    pub is_current: bool,
}

fn snapshot_point(date: String, values: &BTreeMap<AccountId, f64>, is_current: bool) -> SeriesPoint {
    let mut balances = BTreeMap::new();
    let mut total_liquid = 0.0;
    for account in AccountId::all() {
        let val = values.get(&account).copied().unwrap_or(0.0);
        if account.is_credit() {
            balances.insert(account, val.abs());
        } else {
            balances.insert(account, val);
            total_liquid += val;
        }
    }
    SeriesPoint { date, balances, total_liquid, is_current }
}

/// Snapshot history restricted to `[from, to]`, ascending by date, plus one
/// synthetic point at `today` reconciled from the newest snapshot, only
/// when `today` lies strictly after it and inside the range.
pub fn balance_series(
    snapshots: &[BalanceSnapshot],
    transactions: &[Transaction],
    from: &str,
    to: &str,
    today: &str,
) -> Vec<SeriesPoint> {
    let mut in_range: Vec<&BalanceSnapshot> = snapshots
        .iter()
        .filter(|s| s.date.as_str() >= from && s.date.as_str() <= to)
        .collect();
    in_range.sort_by(|a, b| a.date.cmp(&b.date));

    let mut points: Vec<SeriesPoint> =
        in_range.iter().map(|s| snapshot_point(s.date.clone(), &s.balances, false)).collect();

    if let Some(latest) = latest_snapshot(snapshots) {
        if today > latest.date.as_str() && today >= from && today <= to {
            let mut computed = BTreeMap::new();
            for account in AccountId::all() {
                computed.insert(account, account_state(latest, transactions, account).current);
            }
            // account_state already reports owed magnitudes for credit
            // accounts; snapshot_point takes abs again, which is a no-op
            // unless payments overshoot the debt.
            points.push(snapshot_point(today.to_string(), &computed, true));
        }
    }

    points
}
