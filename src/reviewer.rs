use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Transaction;

static LONG_DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4,}").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Normalize a description for exact-merchant comparison: lowercase, drop
/// long digit runs (card/store numbers), collapse whitespace, strip `#`/`*`.
pub fn normalize_merchant(description: &str) -> String {
    let lower = description.to_lowercase();
    let no_digits = LONG_DIGIT_RUNS.replace_all(&lower, "");
    let collapsed = MULTI_SPACE.replace_all(&no_digits, " ");
    collapsed.replace(['#', '*'], "").trim().to_string()
}

/// Merchant-prefix key: first 3 tokens of the normalized description,
/// capped at 40 characters.
pub fn merchant_key(description: &str) -> String {
    let norm = normalize_merchant(description);
    let prefix: Vec<&str> = norm.split_whitespace().take(3).collect();
    prefix.join(" ").chars().take(40).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Merchant,
}

fn is_similar(anchor: &Transaction, other: &Transaction, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => normalize_merchant(&other.description) == normalize_merchant(&anchor.description),
        MatchMode::Merchant => merchant_key(&other.description) == merchant_key(&anchor.description),
    }
}

/// How many *other* transactions match the anchor under `mode`. Exact and
/// merchant counts are independent; neither contains the other by
/// construction.
pub fn count_similar(transactions: &[Transaction], anchor: &Transaction, mode: MatchMode) -> usize {
    transactions
        .iter()
        .filter(|t| t.id != anchor.id && is_similar(anchor, t, mode))
        .count()
}

/// Assign `category` to the anchor and every transaction matching it under
/// `mode`. Returns how many transactions were assigned.
pub fn apply_to_similar(
    transactions: &mut [Transaction],
    anchor_id: &str,
    category: &str,
    mode: MatchMode,
) -> usize {
    let Some(anchor) = transactions.iter().find(|t| t.id == anchor_id).cloned() else {
        return 0;
    };
    let mut applied = 0;
    for t in transactions.iter_mut() {
        if t.id == anchor.id || is_similar(&anchor, t, mode) {
            t.category = Some(category.to_string());
            applied += 1;
        }
    }
    applied
}

// ---------------------------------------------------------------------------
// Reviewed-flag workflow
// ---------------------------------------------------------------------------

/// Mark one transaction reviewed. Refused while it has no category.
pub fn mark_reviewed(transactions: &mut [Transaction], id: &str) -> Option<bool> {
    let txn = transactions.iter_mut().find(|t| t.id == id)?;
    if txn.category.is_none() {
        return Some(false);
    }
    txn.reviewed = true;
    Some(true)
}

/// Mark every categorized transaction in `[from, to]` reviewed; returns the
/// number newly marked.
pub fn mark_range_reviewed(transactions: &mut [Transaction], from: &str, to: &str) -> usize {
    let mut marked = 0;
    for t in transactions.iter_mut() {
        if t.category.is_some()
            && !t.reviewed
            && t.date.as_str() >= from
            && t.date.as_str() <= to
        {
            t.reviewed = true;
            marked += 1;
        }
    }
    marked
}

pub struct ReviewStats {
    pub total: usize,
    pub reviewed: usize,
}

impl ReviewStats {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.reviewed as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

pub fn review_stats(transactions: &[Transaction], from: &str, to: &str) -> ReviewStats {
    let in_range: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date.as_str() >= from && t.date.as_str() <= to)
        .collect();
    ReviewStats {
        total: in_range.len(),
        reviewed: in_range.iter().filter(|t| t.reviewed).count(),
    }
}
