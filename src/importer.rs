use std::collections::HashSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::models::{month_key, new_id, AccountId, Transaction};

// Header row classification: any first-row cell starting with one of the
// well-known column tokens marks the file as headered.
static HEADER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(date|description|amount|posted|transaction|type|balance)").unwrap());
static MDY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());
static YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static CURRENCY_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d$,.-]+$").unwrap());

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Strip currency symbols, separators and whitespace, then parse.
/// Parenthesized values are negative; anything else unparseable is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let s: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"') && !c.is_whitespace())
        .collect();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

/// Normalize a cell to ISO `YYYY-MM-DD`. Accepts `M/D/YYYY`, ISO
/// passthrough, and a few fallback formats; None drops the row.
pub fn parse_date(raw: &str) -> Option<String> {
    let s = raw.trim();
    if let Some(caps) = MDY.captures(s) {
        let m: u32 = caps[1].parse().ok()?;
        let d: u32 = caps[2].parse().ok()?;
        let y: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d).map(|dt| dt.format("%Y-%m-%d").to_string());
    }
    if YMD.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(|_| s.to_string());
    }
    for fmt in ["%m-%d-%Y", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LatestBalance {
    pub date: String,
    pub balance: f64,
}

pub struct ParseOutcome {
    pub transactions: Vec<Transaction>,
    pub latest_balance: Option<LatestBalance>,
}

/// Tracks the balance candidate with the greatest date seen so far.
/// Ties favor the later-seen row.
#[derive(Default)]
struct BalanceTracker {
    date: Option<String>,
    balance: Option<f64>,
}

impl BalanceTracker {
    fn observe(&mut self, date: &str, balance: f64) {
        match &self.date {
            Some(latest) if date < latest.as_str() => {}
            _ => {
                self.date = Some(date.to_string());
                self.balance = Some(balance);
            }
        }
    }

    fn into_latest(self) -> Option<LatestBalance> {
        match (self.date, self.balance) {
            (Some(date), Some(balance)) => Some(LatestBalance { date, balance }),
            _ => None,
        }
    }
}

/// Parse raw CSV text into transaction drafts for `account`.
///
/// Rows with unparseable dates are skipped, not errored; a tokenizer-level
/// failure aborts the whole import with nothing admitted.
pub fn parse_csv(content: &str, account: AccountId) -> Result<ParseOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.iter().any(|c| !c.trim().is_empty()) {
            rows.push(cells);
        }
    }

    if rows.is_empty() {
        return Ok(ParseOutcome { transactions: Vec::new(), latest_balance: None });
    }

    let has_header = rows[0].iter().any(|cell| HEADER_TOKEN.is_match(cell.trim()));
    if has_header {
        Ok(parse_headered(&rows, account))
    } else {
        Ok(parse_positional(&rows, account))
    }
}

fn draft(account: AccountId, date: String, description: String, amount: f64) -> Transaction {
    let month = month_key(&date);
    Transaction {
        id: new_id(),
        date,
        description,
        amount,
        category: None,
        account,
        reviewed: false,
        month,
    }
}

/// Header-index lookup layout (SoFi-style exports and most banks).
fn parse_headered(rows: &[Vec<String>], account: AccountId) -> ParseOutcome {
    let headers: Vec<String> = rows[0].iter().map(|h| h.to_lowercase().trim().to_string()).collect();

    let date_idx = headers.iter().position(|h| h.contains("date") || h.contains("posted"));
    let desc_idx = headers.iter().position(|h| {
        h.contains("description") || h.contains("memo") || h.contains("detail") || h.contains("name")
    });
    let amount_idx = headers.iter().position(|h| h == "amount");
    let debit_idx = headers.iter().position(|h| h.contains("debit") || h.contains("withdrawal"));
    let credit_idx = headers.iter().position(|h| h.contains("credit") || h.contains("deposit"));
    let balance_idx =
        headers.iter().position(|h| h.contains("balance") || h.contains("running") || h.contains("available"));

    let mut transactions = Vec::new();
    let mut tracker = BalanceTracker::default();

    for row in &rows[1..] {
        let Some(date) = date_idx.and_then(|i| row.get(i)).and_then(|c| parse_date(c)) else {
            continue;
        };

        let amount = if let Some(i) = amount_idx {
            parse_amount(row.get(i).map(String::as_str).unwrap_or(""))
        } else if debit_idx.is_some() || credit_idx.is_some() {
            let debit = debit_idx.and_then(|i| row.get(i)).map(|c| parse_amount(c)).unwrap_or(0.0);
            let credit = credit_idx.and_then(|i| row.get(i)).map(|c| parse_amount(c)).unwrap_or(0.0);
            if credit != 0.0 { credit.abs() } else { -debit.abs() }
        } else {
            // No amount source at all: skip the row.
            continue;
        };

        let description = desc_idx
            .and_then(|i| row.get(i))
            .map(|c| c.trim())
            .unwrap_or("")
            .to_string();

        if let Some(cell) = balance_idx.and_then(|i| row.get(i)) {
            if !cell.trim().is_empty() {
                tracker.observe(&date, parse_amount(cell));
            }
        }

        transactions.push(draft(account, date, description, amount));
    }

    ParseOutcome { transactions, latest_balance: tracker.into_latest() }
}

/// Legacy fixed-column layout (Wells Fargo style, no header):
/// col 0 = date, col 1 = signed amount, description in cols 4/3/2.
fn parse_positional(rows: &[Vec<String>], account: AccountId) -> ParseOutcome {
    let mut transactions = Vec::new();
    let mut tracker = BalanceTracker::default();

    for row in rows {
        let Some(date) = row.first().and_then(|c| parse_date(c)) else {
            continue;
        };
        let amount_raw = row.get(1).map(String::as_str).unwrap_or("");
        let amount = parse_amount(amount_raw);

        let description = [4usize, 3, 2]
            .iter()
            .filter_map(|&i| row.get(i))
            .find(|c| !c.is_empty())
            .map(|c| c.trim())
            .unwrap_or("")
            .to_string();

        // Trailing-column heuristic: some exports append a running balance
        // in the last populated column. First currency-looking cell from
        // the right that is not the amount cell itself is the candidate.
        // Best-effort: any trailing numeric cell can false-positive here.
        let trailing = row
            .iter()
            .rev()
            .find(|c| {
                let t = c.trim();
                !t.is_empty() && CURRENCY_LIKE.is_match(t)
            })
            .filter(|c| c.as_str() != amount_raw);
        if let Some(cell) = trailing {
            let bal = parse_amount(cell);
            if bal != 0.0 {
                tracker.observe(&date, bal);
            }
        }

        transactions.push(draft(account, date, description, amount));
    }

    ParseOutcome { transactions, latest_balance: tracker.into_latest() }
}

// ---------------------------------------------------------------------------
// Dedup filter
// ---------------------------------------------------------------------------

pub struct DedupOutcome {
    pub unique: Vec<Transaction>,
    pub parsed: usize,
    pub duplicates: usize,
}

fn dedup_key(t: &Transaction) -> String {
    format!("{}|{}|{}", t.date, t.amount, t.description)
}

/// Drop drafts whose (date, amount, description) triple already exists in
/// the store. Surviving drafts keep their order; duplicates within one
/// file are left alone.
pub fn filter_duplicates(existing: &[Transaction], drafts: Vec<Transaction>) -> DedupOutcome {
    let seen: HashSet<String> = existing.iter().map(dedup_key).collect();
    let parsed = drafts.len();
    let unique: Vec<Transaction> =
        drafts.into_iter().filter(|t| !seen.contains(&dedup_key(t))).collect();
    let duplicates = parsed - unique.len();
    DedupOutcome { unique, parsed, duplicates }
}
