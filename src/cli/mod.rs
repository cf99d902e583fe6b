pub mod accounts;
pub mod backup;
pub mod balances;
pub mod budget;
pub mod categories;
pub mod categorize;
pub mod demo;
pub mod import;
pub mod init;
pub mod review;
pub mod snapshot;
pub mod status;
pub mod subs;
pub mod summary;
pub mod trends;
pub mod txns;

use clap::{Parser, Subcommand};

/// Expand optional `--from`/`--to` into an inclusive range covering
/// everything when omitted.
pub(crate) fn date_range(from: Option<&str>, to: Option<&str>) -> (String, String) {
    (
        from.unwrap_or("0000-01-01").to_string(),
        to.unwrap_or("9999-12-31").to_string(),
    )
}

/// Inclusive date range for a `YYYY-MM` month key. `-31` compares correctly
/// against any ISO date in the month.
pub(crate) fn month_range(month: &str) -> (String, String) {
    (format!("{month}-01"), format!("{month}-31"))
}

#[derive(Parser)]
#[command(name = "bb", about = "Personal budgeting CLI: import bank CSVs, categorize spending, track balances.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up bb: choose where the budget data file lives.
    Init {
        /// Path for bb data (default: ~/Documents/bb-budget)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// List the account catalog.
    Accounts,
    /// Import a bank CSV export and auto-categorize the new transactions.
    Import {
        /// Path to the CSV file
        file: String,
        /// Account id, e.g. wf_checking (see `bb accounts`)
        #[arg(long)]
        account: String,
    },
    /// Auto-categorize uncategorized transactions in a date range.
    Categorize {
        /// Start date: YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// End date: YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },
    /// Browse and edit transactions.
    Txns {
        #[command(subcommand)]
        command: TxnsCommands,
    },
    /// Confirm categorized transactions as reviewed.
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Manage balance snapshots.
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommands,
    },
    /// Current balances: latest snapshot + all transactions since.
    Balances,
    /// Spending summary against budget targets.
    Summary {
        /// Month: YYYY-MM (overrides --from/--to)
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Monthly trends.
    Trends {
        #[command(subcommand)]
        command: TrendsCommands,
    },
    /// Manage the category catalog.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage monthly budget targets.
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },
    /// Track recurring subscriptions.
    Subs {
        #[command(subcommand)]
        command: SubsCommands,
    },
    /// Copy the budget data file to a backup.
    Backup {
        /// Output path (default: <data_dir>/backups/bb-budget-YYYYMMDD-HHMMSS.json)
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace the budget data file with a backup.
    Restore {
        /// Path to a backup JSON file
        file: String,
    },
    /// Load sample data to explore bb.
    Demo,
    /// Show the data file location and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum TxnsCommands {
    /// List transactions, newest first.
    List {
        /// Filter by account id
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Filter by category name
        #[arg(long)]
        category: Option<String>,
        /// Only uncategorized transactions
        #[arg(long)]
        uncategorized: bool,
        /// Only unreviewed transactions
        #[arg(long)]
        unreviewed: bool,
    },
    /// Delete a transaction.
    Delete {
        /// Transaction id (shown in `bb txns list`)
        id: String,
    },
    /// Assign a category to one transaction.
    SetCategory {
        id: String,
        /// Category name; omit to clear
        category: Option<String>,
    },
    /// Show how many transactions match one by description.
    Similar {
        id: String,
    },
    /// Assign a category to a transaction and everything similar to it.
    Apply {
        id: String,
        #[arg(long)]
        category: String,
        /// Match mode: exact or merchant
        #[arg(long, default_value = "merchant")]
        mode: String,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Mark one categorized transaction reviewed.
    Mark { id: String },
    /// Mark all categorized transactions in a range reviewed.
    All {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Review progress for a range.
    Status {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Record account balances as of a date.
    Add {
        /// Snapshot date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "wf-checking")]
        wf_checking: Option<f64>,
        /// Amount owed
        #[arg(long = "wf-credit")]
        wf_credit: Option<f64>,
        /// Amount owed
        #[arg(long = "discover-credit")]
        discover_credit: Option<f64>,
        #[arg(long = "sofi-checking")]
        sofi_checking: Option<f64>,
        #[arg(long = "sofi-savings")]
        sofi_savings: Option<f64>,
        #[arg(long)]
        venmo: Option<f64>,
    },
    /// List snapshots, newest first.
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Delete a snapshot.
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum TrendsCommands {
    /// Income vs expenses per month.
    Cashflow {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Variable spending per category per month.
    Categories {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Account balances over time, with a computed "now" point.
    Balances {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// List categories with usage counts.
    List,
    /// Add a category.
    Add { name: String },
    /// Remove an unused category.
    Remove { name: String },
    /// Rename a category everywhere it appears.
    Rename { old: String, new: String },
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budget targets.
    List,
    /// Set a monthly target for a category.
    Set { category: String, amount: f64 },
    /// Remove a category's target.
    Unset { category: String },
}

#[derive(Subcommand)]
pub enum SubsCommands {
    /// List subscriptions.
    List,
    /// Add a subscription.
    Add { name: String, amount: f64 },
    /// Remove a subscription by name.
    Remove { name: String },
}
