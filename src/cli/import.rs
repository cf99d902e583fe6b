use colored::Colorize;

use crate::categorizer::suggest_category;
use crate::error::Result;
use crate::fmt::money;
use crate::importer::{filter_duplicates, parse_csv};
use crate::models::AccountId;
use crate::settings::data_file;
use crate::store;

pub fn run(file: &str, account: &str) -> Result<()> {
    let account: AccountId = account.parse()?;
    let path = data_file();
    let mut data = store::load(&path)?;

    let content = std::fs::read_to_string(file)?;
    let outcome = parse_csv(&content, account)?;

    let mut drafts = outcome.transactions;
    for txn in drafts.iter_mut() {
        if let Some(category) = suggest_category(&txn.description) {
            txn.category = Some(category.to_string());
        }
    }

    let dedup = filter_duplicates(&data.transactions, drafts);
    let accepted = dedup.unique.len();
    data.add_transactions(dedup.unique);

    if let Some(latest) = &outcome.latest_balance {
        data.record_latest_balance(account, &latest.date, latest.balance);
    }

    store::save(&path, &data)?;

    println!(
        "{} parsed, {} imported, {} skipped (duplicates)",
        dedup.parsed,
        accepted.to_string().green(),
        dedup.duplicates
    );
    if let Some(latest) = &outcome.latest_balance {
        println!("Latest balance in file: {} on {}", money(latest.balance), latest.date);
    }
    Ok(())
}
