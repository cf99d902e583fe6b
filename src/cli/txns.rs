use comfy_table::{Cell, Table};

use crate::cli::date_range;
use crate::error::{BudgetError, Result};
use crate::fmt::money;
use crate::models::AccountId;
use crate::reviewer::{apply_to_similar, count_similar, merchant_key, MatchMode};
use crate::settings::data_file;
use crate::store;

pub fn list(
    account: Option<String>,
    from: Option<String>,
    to: Option<String>,
    category: Option<String>,
    uncategorized: bool,
    unreviewed: bool,
) -> Result<()> {
    let data = store::load(&data_file())?;
    let account: Option<AccountId> = account.map(|a| a.parse()).transpose()?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());

    let mut rows: Vec<_> = data
        .transactions
        .iter()
        .filter(|t| {
            t.date >= from
                && t.date <= to
                && account.map_or(true, |a| t.account == a)
                && category.as_ref().map_or(true, |c| t.category.as_deref() == Some(c.as_str()))
                && (!uncategorized || t.category.is_none())
                && (!unreviewed || !t.reviewed)
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Account", "Amount", "Category", "Rev"]);
    let mut total = 0.0;
    for t in &rows {
        total += t.amount;
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.date),
            Cell::new(&t.description),
            Cell::new(t.account.key()),
            Cell::new(money(t.amount)),
            Cell::new(t.category.as_deref().unwrap_or("—")),
            Cell::new(if t.reviewed { "✓" } else { "" }),
        ]);
    }
    println!("{table}");
    println!("{} transactions, total {}", rows.len(), money(total));
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.delete_transaction(id)?;
    store::save(&path, &data)?;
    println!("Deleted {id}");
    Ok(())
}

pub fn set_category(id: &str, category: Option<String>) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.set_category(id, category.as_deref())?;
    store::save(&path, &data)?;
    match category {
        Some(cat) => {
            println!("Set category to {cat}");
            // Offer the bulk-apply counts so similar transactions can be
            // updated in one go.
            if let Some(anchor) = data.transaction(id) {
                let exact = count_similar(&data.transactions, anchor, MatchMode::Exact);
                let merchant = count_similar(&data.transactions, anchor, MatchMode::Merchant);
                if exact > 0 || merchant > 0 {
                    println!(
                        "Similar transactions: {exact} exact, {merchant} same merchant; \
                         apply with `bb txns apply {id} --category \"{cat}\" --mode exact|merchant`"
                    );
                }
            }
        }
        None => println!("Cleared category"),
    }
    Ok(())
}

pub fn similar(id: &str) -> Result<()> {
    let data = store::load(&data_file())?;
    let anchor = data
        .transaction(id)
        .ok_or_else(|| BudgetError::UnknownTransaction(id.to_string()))?;
    let exact = count_similar(&data.transactions, anchor, MatchMode::Exact);
    let merchant = count_similar(&data.transactions, anchor, MatchMode::Merchant);
    println!("Anchor: {}", anchor.description);
    println!("Exact description match: {exact}");
    println!("Same merchant (\"{}\"): {merchant}", merchant_key(&anchor.description));
    Ok(())
}

fn parse_mode(mode: &str) -> Result<MatchMode> {
    match mode {
        "exact" => Ok(MatchMode::Exact),
        "merchant" => Ok(MatchMode::Merchant),
        other => Err(BudgetError::Other(format!("Unknown match mode: {other} (expected exact or merchant)"))),
    }
}

pub fn apply(id: &str, category: &str, mode: &str) -> Result<()> {
    let mode = parse_mode(mode)?;
    let path = data_file();
    let mut data = store::load(&path)?;
    if !data.categories.iter().any(|c| c == category) {
        return Err(BudgetError::UnknownCategory(category.to_string()));
    }
    if data.transaction(id).is_none() {
        return Err(BudgetError::UnknownTransaction(id.to_string()));
    }
    let applied = apply_to_similar(&mut data.transactions, id, category, mode);
    store::save(&path, &data)?;
    println!("Applied {category} to {applied} transactions");
    Ok(())
}
