use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::reports::{is_excluded, is_fixed};
use crate::settings::data_file;
use crate::store;

pub fn list() -> Result<()> {
    let data = store::load(&data_file())?;

    let mut table = Table::new();
    table.set_header(vec!["Category", "Group", "Transactions", "Target"]);
    for category in &data.categories {
        let group = if is_excluded(category) {
            "excluded"
        } else if is_fixed(category) {
            "fixed"
        } else {
            "variable"
        };
        let used = data
            .transactions
            .iter()
            .filter(|t| t.category.as_deref() == Some(category.as_str()))
            .count();
        let target = data
            .budget_targets
            .get(category)
            .map(|t| format!("{t:.2}"))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(category),
            Cell::new(group),
            Cell::new(used),
            Cell::new(target),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}

pub fn add(name: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.add_category(name)?;
    store::save(&path, &data)?;
    println!("Added category: {name}");
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.remove_category(name)?;
    store::save(&path, &data)?;
    println!("Removed category: {name}");
    Ok(())
}

pub fn rename(old: &str, new: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.rename_category(old, new)?;
    store::save(&path, &data)?;
    println!("Renamed {old} to {new}");
    Ok(())
}
