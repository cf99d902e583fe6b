use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::settings::data_file;
use crate::store;

pub fn list() -> Result<()> {
    let data = store::load(&data_file())?;
    let mut table = Table::new();
    table.set_header(vec!["Category", "Monthly target"]);
    let mut total = 0.0;
    for (category, amount) in &data.budget_targets {
        total += amount;
        table.add_row(vec![Cell::new(category), Cell::new(money(*amount))]);
    }
    println!("Budget targets\n{table}");
    println!("Total: {}/mo", money(total));
    Ok(())
}

pub fn set(category: &str, amount: f64) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.set_budget_target(category, amount)?;
    store::save(&path, &data)?;
    println!("Set {category} target to {}", money(amount));
    Ok(())
}

pub fn unset(category: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.unset_budget_target(category)?;
    store::save(&path, &data)?;
    println!("Removed target for {category}");
    Ok(())
}
