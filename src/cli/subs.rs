use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::settings::data_file;
use crate::store;

pub fn list() -> Result<()> {
    let data = store::load(&data_file())?;
    let mut table = Table::new();
    table.set_header(vec!["Name", "Amount"]);
    let mut total = 0.0;
    for sub in &data.subscriptions {
        total += sub.amount;
        table.add_row(vec![Cell::new(&sub.name), Cell::new(money(sub.amount))]);
    }
    println!("Subscriptions\n{table}");
    println!("Total: {}/mo", money(total));
    Ok(())
}

pub fn add(name: &str, amount: f64) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.add_subscription(name, amount);
    store::save(&path, &data)?;
    println!("Added {name} at {}/mo", money(amount));
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.remove_subscription(name)?;
    store::save(&path, &data)?;
    println!("Removed {name}");
    Ok(())
}
