use comfy_table::{Cell, Table};

use crate::cli::date_range;
use crate::error::Result;
use crate::fmt::money;
use crate::models::AccountId;
use crate::reconciler::balance_series;
use crate::reports::{cashflow_by_month, category_breakdown, month_label};
use crate::settings::data_file;
use crate::store;

pub fn cashflow(from: Option<String>, to: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());

    let flows = cashflow_by_month(&data.transactions, &from, &to);
    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Net"]);
    for flow in &flows {
        table.add_row(vec![
            Cell::new(month_label(&flow.month)),
            Cell::new(money(flow.income)),
            Cell::new(money(flow.expenses)),
            Cell::new(money(flow.net())),
        ]);
    }
    println!("Income vs expenses\n{table}");
    Ok(())
}

pub fn categories(from: Option<String>, to: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());

    let (categories, rows) = category_breakdown(&data.transactions, &data.categories, &from, &to);
    // Only show categories with activity in the range.
    let active: Vec<usize> = (0..categories.len())
        .filter(|&i| rows.iter().any(|(_, values)| values[i] > 0.0))
        .collect();

    let mut table = Table::new();
    let mut header = vec!["Month".to_string()];
    header.extend(active.iter().map(|&i| categories[i].clone()));
    table.set_header(header);
    for (month, values) in &rows {
        let mut cells = vec![Cell::new(month_label(month))];
        cells.extend(active.iter().map(|&i| Cell::new(money(values[i]))));
        table.add_row(cells);
    }
    println!("Variable spending by category\n{table}");
    Ok(())
}

pub fn balances(from: Option<String>, to: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let points = balance_series(&data.balance_snapshots, &data.transactions, &from, &to, &today);
    if points.is_empty() {
        println!("No snapshots in range. Record one with `bb snapshot add`.");
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["Date".to_string()];
    header.extend(AccountId::all().map(|a| a.label().to_string()));
    header.push("Total Liquid".to_string());
    table.set_header(header);
    for point in &points {
        let label = if point.is_current { format!("{} (now)", point.date) } else { point.date.clone() };
        let mut cells = vec![Cell::new(label)];
        // Credit columns carry owed magnitudes, already absolute.
        for account in AccountId::all() {
            cells.push(Cell::new(money(point.balances[&account])));
        }
        cells.push(Cell::new(money(point.total_liquid)));
        table.add_row(cells);
    }
    println!("Account balances over time\n{table}");
    Ok(())
}
