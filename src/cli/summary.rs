use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{date_range, month_range};
use crate::error::Result;
use crate::fmt::money;
use crate::reports::spending_summary;
use crate::settings::data_file;
use crate::store;

fn budget_cell(spent: f64, target: Option<f64>) -> String {
    match target {
        Some(t) if t > 0.0 => {
            let pct = ((spent / t) * 100.0).round();
            format!("{} ({pct:.0}%)", money(t))
        }
        _ => String::new(),
    }
}

pub fn run(month: Option<String>, from: Option<String>, to: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;
    let (from, to) = match &month {
        Some(m) => month_range(m),
        None => date_range(from.as_deref(), to.as_deref()),
    };

    let summary = spending_summary(&data, &from, &to);

    let mut table = Table::new();
    table.set_header(vec!["Category", "Spent", "Target"]);
    for row in &summary.variable {
        if row.spent == 0.0 && row.target.is_none() {
            continue;
        }
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(money(row.spent)),
            Cell::new(budget_cell(row.spent, row.target)),
        ]);
    }
    println!("Variable spending\n{table}");
    println!("Variable total: {}\n", money(summary.variable_total));

    let mut fixed = Table::new();
    fixed.set_header(vec!["Category", "Spent", "Expected"]);
    for row in &summary.fixed {
        if row.spent == 0.0 && row.target.unwrap_or(0.0) == 0.0 {
            continue;
        }
        fixed.add_row(vec![
            Cell::new(&row.category),
            Cell::new(money(row.spent)),
            Cell::new(row.target.map(money).unwrap_or_default()),
        ]);
    }
    println!("Fixed expenses\n{fixed}");
    println!("Fixed total: {}", money(summary.fixed_total));
    println!("Subscriptions (tracked): {}/mo\n", money(summary.subscriptions_total));

    let net = summary.net();
    let net_str = if net >= 0.0 { money(net).green() } else { money(net).red() };
    println!(
        "Income {} − Expenses {} = Net {}",
        money(summary.income_total),
        money(summary.total_expenses()),
        net_str
    );
    Ok(())
}
