use comfy_table::{Cell, Table};

use crate::cli::date_range;
use crate::error::Result;
use crate::fmt::money;
use crate::models::AccountId;
use crate::settings::data_file;
use crate::store;

pub struct AddArgs {
    pub date: Option<String>,
    pub wf_checking: Option<f64>,
    pub wf_credit: Option<f64>,
    pub discover_credit: Option<f64>,
    pub sofi_checking: Option<f64>,
    pub sofi_savings: Option<f64>,
    pub venmo: Option<f64>,
}

pub fn add(args: AddArgs) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    let values: Vec<(AccountId, f64)> = [
        (AccountId::WfChecking, args.wf_checking),
        (AccountId::WfCredit, args.wf_credit),
        (AccountId::DiscoverCredit, args.discover_credit),
        (AccountId::SofiChecking, args.sofi_checking),
        (AccountId::SofiSavings, args.sofi_savings),
        (AccountId::Venmo, args.venmo),
    ]
    .into_iter()
    .filter_map(|(account, value)| value.map(|v| (account, v)))
    .collect();

    let id = data.add_snapshot(&date, &values)?;
    store::save(&path, &data)?;
    println!("Saved snapshot {id} for {date}");
    Ok(())
}

pub fn list(from: Option<String>, to: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());

    let mut snapshots: Vec<_> = data
        .balance_snapshots
        .iter()
        .filter(|s| s.date >= from && s.date <= to)
        .collect();
    snapshots.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table = Table::new();
    let mut header = vec!["ID".to_string(), "Date".to_string()];
    header.extend(AccountId::all().map(|a| a.label().to_string()));
    header.push("Total Liquid".to_string());
    table.set_header(header);

    for snap in &snapshots {
        let mut row = vec![Cell::new(&snap.id), Cell::new(&snap.date)];
        let mut liquid = 0.0;
        for account in AccountId::all() {
            let val = snap.value(account);
            if account.is_credit() {
                row.push(Cell::new(money(-val)));
            } else {
                liquid += val;
                row.push(Cell::new(money(val)));
            }
        }
        row.push(Cell::new(money(liquid)));
        table.add_row(row);
    }
    println!("Snapshots\n{table}");
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    data.delete_snapshot(id)?;
    store::save(&path, &data)?;
    println!("Deleted snapshot {id}");
    Ok(())
}
