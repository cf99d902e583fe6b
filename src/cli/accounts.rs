use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::{AccountKind, ACCOUNTS};

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Label", "Type"]);
    for account in ACCOUNTS {
        let kind = match account.kind {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::Credit => "credit",
        };
        table.add_row(vec![Cell::new(account.id.key()), Cell::new(account.label), Cell::new(kind)]);
    }
    println!("Accounts\n{table}");
    Ok(())
}
