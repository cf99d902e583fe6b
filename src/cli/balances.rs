use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{account_display, delta, money};
use crate::models::AccountId;
use crate::reconciler::compute_balances;
use crate::settings::data_file;
use crate::store;

pub fn run() -> Result<()> {
    let data = store::load(&data_file())?;

    let Some(computed) = compute_balances(&data.balance_snapshots, &data.transactions) else {
        println!("No balance snapshots yet. Record one with `bb snapshot add` to start tracking.");
        return Ok(());
    };

    println!("Computed from snapshot on {} + all imported transactions since\n", computed.as_of);

    let mut table = Table::new();
    table.set_header(vec!["Account", "Current", "Since snapshot", "Txns"]);
    for account in AccountId::all() {
        let state = &computed.accounts[&account];
        table.add_row(vec![
            Cell::new(account.label()),
            Cell::new(money(account_display(state.current, state.is_credit))),
            Cell::new(if state.txn_count > 0 { delta(state.txn_delta) } else { String::new() }),
            Cell::new(if state.txn_count > 0 { state.txn_count.to_string() } else { String::new() }),
        ]);
    }
    println!("{table}");

    let liquid_delta = computed.total_liquid - computed.prev_total_liquid;
    println!(
        "Total liquid: {} ({} since snapshot)",
        money(computed.total_liquid).bold(),
        delta(liquid_delta)
    );
    Ok(())
}
