use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{data_file, get_data_dir};
use crate::store;

pub fn backup(output: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;

    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let backups_dir = get_data_dir().join("backups");
            std::fs::create_dir_all(&backups_dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            backups_dir.join(format!("bb-budget-{stamp}.json"))
        }
    };

    store::save(&dest, &data)?;
    println!("Backup saved to {}", dest.display());
    Ok(())
}

pub fn restore(file: &str) -> Result<()> {
    // Parse before touching the live file so a bad backup changes nothing.
    let content = std::fs::read_to_string(file)?;
    let data = store::parse(&content)?;

    let path = data_file();
    store::save(&path, &data)?;
    println!(
        "Restored {} transactions and {} snapshots from {file}",
        data.transactions.len(),
        data.balance_snapshots.len()
    );
    Ok(())
}
