use crate::error::Result;
use crate::reports::{available_months, month_label};
use crate::settings::{data_file, load_settings};
use crate::store;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let path = data_file();

    println!("Data dir:   {}", settings.data_dir);
    println!("Data file:  {}", path.display());

    if path.exists() {
        let data = store::load(&path)?;
        let uncategorized =
            data.transactions.iter().filter(|t| t.category.is_none()).count();
        let unreviewed = data.transactions.iter().filter(|t| !t.reviewed).count();

        println!();
        println!("Transactions:   {}", data.transactions.len());
        println!("Uncategorized:  {uncategorized}");
        println!("Unreviewed:     {unreviewed}");
        println!("Snapshots:      {}", data.balance_snapshots.len());
        println!("Categories:     {}", data.categories.len());
        println!("Subscriptions:  {}", data.subscriptions.len());

        let months = available_months(&data.transactions);
        if let Some(newest) = months.first() {
            println!("Months of data: {} (latest: {})", months.len(), month_label(newest));
        }
    } else {
        println!();
        println!("Data file not found. Run `bb init` to set up.");
    }

    Ok(())
}
