use crate::cli::date_range;
use crate::error::{BudgetError, Result};
use crate::reviewer::{mark_range_reviewed, mark_reviewed, review_stats};
use crate::settings::data_file;
use crate::store;

pub fn mark(id: &str) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    match mark_reviewed(&mut data.transactions, id) {
        None => return Err(BudgetError::UnknownTransaction(id.to_string())),
        Some(false) => {
            return Err(BudgetError::Other(
                "Transaction is uncategorized; assign a category before marking it reviewed"
                    .to_string(),
            ));
        }
        Some(true) => {}
    }
    store::save(&path, &data)?;
    println!("Marked {id} reviewed");
    Ok(())
}

pub fn all(from: Option<String>, to: Option<String>) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());
    let marked = mark_range_reviewed(&mut data.transactions, &from, &to);
    store::save(&path, &data)?;
    println!("Marked {marked} categorized transactions reviewed");
    Ok(())
}

pub fn status(from: Option<String>, to: Option<String>) -> Result<()> {
    let data = store::load(&data_file())?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());
    let stats = review_stats(&data.transactions, &from, &to);
    println!("{}/{} reviewed ({}%)", stats.reviewed, stats.total, stats.percent());
    Ok(())
}
