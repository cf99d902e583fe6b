use crate::categorizer::categorize_range;
use crate::cli::date_range;
use crate::error::Result;
use crate::settings::data_file;
use crate::store;

pub fn run(from: Option<String>, to: Option<String>) -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;
    let (from, to) = date_range(from.as_deref(), to.as_deref());

    let categorized = categorize_range(&mut data.transactions, &from, &to);
    let still_uncategorized = data
        .transactions
        .iter()
        .filter(|t| t.category.is_none() && t.date >= from && t.date <= to)
        .count();

    store::save(&path, &data)?;
    println!("{categorized} categorized, {still_uncategorized} still uncategorized");
    Ok(())
}
