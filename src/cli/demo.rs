use crate::error::Result;
use crate::models::{month_key, new_id, AccountId, Transaction};
use crate::settings::data_file;
use crate::store;

struct DemoTxn {
    date: &'static str,
    description: &'static str,
    amount: f64,
    category: Option<&'static str>,
    account: AccountId,
}

const DEMO_TXNS: &[DemoTxn] = &[
    DemoTxn { date: "2025-11-02", description: "TRADER JOES #121 SEATTLE", amount: -84.12, category: Some("Groceries"), account: AccountId::WfChecking },
    DemoTxn { date: "2025-11-04", description: "STARBUCKS STORE 0421", amount: -5.25, category: Some("Coffee/Drinks"), account: AccountId::WfCredit },
    DemoTxn { date: "2025-11-06", description: "SHELL OIL 5744", amount: -48.30, category: Some("Gas/Transport"), account: AccountId::WfCredit },
    DemoTxn { date: "2025-11-08", description: "SPU UTILITY PAYMENT", amount: -222.24, category: Some("Utilities"), account: AccountId::WfChecking },
    DemoTxn { date: "2025-11-10", description: "PUBLIC STORAGE 08204", amount: -116.00, category: Some("Storage"), account: AccountId::WfChecking },
    DemoTxn { date: "2025-11-12", description: "DOORDASH THAI KITCHEN", amount: -36.80, category: Some("Eating Out"), account: AccountId::DiscoverCredit },
    DemoTxn { date: "2025-11-14", description: "CHEWY.COM AUTOSHIP", amount: -52.40, category: Some("Home/Cat/Shipping"), account: AccountId::WfCredit },
    DemoTxn { date: "2025-11-15", description: "PAYROLL DIRECT DEP ACME", amount: 3323.55, category: Some("Income"), account: AccountId::SofiChecking },
    DemoTxn { date: "2025-11-18", description: "SPOTIFY USA", amount: -11.90, category: Some("Subscriptions"), account: AccountId::WfCredit },
    DemoTxn { date: "2025-11-20", description: "WELLS FARGO CARD PAYMENT", amount: 250.00, category: Some("Transfer/Payment"), account: AccountId::WfCredit },
    DemoTxn { date: "2025-11-21", description: "SOFI TRANSFER TO SAVINGS", amount: -500.00, category: Some("Transfer/Payment"), account: AccountId::SofiChecking },
    DemoTxn { date: "2025-11-21", description: "SOFI TRANSFER FROM CHECKING", amount: 500.00, category: Some("Transfer/Payment"), account: AccountId::SofiSavings },
    DemoTxn { date: "2025-11-23", description: "PCC COMMUNITY MARKET", amount: -61.75, category: Some("Groceries"), account: AccountId::WfChecking },
    DemoTxn { date: "2025-11-25", description: "VENMO PAYMENT RECEIVED", amount: 42.00, category: Some("Income"), account: AccountId::Venmo },
    DemoTxn { date: "2025-11-28", description: "UNKNOWN VENDOR 88821", amount: -19.99, category: None, account: AccountId::WfCredit },
];

/// Seed the data file with a recognizable sample month: transactions across
/// accounts plus a baseline snapshot dated before them.
pub fn run() -> Result<()> {
    let path = data_file();
    let mut data = store::load(&path)?;

    if !data.transactions.is_empty() {
        println!("Data file already has transactions; demo data not loaded.");
        return Ok(());
    }

    let transactions: Vec<Transaction> = DEMO_TXNS
        .iter()
        .map(|d| Transaction {
            id: new_id(),
            date: d.date.to_string(),
            description: d.description.to_string(),
            amount: d.amount,
            category: d.category.map(str::to_string),
            account: d.account,
            reviewed: d.category.is_some(),
            month: month_key(d.date),
        })
        .collect();
    let count = transactions.len();
    data.add_transactions(transactions);

    data.add_snapshot(
        "2025-11-01",
        &[
            (AccountId::WfChecking, 2400.00),
            (AccountId::WfCredit, 477.50),
            (AccountId::DiscoverCredit, 120.00),
            (AccountId::SofiChecking, 3100.00),
            (AccountId::SofiSavings, 8000.00),
            (AccountId::Venmo, 25.00),
        ],
    )?;

    store::save(&path, &data)?;
    println!("Loaded {count} demo transactions and 1 snapshot.");
    println!("Try `bb balances`, `bb summary --month 2025-11`, or `bb txns list`.");
    Ok(())
}
