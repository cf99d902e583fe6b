mod categorizer;
mod cli;
mod error;
mod fmt;
mod importer;
mod models;
mod reconciler;
mod reports;
mod reviewer;
mod settings;
mod store;

use clap::Parser;

use cli::{
    BudgetCommands, CategoriesCommands, Cli, Commands, ReviewCommands, SnapshotCommands,
    SubsCommands, TrendsCommands, TxnsCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Accounts => cli::accounts::run(),
        Commands::Import { file, account } => cli::import::run(&file, &account),
        Commands::Categorize { from, to } => cli::categorize::run(from, to),
        Commands::Txns { command } => match command {
            TxnsCommands::List { account, from, to, category, uncategorized, unreviewed } => {
                cli::txns::list(account, from, to, category, uncategorized, unreviewed)
            }
            TxnsCommands::Delete { id } => cli::txns::delete(&id),
            TxnsCommands::SetCategory { id, category } => cli::txns::set_category(&id, category),
            TxnsCommands::Similar { id } => cli::txns::similar(&id),
            TxnsCommands::Apply { id, category, mode } => cli::txns::apply(&id, &category, &mode),
        },
        Commands::Review { command } => match command {
            ReviewCommands::Mark { id } => cli::review::mark(&id),
            ReviewCommands::All { from, to } => cli::review::all(from, to),
            ReviewCommands::Status { from, to } => cli::review::status(from, to),
        },
        Commands::Snapshot { command } => match command {
            SnapshotCommands::Add {
                date,
                wf_checking,
                wf_credit,
                discover_credit,
                sofi_checking,
                sofi_savings,
                venmo,
            } => cli::snapshot::add(cli::snapshot::AddArgs {
                date,
                wf_checking,
                wf_credit,
                discover_credit,
                sofi_checking,
                sofi_savings,
                venmo,
            }),
            SnapshotCommands::List { from, to } => cli::snapshot::list(from, to),
            SnapshotCommands::Delete { id } => cli::snapshot::delete(&id),
        },
        Commands::Balances => cli::balances::run(),
        Commands::Summary { month, from, to } => cli::summary::run(month, from, to),
        Commands::Trends { command } => match command {
            TrendsCommands::Cashflow { from, to } => cli::trends::cashflow(from, to),
            TrendsCommands::Categories { from, to } => cli::trends::categories(from, to),
            TrendsCommands::Balances { from, to } => cli::trends::balances(from, to),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::List => cli::categories::list(),
            CategoriesCommands::Add { name } => cli::categories::add(&name),
            CategoriesCommands::Remove { name } => cli::categories::remove(&name),
            CategoriesCommands::Rename { old, new } => cli::categories::rename(&old, &new),
        },
        Commands::Budget { command } => match command {
            BudgetCommands::List => cli::budget::list(),
            BudgetCommands::Set { category, amount } => cli::budget::set(&category, amount),
            BudgetCommands::Unset { category } => cli::budget::unset(&category),
        },
        Commands::Subs { command } => match command {
            SubsCommands::List => cli::subs::list(),
            SubsCommands::Add { name, amount } => cli::subs::add(&name, amount),
            SubsCommands::Remove { name } => cli::subs::remove(&name),
        },
        Commands::Backup { output } => cli::backup::backup(output),
        Commands::Restore { file } => cli::backup::restore(&file),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
