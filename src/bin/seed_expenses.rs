use std::{error::Error, process::exit};

use clap::Parser;

use expense_tracker::{
    AppState,
    config::StoreConfig,
    expense::{Category, Description, NewExpense},
};

/// A utility for filling an expense table with sample data for manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    store: StoreConfig,
}

const SAMPLES: [(&str, f64, Category); 6] = [
    ("Weekly groceries", 84.2, Category::Food),
    ("Coffee with friends", 12.5, Category::Food),
    ("Monthly bus pass", 60.0, Category::Transport),
    ("Cinema tickets", 32.0, Category::Entertainment),
    ("Electricity bill", 110.75, Category::Utilities),
    ("Birthday present", 45.0, Category::Other),
];

/// Add a handful of sample expenses to the configured table.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args
        .store
        .db_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Database path must include a file extension (e.g., 'expenses.db').");
        exit(1);
    }

    println!(
        "Adding sample expenses to the table \"{}\" in {:?}",
        args.store.table_name, args.store.db_path
    );
    let state = AppState::new(args.store.open()?, &args.store.table_name)?;

    for (description, amount, category) in SAMPLES {
        let expense = state.expense_store.add(NewExpense {
            description: Description::new(description)?,
            amount,
            category,
        })?;

        println!(
            "{} {:>8.2} {:<13} {}",
            expense.id, expense.amount, expense.category, expense.description
        );
    }

    println!("Success!");

    Ok(())
}
