use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;

use cashbook_rs::{EXPENSE, INCOME, TransactionForm, TransactionStore, initialize_db};

/// A utility for creating a test database for the REST API server of cashbook_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let store = TransactionStore::new(Arc::new(Mutex::new(conn)));
    let transactions = [
        ("Salary", Decimal::new(100_000, 2), INCOME, "job"),
        ("Rent", Decimal::new(40_000, 2), EXPENSE, "housing"),
        ("Groceries", Decimal::new(8_765, 2), EXPENSE, "food"),
        ("Savings transfer", Decimal::new(25_000, 2), "transfer", "savings"),
    ];

    for (description, amount, type_, category) in transactions {
        let transaction = store.create(TransactionForm::new(description, amount, type_, category))?;
        println!("Created transaction {}: {description}", transaction.id);
    }

    println!("Success!");

    Ok(())
}
