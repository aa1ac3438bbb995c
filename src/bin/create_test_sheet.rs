use std::{error::Error, path::PathBuf, process::exit};

use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Month, OffsetDateTime};

use budget_pro::{CsvSheetStore, SheetStore, SqliteSheetStore, Transaction, TransactionType};

/// The number of months of sample transactions to create, ending with the current month.
const SAMPLE_MONTHS: u8 = 6;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Csv,
    Sqlite,
}

/// A utility for creating a transactions sheet with sample data for manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the sheet to.
    #[arg(long, short)]
    output_path: PathBuf,

    /// The format of the sheet.
    #[arg(long, value_enum, default_value_t = Backend::Csv)]
    backend: Backend,
}

/// Create and populate a transactions sheet for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.output_path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("Output path must include a file extension (e.g., 'transactions.csv').");
        exit(1);
    }

    if args.output_path.is_file() {
        eprintln!("File already exists at {:#?}!", args.output_path);
        exit(1);
    }

    println!("Creating transactions sheet at {:#?}", args.output_path);
    let mut store: Box<dyn SheetStore> = match args.backend {
        Backend::Csv => Box::new(CsvSheetStore::open(&args.output_path)?),
        Backend::Sqlite => Box::new(SqliteSheetStore::new(Connection::open(&args.output_path)?)?),
    };

    let transactions = sample_transactions(OffsetDateTime::now_utc().date())?;
    println!("Adding {} transactions...", transactions.len());

    for transaction in &transactions {
        store.append(transaction)?;
    }

    println!("Success!");

    Ok(())
}

/// A typical month of income and spending for each of the last few months.
fn sample_transactions(today: Date) -> Result<Vec<Transaction>, Box<dyn Error>> {
    let monthly: [(TransactionType, &str, &str, i64); 8] = [
        (TransactionType::Income, "Salary", "Monthly salary", 4_200_00),
        (TransactionType::Need, "Housing", "Rent", 1_650_00),
        (TransactionType::Need, "Groceries", "Supermarket", 412_35),
        (TransactionType::Need, "Utilities", "Power bill", 138_90),
        (TransactionType::Want, "Dining Out", "Dinner with friends", 86_50),
        (TransactionType::Want, "Subscriptions", "Streaming services", 32_98),
        (TransactionType::Savings, "Emergency Fund", "Emergency fund top up", 400_00),
        (TransactionType::Savings, "Investments", "Index fund", 250_00),
    ];

    let mut year = today.year();
    let mut month = today.month();
    for _ in 1..SAMPLE_MONTHS {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    let mut transactions = Vec::new();

    for _ in 0..SAMPLE_MONTHS {
        for (day, (transaction_type, category, description, cents)) in (1u8..).zip(monthly) {
            let date = Date::from_calendar_date(year, month, day)?;
            let transaction = Transaction::build(Decimal::new(cents, 2), date, description)
                .category(category)
                .classified_as(transaction_type)
                .finalise();

            transactions.push(transaction);
        }

        if month == Month::December {
            year += 1;
        }
        month = month.next();
    }

    Ok(transactions)
}
