use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{Expense, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker server.
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

    println!("Creating test expenses...");

    let today = OffsetDateTime::now_utc().date();
    let samples = [
        (12.5, "food", "lunch"),
        (48.0, "transport", "monthly bus pass"),
        (1200.0, "rent", ""),
        (4.2, "food", "coffee"),
        (89.99, "utilities", "power bill"),
    ];

    for (days_ago, (amount, category, description)) in samples.into_iter().enumerate() {
        create_expense(
            Expense {
                amount,
                category: category.to_owned(),
                description: description.to_owned(),
                date: (today - Duration::days(days_ago as i64)).to_string(),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
