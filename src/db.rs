//! Creates the application's database schema.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::expense::create_expense_table;

/// Create the tables for the domain models if they do not already exist.
///
/// Running this against an existing database leaves its data untouched.
///
/// # Errors
/// Returns an error if a table could not be created, in which case no tables are created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
