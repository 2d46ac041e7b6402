use rusqlite::{Connection, params, types::ValueRef};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single recorded monetary outlay.
///
/// The database ID is deliberately absent: expenses are never addressed
/// individually by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// How much was spent. No currency is implied.
    pub amount: f64,
    /// A free-text label for grouping expenses, e.g. "food".
    pub category: String,
    /// Text detailing the expense.
    pub description: String,
    /// When the money was spent.
    ///
    /// Expenses created through the API always hold a `YYYY-MM-DD` date, but
    /// rows written by other tools are returned exactly as stored.
    pub date: String,
}

/// The query parameter that selects a [SortOrder].
pub const ORDER_BY_PARAM: &str = "order_by";

/// The order in which to return expenses, sorted by amount.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest amount first.
    Ascending,
    /// Largest amount first.
    Descending,
    /// The order the expenses were recorded in.
    #[default]
    Unordered,
}

impl From<&str> for SortOrder {
    /// "asc" and "desc" select a sort by amount, any other value keeps insertion order.
    fn from(value: &str) -> Self {
        match value {
            "asc" => SortOrder::Ascending,
            "desc" => SortOrder::Descending,
            _ => SortOrder::Unordered,
        }
    }
}

impl SortOrder {
    /// Read the sort order from a request's query parameters.
    ///
    /// Returns `default` when the `order_by` parameter is absent.
    pub fn from_query(params: &HashMap<String, String>, default: SortOrder) -> SortOrder {
        params
            .get(ORDER_BY_PARAM)
            .map_or(default, |value| SortOrder::from(value.as_str()))
    }


    fn order_by_clause(self) -> &'static str {
        // Ties on amount fall back to insertion order.
        match self {
            SortOrder::Ascending => "ORDER BY amount ASC, id ASC",
            SortOrder::Descending => "ORDER BY amount DESC, id ASC",
            SortOrder::Unordered => "ORDER BY id ASC",
        }
    }
}

pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_expense(row: &rusqlite::Row) -> Result<Expense, rusqlite::Error> {
    let amount = row.get(0)?;
    let category = row.get(1)?;
    let description = row.get(2)?;
    let date = date_column_text(row.get_ref(3)?);

    Ok(Expense {
        amount,
        category,
        description,
        date,
    })
}

/// Read the date column as text whatever SQLite type it was stored with.
///
/// The table may have been edited by hand, so a row with an odd date is shown
/// as-is rather than failing the whole query.
fn date_column_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Text(text) | ValueRef::Blob(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Integer(number) => number.to_string(),
        ValueRef::Real(number) => number.to_string(),
        ValueRef::Null => String::new(),
    }
}

/// Record a new expense.
///
/// No business rules are checked, any amount and category are accepted.
///
/// # Errors
/// Returns [Error::SqlError] if the row could not be written.
pub fn create_expense(expense: Expense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses (amount, category, description, date) VALUES (?1, ?2, ?3, ?4)",
        params![
            expense.amount,
            expense.category,
            expense.description,
            expense.date
        ],
    )?;

    Ok(expense)
}

/// Get every expense in the database in the order given by `sort_order`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a stored row cannot be
/// converted into an [Expense].
pub fn get_expenses(sort_order: SortOrder, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let query = format!(
        "SELECT amount, category, description, date FROM expenses {}",
        sort_order.order_by_clause()
    );

    connection
        .prepare(&query)?
        .query_map([], map_row_to_expense)?
        .map(|expense_result| expense_result.map_err(Error::from))
        .collect()
}

/// Get the sum of all expense amounts, zero if there are no expenses.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_total_spent(connection: &Connection) -> Result<f64, Error> {
    let mut stmt = connection.prepare("SELECT COALESCE(SUM(amount), 0.0) FROM expenses")?;

    let total: f64 = stmt.query_row([], |row| row.get(0))?;

    Ok(total)
}
