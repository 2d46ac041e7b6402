//! Defines the endpoint for recording a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    expense::{Expense, core::create_expense},
    timezone::get_local_date,
};

/// The message sent back to the client once an expense has been saved.
pub const EXPENSE_CREATED_MESSAGE: &str = "Expense added successfully";

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The JSON payload for creating an expense.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExpenseForm {
    /// How much was spent, either a JSON number or a string holding one.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// A free-text label, e.g. "food".
    pub category: String,
    /// Text detailing the expense, empty if omitted.
    #[serde(default)]
    pub description: String,
    /// When the money was spent, today in the server's timezone if omitted.
    #[serde(default)]
    pub date: Option<Date>,
}

/// Accept the amount as a number or as a numeric string like `"12.5"`.
///
/// HTML inputs always produce strings, so clients that forward form values
/// as-is are still understood.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl serde::de::Visitor<'_> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or a string containing a number")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let amount = value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))?;

            // SQLite stores NaN as NULL, which the schema does not allow.
            if amount.is_finite() {
                Ok(amount)
            } else {
                Err(E::invalid_value(serde::de::Unexpected::Str(value), &self))
            }
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// The acknowledgement sent after creating an expense.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct MessageBody {
    /// A human readable confirmation.
    pub message: String,
}

/// A route handler for recording a new expense.
///
/// Any payload that cannot be read as an [ExpenseForm] is rejected with
/// `422 Unprocessable Entity`, including payloads that are not JSON at all.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    payload: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Json<MessageBody>, Error> {
    let Json(form) = payload.map_err(|rejection| {
        tracing::debug!("Rejected expense payload: {rejection}");
        Error::InvalidExpense(rejection.body_text())
    })?;

    let date = match form.date {
        Some(date) => date,
        None => get_local_date(&state.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", state.local_timezone);
            Error::InvalidTimezoneError(state.local_timezone.clone())
        })?,
    };

    let expense = Expense {
        amount: form.amount,
        category: form.category,
        description: form.description,
        date: date.to_string(),
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    create_expense(expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    Ok(Json(MessageBody {
        message: EXPENSE_CREATED_MESSAGE.to_owned(),
    }))
}
