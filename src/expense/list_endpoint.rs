//! Defines the endpoint for listing expenses.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{Expense, SortOrder, core::get_expenses},
};

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns every expense as JSON.
///
/// `order_by=asc` or `order_by=desc` sorts by amount, anything else keeps
/// insertion order. If `order_by` is repeated, the last value wins.
pub async fn list_expenses_endpoint(
    State(state): State<ListExpensesState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Expense>>, Error> {
    let order = SortOrder::from_query(&query, SortOrder::Unordered);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_expenses(order, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    Ok(Json(expenses))
}
