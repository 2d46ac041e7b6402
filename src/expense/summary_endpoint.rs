//! Defines the endpoint for the total amount spent.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, expense::core::get_total_spent};

/// The state needed to summarise expenses.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The totals across all expenses.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// The sum of all expense amounts.
    pub total_spent: f64,
}

/// A route handler that returns the sum of all expenses.
pub async fn get_summary_endpoint(State(state): State<SummaryState>) -> Result<Json<Summary>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let total_spent = get_total_spent(&connection)
        .inspect_err(|error| tracing::error!("could not get total spent: {error}"))?;

    Ok(Json(Summary { total_spent }))
}
