//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::get_local_offset};

/// The state of the REST server.
///
/// Route handlers do not take the whole state, they take the smaller states
/// defined next to them which implement `FromRef<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the timezone is not recognised.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// Close the database connection.
    ///
    /// If another clone of the state still holds the connection, it is left
    /// open and will be closed when the last clone is dropped.
    ///
    /// # Errors
    /// Returns an error if the lock was poisoned or SQLite could not close the connection cleanly.
    pub fn close(self) -> Result<(), Error> {
        let Ok(mutex) = Arc::try_unwrap(self.db_connection) else {
            tracing::warn!("Database connection is still in use, it will be closed when dropped");
            return Ok(());
        };

        let connection = mutex.into_inner().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        connection.close().map_err(|(_, error)| Error::from(error))?;
        tracing::debug!("Closed database connection.");

        Ok(())
    }
}
