//! The shared state handed to every route handler.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig, timezone::get_local_offset};

/// Everything the route handlers share: the open database and the settings
/// that shape rendering.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    ///
    /// Month windows and daily totals are calculated in this timezone.
    pub local_timezone: String,

    /// Controls how paged tables split their rows.
    pub pagination_config: PaginationConfig,

    /// The SQLite database, shared across handlers behind a mutex.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Build the app state over `db_connection`, creating any missing tables.
    ///
    /// `local_timezone` must be a canonical timezone name; it is validated
    /// here so handlers can assume it resolves to an offset.
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a canonical timezone name or
    /// if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezone(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

/// Lock the shared database connection.
///
/// A poisoned lock is logged and mapped to [Error::DatabaseLockError] so the
/// caller can respond with an alert or an error page.
pub(crate) fn lock_database(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}
