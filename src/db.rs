//! Database initialization.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, account::create_account_table, budget::create_budget_tables,
    category::create_category_table, transaction::create_transaction_table,
};

/// Create the application tables if they do not already exist.
///
/// Table creation runs inside a single exclusive transaction so that two
/// processes opening the same database file cannot interleave partial schemas.
///
/// # Errors
/// Returns an [Error::SqlError] if a table or index cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // The pragma is a no-op inside a transaction, so it must run first.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_account_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// True when `error` is an SQLite constraint failure with the given extended
/// result code, e.g. [rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE].
pub(crate) fn is_constraint_violation(error: &rusqlite::Error, extended_code: i32) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(failure, _) => failure.extended_code == extended_code,
        _ => false,
    }
}
