use rusqlite::Connection;

use crate::{Error, database_id::DatabaseId};

pub type AccountId = DatabaseId;

/// A pot of money that transactions are recorded against.
///
/// The balance is not stored on this row, it is derived from the account's
/// transactions. See [get_account_balance].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The display name for the account.
    pub name: String,
    /// The ISO 4217 currency code for amounts in this account, e.g. "COP".
    pub currency: String,
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            currency TEXT NOT NULL DEFAULT 'COP'
        )",
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        currency: row.get(2)?,
    })
}

/// Retrieve an account from the database by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] when no account has this `id`, or
/// [Error::SqlError] when the query fails.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare("SELECT id, name, currency FROM account WHERE id = :id")?
        .query_one(&[(":id", &id)], map_row_to_account)?;

    Ok(account)
}

/// Retrieve all accounts ordered alphabetically by name.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare("SELECT id, name, currency FROM account ORDER BY name ASC;")?
        .query_map([], map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(Error::from))
        .collect()
}

/// Pick the account a page should show.
///
/// An unknown requested ID falls back to the default, which is the account
/// with the lowest ID. Returns `None` only when there are no accounts.
pub fn pick_account(accounts: &[Account], requested: Option<AccountId>) -> Option<&Account> {
    requested
        .and_then(|account_id| accounts.iter().find(|account| account.id == account_id))
        .or_else(|| accounts.iter().min_by_key(|account| account.id))
}

/// Get the balance of an account.
///
/// The balance is the all-time signed sum over the account's transactions:
/// income counts positively, expenses count negatively, and rows with an
/// unrecognized kind contribute zero. Pending transactions are included, the
/// balance reflects every recorded movement.
///
/// An `account_id` with no transactions, including one that does not exist,
/// sums to zero.
///
/// # Errors
/// Returns [Error::SqlError] when the query fails.
pub fn get_account_balance(account_id: AccountId, connection: &Connection) -> Result<f64, Error> {
    let mut stmt = connection.prepare(
        "SELECT COALESCE(SUM(CASE kind
                WHEN 'income' THEN COALESCE(CAST(amount AS REAL), 0)
                WHEN 'expense' THEN -COALESCE(CAST(amount AS REAL), 0)
                ELSE 0 END), 0)
         FROM \"transaction\" WHERE account_id = :account_id",
    )?;

    let balance: f64 = stmt.query_row(&[(":account_id", &account_id)], |row| row.get(0))?;

    Ok(balance)
}
