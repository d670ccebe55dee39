//! The transaction model and the queries that store and fetch it.

use std::{fmt, str::FromStr};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, account::AccountId, category::CategoryId, database_id::DatabaseId,
    db::is_constraint_violation,
};

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

/// Whether a transaction adds money to or removes money from an account.
///
/// The signed contribution to an account balance is `+amount` for income and
/// `-amount` for expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money flowing into the account, e.g. salary.
    Income,
    /// Money flowing out of the account, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The kind as it is stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::InvalidTransactionKind(other.to_owned())),
        }
    }
}

/// One movement of money in or out of an account.
///
/// Use [Transaction::build] to construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The unique ID of the transaction row.
    pub id: TransactionId,
    /// The account the money moved in or out of.
    pub account_id: AccountId,
    /// The category the transaction belongs to. `None` means uncategorized.
    pub category_id: Option<CategoryId>,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The non-negative amount of money spent or earned. The sign is implied
    /// by `kind`.
    pub amount: f64,
    /// When the money actually moved, as opposed to when it was recorded.
    pub occurred_at: OffsetDateTime,
    /// A short note on what the money was for.
    pub description: String,
    /// The settlement status, "posted" or "pending". Only posted transactions
    /// count toward spend totals and budget alerts.
    pub status: String,
    /// When the transaction row was recorded.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Start building a transaction against `account_id`.
    ///
    /// The builder defaults to an uncategorized, posted transaction that
    /// occurred now.
    pub fn build(account_id: AccountId, kind: TransactionKind, amount: f64) -> TransactionBuilder {
        TransactionBuilder {
            account_id,
            category_id: None,
            kind,
            amount,
            occurred_at: OffsetDateTime::now_utc(),
            description: String::new(),
            status: "posted".to_owned(),
        }
    }
}

/// Collects the fields of a new transaction before it is inserted.
///
/// Construct via [Transaction::build] and pass to [create_transaction] once
/// the optional fields are set.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The account the money moved in or out of.
    pub account_id: AccountId,
    /// The category of the transaction. `None` means uncategorized.
    pub category_id: Option<CategoryId>,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The non-negative amount of money spent or earned.
    pub amount: f64,
    /// When the money moved. Defaults to now.
    pub occurred_at: OffsetDateTime,
    /// A short note on what the money was for. Defaults to empty.
    pub description: String,
    /// The settlement status. Defaults to "posted".
    pub status: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set when the transaction happened.
    pub fn occurred_at(mut self, occurred_at: OffsetDateTime) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the settlement status for the transaction.
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert the transaction described by `builder` and return the stored row.
///
/// # Errors
/// Returns:
/// - [Error::InvalidCategory] when the category ID does not match a real
///   category,
/// - [Error::InvalidAccount] when the account ID does not match a real
///   account,
/// - [Error::SqlError] for any other SQL failure.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut statement = connection.prepare(
        "INSERT INTO \"transaction\"
            (account_id, category_id, kind, amount, occurred_at, description, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING id, account_id, category_id, kind, amount, occurred_at, description, status,
            created_at",
    )?;

    let parameters = (
        builder.account_id,
        builder.category_id,
        builder.kind.as_str(),
        builder.amount,
        builder.occurred_at,
        &builder.description,
        &builder.status,
    );

    statement
        .query_row(parameters, map_transaction_row)
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
                // SQLite does not report which foreign key failed. The
                // category is the only reference a user can enter by hand.
                if builder.category_id.is_some() {
                    Error::InvalidCategory(builder.category_id)
                } else {
                    Error::InvalidAccount(builder.account_id)
                }
            } else {
                Error::from(error)
            }
        })
}

/// Look up a single transaction by `id`.
///
/// # Errors
/// Returns [Error::NotFound] when no transaction has this `id`, or
/// [Error::SqlError] when the query fails.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let mut statement = connection.prepare(
        "SELECT id, account_id, category_id, kind, amount, occurred_at, description, status,
            created_at
         FROM \"transaction\"
         WHERE id = :id",
    )?;
    let transaction = statement.query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Count every transaction currently stored.
///
/// # Errors
/// Returns [Error::SqlError] when the query fails.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    let count = connection.query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| {
        row.get(0)
    })?;

    Ok(count)
}

/// Create the transaction table and its supporting index.
///
/// Seeds `sqlite_sequence` so the first transaction gets ID 1.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            category_id INTEGER,
            kind TEXT NOT NULL,
            amount REAL NOT NULL,
            occurred_at TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'posted',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f+00:00', 'now')),
            FOREIGN KEY (account_id) REFERENCES account (id)
                ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY (category_id) REFERENCES category (id)
                ON UPDATE CASCADE ON DELETE SET NULL
        );

        INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0);

        CREATE INDEX IF NOT EXISTS idx_transaction_account_occurred
            ON \"transaction\" (account_id, occurred_at);",
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let kind_text: String = row.get(3)?;
    let kind = kind_text.parse::<TransactionKind>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        account_id: row.get(1)?,
        category_id: row.get(2)?,
        kind,
        amount: row.get(4)?,
        occurred_at: row.get(5)?,
        description: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
