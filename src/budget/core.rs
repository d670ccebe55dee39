//! The data models and database queries for monthly budgets.

use rusqlite::Connection;
use time::{Date, Month};

use crate::{
    Error, account::AccountId, category::CategoryId, database_id::DatabaseId,
    db::is_constraint_violation,
};

/// Database identifier for a budget.
pub type BudgetId = DatabaseId;

/// Database identifier for a per-category budget limit.
pub type BudgetLimitId = DatabaseId;

/// The spending budget of an account for one calendar month.
///
/// There is at most one budget per account and month. Per-category ceilings
/// are stored separately as [BudgetLimit] rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The account this budget applies to.
    pub account_id: AccountId,
    /// The month this budget covers, stored as the first day of the month.
    pub month: Date,
    /// The spending ceiling across all categories. `None` or a value at or
    /// below zero means there is no total limit.
    pub total_limit: Option<f64>,
}

/// A per-category spending ceiling within a budget's month.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLimit {
    /// The ID of the budget limit.
    pub id: BudgetLimitId,
    /// The budget this limit belongs to.
    pub budget_id: BudgetId,
    /// The category the limit applies to.
    pub category_id: CategoryId,
    /// The spending ceiling. A value at or below zero means no limit.
    pub amount: f64,
}

/// The first day of the month containing `date`.
pub fn month_start(date: Date) -> Date {
    // Day one is valid for every month, so the fallback is unreachable.
    date.replace_day(1).unwrap_or(date)
}

/// The first day of the month after the one containing `date`.
pub fn next_month_start(date: Date) -> Date {
    let first = month_start(date);

    let (year, month) = match first.month() {
        Month::December => (first.year() + 1, Month::January),
        month => (first.year(), month.next()),
    };

    Date::from_calendar_date(year, month, 1).unwrap_or(first)
}

/// Initialize the budget and budget limit tables.
///
/// Budget months are stored as the first day of the month, so the unique
/// index on `(account_id, month)` enforces one budget per account and month.
pub fn create_budget_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            account_id INTEGER NOT NULL,
            month TEXT NOT NULL,
            total_limit REAL,
            UNIQUE(account_id, month),
            FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS budget_limit (
            id INTEGER PRIMARY KEY,
            budget_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            UNIQUE(budget_id, category_id),
            FOREIGN KEY(budget_id) REFERENCES budget(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
        );",
    )?;

    Ok(())
}

/// Retrieve the budget of `account_id` for the month containing `month`.
///
/// Returns `None` if no budget has been saved for that month yet.
pub fn get_budget(
    account_id: AccountId,
    month: Date,
    connection: &Connection,
) -> Result<Option<Budget>, Error> {
    let month = month_start(month);

    let result = connection
        .prepare(
            "SELECT id, account_id, month, total_limit FROM budget
             WHERE account_id = ?1 AND month = ?2;",
        )?
        .query_row((account_id, month), map_budget_row);

    match result {
        Ok(budget) => Ok(Some(budget)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Retrieve the per-category limits of a budget, oldest first.
pub fn get_budget_limits(
    budget_id: BudgetId,
    connection: &Connection,
) -> Result<Vec<BudgetLimit>, Error> {
    connection
        .prepare(
            "SELECT id, budget_id, category_id, amount FROM budget_limit
             WHERE budget_id = :budget_id
             ORDER BY id ASC;",
        )?
        .query_map(&[(":budget_id", &budget_id)], map_budget_limit_row)?
        .map(|maybe_limit| maybe_limit.map_err(Error::from))
        .collect()
}

/// Save the budget of `account_id` for the month containing `month`.
///
/// The budget row is created or updated in place, and its per-category limit
/// rows are replaced with `category_limits`. Categories not listed in
/// `category_limits` therefore lose their limit. A duplicated category ID
/// keeps the last listed amount.
///
/// # Errors
/// Returns:
/// - [Error::InvalidAccount] when `account_id` does not match an existing
///   account,
/// - [Error::InvalidCategory] when a category ID in `category_limits` does
///   not match an existing category,
/// - [Error::SqlError] for any other SQL failure.
pub fn save_budget(
    account_id: AccountId,
    month: Date,
    total_limit: Option<f64>,
    category_limits: &[(CategoryId, f64)],
    connection: &Connection,
) -> Result<Budget, Error> {
    let month = month_start(month);

    // Grouped so a failed limit write cannot leave a half-saved budget.
    let sql_transaction = rusqlite::Transaction::new_unchecked(
        connection,
        rusqlite::TransactionBehavior::Immediate,
    )?;

    sql_transaction
        .execute(
            "INSERT INTO budget (account_id, month, total_limit)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(account_id, month) DO UPDATE SET total_limit = excluded.total_limit;",
            (account_id, month, total_limit),
        )
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
                Error::InvalidAccount(account_id)
            } else {
                error.into()
            }
        })?;

    let budget = sql_transaction
        .prepare(
            "SELECT id, account_id, month, total_limit FROM budget
             WHERE account_id = ?1 AND month = ?2;",
        )?
        .query_row((account_id, month), map_budget_row)?;

    sql_transaction.execute(
        "DELETE FROM budget_limit WHERE budget_id = ?1;",
        [budget.id],
    )?;

    for &(category_id, amount) in category_limits {
        sql_transaction
            .execute(
                "INSERT INTO budget_limit (budget_id, category_id, amount)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(budget_id, category_id) DO UPDATE SET amount = excluded.amount;",
                (budget.id, category_id, amount),
            )
            .map_err(|error| {
                if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
                    Error::InvalidCategory(Some(category_id))
                } else {
                    error.into()
                }
            })?;
    }

    sql_transaction.commit()?;

    Ok(budget)
}

fn map_budget_row(row: &rusqlite::Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        account_id: row.get(1)?,
        month: row.get(2)?,
        total_limit: row.get(3)?,
    })
}

fn map_budget_limit_row(row: &rusqlite::Row) -> Result<BudgetLimit, rusqlite::Error> {
    Ok(BudgetLimit {
        id: row.get(0)?,
        budget_id: row.get(1)?,
        category_id: row.get(2)?,
        amount: row.get(3)?,
    })
}

#[cfg(test)]
mod month_tests {
    use time::macros::date;

    use super::{month_start, next_month_start};

    #[test]
    fn month_start_returns_first_of_month() {
        assert_eq!(month_start(date!(2025 - 10 - 17)), date!(2025 - 10 - 01));
        assert_eq!(month_start(date!(2025 - 10 - 01)), date!(2025 - 10 - 01));
    }

    #[test]
    fn next_month_start_returns_first_of_following_month() {
        assert_eq!(
            next_month_start(date!(2025 - 10 - 17)),
            date!(2025 - 11 - 01)
        );
    }

    #[test]
    fn next_month_start_rolls_over_the_year() {
        assert_eq!(
            next_month_start(date!(2025 - 12 - 31)),
            date!(2026 - 01 - 01)
        );
    }
}
