//! Database queries for retrieving dashboard ledger data.
//!
//! This module provides a simplified transaction view for the summary
//! computations. It is separate from the main Transaction domain model so
//! that rows with an unrecognized kind or a malformed amount still reach the
//! summary instead of failing the whole page.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{Error, account::AccountId, category::CategoryId, transaction::TransactionId};

/// One transaction row as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub id: TransactionId,
    /// `None` means the row is uncategorized.
    pub category_id: Option<CategoryId>,
    /// Kept as raw text so rows with an unrecognized kind flow through to
    /// the summary, where they count toward nothing.
    pub kind: String,
    pub amount: f64,
    pub occurred_at: OffsetDateTime,
    pub description: String,
    /// "posted" or "pending".
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl LedgerRow {
    /// The row's contribution to the account balance: positive for income,
    /// negative for expenses, zero for anything else.
    pub fn signed_amount(&self) -> f64 {
        match self.kind.as_str() {
            "income" => self.amount,
            "expense" => -self.amount,
            _ => 0.0,
        }
    }

    /// Whether the row counts toward spend totals and alerts. A row with no
    /// recorded status counts as posted.
    pub fn is_posted(&self) -> bool {
        self.status == "posted" || self.status.is_empty()
    }
}

/// Gets every transaction row for an account in chronological order.
///
/// The balance is an all-time figure, so no date filter is applied here; the
/// summary computations narrow the rows to their own windows.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_ledger_rows(
    account_id: AccountId,
    connection: &Connection,
) -> Result<Vec<LedgerRow>, Error> {
    connection
        .prepare(
            // The CAST maps non-numeric amounts to zero instead of failing
            // the row read.
            "SELECT id, category_id, kind, CAST(coalesce(amount, 0) AS REAL), occurred_at, description, status, created_at
             FROM \"transaction\"
             WHERE account_id = :account_id
             ORDER BY occurred_at ASC, id ASC",
        )?
        .query_map(&[(":account_id", &account_id)], |row| {
            Ok(LedgerRow {
                id: row.get(0)?,
                category_id: row.get(1)?,
                kind: row.get(2)?,
                amount: row.get(3)?,
                occurred_at: row.get(4)?,
                description: row.get(5)?,
                status: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<LedgerRow>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

#[cfg(test)]
mod ledger_row_tests {
    use time::macros::datetime;

    use crate::dashboard::query::LedgerRow;

    fn row(kind: &str, amount: f64, status: &str) -> LedgerRow {
        LedgerRow {
            id: 1,
            category_id: None,
            kind: kind.to_owned(),
            amount,
            occurred_at: datetime!(2025-10-05 10:00:00 UTC),
            description: String::new(),
            status: status.to_owned(),
            created_at: datetime!(2025-10-05 10:00:00 UTC),
        }
    }

    #[test]
    fn signed_amount_flips_expenses() {
        assert_eq!(row("income", 5_000.0, "posted").signed_amount(), 5_000.0);
        assert_eq!(row("expense", 5_000.0, "posted").signed_amount(), -5_000.0);
    }

    #[test]
    fn signed_amount_of_unknown_kind_is_zero() {
        assert_eq!(row("transfer", 5_000.0, "posted").signed_amount(), 0.0);
    }

    #[test]
    fn rows_without_a_status_count_as_posted() {
        assert!(row("expense", 1.0, "posted").is_posted());
        assert!(row("expense", 1.0, "").is_posted());
        assert!(!row("expense", 1.0, "pending").is_posted());
    }
}

#[cfg(test)]
mod query_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        account::create_account,
        dashboard::query::get_ledger_rows,
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn returns_only_the_accounts_rows() {
        let conn = get_test_connection();
        let account = create_account("Spending", "COP", &conn).unwrap();
        let other = create_account("Savings", "COP", &conn).unwrap();
        create_transaction(
            Transaction::build(account.id, TransactionKind::Income, 200_000.0),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(account.id, TransactionKind::Expense, 50_000.0),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(other.id, TransactionKind::Expense, 999.0),
            &conn,
        )
        .unwrap();

        let rows = get_ledger_rows(account.id, &conn).unwrap();

        assert_eq!(rows.len(), 2);
        let balance: f64 = rows.iter().map(|row| row.signed_amount()).sum();
        assert_eq!(balance, 150_000.0);
    }

    #[test]
    fn returns_empty_vec_without_transactions() {
        let conn = get_test_connection();
        let account = create_account("Spending", "COP", &conn).unwrap();

        let rows = get_ledger_rows(account.id, &conn).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn rows_come_back_in_chronological_order() {
        let conn = get_test_connection();
        let account = create_account("Spending", "COP", &conn).unwrap();
        create_transaction(
            Transaction::build(account.id, TransactionKind::Expense, 2.0)
                .occurred_at(datetime!(2025-10-02 10:00:00 UTC)),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(account.id, TransactionKind::Expense, 1.0)
                .occurred_at(datetime!(2025-10-01 10:00:00 UTC)),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(account.id, TransactionKind::Expense, 3.0)
                .occurred_at(datetime!(2025-10-03 10:00:00 UTC)),
            &conn,
        )
        .unwrap();

        let rows = get_ledger_rows(account.id, &conn).unwrap();

        let amounts: Vec<f64> = rows.iter().map(|row| row.amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn preserves_unrecognized_kinds_and_statuses() {
        let conn = get_test_connection();
        let account = create_account("Spending", "COP", &conn).unwrap();
        conn.execute(
            "INSERT INTO \"transaction\" (account_id, kind, amount, occurred_at, status)
             VALUES (?1, 'transfer', 42.0, '2025-10-05 10:00:00.000+00:00', 'pending')",
            (account.id,),
        )
        .unwrap();

        let rows = get_ledger_rows(account.id, &conn).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, "transfer");
        assert_eq!(rows[0].status, "pending");
        assert_eq!(rows[0].signed_amount(), 0.0);
    }

    #[test]
    fn coerces_malformed_amounts_to_zero() {
        let conn = get_test_connection();
        let account = create_account("Spending", "COP", &conn).unwrap();
        conn.execute(
            "INSERT INTO \"transaction\" (account_id, kind, amount, occurred_at)
             VALUES (?1, 'expense', 'not a number', '2025-10-05 10:00:00.000+00:00')",
            (account.id,),
        )
        .unwrap();

        let rows = get_ledger_rows(account.id, &conn).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, 0.0);
    }
}
