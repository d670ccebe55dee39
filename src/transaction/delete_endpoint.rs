//! The API endpoint that deletes a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, alert::Alert, app_state::lock_database, transaction::TransactionId};

/// The state needed for the [delete_transaction_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The shared database connection.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete `transaction_id` and respond with an alert fragment.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(0) => Error::DeleteMissingTransaction.into_alert_response(),
        // HTMX only removes the table row on a 200 response.
        Ok(_) => Alert::Success {
            message: "Transaction deleted".to_owned(),
            details: String::new(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<usize, Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    Ok(rows_affected)
}
