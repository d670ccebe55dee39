//! The API endpoint that deletes an account and everything recorded under it.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, account::core::AccountId, alert::Alert, app_state::lock_database};

/// The state needed for the [delete_account_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct DeleteAccountState {
    /// The shared database connection.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete `account_id` and respond with an alert fragment.
///
/// The foreign key cascade also removes the account's transactions and
/// budgets.
pub async fn delete_account_endpoint(
    State(state): State<DeleteAccountState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match delete_account(account_id, &connection) {
        Ok(0) => Error::DeleteMissingAccount.into_alert_response(),
        // HTMX only removes the table row on a 200 response.
        Ok(_) => Alert::Success {
            message: "Account deleted".to_owned(),
            details: String::new(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn delete_account(id: AccountId, connection: &Connection) -> Result<usize, Error> {
    let rows_affected = connection.execute("DELETE FROM account WHERE id = ?1", [id])?;

    Ok(rows_affected)
}
