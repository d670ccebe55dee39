//! The API endpoint that updates an account's name and currency.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::{AccountId, create_endpoint::normalize_currency, edit_page::edit_account_form_view},
    app_state::lock_database,
    db::is_constraint_violation,
    endpoints,
};

/// The state needed for the [edit_account_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct EditAccountState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form fields for updating an account.
#[derive(Debug, Deserialize)]
pub struct EditAccountForm {
    /// The new account name.
    name: String,
    /// The new ISO 4217 currency code.
    currency: String,
}

/// Update the name and currency of `account_id`.
///
/// Redirects to the accounts page on success. A blank or duplicate name
/// re-renders the edit form with an error message.
pub async fn edit_account_endpoint(
    State(state): State<EditAccountState>,
    Path(account_id): Path<AccountId>,
    Form(form): Form<EditAccountForm>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_ACCOUNT, account_id);

    let name = form.name.trim();
    if name.is_empty() {
        let message = format!("Error: {}", Error::EmptyAccountName);
        return edit_account_form_view(&update_endpoint, &form.name, &form.currency, &message)
            .into_response();
    }
    let currency = normalize_currency(&form.currency);

    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match update_account(account_id, name, &currency, &connection) {
        Ok(0) => Error::UpdateMissingAccount.into_alert_response(),
        Ok(_) => (
            HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::DuplicateAccountName(_)) => {
            let message = format!("Error: {error}");
            edit_account_form_view(&update_endpoint, name, &currency, &message).into_response()
        }
        Err(error) => {
            tracing::error!("could not update account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Update the account row, mapping a name collision to
/// [Error::DuplicateAccountName]. Changes zero rows when no account has `id`.
fn update_account(
    id: AccountId,
    name: &str,
    currency: &str,
    connection: &Connection,
) -> Result<usize, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE account SET name = ?1, currency = ?2 WHERE id = ?3",
            params![name, currency, id],
        )
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
                Error::DuplicateAccountName(name.to_string())
            } else {
                Error::from(error)
            }
        })?;

    Ok(rows_affected)
}
