//! The API endpoint that records a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// axum_extra's Form parses an unset category as None where axum::Form rejects
// the whole submission.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    account::AccountId,
    app_state::lock_database,
    category::CategoryId,
    endpoints,
    timezone::get_local_offset,
    transaction::{Transaction, TransactionKind, core::create_transaction},
};

/// The state needed for the [create_transaction_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The account the money moved in or out of.
    pub account_id: AccountId,
    /// Whether money was spent or earned, "expense" or "income".
    pub kind: String,
    /// The non-negative value of the transaction.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The category to classify the transaction under.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// The settlement status, "posted" or "pending".
    pub status: String,
}

/// Record a transaction from the submitted form and redirect to the
/// transactions page.
///
/// The transaction is timestamped at midnight of the submitted date in the
/// instance's local timezone. Dates after today are rejected.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("unknown timezone {}", state.local_timezone);
        return Error::InvalidTimezone(state.local_timezone).into_alert_response();
    };

    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    if form.date > today {
        tracing::warn!("rejected a transaction dated {} (after {today})", form.date);
        return Error::FutureDate(form.date).into_alert_response();
    }

    let kind = match form.kind.parse::<TransactionKind>() {
        Ok(kind) => kind,
        Err(error) => {
            tracing::error!("could not parse transaction kind: {error}");
            return error.into_alert_response();
        }
    };

    let occurred_at = form.date.midnight().assume_offset(local_offset);
    let transaction = Transaction::build(form.account_id, kind, form.amount)
        .category_id(form.category_id)
        .occurred_at(occurred_at)
        .description(&form.description)
        .status(&form.status);

    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match create_transaction(transaction, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not record transaction: {error}");
            error.into_alert_response()
        }
    }
}
