//! BiYú is a self-hosted web app for tracking personal spending against
//! monthly budgets.
//!
//! The crate serves HTML over HTTP: handlers render maud views directly and
//! htmx swaps in the fragments.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod bootstrap;
mod budget;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use account::{Account, get_all_accounts};
pub use app_state::AppState;
pub use bootstrap::provision_defaults;
pub use budget::save_budget;
pub use category::{Category, get_all_categories};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::{Transaction, TransactionKind, create_transaction};

use crate::{
    account::AccountId,
    alert::error_alert_response,
    category::CategoryId,
    internal_server_error::{fallback_internal_server_error, internal_server_error},
    not_found::get_404_not_found_response,
};

/// Waits for ctrl+c or the terminate signal, then tells the server to finish
/// in-flight requests and stop.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    wait_for_shutdown_signal().await;
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        let mut signal = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("could not install the terminate signal handler");
        signal.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        result = signal::ctrl_c() => {
            result.expect("could not listen for the ctrl+c signal");
            tracing::debug!("ctrl+c received, shutting down");
        }
        _ = terminate => tracing::debug!("terminate signal received, shutting down"),
    }
}

/// Everything that can go wrong while handling a request.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The configured timezone is not a canonical timezone name.
    #[error("{0} is not a canonical timezone name")]
    InvalidTimezone(String),

    /// A transaction was given a date in the future.
    ///
    /// Transactions record money that has already moved, so dating one ahead
    /// of today is rejected.
    #[error("the date {0} is in the future")]
    FutureDate(Date),

    /// A transaction kind string was neither "income" nor "expense".
    #[error("'{0}' is not a valid transaction kind")]
    InvalidTransactionKind(String),

    /// The submitted category ID has no matching category row.
    #[error("no category with the submitted ID exists")]
    InvalidCategory(Option<CategoryId>),

    /// The submitted account ID has no matching account row.
    #[error("no account with the submitted ID exists")]
    InvalidAccount(AccountId),

    /// The per-category limit rows of a budget form could not be read.
    #[error("could not read the budget's category limits: {0}")]
    InvalidBudgetLimits(String),

    /// An empty string was used to create an account name.
    #[error("Account name cannot be empty")]
    EmptyAccountName,

    /// Account names are unique and this one is already taken.
    #[error("the account \"{0}\" already exists in the database")]
    DuplicateAccountName(String),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// Category names are unique and this one is already taken.
    ///
    /// Names are compared case-insensitively, ignoring surrounding whitespace.
    #[error("A category named '{0}' already exists")]
    DuplicateCategoryName(String),

    /// The requested resource does not exist.
    ///
    /// Handlers surface this when an ID in the request does not match a row.
    /// Query layers map [rusqlite::Error::QueryReturnedNoRows] onto it.
    #[error("the requested resource does not exist")]
    NotFound,

    /// Any SQL failure the app has no specific handling for.
    #[error("unexpected SQL error: {0}")]
    SqlError(rusqlite::Error),

    /// The shared database mutex was poisoned or unavailable.
    #[error("could not lock the database connection")]
    DatabaseLockError,

    /// A delete targeted a transaction row that was already gone.
    #[error("the transaction to delete is not in the database")]
    DeleteMissingTransaction,

    /// A delete targeted an account row that was already gone.
    #[error("the account to delete is not in the database")]
    DeleteMissingAccount,

    /// An update targeted an account row that was already gone.
    #[error("the account to update is not in the database")]
    UpdateMissingAccount,

    /// An update targeted a category row that was already gone.
    #[error("the category to update is not in the database")]
    UpdateMissingCategory,

    /// A delete targeted a category row that was already gone.
    #[error("the category to delete is not in the database")]
    DeleteMissingCategory,
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        if let rusqlite::Error::QueryReturnedNoRows = error {
            return Error::NotFound;
        }

        tracing::error!("unhandled SQL error: {error}");
        Error::SqlError(error)
    }
}

fn timezone_fix_message(timezone: &str) -> String {
    format!(
        "\"{timezone}\" is not a canonical timezone name. Restart the server \
        with --timezone set to a value such as America/Bogota."
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => internal_server_error(
                "Invalid timezone setting",
                &timezone_fix_message(&timezone),
            ),
            Error::DatabaseLockError => fallback_internal_server_error(),
            // Everything else is an internal detail the client should not see.
            error => {
                tracing::error!("unexpected error: {error}");
                fallback_internal_server_error()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => error_alert_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid timezone setting",
                &timezone_fix_message(&timezone),
            ),
            Error::FutureDate(date) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Invalid transaction date",
                &format!("{date} is a date in the future, which is not allowed. Change the date to today or earlier."),
            ),
            Error::InvalidTransactionKind(kind) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Invalid transaction kind",
                &format!("'{kind}' is not a valid transaction kind. Choose either income or expense."),
            ),
            Error::InvalidCategory(category_id) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Invalid category",
                &format!("Could not find a category with the ID {category_id:?}"),
            ),
            Error::InvalidAccount(account_id) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Invalid account",
                &format!("Could not find an account with the ID {account_id}"),
            ),
            Error::InvalidBudgetLimits(detail) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Invalid budget limits",
                &format!("The category limits could not be read ({detail}). Reload the page and try again."),
            ),
            Error::DeleteMissingTransaction => error_alert_response(
                StatusCode::NOT_FOUND,
                "Could not delete transaction",
                "No transaction with that ID exists. It may have been deleted \
                in another tab; refresh the page to check.",
            ),
            Error::UpdateMissingAccount => error_alert_response(
                StatusCode::NOT_FOUND,
                "Could not update account",
                "No account with that ID exists.",
            ),
            Error::DeleteMissingAccount => error_alert_response(
                StatusCode::NOT_FOUND,
                "Could not delete account",
                "No account with that ID exists. It may have been deleted \
                in another tab; refresh the page to check.",
            ),
            Error::UpdateMissingCategory => error_alert_response(
                StatusCode::NOT_FOUND,
                "Could not update category",
                "No category with that ID exists.",
            ),
            Error::DeleteMissingCategory => error_alert_response(
                StatusCode::NOT_FOUND,
                "Could not delete category",
                "No category with that ID exists. It may have been deleted \
                in another tab; refresh the page to check.",
            ),
            Error::DuplicateAccountName(name) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Duplicate account name",
                &format!(
                    "An account named {name} is already saved. Pick another \
                    name, or edit the existing account instead.",
                ),
            ),
            Error::DuplicateCategoryName(name) => error_alert_response(
                StatusCode::BAD_REQUEST,
                "Duplicate category name",
                &format!(
                    "A category named {name} is already saved. Pick another \
                    name, or edit the existing category instead.",
                ),
            ),
            _ => error_alert_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error",
                "Something went wrong on our end. The server logs have the details.",
            ),
        }
    }
}
