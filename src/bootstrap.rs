//! Provisioning of the starter ledger.
//!
//! A fresh install has no accounts, so the dashboard offers a one-click
//! bootstrap that creates a default account and a handful of everyday
//! spending categories.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{create_account, get_all_accounts},
    app_state::lock_database,
    category::{CategoryName, create_category, get_all_categories},
    endpoints,
};

/// The name of the account created by provisioning.
const DEFAULT_ACCOUNT_NAME: &str = "Main account";

/// The currency of the account created by provisioning.
const DEFAULT_CURRENCY: &str = "COP";

/// The categories created by provisioning, as name and icon pairs.
const DEFAULT_CATEGORIES: [(&str, &str); 6] = [
    ("Food", "🍽️"),
    ("Transport", "🚌"),
    ("Home", "🏠"),
    ("Fun", "🎉"),
    ("Health", "🩺"),
    ("Other", "🏷️"),
];

/// Create the starter account and categories if none exist yet.
///
/// An instance that already has accounts keeps them untouched, and the same
/// goes for categories, so calling this twice changes nothing.
pub fn provision_defaults(connection: &Connection) -> Result<(), Error> {
    if get_all_accounts(connection)?.is_empty() {
        create_account(DEFAULT_ACCOUNT_NAME, DEFAULT_CURRENCY, connection)?;
        tracing::info!("created the starter account '{DEFAULT_ACCOUNT_NAME}'");
    }

    if get_all_categories(connection)?.is_empty() {
        for (name, icon) in DEFAULT_CATEGORIES {
            create_category(CategoryName::new_unchecked(name), Some(icon), connection)?;
        }
        tracing::info!("created the starter categories");
    }

    Ok(())
}

/// The state needed to provision the starter ledger.
#[derive(Debug, Clone)]
pub struct BootstrapState {
    /// The database connection for creating the starter rows.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BootstrapState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that provisions the starter ledger and redirects to the
/// dashboard.
pub async fn bootstrap_endpoint(State(state): State<BootstrapState>) -> Response {
    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = provision_defaults(&connection) {
        tracing::error!("could not provision the starter ledger: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
