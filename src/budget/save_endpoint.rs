//! The endpoint that saves an account's monthly budget.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form, and collects the repeated category fields.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    account::AccountId,
    app_state::lock_database,
    budget::core::save_budget,
    category::CategoryId,
    endpoints,
};

/// The state needed to save a budget.
#[derive(Debug, Clone)]
pub struct SaveBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SaveBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for saving a monthly budget.
///
/// The editor submits one `category_id` and one `limit` value per category
/// row, in document order, so the two lists line up index by index.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    /// The account the budget applies to.
    pub account_id: AccountId,
    /// The month the budget covers, any day within the month.
    pub month: Date,
    /// The total limit across all categories. An empty input means no limit.
    #[serde(default)]
    pub total_limit: Option<f64>,
    /// The category of each limit row.
    #[serde(default)]
    pub category_id: Vec<CategoryId>,
    /// The raw limit of each row. An empty string clears the limit.
    #[serde(default)]
    pub limit: Vec<String>,
}

/// A route handler for saving the monthly budget of an account, redirects to
/// the budget editor on success.
///
/// The budget's per-category limits are replaced wholesale: categories whose
/// limit input was left empty end up without a limit.
pub async fn save_budget_endpoint(
    State(state): State<SaveBudgetState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let category_limits = match parse_category_limits(&form.category_id, &form.limit) {
        Ok(category_limits) => category_limits,
        Err(error) => {
            tracing::error!("could not parse budget limits: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = save_budget(
        form.account_id,
        form.month,
        form.total_limit,
        &category_limits,
        &connection,
    ) {
        tracing::error!("could not save budget: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(format!(
            "{}?account={}",
            endpoints::BUDGETS_VIEW,
            form.account_id
        )),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Pair each category ID with its submitted limit, skipping empty inputs.
fn parse_category_limits(
    category_ids: &[CategoryId],
    limits: &[String],
) -> Result<Vec<(CategoryId, f64)>, Error> {
    if category_ids.len() != limits.len() {
        return Err(Error::InvalidBudgetLimits(format!(
            "got {} category ids but {} limit values",
            category_ids.len(),
            limits.len()
        )));
    }

    let mut category_limits = Vec::new();

    for (&category_id, raw_limit) in category_ids.iter().zip(limits) {
        let raw_limit = raw_limit.trim();

        if raw_limit.is_empty() {
            continue;
        }

        let amount = raw_limit
            .parse::<f64>()
            .map_err(|_| Error::InvalidBudgetLimits(format!("'{raw_limit}' is not a number")))?;

        category_limits.push((category_id, amount));
    }

    Ok(category_limits)
}
