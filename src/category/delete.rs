//! The API endpoint that deletes a category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::lock_database,
    category::{CategoryId, db::delete_category},
};

/// The state needed for the [delete_category_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct DeleteCategoryEndpointState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete `category_id` and respond with an alert fragment.
///
/// Transactions keep their rows; the deleted category's transactions become
/// uncategorized.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryEndpointState>,
) -> Response {
    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match delete_category(category_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => Alert::Success {
            message: "Category deleted".to_owned(),
            details: String::new(),
        }
        .into_response(),
        Err(error @ Error::DeleteMissingCategory) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("could not delete category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}
