//! The route handler and fallback response for missing pages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback route handler for requests that match no route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 page as a response, for handlers that discover a missing
/// resource themselves.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, we could not find that page.",
            "Check the URL or head back to the dashboard.",
        ),
    )
        .into_response()
}
