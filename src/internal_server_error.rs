//! The full-page response for errors the user cannot fix.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Build the 500 page around `description` and a suggested `fix`.
pub fn internal_server_error(description: &str, fix: &str) -> Response {
    let page = error_view("Internal Server Error", "500", description, fix);

    (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
}

/// The 500 page with its stock copy, for errors with no better explanation.
pub fn fallback_internal_server_error() -> Response {
    internal_server_error(
        "Something went wrong on our end.",
        "Refresh the page, or check the server logs if the problem persists.",
    )
}

pub async fn get_internal_server_error_page() -> Response {
    fallback_internal_server_error()
}
