//! Response body parsing for the route handler tests.

use axum::{body::Body, response::Response};
use scraper::Html;

async fn read_body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("could not read the response body");

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse a response carrying a complete HTML page.
pub(crate) async fn parse_page(response: Response<Body>) -> Html {
    Html::parse_document(&read_body_text(response).await)
}

/// Parse a response carrying an HTMX fragment.
pub(crate) async fn parse_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&read_body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_well_formed(html: &Html) {
    let errors = &html.errors;
    assert!(errors.is_empty(), "HTML parse errors: {errors:?}");
}

/// The trimmed text of the first paragraph, which is where the alert
/// fragments put their message.
#[track_caller]
pub(crate) fn first_paragraph_text(html: &Html) -> String {
    let paragraph = scraper::Selector::parse("p").unwrap();

    html.select(&paragraph)
        .next()
        .expect("no paragraph found")
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
