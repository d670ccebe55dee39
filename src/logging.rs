//! Request and response logging middleware.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// The maximum number of body bytes included in a request or response log line.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log each request and its response, including their bodies.
///
/// Bodies are logged at the `info` level, truncated to [LOG_BODY_LENGTH_LIMIT]
/// bytes. Bodies over the limit are logged in full at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = read_body_text(body).await;
    log_with_body(&format!("Received request: {parts:#?}"), &body_text);

    let request = Request::from_parts(parts, Body::from(body_text));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = read_body_text(body).await;
    log_with_body(&format!("Sending response: {parts:#?}"), &body_text);

    Response::from_parts(parts, Body::from(body_text))
}

async fn read_body_text(body: Body) -> String {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("could not read body for logging: {error}");
            String::new()
        }
    }
}

fn log_with_body(summary: &str, body: &str) {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{summary}\nbody: {body:?}");
        return;
    }

    tracing::info!("{summary}\nbody: {}...", truncated(body));
    tracing::debug!("full body: {body:?}");
}

/// The prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes, cut on a
/// character boundary.
fn truncated(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}
