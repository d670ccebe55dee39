//! Status and header assertions.

use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_ok(response: &Response<Body>) {
    let status = response.status();
    assert_eq!(status, StatusCode::OK, "want status 200 OK, got {status}");
}

#[track_caller]
pub(crate) fn assert_media_type(response: &Response<Body>, content_type: &str) {
    assert_eq!(header_value(response, "content-type"), content_type);
}

#[track_caller]
pub(crate) fn header_value(response: &Response<Body>, header_name: &str) -> String {
    let Some(value) = response.headers().get(header_name) else {
        panic!("response has no {header_name} header");
    };

    value
        .to_str()
        .expect("header value is not valid text")
        .to_owned()
}

#[track_caller]
pub(crate) fn assert_hx_redirects_to(response: &Response<Body>, endpoint: &str) {
    assert_eq!(header_value(response, "hx-redirect"), endpoint);
}
