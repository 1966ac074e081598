//! Response constructors shared by the handlers.

use http::header::{ALLOW, CONTENT_TYPE, LOCATION, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, StatusCode};

use crate::body::BrowserBody;
use crate::error::HandlerError;

/// Plaintext response, the format used for every error.
#[must_use]
pub fn text_response(status: StatusCode, message: impl Into<String>) -> http::Response<BrowserBody> {
    let mut message = message.into();
    message.push('\n');
    http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())
        .header(X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(BrowserBody::from_string(message))
        .expect("static text response should be valid")
}

/// `200 OK` with a rendered HTML page.
#[must_use]
pub fn html_response(html: String) -> http::Response<BrowserBody> {
    http::Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())
        .body(BrowserBody::from_string(html))
        .expect("static html response should be valid")
}

/// `307 Temporary Redirect` to `location`.
#[must_use]
pub fn redirect_response(location: &str) -> http::Response<BrowserBody> {
    let Ok(value) = HeaderValue::from_str(location) else {
        return text_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "redirect location is not a valid header value",
        );
    };

    let mut response = http::Response::new(BrowserBody::empty());
    *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
    response.headers_mut().insert(LOCATION, value);
    response
}

/// Health check body.
#[must_use]
pub fn health_check_response() -> http::Response<BrowserBody> {
    http::Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(BrowserBody::from_string(
            r#"{"status":"running","service":"narratorfiles"}"#,
        ))
        .expect("static health response should be valid")
}

/// Convert a handler error into a plaintext response with its status.
///
/// The body carries the error's display text, including the underlying store
/// message for listing and presign failures.
#[must_use]
pub fn error_to_response(err: &HandlerError) -> http::Response<BrowserBody> {
    let mut response = text_response(err.status_code(), err.to_string());
    if matches!(err, HandlerError::MethodNotAllowed(_)) {
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
    }
    response
}
