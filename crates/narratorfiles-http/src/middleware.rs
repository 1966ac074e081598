//! Request decorators.
//!
//! Each decorator wraps an inner [`RequestHandler`] and is itself one, so they
//! compose by nesting: `TraceRequests::new(CatchPanic::new(handler))`.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use http::{HeaderValue, StatusCode};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::dispatch::{HandlerFuture, RequestHandler};
use crate::response::text_response;

/// Response header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Runs every request inside a `request` span carrying a fresh request id,
/// logs the outcome with its latency, and echoes the id back to the client.
#[derive(Debug)]
pub struct TraceRequests<H> {
    inner: Arc<H>,
}

impl<H: RequestHandler> TraceRequests<H> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: H) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<H: RequestHandler> RequestHandler for TraceRequests<H> {
    fn handle(&self, parts: http::request::Parts) -> HandlerFuture {
        let inner = Arc::clone(&self.inner);
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "request",
            method = %parts.method,
            path = %parts.uri.path(),
            request_id = %request_id,
        );

        Box::pin(
            async move {
                let started = Instant::now();
                let mut response = inner.handle(parts).await;

                let status = response.status().as_u16();
                let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                if response.status().is_server_error() {
                    warn!(status, latency_ms, "request failed");
                } else {
                    info!(status, latency_ms, "request completed");
                }

                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                response
            }
            .instrument(span),
        )
    }
}

/// Turns a panic anywhere in the inner handler into a plaintext `500`.
#[derive(Debug)]
pub struct CatchPanic<H> {
    inner: Arc<H>,
}

impl<H: RequestHandler> CatchPanic<H> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: H) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<H: RequestHandler> RequestHandler for CatchPanic<H> {
    fn handle(&self, parts: http::request::Parts) -> HandlerFuture {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            let outcome = AssertUnwindSafe(async move { inner.handle(parts).await })
                .catch_unwind()
                .await;
            match outcome {
                Ok(response) => response,
                Err(payload) => {
                    error!(panic = panic_message(payload.as_ref()), "handler panicked");
                    text_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
                }
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}
