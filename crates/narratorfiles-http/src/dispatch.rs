//! The boundary between the hyper service and request handling.
//!
//! A [`RequestHandler`] receives the request head (this service never reads
//! request bodies) and always produces a complete response: failures are
//! already converted into their plaintext error responses. Decorators in
//! [`crate::middleware`] wrap one handler in another.

use std::future::Future;
use std::pin::Pin;

use crate::body::BrowserBody;

/// Boxed future returned by [`RequestHandler::handle`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = http::Response<BrowserBody>> + Send>>;

/// Something that turns a request head into a response.
///
/// Boxed futures keep the trait object safe so decorators can hold handlers
/// generically or behind `Arc<dyn RequestHandler>`.
pub trait RequestHandler: Send + Sync + 'static {
    /// Handle one request.
    fn handle(&self, parts: http::request::Parts) -> HandlerFuture;
}

impl<H: RequestHandler + ?Sized> RequestHandler for std::sync::Arc<H> {
    fn handle(&self, parts: http::request::Parts) -> HandlerFuture {
        (**self).handle(parts)
    }
}
