//! The hyper `Service` adapter.
//!
//! [`HttpService`] drops the (unread) request body, hands the request head to
//! its [`RequestHandler`], and stamps the `Server` header on whatever comes
//! back. All other behavior lives in the handler chain.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::HeaderValue;
use http::header::SERVER;
use hyper::body::Incoming;
use hyper::service::Service;

use crate::body::BrowserBody;
use crate::dispatch::RequestHandler;

/// Value of the `Server` response header.
pub const SERVER_NAME: &str = "narratorfiles";

/// Hyper service wrapping a request handler.
#[derive(Debug)]
pub struct HttpService<H: RequestHandler> {
    handler: Arc<H>,
}

impl<H: RequestHandler> HttpService<H> {
    /// Create a service that owns `handler`.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Create a service from a shared handler.
    #[must_use]
    pub fn from_shared(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H: RequestHandler> Clone for HttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: RequestHandler> Service<http::Request<Incoming>> for HttpService<H> {
    type Response = http::Response<BrowserBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let (parts, _body) = req.into_parts();
        let response = self.handler.handle(parts);

        Box::pin(async move {
            let mut response = response.await;
            response
                .headers_mut()
                .insert(SERVER, HeaderValue::from_static(SERVER_NAME));
            Ok(response)
        })
    }
}
