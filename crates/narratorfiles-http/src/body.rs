//! Response body type for the browser service.
//!
//! Every response this service produces is small and fully rendered before it
//! is sent (HTML pages, plaintext errors, embedded assets), so [`BrowserBody`]
//! only has a buffered mode and an empty mode. Object bytes never pass
//! through here; clients fetch them from presigned URLs.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::Full;

/// Buffered or empty HTTP response body.
///
/// Implements [`http_body::Body`] so it can be used directly with hyper responses.
#[derive(Debug, Default)]
pub enum BrowserBody {
    /// Fully buffered content.
    Buffered(Full<Bytes>),
    /// No content (redirects, 304 responses).
    #[default]
    Empty,
}

impl BrowserBody {
    /// Create a buffered body from bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::Buffered(Full::new(data.into()))
    }

    /// Create an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Create a buffered body from a UTF-8 string.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self::Buffered(Full::new(Bytes::from(s.into())))
    }
}

impl http_body::Body for BrowserBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
        match self.get_mut() {
            Self::Buffered(full) => Pin::new(full)
                .poll_frame(cx)
                .map_err(|never| match never {}),
            Self::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Buffered(full) => full.is_end_stream(),
            Self::Empty => true,
        }
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            Self::Buffered(full) => full.size_hint(),
            Self::Empty => http_body::SizeHint::with_exact(0),
        }
    }
}

/// Collect a response body into bytes. Test helper shared across modules.
#[cfg(test)]
pub(crate) async fn collect_bytes(body: BrowserBody) -> Bytes {
    use http_body_util::BodyExt;

    body.collect()
        .await
        .expect("buffered bodies are infallible")
        .to_bytes()
}
