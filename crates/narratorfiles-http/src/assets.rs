//! Static assets embedded into the binary.

use std::borrow::Cow;

use bytes::Bytes;
use http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use http::{HeaderMap, HeaderValue, StatusCode};
use rust_embed::RustEmbed;

use crate::body::BrowserBody;
use crate::error::HandlerError;

const CACHE_POLICY: &str = "public, max-age=3600";

#[derive(RustEmbed)]
#[folder = "static/"]
struct EmbeddedAssets;

/// A single embedded file ready to be served.
#[derive(Debug, Clone)]
pub struct StaticAsset {
    /// File contents.
    pub bytes: Bytes,
    /// MIME type guessed from the file extension.
    pub content_type: String,
    /// Strong validator derived from the content hash, already quoted.
    pub etag: String,
}

/// Lookup into the embedded `static/` bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAssets;

impl StaticAssets {
    /// Fetch an asset by its path inside the bundle.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<StaticAsset> {
        if path.is_empty() || path.split('/').any(|seg| seg == "..") {
            return None;
        }
        let file = EmbeddedAssets::get(path)?;

        let bytes = match file.data {
            Cow::Borrowed(data) => Bytes::from_static(data),
            Cow::Owned(data) => Bytes::from(data),
        };
        Some(StaticAsset {
            bytes,
            content_type: mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_owned(),
            etag: format!("\"{}\"", hex::encode(file.metadata.sha256_hash())),
        })
    }

    /// Names of every bundled asset.
    pub fn names(&self) -> impl Iterator<Item = Cow<'static, str>> {
        EmbeddedAssets::iter()
    }

    /// Serve `path`, answering `304 Not Modified` when the client's
    /// `If-None-Match` already names the current ETag.
    pub fn response(
        &self,
        path: &str,
        request_headers: &HeaderMap,
    ) -> Result<http::Response<BrowserBody>, HandlerError> {
        let asset = self.get(path).ok_or(HandlerError::NotFound)?;
        let etag = HeaderValue::from_str(&asset.etag).map_err(|_| HandlerError::NotFound)?;

        let mut builder = http::Response::builder()
            .header(ETAG, etag)
            .header(CACHE_CONTROL, CACHE_POLICY);

        let body = if etag_matches(request_headers, &asset.etag) {
            builder = builder.status(StatusCode::NOT_MODIFIED);
            BrowserBody::empty()
        } else {
            builder = builder
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, asset.content_type.as_str());
            BrowserBody::from_bytes(asset.bytes)
        };

        Ok(builder
            .body(body)
            .expect("static asset response should be valid"))
    }
}

fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}
