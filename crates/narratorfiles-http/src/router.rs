//! Request routing: maps a method and URI path to a [`Route`].
//!
//! | Path | Route |
//! |------|-------|
//! | `/_health` | [`Route::Health`] |
//! | `/static/{file}` | [`Route::Static`] |
//! | `/object/{key}` | [`Route::Download`] |
//! | `/play/{key}` | [`Route::Play`] |
//! | anything else | [`Route::Listing`] of the path as a sub-directory |
//!
//! Keys and sub-paths are percent-decoded. Only `GET` and `HEAD` are routed.

use http::Method;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::HandlerError;

/// Path prefix for presigned download redirects.
pub const OBJECT_PREFIX: &str = "/object/";
/// Path prefix for the audio player.
pub const PLAY_PREFIX: &str = "/play/";
/// Path prefix for embedded static assets.
pub const STATIC_PREFIX: &str = "/static/";
/// Health check path.
pub const HEALTH_PATH: &str = "/_health";

/// Characters escaped when a key is placed into a link path. `/` is kept so
/// nested keys stay readable.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A resolved request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Listing of a sub-path below the configured key prefix (`""` for root).
    Listing {
        /// Decoded sub-path without the leading `/`.
        sub_path: String,
    },
    /// Redirect to a presigned download.
    Download {
        /// Decoded key relative to the configured prefix.
        key: String,
    },
    /// Audio playback page.
    Play {
        /// Decoded key relative to the configured prefix.
        key: String,
    },
    /// Embedded static asset.
    Static {
        /// Asset path inside the bundle.
        path: String,
    },
    /// Liveness probe.
    Health,
}

/// Resolve a request method and path into a [`Route`].
pub fn resolve(method: &Method, path: &str) -> Result<Route, HandlerError> {
    if *method != Method::GET && *method != Method::HEAD {
        return Err(HandlerError::MethodNotAllowed(method.clone()));
    }

    if path == HEALTH_PATH {
        return Ok(Route::Health);
    }
    if let Some(rest) = path.strip_prefix(STATIC_PREFIX) {
        return Ok(Route::Static {
            path: decode_uri_component(rest),
        });
    }
    if let Some(rest) = path.strip_prefix(OBJECT_PREFIX) {
        return Ok(Route::Download {
            key: non_empty_key(rest)?,
        });
    }
    if let Some(rest) = path.strip_prefix(PLAY_PREFIX) {
        return Ok(Route::Play {
            key: non_empty_key(rest)?,
        });
    }

    Ok(Route::Listing {
        sub_path: decode_uri_component(path.trim_start_matches('/')),
    })
}

fn non_empty_key(raw: &str) -> Result<String, HandlerError> {
    let key = decode_uri_component(raw);
    if key.is_empty() {
        Err(HandlerError::NotFound)
    } else {
        Ok(key)
    }
}

/// Decode a percent-encoded URI component.
fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Percent-encode a key for use in a link path.
#[must_use]
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, PATH_ENCODE_SET).to_string()
}

/// Link to the listing of a directory's relative key.
#[must_use]
pub fn listing_href(relative_key: &str) -> String {
    format!("/{}", encode_key(relative_key))
}

/// Link to the download redirect of a relative key.
#[must_use]
pub fn download_href(relative_key: &str) -> String {
    format!("{OBJECT_PREFIX}{}", encode_key(relative_key))
}

/// Link to the playback page of a relative key.
#[must_use]
pub fn play_href(relative_key: &str) -> String {
    format!("{PLAY_PREFIX}{}", encode_key(relative_key))
}
