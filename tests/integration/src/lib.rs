//! Integration tests for the narratorfiles server.
//!
//! These tests require a running narratorfiles server (default
//! `http://localhost:8082`, override with `NARRATORFILES_URL`) and the store
//! it browses. The store is reached with the same `STORE_*` variables the
//! server reads, and the server must be browsing the same bucket and prefix.
//! Each test seeds its objects under a fresh directory and removes them
//! afterwards.
//!
//! Run them with:
//! ```text
//! cargo test -p narratorfiles-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Base URL of the running browser, without a trailing slash.
#[must_use]
pub fn browser_url() -> String {
    env_or("NARRATORFILES_URL", "http://localhost:8082")
        .trim_end_matches('/')
        .to_owned()
}

/// Bucket the server browses.
#[must_use]
pub fn bucket() -> String {
    env_or("STORE_BUCKET", "audiobooks")
}

/// Key prefix the server is confined to, normalized to end in `/` unless empty.
#[must_use]
pub fn key_prefix() -> String {
    let prefix = env_or("STORE_PREFIX", "");
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix
    } else {
        format!("{prefix}/")
    }
}

/// Create a configured S3 client pointing at the store the server browses.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new(
        env_or("STORE_ACCESS_KEY_ID", "test"),
        env_or("STORE_SECRET_ACCESS_KEY", "test"),
        None,
        None,
        "integration-test",
    );

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(env_or("STORE_REGION", "us-east-1")))
        .credentials_provider(creds)
        .endpoint_url(env_or("STORE_ENDPOINT", "http://localhost:4566"))
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// HTTP client that does not follow redirects.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();

    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("http client")
}

/// A unique directory name (relative to the key prefix) for one test.
#[must_use]
pub fn test_dir(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("it-{prefix}-{id}/")
}

/// Upload `body` for each relative key under the configured prefix.
pub async fn seed(client: &aws_sdk_s3::Client, relative_keys: &[String], body: &'static [u8]) {
    let bucket = bucket();
    let prefix = key_prefix();
    for relative in relative_keys {
        let key = format!("{prefix}{relative}");
        client
            .put_object()
            .bucket(&bucket)
            .key(&key)
            .body(ByteStream::from_static(body))
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to put {key}: {e}"));
    }
    tracing::debug!(count = relative_keys.len(), "seeded test objects");
}

/// Delete every object under a test directory.
pub async fn cleanup_dir(client: &aws_sdk_s3::Client, dir: &str) {
    let bucket = bucket();
    let full_prefix = format!("{}{dir}", key_prefix());

    let mut continuation_token = None;
    loop {
        let mut req = client
            .list_objects_v2()
            .bucket(&bucket)
            .prefix(&full_prefix);
        if let Some(token) = continuation_token.take() {
            req = req.continuation_token(token);
        }
        let Ok(resp) = req.send().await else {
            return;
        };

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(&bucket).key(key).send().await;
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
        } else {
            break;
        }
    }
}

/// GET `path` on the browser and return status, headers, and body text.
pub async fn get(
    client: &reqwest::Client,
    path: &str,
) -> (reqwest::StatusCode, reqwest::header::HeaderMap, String) {
    let resp = client
        .get(format!("{}{path}", browser_url()))
        .send()
        .await
        .unwrap_or_else(|e| panic!("GET {path}: {e}"));
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.text().await.unwrap_or_default();
    (status, headers, body)
}

mod test_access;
mod test_listing;
mod test_static;
