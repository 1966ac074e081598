//! The object-store seam and its S3 implementation.
//!
//! [`ObjectStore`] is the boundary between the browsing logic and the store
//! client: one call per listing page and one per presigned URL. [`S3Store`]
//! implements it on top of `aws-sdk-s3`; tests substitute in-process stubs.
//!
//! # Object safety
//!
//! The trait uses `#[async_trait]` so it can be held as `Arc<dyn ObjectStore>`
//! as well as used generically.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Name reported by the static credentials provider.
const CREDENTIALS_PROVIDER_NAME: &str = "narratorfiles-env";

/// One page of a delimited listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Full keys of the objects on this page.
    pub keys: Vec<String>,
    /// Common prefixes (each ending in the delimiter) on this page.
    pub common_prefixes: Vec<String>,
    /// Token for the next page; `None` when this is the last page.
    pub next_token: Option<String>,
}

/// Minimal object-store capability needed for browsing.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetch one page of keys under `prefix`, grouped by `delimiter`.
    async fn list_page(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, StoreError>;

    /// Produce a presigned GET URL for `key`, valid for `expires_in`.
    ///
    /// Implementations must not check whether the key exists.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError>;
}

/// [`ObjectStore`] backed by an S3-compatible service through `aws-sdk-s3`.
///
/// The SDK client is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    /// Build a store client from static credentials with path-style addressing.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let creds = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let sdk_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(creds)
            .endpoint_url(config.endpoint.clone())
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Bucket this store reads from.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, StoreError> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .delimiter(delimiter)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|e| StoreError::Sdk(DisplayErrorContext(&e).to_string()))?;

        let keys: Vec<String> = resp
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(ToOwned::to_owned))
            .collect();
        let common_prefixes: Vec<String> = resp
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(ToOwned::to_owned))
            .collect();
        let next_token = if resp.is_truncated() == Some(true) {
            resp.next_continuation_token().map(ToOwned::to_owned)
        } else {
            None
        };

        debug!(
            bucket = %self.bucket,
            prefix,
            keys = keys.len(),
            common_prefixes = common_prefixes.len(),
            truncated = next_token.is_some(),
            "fetched listing page"
        );

        Ok(ListPage {
            keys,
            common_prefixes,
            next_token,
        })
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StoreError::Sdk(e.to_string()))?;

        let req = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StoreError::Sdk(DisplayErrorContext(&e).to_string()))?;

        Ok(req.uri().to_owned())
    }
}
