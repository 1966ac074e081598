//! The browsing provider.
//!
//! [`ObjectBrowser`] owns the store handle, the configured key prefix, and
//! the per-request store deadline. Listing lives in `ops::list` and presigned
//! access in `ops::access`, each as an `impl ObjectBrowser` block.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::StoreError;
use crate::store::ObjectStore;

/// Browses one bucket/prefix of an object store.
///
/// All fields are immutable after construction, so a single instance is
/// shared across request tasks behind an `Arc`.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use narratorfiles_core::ObjectBrowser;
/// use narratorfiles_core::config::StoreConfig;
/// use narratorfiles_core::store::S3Store;
///
/// let config = StoreConfig::from_env().expect("store config");
/// let store = S3Store::new(&config);
/// let browser = ObjectBrowser::new(store, &config.key_prefix, Duration::from_secs(30));
/// assert_eq!(browser.effective_prefix(""), browser.key_prefix());
/// ```
#[derive(Debug)]
pub struct ObjectBrowser<S: ObjectStore> {
    /// Store client.
    pub(crate) store: Arc<S>,
    /// Configured key prefix, normalized to end in `/` unless empty.
    pub(crate) key_prefix: String,
    /// Deadline shared by all store calls of one operation.
    pub(crate) store_timeout: Duration,
}

impl<S: ObjectStore> ObjectBrowser<S> {
    /// Create a browser over `store`, confined to `key_prefix`.
    #[must_use]
    pub fn new(store: S, key_prefix: &str, store_timeout: Duration) -> Self {
        Self::from_shared(Arc::new(store), key_prefix, store_timeout)
    }

    /// Create a browser from an already shared store.
    #[must_use]
    pub fn from_shared(store: Arc<S>, key_prefix: &str, store_timeout: Duration) -> Self {
        Self {
            store,
            key_prefix: normalize_prefix(key_prefix),
            store_timeout,
        }
    }

    /// The normalized key prefix.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// The store deadline applied per operation.
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    /// Build the effective prefix for a navigated sub-path.
    ///
    /// The result is the key prefix plus `sub_path` (leading `/` removed),
    /// with a `/` appended unless it is empty or already ends in one.
    #[must_use]
    pub fn effective_prefix(&self, sub_path: &str) -> String {
        let mut prefix = format!("{}{}", self.key_prefix, sub_path.trim_start_matches('/'));
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        prefix
    }

    /// The full store key for a key relative to the configured prefix.
    #[must_use]
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    /// Start the deadline for one operation.
    pub(crate) fn deadline(&self) -> Instant {
        Instant::now() + self.store_timeout
    }

    /// Run one store call, failing with [`StoreError::Timeout`] past `deadline`.
    pub(crate) async fn bounded<T, F>(&self, deadline: Instant, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout_at(deadline, call)
            .await
            .map_err(|_| StoreError::Timeout(self.store_timeout))?
    }
}

/// Append `/` to a non-empty prefix that lacks it.
fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_owned()
    } else {
        format!("{prefix}/")
    }
}
