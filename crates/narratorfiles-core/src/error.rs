//! Error types for configuration, store access, and browsing.
//!
//! [`ConfigError`] is fatal at startup. [`StoreError`] is what an
//! [`ObjectStore`](crate::store::ObjectStore) call yields, and [`BrowseError`]
//! is what the browsing operations return to the HTTP layer, which maps each
//! variant to a status code.

use std::time::Duration;

/// Missing or invalid configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One or more of the store connection variables is absent or empty.
    #[error(
        "missing required environment variables: STORE_ACCESS_KEY_ID, STORE_SECRET_ACCESS_KEY, STORE_ENDPOINT, or STORE_REGION"
    )]
    MissingConnection,

    /// The bucket variable is absent or empty.
    #[error("missing required environment variable: STORE_BUCKET")]
    MissingBucket,

    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// Failure of a single object-store call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store client reported an error (transport, auth, or service).
    #[error("{0}")]
    Sdk(String),

    /// The request-scoped deadline elapsed before the store answered.
    #[error("store request timed out after {0:?}")]
    Timeout(Duration),
}

/// Error produced by a browsing operation.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    /// A listing page could not be fetched. No partial listing is returned.
    #[error("failed to list objects under {prefix:?}: {source}")]
    List {
        /// The effective prefix being listed.
        prefix: String,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// A presigned URL could not be generated.
    #[error("failed to presign {key:?}: {source}")]
    Access {
        /// The full store key.
        key: String,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// The key's extension is not a recognized audio type.
    #[error("File not supported")]
    UnsupportedMedia {
        /// The key that was requested for playback.
        key: String,
    },
}

/// Convenience result type for browsing operations.
pub type BrowseResult<T> = Result<T, BrowseError>;
