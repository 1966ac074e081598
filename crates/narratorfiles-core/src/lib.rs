//! Object listing, classification, and presigned access for narratorfiles.
//!
//! This crate holds everything the browser does apart from HTTP: loading the
//! store configuration, talking to the object store, grouping keys into
//! synthetic directories, and producing presigned URLs.
//!
//! # Architecture
//!
//! ```text
//! ObjectBrowser (prefix handling, deadlines)
//!   |-- ops::list    -> Vec<ListingEntry>
//!   |-- ops::access  -> PresignedAccess / PlaybackView
//!        |
//!        v
//! ObjectStore trait
//!        |
//!        v
//! S3Store (aws-sdk-s3, path-style)
//! ```

pub mod config;
pub mod error;
pub mod object_type;
pub mod ops;
pub mod provider;
pub mod store;

pub use config::{ServerConfig, StoreConfig};
pub use error::{BrowseError, BrowseResult, ConfigError, StoreError};
pub use object_type::ObjectType;
pub use ops::access::{PRESIGN_EXPIRY, PlaybackView, PresignedAccess};
pub use ops::list::{DELIMITER, ListingEntry};
pub use provider::ObjectBrowser;
pub use store::{ListPage, ObjectStore, S3Store};
