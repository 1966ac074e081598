//! Presigned access: download redirects and audio playback views.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BrowseError, BrowseResult};
use crate::object_type::{audio_mime_type, extension_of};
use crate::provider::ObjectBrowser;
use crate::store::ObjectStore;

/// Validity window of every presigned URL this service hands out.
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// A presigned, time-limited URL for one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedAccess {
    /// The presigned GET URL.
    pub url: String,
    /// How long the URL stays valid after generation.
    pub expires_in: Duration,
}

/// Everything the playback page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackView {
    /// Presigned URL used as the audio source.
    pub url: String,
    /// Key as requested, relative to the configured prefix.
    pub key: String,
    /// Audio MIME type for the `<source type>` attribute.
    pub mime_type: &'static str,
}

impl<S: ObjectStore> ObjectBrowser<S> {
    /// Presign a download of `key` (relative to the configured prefix).
    ///
    /// No existence check is made: a missing key yields a URL that fails
    /// only when dereferenced.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use narratorfiles_core::{ObjectBrowser, PRESIGN_EXPIRY, S3Store, StoreConfig};
    ///
    /// # tokio_test::block_on(async {
    /// let config = StoreConfig::from_lookup(|name| {
    ///     let value = match name {
    ///         "STORE_ENDPOINT" => "http://localhost:9000",
    ///         "STORE_REGION" => "us-east-1",
    ///         "STORE_BUCKET" => "audiobooks",
    ///         "STORE_PREFIX" => "library",
    ///         _ => "example",
    ///     };
    ///     Some(value.to_owned())
    /// })
    /// .expect("config");
    ///
    /// let browser = ObjectBrowser::new(S3Store::new(&config), &config.key_prefix, Duration::from_secs(5));
    /// let access = browser.download_url("dune/01.mp3").await.expect("presign");
    /// assert!(access.url.starts_with("http://localhost:9000/audiobooks/library/dune/01.mp3?"));
    /// assert_eq!(access.expires_in, PRESIGN_EXPIRY);
    /// # });
    /// ```
    pub async fn download_url(&self, key: &str) -> BrowseResult<PresignedAccess> {
        let full_key = self.full_key(key);
        let deadline = self.deadline();

        let url = self
            .bounded(deadline, self.store.presign_get(&full_key, PRESIGN_EXPIRY))
            .await
            .map_err(|source| {
                warn!(key = %full_key, error = %source, "presign failed");
                BrowseError::Access {
                    key: full_key.clone(),
                    source,
                }
            })?;

        debug!(key = %full_key, expires_in = ?PRESIGN_EXPIRY, "presigned download");

        Ok(PresignedAccess {
            url,
            expires_in: PRESIGN_EXPIRY,
        })
    }

    /// Build the playback view for an audio `key`.
    ///
    /// Keys without a recognized audio extension fail with
    /// [`BrowseError::UnsupportedMedia`] before anything is presigned.
    pub async fn playback_view(&self, key: &str) -> BrowseResult<PlaybackView> {
        let Some(mime_type) = audio_mime_type(extension_of(key)) else {
            return Err(BrowseError::UnsupportedMedia {
                key: key.to_owned(),
            });
        };

        let access = self.download_url(key).await?;

        Ok(PlaybackView {
            url: access.url,
            key: key.to_owned(),
            mime_type,
        })
    }
}
