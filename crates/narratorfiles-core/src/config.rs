//! Configuration loaded from environment variables.
//!
//! [`StoreConfig`] describes the object store to browse and is required:
//! loading fails fast when a connection variable or the bucket is missing.
//! [`ServerConfig`] carries process settings that all have defaults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::ConfigError;

/// Connection and namespace settings for the object store.
///
/// The `Debug` implementation redacts the secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store API endpoint URL.
    pub endpoint: String,
    /// Store region.
    pub region: String,
    /// Access key ID.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
    /// Bucket to browse.
    pub bucket: String,
    /// Key prefix confining the browsable namespace; may be empty.
    pub key_prefix: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"...")
            .field("bucket", &self.bucket)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

impl StoreConfig {
    /// Load the store configuration from the process environment.
    ///
    /// | Variable | Required |
    /// |----------|----------|
    /// | `STORE_ACCESS_KEY_ID` | yes |
    /// | `STORE_SECRET_ACCESS_KEY` | yes |
    /// | `STORE_ENDPOINT` | yes |
    /// | `STORE_REGION` | yes |
    /// | `STORE_BUCKET` | yes |
    /// | `STORE_PREFIX` | no (defaults to `""`) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the store configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as missing for every required variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use narratorfiles_core::config::StoreConfig;
    /// use narratorfiles_core::error::ConfigError;
    ///
    /// let err = StoreConfig::from_lookup(|_| None).unwrap_err();
    /// assert_eq!(err, ConfigError::MissingConnection);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let (Some(access_key), Some(secret_key), Some(endpoint), Some(region)) = (
            required("STORE_ACCESS_KEY_ID"),
            required("STORE_SECRET_ACCESS_KEY"),
            required("STORE_ENDPOINT"),
            required("STORE_REGION"),
        ) else {
            return Err(ConfigError::MissingConnection);
        };

        let bucket = required("STORE_BUCKET").ok_or(ConfigError::MissingBucket)?;
        let key_prefix = lookup("STORE_PREFIX").unwrap_or_default();

        Ok(Self {
            endpoint,
            region,
            access_key,
            secret_key,
            bucket,
            key_prefix,
        })
    }
}

/// Process-level settings for the browser server.
///
/// # Examples
///
/// ```
/// use narratorfiles_core::config::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8082");
/// assert_eq!(config.store_timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Bind address (e.g. `"0.0.0.0:8082"`).
    #[builder(default = String::from("0.0.0.0:8082"))]
    pub gateway_listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Deadline in seconds shared by all store calls of one request.
    #[builder(default = 30)]
    pub store_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8082"),
            log_level: String::from("info"),
            store_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Load server settings from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8082` |
    /// | `LOG_LEVEL` | `info` |
    /// | `STORE_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load server settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("STORE_TIMEOUT_SECS") {
            config.store_timeout_secs = match v.parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "STORE_TIMEOUT_SECS",
                        value: v,
                    });
                }
            };
        }

        Ok(config)
    }

    /// The store deadline as a [`Duration`].
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}
