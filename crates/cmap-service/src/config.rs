//! Service configuration
//!
//! Loaded from a TOML file when one is given; every field has a default so a
//! file only needs the values it changes.
//!
//! ```toml
//! bind = "0.0.0.0:8080"
//! data_path = "maps/cscd211.json"
//! cache_ttl_secs = 60
//!
//! [remote]
//! owner = "ewu"
//! repository = "concept-maps"
//! path = "concept-map.json"
//! ```

use cmap_remote::RemoteLocation;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use warp::http::uri::{Authority, Scheme};

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default document location on disk
pub const DEFAULT_DATA_PATH: &str = "data/concept-map.json";

/// Front-end dev server origins allowed by default
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration TOML
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying TOML failure
        #[source]
        source: toml::de::Error,
    },

    /// TOML text is not valid configuration
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// CORS origin is not `scheme://host[:port]`
    #[error("invalid allowed origin '{origin}', expected scheme://host[:port]")]
    InvalidOrigin {
        /// Rejected entry
        origin: String,
    },
}

/// Whether `origin` has the `scheme://host[:port]` shape CORS matching uses
pub(crate) fn is_valid_origin(origin: &str) -> bool {
    let Some((scheme, authority)) = origin.split_once("://") else {
        return false;
    };
    !scheme.is_empty()
        && !authority.is_empty()
        && !authority.contains('/')
        && scheme.parse::<Scheme>().is_ok()
        && authority.parse::<Authority>().is_ok()
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Document served when no remote source is configured
    pub data_path: PathBuf,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// Serve a remote document instead of `data_path`
    pub remote: Option<RemoteLocation>,
    /// Freshness window for remote fetches, in seconds
    pub cache_ttl_secs: u64,
}

impl ServiceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// `ConfigError::Toml` for syntax errors, unknown keys or invalid values,
    /// `ConfigError::InvalidOrigin` for a malformed `allowed_origins` entry
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    ///
    /// # Errors
    /// `ConfigError::InvalidOrigin` for the first malformed origin
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.allowed_origins.iter().find(|o| !is_valid_origin(o)) {
            Some(origin) => Err(ConfigError::InvalidOrigin {
                origin: origin.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse`
    /// if it is not valid TOML configuration, `ConfigError::InvalidOrigin`
    /// for a malformed origin
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|e| match e {
            ConfigError::Toml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// With document path
    #[inline]
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// With CORS origins
    #[inline]
    #[must_use]
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// With remote document source
    #[inline]
    #[must_use]
    pub fn with_remote(mut self, location: RemoteLocation) -> Self {
        self.remote = Some(location);
        self
    }

    /// With remote cache TTL
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    /// Remote cache TTL
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|&o| o.to_owned()).collect(),
            remote: None,
            cache_ttl_secs: cmap_remote::DEFAULT_TTL.as_secs(),
        }
    }
}
