//! Where the served concept map comes from, and how its failures surface
//!
//! Every load goes through the codec: the document is decoded into a
//! validated `ConceptGraph` and re-encoded, so clients only ever see
//! documents that satisfy the model's invariants.

use crate::config::ServiceConfig;
use cmap_codec::CodecError;
use cmap_model::ConceptGraph;
use cmap_remote::{
    HttpContentSource, RemoteError, RemoteFetchCache, RemoteLocation, RemoteResult,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Failure classes visible outside the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The document does not exist
    NotFound,
    /// The document exists but could not be read or is invalid
    ReadFailure,
}

/// Errors producing the current document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No file at the configured path
    #[error("concept map not found at {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// File exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Document failed to decode or encode
    #[error("invalid concept map: {0}")]
    Malformed(#[from] CodecError),

    /// Remote fetch failed
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SourceError {
    fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Externally visible failure class
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Io { .. } | Self::Malformed(_) | Self::Remote(_) => FailureKind::ReadFailure,
        }
    }
}

/// Origin of the served document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// JSON file on local disk
    File(PathBuf),
    /// File in a remote repository, fetched through the cache
    Remote {
        /// Owner, repository and path of the file
        location: RemoteLocation,
    },
}

#[derive(Debug, Clone)]
enum Backend {
    File(PathBuf),
    Remote {
        location: RemoteLocation,
        cache: RemoteFetchCache,
    },
}

/// Produces the current concept map as validated JSON text
#[derive(Debug, Clone)]
pub struct ConceptMapService {
    backend: Backend,
}

impl ConceptMapService {
    /// Serve a local file
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(path.into()),
        }
    }

    /// Serve a remote file through `cache`
    #[must_use]
    pub fn from_remote(location: RemoteLocation, cache: RemoteFetchCache) -> Self {
        Self {
            backend: Backend::Remote { location, cache },
        }
    }

    /// Build from configuration: remote when configured, otherwise the data file
    ///
    /// # Errors
    /// `RemoteError::Transport` if the HTTP client cannot be built
    pub fn from_config(config: &ServiceConfig) -> RemoteResult<Self> {
        match &config.remote {
            Some(location) => {
                let source = HttpContentSource::new()?;
                let cache = RemoteFetchCache::with_ttl(Arc::new(source), config.cache_ttl());
                Ok(Self::from_remote(location.clone(), cache))
            }
            None => Ok(Self::from_file(&config.data_path)),
        }
    }

    /// Configured origin
    #[must_use]
    pub fn source(&self) -> GraphSource {
        match &self.backend {
            Backend::File(path) => GraphSource::File(path.clone()),
            Backend::Remote { location, .. } => GraphSource::Remote {
                location: location.clone(),
            },
        }
    }

    /// Remote cache, when serving a remote file
    #[inline]
    #[must_use]
    pub fn remote_cache(&self) -> Option<&RemoteFetchCache> {
        match &self.backend {
            Backend::File(_) => None,
            Backend::Remote { cache, .. } => Some(cache),
        }
    }

    async fn load_text(&self) -> Result<String, SourceError> {
        match &self.backend {
            Backend::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SourceError::from_io(path.clone(), e)),
            Backend::Remote { location, cache } => Ok(cache.fetch_location(location).await?),
        }
    }

    /// Load and validate the current graph
    ///
    /// # Errors
    /// `SourceError` classifying the failure; see [`SourceError::kind`]
    pub async fn current_graph(&self) -> Result<ConceptGraph, SourceError> {
        let text = self.load_text().await?;
        Ok(cmap_codec::decode(&text)?)
    }

    /// Current graph as compact JSON text
    ///
    /// # Errors
    /// `SourceError` classifying the failure; see [`SourceError::kind`]
    pub async fn current_json(&self) -> Result<String, SourceError> {
        let graph = self.current_graph().await?;
        let json = cmap_codec::encode(&graph)?;
        tracing::debug!(
            nodes = graph.node_count(),
            links = graph.link_count(),
            "concept map loaded"
        );
        Ok(json)
    }

    /// Whether `text` is syntactically valid JSON
    #[inline]
    #[must_use]
    pub fn is_valid_json(text: &str) -> bool {
        cmap_codec::is_syntactically_valid_json(text)
    }
}
