//! Error types for remote fetches

use cmap_model::ModelError;

/// Errors from the remote fetch path
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Owner, repository or path was blank
    #[error(transparent)]
    InvalidArgument(#[from] ModelError),

    /// Remote answered with a non-success status
    #[error("remote request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body as received
        body: String,
    },

    /// Connection or I/O failure
    #[error("failed to fetch remote content: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request did not complete within its timeout
    #[error("remote request timed out: {0}")]
    TimedOut(#[source] reqwest::Error),

    /// Response body lacked usable content
    #[error("failed to parse remote response: {0}")]
    MalformedResponse(String),
}

impl RemoteError {
    /// Classify a `reqwest` error, keeping timeouts distinct
    #[must_use]
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::TimedOut(error)
        } else {
            Self::Transport(error)
        }
    }

    /// Whether this error came from the network path rather than from
    /// argument validation
    #[inline]
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, Self::InvalidArgument(_))
    }

    /// HTTP status for `Status` errors
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;
