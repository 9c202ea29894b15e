//! Concept Map Service
//!
//! Serves a validated concept map over HTTP. The document comes from a local
//! file or, through the remote fetch cache, from a file in a GitHub
//! repository; either way it passes through the codec before it is served.
//!
//! # Architecture
//!
//! ```text
//! GET /api/concept-map → routes → ConceptMapService → GraphSource
//!                                        │                ├─ File   (tokio::fs)
//!                                        │                └─ Remote (RemoteFetchCache)
//!                                        └─ decode → ConceptGraph → encode
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod routes;
pub mod source;

// Re-exports for convenience
pub use config::{ConfigError, ServiceConfig};
pub use source::{ConceptMapService, FailureKind, GraphSource, SourceError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
