//! Remote concept map documents
//!
//! Fetches a file from a GitHub-style contents API and keeps the decoded
//! body in a TTL cache, with hit/miss counters for observability.
//!
//! ```text
//! fetch(owner, repo, path) → cache hit? → content
//!                               ↓ miss
//!                 ContentSource::fetch_raw → extract_content → insert
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod client;
pub mod error;
pub mod location;

// Re-exports for convenience
pub use cache::{CacheStats, RemoteFetchCache, DEFAULT_TTL};
pub use client::{
    build_contents_url, decode_base64_content, ContentSource, HttpContentSource, GITHUB_API_BASE,
};
pub use error::{RemoteError, RemoteResult};
pub use location::RemoteLocation;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
