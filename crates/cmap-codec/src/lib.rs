//! Concept Map Codec
//!
//! The ingestion boundary between raw JSON text and the validated
//! `ConceptGraph`.
//!
//! # Architecture
//!
//! ```text
//! raw text → json::require_valid_json → codec::decode → ConceptGraph
//!                                                          ↓
//!                         JSON text ← codec::encode ←──────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! let text = r#"{"metadata":{"version":"1.0","description":""},
//!               "nodes":[{"id":"a","name":"A"}],"links":[]}"#;
//! let graph = cmap_codec::decode(text).unwrap();
//! assert_eq!(graph.node_count(), 1);
//! assert!(cmap_codec::is_syntactically_valid_json(&cmap_codec::encode(&graph).unwrap()));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod codec;
pub mod error;
pub mod json;

// Re-exports for convenience
pub use codec::{decode, encode, encode_pretty};
pub use error::{CodecError, CodecResult};
pub use json::{has_fields, is_syntactically_valid_json, require_valid_json};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
