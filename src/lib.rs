//! depmodel - Dependency representation model for package analysis plugins
//!
//! This library defines the shapes ecosystem plugins hand to a dependency
//! analysis pipeline - the recursive [`DepTree`](models::DepTree), the
//! node-addressed [`DepGraph`](models::DepGraph), and the
//! [`PluginResult`](models::PluginResult) envelope - plus the normalization
//! that flattens trees into graphs so downstream consumers traverse one
//! uniform representation.
//!
//! All operations are pure, synchronous computations over immutable inputs;
//! independent conversions are safe to run in parallel from the caller's
//! side.

pub mod error;
pub mod models;
pub mod normalize;

// Re-export commonly used types
pub use error::{ErrorSeverity, ModelError, Result, SchemaError, ValidationError};
pub use models::{
    dep_graph::{DepGraph, PkgInfo},
    dep_tree::{DepDict, DepRoot, DepTree, ScanMeta},
    plugin::{PluginMetadata, PluginResult, ScanPayload},
    sbt::SbtModulesGraph,
};
pub use normalize::{normalize_graph, normalize_payload, normalize_root, normalize_tree};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
