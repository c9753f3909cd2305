//! Data models for plugin dependency representations

pub mod dep_graph;
pub mod dep_tree;
pub mod plugin;
pub mod sbt;

pub use dep_graph::{DepGraph, PkgInfo};
pub use dep_tree::{DepDict, DepRoot, DepTree, ScanMeta};
pub use plugin::{PluginMetadata, PluginResult, ScanPayload};
pub use sbt::SbtModulesGraph;
