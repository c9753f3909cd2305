//! Plugin result envelope
//!
//! Every ecosystem plugin hands its extraction back wrapped in a
//! [`PluginResult`]: metadata identifying the plugin and its runtime, plus the
//! package representation it produced. The representation is a tagged variant
//! so consumers must branch on tree-shaped vs graph-shaped data before
//! traversal instead of probing fields at runtime.

use crate::error::SchemaError;
use crate::models::dep_graph::DepGraph;
use crate::models::dep_tree::DepTree;
use serde::{Deserialize, Serialize};

/// Identity of the plugin that produced a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin identifier, unique within a plugin registry
    pub name: String,

    /// Version of the environment the plugin executed under,
    /// e.g. an interpreter or toolchain version
    pub runtime: String,
}

impl PluginMetadata {
    pub fn new(name: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runtime: runtime.into(),
        }
    }
}

/// The package representation carried by a plugin result
///
/// Trees come from plugins that still emit the recursive model; graph-capable
/// plugins emit one graph per build target.
#[derive(Debug, Clone)]
pub enum ScanPayload {
    Tree(DepTree),
    Graphs(Vec<DepGraph>),
}

impl ScanPayload {
    pub fn is_tree(&self) -> bool {
        matches!(self, ScanPayload::Tree(_))
    }

    pub fn is_graphs(&self) -> bool {
        matches!(self, ScanPayload::Graphs(_))
    }
}

/// A validated plugin result: metadata plus package representation
#[derive(Debug, Clone)]
pub struct PluginResult {
    pub plugin: PluginMetadata,
    pub package: ScanPayload,
}

impl PluginResult {
    /// Validate and wrap a plugin's raw output
    ///
    /// Rejects empty metadata fields and an empty graph sequence: a plugin
    /// must report at least one representation, or signal "no dependencies
    /// found" as a leaf tree, never as an empty collection.
    pub fn assemble(plugin: PluginMetadata, package: ScanPayload) -> Result<Self, SchemaError> {
        if plugin.name.is_empty() {
            return Err(SchemaError::EmptyMetadataField { field: "name" });
        }
        if plugin.runtime.is_empty() {
            return Err(SchemaError::EmptyMetadataField { field: "runtime" });
        }
        if let ScanPayload::Graphs(graphs) = &package {
            if graphs.is_empty() {
                return Err(SchemaError::NoRepresentations);
            }
        }
        Ok(Self { plugin, package })
    }

    /// Assemble a result around a single dependency tree
    pub fn from_tree(plugin: PluginMetadata, tree: DepTree) -> Result<Self, SchemaError> {
        Self::assemble(plugin, ScanPayload::Tree(tree))
    }

    /// Assemble a result around one or more dependency graphs
    pub fn from_graphs(plugin: PluginMetadata, graphs: Vec<DepGraph>) -> Result<Self, SchemaError> {
        Self::assemble(plugin, ScanPayload::Graphs(graphs))
    }
}
