//! Recursive dependency tree produced by ecosystem plugins
//!
//! A `DepTree` is the name-addressed representation a plugin builds bottom-up
//! while walking a manifest: one package, its resolved version, and a mapping
//! from dependency name to the nested subtree for that dependency. The same
//! package name may recur at different paths with independent resolutions;
//! deduplication only happens when the tree is flattened into a `DepGraph`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Mapping from dependency name to its resolved subtree
pub type DepDict = BTreeMap<String, DepTree>;

/// One package and its direct dependencies
///
/// Field names serialize in the camelCase form emitted by plugins
/// (`packageFormatVersion`, `multiBuild`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepTree {
    /// Package identifier within its ecosystem, never empty in a valid tree
    pub name: String,

    /// Ecosystem-specific version identifier, not assumed to be semver
    pub version: String,

    /// Direct dependencies keyed by name; empty for a leaf package
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: DepDict,

    /// Schema revision the tree was produced under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_format_version: Option<String>,

    /// Set when the subtree spans multiple build configurations; consumers
    /// must not assume a single consistent version per name across the tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_build: Option<bool>,
}

impl DepTree {
    /// Create a leaf tree for a single package
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: BTreeMap::new(),
            package_format_version: None,
            multi_build: None,
        }
    }

    /// Attach a direct dependency, keyed by the child's own name
    ///
    /// Keying by the child's name keeps the key/name invariant true by
    /// construction. A dependency with the same name replaces the previous
    /// entry, matching the keys-unique invariant.
    pub fn insert_dependency(&mut self, child: DepTree) -> &mut Self {
        self.dependencies.insert(child.name.clone(), child);
        self
    }

    /// Builder-style variant of [`insert_dependency`](Self::insert_dependency)
    pub fn with_dependency(mut self, child: DepTree) -> Self {
        self.insert_dependency(child);
        self
    }

    /// Set the schema revision tag
    pub fn with_package_format_version(mut self, version: impl Into<String>) -> Self {
        self.package_format_version = Some(version.into());
        self
    }

    /// Flag the tree as spanning multiple build configurations
    pub fn with_multi_build(mut self, multi_build: bool) -> Self {
        self.multi_build = Some(multi_build);
        self
    }

    /// Check whether this package has no dependencies
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Count all nodes in the tree, including repeated occurrences
    pub fn node_count(&self) -> usize {
        1 + self
            .dependencies
            .values()
            .map(DepTree::node_count)
            .sum::<usize>()
    }

    /// Count distinct (name, version) pairs reachable in the tree
    ///
    /// This is the number of nodes the normalized graph will contain.
    pub fn distinct_packages(&self) -> usize {
        let mut seen = BTreeSet::new();
        self.collect_packages(&mut seen);
        seen.len()
    }

    fn collect_packages<'a>(&'a self, seen: &mut BTreeSet<(&'a str, &'a str)>) {
        seen.insert((self.name.as_str(), self.version.as_str()));
        for child in self.dependencies.values() {
            child.collect_packages(seen);
        }
    }
}

/// Structured scan annotations attached to a [`DepRoot`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMeta {
    /// Manifest file the tree was extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file: Option<PathBuf>,

    /// When the extraction ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,

    /// Free-form labels that do not warrant their own field yet
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ScanMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_file = Some(path.into());
        self
    }

    pub fn with_scanned_at(mut self, at: DateTime<Utc>) -> Self {
        self.scanned_at = Some(at);
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.target_file.is_none() && self.scanned_at.is_none() && self.labels.is_empty()
    }
}

/// A dependency tree for one analyzed manifest plus scan annotations
///
/// Created once per manifest and never mutated afterwards; newer pipelines
/// supersede it with a graph-based root instead of editing it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepRoot {
    pub dep_tree: DepTree,

    #[serde(default, skip_serializing_if = "ScanMeta::is_empty")]
    pub meta: ScanMeta,
}

impl DepRoot {
    /// Wrap a tree with no annotations
    pub fn new(dep_tree: DepTree) -> Self {
        Self {
            dep_tree,
            meta: ScanMeta::default(),
        }
    }

    /// Wrap a tree with scan annotations
    pub fn with_meta(dep_tree: DepTree, meta: ScanMeta) -> Self {
        Self { dep_tree, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DepTree {
        DepTree::new("app", "1.0.0")
            .with_dependency(
                DepTree::new("express", "4.18.2")
                    .with_dependency(DepTree::new("accepts", "1.3.8")),
            )
            .with_dependency(DepTree::new("lodash", "4.17.0"))
    }

    #[test]
    fn test_insert_dependency_keys_by_child_name() {
        let tree = sample_tree();
        assert_eq!(tree.dependencies["lodash"].name, "lodash");
        assert_eq!(tree.dependencies["express"].dependencies["accepts"].version, "1.3.8");
    }

    #[test]
    fn test_insert_dependency_replaces_same_name() {
        let mut tree = DepTree::new("app", "1.0.0");
        tree.insert_dependency(DepTree::new("lodash", "4.17.0"));
        tree.insert_dependency(DepTree::new("lodash", "4.17.21"));

        assert_eq!(tree.dependencies.len(), 1);
        assert_eq!(tree.dependencies["lodash"].version, "4.17.21");
    }

    #[test]
    fn test_is_leaf() {
        assert!(DepTree::new("lodash", "4.17.0").is_leaf());
        assert!(!sample_tree().is_leaf());
    }

    #[test]
    fn test_node_count_counts_occurrences() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 4);

        // The same package under two parents counts twice in the tree
        let shared = DepTree::new("app", "1.0.0")
            .with_dependency(
                DepTree::new("a", "1.0").with_dependency(DepTree::new("lodash", "4.17.0")),
            )
            .with_dependency(
                DepTree::new("b", "2.0").with_dependency(DepTree::new("lodash", "4.17.0")),
            );
        assert_eq!(shared.node_count(), 5);
        assert_eq!(shared.distinct_packages(), 4);
    }

    #[test]
    fn test_distinct_packages_keeps_versions_apart() {
        let tree = DepTree::new("app", "1.0.0")
            .with_dependency(
                DepTree::new("a", "1.0").with_dependency(DepTree::new("lodash", "4.17.0")),
            )
            .with_dependency(
                DepTree::new("b", "2.0").with_dependency(DepTree::new("lodash", "4.17.21")),
            );
        assert_eq!(tree.distinct_packages(), 5);
    }

    #[test]
    fn test_serde_camel_case_round_trip() {
        let tree = sample_tree()
            .with_package_format_version("npm:0.0.1")
            .with_multi_build(true);

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["packageFormatVersion"], "npm:0.0.1");
        assert_eq!(json["multiBuild"], true);
        assert!(json["dependencies"]["express"]["dependencies"]["accepts"].is_object());

        let back: DepTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_serde_leaf_omits_empty_dependencies() {
        let json = serde_json::to_value(DepTree::new("lodash", "4.17.0")).unwrap();
        assert!(json.get("dependencies").is_none());
        assert!(json.get("packageFormatVersion").is_none());

        // Missing map deserializes as a leaf
        let back: DepTree =
            serde_json::from_str(r#"{"name":"lodash","version":"4.17.0"}"#).unwrap();
        assert!(back.is_leaf());
    }

    #[test]
    fn test_dep_root_meta() {
        let meta = ScanMeta::new()
            .with_target_file("project/package.json")
            .with_label("packageManager", "npm");
        let root = DepRoot::with_meta(sample_tree(), meta);

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["depTree"]["name"], "app");
        assert_eq!(json["meta"]["targetFile"], "project/package.json");
        assert_eq!(json["meta"]["labels"]["packageManager"], "npm");
    }

    #[test]
    fn test_dep_root_without_meta_omits_field() {
        let json = serde_json::to_value(DepRoot::new(sample_tree())).unwrap();
        assert!(json.get("meta").is_none());
    }
}
