//! Node-addressed dependency graph
//!
//! Flattened counterpart of [`DepTree`](crate::models::dep_tree::DepTree):
//! every distinct (name, version) pair is one node, so shared subtrees
//! collapse and producers other than the normalizer may introduce cycles.
//! Storage is a petgraph `DiGraph`, which keeps node identity as plain
//! integer indices instead of pointer-linked nodes.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::fmt;
use std::collections::HashMap;

/// Node identity in a dependency graph: one resolved package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PkgInfo {
    pub name: String,
    pub version: String,
}

impl PkgInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PkgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A dependency closure with shared nodes, rooted at the scanned package
#[derive(Debug, Clone)]
pub struct DepGraph {
    graph: DiGraph<PkgInfo, ()>,
    root: NodeIndex,
    index: HashMap<PkgInfo, NodeIndex>,
}

impl DepGraph {
    /// Create a graph containing only the root package
    pub fn new(root_pkg: PkgInfo) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root_pkg.clone());
        let mut index = HashMap::new();
        index.insert(root_pkg, root);
        Self { graph, root, index }
    }

    /// Add a package node, reusing the existing node for a known
    /// (name, version) pair
    pub fn add_pkg(&mut self, pkg: PkgInfo) -> NodeIndex {
        if let Some(&idx) = self.index.get(&pkg) {
            return idx;
        }
        let idx = self.graph.add_node(pkg.clone());
        self.index.insert(pkg, idx);
        idx
    }

    /// Add a dependency edge; a duplicate edge collapses into the existing
    /// one. Returns true when a new edge was inserted.
    pub fn add_dep(&mut self, parent: NodeIndex, child: NodeIndex) -> bool {
        if self.graph.find_edge(parent, child).is_some() {
            return false;
        }
        self.graph.add_edge(parent, child, ());
        true
    }

    /// Handle of the root package node
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// The root package itself
    pub fn root_pkg(&self) -> &PkgInfo {
        &self.graph[self.root]
    }

    /// Package stored at a node handle
    pub fn pkg(&self, idx: NodeIndex) -> Option<&PkgInfo> {
        self.graph.node_weight(idx)
    }

    /// Look up the node handle for a (name, version) pair
    pub fn lookup(&self, name: &str, version: &str) -> Option<NodeIndex> {
        self.index
            .get(&PkgInfo::new(name, version))
            .copied()
    }

    /// Check whether a (name, version) pair is present
    pub fn contains(&self, name: &str, version: &str) -> bool {
        self.lookup(name, version).is_some()
    }

    /// Check whether a direct dependency edge exists
    pub fn has_dep(&self, parent: NodeIndex, child: NodeIndex) -> bool {
        self.graph.find_edge(parent, child).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct dependencies of a node
    pub fn direct_deps_of(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Nodes that directly depend on the given node
    pub fn dependents_of(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    /// All packages in the graph, in node allocation order
    pub fn pkgs(&self) -> impl Iterator<Item = &PkgInfo> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// All dependency edges as (parent, child) handles
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_has_only_root() {
        let graph = DepGraph::new(PkgInfo::new("app", "1.0.0"));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.root_pkg(), &PkgInfo::new("app", "1.0.0"));
    }

    #[test]
    fn test_add_pkg_dedupes_same_identity() {
        let mut graph = DepGraph::new(PkgInfo::new("app", "1.0.0"));
        let a = graph.add_pkg(PkgInfo::new("lodash", "4.17.0"));
        let b = graph.add_pkg(PkgInfo::new("lodash", "4.17.0"));
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_add_pkg_keeps_versions_distinct() {
        let mut graph = DepGraph::new(PkgInfo::new("app", "1.0.0"));
        let a = graph.add_pkg(PkgInfo::new("lodash", "4.17.0"));
        let b = graph.add_pkg(PkgInfo::new("lodash", "4.17.21"));
        assert_ne!(a, b);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_add_dep_collapses_duplicates() {
        let mut graph = DepGraph::new(PkgInfo::new("app", "1.0.0"));
        let root = graph.root();
        let dep = graph.add_pkg(PkgInfo::new("lodash", "4.17.0"));

        assert!(graph.add_dep(root, dep));
        assert!(!graph.add_dep(root, dep));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_cycles_are_representable() {
        // The normalizer never produces one, but other producers may
        let mut graph = DepGraph::new(PkgInfo::new("a", "1.0"));
        let a = graph.root();
        let b = graph.add_pkg(PkgInfo::new("b", "1.0"));
        assert!(graph.add_dep(a, b));
        assert!(graph.add_dep(b, a));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_neighbor_queries() {
        let mut graph = DepGraph::new(PkgInfo::new("app", "1.0.0"));
        let root = graph.root();
        let express = graph.add_pkg(PkgInfo::new("express", "4.18.2"));
        let lodash = graph.add_pkg(PkgInfo::new("lodash", "4.17.0"));
        graph.add_dep(root, express);
        graph.add_dep(root, lodash);
        graph.add_dep(express, lodash);

        assert_eq!(graph.direct_deps_of(root).count(), 2);
        assert_eq!(graph.dependents_of(lodash).count(), 2);
        assert!(graph.has_dep(express, lodash));
        assert!(!graph.has_dep(lodash, express));
    }

    #[test]
    fn test_lookup_and_display() {
        let graph = DepGraph::new(PkgInfo::new("app", "1.0.0"));
        assert!(graph.contains("app", "1.0.0"));
        assert!(!graph.contains("app", "2.0.0"));
        assert_eq!(format!("{}", graph.root_pkg()), "app@1.0.0");
    }
}
