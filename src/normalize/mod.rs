//! Tree-to-graph normalization
//!
//! Downstream consumers (vulnerability scanners, license checkers, SBOM
//! generators) operate on [`DepGraph`] regardless of what shape a plugin
//! emitted. This module flattens a [`DepTree`] into an equivalent graph:
//! repeated (name, version) occurrences collapse into one node, every
//! parent-child edge in the tree maps to exactly one graph edge, and the same
//! name at two different versions stays two distinct nodes.
//!
//! Validation happens during the traversal itself: an empty package name or a
//! dependency key that disagrees with its subtree's own name aborts the
//! conversion instead of producing a silently-wrong graph.

use crate::error::ValidationError;
use crate::models::dep_graph::{DepGraph, PkgInfo};
use crate::models::dep_tree::{DepRoot, DepTree};
use crate::models::plugin::ScanPayload;
use petgraph::graph::NodeIndex;

/// Convert a dependency tree into its node-addressed graph form
///
/// The traversal is depth-first; the first visit of a distinct
/// (name, version) pair allocates its node, later visits reuse it. The
/// output is acyclic by construction since the input has no back-references,
/// and its root is the tree root's node.
pub fn normalize_tree(tree: &DepTree) -> Result<DepGraph, ValidationError> {
    if tree.name.is_empty() {
        return Err(ValidationError::empty_name("<root>"));
    }

    let mut graph = DepGraph::new(PkgInfo::new(&tree.name, &tree.version));
    let root = graph.root();
    let mut path = vec![tree.name.as_str()];
    visit_children(tree, root, &mut graph, &mut path)?;
    Ok(graph)
}

/// Normalize the tree wrapped by a [`DepRoot`]
pub fn normalize_root(root: &DepRoot) -> Result<DepGraph, ValidationError> {
    normalize_tree(&root.dep_tree)
}

/// Identity pass over an already-supplied graph
///
/// Re-checks the node-name invariant and hands back an equivalent graph with
/// identical node and edge counts, so normalizing twice is indistinguishable
/// from normalizing once.
pub fn normalize_graph(graph: &DepGraph) -> Result<DepGraph, ValidationError> {
    for pkg in graph.pkgs() {
        if pkg.name.is_empty() {
            return Err(ValidationError::empty_name(format!(
                "graph node @{}",
                pkg.version
            )));
        }
    }
    Ok(graph.clone())
}

/// Normalize whichever representation a plugin emitted
///
/// A tree payload yields exactly one graph. A graph payload is validated
/// graph by graph; each graph in the sequence is independent, so no
/// deduplication happens across them.
pub fn normalize_payload(payload: &ScanPayload) -> Result<Vec<DepGraph>, ValidationError> {
    match payload {
        ScanPayload::Tree(tree) => Ok(vec![normalize_tree(tree)?]),
        ScanPayload::Graphs(graphs) => graphs.iter().map(normalize_graph).collect(),
    }
}

/// Walk one node's dependencies, adding nodes and edges for each child
fn visit_children<'a>(
    tree: &'a DepTree,
    parent: NodeIndex,
    graph: &mut DepGraph,
    path: &mut Vec<&'a str>,
) -> Result<(), ValidationError> {
    for (key, child) in &tree.dependencies {
        if child.name.is_empty() {
            let mut child_path = path.clone();
            child_path.push(key.as_str());
            return Err(ValidationError::empty_name(child_path.join(" > ")));
        }
        if *key != child.name {
            return Err(ValidationError::key_mismatch(
                key.as_str(),
                child.name.as_str(),
                path.join(" > "),
            ));
        }

        let node = graph.add_pkg(PkgInfo::new(&child.name, &child.version));
        graph.add_dep(parent, node);

        // The same identity can carry different subtrees on different paths
        // (independent resolutions), so children are walked on every visit.
        path.push(child.name.as_str());
        visit_children(child, node, graph, path)?;
        path.pop();
    }
    Ok(())
}
