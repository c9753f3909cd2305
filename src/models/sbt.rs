//! Multi-module build graph for sbt projects
//!
//! Module identifiers are not package identifiers, so inter-module edges get
//! their own model instead of reusing [`DepGraph`](super::dep_graph::DepGraph).
//! Validation here is a pre-condition check before the module graph is
//! flattened the way a dependency tree is.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inter-module edges of a multi-module sbt build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SbtModulesGraph {
    /// Module identifier to its representation string, e.g. packaging kind
    pub modules: BTreeMap<String, String>,

    /// Module identifier to the ordered modules it depends on
    pub dependencies: BTreeMap<String, Vec<String>>,
}

impl SbtModulesGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a module
    pub fn insert_module(
        &mut self,
        id: impl Into<String>,
        representation: impl Into<String>,
    ) -> &mut Self {
        self.modules.insert(id.into(), representation.into());
        self
    }

    /// Record the dependency list of a module
    pub fn insert_dependencies(
        &mut self,
        id: impl Into<String>,
        deps: Vec<String>,
    ) -> &mut Self {
        self.dependencies.insert(id.into(), deps);
        self
    }

    /// Check that every dependency identifier resolves to a declared module
    ///
    /// The first dangling reference fails the whole graph; dependency lists
    /// are ordered, so the error is deterministic for a given input.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (dependent, deps) in &self.dependencies {
            for module in deps {
                if !self.modules.contains_key(module) {
                    return Err(ValidationError::dangling_module(module, dependent));
                }
            }
        }
        Ok(())
    }
}
