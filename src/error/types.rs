//! Error types and definitions for depmodel
//!
//! Two error families cover the model layer: structural violations of the
//! dependency representations (`ValidationError`) and malformed plugin result
//! envelopes (`SchemaError`). Both are detected at construction or
//! normalization time and returned immediately; nothing is retried and no
//! partially-valid structure is ever produced.

use std::fmt;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current plugin result fails but the overall scan can continue
    Error,
    /// Critical level - the scan should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Structural violation of a DepTree or SbtModulesGraph invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A tree node with an empty `name`
    #[error("empty package name at '{path}'")]
    EmptyName { path: String },

    /// A `dependencies` key that does not match the nested tree's own `name`
    #[error("dependency key '{key}' does not match nested package name '{name}' at '{path}'")]
    KeyMismatch {
        key: String,
        name: String,
        path: String,
    },

    /// A module id listed in `dependencies` with no entry in `modules`
    #[error("module '{module}' referenced by '{dependent}' is not declared in modules")]
    DanglingModule { module: String, dependent: String },
}

impl ValidationError {
    /// Create an empty-name error for the node at the given path
    pub fn empty_name(path: impl Into<String>) -> Self {
        ValidationError::EmptyName { path: path.into() }
    }

    /// Create a key/name mismatch error
    pub fn key_mismatch(
        key: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        ValidationError::KeyMismatch {
            key: key.into(),
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a dangling module reference error
    pub fn dangling_module(module: impl Into<String>, dependent: impl Into<String>) -> Self {
        ValidationError::DanglingModule {
            module: module.into(),
            dependent: dependent.into(),
        }
    }
}

/// Malformed PluginResult envelope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A required plugin metadata field was empty
    #[error("plugin metadata field '{field}' must not be empty")]
    EmptyMetadataField { field: &'static str },

    /// The plugin reported an empty sequence of dependency graphs
    #[error("plugin reported an empty sequence of dependency graphs")]
    NoRepresentations,
}

/// Main error type for depmodel operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Structural violation of a model invariant
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed plugin result envelope
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ModelError {
    /// Get the severity level of this error
    ///
    /// A validation failure invalidates one plugin result; the scan driver can
    /// skip it and carry on. A schema failure means the producing plugin
    /// itself violates the envelope contract.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ModelError::Validation(_) => ErrorSeverity::Error,
            ModelError::Schema(_) => ErrorSeverity::Critical,
        }
    }

    /// Check if this is a critical error that should terminate the scan
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Result type alias for depmodel operations
pub type Result<T> = std::result::Result<T, ModelError>;
