//! Error handling for the depmodel crate
//!
//! This module provides the error types for model validation and plugin
//! result assembly, a severity classification, and the crate-wide result
//! alias.

pub mod types;

pub use types::{ErrorSeverity, ModelError, Result, SchemaError, ValidationError};
