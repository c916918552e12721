//! Common types, traits, and utilities shared across formats.
//!
//! This module provides the unified error type, XML escaping helpers and the
//! document metadata used by both the Word and RTF writers.

// Submodule declarations
pub mod error;
pub mod metadata;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use metadata::Metadata;
