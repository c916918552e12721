//! Unified error types for Studyplan.
//!
//! This module provides a unified error type that encompasses errors from the
//! Word writer, the RTF writer and configuration loading.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
