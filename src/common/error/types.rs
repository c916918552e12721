//! Unified error types for Studyplan.
//!
//! This module provides a unified error type that encompasses errors from the
//! OOXML and RTF writers, presenting a consistent API to users.
use thiserror::Error;

/// Main error type for Studyplan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised while building or packaging the Word document
    #[error("OOXML error: {0}")]
    Ooxml(crate::ooxml::OoxmlError),

    /// Error raised while writing or decoding RTF
    #[error("RTF error: {0}")]
    Rtf(crate::rtf::RtfError),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Configuration or value file could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// Date string is not `YYYY-MM-DD`
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// File extension is neither .docx nor .rtf
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for Studyplan operations.
pub type Result<T> = std::result::Result<T, Error>;
