//! Error types for RTF writing and reading.

use std::fmt;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF errors.
#[derive(Debug)]
pub enum RtfError {
    /// Failure writing the output stream
    Io(std::io::Error),
    /// Unbalanced groups or other broken structure
    InvalidStructure(String),
    /// Input ended inside a control word or group
    UnexpectedEof,
    /// Invalid control word
    InvalidControlWord(String),
}

impl fmt::Display for RtfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtfError::Io(err) => write!(f, "RTF I/O error: {}", err),
            RtfError::InvalidStructure(msg) => write!(f, "Invalid RTF structure: {}", msg),
            RtfError::UnexpectedEof => write!(f, "Unexpected end of input"),
            RtfError::InvalidControlWord(msg) => write!(f, "Invalid control word: {}", msg),
        }
    }
}

impl std::error::Error for RtfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RtfError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RtfError {
    fn from(err: std::io::Error) -> Self {
        RtfError::Io(err)
    }
}

impl From<std::num::ParseIntError> for RtfError {
    fn from(err: std::num::ParseIntError) -> Self {
        RtfError::InvalidControlWord(format!("bad numeric parameter: {}", err))
    }
}
