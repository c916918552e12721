//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => Error::Io(e),
            OpcError::ZipError(s) => Error::ZipError(s),
            other => Error::Ooxml(OoxmlError::Opc(other)),
        }
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Opc(opc) => Error::from(opc),
            other => Error::Ooxml(other),
        }
    }
}

impl From<crate::rtf::RtfError> for Error {
    fn from(err: crate::rtf::RtfError) -> Self {
        Error::Rtf(err)
    }
}

#[cfg(feature = "ooxml")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::from(OpcError::from(err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::InvalidDate(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ooxml_io_error_is_unwrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = OoxmlError::Io(io).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_nested_zip_error_maps_to_zip() {
        let err: Error = OoxmlError::Opc(OpcError::ZipError("bad header".to_string())).into();
        assert!(matches!(err, Error::ZipError(ref s) if s == "bad header"));
    }

    #[test]
    fn test_xml_error_stays_ooxml() {
        let err: Error = OoxmlError::Xml("unclosed tag".to_string()).into();
        assert!(matches!(err, Error::Ooxml(OoxmlError::Xml(_))));
    }

    #[test]
    fn test_invalid_date_message() {
        let parse_err = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.to_string().starts_with("Invalid date:"));
    }
}
