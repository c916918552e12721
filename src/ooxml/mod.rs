/// Office Open XML output.
///
/// The XML side (document body, styles, properties, relationships) is always
/// compiled; packing it into a ZIP container and reading it back needs the
/// `ooxml` feature.
pub mod docx;
pub mod error;
pub mod opc;

pub use error::{OoxmlError, Result};
