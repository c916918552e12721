/// Open Packaging Conventions (OPC) support.
///
/// Covers what a generated Word document needs: parts with content types,
/// relationships, `[Content_Types].xml` and the ZIP container. The ZIP layer is
/// only compiled with the `ooxml` feature.
pub mod constants;
pub mod error;
pub mod package;
pub mod rel;

#[cfg(feature = "ooxml")]
pub mod phys_pkg;
#[cfg(feature = "ooxml")]
pub mod pkgwriter;

pub use package::{OpcPackage, Part};
pub use rel::{Relationship, Relationships};
