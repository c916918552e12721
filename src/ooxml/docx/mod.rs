//! Word (.docx) output.
//!
//! [`writer`] builds the document body, [`package`] assembles the OPC parts
//! around it and [`template`] lays out the plan of study.

pub mod format;
pub mod package;
pub mod props;
pub mod template;
pub mod writer;

#[cfg(feature = "ooxml")]
pub mod reader;

pub use package::Package;
pub use writer::MutableDocument;
