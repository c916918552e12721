//! Studyplan - generator for "Proposed Plan of Study" templates
//!
//! This library builds a fixed academic planning document and writes it as a
//! Word document (.docx). When the Word path fails for any reason (including the
//! `ooxml` feature being compiled out) the same content is written as RTF.
//!
//! The generated document is a template: every value a student fills in is a
//! placeholder token such as `{{CORE_TOTAL}}`, left for later manual or scripted
//! replacement.
//!
//! # Features
//!
//! - **Word output**: minimal WordprocessingML writer packaged as an OPC/ZIP file
//! - **RTF fallback**: hand-written RTF with real table rows
//! - **Placeholder tools**: list the tokens in a generated file and fill them
//!   from a YAML value file
//!
//! # Example - Generating a template
//!
//! ```no_run
//! use studyplan::{Created, GeneratorConfig, generate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::default();
//! match generate(&config)? {
//!     Created::Docx { path } => println!("wrote {}", path.display()),
//!     Created::Rtf { path, reason } => {
//!         println!("wrote {} ({:?})", path.display(), reason);
//!     },
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Listing placeholders
//!
//! ```no_run
//! use studyplan::placeholder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for token in placeholder::extract("Proposed_Plan_of_Study_Template.docx")? {
//!     println!("{}", token);
//! }
//! # Ok(())
//! # }
//! ```

/// Common types shared by both output formats (errors, escaping, metadata).
pub mod common;

/// Generator configuration and its resolution chain.
pub mod config;

/// OOXML (Office Open XML) writer for the Word output.
///
/// The document model and XML serialization are always available; packaging
/// into a ZIP archive requires the `ooxml` feature.
pub mod ooxml;

/// Placeholder token scanning, extraction and substitution.
pub mod placeholder;

/// The plan-of-study template model and the generate/fallback procedure.
pub mod plan;

/// RTF (Rich Text Format) writer and text decoder for the fallback output.
pub mod rtf;

// Re-export commonly used types for convenience
pub use common::{Error, Metadata, Result};
pub use config::{Format, GeneratorConfig};
pub use plan::{Created, PlanTemplate, generate};
