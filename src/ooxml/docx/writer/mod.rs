//! Mutable document writer components for DOCX.
//!
//! Documents are built in memory as paragraphs, runs and tables, then
//! serialized to WordprocessingML.

pub mod doc;
pub mod paragraph;
pub mod run;
pub mod style;
pub mod table;

pub use doc::{BodyElement, MutableDocument, PageSetup};
pub use paragraph::MutableParagraph;
pub use run::MutableRun;
pub use style::{MutableStyle, default_styles, generate_styles_xml};
pub use table::{MutableCell, MutableRow, MutableTable, TableBorder};
