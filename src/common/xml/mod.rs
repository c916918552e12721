//! XML helpers shared by the OOXML writer and the placeholder tools.

mod escape;

pub use escape::{escape_xml, unescape_xml};
