//! Rich Text Format output.
//!
//! [`RtfWriter`] emits paragraphs and grid tables; [`template`] lays out the
//! plan of study with it and [`plain_text`] reads the visible text back.

pub mod error;
pub mod template;
pub mod text;
pub mod types;
pub mod writer;

pub use error::{RtfError, RtfResult};
pub use text::plain_text;
pub use types::{Alignment, Font, FontFamily, Formatting};
pub use writer::{RtfWriter, escape_text};
