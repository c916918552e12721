//! RTF document writer.
//!
//! Output is plain 7-bit ASCII: markup characters are escaped and anything
//! outside ASCII is written as `\uN?`.

use super::types::{Alignment, Font, FontFamily, Formatting};
use crate::common::Metadata;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::io::{self, Write};

/// Text width of a Letter page with one-inch margins, in twips.
const TEXT_WIDTH: i32 = 9360;

/// ANSI code page declared in the header.
const CODE_PAGE: i32 = 1252;
/// Body text size in half-points.
const DEFAULT_FONT_SIZE: i32 = 22;
/// Default tab stop, half an inch in twips.
const DEFAULT_TAB_WIDTH: i32 = 720;

/// RTF document writer
pub struct RtfWriter<W: Write> {
    writer: W,
    /// Font 0, the only entry of the font table
    font: Font,
}

impl<W: Write> RtfWriter<W> {
    /// Create a new RTF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            font: Font::new(FontFamily::Swiss, "Calibri"),
        }
    }

    /// Open the document and write the font table.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("{")?;
        self.write_control_word("rtf", Some(1))?;
        self.write_control_word("ansi", None)?;
        self.write_control_word("ansicpg", Some(CODE_PAGE))?;
        self.write_control_word("deff", Some(0))?;
        self.write_control_word("deftab", Some(DEFAULT_TAB_WIDTH))?;
        self.write_font_table()?;
        self.write_control_word("fs", Some(DEFAULT_FONT_SIZE))?;
        self.write_str("\n")
    }

    fn write_font_table(&mut self) -> io::Result<()> {
        let family = self.font.family.control_word();
        let name = escape_text(&self.font.name);

        self.write_str("{")?;
        self.write_control_word("fonttbl", None)?;
        self.write_str("{")?;
        self.write_control_word("f", Some(0))?;
        self.write_control_word(family, None)?;
        self.write_str(" ")?;
        self.write_str(&name)?;
        self.write_str(";}}")
    }

    /// Write the `\info` group from document metadata.
    pub fn write_info(&mut self, metadata: &Metadata) -> io::Result<()> {
        if !metadata.has_data() {
            return Ok(());
        }

        self.write_str("{")?;
        self.write_control_word("info", None)?;
        for (word, value) in [
            ("title", &metadata.title),
            ("subject", &metadata.subject),
            ("author", &metadata.author),
            ("keywords", &metadata.keywords),
        ] {
            if let Some(value) = value {
                self.write_str("{")?;
                self.write_control_word(word, None)?;
                self.write_str(" ")?;
                self.write_text(value)?;
                self.write_str("}")?;
            }
        }
        if let Some(created) = metadata.created {
            self.write_time("creatim", &created)?;
        }
        if let Some(modified) = metadata.modified {
            self.write_time("revtim", &modified)?;
        }
        self.write_str("}\n")
    }

    fn write_time(&mut self, word: &str, time: &DateTime<Utc>) -> io::Result<()> {
        self.write_str("{")?;
        self.write_control_word(word, None)?;
        self.write_control_word("yr", Some(time.year()))?;
        self.write_control_word("mo", Some(time.month() as i32))?;
        self.write_control_word("dy", Some(time.day() as i32))?;
        self.write_control_word("hr", Some(time.hour() as i32))?;
        self.write_control_word("min", Some(time.minute() as i32))?;
        self.write_str("}")
    }

    /// Write one paragraph as its own group.
    pub fn write_paragraph(
        &mut self,
        text: &str,
        formatting: Formatting,
        alignment: Alignment,
    ) -> io::Result<()> {
        self.write_str("{")?;
        self.write_control_word("pard", None)?;
        if alignment != Alignment::Left {
            self.write_control_word(alignment.control_word(), None)?;
        }
        self.write_formatting(&formatting)?;
        if !text.is_empty() {
            self.write_str(" ")?;
            self.write_text(text)?;
        }
        self.write_control_word("par", None)?;
        self.write_str("}\n")
    }

    /// Write an empty paragraph.
    pub fn write_blank_line(&mut self) -> io::Result<()> {
        self.write_paragraph("", Formatting::PLAIN, Alignment::Left)
    }

    /// Write a grid table with equal column widths across the text area.
    ///
    /// When `header_row` is set the first row is bold.
    pub fn write_table(&mut self, rows: &[Vec<String>], header_row: bool) -> io::Result<()> {
        for (i, row) in rows.iter().enumerate() {
            let formatting = if header_row && i == 0 {
                Formatting::BOLD
            } else {
                Formatting::PLAIN
            };
            self.write_table_row(row, formatting)?;
        }
        Ok(())
    }

    /// Write a table row
    pub fn write_table_row(&mut self, cells: &[String], formatting: Formatting) -> io::Result<()> {
        if cells.is_empty() {
            return Ok(());
        }

        self.write_str("{")?;
        self.write_control_word("trowd", None)?;
        self.write_control_word("trgaph", Some(108))?;
        self.write_control_word("trleft", Some(0))?;

        let cell_width = TEXT_WIDTH / cells.len() as i32;
        for i in 0..cells.len() {
            for edge in ["clbrdrt", "clbrdrl", "clbrdrb", "clbrdrr"] {
                self.write_control_word(edge, None)?;
                self.write_control_word("brdrs", None)?;
                self.write_control_word("brdrw", Some(10))?;
            }
            self.write_control_word("cellx", Some(cell_width * (i as i32 + 1)))?;
        }

        self.write_control_word("pard", None)?;
        self.write_control_word("intbl", None)?;
        for cell in cells {
            self.write_str("{")?;
            self.write_formatting(&formatting)?;
            if !formatting.is_plain() {
                self.write_str(" ")?;
            }
            self.write_text(cell)?;
            self.write_str("}")?;
            self.write_control_word("cell", None)?;
        }

        self.write_control_word("row", None)?;
        self.write_str("}\n")
    }

    fn write_formatting(&mut self, fmt: &Formatting) -> io::Result<()> {
        if fmt.bold {
            self.write_control_word("b", None)?;
        }
        if fmt.italic {
            self.write_control_word("i", None)?;
        }
        if let Some(size) = fmt.font_size {
            self.write_control_word("fs", Some(size as i32))?;
        }
        Ok(())
    }

    /// Close the document and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.write_str("}")?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Write a control word
    fn write_control_word(&mut self, word: &str, param: Option<i32>) -> io::Result<()> {
        self.write_str("\\")?;
        self.write_str(word)?;
        if let Some(p) = param {
            write!(self.writer, "{}", p)?;
        }
        Ok(())
    }

    /// Write plain text (with proper escaping)
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let escaped = escape_text(text);
        self.write_str(&escaped)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())
    }
}

/// Escape text for an RTF body.
///
/// Control words emitted for newlines and tabs carry a trailing space so the
/// following text cannot run into them.
///
/// ```
/// use studyplan::rtf::escape_text;
/// assert_eq!(escape_text("{{NOTES}}"), r"\{\{NOTES\}\}");
/// assert_eq!(escape_text("a\tb"), r"a\tab b");
/// assert_eq!(escape_text("é"), r"\u233?");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\par "),
            '\t' => out.push_str("\\tab "),
            '\r' => {},
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // \u takes a signed 16-bit value
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            },
        }
    }
    out
}
