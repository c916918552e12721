/// Table types and implementation for DOCX documents.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

pub use super::super::format::TableBorderStyle;
use super::paragraph::{MutableParagraph, ParagraphAlignment};

/// Text width of a Letter page with one-inch margins, in twips.
pub(crate) const TEXT_WIDTH_DXA: u32 = 9360;

/// Border definition for a table.
#[derive(Debug, Clone)]
pub struct TableBorder {
    pub style: TableBorderStyle,
    /// Border width in eighths of a point (e.g., 8 = 1pt)
    pub size: u32,
    /// Border color in hex RGB format
    pub color: String,
}

impl Default for TableBorder {
    fn default() -> Self {
        Self {
            style: TableBorderStyle::Single,
            size: 4,
            color: "000000".to_string(),
        }
    }
}

impl TableBorder {
    pub(crate) fn write(&self, xml: &mut String, name: &str) -> Result<()> {
        write!(
            xml,
            "<w:{} w:val=\"{}\" w:sz=\"{}\" w:space=\"0\" w:color=\"{}\"/>",
            name,
            self.style.as_str(),
            self.size,
            self.color
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))
    }

    /// Write a `w:tblBorders` block using this border on all six edges.
    pub(crate) fn write_all(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tblBorders>");
        for name in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.write(xml, name)?;
        }
        xml.push_str("</w:tblBorders>");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct TableProperties {
    /// Table style ID, e.g. `LightGrid`
    pub(crate) style: Option<String>,
    /// Explicit borders; when unset the table style decides
    pub(crate) borders: Option<TableBorder>,
    pub(crate) alignment: Option<ParagraphAlignment>,
}

/// A mutable table.
#[derive(Debug)]
pub struct MutableTable {
    pub(crate) rows: Vec<MutableRow>,
    pub(crate) properties: TableProperties,
}

impl MutableTable {
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| MutableRow::new(cols)).collect(),
            properties: TableProperties::default(),
        }
    }

    /// Apply a table style by ID.
    pub fn set_style(&mut self, style_id: &str) {
        self.properties.style = Some(style_id.to_string());
    }

    /// Table style ID, if any.
    pub fn style(&self) -> Option<&str> {
        self.properties.style.as_deref()
    }

    /// Horizontal position of the table on the page.
    pub fn set_alignment(&mut self, alignment: ParagraphAlignment) {
        self.properties.alignment = Some(alignment);
    }

    /// Override the style's borders on all edges.
    pub fn set_borders(&mut self, border: TableBorder) {
        self.properties.borders = Some(border);
    }

    /// Get a cell by row and column index.
    pub fn cell(&mut self, row: usize, col: usize) -> Option<&mut MutableCell> {
        self.rows.get_mut(row)?.cell(col)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the first row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, MutableRow::cell_count)
    }

    /// Text of every cell, row by row.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(MutableCell::text).collect())
            .collect()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tbl>");

        xml.push_str("<w:tblPr>");
        if let Some(ref style) = self.properties.style {
            write!(xml, "<w:tblStyle w:val=\"{}\"/>", escape_xml(style))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push_str("<w:tblW w:w=\"5000\" w:type=\"pct\"/>");
        if let Some(alignment) = self.properties.alignment {
            write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        if let Some(ref border) = self.properties.borders {
            border.write_all(xml)?;
        }
        xml.push_str("<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"1\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>");
        xml.push_str("</w:tblPr>");

        let cols = self.column_count();
        if cols > 0 {
            let width = TEXT_WIDTH_DXA / cols as u32;
            xml.push_str("<w:tblGrid>");
            for _ in 0..cols {
                write!(xml, "<w:gridCol w:w=\"{}\"/>", width)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</w:tblGrid>");
        }

        for row in &self.rows {
            row.to_xml(xml)?;
        }

        xml.push_str("</w:tbl>");

        Ok(())
    }
}

/// A mutable table row.
#[derive(Debug)]
pub struct MutableRow {
    pub(crate) cells: Vec<MutableCell>,
}

impl MutableRow {
    pub(crate) fn new(cols: usize) -> Self {
        Self {
            cells: (0..cols).map(|_| MutableCell::new()).collect(),
        }
    }

    /// Get a cell by index.
    pub fn cell(&mut self, index: usize) -> Option<&mut MutableCell> {
        self.cells.get_mut(index)
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tr>");
        for cell in &self.cells {
            cell.to_xml(xml)?;
        }
        xml.push_str("</w:tr>");
        Ok(())
    }
}

/// A mutable table cell.
///
/// A cell always holds at least one paragraph.
#[derive(Debug)]
pub struct MutableCell {
    pub(crate) paragraphs: Vec<MutableParagraph>,
}

impl MutableCell {
    pub(crate) fn new() -> Self {
        Self {
            paragraphs: vec![MutableParagraph::new()],
        }
    }

    /// Replace the cell content with a single paragraph holding `text`.
    pub fn set_text(&mut self, text: &str) -> &mut MutableParagraph {
        self.paragraphs.clear();
        self.paragraphs.push(MutableParagraph::new());
        let para = &mut self.paragraphs[0];
        para.add_run_with_text(text);
        para
    }

    /// Text of all paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(MutableParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tc>");
        for para in &self.paragraphs {
            para.to_xml(xml)?;
        }
        xml.push_str("</w:tc>");
        Ok(())
    }
}
