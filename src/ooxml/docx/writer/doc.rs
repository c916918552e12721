/// Document writer implementation for DOCX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

use super::paragraph::MutableParagraph;
use super::table::MutableTable;

/// Page setup in twips. Defaults to US Letter with one-inch margins.
#[derive(Debug, Clone)]
pub struct PageSetup {
    pub page_width: u32,
    pub page_height: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            page_width: 12240,
            page_height: 15840,
            margin_top: 1440,
            margin_right: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
        }
    }
}

/// A mutable Word document for writing.
///
/// Paragraphs and tables are kept in document order.
#[derive(Debug, Default)]
pub struct MutableDocument {
    elements: Vec<BodyElement>,
    page: PageSetup,
}

/// A body element (paragraph or table).
#[derive(Debug)]
pub enum BodyElement {
    Paragraph(MutableParagraph),
    Table(MutableTable),
}

impl MutableDocument {
    /// Create a new empty mutable document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new paragraph to the end of the document.
    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        self.elements
            .push(BodyElement::Paragraph(MutableParagraph::new()));
        match self.elements.last_mut() {
            Some(BodyElement::Paragraph(p)) => p,
            _ => unreachable!(),
        }
    }

    /// Add a paragraph with text.
    pub fn add_paragraph_with_text(&mut self, text: &str) -> &mut MutableParagraph {
        let para = self.add_paragraph();
        para.add_run_with_text(text);
        para
    }

    /// Add a table with specified rows and columns.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> &mut MutableTable {
        self.elements
            .push(BodyElement::Table(MutableTable::new(rows, cols)));
        match self.elements.last_mut() {
            Some(BodyElement::Table(t)) => t,
            _ => unreachable!(),
        }
    }

    /// Body elements in document order.
    pub fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    /// Get the number of top-level paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Get the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Top-level paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &MutableParagraph> {
        self.elements.iter().filter_map(|e| match e {
            BodyElement::Paragraph(p) => Some(p),
            BodyElement::Table(_) => None,
        })
    }

    /// Tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &MutableTable> {
        self.elements.iter().filter_map(|e| match e {
            BodyElement::Table(t) => Some(t),
            BodyElement::Paragraph(_) => None,
        })
    }

    /// Serialize the document to a `word/document.xml` part.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(16 * 1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespace::WML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("<w:body>");

        for element in &self.elements {
            match element {
                BodyElement::Paragraph(p) => p.to_xml(&mut xml)?,
                BodyElement::Table(t) => t.to_xml(&mut xml)?,
            }
        }

        // sectPr must be the last child of the body
        self.write_section_properties(&mut xml)?;

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");
        Ok(xml)
    }

    fn write_section_properties(&self, xml: &mut String) -> Result<()> {
        let page = &self.page;
        xml.push_str("<w:sectPr>");
        write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            page.page_width, page.page_height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        write!(
            xml,
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            page.margin_top, page.margin_right, page.margin_bottom, page.margin_left
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</w:sectPr>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_document() {
        let doc = MutableDocument::new();
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_count(), 0);
    }

    #[test]
    fn test_elements_keep_order() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("Heading");
        doc.add_table(2, 3).cell(0, 0).unwrap().set_text("Cell 1");
        doc.add_paragraph_with_text("After");
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.table_count(), 1);
        assert!(matches!(doc.elements()[1], BodyElement::Table(_)));
    }

    #[test]
    fn test_xml_generation() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("Test paragraph");
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<w:body><w:p>"));
        assert!(xml.contains("Test paragraph"));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_run_formatting() {
        let mut doc = MutableDocument::new();
        let para = doc.add_paragraph();
        para.add_run_with_text("Bold text").bold(true);
        para.add_run_with_text("Italic text").italic(true);

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:i/>"));
    }
}
