/// Run types and implementation for DOCX documents.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// A mutable run.
///
/// Runs contain text and character formatting. Tab characters in the text are
/// written as `<w:tab/>` elements between text segments.
#[derive(Debug, Default)]
pub struct MutableRun {
    pub(crate) text: String,
    pub(crate) properties: RunProperties,
}

impl MutableRun {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the text content.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = Some(bold);
        self
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties.italic = Some(italic);
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.properties.font_size = Some(size);
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        if self.properties.has_properties() {
            xml.push_str("<w:rPr>");

            if self.properties.bold == Some(true) {
                xml.push_str("<w:b/>");
            }

            if self.properties.italic == Some(true) {
                xml.push_str("<w:i/>");
            }

            if let Some(size) = self.properties.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/><w:szCs w:val=\"{}\"/>", size, size)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            xml.push_str("</w:rPr>");
        }

        for (i, segment) in self.text.split('\t').enumerate() {
            if i > 0 {
                xml.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                write!(
                    xml,
                    "<w:t xml:space=\"preserve\">{}</w:t>",
                    escape_xml(segment)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
        }

        xml.push_str("</w:r>");

        Ok(())
    }
}

/// Run properties.
#[derive(Debug, Default)]
pub(crate) struct RunProperties {
    pub(crate) bold: Option<bool>,
    pub(crate) italic: Option<bool>,
    pub(crate) font_size: Option<u32>,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.bold.is_some() || self.italic.is_some() || self.font_size.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_of(run: &MutableRun) -> String {
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_plain_run_has_no_properties() {
        let mut run = MutableRun::new();
        run.set_text("COURSE");
        assert_eq!(
            xml_of(&run),
            "<w:r><w:t xml:space=\"preserve\">COURSE</w:t></w:r>"
        );
    }

    #[test]
    fn test_tabs_become_tab_elements() {
        let mut run = MutableRun::new();
        run.set_text("Total\t\t{{CORE_TOTAL}}");
        run.bold(true);
        assert_eq!(
            xml_of(&run),
            "<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Total</w:t><w:tab/><w:tab/><w:t xml:space=\"preserve\">{{CORE_TOTAL}}</w:t></w:r>"
        );
    }

    #[test]
    fn test_size_and_escaping() {
        let mut run = MutableRun::new();
        run.set_text("A & B");
        run.font_size(36).italic(true);
        let xml = xml_of(&run);
        assert!(xml.contains("<w:i/>"));
        assert!(xml.contains("<w:sz w:val=\"36\"/>"));
        assert!(xml.contains("A &amp; B"));
    }
}
