/// Paragraph types and implementation for DOCX documents.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

pub use super::super::format::ParagraphAlignment;
use super::run::MutableRun;

/// A mutable paragraph in a document.
#[derive(Debug, Default)]
pub struct MutableParagraph {
    pub(crate) runs: Vec<MutableRun>,
    /// Paragraph style ID
    pub(crate) style: Option<String>,
    pub(crate) properties: ParagraphProperties,
}

impl MutableParagraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a new run to the paragraph.
    pub fn add_run(&mut self) -> &mut MutableRun {
        let index = self.runs.len();
        self.runs.push(MutableRun::new());
        &mut self.runs[index]
    }

    /// Add a run with text.
    pub fn add_run_with_text(&mut self, text: &str) -> &mut MutableRun {
        let run = self.add_run();
        run.set_text(text);
        run
    }

    /// Set the paragraph style.
    pub fn set_style(&mut self, style_id: &str) {
        self.style = Some(style_id.to_string());
    }

    /// Set paragraph alignment.
    pub fn set_alignment(&mut self, alignment: ParagraphAlignment) {
        self.properties.alignment = Some(alignment);
    }

    /// Set spacing before this paragraph (in points).
    pub fn set_space_before(&mut self, points: f64) {
        self.properties.space_before = Some((points * 20.0) as u32);
    }

    /// Set spacing after this paragraph (in points).
    pub fn set_space_after(&mut self, points: f64) {
        self.properties.space_after = Some((points * 20.0) as u32);
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(MutableRun::text).collect()
    }

    /// Get the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.properties.has_properties() {
            xml.push_str("<w:pPr>");

            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            if self.properties.space_before.is_some() || self.properties.space_after.is_some() {
                xml.push_str("<w:spacing");
                if let Some(before) = self.properties.space_before {
                    write!(xml, " w:before=\"{}\"", before)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                }
                if let Some(after) = self.properties.space_after {
                    write!(xml, " w:after=\"{}\"", after)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                }
                xml.push_str("/>");
            }

            if let Some(alignment) = self.properties.alignment {
                write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            xml.push_str("</w:pPr>");
        }

        for run in &self.runs {
            run.to_xml(xml)?;
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

/// Paragraph properties.
#[derive(Debug, Default)]
pub(crate) struct ParagraphProperties {
    pub(crate) alignment: Option<ParagraphAlignment>,
    /// Space before in twips
    pub(crate) space_before: Option<u32>,
    /// Space after in twips
    pub(crate) space_after: Option<u32>,
}

impl ParagraphProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.alignment.is_some() || self.space_before.is_some() || self.space_after.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_paragraph() {
        let mut xml = String::new();
        MutableParagraph::new().to_xml(&mut xml).unwrap();
        assert_eq!(xml, "<w:p></w:p>");
    }

    #[test]
    fn test_alignment_and_spacing() {
        let mut para = MutableParagraph::new();
        para.set_alignment(ParagraphAlignment::Right);
        para.set_space_after(6.0);
        para.add_run_with_text("Total").bold(true);

        let mut xml = String::new();
        para.to_xml(&mut xml).unwrap();
        assert!(xml.starts_with("<w:p><w:pPr><w:spacing w:after=\"120\"/><w:jc w:val=\"right\"/></w:pPr>"));
        assert_eq!(para.text(), "Total");
    }
}
