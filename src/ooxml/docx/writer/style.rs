/// Style writer support for DOCX documents.
///
/// Generated documents carry a small `styles.xml`: the `Normal` paragraph
/// style, the `Table Normal` base table style and the `Light Grid` style used
/// by every table of the plan template.
use crate::common::xml::escape_xml;
use crate::ooxml::docx::format::{ParagraphAlignment, WdStyleType};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

use super::table::TableBorder;

/// A mutable style definition for writing.
///
/// # Examples
///
/// ```
/// use studyplan::ooxml::docx::format::WdStyleType;
/// use studyplan::ooxml::docx::writer::MutableStyle;
///
/// let mut style = MutableStyle::new("Note", "Note", WdStyleType::Paragraph);
/// style.set_based_on(Some("Normal".to_string()));
/// style.set_italic(true);
/// assert_eq!(style.style_id(), "Note");
/// ```
#[derive(Debug, Clone)]
pub struct MutableStyle {
    /// Style identifier (e.g., "LightGrid")
    style_id: String,
    /// UI-visible name (e.g., "Light Grid")
    name: String,
    style_type: WdStyleType,
    is_default: bool,
    is_custom: bool,
    based_on: Option<String>,
    priority: Option<i32>,
    is_quick_style: bool,
    is_hidden: bool,
    /// Font size in half-points
    font_size: Option<u32>,
    bold: bool,
    italic: bool,
    alignment: Option<ParagraphAlignment>,
    /// Space after paragraph in twips
    space_after: Option<u32>,
    /// Borders of a table style
    borders: Option<TableBorder>,
    /// Bold text in the header row of a table style
    first_row_bold: bool,
}

impl MutableStyle {
    /// Create a new custom style with the given ID, name, and type.
    pub fn new(
        style_id: impl Into<String>,
        name: impl Into<String>,
        style_type: WdStyleType,
    ) -> Self {
        Self {
            style_id: style_id.into(),
            name: name.into(),
            style_type,
            is_default: false,
            is_custom: true,
            based_on: None,
            priority: None,
            is_quick_style: false,
            is_hidden: false,
            font_size: None,
            bold: false,
            italic: false,
            alignment: None,
            space_after: None,
            borders: None,
            first_row_bold: false,
        }
    }

    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn style_type(&self) -> WdStyleType {
        self.style_type
    }

    /// Set whether this is the default style for its type.
    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    /// Set whether this is a custom style.
    pub fn set_custom(&mut self, is_custom: bool) {
        self.is_custom = is_custom;
    }

    /// Set the base style ID.
    pub fn set_based_on(&mut self, based_on: Option<String>) {
        self.based_on = based_on;
    }

    /// Set the UI priority (lower values appear first).
    pub fn set_priority(&mut self, priority: Option<i32>) {
        self.priority = priority;
    }

    /// Set whether to show in quick style gallery.
    pub fn set_quick_style(&mut self, is_quick_style: bool) {
        self.is_quick_style = is_quick_style;
    }

    /// Set whether hidden from UI.
    pub fn set_hidden(&mut self, is_hidden: bool) {
        self.is_hidden = is_hidden;
    }

    /// Set font size in half-points.
    pub fn set_font_size(&mut self, font_size: Option<u32>) {
        self.font_size = font_size;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn set_alignment(&mut self, alignment: Option<ParagraphAlignment>) {
        self.alignment = alignment;
    }

    /// Set space after paragraphs in twips.
    pub fn set_space_after(&mut self, twips: Option<u32>) {
        self.space_after = twips;
    }

    /// Set the borders of a table style.
    pub fn set_borders(&mut self, borders: Option<TableBorder>) {
        self.borders = borders;
    }

    /// Bold the first row of tables using this style.
    pub fn set_first_row_bold(&mut self, bold: bool) {
        self.first_row_bold = bold;
    }

    /// The default paragraph style.
    pub fn normal() -> Self {
        let mut style = Self::new("Normal", "Normal", WdStyleType::Paragraph);
        style.set_default(true);
        style.set_custom(false);
        style.set_quick_style(true);
        style
    }

    /// The default table style every other table style derives from.
    pub fn table_normal() -> Self {
        let mut style = Self::new("TableNormal", "Normal Table", WdStyleType::Table);
        style.set_default(true);
        style.set_custom(false);
        style.set_priority(Some(99));
        style.set_hidden(true);
        style
    }

    /// Grid table with thin borders and a bold header row.
    pub fn light_grid() -> Self {
        let mut style = Self::new("LightGrid", "Light Grid", WdStyleType::Table);
        style.set_custom(false);
        style.set_based_on(Some("TableNormal".to_string()));
        style.set_priority(Some(62));
        style.set_space_after(Some(0));
        style.set_borders(Some(TableBorder {
            size: 8,
            ..TableBorder::default()
        }));
        style.set_first_row_bold(true);
        style
    }

    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);

        write!(
            &mut xml,
            r#"<w:style w:type="{}" w:styleId="{}""#,
            self.style_type.to_xml(),
            escape_xml(&self.style_id)
        )?;
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        if self.is_custom {
            xml.push_str(r#" w:customStyle="1""#);
        }
        xml.push('>');

        write!(&mut xml, r#"<w:name w:val="{}"/>"#, escape_xml(&self.name))?;

        if let Some(ref based_on) = self.based_on {
            write!(&mut xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on))?;
        }
        if let Some(priority) = self.priority {
            write!(&mut xml, r#"<w:uiPriority w:val="{}"/>"#, priority)?;
        }
        if self.is_hidden {
            xml.push_str("<w:semiHidden/><w:unhideWhenUsed/>");
        }
        if self.is_quick_style {
            xml.push_str("<w:qFormat/>");
        }

        if self.alignment.is_some() || self.space_after.is_some() {
            xml.push_str("<w:pPr>");
            if let Some(after) = self.space_after {
                write!(&mut xml, r#"<w:spacing w:after="{}" w:line="240" w:lineRule="auto"/>"#, after)?;
            }
            if let Some(alignment) = self.alignment {
                write!(&mut xml, r#"<w:jc w:val="{}"/>"#, alignment.as_str())?;
            }
            xml.push_str("</w:pPr>");
        }

        self.write_run_properties(&mut xml, self.bold, self.italic)?;

        if self.style_type == WdStyleType::Table {
            xml.push_str("<w:tblPr>");
            xml.push_str(r#"<w:tblInd w:w="0" w:type="dxa"/>"#);
            if let Some(ref border) = self.borders {
                border.write_all(&mut xml)?;
            }
            xml.push_str(r#"<w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar>"#);
            xml.push_str("</w:tblPr>");

            if self.first_row_bold {
                xml.push_str(r#"<w:tblStylePr w:type="firstRow"><w:rPr><w:b/><w:bCs/></w:rPr></w:tblStylePr>"#);
            }
        }

        xml.push_str("</w:style>");
        Ok(xml)
    }

    fn write_run_properties(&self, xml: &mut String, bold: bool, italic: bool) -> Result<()> {
        if self.font_size.is_none() && !bold && !italic {
            return Ok(());
        }
        xml.push_str("<w:rPr>");
        if bold {
            xml.push_str("<w:b/>");
        }
        if italic {
            xml.push_str("<w:i/>");
        }
        if let Some(size) = self.font_size {
            write!(xml, r#"<w:sz w:val="{}"/>"#, size)?;
        }
        xml.push_str("</w:rPr>");
        Ok(())
    }
}

/// The styles every generated document carries.
pub fn default_styles() -> Vec<MutableStyle> {
    vec![
        MutableStyle::normal(),
        MutableStyle::table_normal(),
        MutableStyle::light_grid(),
    ]
}

/// Serialize styles into a complete `word/styles.xml` part.
pub fn generate_styles_xml(styles: &[MutableStyle]) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    );
    xml.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    xml.push_str("<w:docDefaults>");
    xml.push_str("<w:rPrDefault><w:rPr>");
    xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
    xml.push_str(r#"<w:sz w:val="22"/>"#);
    xml.push_str(r#"<w:szCs w:val="22"/>"#);
    xml.push_str("</w:rPr></w:rPrDefault>");
    xml.push_str(r#"<w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#);
    xml.push_str("</w:docDefaults>");

    for style in styles {
        xml.push_str(&style.to_xml()?);
    }

    xml.push_str("</w:styles>");

    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_basic_style() {
        let style = MutableStyle::new("MyStyle", "My Custom Style", WdStyleType::Paragraph);
        assert_eq!(style.style_id(), "MyStyle");
        assert_eq!(style.name(), "My Custom Style");
        assert_eq!(style.style_type(), WdStyleType::Paragraph);
        let xml = style.to_xml().unwrap();
        assert!(xml.contains(r#"w:customStyle="1""#));
    }

    #[test]
    fn test_light_grid_style() {
        let xml = MutableStyle::light_grid().to_xml().unwrap();
        assert!(xml.starts_with(r#"<w:style w:type="table" w:styleId="LightGrid">"#));
        assert!(xml.contains(r#"<w:name w:val="Light Grid"/>"#));
        assert!(xml.contains(r#"<w:basedOn w:val="TableNormal"/>"#));
        assert!(xml.contains("<w:tblBorders>"));
        assert!(xml.contains(r#"<w:tblStylePr w:type="firstRow">"#));
    }

    #[test]
    fn test_paragraph_formatting() {
        let mut style = MutableStyle::new("Footer", "Footer Note", WdStyleType::Paragraph);
        style.set_italic(true);
        style.set_font_size(Some(18));
        style.set_alignment(Some(ParagraphAlignment::Center));
        let xml = style.to_xml().unwrap();
        assert!(xml.contains("<w:i/>"));
        assert!(xml.contains(r#"<w:sz w:val="18"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(!xml.contains("<w:tblPr>"));
    }

    #[test]
    fn test_styles_part() {
        let xml = generate_styles_xml(&default_styles()).unwrap();
        assert!(xml.contains("<w:docDefaults>"));
        assert_eq!(xml.matches("<w:style ").count(), 3);
        assert!(xml.contains(r#"w:styleId="Normal""#));
        assert!(xml.ends_with("</w:styles>"));
    }
}
