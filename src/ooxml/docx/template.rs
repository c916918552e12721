//! Renders a [`PlanTemplate`] as a Word document.

use crate::common::Metadata;
use crate::ooxml::docx::format::ParagraphAlignment;
use crate::ooxml::docx::writer::{MutableDocument, MutableTable};
use crate::plan::{LabeledRow, PlanTemplate};
use std::path::Path;

/// Style ID of the grid style applied to every table.
pub const TABLE_STYLE: &str = "LightGrid";

const TITLE_SIZE: u32 = 36;
const SECTION_HEADING_SIZE: u32 = 24;

/// Lay out the template as paragraphs and tables.
pub fn render(template: &PlanTemplate) -> MutableDocument {
    let mut doc = MutableDocument::new();

    let title = doc.add_paragraph();
    title.set_alignment(ParagraphAlignment::Center);
    title
        .add_run_with_text(&template.title)
        .bold(true)
        .font_size(TITLE_SIZE);

    let subtitle = doc.add_paragraph();
    subtitle.set_alignment(ParagraphAlignment::Center);
    subtitle.add_run_with_text(&template.subtitle()).italic(true);

    doc.add_paragraph();

    for section in &template.sections {
        doc.add_paragraph()
            .add_run_with_text(&section.heading)
            .bold(true)
            .font_size(SECTION_HEADING_SIZE);

        add_table(&mut doc, &section.table_rows())
            .set_alignment(ParagraphAlignment::Left);

        doc.add_paragraph();
        let total = doc.add_paragraph();
        total.set_alignment(ParagraphAlignment::Right);
        total.add_run_with_text(&section.total_line()).bold(true);
        doc.add_paragraph();
    }

    add_labeled_block(&mut doc, &template.summary_heading, &template.summary);
    add_labeled_block(&mut doc, &template.timetable_heading, &template.timetable);

    doc.add_paragraph();
    doc.add_paragraph()
        .add_run_with_text(&template.footer_note)
        .italic(true);

    doc
}

fn add_labeled_block(doc: &mut MutableDocument, heading: &str, rows: &[LabeledRow]) {
    doc.add_paragraph();
    doc.add_paragraph().add_run_with_text(heading).bold(true);

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![row.label.to_string(), row.value.token()])
        .collect();
    add_table(doc, &cells);
}

fn add_table<'d>(doc: &'d mut MutableDocument, cells: &[Vec<String>]) -> &'d mut MutableTable {
    let cols = cells.first().map_or(0, Vec::len);
    let table = doc.add_table(cells.len(), cols);
    table.set_style(TABLE_STYLE);
    for (r, row) in cells.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if let Some(cell) = table.cell(r, c) {
                cell.set_text(text);
            }
        }
    }
    table
}

/// Render the template and write it as a `.docx` file.
#[cfg(feature = "ooxml")]
pub fn save(template: &PlanTemplate, metadata: &Metadata, path: &Path) -> crate::Result<()> {
    let doc = render(template);
    let package = super::Package::new(&doc, &super::writer::default_styles(), metadata)?;
    package.save(path)?;
    Ok(())
}

/// Word output needs the `ooxml` feature.
#[cfg(not(feature = "ooxml"))]
pub fn save(_template: &PlanTemplate, _metadata: &Metadata, _path: &Path) -> crate::Result<()> {
    Err(crate::Error::FeatureDisabled("ooxml".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::writer::BodyElement;
    use chrono::NaiveDate;

    fn document() -> MutableDocument {
        render(&PlanTemplate::standard(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        ))
    }

    #[test]
    fn test_six_styled_tables() {
        let doc = document();
        let shapes: Vec<_> = doc
            .tables()
            .map(|t| (t.row_count(), t.column_count()))
            .collect();
        assert_eq!(
            shapes,
            vec![(4, 5), (4, 5), (4, 5), (4, 5), (5, 2), (8, 2)]
        );
        assert!(doc.tables().all(|t| t.style() == Some(TABLE_STYLE)));
    }

    #[test]
    fn test_title_block() {
        let doc = document();
        let paragraphs: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paragraphs[0].text(), "PROPOSED PLAN OF STUDY");
        assert_eq!(paragraphs[1].text(), "Generated: 2025-01-15");
        assert_eq!(paragraphs[2].text(), "");

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains(
            "<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:rPr><w:b/><w:sz w:val=\"36\"/>"
        ));
    }

    #[test]
    fn test_section_layout() {
        let doc = document();
        let elements = doc.elements();
        // heading, table, blank, total, blank
        assert!(matches!(&elements[3], BodyElement::Paragraph(p) if p.text() == "A.  Core ({{CORE_TOTAL}} credits)"));
        assert!(matches!(&elements[4], BodyElement::Table(t) if t.cell_texts()[1][4] == "{{TERM YEAR}}"));
        assert!(matches!(&elements[6], BodyElement::Paragraph(p) if p.text() == "Total\t\t{{CORE_TOTAL}}"));
    }

    #[test]
    fn test_summary_and_footer() {
        let doc = document();
        let summary = doc.tables().nth(4).unwrap().cell_texts();
        assert_eq!(summary[4], vec!["Total", "{{OVERALL_TOTAL}}"]);
        let last = doc.paragraphs().last().unwrap();
        assert!(last.text().contains("{{LIKE_THIS}}"));
    }
}
