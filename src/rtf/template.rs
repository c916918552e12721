//! Renders a [`PlanTemplate`] as RTF.
//!
//! Carries the same headings, tables and tokens as the Word output: each
//! section gets its heading, a 4x5 grid table and the right-aligned total line.

use super::types::{Alignment, Formatting};
use super::writer::RtfWriter;
use crate::common::Metadata;
use crate::plan::{LabeledRow, PlanTemplate};
use std::io::{self, Write};
use std::path::Path;

const TITLE: Formatting = Formatting::BOLD.with_size(36);
const SECTION_HEADING: Formatting = Formatting::BOLD.with_size(24);

/// Write the template to any byte sink.
pub fn write_to<W: Write>(template: &PlanTemplate, metadata: &Metadata, sink: W) -> io::Result<W> {
    let mut w = RtfWriter::new(sink);
    w.write_header()?;
    w.write_info(metadata)?;

    w.write_paragraph(&template.title, TITLE, Alignment::Center)?;
    w.write_paragraph(&template.subtitle(), Formatting::ITALIC, Alignment::Center)?;
    w.write_blank_line()?;

    for section in &template.sections {
        w.write_paragraph(&section.heading, SECTION_HEADING, Alignment::Left)?;
        w.write_table(&section.table_rows(), true)?;
        w.write_blank_line()?;
        w.write_paragraph(&section.total_line(), Formatting::BOLD, Alignment::Right)?;
        w.write_blank_line()?;
    }

    write_labeled_block(&mut w, &template.summary_heading, &template.summary)?;
    write_labeled_block(&mut w, &template.timetable_heading, &template.timetable)?;

    w.write_blank_line()?;
    w.write_paragraph(&template.footer_note, Formatting::ITALIC, Alignment::Left)?;

    w.finish()
}

fn write_labeled_block<W: Write>(
    w: &mut RtfWriter<W>,
    heading: &str,
    rows: &[LabeledRow],
) -> io::Result<()> {
    w.write_blank_line()?;
    w.write_paragraph(heading, Formatting::BOLD, Alignment::Left)?;
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![row.label.to_string(), row.value.token()])
        .collect();
    w.write_table(&cells, false)
}

/// Render the template to an RTF string.
pub fn render(template: &PlanTemplate, metadata: &Metadata) -> io::Result<String> {
    let bytes = write_to(template, metadata, Vec::with_capacity(16 * 1024))?;
    // The writer only emits ASCII
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Render the template and write it to `path` in one write.
pub fn save(template: &PlanTemplate, metadata: &Metadata, path: &Path) -> crate::Result<()> {
    let rtf = render(template, metadata).map_err(super::RtfError::from)?;
    std::fs::write(path, rtf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::scan_text;
    use crate::rtf::plain_text;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn rendered() -> String {
        let template = PlanTemplate::standard(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        render(&template, &Metadata::default()).unwrap()
    }

    #[test]
    fn test_header_and_ascii() {
        let rtf = rendered();
        assert!(rtf.starts_with("{\\rtf1\\ansi\\ansicpg1252\\deff0"));
        assert!(rtf.ends_with('}'));
        assert!(rtf.is_ascii());
    }

    #[test]
    fn test_braces_balanced() {
        let rtf = rendered();
        let mut depth = 0i32;
        let mut chars = rtf.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                },
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    assert!(depth >= 0);
                },
                _ => {},
            }
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_text_carries_all_headings_and_tokens() {
        let text = plain_text(&rendered()).unwrap();
        assert!(text.starts_with("PROPOSED PLAN OF STUDY\nGenerated: 2025-01-15\n"));
        assert!(text.contains("A.  Core ({{CORE_TOTAL}} credits)\n"));
        assert!(text.contains(
            "B.  Additional Required Core for Measurement and Quantitative Methods Concentration ({{ARC_TOTAL}} Hours)\n"
        ));
        assert!(text.contains("Total\t\t{{DISS_TOTAL}}\n"));
        assert!(text.contains("SUMMARY OF PROPOSED COURSE OF STUDY CREDIT HOURS\n"));
        assert!(text.contains("PROJECTED TIMETABLE\n"));
        assert_eq!(text.matches("{{CODE}}\t{{TITLE}}\t").count(), 12);

        let tokens = scan_text(&text);
        assert_eq!(tokens.len(), 14);
        assert!(tokens.iter().any(|t| t == "LIKE_THIS"));
    }

    #[test]
    fn test_info_group() {
        let template = PlanTemplate::standard(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        let metadata = Metadata {
            title: Some("Proposed Plan of Study".to_string()),
            ..Metadata::default()
        };
        let rtf = render(&template, &metadata).unwrap();
        assert!(rtf.contains("{\\info{\\title Proposed Plan of Study}}"));
        assert!(!plain_text(&rtf).unwrap().contains("Proposed Plan of Study"));
    }

    proptest! {
        #[test]
        fn prop_paragraph_text_survives_escaping(text in "[^\r]{0,40}") {
            let mut w = RtfWriter::new(Vec::new());
            w.write_header().unwrap();
            w.write_paragraph(&text, Formatting::PLAIN, Alignment::Left).unwrap();
            let rtf = String::from_utf8(w.finish().unwrap()).unwrap();
            prop_assert_eq!(plain_text(&rtf).unwrap(), format!("{}\n", text));
        }
    }
}
