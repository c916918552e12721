//! The "Proposed Plan of Study" template.
//!
//! [`PlanTemplate`] is the single description of the document. Both the Word
//! renderer ([`crate::ooxml::docx::template`]) and the RTF renderer
//! ([`crate::rtf::template`]) walk it, so the two formats always carry the same
//! headings, tables and placeholder tokens.

mod generate;

pub use generate::{Created, generate};

use chrono::NaiveDate;
use std::fmt;

/// `name` wrapped as it appears in a document, e.g. `{{CORE_TOTAL}}`.
pub fn token_for(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// A substitution token left in the generated document.
///
/// Displays as `{{NAME}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder(&'static str);

impl Placeholder {
    pub const CORE_TOTAL: Self = Self("CORE_TOTAL");
    pub const ARC_TOTAL: Self = Self("ARC_TOTAL");
    pub const ELECTIVE_TOTAL: Self = Self("ELECTIVE_TOTAL");
    pub const DISS_TOTAL: Self = Self("DISS_TOTAL");
    pub const OVERALL_TOTAL: Self = Self("OVERALL_TOTAL");
    pub const CODE: Self = Self("CODE");
    pub const TITLE: Self = Self("TITLE");
    pub const CREDITS: Self = Self("CREDITS");
    pub const GRADE: Self = Self("GRADE");
    pub const TERM_YEAR: Self = Self("TERM YEAR");
    pub const HOURS_COMPLETED: Self = Self("HOURS_COMPLETED");
    pub const RESIDENCY_SEMESTERS: Self = Self("RESIDENCY_SEMESTERS");
    pub const NOTES: Self = Self("NOTES");

    /// The bare token name, e.g. `TERM YEAR`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// The token as it appears in the document, e.g. `{{TERM YEAR}}`.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&token_for(self.0))
    }
}

/// Column headers of every course table.
pub const COURSE_COLUMNS: [&str; 5] = ["COURSE", "TITLE", "CREDITS", "GRADE", "DATE"];

/// Cell tokens of a blank course row.
pub const COURSE_ROW: [Placeholder; 5] = [
    Placeholder::CODE,
    Placeholder::TITLE,
    Placeholder::CREDITS,
    Placeholder::GRADE,
    Placeholder::TERM_YEAR,
];

/// Number of blank course rows under each section header row.
pub const BLANK_COURSE_ROWS: usize = 3;

/// Base name of the generated file; the extension depends on the format.
pub const DEFAULT_FILE_STEM: &str = "Proposed_Plan_of_Study_Template";

/// A lettered course section (A-D) with its course table and total line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSection {
    /// Section letter
    pub letter: char,
    /// Full heading, e.g. `A.  Core ({{CORE_TOTAL}} credits)`
    pub heading: String,
    /// Token repeated on the right-aligned total line
    pub total: Placeholder,
}

impl CourseSection {
    fn new(letter: char, label: &str, total: Placeholder) -> Self {
        Self {
            letter,
            heading: format!("{}.  {}", letter, label),
            total,
        }
    }

    /// The bold right-aligned line printed under the table.
    pub fn total_line(&self) -> String {
        format!("Total\t\t{}", self.total)
    }

    /// Header row followed by [`BLANK_COURSE_ROWS`] placeholder rows.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(BLANK_COURSE_ROWS + 1);
        rows.push(COURSE_COLUMNS.iter().map(|c| c.to_string()).collect());
        for _ in 0..BLANK_COURSE_ROWS {
            rows.push(COURSE_ROW.iter().map(Placeholder::token).collect());
        }
        rows
    }
}

/// A two-column label/value row of the summary and timetable tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledRow {
    pub label: &'static str,
    pub value: Placeholder,
}

const fn row(label: &'static str, value: Placeholder) -> LabeledRow {
    LabeledRow { label, value }
}

/// Summary of credit hours per section.
pub const SUMMARY_ROWS: [LabeledRow; 5] = [
    row("Core", Placeholder::CORE_TOTAL),
    row("Concentration Core", Placeholder::ARC_TOTAL),
    row("Electives", Placeholder::ELECTIVE_TOTAL),
    row("Dissertation", Placeholder::DISS_TOTAL),
    row("Total", Placeholder::OVERALL_TOTAL),
];

/// Milestones of the projected timetable.
pub const TIMETABLE_ROWS: [LabeledRow; 8] = [
    row("Date Admitted:", Placeholder::TERM_YEAR),
    row("Hours completed to date", Placeholder::HOURS_COMPLETED),
    row("Completion of Coursework", Placeholder::TERM_YEAR),
    row("Comprehensive exam", Placeholder::TERM_YEAR),
    row("Dissertation proposal", Placeholder::TERM_YEAR),
    row("Semesters of Residency", Placeholder::RESIDENCY_SEMESTERS),
    row("Completion of dissertation", Placeholder::TERM_YEAR),
    row("Notes", Placeholder::NOTES),
];

/// The complete plan-of-study document, independent of output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanTemplate {
    pub title: String,
    pub generated_on: NaiveDate,
    pub sections: Vec<CourseSection>,
    pub summary_heading: String,
    pub summary: Vec<LabeledRow>,
    pub timetable_heading: String,
    pub timetable: Vec<LabeledRow>,
    pub footer_note: String,
}

impl PlanTemplate {
    /// Build the standard template stamped with `generated_on`.
    pub fn standard(generated_on: NaiveDate) -> Self {
        let sections = vec![
            CourseSection::new(
                'A',
                &format!("Core ({} credits)", Placeholder::CORE_TOTAL),
                Placeholder::CORE_TOTAL,
            ),
            CourseSection::new(
                'B',
                &format!(
                    "Additional Required Core for Measurement and Quantitative Methods Concentration ({} Hours)",
                    Placeholder::ARC_TOTAL
                ),
                Placeholder::ARC_TOTAL,
            ),
            CourseSection::new(
                'C',
                &format!("Electives ({} Hours)", Placeholder::ELECTIVE_TOTAL),
                Placeholder::ELECTIVE_TOTAL,
            ),
            CourseSection::new(
                'D',
                &format!("Dissertation Hours ({})", Placeholder::DISS_TOTAL),
                Placeholder::DISS_TOTAL,
            ),
        ];

        Self {
            title: "PROPOSED PLAN OF STUDY".to_string(),
            generated_on,
            sections,
            summary_heading: "SUMMARY OF PROPOSED COURSE OF STUDY CREDIT HOURS".to_string(),
            summary: SUMMARY_ROWS.to_vec(),
            timetable_heading: "PROJECTED TIMETABLE".to_string(),
            timetable: TIMETABLE_ROWS.to_vec(),
            footer_note: "Placeholders appear as {{LIKE_THIS}}. Replace with your data or export directly from your Shiny app.".to_string(),
        }
    }

    /// The italic line under the title.
    pub fn subtitle(&self) -> String {
        format!("Generated: {}", self.generated_on.format("%Y-%m-%d"))
    }

    /// Every substitutable token in order of first appearance, without repeats.
    ///
    /// The `{{LIKE_THIS}}` sample in the footer note is not a field and is not
    /// listed.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        let mut push = |p: Placeholder| {
            if !seen.contains(&p) {
                seen.push(p);
            }
        };

        for section in &self.sections {
            push(section.total);
            COURSE_ROW.iter().copied().for_each(&mut push);
        }
        for row in self.summary.iter().chain(self.timetable.iter()) {
            push(row.value);
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> PlanTemplate {
        PlanTemplate::standard(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    #[test]
    fn test_placeholder_display() {
        assert_eq!(Placeholder::CORE_TOTAL.to_string(), "{{CORE_TOTAL}}");
        assert_eq!(Placeholder::TERM_YEAR.token(), "{{TERM YEAR}}");
        assert_eq!(Placeholder::TERM_YEAR.name(), "TERM YEAR");
        assert_eq!(token_for("TERM YEAR"), Placeholder::TERM_YEAR.token());
    }

    #[test]
    fn test_section_headings() {
        let t = template();
        let headings: Vec<_> = t.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "A.  Core ({{CORE_TOTAL}} credits)",
                "B.  Additional Required Core for Measurement and Quantitative Methods Concentration ({{ARC_TOTAL}} Hours)",
                "C.  Electives ({{ELECTIVE_TOTAL}} Hours)",
                "D.  Dissertation Hours ({{DISS_TOTAL}})",
            ]
        );
    }

    #[test]
    fn test_course_table_shape() {
        let t = template();
        let rows = t.sections[0].table_rows();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 5));
        assert_eq!(rows[0][0], "COURSE");
        assert_eq!(rows[3][4], "{{TERM YEAR}}");
        assert_eq!(t.sections[2].total_line(), "Total\t\t{{ELECTIVE_TOTAL}}");
    }

    #[test]
    fn test_subtitle_uses_iso_date() {
        assert_eq!(template().subtitle(), "Generated: 2025-01-15");
    }

    #[test]
    fn test_placeholders_in_document_order() {
        let names: Vec<_> = template().placeholders().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "CORE_TOTAL",
                "CODE",
                "TITLE",
                "CREDITS",
                "GRADE",
                "TERM YEAR",
                "ARC_TOTAL",
                "ELECTIVE_TOTAL",
                "DISS_TOTAL",
                "OVERALL_TOTAL",
                "HOURS_COMPLETED",
                "RESIDENCY_SEMESTERS",
                "NOTES",
            ]
        );
    }

    #[test]
    fn test_fixed_table_shapes() {
        let t = template();
        assert_eq!(t.summary.len(), 5);
        assert_eq!(t.timetable.len(), 8);
        assert_eq!(t.summary[4].label, "Total");
        assert_eq!(t.timetable[7].value, Placeholder::NOTES);
    }
}
