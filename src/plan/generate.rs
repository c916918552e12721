use super::PlanTemplate;
use crate::common::{Metadata, Result};
use crate::config::{Format, GeneratorConfig};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The file [`generate`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Created {
    /// Word output succeeded
    Docx { path: PathBuf },
    /// RTF was written instead
    Rtf {
        path: PathBuf,
        /// Why the Word output was not produced; `None` when RTF was requested
        reason: Option<String>,
    },
}

impl Created {
    pub fn path(&self) -> &Path {
        match self {
            Self::Docx { path } | Self::Rtf { path, .. } => path,
        }
    }
}

/// Write the plan-of-study template into `config.output_dir`.
///
/// With [`Format::Auto`] any failure of the Word output, including the
/// `ooxml` feature being compiled out, is logged and the template is written
/// as RTF instead. Only a failure of the RTF output itself is returned.
pub fn generate(config: &GeneratorConfig) -> Result<Created> {
    std::fs::create_dir_all(&config.output_dir)?;

    let template = PlanTemplate::standard(config.generated_on());
    let metadata = Metadata::for_template(config.author.clone(), Utc::now());
    debug!(
        output_dir = %config.output_dir.display(),
        format = config.format.as_str(),
        generated_on = %template.generated_on,
        "generating template"
    );

    match config.format {
        Format::Docx => write_docx(&template, &metadata, config.docx_path()),
        Format::Rtf => write_rtf(&template, &metadata, config.rtf_path(), None),
        Format::Auto => match write_docx(&template, &metadata, config.docx_path()) {
            Ok(created) => Ok(created),
            Err(err) => {
                warn!(error = %err, "Word output failed, falling back to RTF");
                write_rtf(&template, &metadata, config.rtf_path(), Some(err.to_string()))
            },
        },
    }
}

fn write_docx(template: &PlanTemplate, metadata: &Metadata, path: PathBuf) -> Result<Created> {
    crate::ooxml::docx::template::save(template, metadata, &path)?;
    info!(path = %path.display(), "created Word template");
    Ok(Created::Docx { path })
}

fn write_rtf(
    template: &PlanTemplate,
    metadata: &Metadata,
    path: PathBuf,
    reason: Option<String>,
) -> Result<Created> {
    crate::rtf::template::save(template, metadata, &path)?;
    info!(path = %path.display(), "created RTF template");
    Ok(Created::Rtf { path, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::extract;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn config(dir: &Path, format: Format) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: dir.to_path_buf(),
            format,
            generated_on: NaiveDate::from_ymd_opt(2025, 1, 15),
            ..GeneratorConfig::default()
        }
    }

    fn expected_tokens() -> Vec<String> {
        let mut names: Vec<String> = PlanTemplate::standard(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
            .placeholders()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        names.push("LIKE_THIS".to_string());
        names.sort();
        names
    }

    #[cfg(feature = "ooxml")]
    #[test]
    fn test_generate_docx() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir.path().join("out"), Format::Auto);
        let created = generate(&config).unwrap();

        assert_eq!(created, Created::Docx { path: config.docx_path() });
        let mut tokens = extract(created.path()).unwrap();
        tokens.sort();
        assert_eq!(tokens, expected_tokens());

        let text = crate::ooxml::docx::reader::read_document_text(created.path()).unwrap();
        assert!(text.starts_with("PROPOSED PLAN OF STUDY\nGenerated: 2025-01-15\n"));
        assert!(text.contains("PROJECTED TIMETABLE\n"));
    }

    const HEADINGS: [&str; 6] = [
        "A.  Core ({{CORE_TOTAL}} credits)",
        "B.  Additional Required Core for Measurement and Quantitative Methods Concentration ({{ARC_TOTAL}} Hours)",
        "C.  Electives ({{ELECTIVE_TOTAL}} Hours)",
        "D.  Dissertation Hours ({{DISS_TOTAL}})",
        "SUMMARY OF PROPOSED COURSE OF STUDY CREDIT HOURS",
        "PROJECTED TIMETABLE",
    ];

    fn output_text(created: &Created) -> String {
        match created {
            #[cfg(feature = "ooxml")]
            Created::Docx { path } => {
                crate::ooxml::docx::reader::read_document_text(path).unwrap()
            },
            #[cfg(not(feature = "ooxml"))]
            Created::Docx { .. } => unreachable!("Word output needs the ooxml feature"),
            Created::Rtf { path, .. } => {
                crate::rtf::plain_text(&std::fs::read_to_string(path).unwrap()).unwrap()
            },
        }
    }

    #[test]
    fn test_every_format_carries_headings_and_tokens() {
        let mut formats = vec![Format::Rtf];
        if cfg!(feature = "ooxml") {
            formats.push(Format::Docx);
        }

        for format in formats {
            let dir = TempDir::new().unwrap();
            let config = config(dir.path(), format);
            let created = generate(&config).unwrap();
            let expected_path = match format {
                Format::Docx => config.docx_path(),
                _ => config.rtf_path(),
            };
            assert_eq!(created.path(), expected_path.as_path(), "{:?}", format);

            let text = output_text(&created);
            assert!(
                text.starts_with("PROPOSED PLAN OF STUDY\nGenerated: 2025-01-15\n"),
                "{:?}",
                format
            );
            for heading in HEADINGS {
                assert!(
                    text.lines().any(|line| line == heading),
                    "{:?} output lacks heading {:?}",
                    format,
                    heading
                );
            }
            for section in ["CORE_TOTAL", "ARC_TOTAL", "ELECTIVE_TOTAL", "DISS_TOTAL"] {
                let total = format!("Total\t\t{{{{{}}}}}", section);
                assert!(text.lines().any(|line| line == total), "{:?}", format);
            }

            let mut tokens = extract(created.path()).unwrap();
            tokens.sort();
            assert_eq!(tokens, expected_tokens(), "{:?}", format);
        }
    }

    #[cfg(feature = "ooxml")]
    #[test]
    fn test_generated_docx_has_every_part() {
        use crate::ooxml::opc::phys_pkg::PhysPkgReader;

        let dir = TempDir::new().unwrap();
        let created = generate(&config(dir.path(), Format::Docx)).unwrap();

        let reader = PhysPkgReader::open(created.path()).unwrap();
        let mut members = reader.member_names();
        members.sort();
        assert_eq!(
            members,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "docProps/app.xml",
                "docProps/core.xml",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/settings.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_generate_rtf_on_request() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path(), Format::Rtf);
        let created = generate(&config).unwrap();

        assert_eq!(
            created,
            Created::Rtf {
                path: config.rtf_path(),
                reason: None
            }
        );
        assert!(!config.docx_path().exists());
        let mut tokens = extract(created.path()).unwrap();
        tokens.sort();
        assert_eq!(tokens, expected_tokens());
    }

    #[test]
    fn test_falls_back_when_docx_unwritable() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path(), Format::Auto);
        // A directory in the way of the .docx file
        std::fs::create_dir(config.docx_path()).unwrap();

        match generate(&config).unwrap() {
            Created::Rtf { path, reason } => {
                assert_eq!(path, config.rtf_path());
                assert!(!reason.unwrap_or_default().is_empty());
                let text = std::fs::read_to_string(&path).unwrap();
                assert!(text.starts_with("{\\rtf1"));
            },
            other => panic!("expected RTF fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_docx_only_does_not_fall_back() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path(), Format::Docx);
        std::fs::create_dir(config.docx_path()).unwrap();

        assert!(generate(&config).is_err());
        assert!(!config.rtf_path().exists());
    }
}
