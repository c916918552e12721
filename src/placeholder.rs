//! Placeholder tokens in generated files.
//!
//! A token is `{{NAME}}` where `NAME` is one or more of `A-Z`, `0-9`, `_` and
//! space, not starting with a space. [`extract`] lists the tokens still present
//! in a `.docx` or `.rtf` file and [`fill`] substitutes values for them.

use crate::common::{Error, Result};
use crate::plan::token_for;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Kind of file a token operation works on, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Docx,
    Rtf,
}

impl FileKind {
    fn of(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("docx") => Ok(Self::Docx),
            Some("rtf") => Ok(Self::Rtf),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_' || b == b' '
}

/// Distinct token names in `text`, in order of first appearance.
///
/// ```
/// use studyplan::placeholder::scan_text;
/// let names = scan_text("{{CODE}} and {{TERM YEAR}}, again {{CODE}}; not {{ X}} or {{x}}");
/// assert_eq!(names, vec!["CODE", "TERM YEAR"]);
/// ```
pub fn scan_text(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut names: Vec<String> = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find("{{") {
        let start = pos + offset + 2;
        let len = bytes[start..]
            .iter()
            .take_while(|&&b| is_name_byte(b))
            .count();
        let end = start + len;

        if len > 0 && bytes[start] != b' ' && bytes[end..].starts_with(b"}}") {
            let name = &text[start..end];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            pos = end + 2;
        } else {
            // "{{{X}}" still holds a token one byte further on
            pos = pos + offset + 1;
        }
    }
    names
}

/// Token names present in a generated `.docx` or `.rtf` file.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = match FileKind::of(path)? {
        FileKind::Docx => docx_text(path)?,
        FileKind::Rtf => {
            let bytes = std::fs::read(path)?;
            crate::rtf::plain_text(&String::from_utf8_lossy(&bytes))?
        },
    };
    let names = scan_text(&text);
    debug!(path = %path.display(), tokens = names.len(), "extracted placeholders");
    Ok(names)
}

#[cfg(feature = "ooxml")]
fn docx_text(path: &Path) -> Result<String> {
    Ok(crate::ooxml::docx::reader::read_document_text(path)?)
}

#[cfg(not(feature = "ooxml"))]
fn docx_text(_path: &Path) -> Result<String> {
    Err(Error::FeatureDisabled("ooxml".to_string()))
}

/// A YAML scalar taken exactly as written, so `007` stays `007` and `3.0`
/// stays `3.0`. Null reads as an empty string.
#[derive(Debug)]
struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(|text| Self(text.unwrap_or_default()))
    }
}

/// Values to substitute, keyed by token name.
///
/// Keys may be written bare (`CORE_TOTAL`) or as tokens (`"{{CORE_TOTAL}}"`).
///
/// ```yaml
/// CORE_TOTAL: 15
/// "TERM YEAR": Fall 2025
/// NOTES: Transfer credit pending
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values(BTreeMap<String, String>);

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of token `name`.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(normalize_key(name.as_ref()), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a YAML mapping of token names to scalars.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: BTreeMap<String, ScalarText> = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("failed to parse values: {}", e)))?;

        let mut values = Self::new();
        for (key, value) in raw {
            values.insert(key, value.0);
        }
        Ok(values)
    }

    /// Load a YAML value file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read values file at {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Build a replacer mapping each `{{NAME}}` (as encoded by `encode`) to
    /// its encoded value.
    fn replacer<F>(&self, encode: F) -> Result<Replacer>
    where
        F: Fn(&str) -> String,
    {
        let names: Vec<String> = self.0.keys().cloned().collect();
        let patterns: Vec<String> = names.iter().map(|n| encode(&token_for(n))).collect();
        let replacements: Vec<String> = self.0.values().map(|v| encode(v)).collect();
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| Error::Other(format!("failed to build token matcher: {}", e)))?;

        Ok(Replacer {
            automaton,
            names,
            replacements,
            hits: vec![0; patterns.len()],
        })
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim();
    key.strip_prefix("{{")
        .and_then(|k| k.strip_suffix("}}"))
        .unwrap_or(key)
        .to_string()
}

/// Multi-token replacement that counts hits per token.
struct Replacer {
    automaton: AhoCorasick,
    names: Vec<String>,
    replacements: Vec<String>,
    hits: Vec<usize>,
}

impl Replacer {
    fn apply(&mut self, haystack: &[u8]) -> Option<Vec<u8>> {
        let mut found = false;
        for m in self.automaton.find_iter(haystack) {
            self.hits[m.pattern().as_usize()] += 1;
            found = true;
        }
        found.then(|| self.automaton.replace_all_bytes(haystack, &self.replacements))
    }

    fn filled(&self) -> (usize, Vec<String>) {
        let replaced = self.hits.iter().sum();
        let filled = self
            .names
            .iter()
            .zip(&self.hits)
            .filter(|&(_, &n)| n > 0)
            .map(|(name, _)| name.clone())
            .collect();
        (replaced, filled)
    }
}

/// Outcome of [`fill`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Number of token occurrences replaced
    pub replaced: usize,
    /// Names that had a value and occurred at least once
    pub filled: Vec<String>,
    /// Names still present in the output
    pub unfilled: Vec<String>,
}

/// Replace tokens in `input` with `values` and write the result to `output`.
///
/// Values are escaped for the target format. Tokens without a value are left
/// as they are and listed in [`FillReport::unfilled`].
pub fn fill<P, Q>(input: P, output: Q, values: &Values) -> Result<FillReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let kind = FileKind::of(input)?;
    let data = std::fs::read(input)?;

    let (replaced, filled) = match kind {
        FileKind::Docx => {
            let (bytes, counts) = fill_docx(data, values)?;
            std::fs::write(output, bytes)?;
            counts
        },
        FileKind::Rtf => {
            let mut replacer = values.replacer(crate::rtf::escape_text)?;
            let bytes = replacer.apply(&data).unwrap_or(data);
            std::fs::write(output, bytes)?;
            replacer.filled()
        },
    };

    let report = FillReport {
        replaced,
        filled,
        unfilled: extract(output)?,
    };
    debug!(
        output = %output.display(),
        replaced = report.replaced,
        unfilled = report.unfilled.len(),
        "filled placeholders"
    );
    Ok(report)
}

#[cfg(feature = "ooxml")]
fn fill_docx(data: Vec<u8>, values: &Values) -> Result<(Vec<u8>, (usize, Vec<String>))> {
    use crate::common::xml::escape_xml;
    use crate::ooxml::opc::phys_pkg::rewrite_members;

    let mut replacer = values.replacer(escape_xml)?;
    let bytes = rewrite_members(data, |name, blob| {
        if name.starts_with("word/") && name.ends_with(".xml") {
            Ok(replacer.apply(blob))
        } else {
            Ok(None)
        }
    })?;
    Ok((bytes, replacer.filled()))
}

#[cfg(not(feature = "ooxml"))]
fn fill_docx(_data: Vec<u8>, _values: &Values) -> Result<(Vec<u8>, (usize, Vec<String>))> {
    Err(Error::FeatureDisabled("ooxml".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Metadata;
    use crate::plan::PlanTemplate;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn template() -> PlanTemplate {
        PlanTemplate::standard(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    #[test]
    fn test_scan_rejects_malformed_tokens() {
        assert!(scan_text("{{}} {{ LEADING}} {{lower}} {{OPEN").is_empty());
        assert_eq!(scan_text("{{{CODE}}}"), vec!["CODE"]);
        assert_eq!(scan_text("{{TRAILING }}"), vec!["TRAILING "]);
    }

    #[test]
    fn test_scan_template_text_matches_model() {
        let t = template();
        let mut text = String::new();
        for section in &t.sections {
            text.push_str(&section.heading);
            for row in section.table_rows() {
                text.push_str(&row.join("\t"));
            }
        }
        for row in t.summary.iter().chain(t.timetable.iter()) {
            text.push_str(&row.value.token());
        }
        let expected: Vec<String> = t.placeholders().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(scan_text(&text), expected);
    }

    #[test]
    fn test_values_yaml() {
        let values = Values::from_yaml_str(
            "CORE_TOTAL: 15\n\"{{TERM YEAR}}\": Fall 2025\nNOTES: \"a & b\"\nGPA: 3.5\n",
        )
        .unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values.get("CORE_TOTAL"), Some("15"));
        assert_eq!(values.get("TERM YEAR"), Some("Fall 2025"));
        assert_eq!(values.get("NOTES"), Some("a & b"));
        assert_eq!(values.get("GPA"), Some("3.5"));
    }

    #[test]
    fn test_values_keep_scalar_text() {
        let values = Values::from_yaml_str(
            "CREDITS: 3.0\nCODE: 007\nGRADE: 3.50\nNOTES:\nCORE_TOTAL: 15\nRESIDENCY_SEMESTERS: ~\n",
        )
        .unwrap();
        assert_eq!(values.get("CREDITS"), Some("3.0"));
        assert_eq!(values.get("CODE"), Some("007"));
        assert_eq!(values.get("GRADE"), Some("3.50"));
        assert_eq!(values.get("NOTES"), Some(""));
        assert_eq!(values.get("CORE_TOTAL"), Some("15"));
        assert_eq!(values.get("RESIDENCY_SEMESTERS"), Some(""));
    }

    #[test]
    fn test_fill_writes_values_verbatim() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plan.rtf");
        let output = dir.path().join("filled.rtf");
        crate::rtf::template::save(&template(), &Metadata::default(), &input).unwrap();

        let values = Values::from_yaml_str("CREDITS: 3.0\nCODE: 007\nNOTES:\n").unwrap();
        let report = fill(&input, &output, &values).unwrap();
        assert_eq!(report.filled, vec!["CODE", "CREDITS", "NOTES"]);

        let text = crate::rtf::plain_text(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert!(text.contains("007\t{{TITLE}}\t3.0\t"));
        assert!(text.contains("Notes\t\t\n"));
        assert!(!text.contains("{{NOTES}}"));
    }

    #[test]
    fn test_values_bad_yaml() {
        assert!(matches!(
            Values::from_yaml_str("- not\n- a map\n"),
            Err(Error::Config(_))
        ));
        assert!(Values::from_yaml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        assert!(matches!(extract(&path), Err(Error::UnsupportedFormat(_))));
        assert!(matches!(
            fill(&path, dir.path().join("out.pdf"), &Values::new()),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_fill_rtf() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plan.rtf");
        let output = dir.path().join("filled.rtf");
        crate::rtf::template::save(&template(), &Metadata::default(), &input).unwrap();

        let mut values = Values::new();
        values.insert("CORE_TOTAL", "15");
        values.insert("NOTES", "{braces} & caf\u{e9}");
        values.insert("UNUSED", "x");
        let report = fill(&input, &output, &values).unwrap();

        // heading, total line and summary row
        assert_eq!(report.replaced, 4);
        assert_eq!(report.filled, vec!["CORE_TOTAL", "NOTES"]);
        assert!(!report.unfilled.contains(&"CORE_TOTAL".to_string()));
        assert!(report.unfilled.contains(&"ARC_TOTAL".to_string()));

        let rtf = std::fs::read_to_string(&output).unwrap();
        assert!(rtf.contains(r"\{braces\} & caf\u233?"));
        let text = crate::rtf::plain_text(&rtf).unwrap();
        assert!(text.contains("A.  Core (15 credits)\n"));
        assert!(text.contains("Notes\t{braces} & caf\u{e9}\t"));
    }

    #[cfg(feature = "ooxml")]
    #[test]
    fn test_fill_docx() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plan.docx");
        let output = dir.path().join("filled.docx");
        crate::ooxml::docx::template::save(&template(), &Metadata::default(), &input).unwrap();
        assert_eq!(extract(&input).unwrap().len(), 14);

        let mut values = Values::new();
        values.insert("{{TERM YEAR}}", "Fall <2025>");
        let report = fill(&input, &output, &values).unwrap();

        // three rows in each of four sections, five timetable rows
        assert_eq!(report.replaced, 17);
        assert_eq!(report.filled, vec!["TERM YEAR"]);
        assert_eq!(report.unfilled.len(), 13);

        let text = crate::ooxml::docx::reader::read_document_text(&output).unwrap();
        assert!(text.contains("Fall <2025>"));
        assert!(!text.contains("{{TERM YEAR}}"));
    }

    proptest! {
        #[test]
        fn prop_scan_finds_every_wellformed_token(name in "[A-Z0-9_][A-Z0-9_ ]{0,15}", prefix in "[a-z .,]{0,10}") {
            let text = format!("{}{}{}", prefix, token_for(&name), prefix);
            prop_assert_eq!(scan_text(&text), vec![name]);
        }
    }
}
