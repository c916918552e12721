//! Generator configuration.
//!
//! Settings come from, in order of precedence: CLI flag > environment variable >
//! YAML config file > built-in default. The library only knows about the last
//! three; the binary applies its flags on top.
//!
//! ```yaml
//! output_dir: /mnt/data
//! format: auto
//! generated_on: 2025-01-15
//! author: Graduate Office
//! ```

use crate::common::{Error, Result};
use crate::plan::DEFAULT_FILE_STEM;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding [`GeneratorConfig::output_dir`].
pub const ENV_OUTPUT_DIR: &str = "STUDYPLAN_OUTPUT_DIR";
/// Environment variable overriding [`GeneratorConfig::format`].
pub const ENV_FORMAT: &str = "STUDYPLAN_FORMAT";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Try Word first, fall back to RTF on any failure
    #[default]
    Auto,
    /// Word only; failures are returned to the caller
    Docx,
    /// RTF only
    Rtf,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Docx => "docx",
            Self::Rtf => "rtf",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "docx" => Ok(Self::Docx),
            "rtf" => Ok(Self::Rtf),
            other => Err(Error::Config(format!(
                "unknown format '{}', expected auto, docx or rtf",
                other
            ))),
        }
    }
}

/// Settings for [`crate::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory the template is written into (created if missing)
    pub output_dir: PathBuf,
    /// File name without extension
    pub file_stem: String,
    /// Which format(s) to attempt
    pub format: Format,
    /// Date printed under the title; today when unset
    pub generated_on: Option<NaiveDate>,
    /// Author recorded in the document properties
    pub author: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            format: Format::Auto,
            generated_on: None,
            author: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse a YAML config document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Load a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config file at {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Apply `STUDYPLAN_*` environment overrides from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides from an arbitrary lookup.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup(ENV_FORMAT).filter(|v| !v.is_empty()) {
            self.format = format.parse()?;
        }
        Ok(self)
    }

    /// The configured date, or today's local date.
    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Target path of the Word output.
    pub fn docx_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.docx", self.file_stem))
    }

    /// Target path of the RTF output.
    pub fn rtf_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.rtf", self.file_stem))
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}
