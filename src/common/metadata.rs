/// Document properties written into generated templates.
///
/// The Word writer stores these in `docProps/core.xml` and `docProps/app.xml`;
/// the RTF writer stores them in the `\info` group.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application name recorded in generated documents.
pub const APPLICATION: &str = "studyplan";

/// Unified metadata structure for generated documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document author/creator
    pub author: Option<String>,
    /// Keywords associated with the document
    pub keywords: Option<String>,
    /// Creation time
    pub created: Option<DateTime<Utc>>,
    /// Last modification time
    pub modified: Option<DateTime<Utc>>,
    /// Application that created the document
    pub application: Option<String>,
}

impl Metadata {
    /// Metadata for a freshly generated plan-of-study template.
    ///
    /// Creation and modification times are both set to `now`.
    pub fn for_template(author: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            title: Some("Proposed Plan of Study".to_string()),
            subject: Some("Plan of study template".to_string()),
            author,
            keywords: Some("plan of study; template".to_string()),
            created: Some(now),
            modified: Some(now),
            application: Some(APPLICATION.to_string()),
        }
    }

    /// Check if the metadata contains any actual data.
    pub fn has_data(&self) -> bool {
        self.title.is_some()
            || self.subject.is_some()
            || self.author.is_some()
            || self.keywords.is_some()
            || self.created.is_some()
            || self.modified.is_some()
            || self.application.is_some()
    }
}
