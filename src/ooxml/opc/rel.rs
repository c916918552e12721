/// Relationship-related objects for OPC packages.
///
/// This module provides types for managing relationships between parts in an OPC
/// package. Only internal relationships are needed by the template writer.
use crate::ooxml::opc::constants::namespace;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference relative to the source part's directory
    target_ref: String,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type URI.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }
}

/// Collection of relationships from one source (package or part).
///
/// IDs are assigned sequentially as `rId1`, `rId2`, ... in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its assigned rId.
    ///
    /// Adding the same type/target pair twice returns the existing rId.
    pub fn add(&mut self, reltype: &str, target_ref: &str) -> String {
        if let Some(existing) = self
            .rels
            .iter()
            .find(|r| r.reltype == reltype && r.target_ref == target_ref)
        {
            return existing.r_id.clone();
        }

        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype: reltype.to_string(),
            target_ref: target_ref.to_string(),
        });
        r_id
    }

    /// Number of relationships.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check whether there are no relationships.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Iterate relationships in rId order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Serialize to a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);
        xml.push('\n');

        for rel in &self.rels {
            xml.push_str(&format!(
                r#"  <Relationship Id="{}" Type="{}" Target="{}"/>"#,
                crate::common::xml::escape_xml(&rel.r_id),
                crate::common::xml::escape_xml(&rel.reltype),
                crate::common::xml::escape_xml(&rel.target_ref),
            ));
            xml.push('\n');
        }

        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_sequential_ids() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rt::OFFICE_DOCUMENT, "word/document.xml"), "rId1");
        assert_eq!(rels.add(rt::CORE_PROPERTIES, "docProps/core.xml"), "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_duplicate_returns_existing_id() {
        let mut rels = Relationships::new();
        rels.add(rt::STYLES, "styles.xml");
        assert_eq!(rels.add(rt::STYLES, "styles.xml"), "rId1");
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn test_to_xml() {
        let mut rels = Relationships::new();
        rels.add(rt::STYLES, "styles.xml");
        let xml = rels.to_xml();
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#));
        assert!(xml.ends_with("</Relationships>"));
    }
}
