//! In-memory OPC package: a set of parts plus package-level relationships.
//!
//! Part names are absolute pack URIs (`/word/document.xml`); the ZIP member
//! name is the same string without the leading slash.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::rel::Relationships;

/// A single part of an OPC package.
#[derive(Debug, Clone)]
pub struct Part {
    partname: String,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    /// Create a part. `partname` must start with `/`.
    pub fn new(partname: &str, content_type: &str, blob: Vec<u8>) -> Result<Self> {
        validate_partname(partname)?;
        Ok(Self {
            partname: partname.to_string(),
            content_type: content_type.to_string(),
            blob,
            rels: Relationships::new(),
        })
    }

    #[inline]
    pub fn partname(&self) -> &str {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// An OPC package assembled in memory before it is written out.
#[derive(Debug, Clone, Default)]
pub struct OpcPackage {
    parts: Vec<Part>,
    rels: Relationships,
}

impl OpcPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part. Part names must be unique.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        if self.part(part.partname()).is_some() {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Look up a part by name.
    pub fn part(&self, partname: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.partname == partname)
    }

    /// Look up a part by name for modification.
    pub fn part_mut(&mut self, partname: &str) -> Result<&mut Part> {
        self.parts
            .iter_mut()
            .find(|p| p.partname == partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Iterate parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Package-level relationships (`/_rels/.rels`).
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

fn validate_partname(partname: &str) -> Result<()> {
    if !partname.starts_with('/') || partname.ends_with('/') || partname.len() < 2 {
        return Err(OpcError::InvalidPackUri(format!(
            "part name must start with '/' and name a file: {}",
            partname
        )));
    }
    Ok(())
}

/// ZIP member name for a part name (`/word/document.xml` -> `word/document.xml`).
#[inline]
pub fn membername(partname: &str) -> &str {
    partname.trim_start_matches('/')
}

/// Extension of a part name, without the dot.
pub fn extension(partname: &str) -> &str {
    let filename = partname.rsplit('/').next().unwrap_or(partname);
    filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

/// Part name of the relationships part for `partname`.
///
/// `/word/document.xml` -> `/word/_rels/document.xml.rels`; the package itself
/// (`/`) maps to `/_rels/.rels`.
pub fn rels_partname(partname: &str) -> String {
    if partname == "/" {
        return "/_rels/.rels".to_string();
    }
    match partname.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("/_rels/{}.rels", partname),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;

    #[test]
    fn test_rels_partname() {
        assert_eq!(rels_partname("/"), "/_rels/.rels");
        assert_eq!(
            rels_partname("/word/document.xml"),
            "/word/_rels/document.xml.rels"
        );
    }

    #[test]
    fn test_membername_and_extension() {
        assert_eq!(membername("/word/styles.xml"), "word/styles.xml");
        assert_eq!(extension("/word/styles.xml"), "xml");
        assert_eq!(extension("/_rels/.rels"), "rels");
        assert_eq!(extension("/word/noext"), "");
    }

    #[test]
    fn test_invalid_partname_rejected() {
        assert!(matches!(
            Part::new("word/document.xml", ct::XML, Vec::new()),
            Err(OpcError::InvalidPackUri(_))
        ));
    }

    #[test]
    fn test_duplicate_part_rejected() {
        let mut pkg = OpcPackage::new();
        pkg.add_part(Part::new("/a.xml", ct::XML, Vec::new()).unwrap())
            .unwrap();
        let dup = pkg.add_part(Part::new("/a.xml", ct::XML, Vec::new()).unwrap());
        assert!(matches!(dup, Err(OpcError::DuplicatePart(_))));
        assert!(pkg.part_mut("/missing.xml").is_err());
    }
}
