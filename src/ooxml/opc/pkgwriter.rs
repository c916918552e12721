//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] into ZIP bytes: `[Content_Types].xml` first,
//! then `_rels/.rels`, then every part followed by its relationships part.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::{OpcPackage, extension, membername, rels_partname};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::collections::BTreeMap;
use std::path::Path;

const CONTENT_TYPES_MEMBER: &str = "[Content_Types].xml";

/// Package writer that serializes an OPC package to a ZIP file.
///
/// # Example
///
/// ```no_run
/// use studyplan::ooxml::opc::package::OpcPackage;
/// use studyplan::ooxml::opc::pkgwriter::PackageWriter;
///
/// let pkg = OpcPackage::new();
/// PackageWriter::write("output.docx", &pkg)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        let cti = ContentTypesItem::from_package(package);
        phys_writer.write(CONTENT_TYPES_MEMBER, cti.to_xml().as_bytes())?;

        phys_writer.write(
            membername(&rels_partname("/")),
            package.rels().to_xml().as_bytes(),
        )?;

        for part in package.iter_parts() {
            phys_writer.write(membername(part.partname()), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = rels_partname(part.partname());
                phys_writer.write(membername(&rels_uri), part.rels().to_xml().as_bytes())?;
            }
        }

        phys_writer.finish()
    }
}

/// Helper for building `[Content_Types].xml`.
///
/// Well-known extension/type pairs become `Default` elements; everything else
/// gets an `Override` keyed by part name.
struct ContentTypesItem {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &str, content_type: &str) {
        let ext = extension(partname);
        if matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS) | ("xml", ct::XML)
        ) {
            self.defaults.insert(ext.to_string(), content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);
        xml.push('\n');

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
            xml.push('\n');
        }

        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            ));
            xml.push('\n');
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use crate::ooxml::opc::package::Part;
    use crate::ooxml::opc::phys_pkg::PhysPkgReader;

    fn package() -> OpcPackage {
        let mut pkg = OpcPackage::new();
        let mut doc = Part::new(
            "/word/document.xml",
            ct::WML_DOCUMENT_MAIN,
            b"<w:document/>".to_vec(),
        )
        .unwrap();
        doc.rels_mut().add(rt::STYLES, "styles.xml");
        pkg.add_part(doc).unwrap();
        pkg.add_part(Part::new("/word/styles.xml", ct::WML_STYLES, b"<w:styles/>".to_vec()).unwrap())
            .unwrap();
        pkg.rels_mut().add(rt::OFFICE_DOCUMENT, "word/document.xml");
        pkg
    }

    #[test]
    fn test_content_types_xml() {
        let xml = ContentTypesItem::from_package(&package()).to_xml();
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(&format!(
            r#"<Override PartName="/word/document.xml" ContentType="{}"/>"#,
            ct::WML_DOCUMENT_MAIN
        )));
        assert!(xml.contains(r#"<Override PartName="/word/styles.xml""#));
    }

    #[test]
    fn test_member_layout() {
        let bytes = PackageWriter::to_bytes(&package()).unwrap();
        let reader = PhysPkgReader::from_bytes(bytes).unwrap();
        assert_eq!(
            reader.member_names(),
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/document.xml",
                "word/_rels/document.xml.rels",
                "word/styles.xml",
            ]
        );
    }
}
