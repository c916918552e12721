/// Package assembly for Word documents.
use crate::common::Metadata;
use crate::ooxml::docx::props::{app_properties_xml, core_properties_xml};
use crate::ooxml::docx::writer::{MutableDocument, MutableStyle, generate_styles_xml};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, Part};

/// Part name of the main document part.
pub const DOCUMENT_PARTNAME: &str = "/word/document.xml";

const SETTINGS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:defaultTabStop w:val="720"/>"#,
    r#"<w:characterSpacingControl w:val="doNotCompress"/>"#,
    r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#,
    r#"</w:settings>"#,
);

/// A Word (.docx) package ready to be written.
///
/// # Examples
///
/// ```rust,no_run
/// use studyplan::Metadata;
/// use studyplan::ooxml::docx::Package;
/// use studyplan::ooxml::docx::writer::{MutableDocument, default_styles};
///
/// let mut doc = MutableDocument::new();
/// doc.add_paragraph_with_text("Hello");
/// let pkg = Package::new(&doc, &default_styles(), &Metadata::default())?;
/// pkg.save("hello.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    opc: OpcPackage,
}

impl Package {
    /// Assemble the document, styles, settings and property parts.
    pub fn new(
        document: &MutableDocument,
        styles: &[MutableStyle],
        metadata: &Metadata,
    ) -> Result<Self> {
        let mut opc = OpcPackage::new();

        let mut main = Part::new(
            DOCUMENT_PARTNAME,
            ct::WML_DOCUMENT_MAIN,
            document.to_xml()?.into_bytes(),
        )?;
        main.rels_mut().add(rt::STYLES, "styles.xml");
        main.rels_mut().add(rt::SETTINGS, "settings.xml");
        opc.add_part(main)?;

        opc.add_part(Part::new(
            "/word/styles.xml",
            ct::WML_STYLES,
            generate_styles_xml(styles)?.into_bytes(),
        )?)?;
        opc.add_part(Part::new(
            "/word/settings.xml",
            ct::WML_SETTINGS,
            SETTINGS_XML.as_bytes().to_vec(),
        )?)?;
        opc.add_part(Part::new(
            "/docProps/core.xml",
            ct::OPC_CORE_PROPERTIES,
            core_properties_xml(metadata).into_bytes(),
        )?)?;
        opc.add_part(Part::new(
            "/docProps/app.xml",
            ct::OFC_EXTENDED_PROPERTIES,
            app_properties_xml(metadata).into_bytes(),
        )?)?;

        let rels = opc.rels_mut();
        rels.add(rt::OFFICE_DOCUMENT, "word/document.xml");
        rels.add(rt::CORE_PROPERTIES, "docProps/core.xml");
        rels.add(rt::EXTENDED_PROPERTIES, "docProps/app.xml");

        Ok(Self { opc })
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Serialize the package to `.docx` bytes.
    #[cfg(feature = "ooxml")]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(crate::ooxml::opc::pkgwriter::PackageWriter::to_bytes(&self.opc)?)
    }

    /// Write the package to a file.
    #[cfg(feature = "ooxml")]
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        Ok(crate::ooxml::opc::pkgwriter::PackageWriter::write(path, &self.opc)?)
    }
}
