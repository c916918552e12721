//! Document property parts (`docProps/core.xml` and `docProps/app.xml`).

use crate::common::Metadata;
use crate::common::xml::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};

fn push_element(xml: &mut String, tag: &str, value: Option<&str>) {
    if let Some(value) = value {
        xml.push('<');
        xml.push_str(tag);
        xml.push('>');
        xml.push_str(&escape_xml(value));
        xml.push_str("</");
        xml.push_str(tag);
        xml.push('>');
    }
}

fn push_date(xml: &mut String, tag: &str, value: Option<&DateTime<Utc>>) {
    if let Some(value) = value {
        xml.push('<');
        xml.push_str(tag);
        xml.push_str(" xsi:type=\"dcterms:W3CDTF\">");
        xml.push_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true));
        xml.push_str("</");
        xml.push_str(tag);
        xml.push('>');
    }
}

/// Generate `docProps/core.xml` from document metadata.
pub fn core_properties_xml(metadata: &Metadata) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);

    push_element(&mut xml, "dc:title", metadata.title.as_deref());
    push_element(&mut xml, "dc:subject", metadata.subject.as_deref());
    push_element(&mut xml, "dc:creator", metadata.author.as_deref());
    push_element(&mut xml, "cp:keywords", metadata.keywords.as_deref());
    push_element(&mut xml, "cp:lastModifiedBy", metadata.author.as_deref());
    push_date(&mut xml, "dcterms:created", metadata.created.as_ref());
    push_date(&mut xml, "dcterms:modified", metadata.modified.as_ref());

    xml.push_str("</cp:coreProperties>");
    xml
}

/// Generate `docProps/app.xml` (extended properties).
pub fn app_properties_xml(metadata: &Metadata) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    push_element(&mut xml, "Application", metadata.application.as_deref());
    xml.push_str("<DocSecurity>0</DocSecurity>");
    xml.push_str("<ScaleCrop>false</ScaleCrop>");
    xml.push_str("<LinksUpToDate>false</LinksUpToDate>");
    xml.push_str("<SharedDoc>false</SharedDoc>");
    xml.push_str("<HyperlinksChanged>false</HyperlinksChanged>");
    xml.push_str("</Properties>");
    xml
}
