//! Plain-text extraction from WordprocessingML.
//!
//! Each paragraph becomes one line; table cells are paragraphs too, so a
//! table reads as one cell per line. `<w:tab/>` reads as a tab character.

use crate::common::xml::unescape_xml;
use crate::ooxml::docx::package::DOCUMENT_PARTNAME;
use crate::ooxml::error::Result;
use crate::ooxml::opc::package::membername;
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::Path;

/// Text of the main document part of a `.docx` file.
pub fn read_document_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut reader = PhysPkgReader::open(path)?;
    let xml = reader.blob_for(membername(DOCUMENT_PARTNAME))?;
    document_xml_text(&String::from_utf8_lossy(&xml))
}

/// Text of a `word/document.xml` part.
pub fn document_xml_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::with_capacity(xml.len() / 4);
    let mut raw = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                in_text = true;
                raw.clear();
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => {
                    in_text = false;
                    out.push_str(&unescape_xml(&raw));
                },
                b"p" => out.push('\n'),
                _ => {},
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" | b"p" => out.push('\n'),
                _ => {},
            },
            Event::Text(e) if in_text => raw.push_str(&String::from_utf8_lossy(&e)),
            Event::GeneralRef(r) if in_text => {
                let name = String::from_utf8_lossy(&r);
                match resolve_char_ref(&name) {
                    Some(c) => raw.push(c),
                    None => {
                        raw.push('&');
                        raw.push_str(&name);
                        raw.push(';');
                    },
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(out)
}

/// Resolve `#123` / `#x7B` character references.
fn resolve_char_ref(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_tabs_and_entities() {
        let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t xml:space="preserve">Total</w:t><w:tab/><w:tab/><w:t>{{CORE_TOTAL}}</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>A &amp; B &#123;</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(
            document_xml_text(xml).unwrap(),
            "Total\t\t{{CORE_TOTAL}}\n\nA & B {\n"
        );
    }

    #[test]
    fn test_text_outside_runs_ignored() {
        let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr>stray<w:r><w:t>kept</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(document_xml_text(xml).unwrap(), "kept\n");
    }

    #[test]
    fn test_char_refs() {
        assert_eq!(resolve_char_ref("#x7D"), Some('}'));
        assert_eq!(resolve_char_ref("#65"), Some('A'));
        assert_eq!(resolve_char_ref("amp"), None);
    }
}
