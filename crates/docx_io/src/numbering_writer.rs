//! word/numbering.xml
//!
//! Each registered definition becomes one `w:abstractNum` plus a `w:num`
//! mapping the public numbering id onto it. Ids line up one to one, the
//! same scheme every major producer uses.

use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::XML_DECLARATION;
use doc_model::{Document, ListLevel};

pub struct NumberingWriter;

impl NumberingWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &Document) -> DocxResult<String> {
        let mut xml = String::with_capacity(4 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, namespaces::W));

        for definition in doc.numbering.all() {
            xml.push_str(&format!(
                r#"<w:abstractNum w:abstractNumId="{}">"#,
                definition.id.0
            ));
            xml.push_str(&format!(r#"<w:nsid w:val="{}"/>"#, definition.nsid));
            let multi = if definition.multi_level {
                "multilevel"
            } else {
                "singleLevel"
            };
            xml.push_str(&format!(r#"<w:multiLevelType w:val="{}"/>"#, multi));
            for level in &definition.levels {
                self.write_level(&mut xml, level);
            }
            xml.push_str("</w:abstractNum>");
        }
        for definition in doc.numbering.all() {
            xml.push_str(&format!(
                r#"<w:num w:numId="{id}"><w:abstractNumId w:val="{id}"/></w:num>"#,
                id = definition.id.0
            ));
        }

        xml.push_str("</w:numbering>");
        Ok(xml)
    }

    fn write_level(&self, xml: &mut String, level: &ListLevel) {
        xml.push_str(&format!(r#"<w:lvl w:ilvl="{}">"#, level.level));
        xml.push_str(&format!(r#"<w:start w:val="{}"/>"#, level.start));
        xml.push_str(&format!(
            r#"<w:numFmt w:val="{}"/>"#,
            level.format.ooxml_value()
        ));
        xml.push_str(&format!(
            r#"<w:suff w:val="{}"/>"#,
            level.suffix.ooxml_value()
        ));
        xml.push_str(&format!(
            r#"<w:lvlText w:val="{}"/>"#,
            escape_xml(&level.text)
        ));
        xml.push_str(&format!(
            r#"<w:lvlJc w:val="{}"/>"#,
            level.alignment.ooxml_value()
        ));
        xml.push_str(&format!(
            r#"<w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr>"#,
            level.indent_left.0, level.hanging.0
        ));
        if let Some(font) = &level.font {
            let font = escape_xml(font);
            xml.push_str(&format!(
                r#"<w:rPr><w:rFonts w:ascii="{f}" w:hAnsi="{f}" w:hint="default"/></w:rPr>"#,
                f = font
            ));
        }
        xml.push_str("</w:lvl>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_definition() {
        let mut doc = Document::new();
        let id = doc.numbering.register_decimal();
        let xml = NumberingWriter::new().write(&doc).unwrap();
        assert!(xml.contains(&format!(r#"<w:abstractNum w:abstractNumId="{}">"#, id.0)));
        assert!(xml.contains(r#"<w:numFmt w:val="decimal"/>"#));
        assert!(xml.contains(r#"<w:lvlText w:val="%1."/>"#));
        assert!(xml.contains(&format!(
            r#"<w:num w:numId="{id}"><w:abstractNumId w:val="{id}"/></w:num>"#,
            id = id.0
        )));
    }

    #[test]
    fn test_bullet_definition_carries_font() {
        let mut doc = Document::new();
        doc.numbering.register_bullet();
        let xml = NumberingWriter::new().write(&doc).unwrap();
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains("Symbol"));
    }

    #[test]
    fn test_multi_level_definition() {
        let mut doc = Document::new();
        doc.numbering
            .register(vec![ListLevel::decimal(0), ListLevel::decimal(1)]);
        let xml = NumberingWriter::new().write(&doc).unwrap();
        assert!(xml.contains(r#"<w:multiLevelType w:val="multilevel"/>"#));
        assert!(xml.contains(r#"<w:lvl w:ilvl="1">"#));
        assert!(xml.contains(r#"<w:ind w:left="1440" w:hanging="360"/>"#));
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut doc = Document::new();
        let first = doc.numbering.register_decimal();
        let second = doc.numbering.register_bullet();
        assert_eq!(first.0 + 1, second.0);
    }
}
