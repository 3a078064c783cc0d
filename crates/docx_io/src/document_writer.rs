//! word/document.xml
//!
//! The body concatenates each section's content. Every section except the
//! last ends with a paragraph holding its `w:sectPr`; the last section's
//! properties sit directly at the end of the body.

use crate::element_writer::ElementWriter;
use crate::error::{DocxError, DocxResult};
use crate::namespaces;
use crate::rel_index::RelIndex;
use crate::XML_DECLARATION;
use doc_model::{Document, NodeHandle, Orientation, Payload, SectionStyle};

pub struct DocumentWriter;

impl DocumentWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &Document, index: &RelIndex) -> DocxResult<String> {
        let sections = doc.sections();
        if sections.is_empty() {
            return Err(DocxError::EmptyDocument);
        }

        let mut xml = String::with_capacity(16 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:v="{}" xmlns:o="{}">"#,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::V,
            namespaces::O
        ));
        xml.push_str("<w:body>");

        let writer = ElementWriter::new(doc, index);
        let last = sections.len() - 1;
        for (position, &section) in sections.iter().enumerate() {
            let node = doc.node(section)?;
            writer.write_block_children(&mut xml, node)?;
            let Payload::Section { style } = &node.payload else {
                continue;
            };
            if position == last {
                self.write_sectpr(&mut xml, doc, index, section, style)?;
            } else {
                // section break carried by an otherwise empty paragraph
                xml.push_str("<w:p><w:pPr>");
                self.write_sectpr(&mut xml, doc, index, section, style)?;
                xml.push_str("</w:pPr></w:p>");
            }
        }

        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    fn write_sectpr(
        &self,
        xml: &mut String,
        doc: &Document,
        index: &RelIndex,
        section: NodeHandle,
        style: &SectionStyle,
    ) -> DocxResult<()> {
        xml.push_str("<w:sectPr>");
        for header in doc.headers_of(section) {
            let node = doc.node(header)?;
            let Payload::Header { slot } = &node.payload else {
                continue;
            };
            xml.push_str(&format!(
                r#"<w:headerReference w:type="{}" r:id="rId{}"/>"#,
                slot.ooxml_value(),
                index.header_rid(header)?
            ));
        }
        for footer in doc.footers_of(section) {
            let node = doc.node(footer)?;
            let Payload::Footer { slot } = &node.payload else {
                continue;
            };
            xml.push_str(&format!(
                r#"<w:footerReference w:type="{}" r:id="rId{}"/>"#,
                slot.ooxml_value(),
                index.footer_rid(footer)?
            ));
        }
        if let Some(props) = &style.footnote_properties {
            xml.push_str("<w:footnotePr>");
            if let Some(position) = props.position {
                xml.push_str(&format!(r#"<w:pos w:val="{}"/>"#, position.ooxml_value()));
            }
            if let Some(format) = props.number_format {
                xml.push_str(&format!(
                    r#"<w:numFmt w:val="{}"/>"#,
                    format.ooxml_value()
                ));
            }
            if let Some(start) = props.number_start {
                xml.push_str(&format!(r#"<w:numStart w:val="{}"/>"#, start));
            }
            if let Some(restart) = props.restart {
                xml.push_str(&format!(
                    r#"<w:numRestart w:val="{}"/>"#,
                    restart.ooxml_value()
                ));
            }
            xml.push_str("</w:footnotePr>");
        }
        let orient = match style.orientation {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        };
        xml.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}" w:orient="{}"/>"#,
            style.page_width.0, style.page_height.0, orient
        ));
        xml.push_str(&format!(
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="{}"/>"#,
            style.margin_top.0,
            style.margin_right.0,
            style.margin_bottom.0,
            style.margin_left.0,
            style.header_height.0,
            style.footer_height.0,
            style.gutter.0
        ));
        if style.columns > 1 {
            xml.push_str(&format!(
                r#"<w:cols w:num="{}" w:space="{}"/>"#,
                style.columns, style.column_spacing.0
            ));
        }
        if style.title_page {
            xml.push_str("<w:titlePg/>");
        }
        xml.push_str("</w:sectPr>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{FootnoteProperties, HeaderFooterSlot, NoteNumberFormat};

    fn render(doc: &Document) -> String {
        let index = RelIndex::build(doc);
        DocumentWriter::new().write(doc, &index).unwrap()
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let doc = Document::new();
        let index = RelIndex::build(&doc);
        assert!(matches!(
            DocumentWriter::new().write(&doc, &index),
            Err(DocxError::EmptyDocument)
        ));
    }

    #[test]
    fn test_single_section_body_level_sectpr() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_text(section, "hello", None, None).unwrap();
        let xml = render(&doc);
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838" w:orient="portrait"/>"#));
        // the only sectPr sits at body level, not inside a paragraph
        assert_eq!(xml.matches("<w:sectPr>").count(), 1);
        assert!(!xml.contains("<w:pPr><w:sectPr>"));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_section_break_between_sections() {
        let mut doc = Document::new();
        let first = doc.add_section(SectionStyle::a4());
        doc.add_text(first, "one", None, None).unwrap();
        let second = doc.add_section(SectionStyle::letter());
        doc.add_text(second, "two", None, None).unwrap();
        let xml = render(&doc);
        assert_eq!(xml.matches("<w:sectPr>").count(), 2);
        assert_eq!(xml.matches("<w:p><w:pPr><w:sectPr>").count(), 1);
        let break_at = xml.find("<w:p><w:pPr><w:sectPr>").unwrap();
        let second_text = xml.find("two").unwrap();
        assert!(break_at < second_text);
    }

    #[test]
    fn test_header_references() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        doc.add_header(section, HeaderFooterSlot::First).unwrap();
        doc.add_footer(section, HeaderFooterSlot::Default).unwrap();
        let xml = render(&doc);
        assert!(xml.contains(r#"<w:headerReference w:type="default" r:id="rId7"/>"#));
        assert!(xml.contains(r#"<w:headerReference w:type="first" r:id="rId8"/>"#));
        assert!(xml.contains(r#"<w:footerReference w:type="default" r:id="rId9"/>"#));
        // a first-page header flips the title page flag
        assert!(xml.contains("<w:titlePg/>"));
    }

    #[test]
    fn test_landscape_and_columns() {
        let mut doc = Document::new();
        let mut style = SectionStyle::a4().landscape();
        style.set_columns(2).unwrap();
        doc.add_section(style);
        let xml = render(&doc);
        assert!(xml.contains(r#"w:orient="landscape""#));
        assert!(xml.contains(r#"<w:cols w:num="2""#));
    }

    #[test]
    fn test_footnote_properties() {
        let mut doc = Document::new();
        let mut style = SectionStyle::a4();
        style.footnote_properties = Some(FootnoteProperties {
            number_format: Some(NoteNumberFormat::LowerRoman),
            number_start: Some(3),
            ..FootnoteProperties::default()
        });
        doc.add_section(style);
        let xml = render(&doc);
        assert!(xml.contains("<w:footnotePr>"));
        assert!(xml.contains(r#"<w:numFmt w:val="lowerRoman"/>"#));
        assert!(xml.contains(r#"<w:numStart w:val="3"/>"#));
    }
}
