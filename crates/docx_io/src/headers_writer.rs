//! word/headerN.xml and word/footerN.xml
//!
//! Each header or footer node becomes its own part. The part number comes
//! from the node's document-part id, so a second section's default header
//! lands in header4.xml regardless of how many slots the first section
//! filled.

use crate::element_writer::ElementWriter;
use crate::error::DocxResult;
use crate::namespaces;
use crate::rel_index::{add_bucket_media, RelIndex};
use crate::relationships::Relationships;
use crate::XML_DECLARATION;
use doc_model::{Document, NodeHandle};

pub struct HeaderFooterWriter;

impl HeaderFooterWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_header(
        &self,
        doc: &Document,
        index: &RelIndex,
        handle: NodeHandle,
    ) -> DocxResult<String> {
        self.write_part(doc, index, handle, "w:hdr")
    }

    pub fn write_footer(
        &self,
        doc: &Document,
        index: &RelIndex,
        handle: NodeHandle,
    ) -> DocxResult<String> {
        self.write_part(doc, index, handle, "w:ftr")
    }

    fn write_part(
        &self,
        doc: &Document,
        index: &RelIndex,
        handle: NodeHandle,
        root: &str,
    ) -> DocxResult<String> {
        let node = doc.node(handle)?;
        let mut xml = String::with_capacity(2 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<{} xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:v="{}" xmlns:o="{}">"#,
            root,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::V,
            namespaces::O
        ));
        if node.children.is_empty() {
            xml.push_str("<w:p/>");
        } else {
            ElementWriter::new(doc, index).write_block_children(&mut xml, node)?;
        }
        xml.push_str(&format!("</{}>", root));
        Ok(xml)
    }

    /// Relationships for one header or footer part, covering the media
    /// registered in its bucket. Returns `None` when the part needs no
    /// rels file.
    pub fn part_rels(
        &self,
        doc: &Document,
        handle: NodeHandle,
    ) -> DocxResult<Option<Relationships>> {
        let node = doc.node(handle)?;
        let mut rels = Relationships::new();
        add_bucket_media(&mut rels, doc, &node.doc_part.bucket())?;
        Ok((!rels.is_empty()).then_some(rels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{HeaderFooterSlot, ImageSource, SectionStyle};

    #[test]
    fn test_empty_header_holds_a_paragraph() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let header = doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        let index = RelIndex::build(&doc);
        let xml = HeaderFooterWriter::new()
            .write_header(&doc, &index, header)
            .unwrap();
        assert!(xml.contains("<w:hdr "));
        assert!(xml.contains("<w:p/>"));
        assert!(xml.ends_with("</w:hdr>"));
    }

    #[test]
    fn test_footer_content() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let footer = doc.add_footer(section, HeaderFooterSlot::Default).unwrap();
        doc.add_preserve_text(footer, "Page {PAGE}", None).unwrap();
        let index = RelIndex::build(&doc);
        let xml = HeaderFooterWriter::new()
            .write_footer(&doc, &index, footer)
            .unwrap();
        assert!(xml.contains("<w:ftr "));
        assert!(xml.contains("PAGE"));
    }

    #[test]
    fn test_header_media_gets_part_local_rels() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let header = doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        let source = ImageSource::Memory {
            bytes: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
            name: "logo".to_string(),
        };
        doc.add_image(header, source, None, None).unwrap();
        let writer = HeaderFooterWriter::new();
        let rels = writer.part_rels(&doc, header).unwrap().unwrap();
        assert_eq!(rels.len(), 1);
        assert!(rels.to_xml().contains("media/header1_image1.png"));

        // the image run references the part-local id, not a document rel
        let index = RelIndex::build(&doc);
        let xml = writer.write_header(&doc, &index, header).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId1"/>"#));
    }

    #[test]
    fn test_header_without_media_has_no_rels() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let header = doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        doc.add_text(header, "plain", None, None).unwrap();
        let rels = HeaderFooterWriter::new().part_rels(&doc, header).unwrap();
        assert!(rels.is_none());
    }
}
