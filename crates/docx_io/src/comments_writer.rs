//! word/comments.xml

use crate::element_writer::ElementWriter;
use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::rel_index::RelIndex;
use crate::XML_DECLARATION;
use doc_model::{Document, Payload};

pub struct CommentsWriter;

impl CommentsWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &Document, index: &RelIndex) -> DocxResult<String> {
        let mut xml = String::with_capacity(2 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<w:comments xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R
        ));
        let writer = ElementWriter::new(doc, index);
        for (id, handle) in doc.collections.comments.iter() {
            let node = doc.node(handle)?;
            let Payload::Comment {
                author,
                initials,
                date,
                ..
            } = &node.payload
            else {
                continue;
            };
            xml.push_str(&format!(
                r#"<w:comment w:id="{}" w:author="{}" w:initials="{}" w:date="{}">"#,
                id,
                escape_xml(author),
                escape_xml(initials),
                date.format("%Y-%m-%dT%H:%M:%SZ")
            ));
            if node.children.is_empty() {
                xml.push_str("<w:p/>");
            } else {
                writer.write_block_children(&mut xml, node)?;
            }
            xml.push_str("</w:comment>");
        }
        xml.push_str("</w:comments>");
        Ok(xml)
    }
}
