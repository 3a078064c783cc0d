//! word/footnotes.xml and word/endnotes.xml
//!
//! Ids 0 and 1 are reserved for the separator and continuation-separator
//! stubs every consumer expects, so a registered note with collection id
//! N serializes with wire id N + 1.

use crate::element_writer::ElementWriter;
use crate::error::DocxResult;
use crate::namespaces;
use crate::rel_index::{add_bucket_media, RelIndex};
use crate::relationships::Relationships;
use crate::XML_DECLARATION;
use doc_model::{CollectionRegistry, Document};

pub struct NotesWriter;

impl NotesWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_footnotes(&self, doc: &Document, index: &RelIndex) -> DocxResult<String> {
        self.write_part(doc, index, &doc.collections.footnotes, "w:footnotes", "w:footnote")
    }

    pub fn write_endnotes(&self, doc: &Document, index: &RelIndex) -> DocxResult<String> {
        self.write_part(doc, index, &doc.collections.endnotes, "w:endnotes", "w:endnote")
    }

    fn write_part(
        &self,
        doc: &Document,
        index: &RelIndex,
        notes: &CollectionRegistry,
        root: &str,
        element: &str,
    ) -> DocxResult<String> {
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
        xml.push_str(&format!(
            r#"<{el} w:type="separator" w:id="0"><w:p><w:r><w:separator/></w:r></w:p></{el}>"#,
            el = element
        ));
        xml.push_str(&format!(
            r#"<{el} w:type="continuationSeparator" w:id="1"><w:p><w:r><w:continuationSeparator/></w:r></w:p></{el}>"#,
            el = element
        ));

        let writer = ElementWriter::new(doc, index);
        for (id, handle) in notes.iter() {
            let node = doc.node(handle)?;
            xml.push_str(&format!(r#"<{} w:id="{}">"#, element, id + 1));
            if node.children.is_empty() {
                xml.push_str("<w:p/>");
            } else {
                writer.write_block_children(&mut xml, node)?;
            }
            xml.push_str(&format!("</{}>", element));
        }
        xml.push_str(&format!("</{}>", root));
        Ok(xml)
    }

    pub fn footnotes_rels(&self, doc: &Document) -> DocxResult<Option<Relationships>> {
        self.bucket_rels(doc, "footnote")
    }

    pub fn endnotes_rels(&self, doc: &Document) -> DocxResult<Option<Relationships>> {
        self.bucket_rels(doc, "endnote")
    }

    fn bucket_rels(&self, doc: &Document, bucket: &str) -> DocxResult<Option<Relationships>> {
        let mut rels = Relationships::new();
        add_bucket_media(&mut rels, doc, bucket)?;
        Ok((!rels.is_empty()).then_some(rels))
    }
}
