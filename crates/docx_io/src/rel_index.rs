//! Relationship id pre-pass
//!
//! Every id that crosses part boundaries is assigned here, before any XML
//! is emitted. Part writers then only format ids they are handed; asking
//! for a part the index never saw is a `MissingPart` failure, not a silent
//! wrong id.
//!
//! The document manifest order is fixed: the six standard parts (styles,
//! numbering, settings, webSettings, fontTable, theme), then header and
//! footer parts in registration order, then notes parts, comments, charts,
//! and finally the section-bucket media, ids continuing throughout.

use crate::error::{DocxError, DocxResult};
use crate::relationship_types;
use crate::relationships::Relationships;
use doc_model::{Document, MediaKind, NodeHandle};

/// Pre-assigned relationship ids for the document part
#[derive(Debug, Clone)]
pub struct RelIndex {
    headers: Vec<(NodeHandle, u32)>,
    footers: Vec<(NodeHandle, u32)>,
    footnotes_rid: Option<u32>,
    endnotes_rid: Option<u32>,
    comments_rid: Option<u32>,
    /// rid per chart, indexed by collection id - 1
    charts: Vec<u32>,
    /// rid per section-bucket media entry, indexed by media id - 1
    section_media: Vec<u32>,
}

/// The fixed parts every document manifest starts with
const FIXED_PARTS: &[(&str, &str)] = &[
    (relationship_types::STYLES, "styles.xml"),
    (relationship_types::NUMBERING, "numbering.xml"),
    (relationship_types::SETTINGS, "settings.xml"),
    (relationship_types::WEB_SETTINGS, "webSettings.xml"),
    (relationship_types::FONT_TABLE, "fontTable.xml"),
    (relationship_types::THEME, "theme/theme1.xml"),
];

impl RelIndex {
    /// Assign ids for everything the document part references
    pub fn build(doc: &Document) -> Self {
        let mut next = FIXED_PARTS.len() as u32;
        let mut take = || {
            next += 1;
            next
        };

        let headers = doc.all_headers().iter().map(|&h| (h, take())).collect();
        let footers = doc.all_footers().iter().map(|&h| (h, take())).collect();
        let footnotes_rid = (!doc.collections.footnotes.is_empty()).then(&mut take);
        let endnotes_rid = (!doc.collections.endnotes.is_empty()).then(&mut take);
        let comments_rid = (!doc.collections.comments.is_empty()).then(&mut take);
        let charts = doc.collections.charts.iter().map(|_| take()).collect();
        let section_media = doc
            .media
            .bucket("section")
            .iter()
            .map(|_| take())
            .collect();

        Self {
            headers,
            footers,
            footnotes_rid,
            endnotes_rid,
            comments_rid,
            charts,
            section_media,
        }
    }

    pub fn header_rid(&self, handle: NodeHandle) -> DocxResult<u32> {
        self.headers
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, rid)| *rid)
            .ok_or_else(|| DocxError::MissingPart(format!("header {}", handle)))
    }

    pub fn footer_rid(&self, handle: NodeHandle) -> DocxResult<u32> {
        self.footers
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, rid)| *rid)
            .ok_or_else(|| DocxError::MissingPart(format!("footer {}", handle)))
    }

    pub fn footnotes_rid(&self) -> DocxResult<u32> {
        self.footnotes_rid
            .ok_or_else(|| DocxError::MissingPart("footnotes part".to_string()))
    }

    pub fn endnotes_rid(&self) -> DocxResult<u32> {
        self.endnotes_rid
            .ok_or_else(|| DocxError::MissingPart("endnotes part".to_string()))
    }

    pub fn comments_rid(&self) -> DocxResult<u32> {
        self.comments_rid
            .ok_or_else(|| DocxError::MissingPart("comments part".to_string()))
    }

    pub fn chart_rid(&self, collection_id: u32) -> DocxResult<u32> {
        self.charts
            .get(collection_id.wrapping_sub(1) as usize)
            .copied()
            .ok_or_else(|| DocxError::MissingPart(format!("chart {}", collection_id)))
    }

    /// Rid of a media entry referenced from the given bucket. Media inside
    /// header, footer, and note parts map directly to that part's own
    /// manifest, where ids start at 1; only the section bucket goes through
    /// the document manifest.
    pub fn media_rid(&self, bucket: &str, media_id: u32) -> DocxResult<u32> {
        if bucket != "section" {
            return Ok(media_id);
        }
        self.section_media
            .get(media_id.wrapping_sub(1) as usize)
            .copied()
            .ok_or_else(|| DocxError::MissingPart(format!("media {} in bucket {}", media_id, bucket)))
    }

    /// Build word/_rels/document.xml.rels in the fixed manifest order
    pub fn document_rels(&self, doc: &Document) -> DocxResult<Relationships> {
        let mut rels = Relationships::new();
        for (rel_type, target) in FIXED_PARTS {
            rels.add(rel_type, target, false)?;
        }
        for (handle, _) in &self.headers {
            let node = doc.node(*handle)?;
            rels.add(
                relationship_types::HEADER,
                &format!("header{}.xml", node.doc_part.id),
                false,
            )?;
        }
        for (handle, _) in &self.footers {
            let node = doc.node(*handle)?;
            rels.add(
                relationship_types::FOOTER,
                &format!("footer{}.xml", node.doc_part.id),
                false,
            )?;
        }
        if self.footnotes_rid.is_some() {
            rels.add(relationship_types::FOOTNOTES, "footnotes.xml", false)?;
        }
        if self.endnotes_rid.is_some() {
            rels.add(relationship_types::ENDNOTES, "endnotes.xml", false)?;
        }
        if self.comments_rid.is_some() {
            rels.add(relationship_types::COMMENTS, "comments.xml", false)?;
        }
        for (id, _) in doc.collections.charts.iter() {
            rels.add(
                relationship_types::CHART,
                &format!("charts/chart{}.xml", id),
                false,
            )?;
        }
        add_bucket_media(&mut rels, doc, "section")?;
        Ok(rels)
    }
}

/// Append one relationship per media entry of a bucket. Used by the
/// document manifest for the section bucket and by each part's own
/// manifest for the others.
pub(crate) fn add_bucket_media(
    rels: &mut Relationships,
    doc: &Document,
    bucket: &str,
) -> DocxResult<()> {
    for entry in doc.media.bucket(bucket) {
        let (rel_type, external) = match entry.kind {
            MediaKind::Image => (relationship_types::IMAGE, false),
            MediaKind::Object => (relationship_types::OLE_OBJECT, false),
            MediaKind::Link => (relationship_types::HYPERLINK, true),
        };
        rels.add(rel_type, &entry.target(bucket), external)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{HeaderFooterSlot, ImageSource, SectionStyle};

    fn png() -> ImageSource {
        ImageSource::Memory {
            bytes: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
            name: "pic".to_string(),
        }
    }

    #[test]
    fn test_fixed_parts_then_dynamic() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let header = doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        doc.add_footnote(section, None).unwrap();
        doc.add_image(section, png(), None, None).unwrap();

        let index = RelIndex::build(&doc);
        assert_eq!(index.header_rid(header).unwrap(), 7);
        assert_eq!(index.footnotes_rid().unwrap(), 8);
        assert_eq!(index.media_rid("section", 1).unwrap(), 9);

        let rels = index.document_rels(&doc).unwrap();
        assert_eq!(rels.len(), 9);
        let xml = rels.to_xml();
        assert!(xml.contains(r#"Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml""#));
        assert!(xml.contains(r#"Target="media/section_image1.png""#));
    }

    #[test]
    fn test_missing_part_errors() {
        let doc = Document::new();
        let index = RelIndex::build(&doc);
        assert!(matches!(
            index.footnotes_rid(),
            Err(DocxError::MissingPart(_))
        ));
        assert!(matches!(
            index.media_rid("section", 1),
            Err(DocxError::MissingPart(_))
        ));
    }

    #[test]
    fn test_non_section_buckets_map_directly() {
        let doc = Document::new();
        let index = RelIndex::build(&doc);
        assert_eq!(index.media_rid("header1", 3).unwrap(), 3);
        assert_eq!(index.media_rid("footnote", 1).unwrap(), 1);
    }
}
