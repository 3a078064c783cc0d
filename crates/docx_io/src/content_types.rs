//! [Content_Types].xml generation
//!
//! Declares the content type of every part in the package: extension
//! defaults for media, one override per XML part. Both maps are sorted so
//! the emitted manifest is deterministic.

use crate::content_type_values;
use crate::namespaces;
use crate::XML_DECLARATION;
use doc_model::Document;
use std::collections::BTreeMap;

/// The content types manifest for a package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    /// Create a manifest with the standard rels/xml defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", content_type_values::RELATIONSHIPS);
        ct.add_default("xml", content_type_values::XML);
        ct
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    /// Register an override. Part names are stored with a leading slash.
    pub fn add_override(&mut self, part: &str, content_type: &str) {
        let part = if part.starts_with('/') {
            part.to_string()
        } else {
            format!("/{}", part)
        };
        self.overrides.insert(part, content_type.to_string());
    }

    pub fn has_override(&self, part: &str) -> bool {
        let part = if part.starts_with('/') {
            part.to_string()
        } else {
            format!("/{}", part)
        };
        self.overrides.contains_key(&part)
    }

    /// Generate [Content_Types].xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespaces::CT));
        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                ext, ct
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, ct
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

/// Build the full manifest for a document: fixed parts, conditional parts
/// (numbering, notes, comments, charts), media extension defaults, and one
/// override per header, footer, and chart.
pub fn build_content_types(doc: &Document) -> ContentTypes {
    let mut ct = ContentTypes::new();

    for format in doc.media.image_formats() {
        ct.add_default(format.extension(), format.content_type());
    }
    for (_, entries) in doc.media.buckets() {
        for entry in entries {
            if let doc_model::MediaSource::Object { path } = &entry.source {
                if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                    ct.add_default(ext, object_content_type(ext));
                }
            }
        }
    }

    ct.add_override("word/document.xml", content_type_values::DOCUMENT);
    ct.add_override("word/styles.xml", content_type_values::STYLES);
    ct.add_override("word/settings.xml", content_type_values::SETTINGS);
    ct.add_override("word/webSettings.xml", content_type_values::WEB_SETTINGS);
    ct.add_override("word/fontTable.xml", content_type_values::FONT_TABLE);
    ct.add_override("word/theme/theme1.xml", content_type_values::THEME);
    ct.add_override("docProps/core.xml", content_type_values::CORE_PROPS);
    ct.add_override("docProps/app.xml", content_type_values::EXT_PROPS);
    ct.add_override("docProps/custom.xml", content_type_values::CUSTOM_PROPS);
    ct.add_override("word/numbering.xml", content_type_values::NUMBERING);
    if !doc.collections.footnotes.is_empty() {
        ct.add_override("word/footnotes.xml", content_type_values::FOOTNOTES);
    }
    if !doc.collections.endnotes.is_empty() {
        ct.add_override("word/endnotes.xml", content_type_values::ENDNOTES);
    }
    if !doc.collections.comments.is_empty() {
        ct.add_override("word/comments.xml", content_type_values::COMMENTS);
    }
    for &handle in doc.all_headers() {
        if let Ok(node) = doc.node(handle) {
            ct.add_override(
                &format!("word/header{}.xml", node.doc_part.id),
                content_type_values::HEADER,
            );
        }
    }
    for &handle in doc.all_footers() {
        if let Ok(node) = doc.node(handle) {
            ct.add_override(
                &format!("word/footer{}.xml", node.doc_part.id),
                content_type_values::FOOTER,
            );
        }
    }
    for (id, _) in doc.collections.charts.iter() {
        ct.add_override(
            &format!("word/charts/chart{}.xml", id),
            content_type_values::CHART,
        );
    }

    ct
}

/// Content type of an embedded OLE object by extension
fn object_content_type(ext: &str) -> &'static str {
    match ext {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "ppt" => "application/vnd.ms-powerpoint",
        _ => "application/vnd.openxmlformats-officedocument.oleObject",
    }
}
