//! docProps/core.xml, app.xml, and custom.xml

use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::XML_DECLARATION;
use doc_model::{CustomPropertyValue, Document};

pub struct DocPropsWriter;

impl DocPropsWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_core(&self, doc: &Document) -> DocxResult<String> {
        let info = &doc.info;
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
            namespaces::CP,
            namespaces::DC,
            namespaces::DCTERMS,
            namespaces::XSI
        ));
        xml.push_str(&format!(
            "<dc:creator>{}</dc:creator>",
            escape_xml(&info.creator)
        ));
        xml.push_str(&format!(
            "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            escape_xml(&info.last_modified_by)
        ));
        if !info.title.is_empty() {
            xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&info.title)));
        }
        if !info.subject.is_empty() {
            xml.push_str(&format!(
                "<dc:subject>{}</dc:subject>",
                escape_xml(&info.subject)
            ));
        }
        if !info.description.is_empty() {
            xml.push_str(&format!(
                "<dc:description>{}</dc:description>",
                escape_xml(&info.description)
            ));
        }
        if !info.keywords.is_empty() {
            xml.push_str(&format!(
                "<cp:keywords>{}</cp:keywords>",
                escape_xml(&info.keywords)
            ));
        }
        if !info.category.is_empty() {
            xml.push_str(&format!(
                "<cp:category>{}</cp:category>",
                escape_xml(&info.category)
            ));
        }
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            info.created.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        xml.push_str(&format!(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            info.modified.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    pub fn write_app(&self, doc: &Document) -> DocxResult<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<Properties xmlns="{}" xmlns:vt="{}">"#,
            namespaces::EXT_PROPS,
            namespaces::VT
        ));
        xml.push_str("<Application>Microsoft Office Word</Application>");
        xml.push_str(&format!(
            "<Company>{}</Company>",
            escape_xml(&doc.info.company)
        ));
        xml.push_str("</Properties>");
        Ok(xml)
    }

    /// Only written when the document carries custom properties
    pub fn write_custom(&self, doc: &Document) -> DocxResult<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<Properties xmlns="{}" xmlns:vt="{}">"#,
            namespaces::CUSTOM_PROPS,
            namespaces::VT
        ));
        // pid 1 is reserved, custom property ids start at 2
        for (pid, (name, value)) in doc.info.custom_properties.iter().enumerate() {
            xml.push_str(&format!(
                r#"<property fmtid="{{D5CDD505-2E9C-101B-9397-08002B2CF9AE}}" pid="{}" name="{}">"#,
                pid + 2,
                escape_xml(name)
            ));
            match value {
                CustomPropertyValue::Text(text) => {
                    xml.push_str(&format!("<vt:lpwstr>{}</vt:lpwstr>", escape_xml(text)));
                }
                CustomPropertyValue::Integer(int) => {
                    xml.push_str(&format!("<vt:i4>{}</vt:i4>", int));
                }
                CustomPropertyValue::Float(float) => {
                    xml.push_str(&format!("<vt:r8>{}</vt:r8>", float));
                }
                CustomPropertyValue::Boolean(boolean) => {
                    xml.push_str(&format!("<vt:bool>{}</vt:bool>", boolean));
                }
                CustomPropertyValue::Date(date) => {
                    xml.push_str(&format!(
                        "<vt:filetime>{}</vt:filetime>",
                        date.format("%Y-%m-%dT%H:%M:%SZ")
                    ));
                }
            }
            xml.push_str("</property>");
        }
        xml.push_str("</Properties>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_core_properties() {
        let mut doc = Document::new();
        doc.info.creator = "Author <One>".to_string();
        doc.info.title = "Annual Report".to_string();
        doc.info.created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let xml = DocPropsWriter::new().write_core(&doc).unwrap();
        assert!(xml.contains("<dc:creator>Author &lt;One&gt;</dc:creator>"));
        assert!(xml.contains("<dc:title>Annual Report</dc:title>"));
        assert!(xml.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-01-02T03:04:05Z</dcterms:created>"#
        ));
        // empty optional fields stay out of the part
        assert!(!xml.contains("<dc:subject>"));
    }

    #[test]
    fn test_custom_properties_pids_and_types() {
        let mut doc = Document::new();
        doc.info
            .set_custom_property("editor", CustomPropertyValue::Text("jd".to_string()));
        doc.info
            .set_custom_property("revision", CustomPropertyValue::Integer(7));
        doc.info
            .set_custom_property("final", CustomPropertyValue::Boolean(true));
        let xml = DocPropsWriter::new().write_custom(&doc).unwrap();
        assert!(xml.contains(r#"pid="2" name="editor""#));
        assert!(xml.contains(r#"pid="3" name="revision""#));
        assert!(xml.contains(r#"pid="4" name="final""#));
        assert!(xml.contains("<vt:lpwstr>jd</vt:lpwstr>"));
        assert!(xml.contains("<vt:i4>7</vt:i4>"));
        assert!(xml.contains("<vt:bool>true</vt:bool>"));
    }

    #[test]
    fn test_custom_property_replacement_keeps_pid() {
        let mut doc = Document::new();
        doc.info
            .set_custom_property("status", CustomPropertyValue::Text("draft".to_string()));
        doc.info
            .set_custom_property("status", CustomPropertyValue::Text("final".to_string()));
        let xml = DocPropsWriter::new().write_custom(&doc).unwrap();
        assert_eq!(xml.matches("name=\"status\"").count(), 1);
        assert!(xml.contains("<vt:lpwstr>final</vt:lpwstr>"));
    }

    #[test]
    fn test_app_properties() {
        let mut doc = Document::new();
        doc.info.company = "Acme".to_string();
        let xml = DocPropsWriter::new().write_app(&doc).unwrap();
        assert!(xml.contains("<Application>Microsoft Office Word</Application>"));
        assert!(xml.contains("<Company>Acme</Company>"));
    }
}
