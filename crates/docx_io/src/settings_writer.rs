//! word/settings.xml, webSettings.xml, and fontTable.xml

use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::password;
use crate::XML_DECLARATION;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use doc_model::{Document, ProtectionType, Zoom};

pub struct SettingsWriter;

impl SettingsWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &Document) -> DocxResult<String> {
        let settings = &doc.settings;
        let mut xml = String::with_capacity(2 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<w:settings xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R
        ));

        match settings.zoom {
            Zoom::Percent(percent) => {
                xml.push_str(&format!(r#"<w:zoom w:percent="{}"/>"#, percent));
            }
            Zoom::FullPage => xml.push_str(r#"<w:zoom w:val="fullPage"/>"#),
            Zoom::BestFit => xml.push_str(r#"<w:zoom w:val="bestFit"/>"#),
            Zoom::TextFit => xml.push_str(r#"<w:zoom w:val="textFit"/>"#),
        }
        self.write_protection(&mut xml, doc);
        if settings.even_and_odd_headers {
            xml.push_str("<w:evenAndOddHeaders/>");
        }
        if settings.auto_hyphenation {
            xml.push_str("<w:autoHyphenation/>");
        }
        if settings.track_revisions {
            xml.push_str("<w:trackChanges/>");
        }
        if settings.hide_spelling_errors {
            xml.push_str("<w:hideSpellingErrors/>");
        }
        if settings.hide_grammatical_errors {
            xml.push_str("<w:hideGrammaticalErrors/>");
        }
        if settings.update_fields_on_open {
            xml.push_str(r#"<w:updateFields w:val="true"/>"#);
        }
        xml.push_str(&format!(
            r#"<w:decimalSymbol w:val="{}"/>"#,
            escape_xml(&settings.decimal_symbol)
        ));
        xml.push_str(r#"<w:listSeparator w:val=";"/>"#);
        xml.push_str("</w:settings>");
        Ok(xml)
    }

    fn write_protection(&self, xml: &mut String, doc: &Document) {
        let protection = &doc.protection;
        if protection.protection_type == ProtectionType::None {
            return;
        }
        xml.push_str(&format!(
            r#"<w:documentProtection w:edit="{}" w:enforcement="1""#,
            protection.protection_type.ooxml_value()
        ));
        if let Some(pw) = &protection.password {
            let salt = protection.effective_salt();
            let hash = password::hash_password(pw, &salt, protection.spin_count);
            xml.push_str(&format!(
                r#" w:cryptProviderType="rsaFull" w:cryptAlgorithmClass="hash" w:cryptAlgorithmType="typeAny" w:cryptAlgorithmSid="4" w:cryptSpinCount="{}" w:hash="{}" w:salt="{}""#,
                protection.spin_count,
                hash,
                BASE64.encode(salt)
            ));
        }
        xml.push_str("/>");
    }

    pub fn write_web_settings(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<w:webSettings xmlns:w="{}"><w:optimizeForBrowser/></w:webSettings>"#,
            namespaces::W
        ));
        xml
    }

    pub fn write_font_table(&self, doc: &Document) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(r#"<w:fonts xmlns:w="{}">"#, namespaces::W));
        xml.push_str(&format!(
            r#"<w:font w:name="{}"><w:pitch w:val="variable"/></w:font>"#,
            escape_xml(&doc.settings.default_font_name)
        ));
        xml.push_str("</w:fonts>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::DocumentProtection;

    #[test]
    fn test_default_settings() {
        let doc = Document::new();
        let xml = SettingsWriter::new().write(&doc).unwrap();
        assert!(xml.contains(r#"<w:zoom w:percent="100"/>"#));
        assert!(xml.contains(r#"<w:decimalSymbol w:val="."/>"#));
        assert!(!xml.contains("documentProtection"));
        assert!(!xml.contains("evenAndOddHeaders"));
    }

    #[test]
    fn test_flags_toggle_elements() {
        let mut doc = Document::new();
        doc.settings.track_revisions = true;
        doc.settings.auto_hyphenation = true;
        doc.settings.even_and_odd_headers = true;
        doc.settings.update_fields_on_open = true;
        let xml = SettingsWriter::new().write(&doc).unwrap();
        assert!(xml.contains("<w:trackChanges/>"));
        assert!(xml.contains("<w:autoHyphenation/>"));
        assert!(xml.contains("<w:evenAndOddHeaders/>"));
        assert!(xml.contains(r#"<w:updateFields w:val="true"/>"#));
    }

    #[test]
    fn test_protection_without_password() {
        let mut doc = Document::new();
        doc.protection = DocumentProtection::new(ProtectionType::ReadOnly);
        let xml = SettingsWriter::new().write(&doc).unwrap();
        assert!(xml.contains(r#"<w:documentProtection w:edit="readOnly" w:enforcement="1"/>"#));
        assert!(!xml.contains("w:hash"));
    }

    #[test]
    fn test_protection_with_password() {
        let mut doc = Document::new();
        doc.protection = DocumentProtection::new(ProtectionType::Forms)
            .with_password("secret")
            .with_salt([7u8; 16]);
        let xml = SettingsWriter::new().write(&doc).unwrap();
        assert!(xml.contains(r#"w:edit="forms""#));
        assert!(xml.contains(r#"w:cryptAlgorithmSid="4""#));
        assert!(xml.contains(r#"w:cryptSpinCount="100000""#));
        assert!(xml.contains("w:hash=\""));
        assert!(xml.contains(&format!("w:salt=\"{}\"", BASE64.encode([7u8; 16]))));
    }

    #[test]
    fn test_font_table_lists_default_font() {
        let doc = Document::new();
        let xml = SettingsWriter::new().write_font_table(&doc);
        assert!(xml.contains(r#"<w:font w:name="Arial">"#));
    }
}
