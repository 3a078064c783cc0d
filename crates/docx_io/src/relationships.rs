//! Relationship (.rels) manifest generation
//!
//! Relationships connect package parts to each other and to external
//! targets. Entries keep their insertion order; the serialized manifest
//! lists them exactly as registered, with ids `rId1`, `rId2`, ...

use crate::error::{DocxError, DocxResult};
use crate::namespaces;
use crate::XML_DECLARATION;

/// A single relationship in a .rels manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Numeric part of the id ("rId{n}")
    pub id: u32,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative to the source part) or external URL
    pub target: String,
    /// External targets get `TargetMode="External"`
    pub external: bool,
}

/// Ordered collection of relationships for one source part
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its numeric id. Ids are assigned
    /// sequentially from 1 in insertion order.
    pub fn add(&mut self, rel_type: &str, target: &str, external: bool) -> DocxResult<u32> {
        if rel_type.is_empty() {
            return Err(DocxError::InvalidRelationship(format!(
                "empty type for target '{}'",
                target
            )));
        }
        if target.is_empty() {
            return Err(DocxError::InvalidRelationship(format!(
                "empty target for type '{}'",
                rel_type
            )));
        }
        let id = self.entries.len() as u32 + 1;
        self.entries.push(Relationship {
            id,
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            external,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Generate the .rels XML
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<Relationships xmlns="{}">"#,
            namespaces::PKG_REL
        ));
        for rel in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="{}""#,
                rel.id,
                rel.rel_type,
                crate::escape_xml(&rel.target)
            ));
            if rel.external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml
    }
}
