//! Document-level settings and package metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display zoom in settings.xml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zoom {
    Percent(u16),
    FullPage,
    BestFit,
    TextFit,
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom::Percent(100)
    }
}

/// Behavior toggles written to word/settings.xml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    pub default_font_name: String,
    /// Half-point font size doubled at write time; stored in points here
    pub default_font_size: f32,
    pub zoom: Zoom,
    pub even_and_odd_headers: bool,
    pub auto_hyphenation: bool,
    pub track_revisions: bool,
    pub hide_spelling_errors: bool,
    pub hide_grammatical_errors: bool,
    pub update_fields_on_open: bool,
    pub decimal_symbol: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            default_font_name: "Arial".to_string(),
            default_font_size: 10.0,
            zoom: Zoom::default(),
            even_and_odd_headers: false,
            auto_hyphenation: false,
            track_revisions: false,
            hide_spelling_errors: false,
            hide_grammatical_errors: false,
            update_fields_on_open: false,
            decimal_symbol: ".".to_string(),
        }
    }
}

/// A typed custom property for docProps/custom.xml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomPropertyValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
}

/// Package metadata written to docProps/core.xml and app.xml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub creator: String,
    pub last_modified_by: String,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub keywords: String,
    pub category: String,
    pub company: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub custom_properties: Vec<(String, CustomPropertyValue)>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            creator: String::new(),
            last_modified_by: String::new(),
            title: String::new(),
            subject: String::new(),
            description: String::new(),
            keywords: String::new(),
            category: String::new(),
            company: String::new(),
            created: now,
            modified: now,
            custom_properties: Vec::new(),
        }
    }
}

impl DocumentInfo {
    pub fn set_custom_property(&mut self, name: impl Into<String>, value: CustomPropertyValue) {
        let name = name.into();
        if let Some(entry) = self.custom_properties.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.custom_properties.push((name, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DocumentSettings::default();
        assert_eq!(settings.default_font_name, "Arial");
        assert_eq!(settings.zoom, Zoom::Percent(100));
        assert!(!settings.even_and_odd_headers);
    }

    #[test]
    fn test_custom_property_replacement() {
        let mut info = DocumentInfo::default();
        info.set_custom_property("rev", CustomPropertyValue::Integer(1));
        info.set_custom_property("rev", CustomPropertyValue::Integer(2));
        assert_eq!(info.custom_properties.len(), 1);
        assert_eq!(
            info.custom_properties[0].1,
            CustomPropertyValue::Integer(2)
        );
    }
}
