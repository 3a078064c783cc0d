//! Field elements (PAGE, DATE, REF, …)
//!
//! Each field kind declares which properties and options it accepts, and
//! closed value sets where Word defines them. Setters validate against the
//! declared schema and reject everything else.

use crate::{DocModelError, Result};
use serde::{Deserialize, Serialize};

/// Supported field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Page,
    NumPages,
    Date,
    MacroButton,
    Xe,
    Index,
    StyleRef,
    Ref,
    Filename,
}

impl FieldKind {
    /// Field instruction keyword
    pub fn instruction(&self) -> &'static str {
        match self {
            FieldKind::Page => "PAGE",
            FieldKind::NumPages => "NUMPAGES",
            FieldKind::Date => "DATE",
            FieldKind::MacroButton => "MACROBUTTON",
            FieldKind::Xe => "XE",
            FieldKind::Index => "INDEX",
            FieldKind::StyleRef => "STYLEREF",
            FieldKind::Ref => "REF",
            FieldKind::Filename => "FILENAME",
        }
    }
}

/// A field property (keyed value inside the instruction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldProperty {
    /// `\* <format>` general format switch
    Format(String),
    /// `\# <picture>` numeric picture switch
    NumFormat(String),
    /// `\@ "<picture>"` date picture switch
    DateFormat(String),
    /// Macro name for MACROBUTTON
    MacroName(String),
    /// Style name for STYLEREF
    StyleIdentifier(String),
    /// Bookmark name for REF
    Name(String),
}

impl FieldProperty {
    fn key(&self) -> &'static str {
        match self {
            FieldProperty::Format(_) => "format",
            FieldProperty::NumFormat(_) => "numformat",
            FieldProperty::DateFormat(_) => "dateformat",
            FieldProperty::MacroName(_) => "macroname",
            FieldProperty::StyleIdentifier(_) => "styleidentifier",
            FieldProperty::Name(_) => "name",
        }
    }

    fn value(&self) -> &str {
        match self {
            FieldProperty::Format(v)
            | FieldProperty::NumFormat(v)
            | FieldProperty::DateFormat(v)
            | FieldProperty::MacroName(v)
            | FieldProperty::StyleIdentifier(v)
            | FieldProperty::Name(v) => v,
        }
    }
}

/// A field option (bare switch appended to the instruction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOption {
    PreserveFormat,
    LunarCalendar,
    SakaEraCalendar,
    LastUsedFormat,
    Bold,
    Italic,
    Path,
    /// One-letter REF switch: f, h, n, p, r, t, or w
    RefSwitch(char),
}

const PAGE_FORMATS: &[&str] = &[
    "Arabic",
    "ArabicDash",
    "alphabetic",
    "ALPHABETIC",
    "roman",
    "ROMAN",
];
const NUM_FORMATS: &[&str] = &["0", "0,00", "#,##0", "#,##0.00", "x", "xx", "x.x"];
const DATE_FORMATS: &[&str] = &[
    "d-M-yyyy",
    "dddd d MMMM yyyy",
    "d MMMM yyyy",
    "d-M-yy",
    "yyyy-MM-dd",
    "d-MMM-yy",
    "d/M/yyyy",
    "d MMM. yy",
    "d/M/yy h:mm",
    "d/M/yy h:mm:ss",
    "h:mm am/pm",
    "h:mm:ss am/pm",
    "HH:mm",
    "HH:mm:ss",
];
const FILENAME_FORMATS: &[&str] = &["Upper", "Lower", "FirstCap", "TitleCase"];
const REF_SWITCHES: &[char] = &['f', 'h', 'n', 'p', 'r', 't', 'w'];

/// A configured field element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    pub kind: FieldKind,
    pub properties: Vec<FieldProperty>,
    pub options: Vec<FieldOption>,
    /// Display text shown before the field is next updated
    pub text: Option<String>,
}

impl FieldData {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            options: Vec::new(),
            text: None,
        }
    }

    /// Add a property after validating it against this kind's schema
    pub fn set_property(&mut self, property: FieldProperty) -> Result<()> {
        self.validate_property(&property)?;
        self.properties.retain(|p| p.key() != property.key());
        self.properties.push(property);
        Ok(())
    }

    /// Add an option after validating it against this kind's schema
    pub fn add_option(&mut self, option: FieldOption) -> Result<()> {
        if !self.option_allowed(option) {
            return Err(DocModelError::InvalidStyleValue {
                property: "field_option",
                value: format!("{:?} for {}", option, self.kind.instruction()),
            });
        }
        if !self.options.contains(&option) {
            self.options.push(option);
        }
        Ok(())
    }

    pub fn with_property(mut self, property: FieldProperty) -> Result<Self> {
        self.set_property(property)?;
        Ok(self)
    }

    pub fn with_option(mut self, option: FieldOption) -> Result<Self> {
        self.add_option(option)?;
        Ok(self)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn validate_property(&self, property: &FieldProperty) -> Result<()> {
        let reject = || DocModelError::InvalidStyleValue {
            property: "field_property",
            value: format!(
                "{}={} for {}",
                property.key(),
                property.value(),
                self.kind.instruction()
            ),
        };
        let in_set = |set: &[&str]| set.contains(&property.value());
        let allowed = match (self.kind, property) {
            (FieldKind::Page, FieldProperty::Format(_)) => in_set(PAGE_FORMATS),
            (FieldKind::NumPages, FieldProperty::Format(_)) => in_set(PAGE_FORMATS),
            (FieldKind::NumPages, FieldProperty::NumFormat(_)) => in_set(NUM_FORMATS),
            (FieldKind::Date, FieldProperty::DateFormat(_)) => in_set(DATE_FORMATS),
            (FieldKind::MacroButton, FieldProperty::MacroName(_)) => true,
            (FieldKind::StyleRef, FieldProperty::StyleIdentifier(_)) => true,
            (FieldKind::Ref, FieldProperty::Name(_)) => true,
            (FieldKind::Filename, FieldProperty::Format(_)) => in_set(FILENAME_FORMATS),
            _ => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(reject())
        }
    }

    fn option_allowed(&self, option: FieldOption) -> bool {
        match (self.kind, option) {
            (FieldKind::Page, FieldOption::PreserveFormat) => true,
            (FieldKind::NumPages, FieldOption::PreserveFormat) => true,
            (
                FieldKind::Date,
                FieldOption::PreserveFormat
                | FieldOption::LunarCalendar
                | FieldOption::SakaEraCalendar
                | FieldOption::LastUsedFormat,
            ) => true,
            (FieldKind::Xe, FieldOption::Bold | FieldOption::Italic) => true,
            (FieldKind::Index, FieldOption::PreserveFormat) => true,
            (FieldKind::StyleRef, FieldOption::PreserveFormat) => true,
            (FieldKind::Ref, FieldOption::RefSwitch(c)) => REF_SWITCHES.contains(&c),
            (FieldKind::Filename, FieldOption::Path | FieldOption::PreserveFormat) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_format_validation() {
        let field = FieldData::new(FieldKind::Page);
        assert!(field
            .clone()
            .with_property(FieldProperty::Format("Arabic".to_string()))
            .is_ok());
        assert!(field
            .clone()
            .with_property(FieldProperty::Format("Hexadecimal".to_string()))
            .is_err());
        // DATE takes dateformat, not format
        assert!(FieldData::new(FieldKind::Date)
            .with_property(FieldProperty::Format("Arabic".to_string()))
            .is_err());
        assert!(FieldData::new(FieldKind::Date)
            .with_property(FieldProperty::DateFormat("d-M-yyyy".to_string()))
            .is_ok());
    }

    #[test]
    fn test_option_validation() {
        assert!(FieldData::new(FieldKind::Xe)
            .with_option(FieldOption::Bold)
            .is_ok());
        assert!(FieldData::new(FieldKind::Xe)
            .with_option(FieldOption::PreserveFormat)
            .is_err());
        assert!(FieldData::new(FieldKind::Ref)
            .with_option(FieldOption::RefSwitch('h'))
            .is_ok());
        assert!(FieldData::new(FieldKind::Ref)
            .with_option(FieldOption::RefSwitch('z'))
            .is_err());
    }

    #[test]
    fn test_property_replacement() {
        let mut field = FieldData::new(FieldKind::Page);
        field
            .set_property(FieldProperty::Format("roman".to_string()))
            .unwrap();
        field
            .set_property(FieldProperty::Format("Arabic".to_string()))
            .unwrap();
        assert_eq!(field.properties.len(), 1);
        assert_eq!(field.properties[0].value(), "Arabic");
    }

    #[test]
    fn test_duplicate_option_ignored() {
        let mut field = FieldData::new(FieldKind::Date);
        field.add_option(FieldOption::PreserveFormat).unwrap();
        field.add_option(FieldOption::PreserveFormat).unwrap();
        assert_eq!(field.options.len(), 1);
    }
}
