//! Section page setup
//!
//! A section's style describes the page geometry and note behavior that end
//! up in its `sectPr`. Headers and footers hang off the section node itself.

use crate::{Twip, Result, DocModelError};
use serde::{Deserialize, Serialize};

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Which pages a header or footer applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderFooterSlot {
    /// All pages (or odd pages when even/odd headers are enabled)
    Default,
    /// First page of the section
    First,
    /// Even pages
    Even,
}

impl HeaderFooterSlot {
    /// The `w:type` attribute of the header/footer reference
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            HeaderFooterSlot::Default => "default",
            HeaderFooterSlot::First => "first",
            HeaderFooterSlot::Even => "even",
        }
    }

    /// Slot index used in doc-part id arithmetic: a section reserves three
    /// consecutive ids, one per slot.
    pub fn index(&self) -> u32 {
        match self {
            HeaderFooterSlot::Default => 1,
            HeaderFooterSlot::First => 2,
            HeaderFooterSlot::Even => 3,
        }
    }
}

/// Footnote/endnote number format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteNumberFormat {
    #[default]
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerLetter,
    UpperLetter,
    Chicago,
}

impl NoteNumberFormat {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            NoteNumberFormat::Decimal => "decimal",
            NoteNumberFormat::LowerRoman => "lowerRoman",
            NoteNumberFormat::UpperRoman => "upperRoman",
            NoteNumberFormat::LowerLetter => "lowerLetter",
            NoteNumberFormat::UpperLetter => "upperLetter",
            NoteNumberFormat::Chicago => "chicago",
        }
    }
}

/// When footnote numbering restarts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteRestart {
    #[default]
    Continuous,
    EachSection,
    EachPage,
}

impl NoteRestart {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            NoteRestart::Continuous => "continuous",
            NoteRestart::EachSection => "eachSect",
            NoteRestart::EachPage => "eachPage",
        }
    }
}

/// Where footnotes render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootnotePosition {
    #[default]
    PageBottom,
    BeneathText,
    SectionEnd,
    DocumentEnd,
}

impl FootnotePosition {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            FootnotePosition::PageBottom => "pageBottom",
            FootnotePosition::BeneathText => "beneathText",
            FootnotePosition::SectionEnd => "sectEnd",
            FootnotePosition::DocumentEnd => "docEnd",
        }
    }
}

/// Footnote behavior carried in a section's `sectPr`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootnoteProperties {
    pub position: Option<FootnotePosition>,
    pub number_format: Option<NoteNumberFormat>,
    pub number_start: Option<u32>,
    pub restart: Option<NoteRestart>,
}

/// Section page setup and note behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStyle {
    pub page_width: Twip,
    pub page_height: Twip,
    pub orientation: Orientation,
    pub margin_top: Twip,
    pub margin_bottom: Twip,
    pub margin_left: Twip,
    pub margin_right: Twip,
    pub header_height: Twip,
    pub footer_height: Twip,
    pub gutter: Twip,
    /// Column count, 1..=10
    pub columns: u32,
    /// Space between columns
    pub column_spacing: Twip,
    /// Emit `w:titlePg` so the first-page header/footer applies
    pub title_page: bool,
    pub footnote_properties: Option<FootnoteProperties>,
}

impl SectionStyle {
    /// A4 portrait with 1-inch margins
    pub fn a4() -> Self {
        Self {
            page_width: Twip(11906),
            page_height: Twip(16838),
            orientation: Orientation::Portrait,
            margin_top: Twip::from_inches(1.0),
            margin_bottom: Twip::from_inches(1.0),
            margin_left: Twip::from_inches(1.0),
            margin_right: Twip::from_inches(1.0),
            header_height: Twip(720),
            footer_height: Twip(720),
            gutter: Twip(0),
            columns: 1,
            column_spacing: Twip(720),
            title_page: false,
            footnote_properties: None,
        }
    }

    /// US Letter portrait with 1-inch margins
    pub fn letter() -> Self {
        Self {
            page_width: Twip(12240),
            page_height: Twip(15840),
            ..Self::a4()
        }
    }

    pub fn landscape(mut self) -> Self {
        if self.page_width < self.page_height {
            std::mem::swap(&mut self.page_width, &mut self.page_height);
        }
        self.orientation = Orientation::Landscape;
        self
    }

    /// Set the column count. Word accepts 1..=10.
    pub fn set_columns(&mut self, columns: u32) -> Result<()> {
        if columns == 0 || columns > 10 {
            return Err(DocModelError::InvalidStyleValue {
                property: "columns",
                value: columns.to_string(),
            });
        }
        self.columns = columns;
        Ok(())
    }
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices() {
        assert_eq!(HeaderFooterSlot::Default.index(), 1);
        assert_eq!(HeaderFooterSlot::First.index(), 2);
        assert_eq!(HeaderFooterSlot::Even.index(), 3);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let section = SectionStyle::a4().landscape();
        assert!(section.page_width > section.page_height);
        assert_eq!(section.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_column_validation() {
        let mut section = SectionStyle::a4();
        assert!(section.set_columns(0).is_err());
        assert!(section.set_columns(11).is_err());
        section.set_columns(2).unwrap();
        assert_eq!(section.columns, 2);
    }
}
