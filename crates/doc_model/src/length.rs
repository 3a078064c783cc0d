//! Typed length values
//!
//! OOXML mixes several units: twentieths of a point (twips) for page and
//! paragraph geometry, half-points for font sizes, EMUs for drawing extents,
//! and fiftieths of a percent for relative table widths. Newtypes keep the
//! units from being confused.

use serde::{Deserialize, Serialize};

/// Twentieths of a point. The base unit for page, margin, indent, and
/// table geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Twip(pub i32);

impl Twip {
    /// Convert points to twips
    pub fn from_points(pt: f32) -> Self {
        Self((pt * 20.0).round() as i32)
    }

    /// Convert inches to twips
    pub fn from_inches(inches: f32) -> Self {
        Self::from_points(inches * 72.0)
    }

    /// Value in points
    pub fn points(&self) -> f32 {
        self.0 as f32 / 20.0
    }

    /// Value as an EMU drawing extent
    pub fn to_emu(&self) -> Emu {
        Emu(self.0 as i64 * 635)
    }
}

/// English Metric Units, used for drawing extents. 914400 per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert points to EMUs
    pub fn from_points(pt: f32) -> Self {
        Self((pt * 12700.0).round() as i64)
    }

    /// Convert pixels (96 dpi) to EMUs
    pub fn from_pixels(px: f32) -> Self {
        Self((px * 9525.0).round() as i64)
    }
}

/// A table, row, or cell width: absolute, relative, or left to the layout
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TableWidth {
    /// Width decided by the consumer (`w:type="auto"`)
    Auto,
    /// Percentage of the available width (`w:type="pct"`, fiftieths of a
    /// percent on the wire)
    Percent(f32),
    /// Absolute width in twips (`w:type="dxa"`)
    Twips(u32),
}

impl TableWidth {
    /// The `w:type` attribute value
    pub fn unit(&self) -> &'static str {
        match self {
            TableWidth::Auto => "auto",
            TableWidth::Percent(_) => "pct",
            TableWidth::Twips(_) => "dxa",
        }
    }

    /// The `w:w` attribute value
    pub fn value(&self) -> i64 {
        match self {
            TableWidth::Auto => 0,
            TableWidth::Percent(p) => (p * 50.0).round() as i64,
            TableWidth::Twips(t) => *t as i64,
        }
    }
}

impl Default for TableWidth {
    fn default() -> Self {
        TableWidth::Auto
    }
}
