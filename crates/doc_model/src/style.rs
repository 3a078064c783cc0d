//! Style value objects and the named-style registry
//!
//! Styles are pure data with no identity: a node either owns its style
//! inline or refers to a named definition in the document's style registry
//! (resolved at serialization time). [`StyleRef`] captures that dual
//! representation.

use crate::{DocModelError, Result, Twip};
use serde::{Deserialize, Serialize};

// =============================================================================
// Style reference
// =============================================================================

/// Either an inline style definition or a reference into the document's
/// named-style table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleRef<T> {
    /// Name of a definition in the global style registry
    Named(String),
    /// Style owned by the element itself
    Inline(T),
}

impl<T> StyleRef<T> {
    pub fn named(name: impl Into<String>) -> Self {
        StyleRef::Named(name.into())
    }

    /// The registry name, if this is a named reference
    pub fn name(&self) -> Option<&str> {
        match self {
            StyleRef::Named(name) => Some(name),
            StyleRef::Inline(_) => None,
        }
    }

    /// The inline definition, if present
    pub fn inline(&self) -> Option<&T> {
        match self {
            StyleRef::Named(_) => None,
            StyleRef::Inline(style) => Some(style),
        }
    }
}

impl<T> From<T> for StyleRef<T> {
    fn from(style: T) -> Self {
        StyleRef::Inline(style)
    }
}

// =============================================================================
// Shared enumerations
// =============================================================================

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Line spacing rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineSpacing {
    /// Multiple of single spacing (1.0 = single)
    Multiple(f32),
    /// Exact height in points
    Exact(f32),
    /// Minimum height in points
    AtLeast(f32),
}

/// Underline decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnderlineType {
    None,
    Single,
    Double,
    Dotted,
    Dash,
    Wavy,
    Words,
}

impl UnderlineType {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            UnderlineType::None => "none",
            UnderlineType::Single => "single",
            UnderlineType::Double => "double",
            UnderlineType::Dotted => "dotted",
            UnderlineType::Dash => "dash",
            UnderlineType::Wavy => "wave",
            UnderlineType::Words => "words",
        }
    }
}

/// Super/subscript placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Baseline,
    Superscript,
    Subscript,
}

impl VerticalAlign {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            VerticalAlign::Baseline => "baseline",
            VerticalAlign::Superscript => "superscript",
            VerticalAlign::Subscript => "subscript",
        }
    }
}

/// Closed set of highlight colors Word accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightColor {
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
    Red,
    DarkYellow,
    DarkGray,
    LightGray,
    Black,
    White,
}

impl HighlightColor {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Cyan => "cyan",
            HighlightColor::Magenta => "magenta",
            HighlightColor::Blue => "blue",
            HighlightColor::Red => "red",
            HighlightColor::DarkYellow => "darkYellow",
            HighlightColor::DarkGray => "darkGray",
            HighlightColor::LightGray => "lightGray",
            HighlightColor::Black => "black",
            HighlightColor::White => "white",
        }
    }
}

/// Border line style for tables and cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderStyle {
    Single,
    Double,
    Dotted,
    Dashed,
    Thick,
    None,
}

impl BorderStyle {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Thick => "thick",
            BorderStyle::None => "none",
        }
    }
}

/// One border edge: style, width in eighths of a point, hex color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub style: BorderStyle,
    pub size: u32,
    pub color: Color,
}

impl Border {
    pub fn single(size: u32, color: Color) -> Self {
        Self {
            style: BorderStyle::Single,
            size,
            color,
        }
    }
}

// =============================================================================
// Colors
// =============================================================================

/// An RRGGBB hex color, validated at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color([u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([0xFF, 0xFF, 0xFF]);

    /// Parse a hex color, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DocModelError::InvalidStyleValue {
                property: "color",
                value: hex.to_string(),
            });
        }
        let mut rgb = [0u8; 3];
        for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
            // Validated as hex above
            rgb[i] = u8::from_str_radix(std::str::from_utf8(chunk).unwrap_or("0"), 16)
                .unwrap_or(0);
        }
        Ok(Self(rgb))
    }

    /// Uppercase RRGGBB form for markup
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

// =============================================================================
// Font style
// =============================================================================

/// Character formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontStyle {
    pub name: Option<String>,
    /// Size in points
    pub size: Option<f32>,
    pub color: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<UnderlineType>,
    pub strikethrough: Option<bool>,
    pub double_strikethrough: Option<bool>,
    pub all_caps: Option<bool>,
    pub small_caps: Option<bool>,
    pub hidden: Option<bool>,
    pub vertical_align: Option<VerticalAlign>,
    /// Character scale percent, 1..=600
    pub scale: Option<u16>,
    /// Inter-character spacing in twips
    pub spacing: Option<Twip>,
    /// Minimum font size for kerning, in points
    pub kerning: Option<f32>,
    pub highlight: Option<HighlightColor>,
    /// BCP-47 language tag
    pub lang: Option<String>,
}

impl FontStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, points: f32) -> Self {
        self.size = Some(points);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_underline(mut self, underline: UnderlineType) -> Self {
        self.underline = Some(underline);
        self
    }

    /// Set the character scale percent. Word only accepts 1..=600.
    pub fn set_scale(&mut self, percent: u16) -> Result<()> {
        if percent == 0 || percent > 600 {
            return Err(DocModelError::InvalidStyleValue {
                property: "scale",
                value: percent.to_string(),
            });
        }
        self.scale = Some(percent);
        Ok(())
    }
}

// =============================================================================
// Paragraph style
// =============================================================================

/// Paragraph formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    pub alignment: Option<Alignment>,
    pub space_before: Option<Twip>,
    pub space_after: Option<Twip>,
    pub line_spacing: Option<LineSpacing>,
    pub indent_left: Option<Twip>,
    pub indent_right: Option<Twip>,
    /// Positive = first-line indent, negative = hanging indent
    pub indent_first_line: Option<Twip>,
    /// Right-to-left paragraph direction
    pub bidi: Option<bool>,
    pub keep_with_next: Option<bool>,
    pub keep_lines: Option<bool>,
    pub page_break_before: Option<bool>,
    pub widow_control: Option<bool>,
    /// Outline level 0..=8 for TOC gathering
    pub outline_level: Option<u8>,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_space_after(mut self, space: Twip) -> Self {
        self.space_after = Some(space);
        self
    }

    pub fn with_indent_left(mut self, indent: Twip) -> Self {
        self.indent_left = Some(indent);
        self
    }

    pub fn with_line_spacing(mut self, spacing: LineSpacing) -> Self {
        self.line_spacing = Some(spacing);
        self
    }

    /// Set the outline level. Word accepts 0..=8.
    pub fn set_outline_level(&mut self, level: u8) -> Result<()> {
        if level > 8 {
            return Err(DocModelError::InvalidStyleValue {
                property: "outline_level",
                value: level.to_string(),
            });
        }
        self.outline_level = Some(level);
        Ok(())
    }
}

// =============================================================================
// Table styles
// =============================================================================

/// Cell shading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shading {
    pub fill: Color,
}

/// Table formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableStyle {
    pub borders: Option<Border>,
    pub shading: Option<Shading>,
    pub cell_margin_top: Option<Twip>,
    pub cell_margin_bottom: Option<Twip>,
    pub cell_margin_left: Option<Twip>,
    pub cell_margin_right: Option<Twip>,
    pub alignment: Option<Alignment>,
    /// Indent from the leading margin
    pub indent: Option<Twip>,
}

impl TableStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_borders(mut self, border: Border) -> Self {
        self.borders = Some(border);
        self
    }
}

/// Row formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowStyle {
    /// Exact row height
    pub height: Option<Twip>,
    /// Repeat as a header row on every page
    pub table_header: Option<bool>,
    /// Forbid splitting the row across pages
    pub cant_split: Option<bool>,
}

/// Vertical cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellVerticalAlign {
    Top,
    Center,
    Bottom,
}

impl CellVerticalAlign {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            CellVerticalAlign::Top => "top",
            CellVerticalAlign::Center => "center",
            CellVerticalAlign::Bottom => "bottom",
        }
    }
}

/// Vertical merge participation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalMerge {
    /// First cell of a merged run
    Restart,
    /// Continuation of the cell above
    Continue,
}

/// Cell formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellStyle {
    pub shading: Option<Shading>,
    pub borders: Option<Border>,
    pub vertical_align: Option<CellVerticalAlign>,
    /// Horizontal span in grid columns
    pub grid_span: Option<u32>,
    pub vertical_merge: Option<VerticalMerge>,
    /// Rotate cell text 90 degrees
    pub text_direction_btlr: Option<bool>,
}

// =============================================================================
// Frame style (images, text boxes, shapes)
// =============================================================================

/// How a floating frame interacts with body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    Inline,
    Square,
    Tight,
    Behind,
    InFront,
}

/// Placement and extent of an image, text box, or shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
    pub wrap: WrapMode,
    pub alignment: Option<Alignment>,
}

impl FrameStyle {
    pub fn inline(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            wrap: WrapMode::Inline,
            alignment: None,
        }
    }
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self::inline(100.0, 100.0)
    }
}

/// Horizontal rule / line element style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Length in points
    pub length: f32,
    /// Weight in points
    pub weight: f32,
    pub color: Option<Color>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            length: 100.0,
            weight: 1.0,
            color: None,
        }
    }
}

// =============================================================================
// Named style registry
// =============================================================================

/// A definition registered under a document-global name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NamedStyle {
    Font(FontStyle),
    Paragraph(ParagraphStyle),
    /// Linked pair used by headings and the document title
    Title {
        depth: u8,
        font: FontStyle,
        paragraph: ParagraphStyle,
    },
    Table(TableStyle),
}

/// Document-global table of named styles, referenced by [`StyleRef::Named`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRegistry {
    styles: Vec<(String, NamedStyle)>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named character style
    pub fn add_font_style(&mut self, name: impl Into<String>, font: FontStyle) {
        self.insert(name.into(), NamedStyle::Font(font));
    }

    /// Register a named paragraph style
    pub fn add_paragraph_style(&mut self, name: impl Into<String>, paragraph: ParagraphStyle) {
        self.insert(name.into(), NamedStyle::Paragraph(paragraph));
    }

    /// Register a named table style
    pub fn add_table_style(&mut self, name: impl Into<String>, table: TableStyle) {
        self.insert(name.into(), NamedStyle::Table(table));
    }

    /// Register the style backing `Title` (depth 0) or `HeadingN`
    /// (depth 1..=9) elements.
    pub fn add_title_style(
        &mut self,
        depth: u8,
        font: FontStyle,
        paragraph: ParagraphStyle,
    ) -> Result<String> {
        if depth > 9 {
            return Err(DocModelError::InvalidStyleValue {
                property: "title_depth",
                value: depth.to_string(),
            });
        }
        let name = Self::title_style_name(depth);
        let mut paragraph = paragraph;
        if depth > 0 {
            // Headings carry their depth as the outline level
            paragraph.outline_level = Some(depth - 1);
        }
        self.insert(
            name.clone(),
            NamedStyle::Title {
                depth,
                font,
                paragraph,
            },
        );
        Ok(name)
    }

    /// Style name used for a title element of the given depth
    pub fn title_style_name(depth: u8) -> String {
        if depth == 0 {
            "Title".to_string()
        } else {
            format!("Heading{}", depth)
        }
    }

    /// Look up a named style
    pub fn get(&self, name: &str) -> Option<&NamedStyle> {
        self.styles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, style)| style)
    }

    /// Iterate registered styles in registration order
    pub fn all(&self) -> impl Iterator<Item = (&str, &NamedStyle)> {
        self.styles.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn insert(&mut self, name: String, style: NamedStyle) {
        if let Some(slot) = self.styles.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = style;
        } else {
            self.styles.push((name, style));
        }
    }
}
