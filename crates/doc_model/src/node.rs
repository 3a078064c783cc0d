//! Core node types: handles, element kinds, doc-part context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable handle into the document's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub(crate) u32);

impl NodeHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw arena index
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Short random tag identifying an element in generated markup.
///
/// Six lowercase hex digits. Collisions are tolerated by consumers, so the
/// tag only needs to be random, not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementTag(String);

impl ElementTag {
    /// Generate a fresh random tag
    pub fn generate() -> Self {
        Self(format!("{:06x}", rand::random::<u32>() & 0xFF_FFFF))
    }

    /// Get the tag string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural zone an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocPartKind {
    Section,
    Header,
    Footer,
    Footnote,
    Endnote,
}

impl DocPartKind {
    pub fn name(&self) -> &'static str {
        match self {
            DocPartKind::Section => "section",
            DocPartKind::Header => "header",
            DocPartKind::Footer => "footer",
            DocPartKind::Footnote => "footnote",
            DocPartKind::Endnote => "endnote",
        }
    }
}

/// Doc-part context: zone kind plus the numeric id of the zone instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocPart {
    pub kind: DocPartKind,
    pub id: u32,
}

impl DocPart {
    pub fn new(kind: DocPartKind, id: u32) -> Self {
        Self { kind, id }
    }

    /// True iff this element lives in a section body
    pub fn is_section(&self) -> bool {
        self.kind == DocPartKind::Section
    }

    /// Media-relationship bucket key for this zone instance.
    ///
    /// Header and footer instances each get their own bucket; sections,
    /// footnotes, and endnotes share one bucket per zone kind.
    pub fn bucket(&self) -> String {
        match self.kind {
            DocPartKind::Header | DocPartKind::Footer => {
                format!("{}{}", self.kind.name(), self.id)
            }
            _ => self.kind.name().to_string(),
        }
    }
}

impl Default for DocPart {
    fn default() -> Self {
        Self::new(DocPartKind::Section, 1)
    }
}

/// Kind of tracked revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Inserted,
    Deleted,
}

/// Track-change annotation attached to an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackChange {
    pub author: String,
    pub date: DateTime<Utc>,
    pub kind: ChangeKind,
}

impl TrackChange {
    pub fn new(kind: ChangeKind, author: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            author: author.into(),
            date,
            kind,
        }
    }
}

/// Closed enumeration of all element kinds in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Section,
    Header,
    Footer,
    Text,
    TextRun,
    TextBreak,
    PageBreak,
    Link,
    Image,
    Object,
    Table,
    Row,
    Cell,
    Title,
    Bookmark,
    Field,
    Footnote,
    Endnote,
    ListItem,
    ListItemRun,
    CheckBox,
    TextBox,
    PreserveText,
    Toc,
    Line,
    Shape,
    Chart,
    FormField,
    Sdt,
    Comment,
    TrackChangeRun,
}

impl ElementKind {
    /// Display name used in error messages and markup comments
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Section => "Section",
            ElementKind::Header => "Header",
            ElementKind::Footer => "Footer",
            ElementKind::Text => "Text",
            ElementKind::TextRun => "TextRun",
            ElementKind::TextBreak => "TextBreak",
            ElementKind::PageBreak => "PageBreak",
            ElementKind::Link => "Link",
            ElementKind::Image => "Image",
            ElementKind::Object => "Object",
            ElementKind::Table => "Table",
            ElementKind::Row => "Row",
            ElementKind::Cell => "Cell",
            ElementKind::Title => "Title",
            ElementKind::Bookmark => "Bookmark",
            ElementKind::Field => "Field",
            ElementKind::Footnote => "Footnote",
            ElementKind::Endnote => "Endnote",
            ElementKind::ListItem => "ListItem",
            ElementKind::ListItemRun => "ListItemRun",
            ElementKind::CheckBox => "CheckBox",
            ElementKind::TextBox => "TextBox",
            ElementKind::PreserveText => "PreserveText",
            ElementKind::Toc => "TOC",
            ElementKind::Line => "Line",
            ElementKind::Shape => "Shape",
            ElementKind::Chart => "Chart",
            ElementKind::FormField => "FormField",
            ElementKind::Sdt => "SDT",
            ElementKind::Comment => "Comment",
            ElementKind::TrackChangeRun => "TrackChange",
        }
    }

    /// Whether nodes of this kind own an ordered child collection
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementKind::Section
                | ElementKind::Header
                | ElementKind::Footer
                | ElementKind::TextRun
                | ElementKind::Table
                | ElementKind::Row
                | ElementKind::Cell
                | ElementKind::Footnote
                | ElementKind::Endnote
                | ElementKind::ListItemRun
                | ElementKind::TextBox
                | ElementKind::Comment
                | ElementKind::TrackChangeRun
        )
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
