//! Element payloads
//!
//! Per-kind data carried by a tree node. Structural bookkeeping (parent,
//! children, doc part, tracked change) lives on the node itself; the
//! payload holds only what is specific to the element kind.

use crate::field::FieldData;
use crate::image::{ImageFormat, ImageSource};
use crate::length::{Emu, TableWidth, Twip};
use crate::node::ElementKind;
use crate::numbering::NumId;
use crate::section::{HeaderFooterSlot, SectionStyle};
use crate::style::{
    CellStyle, FontStyle, FrameStyle, LineStyle, ParagraphStyle, RowStyle, StyleRef, TableStyle,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An image placed in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub source: ImageSource,
    pub format: ImageFormat,
    /// Display size in points; defaults applied at write time when absent
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Id within the owning doc part's media bucket, set on attach
    pub media_id: u32,
}

impl ImageData {
    pub fn width_emu(&self) -> Emu {
        Emu::from_points(self.width.unwrap_or(115.0))
    }

    pub fn height_emu(&self) -> Emu {
        Emu::from_points(self.height.unwrap_or(115.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    Pie,
    Doughnut,
    Bar,
    Column,
    Line,
    Area,
    Scatter,
    Radar,
}

impl ChartType {
    pub fn ooxml_element(&self) -> &'static str {
        match self {
            ChartType::Pie => "pieChart",
            ChartType::Doughnut => "doughnutChart",
            ChartType::Bar | ChartType::Column => "barChart",
            ChartType::Line => "lineChart",
            ChartType::Area => "areaChart",
            ChartType::Scatter => "scatterChart",
            ChartType::Radar => "radarChart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormFieldType {
    TextInput,
    CheckBox,
    DropDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SdtType {
    PlainText,
    ComboBox,
    DropDownList,
    Date,
}

/// Kind-specific element data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Section {
        style: SectionStyle,
    },
    Header {
        slot: HeaderFooterSlot,
    },
    Footer {
        slot: HeaderFooterSlot,
    },
    Text {
        content: String,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    TextRun {
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    TextBreak {
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    PageBreak,
    Link {
        url: String,
        text: String,
        /// Anchor link to a bookmark instead of an external target
        internal: bool,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
        /// Bucket-local relationship id, 0 for internal links
        media_id: u32,
    },
    Image {
        data: ImageData,
    },
    Object {
        source: PathBuf,
        prog_id: String,
        /// Embedding id within the bucket
        media_id: u32,
        /// The icon shown in place of the object
        icon: ImageData,
    },
    Table {
        style: Option<StyleRef<TableStyle>>,
        width: Option<TableWidth>,
    },
    Row {
        style: RowStyle,
        height: Option<Twip>,
    },
    Cell {
        style: CellStyle,
        width: Option<Twip>,
    },
    Title {
        depth: u32,
        text: String,
        /// Document-wide title number, drives TOC bookmarks
        collection_id: u32,
    },
    Bookmark {
        name: String,
        /// Document-wide bookmark id
        id: u32,
    },
    Field {
        data: FieldData,
        font: Option<StyleRef<FontStyle>>,
    },
    Footnote {
        collection_id: u32,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    Endnote {
        collection_id: u32,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    ListItem {
        text: String,
        depth: u32,
        num_id: NumId,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    ListItemRun {
        depth: u32,
        num_id: NumId,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    CheckBox {
        name: String,
        text: String,
        checked: bool,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    TextBox {
        style: FrameStyle,
    },
    PreserveText {
        text: String,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    Toc {
        min_depth: u32,
        max_depth: u32,
        font: Option<FontStyle>,
    },
    Line {
        style: LineStyle,
    },
    Shape {
        shape_type: String,
        style: FrameStyle,
    },
    Chart {
        chart_type: ChartType,
        categories: Vec<String>,
        series: Vec<ChartSeries>,
        width: Emu,
        height: Emu,
        collection_id: u32,
    },
    FormField {
        field_type: FormFieldType,
        name: String,
        default: String,
        value: String,
        entries: Vec<String>,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    },
    Sdt {
        sdt_type: SdtType,
        alias: String,
        tag: String,
        value: String,
        list_items: Vec<String>,
    },
    Comment {
        author: String,
        initials: String,
        date: DateTime<Utc>,
        collection_id: u32,
        /// Elements the comment range is anchored to
        range_start: Option<crate::node::NodeHandle>,
        range_end: Option<crate::node::NodeHandle>,
    },
    TrackChangeRun,
}

impl Payload {
    /// The element kind this payload belongs to
    pub fn kind(&self) -> ElementKind {
        match self {
            Payload::Section { .. } => ElementKind::Section,
            Payload::Header { .. } => ElementKind::Header,
            Payload::Footer { .. } => ElementKind::Footer,
            Payload::Text { .. } => ElementKind::Text,
            Payload::TextRun { .. } => ElementKind::TextRun,
            Payload::TextBreak { .. } => ElementKind::TextBreak,
            Payload::PageBreak => ElementKind::PageBreak,
            Payload::Link { .. } => ElementKind::Link,
            Payload::Image { .. } => ElementKind::Image,
            Payload::Object { .. } => ElementKind::Object,
            Payload::Table { .. } => ElementKind::Table,
            Payload::Row { .. } => ElementKind::Row,
            Payload::Cell { .. } => ElementKind::Cell,
            Payload::Title { .. } => ElementKind::Title,
            Payload::Bookmark { .. } => ElementKind::Bookmark,
            Payload::Field { .. } => ElementKind::Field,
            Payload::Footnote { .. } => ElementKind::Footnote,
            Payload::Endnote { .. } => ElementKind::Endnote,
            Payload::ListItem { .. } => ElementKind::ListItem,
            Payload::ListItemRun { .. } => ElementKind::ListItemRun,
            Payload::CheckBox { .. } => ElementKind::CheckBox,
            Payload::TextBox { .. } => ElementKind::TextBox,
            Payload::PreserveText { .. } => ElementKind::PreserveText,
            Payload::Toc { .. } => ElementKind::Toc,
            Payload::Line { .. } => ElementKind::Line,
            Payload::Shape { .. } => ElementKind::Shape,
            Payload::Chart { .. } => ElementKind::Chart,
            Payload::FormField { .. } => ElementKind::FormField,
            Payload::Sdt { .. } => ElementKind::Sdt,
            Payload::Comment { .. } => ElementKind::Comment,
            Payload::TrackChangeRun => ElementKind::TrackChangeRun,
        }
    }
}
