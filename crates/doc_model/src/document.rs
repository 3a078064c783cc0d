//! Document tree
//!
//! The document owns a flat node arena indexed by [`NodeHandle`]. All
//! structural links (parent, children, comment ranges) are handles into
//! the arena. Attachment runs in a fixed order: legality check, node
//! construction, context propagation, arena push, then media and
//! collection registration. Nothing is mutated when the legality check
//! fails.

use crate::collections::Collections;
use crate::element::{ChartSeries, ChartType, FormFieldType, ImageData, Payload, SdtType};
use crate::error::{DocModelError, Result};
use crate::field::FieldData;
use crate::image::{self, ImageSource};
use crate::legality::check_nesting;
use crate::media::{MediaKind, MediaRegistry, MediaSource};
use crate::node::{DocPart, DocPartKind, ElementKind, ElementTag, NodeHandle, TrackChange};
use crate::numbering::NumberingRegistry;
use crate::protection::DocumentProtection;
use crate::section::{HeaderFooterSlot, SectionStyle};
use crate::settings::{DocumentInfo, DocumentSettings};
use crate::style::{FontStyle, ParagraphStyle, StyleRegistry, StyleRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One element in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub handle: NodeHandle,
    pub kind: ElementKind,
    pub payload: Payload,
    pub tag: ElementTag,
    pub parent: Option<NodeHandle>,
    pub children: Vec<NodeHandle>,
    /// 1-based position within the parent at attach time
    pub index: u32,
    pub doc_part: DocPart,
    /// Table-cell nesting depth
    pub depth: u32,
    pub change: Option<TrackChange>,
    /// Comment whose range starts or ends at this element
    pub comment_start: Option<NodeHandle>,
    pub comment_end: Option<NodeHandle>,
}

/// The whole document: tree, registries, styles, settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    nodes: Vec<Node>,
    sections: Vec<NodeHandle>,
    headers: Vec<NodeHandle>,
    footers: Vec<NodeHandle>,
    pub styles: StyleRegistry,
    pub numbering: NumberingRegistry,
    pub media: MediaRegistry,
    pub collections: Collections,
    pub settings: DocumentSettings,
    pub info: DocumentInfo,
    pub protection: DocumentProtection,
    next_bookmark_id: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node, failing with `NodeNotFound` for stale handles
    pub fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes
            .get(handle.index() as usize)
            .ok_or(DocModelError::NodeNotFound(handle.index()))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        self.nodes
            .get_mut(handle.index() as usize)
            .ok_or(DocModelError::NodeNotFound(handle.index()))
    }

    pub fn sections(&self) -> &[NodeHandle] {
        &self.sections
    }

    /// Headers attached to the given section, in registration order
    pub fn headers_of(&self, section: NodeHandle) -> Vec<NodeHandle> {
        self.headers
            .iter()
            .copied()
            .filter(|h| self.nodes[h.index() as usize].parent == Some(section))
            .collect()
    }

    pub fn footers_of(&self, section: NodeHandle) -> Vec<NodeHandle> {
        self.footers
            .iter()
            .copied()
            .filter(|h| self.nodes[h.index() as usize].parent == Some(section))
            .collect()
    }

    pub fn all_headers(&self) -> &[NodeHandle] {
        &self.headers
    }

    pub fn all_footers(&self) -> &[NodeHandle] {
        &self.footers
    }

    // ---- structural operations -------------------------------------------

    /// Start a new section. Sections are numbered from 1 in creation order.
    pub fn add_section(&mut self, style: SectionStyle) -> NodeHandle {
        let id = self.sections.len() as u32 + 1;
        let handle = self.push_node(
            Payload::Section { style },
            None,
            DocPart::new(DocPartKind::Section, id),
            0,
            0,
        );
        self.sections.push(handle);
        handle
    }

    fn push_node(
        &mut self,
        payload: Payload,
        parent: Option<NodeHandle>,
        doc_part: DocPart,
        index: u32,
        depth: u32,
    ) -> NodeHandle {
        let handle = NodeHandle::new(self.nodes.len() as u32);
        let kind = payload.kind();
        self.nodes.push(Node {
            handle,
            kind,
            payload,
            tag: ElementTag::generate(),
            parent,
            children: Vec::new(),
            index,
            doc_part,
            depth,
            change: None,
            comment_start: None,
            comment_end: None,
        });
        handle
    }

    /// Attach a payload under `parent`, running the legality check and the
    /// full propagation sequence. Returns the new node's handle.
    pub fn attach(&mut self, parent: NodeHandle, payload: Payload) -> Result<NodeHandle> {
        let kind = payload.kind();
        let (container_kind, parent_part, parent_depth, child_index) = {
            let parent_node = self.node(parent)?;
            check_nesting(kind, parent_node.kind, parent_node.doc_part)?;
            (
                parent_node.kind,
                parent_node.doc_part,
                parent_node.depth,
                parent_node.children.len() as u32 + 1,
            )
        };

        // Notes carry their own doc part; the collection id becomes the
        // part id once registration assigns it below.
        let doc_part = match kind {
            ElementKind::Footnote => DocPart::new(DocPartKind::Footnote, 0),
            ElementKind::Endnote => DocPart::new(DocPartKind::Endnote, 0),
            _ => parent_part,
        };
        let depth = parent_depth + u32::from(container_kind == ElementKind::Cell);

        let handle = self.push_node(payload, Some(parent), doc_part, child_index, depth);
        self.nodes[parent.index() as usize].children.push(handle);
        self.register_media(handle)?;
        self.register_collections(handle);
        Ok(handle)
    }

    /// Media registration happens against the owning part's bucket, so an
    /// image inside a header lands in that header's bucket and an image
    /// inside a footnote in the shared footnote bucket.
    fn register_media(&mut self, handle: NodeHandle) -> Result<()> {
        let bucket = self.nodes[handle.index() as usize].doc_part.bucket();
        let node = &self.nodes[handle.index() as usize];
        let registration = match &node.payload {
            Payload::Link { url, internal, .. } if !internal => Some((
                MediaKind::Link,
                MediaSource::Link { url: url.clone() },
                None,
            )),
            Payload::Image { data } => Some((
                MediaKind::Image,
                MediaSource::Image {
                    source: data.source.clone(),
                    format: data.format,
                },
                None,
            )),
            Payload::Object { source, icon, .. } => Some((
                MediaKind::Object,
                MediaSource::Object {
                    path: source.clone(),
                },
                Some(MediaSource::Image {
                    source: icon.source.clone(),
                    format: icon.format,
                }),
            )),
            _ => None,
        };
        if let Some((kind, source, icon_source)) = registration {
            let id = self.media.register(&bucket, kind, source);
            let icon_id = icon_source.map(|s| self.media.register(&bucket, MediaKind::Image, s));
            let node = self.node_mut(handle)?;
            match &mut node.payload {
                Payload::Link { media_id, .. } => *media_id = id,
                Payload::Image { data } => data.media_id = id,
                Payload::Object { media_id, icon, .. } => {
                    *media_id = id;
                    if let Some(icon_id) = icon_id {
                        icon.media_id = icon_id;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn register_collections(&mut self, handle: NodeHandle) {
        let id = match self.nodes[handle.index() as usize].payload {
            Payload::Title { .. } => Some(self.collections.titles.register(handle)),
            Payload::Footnote { .. } => Some(self.collections.footnotes.register(handle)),
            Payload::Endnote { .. } => Some(self.collections.endnotes.register(handle)),
            Payload::Chart { .. } => Some(self.collections.charts.register(handle)),
            Payload::Comment { .. } => Some(self.collections.comments.register(handle)),
            _ => None,
        };
        if let Some(id) = id {
            let node = &mut self.nodes[handle.index() as usize];
            match &mut node.payload {
                Payload::Title { collection_id, .. }
                | Payload::Footnote { collection_id, .. }
                | Payload::Endnote { collection_id, .. }
                | Payload::Chart { collection_id, .. }
                | Payload::Comment { collection_id, .. } => *collection_id = id,
                _ => {}
            }
            if matches!(
                node.doc_part.kind,
                DocPartKind::Footnote | DocPartKind::Endnote
            ) {
                node.doc_part.id = id;
            }
        }
    }

    // ---- headers and footers ---------------------------------------------

    /// Attach a header to a section. The header's doc-part id is derived
    /// from the section number and the slot, so every header instance maps
    /// to a distinct media bucket. A first-page header switches the section
    /// to a different first page.
    pub fn add_header(&mut self, section: NodeHandle, slot: HeaderFooterSlot) -> Result<NodeHandle> {
        self.add_hf(section, slot, true)
    }

    pub fn add_footer(&mut self, section: NodeHandle, slot: HeaderFooterSlot) -> Result<NodeHandle> {
        self.add_hf(section, slot, false)
    }

    fn add_hf(
        &mut self,
        section: NodeHandle,
        slot: HeaderFooterSlot,
        is_header: bool,
    ) -> Result<NodeHandle> {
        let section_id = {
            let node = self.node(section)?;
            if node.kind != ElementKind::Section {
                return Err(DocModelError::InvalidOperation(format!(
                    "headers attach to sections, not {}",
                    node.kind
                )));
            }
            node.doc_part.id
        };
        let existing = if is_header {
            self.headers_of(section)
        } else {
            self.footers_of(section)
        };
        for h in existing {
            let same_slot = match &self.nodes[h.index() as usize].payload {
                Payload::Header { slot: s } | Payload::Footer { slot: s } => *s == slot,
                _ => false,
            };
            if same_slot {
                return Err(DocModelError::InvalidOperation(format!(
                    "section {} already has a {:?} {}",
                    section_id,
                    slot,
                    if is_header { "header" } else { "footer" }
                )));
            }
        }
        let part_id = (section_id - 1) * 3 + slot.index();
        let (payload, part_kind) = if is_header {
            (Payload::Header { slot }, DocPartKind::Header)
        } else {
            (Payload::Footer { slot }, DocPartKind::Footer)
        };
        let handle = self.push_node(
            payload,
            Some(section),
            DocPart::new(part_kind, part_id),
            0,
            0,
        );
        if is_header {
            self.headers.push(handle);
        } else {
            self.footers.push(handle);
        }
        if slot == HeaderFooterSlot::First {
            if let Payload::Section { style } = &mut self.nodes[section.index() as usize].payload {
                style.title_page = true;
            }
        }
        if slot == HeaderFooterSlot::Even {
            self.settings.even_and_odd_headers = true;
        }
        Ok(handle)
    }

    // ---- element operations ----------------------------------------------

    pub fn add_text(
        &mut self,
        parent: NodeHandle,
        content: impl Into<String>,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Text {
                content: content.into(),
                font,
                paragraph,
            },
        )
    }

    pub fn add_text_run(
        &mut self,
        parent: NodeHandle,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(parent, Payload::TextRun { paragraph })
    }

    /// Add `count` independent break elements
    pub fn add_text_break(
        &mut self,
        parent: NodeHandle,
        count: u32,
        font: Option<StyleRef<FontStyle>>,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    ) -> Result<()> {
        for _ in 0..count {
            self.attach(
                parent,
                Payload::TextBreak {
                    font: font.clone(),
                    paragraph: paragraph.clone(),
                },
            )?;
        }
        Ok(())
    }

    pub fn add_page_break(&mut self, parent: NodeHandle) -> Result<NodeHandle> {
        self.attach(parent, Payload::PageBreak)
    }

    pub fn add_link(
        &mut self,
        parent: NodeHandle,
        url: impl Into<String>,
        text: impl Into<String>,
        internal: bool,
        font: Option<StyleRef<FontStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Link {
                url: url.into(),
                text: text.into(),
                internal,
                font,
                paragraph: None,
                media_id: 0,
            },
        )
    }

    /// Add an image. The source is validated (file existence or magic
    /// bytes) before any registry mutation.
    pub fn add_image(
        &mut self,
        parent: NodeHandle,
        source: ImageSource,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<NodeHandle> {
        let format = source.resolve_format()?;
        self.attach(
            parent,
            Payload::Image {
                data: ImageData {
                    source,
                    format,
                    width,
                    height,
                    media_id: 0,
                },
            },
        )
    }

    /// Embed an OLE object with its display icon. Registers two media
    /// entries in the owning bucket: the embedding and the icon image.
    pub fn add_object(
        &mut self,
        parent: NodeHandle,
        source: impl Into<PathBuf>,
        icon: ImageSource,
    ) -> Result<NodeHandle> {
        let source = source.into();
        image::validate_object_source(&source)?;
        let icon_format = icon.resolve_format()?;
        let prog_id = image::object_prog_id(&source).to_string();
        self.attach(
            parent,
            Payload::Object {
                source,
                prog_id,
                media_id: 0,
                icon: ImageData {
                    source: icon,
                    format: icon_format,
                    width: Some(16.0),
                    height: Some(16.0),
                    media_id: 0,
                },
            },
        )
    }

    pub fn add_table(
        &mut self,
        parent: NodeHandle,
        style: Option<StyleRef<crate::style::TableStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(parent, Payload::Table { style, width: None })
    }

    pub fn add_row(
        &mut self,
        table: NodeHandle,
        height: Option<crate::length::Twip>,
    ) -> Result<NodeHandle> {
        self.attach(
            table,
            Payload::Row {
                style: crate::style::RowStyle::default(),
                height,
            },
        )
    }

    pub fn add_cell(
        &mut self,
        row: NodeHandle,
        width: Option<crate::length::Twip>,
        style: crate::style::CellStyle,
    ) -> Result<NodeHandle> {
        self.attach(row, Payload::Cell { style, width })
    }

    /// Add a heading. Depth 0 is the document title, 1 through 9 map to
    /// Heading1..Heading9. The matching style must have been registered.
    pub fn add_title(
        &mut self,
        parent: NodeHandle,
        text: impl Into<String>,
        depth: u32,
    ) -> Result<NodeHandle> {
        if depth > 9 {
            return Err(DocModelError::InvalidStyleValue {
                property: "title_depth",
                value: depth.to_string(),
            });
        }
        self.attach(
            parent,
            Payload::Title {
                depth,
                text: text.into(),
                collection_id: 0,
            },
        )
    }

    pub fn add_bookmark(&mut self, parent: NodeHandle, name: impl Into<String>) -> Result<NodeHandle> {
        self.next_bookmark_id += 1;
        let id = self.next_bookmark_id;
        self.attach(
            parent,
            Payload::Bookmark {
                name: name.into(),
                id,
            },
        )
    }

    pub fn add_field(
        &mut self,
        parent: NodeHandle,
        data: FieldData,
        font: Option<StyleRef<FontStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(parent, Payload::Field { data, font })
    }

    pub fn add_footnote(
        &mut self,
        parent: NodeHandle,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Footnote {
                collection_id: 0,
                paragraph,
            },
        )
    }

    pub fn add_endnote(
        &mut self,
        parent: NodeHandle,
        paragraph: Option<StyleRef<ParagraphStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Endnote {
                collection_id: 0,
                paragraph,
            },
        )
    }

    pub fn add_list_item(
        &mut self,
        parent: NodeHandle,
        text: impl Into<String>,
        depth: u32,
        num_id: crate::numbering::NumId,
        font: Option<StyleRef<FontStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::ListItem {
                text: text.into(),
                depth,
                num_id,
                font,
                paragraph: None,
            },
        )
    }

    pub fn add_list_item_run(
        &mut self,
        parent: NodeHandle,
        depth: u32,
        num_id: crate::numbering::NumId,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::ListItemRun {
                depth,
                num_id,
                paragraph: None,
            },
        )
    }

    pub fn add_check_box(
        &mut self,
        parent: NodeHandle,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::CheckBox {
                name: name.into(),
                text: text.into(),
                checked: false,
                font: None,
                paragraph: None,
            },
        )
    }

    pub fn add_text_box(
        &mut self,
        parent: NodeHandle,
        style: crate::style::FrameStyle,
    ) -> Result<NodeHandle> {
        self.attach(parent, Payload::TextBox { style })
    }

    pub fn add_preserve_text(
        &mut self,
        parent: NodeHandle,
        text: impl Into<String>,
        font: Option<StyleRef<FontStyle>>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::PreserveText {
                text: text.into(),
                font,
                paragraph: None,
            },
        )
    }

    pub fn add_toc(
        &mut self,
        parent: NodeHandle,
        min_depth: u32,
        max_depth: u32,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Toc {
                min_depth,
                max_depth,
                font: None,
            },
        )
    }

    pub fn add_line(
        &mut self,
        parent: NodeHandle,
        style: crate::style::LineStyle,
    ) -> Result<NodeHandle> {
        self.attach(parent, Payload::Line { style })
    }

    pub fn add_form_field(
        &mut self,
        parent: NodeHandle,
        field_type: FormFieldType,
        name: impl Into<String>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::FormField {
                field_type,
                name: name.into(),
                default: String::new(),
                value: String::new(),
                entries: Vec::new(),
                font: None,
                paragraph: None,
            },
        )
    }

    pub fn add_sdt(
        &mut self,
        parent: NodeHandle,
        sdt_type: SdtType,
        value: impl Into<String>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Sdt {
                sdt_type,
                alias: String::new(),
                tag: String::new(),
                value: value.into(),
                list_items: Vec::new(),
            },
        )
    }

    pub fn add_chart(
        &mut self,
        parent: NodeHandle,
        chart_type: ChartType,
        categories: Vec<String>,
        series: Vec<ChartSeries>,
    ) -> Result<NodeHandle> {
        self.attach(
            parent,
            Payload::Chart {
                chart_type,
                categories,
                series,
                width: crate::length::Emu::from_points(228.0),
                height: crate::length::Emu::from_points(228.0),
                collection_id: 0,
            },
        )
    }

    /// Wrap subsequent children in a tracked revision
    pub fn add_track_change_run(
        &mut self,
        parent: NodeHandle,
        change: TrackChange,
    ) -> Result<NodeHandle> {
        let handle = self.attach(parent, Payload::TrackChangeRun)?;
        self.node_mut(handle)?.change = Some(change);
        Ok(handle)
    }

    /// Mark a single element as inserted or deleted
    pub fn set_change(&mut self, element: NodeHandle, change: TrackChange) -> Result<()> {
        self.node_mut(element)?.change = Some(change);
        Ok(())
    }

    // ---- comments --------------------------------------------------------

    /// Create a comment. Comments live in the comment collection, not the
    /// body tree; anchor them to content with the range setters and add
    /// their text through the regular element operations.
    pub fn add_comment(
        &mut self,
        author: impl Into<String>,
        initials: impl Into<String>,
        date: DateTime<Utc>,
    ) -> NodeHandle {
        let handle = self.push_node(
            Payload::Comment {
                author: author.into(),
                initials: initials.into(),
                date,
                collection_id: 0,
                range_start: None,
                range_end: None,
            },
            None,
            DocPart::default(),
            0,
            0,
        );
        self.register_collections(handle);
        handle
    }

    pub fn set_comment_range_start(
        &mut self,
        element: NodeHandle,
        comment: NodeHandle,
    ) -> Result<()> {
        self.link_comment(element, comment, true)
    }

    pub fn set_comment_range_end(
        &mut self,
        element: NodeHandle,
        comment: NodeHandle,
    ) -> Result<()> {
        self.link_comment(element, comment, false)
    }

    fn link_comment(&mut self, element: NodeHandle, comment: NodeHandle, start: bool) -> Result<()> {
        if self.node(element)?.kind == ElementKind::Comment {
            return Err(DocModelError::InvalidAnchor(
                "a comment cannot anchor another comment".to_string(),
            ));
        }
        if self.node(comment)?.kind != ElementKind::Comment {
            return Err(DocModelError::InvalidAnchor(format!(
                "range target {} is not a comment",
                comment
            )));
        }
        // Mutual linking, idempotent when repeated with the same pair
        {
            let node = self.node_mut(element)?;
            if start {
                node.comment_start = Some(comment);
            } else {
                node.comment_end = Some(comment);
            }
        }
        if let Payload::Comment {
            range_start,
            range_end,
            ..
        } = &mut self.node_mut(comment)?.payload
        {
            if start {
                *range_start = Some(element);
            } else {
                *range_end = Some(element);
            }
        }
        Ok(())
    }

    // ---- child access ----------------------------------------------------

    pub fn count_children(&self, parent: NodeHandle) -> Result<usize> {
        Ok(self.node(parent)?.children.len())
    }

    /// Zero-based positional child access. Out-of-range indices yield
    /// `None`; only a stale parent handle is an error.
    pub fn get_child(&self, parent: NodeHandle, index: usize) -> Result<Option<NodeHandle>> {
        Ok(self.node(parent)?.children.get(index).copied())
    }

    /// Detach a child subtree from its parent. Registry ids held by the
    /// subtree are never reused.
    pub fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        let position = {
            let node = self.node(parent)?;
            node.children.iter().position(|&c| c == child)
        };
        let Some(position) = position else {
            return Err(DocModelError::InvalidOperation(format!(
                "{} is not a child of {}",
                child, parent
            )));
        };
        self.nodes[parent.index() as usize].children.remove(position);
        self.node_mut(child)?.parent = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::HeaderFooterSlot;
    use crate::style::CellStyle;

    fn doc_with_section() -> (Document, NodeHandle) {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        (doc, section)
    }

    #[test]
    fn test_attach_propagates_context() {
        let (mut doc, section) = doc_with_section();
        let run = doc.add_text_run(section, None).unwrap();
        let text = doc.add_text(run, "hello", None, None).unwrap();
        let node = doc.node(text).unwrap();
        assert_eq!(node.parent, Some(run));
        assert_eq!(node.index, 1);
        assert_eq!(node.doc_part, DocPart::new(DocPartKind::Section, 1));
        assert_eq!(node.depth, 0);
    }

    #[test]
    fn test_depth_increments_per_cell() {
        let (mut doc, section) = doc_with_section();
        let table = doc.add_table(section, None).unwrap();
        let row = doc.add_row(table, None).unwrap();
        let cell = doc.add_cell(row, None, CellStyle::default()).unwrap();
        let inner_table = doc.add_table(cell, None).unwrap();
        let inner_row = doc.add_row(inner_table, None).unwrap();
        let inner_cell = doc.add_cell(inner_row, None, CellStyle::default()).unwrap();
        let text = doc.add_text(inner_cell, "deep", None, None).unwrap();
        assert_eq!(doc.node(cell).unwrap().depth, 0);
        assert_eq!(doc.node(inner_table).unwrap().depth, 1);
        assert_eq!(doc.node(text).unwrap().depth, 2);
    }

    #[test]
    fn test_illegal_nesting_leaves_tree_untouched() {
        let (mut doc, section) = doc_with_section();
        let text = doc.add_text(section, "x", None, None).unwrap();
        let err = doc.add_text(text, "nested", None, None).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add Text in Text");
        assert_eq!(doc.count_children(section).unwrap(), 1);
    }

    #[test]
    fn test_footnote_gets_own_doc_part() {
        let (mut doc, section) = doc_with_section();
        let first = doc.add_footnote(section, None).unwrap();
        let second = doc.add_footnote(section, None).unwrap();
        assert_eq!(
            doc.node(first).unwrap().doc_part,
            DocPart::new(DocPartKind::Footnote, 1)
        );
        assert_eq!(
            doc.node(second).unwrap().doc_part,
            DocPart::new(DocPartKind::Footnote, 2)
        );
        // content added to the note inherits the note's doc part
        let text = doc.add_text(second, "note body", None, None).unwrap();
        assert_eq!(doc.node(text).unwrap().doc_part.kind, DocPartKind::Footnote);
    }

    #[test]
    fn test_footnote_illegal_outside_section() {
        let (mut doc, section) = doc_with_section();
        let header = doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        assert!(doc.add_footnote(header, None).is_err());
    }

    #[test]
    fn test_header_part_ids_flatten_section_and_slot() {
        let mut doc = Document::new();
        let s1 = doc.add_section(SectionStyle::a4());
        let s2 = doc.add_section(SectionStyle::a4());
        let h1 = doc.add_header(s1, HeaderFooterSlot::Default).unwrap();
        let h2 = doc.add_header(s1, HeaderFooterSlot::Even).unwrap();
        let h3 = doc.add_header(s2, HeaderFooterSlot::First).unwrap();
        assert_eq!(doc.node(h1).unwrap().doc_part.id, 1);
        assert_eq!(doc.node(h2).unwrap().doc_part.id, 3);
        assert_eq!(doc.node(h3).unwrap().doc_part.id, 5);
        assert_eq!(doc.node(h3).unwrap().doc_part.bucket(), "header5");
    }

    #[test]
    fn test_duplicate_header_slot_rejected() {
        let (mut doc, section) = doc_with_section();
        doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        assert!(doc.add_header(section, HeaderFooterSlot::Default).is_err());
    }

    #[test]
    fn test_first_page_header_sets_title_page() {
        let (mut doc, section) = doc_with_section();
        doc.add_header(section, HeaderFooterSlot::First).unwrap();
        match &doc.node(section).unwrap().payload {
            Payload::Section { style } => assert!(style.title_page),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_even_header_flips_setting() {
        let (mut doc, section) = doc_with_section();
        assert!(!doc.settings.even_and_odd_headers);
        doc.add_footer(section, HeaderFooterSlot::Even).unwrap();
        assert!(doc.settings.even_and_odd_headers);
    }

    #[test]
    fn test_text_break_count() {
        let (mut doc, section) = doc_with_section();
        doc.add_text_break(section, 3, None, None).unwrap();
        assert_eq!(doc.count_children(section).unwrap(), 3);
    }

    #[test]
    fn test_link_media_registration() {
        let (mut doc, section) = doc_with_section();
        let link = doc
            .add_link(section, "https://example.com", "site", false, None)
            .unwrap();
        match &doc.node(link).unwrap().payload {
            Payload::Link { media_id, .. } => assert_eq!(*media_id, 1),
            other => panic!("unexpected payload {:?}", other),
        }
        assert_eq!(doc.media.bucket("section").len(), 1);
        // internal links register nothing
        doc.add_link(section, "anchor", "go", true, None).unwrap();
        assert_eq!(doc.media.bucket("section").len(), 1);
    }

    #[test]
    fn test_image_in_header_uses_header_bucket() {
        let (mut doc, section) = doc_with_section();
        let header = doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        let source = ImageSource::Memory {
            bytes: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
            name: "logo".to_string(),
        };
        doc.add_image(header, source, None, None).unwrap();
        assert_eq!(doc.media.bucket("header1").len(), 1);
        assert!(doc.media.bucket("section").is_empty());
    }

    #[test]
    fn test_bad_image_mutates_nothing() {
        let (mut doc, section) = doc_with_section();
        let source = ImageSource::Memory {
            bytes: vec![0, 1, 2, 3],
            name: "junk".to_string(),
        };
        assert!(doc.add_image(section, source, None, None).is_err());
        assert!(doc.media.is_empty());
        assert_eq!(doc.count_children(section).unwrap(), 0);
    }

    #[test]
    fn test_title_registration() {
        let (mut doc, section) = doc_with_section();
        doc.add_title(section, "One", 1).unwrap();
        let t2 = doc.add_title(section, "Two", 2).unwrap();
        match &doc.node(t2).unwrap().payload {
            Payload::Title { collection_id, .. } => assert_eq!(*collection_id, 2),
            other => panic!("unexpected payload {:?}", other),
        }
        assert_eq!(doc.collections.titles.len(), 2);
        assert!(doc.add_title(section, "deep", 10).is_err());
    }

    #[test]
    fn test_comment_anchoring() {
        let (mut doc, section) = doc_with_section();
        let text = doc.add_text(section, "annotated", None, None).unwrap();
        let comment = doc.add_comment("Reviewer", "RV", Utc::now());
        doc.set_comment_range_start(text, comment).unwrap();
        doc.set_comment_range_start(text, comment).unwrap();
        doc.set_comment_range_end(text, comment).unwrap();
        assert_eq!(doc.node(text).unwrap().comment_start, Some(comment));
        match &doc.node(comment).unwrap().payload {
            Payload::Comment {
                range_start,
                range_end,
                ..
            } => {
                assert_eq!(*range_start, Some(text));
                assert_eq!(*range_end, Some(text));
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_comment_cannot_anchor_comment() {
        let mut doc = Document::new();
        let a = doc.add_comment("A", "A", Utc::now());
        let b = doc.add_comment("B", "B", Utc::now());
        assert!(doc.set_comment_range_start(a, b).is_err());
    }

    #[test]
    fn test_remove_child_keeps_ids() {
        let (mut doc, section) = doc_with_section();
        let note = doc.add_footnote(section, None).unwrap();
        doc.remove_child(section, note).unwrap();
        assert_eq!(doc.count_children(section).unwrap(), 0);
        // collection id survives detachment
        assert_eq!(doc.collections.footnotes.len(), 1);
        let next = doc.add_footnote(section, None).unwrap();
        match &doc.node(next).unwrap().payload {
            Payload::Footnote { collection_id, .. } => assert_eq!(*collection_id, 2),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_get_child_out_of_range_is_none() {
        let (mut doc, section) = doc_with_section();
        let only = doc.add_text(section, "only", None, None).unwrap();
        assert_eq!(doc.get_child(section, 0).unwrap(), Some(only));
        assert_eq!(doc.get_child(section, 1).unwrap(), None);
    }

    #[test]
    fn test_document_serde_roundtrip() {
        let (mut doc, section) = doc_with_section();
        doc.add_text(section, "persisted", None, None).unwrap();
        doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        doc.numbering.register_decimal();
        let json = serde_json::to_string(&doc).unwrap();
        let restored: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, restored);
    }
}
