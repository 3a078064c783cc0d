//! Element serialization
//!
//! Turns document-tree nodes into WordprocessingML. Elements render
//! differently depending on where they land: in block context a text
//! element becomes its own paragraph, in inline context it is a bare run
//! inside the enclosing paragraph. Payloads a context cannot host are
//! skipped; the legality tables keep those combinations out of the tree
//! in the first place.

use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::rel_index::RelIndex;
use doc_model::{
    ChangeKind, Document, FieldData, FieldOption, FieldProperty, FontStyle, LineSpacing, Node,
    NodeHandle, ParagraphStyle, Payload, StyleRef, TableWidth, Twip,
};

/// Style ids are the style name with whitespace stripped
pub(crate) fn style_id(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Writer for body-level and nested element content
pub struct ElementWriter<'a> {
    doc: &'a Document,
    index: &'a RelIndex,
}

impl<'a> ElementWriter<'a> {
    pub fn new(doc: &'a Document, index: &'a RelIndex) -> Self {
        Self { doc, index }
    }

    /// Write a container's children in block context
    pub fn write_block_children(&self, xml: &mut String, parent: &Node) -> DocxResult<()> {
        for &child in &parent.children {
            self.write_block(xml, child)?;
        }
        Ok(())
    }

    /// Write one element in block context
    pub fn write_block(&self, xml: &mut String, handle: NodeHandle) -> DocxResult<()> {
        let node = self.doc.node(handle)?;
        match &node.payload {
            Payload::Text {
                content,
                font,
                paragraph,
            } => {
                xml.push_str("<w:p>");
                self.write_ppr(xml, paragraph, None)?;
                self.write_comment_starts(xml, node)?;
                self.write_text_run(xml, node, content, font)?;
                self.write_comment_ends(xml, node)?;
                xml.push_str("</w:p>");
            }
            Payload::TextRun { paragraph } => {
                xml.push_str("<w:p>");
                self.write_ppr(xml, paragraph, None)?;
                self.write_comment_starts(xml, node)?;
                self.write_inline_children(xml, node)?;
                self.write_comment_ends(xml, node)?;
                xml.push_str("</w:p>");
            }
            Payload::TextBreak { paragraph, .. } => {
                xml.push_str("<w:p>");
                self.write_ppr(xml, paragraph, None)?;
                xml.push_str("</w:p>");
            }
            Payload::PageBreak => {
                xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
            }
            Payload::Link { paragraph, .. } => {
                xml.push_str("<w:p>");
                self.write_ppr(xml, paragraph, None)?;
                self.write_inline(xml, handle)?;
                xml.push_str("</w:p>");
            }
            Payload::Image { .. }
            | Payload::Chart { .. }
            | Payload::Object { .. }
            | Payload::Line { .. }
            | Payload::Shape { .. } => {
                xml.push_str("<w:p>");
                self.write_inline(xml, handle)?;
                xml.push_str("</w:p>");
            }
            Payload::Field { .. } | Payload::Footnote { .. } | Payload::Endnote { .. } => {
                xml.push_str("<w:p>");
                self.write_inline(xml, handle)?;
                xml.push_str("</w:p>");
            }
            Payload::Bookmark { .. } => self.write_inline(xml, handle)?,
            Payload::Table { .. } => self.write_table(xml, node)?,
            Payload::Title {
                depth,
                text,
                collection_id,
            } => self.write_title(xml, *depth, text, *collection_id)?,
            Payload::ListItem {
                text,
                depth,
                num_id,
                font,
                paragraph,
            } => {
                xml.push_str("<w:p>");
                self.write_ppr_numbered(xml, paragraph, *depth, num_id.0)?;
                self.write_text_run(xml, node, text, font)?;
                xml.push_str("</w:p>");
            }
            Payload::ListItemRun {
                depth,
                num_id,
                paragraph,
            } => {
                xml.push_str("<w:p>");
                self.write_ppr_numbered(xml, paragraph, *depth, num_id.0)?;
                self.write_inline_children(xml, node)?;
                xml.push_str("</w:p>");
            }
            Payload::CheckBox {
                name,
                text,
                checked,
                font,
                paragraph,
            } => {
                xml.push_str("<w:p>");
                self.write_ppr(xml, paragraph, None)?;
                self.write_checkbox_runs(xml, name, text, *checked, font)?;
                xml.push_str("</w:p>");
            }
            Payload::PreserveText {
                text,
                font,
                paragraph,
            } => {
                xml.push_str("<w:p>");
                self.write_ppr(xml, paragraph, None)?;
                self.write_preserve_text(xml, text, font)?;
                xml.push_str("</w:p>");
            }
            Payload::Toc {
                min_depth,
                max_depth,
                font,
            } => self.write_toc(xml, *min_depth, *max_depth, font)?,
            Payload::TextBox { style } => self.write_text_box(xml, node, style)?,
            Payload::FormField { .. } => {
                xml.push_str("<w:p>");
                self.write_form_field(xml, node)?;
                xml.push_str("</w:p>");
            }
            Payload::Sdt { .. } => {
                xml.push_str("<w:p>");
                self.write_sdt(xml, node)?;
                xml.push_str("</w:p>");
            }
            Payload::TrackChangeRun => {
                xml.push_str("<w:p>");
                self.write_inline_children(xml, node)?;
                xml.push_str("</w:p>");
            }
            // Structural payloads are written by their own part writers
            Payload::Section { .. }
            | Payload::Header { .. }
            | Payload::Footer { .. }
            | Payload::Row { .. }
            | Payload::Cell { .. }
            | Payload::Comment { .. } => {}
        }
        Ok(())
    }

    /// Write a container's children in inline context
    fn write_inline_children(&self, xml: &mut String, parent: &Node) -> DocxResult<()> {
        for &child in &parent.children {
            self.write_inline(xml, child)?;
        }
        Ok(())
    }

    /// Write one element in inline context
    pub fn write_inline(&self, xml: &mut String, handle: NodeHandle) -> DocxResult<()> {
        let node = self.doc.node(handle)?;
        match &node.payload {
            Payload::Text { content, font, .. } => {
                self.write_comment_starts(xml, node)?;
                self.write_text_run(xml, node, content, font)?;
                self.write_comment_ends(xml, node)?;
            }
            Payload::TextBreak { font, .. } => {
                xml.push_str("<w:r>");
                self.write_rpr(xml, font)?;
                xml.push_str("<w:br/></w:r>");
            }
            Payload::Link {
                url,
                text,
                internal,
                font,
                media_id,
                ..
            } => {
                if *internal {
                    xml.push_str(&format!(
                        r#"<w:hyperlink w:anchor="{}">"#,
                        escape_xml(url)
                    ));
                } else {
                    let rid = self
                        .index
                        .media_rid(&node.doc_part.bucket(), *media_id)?;
                    xml.push_str(&format!(r#"<w:hyperlink r:id="rId{}">"#, rid));
                }
                xml.push_str("<w:r>");
                match font {
                    Some(_) => self.write_rpr(xml, font)?,
                    None => xml.push_str(r#"<w:rPr><w:rStyle w:val="Hyperlink"/></w:rPr>"#),
                }
                xml.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape_xml(text)
                ));
                xml.push_str("</w:r></w:hyperlink>");
            }
            Payload::Image { data } => {
                let rid = self
                    .index
                    .media_rid(&node.doc_part.bucket(), data.media_id)?;
                xml.push_str("<w:r>");
                self.write_drawing(
                    xml,
                    rid,
                    data.media_id,
                    data.width_emu().0,
                    data.height_emu().0,
                )?;
                xml.push_str("</w:r>");
            }
            Payload::Object {
                media_id, icon, ..
            } => {
                self.write_object(xml, node, *media_id, icon)?;
            }
            Payload::Chart {
                collection_id,
                width,
                height,
                ..
            } => {
                let rid = self.index.chart_rid(*collection_id)?;
                xml.push_str("<w:r><w:drawing>");
                xml.push_str(&format!(
                    r#"<wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{}" cy="{}"/><wp:docPr id="{}" name="Chart {}"/>"#,
                    width.0, height.0, collection_id, collection_id
                ));
                xml.push_str(&format!(r#"<a:graphic xmlns:a="{}">"#, namespaces::A));
                xml.push_str(&format!(
                    r#"<a:graphicData uri="{ns}"><c:chart xmlns:c="{ns}" r:id="rId{}"/></a:graphicData>"#,
                    rid,
                    ns = namespaces::C
                ));
                xml.push_str("</a:graphic></wp:inline></w:drawing></w:r>");
            }
            Payload::Field { data, font } => self.write_field(xml, data, font)?,
            Payload::Footnote { collection_id, .. } => {
                xml.push_str(r#"<w:r><w:rPr><w:rStyle w:val="FootnoteReference"/></w:rPr>"#);
                xml.push_str(&format!(
                    r#"<w:footnoteReference w:id="{}"/></w:r>"#,
                    collection_id + 1
                ));
            }
            Payload::Endnote { collection_id, .. } => {
                xml.push_str(r#"<w:r><w:rPr><w:rStyle w:val="EndnoteReference"/></w:rPr>"#);
                xml.push_str(&format!(
                    r#"<w:endnoteReference w:id="{}"/></w:r>"#,
                    collection_id + 1
                ));
            }
            Payload::Bookmark { name, id } => {
                xml.push_str(&format!(
                    r#"<w:bookmarkStart w:id="{id}" w:name="{}"/><w:bookmarkEnd w:id="{id}"/>"#,
                    escape_xml(name),
                    id = id
                ));
            }
            Payload::CheckBox {
                name,
                text,
                checked,
                font,
                ..
            } => self.write_checkbox_runs(xml, name, text, *checked, font)?,
            Payload::Line { style } => {
                xml.push_str("<w:r><w:pict>");
                let color = style
                    .color
                    .map(|c| format!("#{}", c.hex()))
                    .unwrap_or_else(|| "#000000".to_string());
                xml.push_str(&format!(
                    r#"<v:line xmlns:v="{}" from="0,0" to="{}pt,0pt" strokecolor="{}" strokeweight="{}pt"/>"#,
                    namespaces::V,
                    style.length,
                    color,
                    style.weight
                ));
                xml.push_str("</w:pict></w:r>");
            }
            Payload::Shape { shape_type, style } => {
                xml.push_str("<w:r><w:pict>");
                xml.push_str(&format!(
                    r##"<v:shape xmlns:v="{}" type="#{}" style="width:{}pt;height:{}pt"/>"##,
                    namespaces::V,
                    escape_xml(shape_type),
                    style.width,
                    style.height
                ));
                xml.push_str("</w:pict></w:r>");
            }
            Payload::TrackChangeRun => self.write_inline_children(xml, node)?,
            Payload::Sdt { .. } => self.write_sdt(xml, node)?,
            Payload::FormField { .. } => self.write_form_field(xml, node)?,
            // Block-only and structural payloads have no inline rendering
            _ => {}
        }
        Ok(())
    }

    // ---- runs and properties ---------------------------------------------

    /// A text run, wrapped in `w:ins`/`w:del` when the node carries a
    /// tracked change. Deleted text uses `w:delText`.
    fn write_text_run(
        &self,
        xml: &mut String,
        node: &Node,
        content: &str,
        font: &Option<StyleRef<FontStyle>>,
    ) -> DocxResult<()> {
        let change = node.change.as_ref();
        if let Some(change) = change {
            let tag = match change.kind {
                ChangeKind::Inserted => "w:ins",
                ChangeKind::Deleted => "w:del",
            };
            xml.push_str(&format!(
                r#"<{} w:id="{}" w:author="{}" w:date="{}">"#,
                tag,
                node.handle.index() + 1,
                escape_xml(&change.author),
                change.date.format("%Y-%m-%dT%H:%M:%SZ")
            ));
        }
        xml.push_str("<w:r>");
        self.write_rpr(xml, font)?;
        let deleted = matches!(change.map(|c| c.kind), Some(ChangeKind::Deleted));
        let tag = if deleted { "w:delText" } else { "w:t" };
        xml.push_str(&format!(
            r#"<{tag} xml:space="preserve">{}</{tag}>"#,
            escape_xml(content),
            tag = tag
        ));
        xml.push_str("</w:r>");
        if let Some(change) = change {
            xml.push_str(match change.kind {
                ChangeKind::Inserted => "</w:ins>",
                ChangeKind::Deleted => "</w:del>",
            });
        }
        Ok(())
    }

    /// Run properties from a style reference: a named style becomes
    /// `w:rStyle`, inline properties are written out.
    fn write_rpr(&self, xml: &mut String, font: &Option<StyleRef<FontStyle>>) -> DocxResult<()> {
        match font {
            None => {}
            Some(StyleRef::Named(name)) => {
                xml.push_str(&format!(
                    r#"<w:rPr><w:rStyle w:val="{}"/></w:rPr>"#,
                    style_id(name)
                ));
            }
            Some(StyleRef::Inline(font)) => write_font_properties(xml, font),
        }
        Ok(())
    }

    fn write_ppr(
        &self,
        xml: &mut String,
        paragraph: &Option<StyleRef<ParagraphStyle>>,
        num: Option<(u32, u32)>,
    ) -> DocxResult<()> {
        let has_style = paragraph.is_some() || num.is_some();
        if !has_style {
            return Ok(());
        }
        xml.push_str("<w:pPr>");
        match paragraph {
            None => {}
            Some(StyleRef::Named(name)) => {
                xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style_id(name)));
            }
            Some(StyleRef::Inline(p)) => write_paragraph_properties(xml, p),
        }
        if let Some((level, num_id)) = num {
            xml.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                level, num_id
            ));
        }
        xml.push_str("</w:pPr>");
        Ok(())
    }

    fn write_ppr_numbered(
        &self,
        xml: &mut String,
        paragraph: &Option<StyleRef<ParagraphStyle>>,
        level: u32,
        num_id: u32,
    ) -> DocxResult<()> {
        xml.push_str("<w:pPr>");
        match paragraph {
            None => xml.push_str(r#"<w:pStyle w:val="ListParagraph"/>"#),
            Some(StyleRef::Named(name)) => {
                xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style_id(name)));
            }
            Some(StyleRef::Inline(p)) => write_paragraph_properties(xml, p),
        }
        xml.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            level, num_id
        ));
        xml.push_str("</w:pPr>");
        Ok(())
    }

    // ---- comment anchors -------------------------------------------------

    fn comment_id(&self, comment: NodeHandle) -> DocxResult<u32> {
        match &self.doc.node(comment)?.payload {
            Payload::Comment { collection_id, .. } => Ok(*collection_id),
            _ => Ok(0),
        }
    }

    fn write_comment_starts(&self, xml: &mut String, node: &Node) -> DocxResult<()> {
        if let Some(comment) = node.comment_start {
            let id = self.comment_id(comment)?;
            xml.push_str(&format!(r#"<w:commentRangeStart w:id="{}"/>"#, id));
        }
        Ok(())
    }

    fn write_comment_ends(&self, xml: &mut String, node: &Node) -> DocxResult<()> {
        if let Some(comment) = node.comment_end {
            let id = self.comment_id(comment)?;
            xml.push_str(&format!(r#"<w:commentRangeEnd w:id="{}"/>"#, id));
            xml.push_str(&format!(
                r#"<w:r><w:rPr><w:rStyle w:val="CommentReference"/></w:rPr><w:commentReference w:id="{}"/></w:r>"#,
                id
            ));
        }
        Ok(())
    }

    // ---- titles and TOC --------------------------------------------------

    fn write_title(
        &self,
        xml: &mut String,
        depth: u32,
        text: &str,
        collection_id: u32,
    ) -> DocxResult<()> {
        let style = if depth == 0 {
            "Title".to_string()
        } else {
            format!("Heading{}", depth)
        };
        // TOC hyperlinks target these bookmarks; ids are offset past user
        // bookmarks
        let bookmark_id = 1_000_000 + collection_id;
        xml.push_str("<w:p>");
        xml.push_str(&format!(
            r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#,
            style
        ));
        xml.push_str(&format!(
            r#"<w:bookmarkStart w:id="{id}" w:name="_Toc{id}"/>"#,
            id = bookmark_id
        ));
        xml.push_str(&format!(
            r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
            escape_xml(text)
        ));
        xml.push_str(&format!(r#"<w:bookmarkEnd w:id="{}"/>"#, bookmark_id));
        xml.push_str("</w:p>");
        Ok(())
    }

    /// One paragraph per gathered title: hyperlink to the title bookmark,
    /// a tab, and a PAGEREF field. The TOC field instruction opens in the
    /// first paragraph and closes in the last.
    fn write_toc(
        &self,
        xml: &mut String,
        min_depth: u32,
        max_depth: u32,
        font: &Option<FontStyle>,
    ) -> DocxResult<()> {
        let titles: Vec<(u32, &Node)> = self
            .doc
            .collections
            .titles
            .iter()
            .filter_map(|(id, handle)| self.doc.node(handle).ok().map(|n| (id, n)))
            .filter(|(_, n)| match &n.payload {
                Payload::Title { depth, .. } => *depth >= min_depth && *depth <= max_depth,
                _ => false,
            })
            .collect();

        for (position, (id, node)) in titles.iter().enumerate() {
            let Payload::Title { depth, text, .. } = &node.payload else {
                continue;
            };
            let indent = (depth.saturating_sub(min_depth)) * 440;
            xml.push_str("<w:p><w:pPr>");
            xml.push_str(&format!(r#"<w:tabs><w:tab w:val="right" w:leader="dot" w:pos="9062"/></w:tabs><w:ind w:left="{}"/>"#, indent));
            xml.push_str("</w:pPr>");
            if position == 0 {
                xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#);
                xml.push_str(&format!(
                    r#"<w:r><w:instrText xml:space="preserve"> TOC \o "{}-{}" \h \z \u </w:instrText></w:r>"#,
                    min_depth, max_depth
                ));
                xml.push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
            }
            let bookmark = format!("_Toc{}", 1_000_000 + id);
            xml.push_str(&format!(r#"<w:hyperlink w:anchor="{}" w:history="1">"#, bookmark));
            xml.push_str("<w:r>");
            if let Some(font) = font {
                write_font_properties(xml, font);
            }
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(text)
            ));
            xml.push_str(r#"<w:r><w:tab/></w:r>"#);
            xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#);
            xml.push_str(&format!(
                r#"<w:r><w:instrText xml:space="preserve"> PAGEREF {} \h </w:instrText></w:r>"#,
                bookmark
            ));
            xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
            xml.push_str("</w:hyperlink>");
            if position == titles.len() - 1 {
                xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
            }
            xml.push_str("</w:p>");
        }
        Ok(())
    }

    // ---- fields ----------------------------------------------------------

    fn write_field(
        &self,
        xml: &mut String,
        data: &FieldData,
        font: &Option<StyleRef<FontStyle>>,
    ) -> DocxResult<()> {
        xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#);
        xml.push_str("<w:r>");
        self.write_rpr(xml, font)?;
        xml.push_str(&format!(
            r#"<w:instrText xml:space="preserve"> {} </w:instrText></w:r>"#,
            escape_xml(&build_instruction(data))
        ));
        if let Some(text) = &data.text {
            xml.push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
            xml.push_str("<w:r>");
            self.write_rpr(xml, font)?;
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(text)
            ));
        }
        xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
        Ok(())
    }

    /// Runs of literal text interleaved with `{FIELD}` instructions, the
    /// form headers and footers use for page numbering
    fn write_preserve_text(
        &self,
        xml: &mut String,
        text: &str,
        font: &Option<StyleRef<FontStyle>>,
    ) -> DocxResult<()> {
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            let (before, tail) = rest.split_at(open);
            if !before.is_empty() {
                xml.push_str("<w:r>");
                self.write_rpr(xml, font)?;
                xml.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                    escape_xml(before)
                ));
            }
            let Some(close) = tail.find('}') else {
                rest = tail;
                break;
            };
            let instruction = &tail[1..close];
            xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#);
            xml.push_str("<w:r>");
            self.write_rpr(xml, font)?;
            xml.push_str(&format!(
                r#"<w:instrText xml:space="preserve"> {} </w:instrText></w:r>"#,
                escape_xml(instruction)
            ));
            xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
            rest = &tail[close + 1..];
        }
        if !rest.is_empty() {
            xml.push_str("<w:r>");
            self.write_rpr(xml, font)?;
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(rest)
            ));
        }
        Ok(())
    }

    fn write_checkbox_runs(
        &self,
        xml: &mut String,
        name: &str,
        text: &str,
        checked: bool,
        font: &Option<StyleRef<FontStyle>>,
    ) -> DocxResult<()> {
        xml.push_str("<w:r><w:fldChar w:fldCharType=\"begin\"><w:ffData>");
        xml.push_str(&format!(r#"<w:name w:val="{}"/><w:enabled/>"#, escape_xml(name)));
        xml.push_str(&format!(
            r#"<w:checkBox><w:sizeAuto/><w:default w:val="{}"/></w:checkBox>"#,
            u8::from(checked)
        ));
        xml.push_str("</w:ffData></w:fldChar></w:r>");
        xml.push_str(r#"<w:r><w:instrText xml:space="preserve"> FORMCHECKBOX </w:instrText></w:r>"#);
        xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
        if !text.is_empty() {
            xml.push_str("<w:r>");
            self.write_rpr(xml, font)?;
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve"> {}</w:t></w:r>"#,
                escape_xml(text)
            ));
        }
        Ok(())
    }

    fn write_form_field(&self, xml: &mut String, node: &Node) -> DocxResult<()> {
        let Payload::FormField {
            field_type,
            name,
            default,
            value,
            entries,
            font,
            ..
        } = &node.payload
        else {
            return Ok(());
        };
        use doc_model::FormFieldType::*;
        let instruction = match field_type {
            TextInput => "FORMTEXT",
            CheckBox => "FORMCHECKBOX",
            DropDown => "FORMDROPDOWN",
        };
        xml.push_str("<w:r><w:fldChar w:fldCharType=\"begin\"><w:ffData>");
        xml.push_str(&format!(r#"<w:name w:val="{}"/><w:enabled/>"#, escape_xml(name)));
        match field_type {
            TextInput => {
                xml.push_str(&format!(
                    r#"<w:textInput><w:default w:val="{}"/></w:textInput>"#,
                    escape_xml(default)
                ));
            }
            CheckBox => {
                xml.push_str(&format!(
                    r#"<w:checkBox><w:sizeAuto/><w:default w:val="{}"/></w:checkBox>"#,
                    u8::from(value == "1" || value == "true")
                ));
            }
            DropDown => {
                xml.push_str("<w:ddList>");
                for entry in entries {
                    xml.push_str(&format!(
                        r#"<w:listEntry w:val="{}"/>"#,
                        escape_xml(entry)
                    ));
                }
                xml.push_str("</w:ddList>");
            }
        }
        xml.push_str("</w:ffData></w:fldChar></w:r>");
        xml.push_str(&format!(
            r#"<w:r><w:instrText xml:space="preserve"> {} </w:instrText></w:r>"#,
            instruction
        ));
        xml.push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
        if *field_type == TextInput && !value.is_empty() {
            xml.push_str("<w:r>");
            self.write_rpr(xml, font)?;
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(value)
            ));
        }
        xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
        Ok(())
    }

    fn write_sdt(&self, xml: &mut String, node: &Node) -> DocxResult<()> {
        let Payload::Sdt {
            sdt_type,
            alias,
            tag,
            value,
            list_items,
        } = &node.payload
        else {
            return Ok(());
        };
        use doc_model::SdtType::*;
        xml.push_str("<w:sdt><w:sdtPr>");
        if !alias.is_empty() {
            xml.push_str(&format!(r#"<w:alias w:val="{}"/>"#, escape_xml(alias)));
        }
        if !tag.is_empty() {
            xml.push_str(&format!(r#"<w:tag w:val="{}"/>"#, escape_xml(tag)));
        }
        xml.push_str(&format!(r#"<w:id w:val="{}"/>"#, node.handle.index() + 1));
        match sdt_type {
            PlainText => xml.push_str("<w:text/>"),
            Date => xml.push_str("<w:date/>"),
            ComboBox | DropDownList => {
                let element = if *sdt_type == ComboBox {
                    "w:comboBox"
                } else {
                    "w:dropDownList"
                };
                xml.push_str(&format!("<{}>", element));
                for item in list_items {
                    xml.push_str(&format!(
                        r#"<w:listItem w:displayText="{v}" w:value="{v}"/>"#,
                        v = escape_xml(item)
                    ));
                }
                xml.push_str(&format!("</{}>", element));
            }
        }
        xml.push_str("</w:sdtPr><w:sdtContent>");
        xml.push_str(&format!(
            r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
            escape_xml(value)
        ));
        xml.push_str("</w:sdtContent></w:sdt>");
        Ok(())
    }

    // ---- drawings and embedded objects -----------------------------------

    fn write_drawing(
        &self,
        xml: &mut String,
        rid: u32,
        doc_pr_id: u32,
        cx: i64,
        cy: i64,
    ) -> DocxResult<()> {
        xml.push_str("<w:drawing>");
        xml.push_str(&format!(
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="Picture {id}"/>"#,
            cx = cx,
            cy = cy,
            id = doc_pr_id
        ));
        xml.push_str(&format!(r#"<a:graphic xmlns:a="{}">"#, namespaces::A));
        xml.push_str(&format!(
            r#"<a:graphicData uri="{}">"#,
            namespaces::PIC
        ));
        xml.push_str(&format!(r#"<pic:pic xmlns:pic="{}">"#, namespaces::PIC));
        xml.push_str(&format!(
            r#"<pic:nvPicPr><pic:cNvPr id="{id}" name="Picture {id}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            id = doc_pr_id
        ));
        xml.push_str(&format!(
            r#"<pic:blipFill><a:blip r:embed="rId{}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            rid
        ));
        xml.push_str(&format!(
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            cx, cy
        ));
        xml.push_str("</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>");
        Ok(())
    }

    fn write_object(
        &self,
        xml: &mut String,
        node: &Node,
        media_id: u32,
        icon: &doc_model::ImageData,
    ) -> DocxResult<()> {
        let Payload::Object { prog_id, .. } = &node.payload else {
            return Ok(());
        };
        let bucket = node.doc_part.bucket();
        let object_rid = self.index.media_rid(&bucket, media_id)?;
        let icon_rid = self.index.media_rid(&bucket, icon.media_id)?;
        let shape_id = format!("ole_{}", node.tag);
        xml.push_str("<w:r><w:object dxaOrig=\"1440\" dyaOrig=\"1440\">");
        xml.push_str(&format!(
            r##"<v:shape xmlns:v="{}" id="{}" type="#_x0000_t75" style="width:{}pt;height:{}pt">"##,
            namespaces::V,
            shape_id,
            icon.width.unwrap_or(16.0),
            icon.height.unwrap_or(16.0)
        ));
        xml.push_str(&format!(
            r#"<v:imagedata r:id="rId{}" o:title=""/></v:shape>"#,
            icon_rid
        ));
        xml.push_str(&format!(
            r#"<o:OLEObject xmlns:o="{}" Type="Embed" ProgID="{}" ShapeID="{}" DrawAspect="Icon" ObjectID="_{}" r:id="rId{}"/>"#,
            namespaces::O,
            escape_xml(prog_id),
            shape_id,
            node.tag,
            object_rid
        ));
        xml.push_str("</w:object></w:r>");
        Ok(())
    }

    fn write_text_box(
        &self,
        xml: &mut String,
        node: &Node,
        style: &doc_model::FrameStyle,
    ) -> DocxResult<()> {
        xml.push_str("<w:p><w:r><w:pict>");
        xml.push_str(&format!(
            r##"<v:shape xmlns:v="{}" id="textbox_{}" type="#_x0000_t202" style="width:{}pt;height:{}pt">"##,
            namespaces::V,
            node.tag,
            style.width,
            style.height
        ));
        xml.push_str("<v:textbox><w:txbxContent>");
        self.write_block_children(xml, node)?;
        xml.push_str("</w:txbxContent></v:textbox></v:shape>");
        xml.push_str("</w:pict></w:r></w:p>");
        Ok(())
    }

    // ---- tables ----------------------------------------------------------

    fn write_table(&self, xml: &mut String, table: &Node) -> DocxResult<()> {
        let Payload::Table { style, width } = &table.payload else {
            return Ok(());
        };
        xml.push_str("<w:tbl><w:tblPr>");
        match style {
            Some(StyleRef::Named(name)) => {
                xml.push_str(&format!(r#"<w:tblStyle w:val="{}"/>"#, style_id(name)));
            }
            Some(StyleRef::Inline(table_style)) => {
                if let Some(border) = &table_style.borders {
                    xml.push_str("<w:tblBorders>");
                    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                        xml.push_str(&format!(
                            r#"<w:{side} w:val="{}" w:sz="{}" w:color="{}"/>"#,
                            border.style.ooxml_value(),
                            border.size,
                            border.color.hex(),
                            side = side
                        ));
                    }
                    xml.push_str("</w:tblBorders>");
                }
                if let Some(alignment) = table_style.alignment {
                    xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.ooxml_value()));
                }
                if let Some(indent) = table_style.indent {
                    xml.push_str(&format!(
                        r#"<w:tblInd w:w="{}" w:type="dxa"/>"#,
                        indent.0
                    ));
                }
                let margins = [
                    ("top", table_style.cell_margin_top),
                    ("left", table_style.cell_margin_left),
                    ("bottom", table_style.cell_margin_bottom),
                    ("right", table_style.cell_margin_right),
                ];
                if margins.iter().any(|(_, m)| m.is_some()) {
                    xml.push_str("<w:tblCellMar>");
                    for (side, margin) in margins {
                        if let Some(margin) = margin {
                            xml.push_str(&format!(
                                r#"<w:{side} w:w="{}" w:type="dxa"/>"#,
                                margin.0,
                                side = side
                            ));
                        }
                    }
                    xml.push_str("</w:tblCellMar>");
                }
            }
            None => {}
        }
        let table_width = (*width).unwrap_or(TableWidth::Auto);
        xml.push_str(&format!(
            r#"<w:tblW w:w="{}" w:type="{}"/>"#,
            table_width.value(),
            table_width.unit()
        ));
        xml.push_str("</w:tblPr>");

        self.write_table_grid(xml, table)?;
        for &row in &table.children {
            self.write_row(xml, row)?;
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }

    /// The grid comes from the first row's cell widths
    fn write_table_grid(&self, xml: &mut String, table: &Node) -> DocxResult<()> {
        let Some(&first_row) = table.children.first() else {
            return Ok(());
        };
        let row = self.doc.node(first_row)?;
        xml.push_str("<w:tblGrid>");
        for &cell in &row.children {
            let cell = self.doc.node(cell)?;
            if let Payload::Cell { width, .. } = &cell.payload {
                let w = (*width).unwrap_or(Twip(0)).0;
                xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, w));
            }
        }
        xml.push_str("</w:tblGrid>");
        Ok(())
    }

    fn write_row(&self, xml: &mut String, handle: NodeHandle) -> DocxResult<()> {
        let row = self.doc.node(handle)?;
        let Payload::Row { style, height } = &row.payload else {
            return Ok(());
        };
        xml.push_str("<w:tr>");
        let exact = (*height).or(style.height);
        if exact.is_some() || style.table_header == Some(true) || style.cant_split == Some(true) {
            xml.push_str("<w:trPr>");
            if let Some(height) = exact {
                xml.push_str(&format!(
                    r#"<w:trHeight w:val="{}" w:hRule="exact"/>"#,
                    height.0
                ));
            }
            if style.table_header == Some(true) {
                xml.push_str("<w:tblHeader/>");
            }
            if style.cant_split == Some(true) {
                xml.push_str("<w:cantSplit/>");
            }
            xml.push_str("</w:trPr>");
        }
        for &cell in &row.children {
            self.write_cell(xml, cell)?;
        }
        xml.push_str("</w:tr>");
        Ok(())
    }

    fn write_cell(&self, xml: &mut String, handle: NodeHandle) -> DocxResult<()> {
        let cell = self.doc.node(handle)?;
        let Payload::Cell { style, width } = &cell.payload else {
            return Ok(());
        };
        xml.push_str("<w:tc><w:tcPr>");
        if let Some(width) = width {
            xml.push_str(&format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width.0));
        } else {
            xml.push_str(r#"<w:tcW w:w="0" w:type="auto"/>"#);
        }
        if let Some(span) = style.grid_span {
            xml.push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, span));
        }
        if let Some(merge) = style.vertical_merge {
            let val = match merge {
                doc_model::VerticalMerge::Restart => "restart",
                doc_model::VerticalMerge::Continue => "continue",
            };
            xml.push_str(&format!(r#"<w:vMerge w:val="{}"/>"#, val));
        }
        if let Some(border) = &style.borders {
            xml.push_str("<w:tcBorders>");
            for side in ["top", "left", "bottom", "right"] {
                xml.push_str(&format!(
                    r#"<w:{side} w:val="{}" w:sz="{}" w:color="{}"/>"#,
                    border.style.ooxml_value(),
                    border.size,
                    border.color.hex(),
                    side = side
                ));
            }
            xml.push_str("</w:tcBorders>");
        }
        if let Some(shading) = &style.shading {
            xml.push_str(&format!(
                r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
                shading.fill.hex()
            ));
        }
        if style.text_direction_btlr == Some(true) {
            xml.push_str(r#"<w:textDirection w:val="btLr"/>"#);
        }
        if let Some(align) = style.vertical_align {
            xml.push_str(&format!(r#"<w:vAlign w:val="{}"/>"#, align.ooxml_value()));
        }
        xml.push_str("</w:tcPr>");
        if cell.children.is_empty() {
            // a cell must contain at least one paragraph
            xml.push_str("<w:p/>");
        } else {
            self.write_block_children(xml, cell)?;
        }
        xml.push_str("</w:tc>");
        Ok(())
    }
}

/// Build a field instruction string from the configured kind, properties,
/// and options
pub(crate) fn build_instruction(data: &FieldData) -> String {
    let mut instruction = data.kind.instruction().to_string();
    for property in &data.properties {
        match property {
            FieldProperty::MacroName(v)
            | FieldProperty::StyleIdentifier(v)
            | FieldProperty::Name(v) => {
                instruction.push(' ');
                instruction.push_str(v);
            }
            FieldProperty::Format(v) => {
                instruction.push_str(&format!(r" \* {}", v));
            }
            FieldProperty::NumFormat(v) => {
                instruction.push_str(&format!(r" \# {}", v));
            }
            FieldProperty::DateFormat(v) => {
                instruction.push_str(&format!(r#" \@ "{}""#, v));
            }
        }
    }
    for option in &data.options {
        let switch = match option {
            FieldOption::PreserveFormat => r"\* MERGEFORMAT".to_string(),
            FieldOption::LunarCalendar => r"\h".to_string(),
            FieldOption::SakaEraCalendar => r"\s".to_string(),
            FieldOption::LastUsedFormat => r"\l".to_string(),
            FieldOption::Bold => r"\b".to_string(),
            FieldOption::Italic => r"\i".to_string(),
            FieldOption::Path => r"\p".to_string(),
            FieldOption::RefSwitch(c) => format!(r"\{}", c),
        };
        instruction.push(' ');
        instruction.push_str(&switch);
    }
    instruction
}

/// Inline run properties from a `FontStyle`
pub(crate) fn write_font_properties(xml: &mut String, font: &FontStyle) {
    if font.is_empty() {
        return;
    }
    xml.push_str("<w:rPr>");
    if let Some(name) = &font.name {
        let name = escape_xml(name);
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{n}" w:hAnsi="{n}" w:cs="{n}"/>"#,
            n = name
        ));
    }
    if font.bold == Some(true) {
        xml.push_str("<w:b/>");
    }
    if font.italic == Some(true) {
        xml.push_str("<w:i/>");
    }
    if font.all_caps == Some(true) {
        xml.push_str("<w:caps/>");
    }
    if font.small_caps == Some(true) {
        xml.push_str("<w:smallCaps/>");
    }
    if font.strikethrough == Some(true) {
        xml.push_str("<w:strike/>");
    }
    if font.double_strikethrough == Some(true) {
        xml.push_str("<w:dstrike/>");
    }
    if font.hidden == Some(true) {
        xml.push_str("<w:vanish/>");
    }
    if let Some(color) = font.color {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.hex()));
    }
    if let Some(spacing) = font.spacing {
        xml.push_str(&format!(r#"<w:spacing w:val="{}"/>"#, spacing.0));
    }
    if let Some(scale) = font.scale {
        xml.push_str(&format!(r#"<w:w w:val="{}"/>"#, scale));
    }
    if let Some(kerning) = font.kerning {
        xml.push_str(&format!(
            r#"<w:kern w:val="{}"/>"#,
            (kerning * 2.0).round() as i32
        ));
    }
    if let Some(size) = font.size {
        let half_points = (size * 2.0).round() as i32;
        xml.push_str(&format!(r#"<w:sz w:val="{v}"/><w:szCs w:val="{v}"/>"#, v = half_points));
    }
    if let Some(highlight) = font.highlight {
        xml.push_str(&format!(
            r#"<w:highlight w:val="{}"/>"#,
            highlight.ooxml_value()
        ));
    }
    if let Some(underline) = font.underline {
        xml.push_str(&format!(r#"<w:u w:val="{}"/>"#, underline.ooxml_value()));
    }
    if let Some(align) = font.vertical_align {
        xml.push_str(&format!(
            r#"<w:vertAlign w:val="{}"/>"#,
            align.ooxml_value()
        ));
    }
    if let Some(lang) = &font.lang {
        xml.push_str(&format!(r#"<w:lang w:val="{}"/>"#, escape_xml(lang)));
    }
    xml.push_str("</w:rPr>");
}

/// Inline paragraph properties from a `ParagraphStyle`
pub(crate) fn write_paragraph_properties(xml: &mut String, p: &ParagraphStyle) {
    if p.page_break_before == Some(true) {
        xml.push_str("<w:pageBreakBefore/>");
    }
    if p.keep_with_next == Some(true) {
        xml.push_str("<w:keepNext/>");
    }
    if p.keep_lines == Some(true) {
        xml.push_str("<w:keepLines/>");
    }
    if let Some(widows) = p.widow_control {
        if widows {
            xml.push_str("<w:widowControl/>");
        } else {
            xml.push_str(r#"<w:widowControl w:val="0"/>"#);
        }
    }
    if p.bidi == Some(true) {
        xml.push_str("<w:bidi/>");
    }
    let has_spacing = p.space_before.is_some() || p.space_after.is_some() || p.line_spacing.is_some();
    if has_spacing {
        xml.push_str("<w:spacing");
        if let Some(before) = p.space_before {
            xml.push_str(&format!(r#" w:before="{}""#, before.0));
        }
        if let Some(after) = p.space_after {
            xml.push_str(&format!(r#" w:after="{}""#, after.0));
        }
        match p.line_spacing {
            Some(LineSpacing::Multiple(factor)) => {
                xml.push_str(&format!(
                    r#" w:line="{}" w:lineRule="auto""#,
                    (factor * 240.0).round() as i32
                ));
            }
            Some(LineSpacing::Exact(pts)) => {
                xml.push_str(&format!(
                    r#" w:line="{}" w:lineRule="exact""#,
                    Twip::from_points(pts).0
                ));
            }
            Some(LineSpacing::AtLeast(pts)) => {
                xml.push_str(&format!(
                    r#" w:line="{}" w:lineRule="atLeast""#,
                    Twip::from_points(pts).0
                ));
            }
            None => {}
        }
        xml.push_str("/>");
    }
    let has_indent =
        p.indent_left.is_some() || p.indent_right.is_some() || p.indent_first_line.is_some();
    if has_indent {
        xml.push_str("<w:ind");
        if let Some(left) = p.indent_left {
            xml.push_str(&format!(r#" w:left="{}""#, left.0));
        }
        if let Some(right) = p.indent_right {
            xml.push_str(&format!(r#" w:right="{}""#, right.0));
        }
        match p.indent_first_line {
            Some(first) if first.0 < 0 => {
                xml.push_str(&format!(r#" w:hanging="{}""#, -first.0));
            }
            Some(first) => {
                xml.push_str(&format!(r#" w:firstLine="{}""#, first.0));
            }
            None => {}
        }
        xml.push_str("/>");
    }
    if let Some(alignment) = p.alignment {
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.ooxml_value()));
    }
    if let Some(level) = p.outline_level {
        xml.push_str(&format!(r#"<w:outlineLvl w:val="{}"/>"#, level));
    }
}
