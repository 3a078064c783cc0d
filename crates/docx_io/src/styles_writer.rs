//! word/styles.xml
//!
//! Document defaults come from the settings' default font, then the
//! built-in styles every package carries, then the registered named
//! styles. Heading and title styles write a linked character style so
//! runs inside them can reference the same formatting.

use crate::element_writer::{style_id, write_font_properties, write_paragraph_properties};
use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::XML_DECLARATION;
use doc_model::{Document, FontStyle, NamedStyle, ParagraphStyle, TableStyle};

pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &Document) -> DocxResult<String> {
        let mut xml = String::with_capacity(8 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        self.write_doc_defaults(&mut xml, doc);
        self.write_builtin_styles(&mut xml);

        for (name, style) in doc.styles.all() {
            match style {
                NamedStyle::Font(font) => self.write_character_style(&mut xml, name, font),
                NamedStyle::Paragraph(paragraph) => {
                    self.write_paragraph_style(&mut xml, name, paragraph, None)
                }
                NamedStyle::Title {
                    font, paragraph, ..
                } => self.write_title_style(&mut xml, name, font, paragraph),
                NamedStyle::Table(table) => self.write_table_style(&mut xml, name, table),
            }
        }

        xml.push_str("</w:styles>");
        Ok(xml)
    }

    fn write_doc_defaults(&self, xml: &mut String, doc: &Document) {
        let half_points = (doc.settings.default_font_size * 2.0).round() as i32;
        let name = escape_xml(&doc.settings.default_font_name);
        xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{n}" w:hAnsi="{n}" w:cs="{n}"/>"#,
            n = name
        ));
        xml.push_str(&format!(
            r#"<w:sz w:val="{v}"/><w:szCs w:val="{v}"/>"#,
            v = half_points
        ));
        xml.push_str("</w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>");
    }

    /// Styles referenced by generated content regardless of what the
    /// registry holds
    fn write_builtin_styles(&self, xml: &mut String) {
        xml.push_str(concat!(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#,
            r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#
        ));
        xml.push_str(concat!(
            r#"<w:style w:type="character" w:styleId="Hyperlink">"#,
            r#"<w:name w:val="Hyperlink"/>"#,
            r#"<w:rPr><w:color w:val="0563C1"/><w:u w:val="single"/></w:rPr></w:style>"#
        ));
        xml.push_str(concat!(
            r#"<w:style w:type="character" w:styleId="FootnoteReference">"#,
            r#"<w:name w:val="footnote reference"/>"#,
            r#"<w:rPr><w:vertAlign w:val="superscript"/></w:rPr></w:style>"#
        ));
        xml.push_str(concat!(
            r#"<w:style w:type="character" w:styleId="EndnoteReference">"#,
            r#"<w:name w:val="endnote reference"/>"#,
            r#"<w:rPr><w:vertAlign w:val="superscript"/></w:rPr></w:style>"#
        ));
        xml.push_str(concat!(
            r#"<w:style w:type="character" w:styleId="CommentReference">"#,
            r#"<w:name w:val="annotation reference"/>"#,
            r#"<w:rPr><w:sz w:val="16"/><w:szCs w:val="16"/></w:rPr></w:style>"#
        ));
        xml.push_str(concat!(
            r#"<w:style w:type="paragraph" w:styleId="ListParagraph">"#,
            r#"<w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/>"#,
            r#"<w:pPr><w:ind w:left="720"/><w:contextualSpacing/></w:pPr></w:style>"#
        ));
    }

    fn write_character_style(&self, xml: &mut String, name: &str, font: &FontStyle) {
        xml.push_str(&format!(
            r#"<w:style w:type="character" w:styleId="{}">"#,
            style_id(name)
        ));
        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(name)));
        write_font_properties(xml, font);
        xml.push_str("</w:style>");
    }

    fn write_paragraph_style(
        &self,
        xml: &mut String,
        name: &str,
        paragraph: &ParagraphStyle,
        font: Option<&FontStyle>,
    ) {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{}">"#,
            style_id(name)
        ));
        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(name)));
        xml.push_str(r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/>"#);
        if !paragraph.is_empty() {
            xml.push_str("<w:pPr>");
            write_paragraph_properties(xml, paragraph);
            xml.push_str("</w:pPr>");
        }
        if let Some(font) = font {
            write_font_properties(xml, font);
        }
        xml.push_str("</w:style>");
    }

    fn write_title_style(
        &self,
        xml: &mut String,
        name: &str,
        font: &FontStyle,
        paragraph: &ParagraphStyle,
    ) {
        let id = style_id(name);
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{}">"#,
            id
        ));
        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(name)));
        xml.push_str(r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/>"#);
        xml.push_str(&format!(r#"<w:link w:val="{}Char"/><w:qFormat/>"#, id));
        xml.push_str("<w:pPr>");
        write_paragraph_properties(xml, paragraph);
        xml.push_str("</w:pPr>");
        write_font_properties(xml, font);
        xml.push_str("</w:style>");

        // linked character style with the same run formatting
        xml.push_str(&format!(
            r#"<w:style w:type="character" w:styleId="{id}Char">"#,
            id = id
        ));
        xml.push_str(&format!(
            r#"<w:name w:val="{} Char"/><w:link w:val="{}"/>"#,
            escape_xml(name),
            id
        ));
        write_font_properties(xml, font);
        xml.push_str("</w:style>");
    }

    fn write_table_style(&self, xml: &mut String, name: &str, table: &TableStyle) {
        xml.push_str(&format!(
            r#"<w:style w:type="table" w:styleId="{}">"#,
            style_id(name)
        ));
        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(name)));
        xml.push_str("<w:tblPr>");
        if let Some(border) = &table.borders {
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
        let margins = [
            ("top", table.cell_margin_top),
            ("left", table.cell_margin_left),
            ("bottom", table.cell_margin_bottom),
            ("right", table.cell_margin_right),
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
        xml.push_str("</w:tblPr></w:style>");
    }
}
