//! End-to-end package tests: build a document through the model API,
//! serialize it in memory, and inspect the resulting archive.

use doc_model::{
    Border, CellStyle, ChartSeries, ChartType, Color, Document, DocumentProtection, FieldData,
    FieldKind, HeaderFooterSlot, ImageSource, ProtectionType, SectionStyle, TableStyle, Twip,
    VerticalMerge,
};
use docx_io::DocxPackage;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn png_source(name: &str) -> ImageSource {
    ImageSource::Memory {
        bytes: PNG_MAGIC.to_vec(),
        name: name.to_string(),
    }
}

/// Serialize and read back every part of the package
fn package_parts(doc: &Document) -> BTreeMap<String, Vec<u8>> {
    let cursor = DocxPackage::new(Cursor::new(Vec::new())).write(doc).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
    let mut parts = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).unwrap();
        parts.insert(file.name().to_string(), bytes);
    }
    parts
}

fn part_str<'a>(parts: &'a BTreeMap<String, Vec<u8>>, name: &str) -> &'a str {
    std::str::from_utf8(parts.get(name).unwrap_or_else(|| panic!("missing part {}", name)))
        .unwrap()
}

/// Every XML part must parse cleanly
fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => panic!("malformed xml in {}: {}", name, err),
        }
    }
}

#[test]
fn multi_section_document_with_headers_and_images() {
    let mut doc = Document::new();

    let first = doc.add_section(SectionStyle::a4());
    doc.add_title(first, "Introduction", 1).unwrap();
    doc.add_text(first, "Opening paragraph.", None, None).unwrap();
    let header = doc.add_header(first, HeaderFooterSlot::Default).unwrap();
    doc.add_preserve_text(header, "Page {PAGE} of {NUMPAGES}", None)
        .unwrap();
    doc.add_image(header, png_source("logo"), Some(40.0), Some(20.0))
        .unwrap();
    let footer = doc.add_footer(first, HeaderFooterSlot::Default).unwrap();
    doc.add_field(footer, FieldData::new(FieldKind::Date), None)
        .unwrap();

    let second = doc.add_section(SectionStyle::a4().landscape());
    doc.add_image(second, png_source("figure"), Some(200.0), Some(100.0))
        .unwrap();

    let parts = package_parts(&doc);

    // one part per header/footer plus the body image and the header image
    assert!(parts.contains_key("word/header1.xml"));
    assert!(parts.contains_key("word/footer1.xml"));
    assert!(parts.contains_key("word/media/header1_image1.png"));
    assert!(parts.contains_key("word/media/section_image1.png"));
    assert_eq!(parts["word/media/section_image1.png"], PNG_MAGIC);

    // the header's image resolves through the header's own rels file
    let header_rels = part_str(&parts, "word/_rels/header1.xml.rels");
    assert!(header_rels.contains("media/header1_image1.png"));
    let header_xml = part_str(&parts, "word/header1.xml");
    assert!(header_xml.contains(r#"r:embed="rId1""#));

    // the document references both sections' layout
    let document = part_str(&parts, "word/document.xml");
    assert_eq!(document.matches("<w:sectPr>").count(), 2);
    assert!(document.contains(r#"w:orient="landscape""#));
    assert!(document.contains("<w:headerReference"));

    for (name, bytes) in &parts {
        if name.ends_with(".xml") || name.ends_with(".rels") {
            assert_well_formed(name, std::str::from_utf8(bytes).unwrap());
        }
    }
}

#[test]
fn table_with_merged_cells() {
    let mut doc = Document::new();
    let section = doc.add_section(SectionStyle::letter());

    let style = TableStyle::new().with_borders(Border::single(
        4,
        Color::from_hex("333333").unwrap(),
    ));
    let table = doc.add_table(section, Some(style.into())).unwrap();

    let top = doc.add_row(table, None).unwrap();
    let spanning = CellStyle {
        grid_span: Some(2),
        ..CellStyle::default()
    };
    let cell = doc.add_cell(top, Some(Twip(4800)), spanning).unwrap();
    doc.add_text(cell, "Spanning header", None, None).unwrap();

    let middle = doc.add_row(table, None).unwrap();
    let restart = CellStyle {
        vertical_merge: Some(VerticalMerge::Restart),
        ..CellStyle::default()
    };
    let cell = doc.add_cell(middle, Some(Twip(2400)), restart).unwrap();
    doc.add_text(cell, "Merged", None, None).unwrap();
    let cell = doc
        .add_cell(middle, Some(Twip(2400)), CellStyle::default())
        .unwrap();
    doc.add_text(cell, "Right", None, None).unwrap();

    let bottom = doc.add_row(table, None).unwrap();
    let cont = CellStyle {
        vertical_merge: Some(VerticalMerge::Continue),
        ..CellStyle::default()
    };
    doc.add_cell(bottom, Some(Twip(2400)), cont).unwrap();
    doc.add_cell(bottom, Some(Twip(2400)), CellStyle::default())
        .unwrap();

    // nested table inside a cell
    let host = doc.add_row(table, None).unwrap();
    let host_cell = doc
        .add_cell(host, Some(Twip(4800)), CellStyle::default())
        .unwrap();
    let inner = doc.add_table(host_cell, None).unwrap();
    let inner_row = doc.add_row(inner, None).unwrap();
    let inner_cell = doc
        .add_cell(inner_row, None, CellStyle::default())
        .unwrap();
    doc.add_text(inner_cell, "nested", None, None).unwrap();

    let parts = package_parts(&doc);
    let document = part_str(&parts, "word/document.xml");
    assert!(document.contains(r#"<w:gridSpan w:val="2"/>"#));
    assert!(document.contains(r#"<w:vMerge w:val="restart"/>"#));
    assert!(document.contains(r#"<w:vMerge w:val="continue"/>"#));
    assert_eq!(document.matches("<w:tbl>").count(), 2);
    assert!(document.contains("nested"));
    assert_well_formed("word/document.xml", document);
}

#[test]
fn notes_comments_and_protection() {
    let mut doc = Document::new();
    let section = doc.add_section(SectionStyle::a4());

    let run = doc.add_text_run(section, None).unwrap();
    doc.add_text(run, "Claimed result", None, None).unwrap();
    let note = doc.add_footnote(run, None).unwrap();
    doc.add_text(note, "See appendix B.", None, None).unwrap();

    let target = doc.add_text(section, "Disputed paragraph", None, None).unwrap();
    let comment = doc.add_comment("Reviewer", "RV", chrono::Utc::now());
    doc.add_text(comment, "Is this still accurate?", None, None)
        .unwrap();
    doc.set_comment_range_start(target, comment).unwrap();
    doc.set_comment_range_end(target, comment).unwrap();

    doc.protection = DocumentProtection::new(ProtectionType::Comments)
        .with_password("review-only")
        .with_salt([3u8; 16]);

    let parts = package_parts(&doc);

    let footnotes = part_str(&parts, "word/footnotes.xml");
    assert!(footnotes.contains(r#"<w:footnote w:id="2">"#));
    assert!(footnotes.contains("See appendix B."));

    let document = part_str(&parts, "word/document.xml");
    assert!(document.contains(r#"<w:footnoteReference w:id="2"/>"#));
    assert!(document.contains(r#"<w:commentRangeStart w:id="1"/>"#));
    assert!(document.contains(r#"<w:commentReference w:id="1"/>"#));

    let comments = part_str(&parts, "word/comments.xml");
    assert!(comments.contains(r#"w:author="Reviewer""#));
    assert!(comments.contains("Is this still accurate?"));

    let settings = part_str(&parts, "word/settings.xml");
    assert!(settings.contains(r#"w:edit="comments""#));
    assert!(settings.contains("w:hash=\""));

    // the document manifest points at footnotes and comments
    let rels = part_str(&parts, "word/_rels/document.xml.rels");
    assert!(rels.contains("footnotes.xml"));
    assert!(rels.contains("comments.xml"));
}

#[test]
fn content_types_cover_every_part() {
    let mut doc = Document::new();
    let section = doc.add_section(SectionStyle::a4());
    doc.add_text(section, "body", None, None).unwrap();
    doc.add_header(section, HeaderFooterSlot::Default).unwrap();
    doc.add_image(section, png_source("img"), None, None).unwrap();
    doc.numbering.register_bullet();
    doc.add_endnote(section, None).unwrap();
    doc.add_chart(
        section,
        ChartType::Column,
        vec!["A".to_string()],
        vec![ChartSeries {
            name: "S".to_string(),
            values: vec![1.0],
        }],
    )
    .unwrap();

    let parts = package_parts(&doc);
    let content_types = part_str(&parts, "[Content_Types].xml");

    for name in parts.keys() {
        if name == "[Content_Types].xml" {
            continue;
        }
        if name.ends_with(".rels") || name.ends_with(".png") {
            // covered by extension defaults
            continue;
        }
        let covered = content_types.contains(&format!(r#"PartName="/{}""#, name))
            || name.starts_with("word/media/");
        assert!(covered, "no content type override for {}", name);
    }
    assert!(content_types.contains(r#"Extension="png""#));
    assert!(content_types.contains(r#"Extension="rels""#));
    assert!(content_types.contains(r#"PartName="/word/charts/chart1.xml""#));
    assert_well_formed("[Content_Types].xml", content_types);
}

#[test]
fn document_rels_ids_match_references() {
    let mut doc = Document::new();
    let section = doc.add_section(SectionStyle::a4());
    doc.add_header(section, HeaderFooterSlot::Default).unwrap();
    doc.add_link(section, "https://example.com/a", "a", false, None)
        .unwrap();
    doc.add_image(section, png_source("pic"), None, None).unwrap();

    let parts = package_parts(&doc);
    let document = part_str(&parts, "word/document.xml");
    let rels = part_str(&parts, "word/_rels/document.xml.rels");

    // fixed six parts, then the header, then bucket media in registration
    // order: the link first, the image second
    assert!(rels.contains(r#"Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header""#));
    assert!(document.contains(r#"<w:headerReference w:type="default" r:id="rId7"/>"#));
    assert!(rels.contains(r#"Id="rId8""#) && rels.contains("https://example.com/a"));
    assert!(document.contains(r#"<w:hyperlink r:id="rId8">"#));
    assert!(rels.contains(r#"Id="rId9""#) && rels.contains("media/section_image1.png"));
    assert!(document.contains(r#"<a:blip r:embed="rId9"/>"#));
    assert!(rels.contains(r#"TargetMode="External""#));
}
