//! DOCX package assembly
//!
//! Creates the ZIP archive with the full OOXML part set. XML parts are
//! deflated; media binaries are stored uncompressed since they are
//! already compressed formats.

use crate::charts_writer::ChartWriter;
use crate::comments_writer::CommentsWriter;
use crate::content_types::build_content_types;
use crate::doc_props_writer::DocPropsWriter;
use crate::document_writer::DocumentWriter;
use crate::error::{DocxError, DocxResult};
use crate::footnotes_writer::NotesWriter;
use crate::headers_writer::HeaderFooterWriter;
use crate::media_writer::MediaWriter;
use crate::numbering_writer::NumberingWriter;
use crate::rel_index::RelIndex;
use crate::relationship_types;
use crate::relationships::Relationships;
use crate::settings_writer::SettingsWriter;
use crate::styles_writer::StylesWriter;
use crate::theme_writer::ThemeWriter;
use doc_model::Document;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serialize a document to a .docx file at `path`
pub fn save_to_file(doc: &Document, path: impl AsRef<Path>) -> DocxResult<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut writer = DocxPackage::new(file).write(doc)?;
    writer.flush()?;
    Ok(())
}

/// Writer for the multi-part DOCX package
pub struct DocxPackage<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> DocxPackage<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Write the complete package, consuming the writer. Returns the
    /// inner writer after the central directory is flushed.
    pub fn write(mut self, doc: &Document) -> DocxResult<W> {
        if doc.sections().is_empty() {
            return Err(DocxError::EmptyDocument);
        }
        let index = RelIndex::build(doc);

        self.write_file("[Content_Types].xml", &build_content_types(doc).to_xml())?;
        self.write_file("_rels/.rels", &root_rels()?.to_xml())?;

        debug!("writing word/document.xml");
        let document_xml = DocumentWriter::new().write(doc, &index)?;
        self.write_file("word/document.xml", &document_xml)?;
        self.write_file(
            "word/_rels/document.xml.rels",
            &index.document_rels(doc)?.to_xml(),
        )?;

        self.write_file("word/styles.xml", &StylesWriter::new().write(doc)?)?;
        let settings = SettingsWriter::new();
        self.write_file("word/settings.xml", &settings.write(doc)?)?;
        self.write_file("word/webSettings.xml", &settings.write_web_settings())?;
        self.write_file("word/fontTable.xml", &settings.write_font_table(doc))?;
        self.write_file("word/theme/theme1.xml", &ThemeWriter::new().write())?;

        self.write_file("word/numbering.xml", &NumberingWriter::new().write(doc)?)?;

        self.write_headers_footers(doc, &index)?;
        self.write_notes(doc, &index)?;

        if !doc.collections.comments.is_empty() {
            debug!(count = doc.collections.comments.len(), "writing comments");
            self.write_file(
                "word/comments.xml",
                &CommentsWriter::new().write(doc, &index)?,
            )?;
        }

        let chart_writer = ChartWriter::new();
        for (id, handle) in doc.collections.charts.iter() {
            self.write_file(
                &format!("word/charts/chart{}.xml", id),
                &chart_writer.write(doc, handle)?,
            )?;
        }

        for part in MediaWriter::new().collect(doc)? {
            debug!(part = %part.target, bytes = part.bytes.len(), "writing media");
            self.write_binary(&format!("word/{}", part.target), &part.bytes)?;
        }

        let props = DocPropsWriter::new();
        self.write_file("docProps/core.xml", &props.write_core(doc)?)?;
        self.write_file("docProps/app.xml", &props.write_app(doc)?)?;
        self.write_file("docProps/custom.xml", &props.write_custom(doc)?)?;

        Ok(self.zip.finish()?)
    }

    fn write_headers_footers(&mut self, doc: &Document, index: &RelIndex) -> DocxResult<()> {
        let writer = HeaderFooterWriter::new();
        for &handle in doc.all_headers() {
            let part_id = doc.node(handle)?.doc_part.id;
            let xml = writer.write_header(doc, index, handle)?;
            self.write_file(&format!("word/header{}.xml", part_id), &xml)?;
            if let Some(rels) = writer.part_rels(doc, handle)? {
                self.write_file(
                    &format!("word/_rels/header{}.xml.rels", part_id),
                    &rels.to_xml(),
                )?;
            }
        }
        for &handle in doc.all_footers() {
            let part_id = doc.node(handle)?.doc_part.id;
            let xml = writer.write_footer(doc, index, handle)?;
            self.write_file(&format!("word/footer{}.xml", part_id), &xml)?;
            if let Some(rels) = writer.part_rels(doc, handle)? {
                self.write_file(
                    &format!("word/_rels/footer{}.xml.rels", part_id),
                    &rels.to_xml(),
                )?;
            }
        }
        Ok(())
    }

    fn write_notes(&mut self, doc: &Document, index: &RelIndex) -> DocxResult<()> {
        let writer = NotesWriter::new();
        if !doc.collections.footnotes.is_empty() {
            self.write_file(
                "word/footnotes.xml",
                &writer.write_footnotes(doc, index)?,
            )?;
            if let Some(rels) = writer.footnotes_rels(doc)? {
                self.write_file("word/_rels/footnotes.xml.rels", &rels.to_xml())?;
            }
        }
        if !doc.collections.endnotes.is_empty() {
            self.write_file("word/endnotes.xml", &writer.write_endnotes(doc, index)?)?;
            if let Some(rels) = writer.endnotes_rels(doc)? {
                self.write_file("word/_rels/endnotes.xml.rels", &rels.to_xml())?;
            }
        }
        Ok(())
    }

    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_binary(&mut self, path: &str, data: &[u8]) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;
        Ok(())
    }
}

/// Package-level relationships in _rels/.rels
fn root_rels() -> DocxResult<Relationships> {
    let mut rels = Relationships::new();
    rels.add(relationship_types::DOCUMENT, "word/document.xml", false)?;
    rels.add(relationship_types::CORE_PROPS, "docProps/core.xml", false)?;
    rels.add(relationship_types::EXT_PROPS, "docProps/app.xml", false)?;
    rels.add(relationship_types::CUSTOM_PROPS, "docProps/custom.xml", false)?;
    Ok(rels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{HeaderFooterSlot, SectionStyle};
    use std::io::Cursor;

    fn package_bytes(doc: &Document) -> Vec<u8> {
        let cursor = Cursor::new(Vec::new());
        DocxPackage::new(cursor).write(doc).unwrap().into_inner()
    }

    fn part_names(bytes: Vec<u8>) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_minimal_package_part_set() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_text(section, "hello", None, None).unwrap();
        let names = part_names(package_bytes(&doc));
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/settings.xml",
            "word/webSettings.xml",
            "word/fontTable.xml",
            "word/theme/theme1.xml",
            "word/numbering.xml",
            "docProps/core.xml",
            "docProps/app.xml",
            "docProps/custom.xml",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {}", expected);
        }
        assert!(!names.contains(&"word/footnotes.xml".to_string()));
        assert!(!names.contains(&"word/comments.xml".to_string()));
    }

    #[test]
    fn test_every_relationship_target_is_packaged() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_text(section, "hello", None, None).unwrap();
        let bytes = package_bytes(&doc);
        let names = part_names(bytes.clone());

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut rels = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("word/_rels/document.xml.rels").unwrap(),
            &mut rels,
        )
        .unwrap();
        for target in rels
            .split(r#"Target=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .filter(|target| !target.starts_with("http"))
        {
            let part = format!("word/{}", target);
            assert!(names.contains(&part), "dangling relationship to {}", part);
        }
    }

    #[test]
    fn test_empty_document_rejected() {
        let doc = Document::new();
        let cursor = Cursor::new(Vec::new());
        assert!(matches!(
            DocxPackage::new(cursor).write(&doc),
            Err(DocxError::EmptyDocument)
        ));
    }

    #[test]
    fn test_conditional_parts_appear() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.numbering.register_decimal();
        doc.add_footnote(section, None).unwrap();
        doc.add_header(section, HeaderFooterSlot::Default).unwrap();
        let names = part_names(package_bytes(&doc));
        assert!(names.contains(&"word/numbering.xml".to_string()));
        assert!(names.contains(&"word/footnotes.xml".to_string()));
        assert!(names.contains(&"word/header1.xml".to_string()));
    }

    #[test]
    fn test_second_section_header_part_number() {
        let mut doc = Document::new();
        let first = doc.add_section(SectionStyle::a4());
        doc.add_header(first, HeaderFooterSlot::Default).unwrap();
        let second = doc.add_section(SectionStyle::a4());
        doc.add_header(second, HeaderFooterSlot::Default).unwrap();
        let names = part_names(package_bytes(&doc));
        assert!(names.contains(&"word/header1.xml".to_string()));
        assert!(names.contains(&"word/header4.xml".to_string()));
    }

    #[test]
    fn test_save_to_file() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_text(section, "on disk", None, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        save_to_file(&doc, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // ZIP local file header magic
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
