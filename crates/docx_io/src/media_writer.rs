//! Binary media payloads
//!
//! Resolves every registered image and embedded object to its bytes and
//! word/-relative target so the package writer can store them. Link
//! entries are relationship-only and produce no part.

use crate::error::DocxResult;
use doc_model::{Document, ImageSource, MediaSource};
use std::fs;

pub struct MediaPart {
    /// Path under word/, e.g. "media/section_image1.png"
    pub target: String,
    pub bytes: Vec<u8>,
}

pub struct MediaWriter;

impl MediaWriter {
    pub fn new() -> Self {
        Self
    }

    /// Collect every binary part across all buckets
    pub fn collect(&self, doc: &Document) -> DocxResult<Vec<MediaPart>> {
        let mut parts = Vec::new();
        for (bucket, entries) in doc.media.buckets() {
            for entry in entries {
                let bytes = match &entry.source {
                    MediaSource::Image { source, .. } => match source {
                        ImageSource::Path(path) => fs::read(path)?,
                        ImageSource::Memory { bytes, .. } => bytes.clone(),
                    },
                    MediaSource::Object { path } => fs::read(path)?,
                    MediaSource::Link { .. } => continue,
                };
                parts.push(MediaPart {
                    target: entry.target(bucket),
                    bytes,
                });
            }
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::SectionStyle;
    use std::io::Write;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_memory_image_bytes() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let source = ImageSource::Memory {
            bytes: PNG_MAGIC.to_vec(),
            name: "logo".to_string(),
        };
        doc.add_image(section, source, None, None).unwrap();
        let parts = MediaWriter::new().collect(&doc).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].target, "media/section_image1.png");
        assert_eq!(parts[0].bytes, PNG_MAGIC);
    }

    #[test]
    fn test_file_image_bytes() {
        let mut file = tempfile::NamedTempFile::with_suffix(".png").unwrap();
        file.write_all(&PNG_MAGIC).unwrap();
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_image(
            section,
            ImageSource::Path(file.path().to_path_buf()),
            None,
            None,
        )
        .unwrap();
        let parts = MediaWriter::new().collect(&doc).unwrap();
        assert_eq!(parts[0].bytes, PNG_MAGIC);
    }

    #[test]
    fn test_links_produce_no_parts() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_link(section, "https://example.com", "site", false, None)
            .unwrap();
        let parts = MediaWriter::new().collect(&doc).unwrap();
        assert!(parts.is_empty());
    }

    #[test]
    fn test_vanished_file_is_an_io_error() {
        let mut file = tempfile::NamedTempFile::with_suffix(".png").unwrap();
        file.write_all(&PNG_MAGIC).unwrap();
        let path = file.path().to_path_buf();
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        doc.add_image(section, ImageSource::Path(path), None, None)
            .unwrap();
        // the file disappears between registration and packaging
        drop(file);
        assert!(MediaWriter::new().collect(&doc).is_err());
    }
}
