//! Image and embedded-object sources
//!
//! Sources are validated when the node is constructed, before any registry
//! mutation, so a bad source never leaves a half-registered relationship
//! behind.

use crate::{DocModelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supported raster formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// File extension used for the media part
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }

    /// MIME content type
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Sniff the format from the file's leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF8") {
            Some(ImageFormat::Gif)
        } else if bytes.starts_with(b"BM") {
            Some(ImageFormat::Bmp)
        } else if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            Some(ImageFormat::Tiff)
        } else {
            None
        }
    }
}

/// Where an image's bytes come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Read from disk at packaging time
    Path(PathBuf),
    /// Already in memory
    Memory { bytes: Vec<u8>, name: String },
}

impl ImageSource {
    /// A short name for diagnostics
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Memory { name, .. } => name.clone(),
        }
    }

    /// Validate the source and determine its format.
    ///
    /// Path sources must exist and carry a known extension; memory sources
    /// are sniffed by magic bytes.
    pub fn resolve_format(&self) -> Result<ImageFormat> {
        match self {
            ImageSource::Path(path) => {
                if !path.is_file() {
                    return Err(DocModelError::InvalidImage(format!(
                        "file not found: {}",
                        path.display()
                    )));
                }
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(ImageFormat::from_extension)
                    .ok_or_else(|| {
                        DocModelError::InvalidImage(format!(
                            "unsupported image format: {}",
                            path.display()
                        ))
                    })
            }
            ImageSource::Memory { bytes, name } => ImageFormat::sniff(bytes).ok_or_else(|| {
                DocModelError::InvalidImage(format!("unrecognized image data: {}", name))
            }),
        }
    }
}

/// Extensions accepted for embedded OLE objects
const OBJECT_EXTENSIONS: &[&str] = &["xls", "xlsx", "doc", "docx", "ppt", "pptx"];

/// Validate an embedded-object source path
pub fn validate_object_source(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DocModelError::InvalidObjectSource(format!(
            "file not found: {}",
            path.display()
        )));
    }
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext {
        Some(ref ext) if OBJECT_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(DocModelError::InvalidObjectSource(format!(
            "unsupported object extension: {}",
            path.display()
        ))),
    }
}

/// ProgID advertised for an embedded object, derived from its extension
pub fn object_prog_id(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("xls") | Some("xlsx") => "Excel.Sheet.12",
        Some("ppt") | Some("pptx") => "PowerPoint.Show.12",
        _ => "Word.Document.12",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_formats() {
        assert_eq!(
            ImageFormat::sniff(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::sniff(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"plain text"), None);
    }

    #[test]
    fn test_memory_source_validation() {
        let good = ImageSource::Memory {
            bytes: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
            name: "logo.png".to_string(),
        };
        assert_eq!(good.resolve_format().unwrap(), ImageFormat::Png);

        let bad = ImageSource::Memory {
            bytes: b"not an image".to_vec(),
            name: "bad.bin".to_string(),
        };
        assert!(matches!(
            bad.resolve_format(),
            Err(DocModelError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_missing_path_rejected() {
        let source = ImageSource::Path(PathBuf::from("/nonexistent/image.png"));
        assert!(matches!(
            source.resolve_format(),
            Err(DocModelError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_object_extension_check() {
        assert!(matches!(
            validate_object_source(Path::new("/nonexistent/sheet.xlsx")),
            Err(DocModelError::InvalidObjectSource(_))
        ));
    }

    #[test]
    fn test_prog_ids() {
        assert_eq!(object_prog_id(Path::new("a.xlsx")), "Excel.Sheet.12");
        assert_eq!(object_prog_id(Path::new("a.ppt")), "PowerPoint.Show.12");
        assert_eq!(object_prog_id(Path::new("a.docx")), "Word.Document.12");
    }
}
