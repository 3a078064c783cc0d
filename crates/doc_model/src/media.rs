//! Media registry
//!
//! Images, embedded objects and external links are registered per bucket.
//! A bucket names the document part that references the media: "section",
//! "header1".."headerN", "footer1".."footerN", "footnote" or "endnote".
//! Ids are sequential within a bucket starting at 1 and are never reused,
//! so relationship ids stay stable across the whole write.

use crate::image::{ImageFormat, ImageSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Object,
    Link,
}

/// Where the media bytes come from, or the external target for links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaSource {
    Image { source: ImageSource, format: ImageFormat },
    Object { path: std::path::PathBuf },
    Link { url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// 1-based id within the bucket
    pub id: u32,
    pub kind: MediaKind,
    pub source: MediaSource,
}

impl MediaEntry {
    /// Package-relative target for part media ("media/section_image1.png").
    /// Links have no package part and return the URL instead.
    pub fn target(&self, bucket: &str) -> String {
        match &self.source {
            MediaSource::Image { format, .. } => {
                format!("media/{}_image{}.{}", bucket, self.id, format.extension())
            }
            MediaSource::Object { path } => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("bin");
                format!("embeddings/{}_oleObject{}.{}", bucket, self.id, ext)
            }
            MediaSource::Link { url } => url.clone(),
        }
    }
}

/// Per-bucket media collections, ordered by bucket name for deterministic
/// iteration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaRegistry {
    buckets: BTreeMap<String, Vec<MediaEntry>>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register media in a bucket and return its id within that bucket
    pub fn register(&mut self, bucket: &str, kind: MediaKind, source: MediaSource) -> u32 {
        let entries = self.buckets.entry(bucket.to_string()).or_default();
        let id = entries.len() as u32 + 1;
        entries.push(MediaEntry { id, kind, source });
        id
    }

    pub fn bucket(&self, bucket: &str) -> &[MediaEntry] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[MediaEntry])> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// All image formats used anywhere in the document, for content types
    pub fn image_formats(&self) -> Vec<ImageFormat> {
        let mut formats = Vec::new();
        for entries in self.buckets.values() {
            for entry in entries {
                if let MediaSource::Image { format, .. } = &entry.source {
                    if !formats.contains(format) {
                        formats.push(*format);
                    }
                }
            }
        }
        formats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str) -> MediaSource {
        MediaSource::Link {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_sequential_ids_per_bucket() {
        let mut registry = MediaRegistry::new();
        assert_eq!(registry.register("section", MediaKind::Link, link("a")), 1);
        assert_eq!(registry.register("section", MediaKind::Link, link("b")), 2);
        assert_eq!(registry.register("header1", MediaKind::Link, link("c")), 1);
        assert_eq!(registry.register("section", MediaKind::Link, link("d")), 3);
    }

    #[test]
    fn test_image_target_naming() {
        let entry = MediaEntry {
            id: 2,
            kind: MediaKind::Image,
            source: MediaSource::Image {
                source: ImageSource::Memory {
                    bytes: vec![],
                    name: "pic".to_string(),
                },
                format: ImageFormat::Png,
            },
        };
        assert_eq!(entry.target("footnote"), "media/footnote_image2.png");
    }

    #[test]
    fn test_empty_bucket() {
        let registry = MediaRegistry::new();
        assert!(registry.bucket("section").is_empty());
        assert!(registry.is_empty());
    }
}
