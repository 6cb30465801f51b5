use std::path::{Path, PathBuf};

use super::blob::BlobUrl;

/// Where a slide's image data comes from.
#[derive(Debug, PartialEq)]
pub enum SlideSource {
    /// Bytes loaded from a user file, owned by the presenter's blob store.
    Blob(BlobUrl),
    /// A static asset path; nothing to release.
    Asset(PathBuf),
}

impl SlideSource {
    /// Stable key for texture caching.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Blob(url) => url.as_key(),
            Self::Asset(path) => path.display().to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Blob(_))
    }
}

#[derive(Debug)]
pub struct Slide {
    pub source: SlideSource,
    /// File name, shown as caption.
    pub label: String,
}

impl Slide {
    pub fn from_blob(url: BlobUrl, label: impl Into<String>) -> Self {
        Self {
            source: SlideSource::Blob(url),
            label: label.into(),
        }
    }

    pub fn from_asset(dir: &Path, name: &str) -> Self {
        Self {
            source: SlideSource::Asset(dir.join(name)),
            label: name.to_string(),
        }
    }
}
