use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file offered to the presenter: name, declared MIME type and contents.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, declaring its MIME type from the extension.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::new(file_name(path), mime_for_path(path), bytes))
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

pub fn mime_for_path(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MIME.to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Expand directories into their files, sorted by name (non-recursive).
/// Plain file paths are kept in the order given.
pub fn collect_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut collected = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file())
                .collect();
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            collected.extend(entries);
        } else if path.exists() {
            collected.push(path.clone());
        } else {
            anyhow::bail!("File not found: {}", path.display());
        }
    }
    Ok(collected)
}

/// Read many files in parallel, keeping input order. Unreadable files are
/// logged and left out.
pub fn read_files(paths: &[PathBuf]) -> Vec<IncomingFile> {
    paths
        .par_iter()
        .filter_map(|path| match IncomingFile::read(path) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("{e:#}");
                None
            }
        })
        .collect()
}

/// Turn a file dropped onto the window into an [`IncomingFile`].
pub fn from_dropped(file: &eframe::egui::DroppedFile) -> Option<IncomingFile> {
    let path = file.path.as_deref();
    let name = match path {
        Some(p) if file.name.is_empty() => file_name(p),
        _ => file.name.clone(),
    };
    let mime = if file.mime.is_empty() {
        path.map(mime_for_path)
            .unwrap_or_else(|| mime_for_path(Path::new(&name)))
    } else {
        file.mime.clone()
    };

    if let Some(bytes) = &file.bytes {
        return Some(IncomingFile::new(name, mime, bytes.clone()));
    }
    let path = path?;
    match std::fs::read(path) {
        Ok(bytes) => Some(IncomingFile::new(name, mime, bytes)),
        Err(e) => {
            log::warn!("Failed to read dropped file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("a/cat.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("DOG.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("x.webp")), "image/webp");
        assert_eq!(mime_for_path(Path::new("notes.txt")), FALLBACK_MIME);
        assert_eq!(mime_for_path(Path::new("no_extension")), FALLBACK_MIME);
    }

    #[test]
    fn test_is_image_mime_checks_prefix_only() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/x-anything"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("application/image"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn test_collect_paths_sorts_directory_entries() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let paths = collect_paths(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.txt"]);
    }

    #[test]
    fn test_collect_paths_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.png");
        assert!(collect_paths(&[missing]).is_err());
    }

    #[test]
    fn test_read_files_preserves_order_and_skips_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for name in ["3.png", "1.png", "2.gif"] {
            let p = dir.path().join(name);
            std::fs::write(&p, name.as_bytes()).unwrap();
            paths.push(p);
        }
        paths.insert(1, dir.path().join("vanished.png"));

        let files = read_files(&paths);
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["3.png", "1.png", "2.gif"]);
        assert_eq!(files[2].mime, "image/gif");
        assert_eq!(&*files[0].bytes, b"3.png");
    }

    #[test]
    fn test_from_dropped_prefers_declared_mime() {
        let dropped = eframe::egui::DroppedFile {
            name: "photo.bin".to_string(),
            mime: "image/png".to_string(),
            bytes: Some(Arc::from(vec![1u8, 2])),
            ..Default::default()
        };
        let file = from_dropped(&dropped).unwrap();
        assert!(file.is_image());
        assert_eq!(file.name, "photo.bin");
    }

    #[test]
    fn test_from_dropped_reads_path_and_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide.jpeg");
        std::fs::write(&path, b"jpeg").unwrap();
        let dropped = eframe::egui::DroppedFile {
            path: Some(path),
            ..Default::default()
        };
        let file = from_dropped(&dropped).unwrap();
        assert_eq!(file.name, "slide.jpeg");
        assert_eq!(file.mime, "image/jpeg");
        assert_eq!(&*file.bytes, b"jpeg");
    }
}
