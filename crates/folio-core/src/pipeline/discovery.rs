//! Directory scanning for eligible images and descendant directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ConversionConfig;
use crate::types::ImageAsset;

/// Lists eligible image files and descendant directories.
pub struct DirectoryScanner {
    formats: Vec<String>,
}

impl DirectoryScanner {
    /// Create a scanner for the configured extension allow-list.
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            formats: config
                .supported_formats
                .iter()
                .map(|f| f.to_lowercase())
                .collect(),
        }
    }

    /// List eligible image files directly inside `dir` (non-recursive).
    ///
    /// An empty directory yields an empty vec, not an error; the caller
    /// decides whether that is worth reporting. No ordering is imposed here.
    pub fn list_images(&self, dir: &Path) -> std::io::Result<Vec<ImageAsset>> {
        let mut assets = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && self.is_supported(&path) {
                if let Some(asset) = ImageAsset::from_path(&path) {
                    assets.push(asset);
                }
            }
        }
        Ok(assets)
    }

    /// List every descendant directory of `dir` (not just immediate
    /// children), in unspecified order. Unreadable entries are skipped.
    pub fn list_subdirectories(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// Check a path against the allow-list; the extension is lower-cased
    /// first so behavior matches across filesystems.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.formats.iter().any(|fmt| *fmt == ext_lower)
            })
            .unwrap_or(false)
    }
}
