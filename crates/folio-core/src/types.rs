//! Core data types shared across the conversion pipeline.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ConfigError;

/// A located source image, discovered fresh on every pipeline run.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Full path to the source file
    pub path: PathBuf,

    /// Directory containing the file
    pub directory: PathBuf,

    /// Filename portion, used for natural ordering and mirror output naming
    pub file_name: String,

    /// Lower-cased extension ("jpg", "jpeg", "png", "webp")
    pub extension: String,
}

impl ImageAsset {
    /// Build an asset from a file path. Returns `None` when the path has no
    /// usable filename or extension (such entries are never eligible anyway).
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?.to_lowercase();
        let directory = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        Some(Self {
            path: path.to_path_buf(),
            directory,
            file_name,
            extension,
        })
    }
}

/// Output strategy for a directory run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One paginated PDF per directory, one page per image
    Pdf,
    /// A sibling directory of recompressed images, one file per source image
    Image,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    /// Parse the caller-facing mode selector. Exactly `"pdf"` or `"image"`
    /// (case-insensitive); anything else is a caller-side validation error
    /// rejected before any scanning happens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "image" => Ok(Self::Image),
            other => Err(ConfigError::Validation(format!(
                "Output type not supported: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Pdf => write!(f, "pdf"),
            OutputMode::Image => write!(f, "image"),
        }
    }
}

/// Cooperative cancellation handle for long tree walks.
///
/// The pipeline checks it once per directory and once per asset; cancelling
/// stops cleanly at the next check without corrupting already-written output.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
