//! Mirror sink: writes each transformed image into a sibling directory.
//!
//! Output lands in `<parent>/<sourceDirName>-<suffix>/<originalFileName>`.
//! The original filename is reused verbatim, extension included, even though
//! the payload is always JPEG; `.png` inputs keep their name and lose
//! transparency.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::pipeline::transform::TransformedImage;
use crate::types::ImageAsset;

/// Writes recompressed images next to their source directory.
pub struct MirrorSink {
    target: PathBuf,
}

impl MirrorSink {
    /// Compute the sibling output directory for a source directory.
    pub fn for_directory(dir: &Path, suffix: &str) -> Self {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("output");
        let target = dir
            .parent()
            .unwrap_or(dir)
            .join(format!("{name}-{suffix}"));
        Self { target }
    }

    /// The directory files are written into.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Write one image, creating the target directory if absent.
    ///
    /// Safe to call repeatedly for the same directory and file: directory
    /// creation is idempotent and an existing file is overwritten.
    pub fn write_image(
        &self,
        asset: &ImageAsset,
        image: &TransformedImage,
    ) -> Result<PathBuf, PipelineError> {
        std::fs::create_dir_all(&self.target).map_err(|e| PipelineError::Persistence {
            path: self.target.clone(),
            message: e.to_string(),
        })?;

        let out = self.target.join(&asset.file_name);
        std::fs::write(&out, &image.bytes).map_err(|e| PipelineError::Persistence {
            path: out.clone(),
            message: e.to_string(),
        })?;
        Ok(out)
    }
}
