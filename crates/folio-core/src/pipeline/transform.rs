//! Per-asset image transformation: decode, strip, re-encode, optimize.
//!
//! The operation order is part of the pipeline contract: decode first (with
//! content sniffing, so a mislabeled file still decodes or fails cleanly),
//! metadata dropped, then a single fixed lossy re-encode at the configured
//! quality, then a lossless byte-level pass over the encoded payload.

use image::codecs::jpeg::JpegEncoder;
use image::{GenericImageView, ImageReader};
use std::io::Cursor;

use crate::error::PipelineError;
use crate::types::ImageAsset;

use super::optimize;

/// In-memory result of transforming one asset.
///
/// `width`/`height` are the original decoded pixel dimensions; the document
/// sink sizes its page from these even though the bytes are re-encoded.
#[derive(Debug)]
pub struct TransformedImage {
    /// Final JPEG payload after the lossless pass
    pub bytes: Vec<u8>,
    /// Source pixel width
    pub width: u32,
    /// Source pixel height
    pub height: u32,
}

/// Transforms source images into normalized, recompressed JPEG payloads.
pub struct ImageTransform {
    quality: u8,
}

impl ImageTransform {
    /// Create a transform with the given JPEG quality (clamped to 100).
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.min(100),
        }
    }

    /// Transform one asset.
    ///
    /// Fails fast with a typed error; the caller owns failure isolation and
    /// decides to skip the asset. No partial output is left behind; all
    /// intermediates live in memory.
    pub fn transform(&self, asset: &ImageAsset) -> Result<TransformedImage, PipelineError> {
        let bytes = std::fs::read(&asset.path).map_err(|source| PipelineError::Read {
            path: asset.path.clone(),
            source,
        })?;

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Codec {
                path: asset.path.clone(),
                message: format!("Cannot detect image format: {e}"),
            })?;

        if reader.format().is_none() {
            return Err(PipelineError::UnsupportedFormat {
                path: asset.path.clone(),
                format: asset.extension.clone(),
            });
        }

        // Decoding to pixels drops EXIF, ICC profiles and comments.
        let decoded = reader.decode().map_err(|e| PipelineError::Codec {
            path: asset.path.clone(),
            message: e.to_string(),
        })?;
        let (width, height) = decoded.dimensions();

        // Fixed output container: baseline RGB JPEG at the configured quality.
        // PNG transparency is flattened here, a known tradeoff of the format.
        let rgb = decoded.into_rgb8();
        let mut encoded = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut encoded, self.quality)
            .encode(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| PipelineError::Codec {
                path: asset.path.clone(),
                message: e.to_string(),
            })?;

        let bytes = optimize::strip_markers(&encoded.into_inner());

        Ok(TransformedImage {
            bytes,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use std::path::Path;

    fn asset_for(path: &Path) -> ImageAsset {
        ImageAsset::from_path(path).unwrap()
    }

    #[test]
    fn test_transform_png_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        DynamicImage::new_rgb8(64, 48).save(&path).unwrap();

        let transform = ImageTransform::new(92);
        let result = transform.transform(&asset_for(&path)).unwrap();

        assert_eq!(result.width, 64);
        assert_eq!(result.height, 48);
        // JPEG SOI marker
        assert_eq!(&result.bytes[..2], &[0xFF, 0xD8]);
        // And it round-trips through a decoder
        let reloaded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(reloaded.dimensions(), (64, 48));
    }

    #[test]
    fn test_transform_garbage_fails_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"this is not an image at all").unwrap();

        let transform = ImageTransform::new(92);
        let err = transform.transform(&asset_for(&path)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnsupportedFormat { .. } | PipelineError::Codec { .. }
        ));
    }

    #[test]
    fn test_transform_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        let asset = ImageAsset::from_path(&path).unwrap();

        let transform = ImageTransform::new(92);
        assert!(matches!(
            transform.transform(&asset).unwrap_err(),
            PipelineError::Read { .. }
        ));
    }

    #[test]
    fn test_quality_is_clamped() {
        let transform = ImageTransform::new(200);
        assert_eq!(transform.quality, 100);
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.png");
        // Noisy content so quality actually matters
        let img = image::RgbImage::from_fn(128, 128, |x, y| {
            image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(&path).unwrap();

        let high = ImageTransform::new(95).transform(&asset_for(&path)).unwrap();
        let low = ImageTransform::new(20).transform(&asset_for(&path)).unwrap();
        assert!(low.bytes.len() < high.bytes.len());
    }
}
