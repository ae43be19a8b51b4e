//! Lossless byte-level JPEG optimization.
//!
//! Walks the JPEG segment structure and drops metadata segments (APP1-APP15,
//! COM) that decoders never need, copying the entropy-coded image data
//! verbatim from SOS onward. Decoded pixels are untouched by construction.
//!
//! The pass never fails an asset: anything structurally unexpected returns
//! the input unchanged.

const MARKER_PREFIX: u8 = 0xFF;
const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const COM: u8 = 0xFE;

/// Strip droppable segments from an encoded JPEG.
pub fn strip_markers(jpeg: &[u8]) -> Vec<u8> {
    try_strip(jpeg).unwrap_or_else(|| jpeg.to_vec())
}

/// APP1..APP15 carry EXIF/ICC/XMP; COM carries encoder comments.
/// APP0 (JFIF header) stays for maximum decoder compatibility.
fn droppable(marker: u8) -> bool {
    (0xE1..=0xEF).contains(&marker) || marker == COM
}

fn try_strip(data: &[u8]) -> Option<Vec<u8>> {
    if data.len() < 4 || data[0] != MARKER_PREFIX || data[1] != SOI {
        return None;
    }

    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&data[..2]);
    let mut pos = 2;

    while pos + 4 <= data.len() {
        if data[pos] != MARKER_PREFIX {
            return None;
        }
        let marker = data[pos + 1];
        match marker {
            // Entropy-coded data follows; keep everything from here verbatim
            SOS => {
                out.extend_from_slice(&data[pos..]);
                return Some(out);
            }
            EOI => {
                out.extend_from_slice(&data[pos..pos + 2]);
                return Some(out);
            }
            SOI => return None,
            _ => {
                let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
                let end = pos + 2 + len;
                if len < 2 || end > data.len() {
                    return None;
                }
                if !droppable(marker) {
                    out.extend_from_slice(&data[pos..end]);
                }
                pos = end;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use std::io::Cursor;

    fn encode_sample() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(32, 32).into_rgb8();
        let mut buf = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buf, 90)
            .encode(img.as_raw(), 32, 32, image::ExtendedColorType::Rgb8)
            .unwrap();
        buf.into_inner()
    }

    /// Splice a COM segment right after SOI.
    fn with_comment(jpeg: &[u8], comment: &[u8]) -> Vec<u8> {
        let mut out = jpeg[..2].to_vec();
        out.push(MARKER_PREFIX);
        out.push(COM);
        let len = (comment.len() + 2) as u16;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(comment);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_strips_comment_segment() {
        let plain = encode_sample();
        let commented = with_comment(&plain, b"shot on a potato");
        assert!(commented.len() > plain.len());

        let stripped = strip_markers(&commented);
        assert!(stripped.len() < commented.len());
        // Still a decodable JPEG with the same dimensions
        let img = image::load_from_memory(&stripped).unwrap().into_rgb8();
        assert_eq!(img.width(), 32);
    }

    #[test]
    fn test_pixels_unchanged() {
        let plain = encode_sample();
        let stripped = strip_markers(&with_comment(&plain, b"x"));
        let a = image::load_from_memory(&plain).unwrap().into_rgb8();
        let b = image::load_from_memory(&stripped).unwrap().into_rgb8();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_malformed_input_passes_through() {
        let garbage = b"definitely not a jpeg".to_vec();
        assert_eq!(strip_markers(&garbage), garbage);

        let truncated = vec![0xFF, 0xD8, 0xFF];
        assert_eq!(strip_markers(&truncated), truncated);
    }

    #[test]
    fn test_clean_jpeg_survives() {
        let plain = encode_sample();
        let stripped = strip_markers(&plain);
        assert!(image::load_from_memory(&stripped).is_ok());
    }
}
