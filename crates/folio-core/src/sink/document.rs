//! Document sink: accumulates transformed images into one PDF per directory.
//!
//! Each image becomes one page whose MediaBox equals the source pixel
//! dimensions (1 pixel = 1 PDF unit), with the JPEG payload embedded as a
//! DCTDecode XObject drawn to fill the page. Page order is `add_page` order;
//! callers feed images pre-sorted by natural filename order.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::pipeline::transform::TransformedImage;

/// Accumulates pages and persists a single PDF on finalize.
pub struct DocumentSink {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Default for DocumentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        // Reserved up front; filled in at finalize once the kids are known
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Append one page sized exactly to the image's pixel dimensions.
    ///
    /// The image payload is copied into the document; the caller keeps its
    /// buffer.
    pub fn add_page(&mut self, image: &TransformedImage) -> Result<(), PipelineError> {
        let (w, h) = (i64::from(image.width), i64::from(image.height));

        let xobject = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => w,
                "Height" => h,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            image.bytes.clone(),
        );
        let image_id = self.doc.add_object(xobject);

        // Scale the unit image square up to the page and draw it at origin
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![w.into(), 0.into(), 0.into(), h.into(), 0.into(), 0.into()],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|e| PipelineError::Document {
            message: e.to_string(),
        })?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), w.into(), h.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Persist the document to `output_path`.
    ///
    /// With zero pages nothing is written and `Ok(None)` is returned: an
    /// all-failed directory completes without leaving an empty PDF behind.
    pub fn finalize(mut self, output_path: &Path) -> Result<Option<PathBuf>, PipelineError> {
        if self.page_ids.is_empty() {
            return Ok(None);
        }

        let count = self.page_ids.len() as i64;
        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        self.doc
            .save(output_path)
            .map_err(|e| PipelineError::Persistence {
                path: output_path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Some(output_path.to_path_buf()))
    }
}
