//! Output sinks: one PDF per directory, or a mirror directory of images.

pub mod document;
pub mod mirror;

pub use document::DocumentSink;
pub use mirror::MirrorSink;
