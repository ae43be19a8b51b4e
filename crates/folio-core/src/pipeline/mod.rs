//! Conversion pipeline stages.
//!
//! - **discovery**: find eligible images and descendant directories
//! - **transform**: decode, strip, re-encode, optimize a single asset
//! - **optimize**: lossless byte-level pass over encoded JPEG payloads
//! - **runner**: per-directory orchestration and tree-wide walks

pub mod discovery;
pub mod optimize;
pub mod runner;
pub mod transform;

// Re-exports for convenient access
pub use discovery::DirectoryScanner;
pub use runner::{ConversionPipeline, RunContext, RunOutcome, TreeWalker};
pub use transform::{ImageTransform, TransformedImage};
