//! folio-core - Batch image conversion library.
//!
//! Converts a directory of images into either a single paginated PDF (one
//! page per image, sized to its pixels) or a sibling directory of
//! recompressed images, in natural filename order. Runs are failure-isolated:
//! a bad file costs one log entry, never the directory; a bad directory never
//! stops a tree-wide walk.
//!
//! # Architecture
//!
//! ```text
//! Scan → Order (natural) → Transform each → Sink (PDF | mirror) → Finalize
//! ```
//!
//! The pipeline is synchronous and callable from any execution context;
//! callers that need a responsive UI offload it to a worker thread and watch
//! the [`RunLog`]. Long walks can be stopped via [`CancelToken`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio_core::{Config, ConversionPipeline, RunContext, RunLog, CancelToken, OutputMode};
//!
//! let config = Config::load()?;
//! let pipeline = ConversionPipeline::new(&config);
//! let log = RunLog::new();
//!
//! let ctx = RunContext::new("./photos", OutputMode::Pdf);
//! let outcome = pipeline.run(&ctx, &log, &CancelToken::new());
//! println!("{} pages", outcome.succeeded);
//! # Ok::<(), folio_core::FolioError>(())
//! ```

pub mod config;
pub mod error;
pub mod log;
pub mod order;
pub mod pipeline;
pub mod sink;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FolioError, PipelineError, PipelineResult, Result};
pub use log::{LogEntry, RunLog, Severity};
pub use order::FileNameKey;
pub use pipeline::{ConversionPipeline, RunContext, RunOutcome, TreeWalker};
pub use sink::{DocumentSink, MirrorSink};
pub use types::{CancelToken, ImageAsset, OutputMode};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
