//! Error types for the folio conversion pipeline.
//!
//! Errors carry the path they relate to so that log output names the exact
//! file or directory involved. Per-asset errors never propagate out of a
//! directory run; they are caught by the pipeline and recorded in the run log.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration values are invalid (bad quality, unknown output mode)
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Per-asset and per-sink pipeline errors.
///
/// An empty directory is deliberately not represented here: it is a logged
/// condition that ends one directory's run, never an error value.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The decoded format was not recognized
    #[error("Image format unknown: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Decoding or re-encoding failed
    #[error("Codec error for {}: {message}", path.display())]
    Codec { path: PathBuf, message: String },

    /// Page assembly inside the document sink failed
    #[error("Document assembly failed: {message}")]
    Document { message: String },

    /// Writing a final document or a mirrored image failed
    #[error("Failed to persist {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },
}

/// Convenience type alias for folio results.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
