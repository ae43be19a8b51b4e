//! Pipeline orchestration: per-directory conversion runs and tree-wide walks.
//!
//! A directory run is a linear sequence (scan, order, transform each asset,
//! route to the sink, finalize) with strict failure isolation: a failed
//! asset costs one ERROR log entry and nothing else, and no error ever
//! escapes a run. Tree walks repeat the run per descendant directory, each
//! with a fresh immutable [`RunContext`], visiting the root LAST (preserved
//! source behavior; see the tree tests before changing it).

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::log::RunLog;
use crate::order;
use crate::sink::{DocumentSink, MirrorSink};
use crate::types::{CancelToken, OutputMode};

use super::discovery::DirectoryScanner;
use super::transform::ImageTransform;

/// Immutable state for one directory run.
///
/// Built fresh per directory, never reused and never mutated, so concurrent
/// runs can never observe each other's directory context.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory being converted
    pub directory: PathBuf,
    /// Its final path component, used for default output naming
    pub directory_name: String,
    /// Output strategy for this run
    pub mode: OutputMode,
    /// Pre-resolved output path override (document mode); default is
    /// `<directory>/<directory_name>.pdf`
    pub output_path: Option<PathBuf>,
}

impl RunContext {
    pub fn new(directory: impl Into<PathBuf>, mode: OutputMode) -> Self {
        let directory = directory.into();
        let directory_name = directory
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("output")
            .to_string();
        Self {
            directory,
            directory_name,
            mode,
            output_path: None,
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Default document output path for this directory.
    pub fn default_document_path(&self) -> PathBuf {
        self.directory.join(format!("{}.pdf", self.directory_name))
    }
}

/// Result of one directory run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Directory this outcome describes
    pub directory: PathBuf,
    /// Assets transformed and routed successfully
    pub succeeded: usize,
    /// Assets skipped after a logged failure
    pub failed: usize,
    /// Where output landed: the PDF path, or the mirror directory
    pub output: Option<PathBuf>,
}

impl RunOutcome {
    fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            succeeded: 0,
            failed: 0,
            output: None,
        }
    }
}

/// Converts a single directory of images into one output.
pub struct ConversionPipeline {
    scanner: DirectoryScanner,
    transform: ImageTransform,
    mirror_suffix: String,
}

impl ConversionPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            scanner: DirectoryScanner::new(&config.conversion),
            transform: ImageTransform::new(config.conversion.quality),
            mirror_suffix: config.conversion.mirror_suffix.clone(),
        }
    }

    /// Run the conversion for one directory.
    ///
    /// Never returns an error: every failure is recorded in `log` and the run
    /// completes with whatever succeeded. An all-failed directory yields an
    /// outcome with `succeeded == 0` and an all-ERROR log, not a panic or an
    /// early return.
    pub fn run(&self, ctx: &RunContext, log: &RunLog, cancel: &CancelToken) -> RunOutcome {
        let mut outcome = RunOutcome::new(&ctx.directory);
        if cancel.is_cancelled() {
            log.notice(format!("Cancelled before {}", ctx.directory.display()));
            return outcome;
        }

        let mut assets = match self.scanner.list_images(&ctx.directory) {
            Ok(assets) => assets,
            Err(e) => {
                log.error(format!(
                    "Failed to scan directory {}: {e}",
                    ctx.directory.display()
                ));
                return outcome;
            }
        };
        if assets.is_empty() {
            log.error(format!(
                "No image files found in the directory: {}",
                ctx.directory.display()
            ));
            return outcome;
        }

        assets.sort_by(|a, b| order::compare(&a.file_name, &b.file_name));

        let mut document = match ctx.mode {
            OutputMode::Pdf => Some(DocumentSink::new()),
            OutputMode::Image => None,
        };
        let mirror = match ctx.mode {
            OutputMode::Image => Some(MirrorSink::for_directory(
                &ctx.directory,
                &self.mirror_suffix,
            )),
            OutputMode::Pdf => None,
        };

        for asset in &assets {
            if cancel.is_cancelled() {
                log.notice(format!("Cancelled in {}", ctx.directory.display()));
                break;
            }
            log.notice(asset.path.display().to_string());

            let transformed = match self.transform.transform(asset) {
                Ok(t) => t,
                Err(e) => {
                    log.error(format!(
                        "Could not process image '{}': {e}",
                        asset.path.display()
                    ));
                    outcome.failed += 1;
                    continue;
                }
            };

            let routed = match (document.as_mut(), mirror.as_ref()) {
                (Some(sink), _) => sink.add_page(&transformed),
                (None, Some(sink)) => sink.write_image(asset, &transformed).map(|_| ()),
                (None, None) => unreachable!("one sink per mode"),
            };
            match routed {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => {
                    log.error(e.to_string());
                    outcome.failed += 1;
                }
            }
        }

        if let Some(sink) = document {
            let output_path = ctx
                .output_path
                .clone()
                .unwrap_or_else(|| ctx.default_document_path());
            match sink.finalize(&output_path) {
                Ok(Some(path)) => {
                    log.notice(format!("PDF created successfully at: {}", path.display()));
                    outcome.output = Some(path);
                }
                Ok(None) => {
                    log.notice(format!(
                        "No pages produced for {}; skipping PDF output",
                        ctx.directory.display()
                    ));
                }
                Err(e) => {
                    log.error(format!("An error occurred while saving the PDF: {e}"));
                }
            }
        } else if let Some(sink) = mirror {
            if outcome.succeeded > 0 {
                outcome.output = Some(sink.target().to_path_buf());
                log.notice("DONE!");
            }
        }

        outcome
    }

    pub(crate) fn scanner(&self) -> &DirectoryScanner {
        &self.scanner
    }
}

/// Repeats the single-directory pipeline across a directory tree.
pub struct TreeWalker {
    pipeline: ConversionPipeline,
}

impl TreeWalker {
    pub fn new(pipeline: ConversionPipeline) -> Self {
        Self { pipeline }
    }

    /// Run the pipeline over `root` and every descendant directory.
    ///
    /// Subdirectories are visited in sorted order, then the root itself LAST.
    /// Each run is independent: an empty or failing directory is logged and
    /// the walk proceeds.
    pub fn run_tree(
        &self,
        root: &Path,
        mode: OutputMode,
        log: &RunLog,
        cancel: &CancelToken,
    ) -> Vec<RunOutcome> {
        let mut dirs = self.pipeline.scanner().list_subdirectories(root);
        dirs.sort();
        log.notice(format!("Found {} subfolders", dirs.len()));
        dirs.push(root.to_path_buf());

        let mut outcomes = Vec::with_capacity(dirs.len());
        for dir in dirs {
            if cancel.is_cancelled() {
                log.notice("Cancelled; stopping tree walk");
                break;
            }
            log.notice(format!("Moving to: {}", dir.display()));
            let ctx = RunContext::new(dir, mode);
            outcomes.push(self.pipeline.run(&ctx, log, cancel));
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_derives_directory_name() {
        let ctx = RunContext::new("/photos/holiday", OutputMode::Pdf);
        assert_eq!(ctx.directory_name, "holiday");
        assert_eq!(
            ctx.default_document_path(),
            PathBuf::from("/photos/holiday/holiday.pdf")
        );
    }

    #[test]
    fn test_output_path_override() {
        let ctx = RunContext::new("/photos/holiday", OutputMode::Pdf)
            .with_output_path("/tmp/out.pdf");
        assert_eq!(ctx.output_path, Some(PathBuf::from("/tmp/out.pdf")));
    }

    #[test]
    fn test_empty_directory_reports_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ConversionPipeline::new(&Config::default());
        let log = RunLog::new();

        let ctx = RunContext::new(dir.path(), OutputMode::Pdf);
        let outcome = pipeline.run(&ctx, &log, &CancelToken::new());

        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.output.is_none());
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].message.contains("No image files found"));
    }

    #[test]
    fn test_missing_directory_is_logged_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("missing");
        let pipeline = ConversionPipeline::new(&Config::default());
        let log = RunLog::new();

        let ctx = RunContext::new(&gone, OutputMode::Image);
        let outcome = pipeline.run(&ctx, &log, &CancelToken::new());

        assert_eq!(outcome.succeeded, 0);
        assert!(log.entries()[0].message.contains("Failed to scan"));
    }

    #[test]
    fn test_cancelled_run_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ConversionPipeline::new(&Config::default());
        let log = RunLog::new();
        let cancel = CancelToken::new();
        cancel.cancel();

        let ctx = RunContext::new(dir.path(), OutputMode::Pdf);
        let outcome = pipeline.run(&ctx, &log, &cancel);
        assert_eq!(outcome.succeeded + outcome.failed, 0);
    }
}
