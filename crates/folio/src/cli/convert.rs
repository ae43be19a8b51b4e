//! The `folio convert` command.

use clap::{Args, ValueEnum};
use folio_core::{
    CancelToken, Config, ConversionPipeline, OutputMode, RunContext, RunLog, RunOutcome,
    Severity, TreeWalker,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source directory containing images (~ is expanded)
    #[arg(required = true)]
    pub input: String,

    /// Output mode
    #[arg(short, long, value_enum, default_value = "pdf")]
    pub mode: Mode,

    /// Also process every subdirectory (root is processed last)
    #[arg(short, long)]
    pub recursive: bool,

    /// JPEG re-encode quality (0-100)
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Output PDF path (single-directory pdf mode only; defaults to
    /// <dir>/<dirName>.pdf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print outcomes and the run log as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Output mode selector.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    /// One paginated PDF per directory
    Pdf,
    /// A sibling directory of recompressed images
    Image,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Pdf => OutputMode::Pdf,
            Mode::Image => OutputMode::Image,
        }
    }
}

/// Execute the convert command.
///
/// The pipeline itself is synchronous; it runs on a blocking worker so the
/// async runtime stays responsive to Ctrl-C, which flips the cancel token.
pub async fn execute(args: ConvertArgs, mut config: Config) -> anyhow::Result<()> {
    let input = PathBuf::from(shellexpand::tilde(&args.input).into_owned());
    if !input.is_dir() {
        anyhow::bail!(
            "Input directory does not exist: {:?}\n\n  Hint: Check the path and try again.",
            input
        );
    }
    if args.output.is_some() && (args.recursive || !matches!(args.mode, Mode::Pdf)) {
        anyhow::bail!("--output only applies to a single-directory pdf conversion");
    }

    if let Some(quality) = args.quality {
        config.conversion.quality = quality;
    }
    config.validate()?;

    let mode = OutputMode::from(args.mode);
    let pipeline = ConversionPipeline::new(&config);
    let log = Arc::new(RunLog::new());
    let cancel = CancelToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received; finishing the current file");
                cancel.cancel();
            }
        });
    }

    let worker_log = Arc::clone(&log);
    let worker_cancel = cancel.clone();
    let recursive = args.recursive;
    let output = args.output.clone();
    let outcomes = tokio::task::spawn_blocking(move || {
        if recursive {
            TreeWalker::new(pipeline).run_tree(&input, mode, &worker_log, &worker_cancel)
        } else {
            let mut ctx = RunContext::new(input, mode);
            if let Some(path) = output {
                ctx = ctx.with_output_path(path);
            }
            vec![pipeline.run(&ctx, &worker_log, &worker_cancel)]
        }
    })
    .await?;

    report(&outcomes, &log, args.json)?;
    Ok(())
}

/// Summarize the run on stdout/stderr.
///
/// A run with zero successes is still a completed run: the detail lives in
/// the log, and the exit status stays zero.
fn report(outcomes: &[RunOutcome], log: &RunLog, json: bool) -> anyhow::Result<()> {
    if json {
        let summary = serde_json::json!({
            "outcomes": outcomes,
            "log": log.entries(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let succeeded: usize = outcomes.iter().map(|o| o.succeeded).sum();
    let failed: usize = outcomes.iter().map(|o| o.failed).sum();
    tracing::info!(
        "Processed {} director{}: {} image(s) converted, {} failed",
        outcomes.len(),
        if outcomes.len() == 1 { "y" } else { "ies" },
        succeeded,
        failed
    );
    for path in outcomes.iter().filter_map(|o| o.output.as_ref()) {
        tracing::info!("  {}", path.display());
    }
    if log.count(Severity::Error) > 0 {
        tracing::warn!(
            "{} error(s) during conversion; rerun with --json for the full log",
            log.count(Severity::Error)
        );
    }
    Ok(())
}
