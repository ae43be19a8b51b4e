//! folio CLI - Batch-convert image folders into PDFs or recompressed mirrors.
//!
//! # Usage
//!
//! ```bash
//! # One PDF per folder, images in natural filename order
//! folio convert ./scans --mode pdf
//!
//! # Recompress every image into a sibling `-compressed` folder
//! folio convert ./photos --mode image
//!
//! # Walk the whole tree, one output per directory, root last
//! folio convert ./archive --recursive
//!
//! # View configuration
//! folio config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// folio - Batch image-to-PDF and image recompression tool.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a directory of images into a PDF or a recompressed mirror
    Convert(cli::convert::ConvertArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match folio_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `folio config path`."
            );
            folio_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("folio v{}", folio_core::VERSION);

    match cli.command {
        Commands::Convert(args) => cli::convert::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
