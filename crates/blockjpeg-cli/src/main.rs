//! Blockjpeg CLI - simulate JPEG-style loss on image files

use std::path::PathBuf;

use anyhow::{Context, Result};
use blockjpeg_core::pipeline::compress_file_with;
use blockjpeg_core::{
    build_quantization_table, compress_batch, inspect_file, CompressionConfig, Compressor,
};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser)]
#[command(name = "blockjpeg")]
#[command(about = "Simulate JPEG block quantization on images", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress one image at one quality
    Compress {
        /// Source image
        input: PathBuf,

        /// Quality (1-100)
        #[arg(short, long, default_value_t = 75.0)]
        quality: f64,

        /// Output path (default: <stem>_compressed_q<quality><ext> beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compress one image at several qualities and print a JSON report
    Batch {
        /// Source image
        input: PathBuf,

        /// Comma-separated qualities (overrides the config file)
        #[arg(short, long, value_delimiter = ',')]
        qualities: Option<Vec<f64>>,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Process blocks on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Print the quantization table for a quality
    Table {
        /// Quality (1-100)
        #[arg(short, long)]
        quality: f64,
    },

    /// Report a file's size and whether it needs optimization
    Inspect {
        /// File to inspect
        input: PathBuf,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("blockjpeg_cli=debug,blockjpeg_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = config::load(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Compress {
            input,
            quality,
            output,
        } => {
            let compressor = Compressor::new(quality)?.with_parallel(config.parallel);
            let written = compress_file_with(&compressor, &input, output.as_deref())
                .with_context(|| format!("failed to compress {}", input.display()))?;
            println!("{}", written.display());
        }
        Commands::Batch {
            input,
            qualities,
            out_dir,
            sequential,
        } => {
            apply_overrides(&mut config, qualities, out_dir, sequential);
            let report = compress_batch(&input, &config)
                .with_context(|| format!("batch failed for {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Table { quality } => {
            let table = build_quantization_table(quality)?;
            for row in table.rows() {
                let cells: Vec<String> = row.iter().map(|v| format!("{v:>5}")).collect();
                println!("{}", cells.join(""));
            }
        }
        Commands::Inspect { input } => {
            let report = inspect_file(&input, config.size_threshold_bytes)
                .with_context(|| format!("failed to inspect {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(
    config: &mut CompressionConfig,
    qualities: Option<Vec<f64>>,
    out_dir: Option<PathBuf>,
    sequential: bool,
) {
    if let Some(qualities) = qualities {
        config.qualities = qualities;
    }
    if out_dir.is_some() {
        config.output_dir = out_dir;
    }
    if sequential {
        config.parallel = false;
    }
}
