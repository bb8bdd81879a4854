//! imgconv: convert raster images between formats.
//!
//! The input and output formats are inferred from file extensions.

use clap::{Args, Parser, Subcommand};
use imgconv_cli::output::Status;
use imgconv_image::ConvertError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod exit_codes;

use commands::{batch, convert, detect, formats, BatchFailed};
use config::{Config, ConfigError};

/// Convert raster images between formats, selected by file extension
#[derive(Parser)]
#[command(name = "imgconv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to .imgconv.toml when present)
    #[arg(long, global = true, env = "IMGCONV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Encoder options shared by `convert` and `batch`
#[derive(Args, Debug, Clone, Copy)]
struct EncodeArgs {
    /// JPEG compression quality (0-100) [default: 90]
    #[arg(short, long, allow_negative_numbers = true)]
    quality: Option<i32>,

    /// Icon size for ICO output (16, 32, 48 or 64) [default: 32]
    #[arg(long, visible_alias = "ico", allow_negative_numbers = true)]
    icon_size: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one image
    Convert {
        /// Path to input file
        #[arg(short, long)]
        input: PathBuf,

        /// Path to output file (format is inferred from the extension)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        encode: EncodeArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert every image in a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Target extension (png, jpg, tiff, bmp, ...)
        #[arg(short, long)]
        to: String,

        /// Directory to write into (defaults to next to each input)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Convert one file at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        encode: EncodeArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known formats and their capabilities
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Identify a file's format from its content
    Detect {
        /// Path to image file
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("imgconv=debug,imgconv_image=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Config::load(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            if let Some(path) = &config.path {
                tracing::debug!(path = %path.display(), "loaded config");
            }
            run(cli.command, &config)
        });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => ExitCode::from(report_error(&e)),
    }
}

fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Convert { input, output, encode, json } => {
            let options = config.options(encode.quality, encode.icon_size);
            convert::run(input, output, options, json)
        }

        Commands::Batch { dir, to, out_dir, recursive, sequential, encode, json } => {
            let options = config.options(encode.quality, encode.icon_size);
            let parallel = config.schema.batch.parallel && !sequential;
            batch::run(batch::BatchArgs {
                dir,
                to,
                out_dir,
                recursive,
                parallel,
                options,
                json,
            })
        }

        Commands::Formats { json } => formats::run(json),

        Commands::Detect { path } => detect::run(&path),
    }
}

/// Print an error and pick the exit code for it.
fn report_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<ConvertError>() {
        Status::failed(err);
        return exit_codes::for_convert_error(err);
    }
    if let Some(err) = e.downcast_ref::<BatchFailed>() {
        Status::error(&err.to_string());
        return exit_codes::FAILURE;
    }

    Status::error(&format!("{e:#}"));
    if e.downcast_ref::<ConfigError>().is_some() {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::FAILURE
    }
}
