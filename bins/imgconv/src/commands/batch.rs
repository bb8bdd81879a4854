//! Batch command - convert a directory of images

use anyhow::{Context, Result};
use imgconv_cli::output::{describe_error, format_count, format_duration, Status};
use imgconv_cli::progress::{conversion_progress, finish_error, finish_success};
use imgconv_image::{
    convert_batch, BatchOutcome, ConversionOptions, ConversionRequest, ConvertError, Direction,
    Pipeline, Registry,
};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Some conversions in a batch failed.
#[derive(Debug, thiserror::Error)]
#[error("{failed} of {total} conversions failed")]
pub struct BatchFailed {
    pub failed: usize,
    pub total: usize,
}

/// Batch command arguments
#[derive(Debug)]
pub struct BatchArgs {
    pub dir: PathBuf,
    pub to: String,
    pub out_dir: Option<PathBuf>,
    pub recursive: bool,
    pub parallel: bool,
    pub options: ConversionOptions,
    pub json: bool,
}

/// JSON output for one conversion
#[derive(Debug, Serialize)]
struct JsonOutcome<'a> {
    input: &'a Path,
    output: &'a Path,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run batch command
pub fn run(args: BatchArgs) -> Result<()> {
    let registry = Registry::global();

    // Reject a bad target or bad options once, instead of once per file.
    let target = registry
        .resolve(&args.to)
        .ok_or_else(|| ConvertError::UnsupportedFormat {
            path: PathBuf::from(format!("*.{}", args.to)),
            direction: Direction::Output,
        })?;
    args.options.validate(target)?;
    if !registry.supports_encode(target) {
        return Err(ConvertError::UnsupportedConversion {
            format: target.id,
            direction: Direction::Output,
            reason: "output format cannot be encoded",
        }
        .into());
    }

    let extension = target.id.extensions()[0];
    let requests = collect_requests(&args, extension)?;
    if requests.is_empty() {
        Status::warning(&format!("no convertible images in {}", args.dir.display()));
        return Ok(());
    }

    let total = requests.len();
    let started = Instant::now();
    let pb = conversion_progress(total as u64, args.json);

    let outcomes = convert_batch(&Pipeline::new(registry), requests, args.parallel, |outcome| {
        if let Err(e) = &outcome.result {
            debug!(input = %outcome.request.input.display(), error = %e, "conversion failed");
        }
        pb.inc(1);
    });

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    let elapsed = format_duration(started.elapsed());
    if failed == 0 {
        finish_success(&pb, &format!("{} in {}", format_count(total, "image", "images"), elapsed));
    } else {
        finish_error(&pb, &format!("{failed} of {total} failed in {elapsed}"));
    }

    if args.json {
        print_json(&outcomes)?;
    } else {
        print_summary(&outcomes);
    }

    if failed > 0 {
        return Err(BatchFailed { failed, total }.into());
    }
    Ok(())
}

/// Walk the directory and build one request per decodable image.
fn collect_requests(args: &BatchArgs, extension: &str) -> Result<Vec<ConversionRequest>> {
    let registry = Registry::global();
    let max_depth = if args.recursive { usize::MAX } else { 1 };
    let mut requests = Vec::new();
    let mut claimed = HashSet::new();

    for entry in WalkDir::new(&args.dir).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot scan {}", args.dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let input = entry.path();
        let decodable = input
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| registry.resolve(ext))
            .is_some_and(|descriptor| registry.supports_decode(descriptor));
        if !decodable {
            debug!(path = %input.display(), "skipping");
            continue;
        }

        let output = output_path(args, input, extension);
        if output == input {
            warn!(path = %input.display(), "skipping: output would overwrite input");
            continue;
        }
        if !claimed.insert(output.clone()) {
            warn!(
                path = %input.display(),
                output = %output.display(),
                "skipping: output already claimed by another input"
            );
            continue;
        }
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }

        requests.push(ConversionRequest::new(input, output, args.options));
    }

    Ok(requests)
}

/// Output path for `input`, mirroring its position under the scanned directory.
fn output_path(args: &BatchArgs, input: &Path, extension: &str) -> PathBuf {
    let renamed = input.with_extension(extension);
    match &args.out_dir {
        Some(out_dir) => {
            let relative = renamed.strip_prefix(&args.dir).unwrap_or(&renamed);
            out_dir.join(relative)
        }
        None => renamed,
    }
}

fn print_summary(outcomes: &[BatchOutcome]) {
    for outcome in outcomes {
        if let Err(e) = &outcome.result {
            Status::error(&format!("{}: {}", outcome.request.input.display(), describe_error(e)));
        }
    }

    let ok = outcomes.iter().filter(|o| o.is_ok()).count();
    let bytes: u64 = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|report| report.bytes_written)
        .sum();
    Status::info(&format!(
        "Converted {} ({})",
        format_count(ok, "image", "images"),
        imgconv_cli::output::format_size(bytes)
    ));
}

fn print_json(outcomes: &[BatchOutcome]) -> Result<()> {
    let entries: Vec<JsonOutcome<'_>> = outcomes
        .iter()
        .map(|o| JsonOutcome {
            input: &o.request.input,
            output: &o.request.output,
            ok: o.is_ok(),
            bytes_written: o.result.as_ref().ok().map(|r| r.bytes_written),
            category: o.result.as_ref().err().map(ConvertError::category),
            error: o.result.as_ref().err().map(ToString::to_string),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
