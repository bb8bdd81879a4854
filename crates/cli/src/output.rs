//! Terminal output utilities
//!
//! Provides consistent formatting for conversion results.

use imgconv_image::{ConversionReport, ConvertError};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a finished conversion
    pub fn converted(report: &ConversionReport) {
        Self::success(&describe_report(report));
    }

    /// Print a failed conversion, naming its category
    pub fn failed(err: &ConvertError) {
        Self::error(&describe_error(err));
    }
}

/// One-line summary of a successful conversion.
pub fn describe_report(report: &ConversionReport) -> String {
    format!(
        "{} → {} ({}x{} {}, {} → {}, {})",
        report.input.display(),
        report.output.display(),
        report.width,
        report.height,
        report.color_model,
        report.input_format,
        report.output_format,
        format_size(report.bytes_written)
    )
}

/// One-line description of a failure: category, then the detailed message.
pub fn describe_error(err: &ConvertError) -> String {
    format!("{} [{}]: {}", err.category(), err.code(), err)
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
