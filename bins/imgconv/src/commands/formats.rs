//! Formats command - list the registry

use anyhow::Result;
use imgconv_cli::output::Status;
use imgconv_image::{FormatDescriptor, Registry};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output for one format
#[derive(Debug, Serialize)]
struct FormatEntry {
    name: &'static str,
    mime_type: &'static str,
    extensions: &'static [&'static str],
    #[serde(flatten)]
    descriptor: &'static FormatDescriptor,
}

/// Run formats command
pub fn run(json: bool) -> Result<()> {
    let registry = Registry::global();

    if json {
        let entries: Vec<FormatEntry> = registry
            .formats()
            .map(|descriptor| FormatEntry {
                name: descriptor.id.token(),
                mime_type: descriptor.id.mime_type(),
                extensions: descriptor.id.extensions(),
                descriptor,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    Status::header("Supported formats");
    println!(
        "  {:<6} {:<12} {:<7} {:<7} {}",
        "Format".dimmed(),
        "Extensions".dimmed(),
        "Read".dimmed(),
        "Write".dimmed(),
        "Options".dimmed()
    );

    for descriptor in registry.formats() {
        let options: Vec<String> = registry
            .option_schema(descriptor)
            .iter()
            .map(|spec| format!("{} ({}, default {})", spec.name, spec.range.describe(), spec.default))
            .collect();

        println!(
            "  {:<6} {:<12} {:<7} {:<7} {}",
            descriptor.id.token().bold(),
            descriptor.id.extensions().join(", "),
            yes_no(registry.supports_decode(descriptor)),
            yes_no(registry.supports_encode(descriptor)),
            options.join("; ")
        );
    }
    println!();

    Ok(())
}

fn yes_no(supported: bool) -> &'static str {
    if supported { "yes" } else { "no" }
}
