//! Convert command - one input, one output

use anyhow::Result;
use imgconv_cli::output::Status;
use imgconv_image::{ConversionOptions, ConversionRequest, Pipeline};
use std::path::PathBuf;

/// Run convert command
pub fn run(input: PathBuf, output: PathBuf, options: ConversionOptions, json: bool) -> Result<()> {
    let request = ConversionRequest::new(input, output, options);
    let report = Pipeline::default().convert(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        Status::converted(&report);
    }

    Ok(())
}
