//! The conversion pipeline.
//!
//! One call to [`Pipeline::convert`] performs a single decode-then-encode
//! transform and classifies every failure. Checks run in a fixed order:
//!
//! 1. resolve the input format from its extension
//! 2. resolve the output format from its extension
//! 3. validate options against the output format's schema
//! 4. require a decoder for the input format
//! 5. require an encoder for the output format
//! 6. read and decode the input
//! 7. encode and write the output atomically
//!
//! Steps 1 to 5 touch no files, so an unsupported combination never creates
//! an output and never opens the input.

use crate::codec;
use crate::detect::detect_format;
use crate::error::{ConvertError, Direction, Result};
use crate::options::ConversionOptions;
use crate::pixels::ColorModel;
use crate::registry::{FormatId, Registry};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

/// A single conversion to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// File to read
    pub input: PathBuf,
    /// File to write; its extension selects the encoder
    pub output: PathBuf,
    /// Encoder options
    pub options: ConversionOptions,
}

impl ConversionRequest {
    /// Create a request.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        options: ConversionOptions,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options,
        }
    }
}

/// Summary of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Input path
    pub input: PathBuf,
    /// Output path
    pub output: PathBuf,
    /// Format the input was decoded as
    pub input_format: FormatId,
    /// Format the output was encoded as
    pub output_format: FormatId,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color model of the decoded pixels
    pub color_model: ColorModel,
    /// Size of the written file
    pub bytes_written: u64,
}

/// Conversion pipeline bound to a format registry.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    registry: &'static Registry,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Registry::global())
    }
}

impl Pipeline {
    /// Create a pipeline over `registry`.
    pub fn new(registry: &'static Registry) -> Self {
        Self { registry }
    }

    /// The registry this pipeline resolves formats against.
    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Convert `request.input` into `request.output`.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionReport> {
        let span = info_span!(
            "convert",
            input = %request.input.display(),
            output = %request.output.display()
        );
        let _enter = span.enter();

        let input = self.registry.resolve_path(&request.input, Direction::Input)?;
        let output = self.registry.resolve_path(&request.output, Direction::Output)?;
        debug!(input_format = %input.id, output_format = %output.id, "formats resolved");

        let options = request.options.validate(output)?;

        if !self.registry.supports_decode(input) {
            return Err(ConvertError::UnsupportedConversion {
                format: input.id,
                direction: Direction::Input,
                reason: "input format cannot be decoded",
            });
        }
        if !self.registry.supports_encode(output) {
            return Err(ConvertError::UnsupportedConversion {
                format: output.id,
                direction: Direction::Output,
                reason: "output format cannot be encoded",
            });
        }

        let data = std::fs::read(&request.input).map_err(|source| ConvertError::Io {
            path: request.input.clone(),
            source,
        })?;

        let pixels = codec::decode(&data, input.id).map_err(|source| ConvertError::Decode {
            path: request.input.clone(),
            format: input.id,
            sniffed: detect_format(&data).filter(|sniffed| *sniffed != input.id),
            source,
        })?;
        drop(data);
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            color_model = %pixels.color_model(),
            "decoded"
        );

        let encoded = codec::encode(&pixels, output.id, &options)
            .map_err(|source| ConvertError::encode(&request.output, output.id, source))?;
        write_atomic(&request.output, &encoded)
            .map_err(|source| ConvertError::encode(&request.output, output.id, source))?;
        debug!(bytes = encoded.len(), "written");

        Ok(ConversionReport {
            input: request.input.clone(),
            output: request.output.clone(),
            input_format: input.id,
            output_format: output.id,
            width: pixels.width(),
            height: pixels.height(),
            color_model: pixels.color_model(),
            bytes_written: encoded.len() as u64,
        })
    }
}

/// Convert with the process-wide registry.
pub fn convert(request: &ConversionRequest) -> Result<ConversionReport> {
    Pipeline::default().convert(request)
}

/// Write `bytes` to `path` through a temp file in the same directory.
///
/// The final path only ever holds a complete file; a failed write leaves
/// whatever was there before untouched and the temp file is removed on drop.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".imgconv-");
    // Same mode as a plain create: 0o666 less the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
