//! Error types for image conversion.
//!
//! Every failure of a conversion is returned fully classified. Each variant carries
//! the offending path, option or underlying cause, and maps onto a stable
//! [`ErrorCode`] so callers can branch on it without matching messages.

use crate::registry::FormatId;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Which side of a conversion an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The file being read.
    Input,
    /// The file being written.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
        }
    }
}

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // IO errors (2xxx)
    /// Input could not be read
    IoError = 2000,

    // Validation errors (6xxx)
    /// Option value out of range
    InvalidOption = 6001,
    /// Extension not in the registry
    UnsupportedFormat = 6002,
    /// Format lacks the needed capability
    UnsupportedConversion = 6003,

    // Codec errors (9xxx)
    /// Malformed input content
    DecodeError = 9001,
    /// Output could not be encoded or written
    EncodeError = 9002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            6 => "Validation",
            9 => "Codec",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Errors that can occur while converting an image.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The extension is not known to the registry at all.
    #[error("unsupported {direction} format: {}", .path.display())]
    UnsupportedFormat {
        /// Path whose extension failed to resolve
        path: PathBuf,
        /// Side of the conversion
        direction: Direction,
    },

    /// The format is known but the required direction is not implemented.
    #[error("unsupported conversion: {reason} ({format})")]
    UnsupportedConversion {
        /// Format that lacks the capability
        format: FormatId,
        /// Side of the conversion
        direction: Direction,
        /// Human-readable reason
        reason: &'static str,
    },

    /// An option value is outside its valid range.
    #[error("invalid option {name}={value}: expected {expected}")]
    InvalidOption {
        /// Option name
        name: &'static str,
        /// Rejected value
        value: i64,
        /// Description of the accepted values
        expected: String,
    },

    /// The input is a decodable format but its content is malformed.
    #[error("failed to decode {format} input {}: {source}{}", .path.display(), sniff_hint(.sniffed))]
    Decode {
        /// Input path
        path: PathBuf,
        /// Format selected from the extension
        format: FormatId,
        /// Format identified from the content, when it differs from `format`
        sniffed: Option<FormatId>,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// Encoding or writing the output failed.
    #[error("failed to encode {format} output {}: {source}", .path.display())]
    Encode {
        /// Output path
        path: PathBuf,
        /// Target format
        format: FormatId,
        /// Encoder or filesystem error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The input file is missing or unreadable.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

fn sniff_hint(sniffed: &Option<FormatId>) -> String {
    match sniffed {
        Some(format) => format!(" (content looks like {format})"),
        None => String::new(),
    }
}

impl ConvertError {
    /// Error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConvertError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            ConvertError::UnsupportedConversion { .. } => ErrorCode::UnsupportedConversion,
            ConvertError::InvalidOption { .. } => ErrorCode::InvalidOption,
            ConvertError::Decode { .. } => ErrorCode::DecodeError,
            ConvertError::Encode { .. } => ErrorCode::EncodeError,
            ConvertError::Io { .. } => ErrorCode::IoError,
        }
    }

    /// Stable lowercase category name, used in user-facing messages.
    pub fn category(&self) -> &'static str {
        match self {
            ConvertError::UnsupportedFormat { .. } => "unsupported format",
            ConvertError::UnsupportedConversion { .. } => "unsupported conversion",
            ConvertError::InvalidOption { .. } => "invalid option",
            ConvertError::Decode { .. } => "decode error",
            ConvertError::Encode { .. } => "encode error",
            ConvertError::Io { .. } => "io error",
        }
    }

    /// Side of the conversion the error refers to, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ConvertError::UnsupportedFormat { direction, .. }
            | ConvertError::UnsupportedConversion { direction, .. } => Some(*direction),
            ConvertError::Decode { .. } | ConvertError::Io { .. } => Some(Direction::Input),
            ConvertError::Encode { .. } => Some(Direction::Output),
            ConvertError::InvalidOption { .. } => None,
        }
    }

    pub(crate) fn encode(
        path: impl Into<PathBuf>,
        format: FormatId,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ConvertError::Encode {
            path: path.into(),
            format,
            source: source.into(),
        }
    }
}
