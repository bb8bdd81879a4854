//! Extension-driven raster image conversion.
//!
//! This crate provides:
//! - A fixed format registry keyed by file extension, with decode/encode capabilities
//!   and the option schema each encoder accepts
//! - Option validation that runs before any file is touched
//! - The conversion pipeline: resolve, validate, decode, encode, atomic write
//! - Batch conversion of many independent requests
//! - Format sniffing from magic bytes
//!
//! # Example
//!
//! ```rust,no_run
//! use imgconv_image::{convert, ConversionOptions, ConversionRequest};
//!
//! let request = ConversionRequest::new("photo.webp", "photo.png", ConversionOptions::default());
//! match convert(&request) {
//!     Ok(report) => println!("wrote {} bytes", report.bytes_written),
//!     Err(e) => eprintln!("{} ({})", e, e.category()),
//! }
//! ```

#![warn(missing_docs)]

mod alpha;
mod codec;
mod detect;
mod error;
mod options;
mod pixels;
mod registry;

pub mod batch;
pub mod pipeline;

pub use batch::{convert_batch, BatchOutcome};
pub use detect::detect_format;
pub use error::{ConvertError, Direction, ErrorCode, Result};
pub use options::{ConversionOptions, EncodeOptions};
pub use pipeline::{convert, ConversionReport, ConversionRequest, Pipeline};
pub use pixels::{ColorModel, PixelBuffer};
pub use registry::{
    FormatDescriptor, FormatId, OptionKind, OptionSpec, Registry, ValidRange, ICON_SIZE, QUALITY,
};
