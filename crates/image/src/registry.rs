//! Format registry: the single source of truth mapping file extensions to
//! decode/encode capabilities and encoder option schemas.
//!
//! The table is fixed at compile time. Formats that are part of the product
//! surface but have no working codec (vector sources, icon containers) are
//! still registered, with both capability flags off, so that they resolve by
//! name and fail with a typed "unsupported conversion" rather than "unknown".

use crate::error::{ConvertError, Direction, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Identity of a registered format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatId {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO multi-resolution icon container
    Ico,
    /// SVG vector image
    Svg,
}

impl FormatId {
    /// Canonical lowercase token.
    pub fn token(&self) -> &'static str {
        match self {
            FormatId::Png => "png",
            FormatId::Jpeg => "jpeg",
            FormatId::WebP => "webp",
            FormatId::Tiff => "tiff",
            FormatId::Bmp => "bmp",
            FormatId::Ico => "ico",
            FormatId::Svg => "svg",
        }
    }

    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            FormatId::Png => "image/png",
            FormatId::Jpeg => "image/jpeg",
            FormatId::WebP => "image/webp",
            FormatId::Tiff => "image/tiff",
            FormatId::Bmp => "image/bmp",
            FormatId::Ico => "image/x-icon",
            FormatId::Svg => "image/svg+xml",
        }
    }

    /// Get the file extensions that select this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FormatId::Png => &["png"],
            FormatId::Jpeg => &["jpg", "jpeg"],
            FormatId::WebP => &["webp"],
            FormatId::Tiff => &["tiff", "tif"],
            FormatId::Bmp => &["bmp"],
            FormatId::Ico => &["ico"],
            FormatId::Svg => &["svg"],
        }
    }

    /// Codec format backing this identity, if one exists.
    pub(crate) fn codec(&self) -> Option<image::ImageFormat> {
        match self {
            FormatId::Png => Some(image::ImageFormat::Png),
            FormatId::Jpeg => Some(image::ImageFormat::Jpeg),
            FormatId::WebP => Some(image::ImageFormat::WebP),
            FormatId::Tiff => Some(image::ImageFormat::Tiff),
            FormatId::Bmp => Some(image::ImageFormat::Bmp),
            FormatId::Ico | FormatId::Svg => None,
        }
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Value type of an encoder option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Signed integer
    Integer,
}

/// Set of values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidRange {
    /// Inclusive numeric range
    Between {
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: i64,
    },
    /// Closed set of accepted values
    OneOf(&'static [i64]),
}

impl ValidRange {
    /// Check whether `value` is accepted.
    pub fn contains(&self, value: i64) -> bool {
        match self {
            ValidRange::Between { min, max } => (*min..=*max).contains(&value),
            ValidRange::OneOf(values) => values.contains(&value),
        }
    }

    /// Describe the accepted values for error messages.
    pub fn describe(&self) -> String {
        match self {
            ValidRange::Between { min, max } => format!("an integer in {min}..={max}"),
            ValidRange::OneOf(values) => {
                let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!("one of {}", list.join(", "))
            }
        }
    }
}

/// Schema entry for one encoder option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    /// Option name as used in configuration and messages
    pub name: &'static str,
    /// Value type
    pub kind: OptionKind,
    /// Accepted values
    pub range: ValidRange,
    /// Value used when the caller does not set one
    pub default: i64,
}

/// JPEG quality.
pub const QUALITY: OptionSpec = OptionSpec {
    name: "quality",
    kind: OptionKind::Integer,
    range: ValidRange::Between { min: 0, max: 100 },
    default: 90,
};

/// ICO edge length in pixels.
pub const ICON_SIZE: OptionSpec = OptionSpec {
    name: "icon_size",
    kind: OptionKind::Integer,
    range: ValidRange::OneOf(&[16, 32, 48, 64]),
    default: 32,
};

/// Every option any encoder accepts.
pub(crate) const ALL_OPTIONS: &[OptionSpec] = &[QUALITY, ICON_SIZE];

/// A registered format and its capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    /// Format identity
    pub id: FormatId,
    /// Whether the format can be read
    pub decodable: bool,
    /// Whether the format can be written
    pub encodable: bool,
    /// Options accepted by this format's encoder
    pub options: &'static [OptionSpec],
}

static FORMATS: [FormatDescriptor; 7] = [
    FormatDescriptor {
        id: FormatId::Png,
        decodable: true,
        encodable: true,
        options: &[],
    },
    FormatDescriptor {
        id: FormatId::Jpeg,
        decodable: true,
        encodable: true,
        options: &[QUALITY],
    },
    FormatDescriptor {
        id: FormatId::WebP,
        decodable: true,
        encodable: false,
        options: &[],
    },
    FormatDescriptor {
        id: FormatId::Tiff,
        decodable: true,
        encodable: true,
        options: &[],
    },
    FormatDescriptor {
        id: FormatId::Bmp,
        decodable: true,
        encodable: true,
        options: &[],
    },
    FormatDescriptor {
        id: FormatId::Ico,
        decodable: false,
        encodable: false,
        options: &[ICON_SIZE],
    },
    FormatDescriptor {
        id: FormatId::Svg,
        decodable: false,
        encodable: false,
        options: &[],
    },
];

static GLOBAL: Registry = Registry { formats: &FORMATS };

/// Read-only lookup over the format table.
#[derive(Debug)]
pub struct Registry {
    formats: &'static [FormatDescriptor],
}

impl Registry {
    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Resolve an extension such as `"JPG"` or `".tif"` to its descriptor.
    ///
    /// # Example
    /// ```
    /// use imgconv_image::{FormatId, Registry};
    ///
    /// let registry = Registry::global();
    /// assert_eq!(registry.resolve(".JPG").unwrap().id, FormatId::Jpeg);
    /// assert_eq!(registry.resolve("jpeg").unwrap().id, FormatId::Jpeg);
    /// assert!(registry.resolve("xcf").is_none());
    /// ```
    pub fn resolve(&self, extension: &str) -> Option<&'static FormatDescriptor> {
        let normalized = normalize_extension(extension);
        self.formats
            .iter()
            .find(|descriptor| descriptor.id.extensions().contains(&normalized.as_str()))
    }

    /// Resolve the format of `path` from its extension.
    pub fn resolve_path(
        &self,
        path: &Path,
        direction: Direction,
    ) -> Result<&'static FormatDescriptor> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.resolve(ext))
            .ok_or_else(|| ConvertError::UnsupportedFormat {
                path: path.to_path_buf(),
                direction,
            })
    }

    /// Whether the format can be decoded.
    pub fn supports_decode(&self, descriptor: &FormatDescriptor) -> bool {
        descriptor.decodable
    }

    /// Whether the format can be encoded.
    pub fn supports_encode(&self, descriptor: &FormatDescriptor) -> bool {
        descriptor.encodable
    }

    /// Options the format's encoder accepts.
    pub fn option_schema(&self, descriptor: &FormatDescriptor) -> &'static [OptionSpec] {
        descriptor.options
    }

    /// All registered formats, in table order.
    pub fn formats(&self) -> impl Iterator<Item = &'static FormatDescriptor> {
        self.formats.iter()
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}
