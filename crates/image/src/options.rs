//! Conversion options and their validation.

use crate::error::{ConvertError, Result};
use crate::registry::{FormatDescriptor, OptionSpec, ALL_OPTIONS, ICON_SIZE, QUALITY};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options supplied with a conversion request.
///
/// Values are signed so that anything a caller passes is representable;
/// [`ConversionOptions::validate`] rejects out-of-range values before any
/// file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionOptions {
    /// JPEG quality, 0-100. Ignored by other encoders.
    pub quality: i32,
    /// ICO edge length, one of 16, 32, 48, 64. Ignored by other encoders.
    pub icon_size: i32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            quality: QUALITY.default as i32,
            icon_size: ICON_SIZE.default as i32,
        }
    }
}

/// Options after validation, narrowed to the types the encoders take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, 0-100
    pub quality: u8,
    /// ICO edge length in pixels
    pub icon_size: u32,
}

impl ConversionOptions {
    /// Set the JPEG quality.
    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the ICO edge length.
    pub fn with_icon_size(mut self, icon_size: i32) -> Self {
        self.icon_size = icon_size;
        self
    }

    /// Current value of the named option.
    pub fn get(&self, name: &str) -> Option<i64> {
        match name {
            "quality" => Some(i64::from(self.quality)),
            "icon_size" => Some(i64::from(self.icon_size)),
            _ => None,
        }
    }

    /// Validate against the output format's schema.
    ///
    /// Every option is range-checked, including those the output encoder
    /// ignores, so a bad value never slips through because of the target.
    pub fn validate(&self, output: &FormatDescriptor) -> Result<EncodeOptions> {
        for spec in ALL_OPTIONS {
            let value = self.value_of(spec);
            if !spec.range.contains(value) {
                return Err(ConvertError::InvalidOption {
                    name: spec.name,
                    value,
                    expected: spec.range.describe(),
                });
            }
            if value != spec.default && !output.options.contains(spec) {
                debug!(option = spec.name, value, format = %output.id, "option ignored by encoder");
            }
        }

        Ok(EncodeOptions {
            quality: self.quality as u8,
            icon_size: self.icon_size as u32,
        })
    }

    fn value_of(&self, spec: &OptionSpec) -> i64 {
        self.get(spec.name).unwrap_or(spec.default)
    }
}
