//! Exit codes for CLI commands

use imgconv_image::ConvertError;

pub const SUCCESS: u8 = 0;
pub const FAILURE: u8 = 1;
pub const INVALID_OPTION: u8 = 2;
pub const UNSUPPORTED_FORMAT: u8 = 3;
pub const UNSUPPORTED_CONVERSION: u8 = 4;
pub const DECODE_ERROR: u8 = 5;
pub const ENCODE_ERROR: u8 = 6;
pub const CONFIG_ERROR: u8 = 7;

/// Exit code for a classified conversion failure.
pub fn for_convert_error(err: &ConvertError) -> u8 {
    match err {
        ConvertError::Io { .. } => FAILURE,
        ConvertError::InvalidOption { .. } => INVALID_OPTION,
        ConvertError::UnsupportedFormat { .. } => UNSUPPORTED_FORMAT,
        ConvertError::UnsupportedConversion { .. } => UNSUPPORTED_CONVERSION,
        ConvertError::Decode { .. } => DECODE_ERROR,
        ConvertError::Encode { .. } => ENCODE_ERROR,
    }
}
