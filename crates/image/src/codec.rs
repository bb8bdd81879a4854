//! Decoder and encoder dispatch over the `image` crate.

use crate::alpha::{flatten_alpha, WHITE};
use crate::options::EncodeOptions;
use crate::pixels::{ColorModel, PixelBuffer};
use crate::registry::FormatId;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{DynamicImage, ImageError, ImageResult};
use std::io::Cursor;
use tracing::warn;

/// Decode a complete file held in memory with the codec for `format`.
pub(crate) fn decode(data: &[u8], format: FormatId) -> ImageResult<PixelBuffer> {
    let codec = format.codec().ok_or_else(|| unsupported(format))?;
    let image = image::load_from_memory_with_format(data, codec)?;
    Ok(PixelBuffer::from_dynamic(image))
}

/// Encode a pixel buffer into an in-memory file of `format`.
pub(crate) fn encode(
    pixels: &PixelBuffer,
    format: FormatId,
    options: &EncodeOptions,
) -> ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());

    match format {
        FormatId::Jpeg => {
            if options.quality == 0 {
                warn!("JPEG quality 0 is encoded at the encoder minimum of 1");
            }
            let encoder = JpegEncoder::new_with_quality(&mut buffer, options.quality);
            match pixels.color_model() {
                ColorModel::Rgba8 => {
                    let flat = flatten_alpha(&pixels.as_dynamic().to_rgba8(), WHITE);
                    DynamicImage::ImageRgb8(flat).write_with_encoder(encoder)?;
                }
                ColorModel::Gray8 | ColorModel::Rgb8 => {
                    pixels.as_dynamic().write_with_encoder(encoder)?;
                }
            }
        }
        FormatId::Png => pixels
            .as_dynamic()
            .write_with_encoder(PngEncoder::new(&mut buffer))?,
        FormatId::Tiff => pixels
            .as_dynamic()
            .write_with_encoder(TiffEncoder::new(&mut buffer))?,
        FormatId::Bmp => pixels
            .as_dynamic()
            .write_with_encoder(BmpEncoder::new(&mut buffer))?,
        FormatId::WebP | FormatId::Ico | FormatId::Svg => return Err(unsupported(format)),
    }

    Ok(buffer.into_inner())
}

fn unsupported(format: FormatId) -> ImageError {
    ImageError::Unsupported(UnsupportedError::from_format_and_kind(
        ImageFormatHint::Name(format.token().to_string()),
        UnsupportedErrorKind::Format(ImageFormatHint::Name(format.token().to_string())),
    ))
}
