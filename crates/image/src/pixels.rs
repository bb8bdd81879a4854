//! Decoded in-memory pixel grid.

use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use std::fmt;

/// Color model of a [`PixelBuffer`], always 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// Single luminance channel
    Gray8,
    /// Red, green, blue
    Rgb8,
    /// Red, green, blue, alpha
    Rgba8,
}

impl ColorModel {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            ColorModel::Gray8 => 1,
            ColorModel::Rgb8 => 3,
            ColorModel::Rgba8 => 4,
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorModel::Gray8 => "gray8",
            ColorModel::Rgb8 => "rgb8",
            ColorModel::Rgba8 => "rgba8",
        };
        f.write_str(name)
    }
}

/// Immutable decoded image.
///
/// Whatever the decoder produced is normalized into one of the three
/// [`ColorModel`]s: grayscale stays grayscale, anything carrying alpha
/// becomes RGBA, everything else RGB. Deeper samples are reduced to 8 bits.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: DynamicImage,
    model: ColorModel,
}

impl PixelBuffer {
    /// Normalize a decoded image.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let image = match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => {
                image
            }
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
            other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };
        let model = match image {
            DynamicImage::ImageLuma8(_) => ColorModel::Gray8,
            DynamicImage::ImageRgba8(_) => ColorModel::Rgba8,
            _ => ColorModel::Rgb8,
        };
        Self { image, model }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Color model of the pixel data.
    pub fn color_model(&self) -> ColorModel {
        self.model
    }

    /// Raw interleaved samples, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_bytes()
    }

    /// Borrow the underlying image.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}
