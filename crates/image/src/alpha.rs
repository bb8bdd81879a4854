//! Alpha flattening for encoders without an alpha channel.

use image::{Rgb, RgbImage, RgbaImage};

/// Background used when flattening for JPEG.
pub(crate) const WHITE: [u8; 3] = [255, 255, 255];

/// Composite an RGBA image over a solid background.
pub(crate) fn flatten_alpha(img: &RgbaImage, background: [u8; 3]) -> RgbImage {
    let mut output = RgbImage::new(img.width(), img.height());

    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;

        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let blend = |c: u8, bg: u8| ((c as f32 * alpha) + (bg as f32 * inv_alpha)).round() as u8;

        output.put_pixel(
            x,
            y,
            Rgb([
                blend(r, background[0]),
                blend(g, background[1]),
                blend(b, background[2]),
            ]),
        );
    }

    output
}
