//! Shared fixtures for conversion tests.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// A small opaque RGB gradient.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    })
}

/// Write a sample image of the given extension into `dir`.
pub fn write_sample(dir: &Path, ext: &str) -> PathBuf {
    let path = dir.join(format!("sample.{ext}"));
    if ext == "webp" {
        std::fs::write(&path, checkerboard_webp(64, 64, [40, 200], 10, 220)).unwrap();
    } else {
        DynamicImage::ImageRgb8(gradient(24, 16)).save(&path).unwrap();
    }
    path
}

/// Build a lossless WebP (VP8L) checkerboard.
///
/// Pixels alternate between green values `greens[0]` and `greens[1]`; red and
/// blue are constant and alpha is opaque. Every prefix code is a "simple"
/// code, so the file needs no real entropy coder.
pub fn checkerboard_webp(width: u32, height: u32, greens: [u8; 2], red: u8, blue: u8) -> Vec<u8> {
    assert_ne!(greens[0], greens[1]);

    let mut bits = BitWriter::default();
    bits.put(width - 1, 14);
    bits.put(height - 1, 14);
    bits.put(0, 1); // alpha hint
    bits.put(0, 3); // version
    bits.put(0, 1); // no transforms
    bits.put(0, 1); // no color cache
    bits.put(0, 1); // no meta prefix codes

    // green: two 8-bit symbols, one bit each
    bits.put(1, 1);
    bits.put(1, 1);
    bits.put(1, 1);
    bits.put(u32::from(greens[0]), 8);
    bits.put(u32::from(greens[1]), 8);
    // red, blue, alpha: one 8-bit symbol, zero bits each
    for value in [red, blue, 255] {
        bits.put(1, 1);
        bits.put(0, 1);
        bits.put(1, 1);
        bits.put(u32::from(value), 8);
    }
    // distance: one 1-bit symbol
    bits.put(1, 1);
    bits.put(0, 1);
    bits.put(0, 1);
    bits.put(0, 1);

    for y in 0..height {
        for x in 0..width {
            bits.put((x + y) % 2, 1);
        }
    }

    let mut payload = vec![0x2f];
    payload.extend_from_slice(&bits.bytes);

    let mut chunk = b"VP8L".to_vec();
    chunk.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    chunk.extend_from_slice(&payload);
    if payload.len() % 2 == 1 {
        chunk.push(0);
    }

    let mut file = b"RIFF".to_vec();
    file.extend_from_slice(&(4 + chunk.len() as u32).to_le_bytes());
    file.extend_from_slice(b"WEBP");
    file.extend_from_slice(&chunk);
    file
}

#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    used: u32,
}

impl BitWriter {
    /// Append the low `count` bits of `value`, least significant first.
    fn put(&mut self, value: u32, count: u32) {
        for i in 0..count {
            if self.used % 8 == 0 {
                self.bytes.push(0);
            }
            let bit = ((value >> i) & 1) as u8;
            let last = self.bytes.len() - 1;
            self.bytes[last] |= bit << (self.used % 8);
            self.used += 1;
        }
    }
}
