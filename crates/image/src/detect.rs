//! Image format detection from magic bytes.
//!
//! Conversion always selects the codec from the file extension; sniffing is
//! only used to explain decode failures and by the `detect` command.

use crate::registry::FormatId;

/// Detect the format of `data` from its leading bytes.
///
/// # Example
/// ```
/// use imgconv_image::{detect_format, FormatId};
///
/// let png_data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// assert_eq!(detect_format(&png_data), Some(FormatId::Png));
///
/// assert_eq!(detect_format(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), Some(FormatId::Svg));
/// assert_eq!(detect_format(&[0x00, 0x01]), None);
/// ```
pub fn detect_format(data: &[u8]) -> Option<FormatId> {
    if data.len() < 4 {
        return None;
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(FormatId::Jpeg);
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(FormatId::Png);
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some(FormatId::WebP);
    }

    // BMP: BM
    if data.starts_with(b"BM") {
        return Some(FormatId::Bmp);
    }

    // TIFF: II or MM (little/big endian)
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
        return Some(FormatId::Tiff);
    }

    // ICO: reserved 0, type 1, non-zero image count
    if data.len() >= 6 && data.starts_with(&[0x00, 0x00, 0x01, 0x00]) && (data[4] | data[5]) != 0 {
        return Some(FormatId::Ico);
    }

    if looks_like_svg(data) {
        return Some(FormatId::Svg);
    }

    None
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(256)];
    let head = head.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(head);
    let start = head.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(head.len());
    let head = &head[start..];

    if head.starts_with(b"<svg") {
        return true;
    }
    head.starts_with(b"<?xml") && head.windows(4).any(|w| w == b"<svg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
        assert_eq!(detect_format(&data), Some(FormatId::Jpeg));
    }

    #[test]
    fn test_detect_png() {
        let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
        assert_eq!(detect_format(&data), Some(FormatId::Png));
    }

    #[test]
    fn test_detect_webp() {
        let data = b"RIFF\x00\x00\x00\x00WEBP";
        assert_eq!(detect_format(data), Some(FormatId::WebP));
    }

    #[test]
    fn test_detect_tiff_both_endians() {
        assert_eq!(detect_format(b"II*\x00\x08\x00"), Some(FormatId::Tiff));
        assert_eq!(detect_format(b"MM\x00*\x00\x00"), Some(FormatId::Tiff));
    }

    #[test]
    fn test_detect_ico() {
        let data = [0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x10, 0x10];
        assert_eq!(detect_format(&data), Some(FormatId::Ico));
    }

    #[test]
    fn test_detect_svg_with_prolog() {
        let data = b"\xEF\xBB\xBF  <?xml version=\"1.0\"?>\n<svg width=\"10\"/>";
        assert_eq!(detect_format(data), Some(FormatId::Svg));
        assert_eq!(detect_format(b"<?xml version=\"1.0\"?><html/>"), None);
    }

    #[test]
    fn test_unknown_format() {
        let data = [0x00, 0x00, 0x00, 0x00];
        assert_eq!(detect_format(&data), None);
    }
}
