//! Decoding of encoded image containers into [`DecodedImage`].

use image::{ColorType, ImageFormat};

use super::{DecodeError, DecodedImage, PixelMode};

/// PNG color type code for indexed-color images (IHDR byte 9).
const PNG_COLOR_TYPE_INDEXED: u8 = 3;

/// Decode an image from bytes and classify its pixel mode.
///
/// The container is guessed from magic bytes. Alpha is preserved in the
/// returned pixel buffer; everything else is normalized to 8-bit RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized image.
/// Returns `DecodeError::CorruptedFile` if the image fails to decode.
/// Returns `DecodeError::InvalidDimensions` for zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    let mode = classify_pixel_mode(format, bytes, img.color());
    log::debug!(
        "decoded {:?} {}x{} as {:?}",
        format,
        img.width(),
        img.height(),
        mode
    );

    Ok(DecodedImage::from_dynamic(img, mode))
}

/// Classify how the source stored its pixels.
///
/// Palette detection needs the container: decoders expand indexed color to
/// RGB(A) before we ever see it.
pub fn classify_pixel_mode(format: ImageFormat, bytes: &[u8], color: ColorType) -> PixelMode {
    let indexed = match format {
        ImageFormat::Gif => true,
        ImageFormat::Png => png_color_type(bytes) == Some(PNG_COLOR_TYPE_INDEXED),
        _ => false,
    };

    if indexed {
        PixelMode::Palette
    } else if color.has_alpha() {
        PixelMode::Alpha
    } else {
        PixelMode::Opaque
    }
}

/// Read the color type byte from a PNG IHDR chunk.
///
/// Layout: 8-byte signature, 4-byte length, "IHDR", width, height,
/// bit depth, color type.
fn png_color_type(bytes: &[u8]) -> Option<u8> {
    if bytes.len() < 26 || &bytes[12..16] != b"IHDR" {
        return None;
    }
    Some(bytes[25])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn encode_png(pixels: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(pixels, width, height, color)
            .unwrap();
        out
    }

    /// Hand-built 2x1 indexed PNG (bit depth 1, two-entry palette).
    ///
    /// The IDAT payload is a stored (uncompressed) zlib stream.
    fn indexed_png() -> Vec<u8> {
        let mut out = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        write_chunk(&mut out, b"IHDR", &[0, 0, 0, 2, 0, 0, 0, 1, 1, 3, 0, 0, 0]);
        write_chunk(&mut out, b"PLTE", &[255, 0, 0, 0, 0, 255]);

        // filter byte + one packed row
        let raw = [0u8, 0b0100_0000];
        let len = raw.len() as u16;
        let mut zlib = vec![0x78, 0x01, 0x01];
        zlib.extend_from_slice(&len.to_le_bytes());
        zlib.extend_from_slice(&(!len).to_le_bytes());
        zlib.extend_from_slice(&raw);
        zlib.extend_from_slice(&adler32(&raw).to_be_bytes());
        write_chunk(&mut out, b"IDAT", &zlib);
        write_chunk(&mut out, b"IEND", &[]);
        out
    }

    fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        let mut crc_input = kind.to_vec();
        crc_input.extend_from_slice(data);
        out.extend_from_slice(&crc32(&crc_input).to_be_bytes());
    }

    fn crc32(data: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFFu32;
        for &byte in data {
            crc ^= byte as u32;
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
        !crc
    }

    fn adler32(data: &[u8]) -> u32 {
        let (mut a, mut b) = (1u32, 0u32);
        for &byte in data {
            a = (a + byte as u32) % 65521;
            b = (b + a) % 65521;
        }
        (b << 16) | a
    }

    #[test]
    fn test_decode_rgb_png_is_opaque() {
        let bytes = encode_png(&[255u8; 4 * 4 * 3], 4, 4, ExtendedColorType::Rgb8);
        let img = decode_image(&bytes).unwrap();

        assert_eq!((img.width, img.height), (4, 4));
        assert_eq!(img.mode, PixelMode::Opaque);
        assert_eq!(img.layout, PixelLayout::Rgb8);
    }

    #[test]
    fn test_decode_rgba_png_has_alpha() {
        let bytes = encode_png(&[128u8; 3 * 2 * 4], 3, 2, ExtendedColorType::Rgba8);
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.mode, PixelMode::Alpha);
        assert_eq!(img.layout, PixelLayout::Rgba8);
    }

    #[test]
    fn test_decode_gray_alpha_png_has_alpha() {
        let bytes = encode_png(&[90u8; 2 * 2 * 2], 2, 2, ExtendedColorType::La8);
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.mode, PixelMode::Alpha);
    }

    #[test]
    fn test_decode_indexed_png_is_palette() {
        let bytes = indexed_png();
        assert_eq!(png_color_type(&bytes), Some(PNG_COLOR_TYPE_INDEXED));

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.mode, PixelMode::Palette);
        assert_eq!((img.width, img.height), (2, 1));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_garbage_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode_png(&[10u8; 8 * 8 * 3], 8, 8, ExtendedColorType::Rgb8);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_classify_gif_is_palette() {
        assert_eq!(
            classify_pixel_mode(ImageFormat::Gif, &[], ColorType::Rgba8),
            PixelMode::Palette
        );
    }

    #[test]
    fn test_classify_jpeg_is_opaque() {
        assert_eq!(
            classify_pixel_mode(ImageFormat::Jpeg, &[], ColorType::Rgb8),
            PixelMode::Opaque
        );
    }

    #[test]
    fn test_png_color_type_short_input() {
        assert_eq!(png_color_type(&[0x89, b'P', b'N', b'G']), None);
    }
}
