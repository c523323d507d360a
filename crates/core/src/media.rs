//! Header-only inspection of uploaded images.
//!
//! Uploads are gated before any upstream call: the format must be one the
//! configurator serves and the header must yield non-zero dimensions. Pixel
//! data is never decoded.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::CoreError;

/// Formats accepted for cut uploads.
const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// What the header of an accepted upload revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Inspect an uploaded image without decoding pixel data.
pub fn inspect_image(bytes: &[u8]) -> Result<ImageInfo, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("uploaded image is empty".to_string()));
    }
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| CoreError::Validation(format!("could not read image header: {err}")))?;
    let Some(format) = reader.format() else {
        return Err(CoreError::Validation(
            "unrecognized image format; use png, jpg, webp, or gif".to_string(),
        ));
    };
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(CoreError::Validation(format!(
            "unsupported image format {format:?}; use png, jpg, webp, or gif"
        )));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|err| CoreError::Validation(format!("could not read image dimensions: {err}")))?;
    if width == 0 || height == 0 {
        return Err(CoreError::Validation("image has zero size".to_string()));
    }
    Ok(ImageInfo { format, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image::RgbaImage::new(width, height)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn accepts_png_and_reports_dimensions() {
        let info = inspect_image(&png_bytes(4, 2)).unwrap();
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!((info.width, info.height), (4, 2));
    }

    #[test]
    fn rejects_empty_upload() {
        assert!(inspect_image(&[]).is_err());
    }

    #[test]
    fn rejects_non_image_bytes() {
        let err = inspect_image(b"definitely not an image").unwrap_err();
        assert!(err.to_string().contains("unrecognized image format"));
    }

    #[test]
    fn rejects_formats_outside_the_accepted_set() {
        // A BMP magic number is recognized but not accepted for cuts.
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0u8; 64]);
        let err = inspect_image(&bmp).unwrap_err();
        assert!(err.to_string().contains("unsupported image format"));
    }
}
