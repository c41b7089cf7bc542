//! Image decoder for glyph sheets
//!
//! Supports PNG, JPEG, GIF, WebP and BMP via the image crate.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat as ImgFormat};

use crate::{Canvas, ImageError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Self::Gif;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        if data.len() >= 14 && data.starts_with(b"BM") {
            return Self::Bmp;
        }

        Self::Unknown
    }

    fn to_image_format(self) -> Option<ImgFormat> {
        match self {
            Self::Png => Some(ImgFormat::Png),
            Self::Jpeg => Some(ImgFormat::Jpeg),
            Self::Gif => Some(ImgFormat::Gif),
            Self::WebP => Some(ImgFormat::WebP),
            Self::Bmp => Some(ImgFormat::Bmp),
            Self::Unknown => None,
        }
    }
}

/// Image decoder
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode a glyph sheet from bytes, sniffing the format
    pub fn decode(data: &[u8]) -> Result<Canvas> {
        let format = ImageFormat::from_bytes(data);
        Self::decode_with_format(data, format)
    }

    /// Decode with known format
    pub fn decode_with_format(data: &[u8], format: ImageFormat) -> Result<Canvas> {
        let img_format = format.to_image_format().ok_or(ImageError::UnsupportedFormat)?;

        let img = image::load(Cursor::new(data), img_format)
            .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

        let canvas = Self::image_to_canvas(img)?;
        tracing::trace!(
            "Decoded {:?} image: {}x{}",
            format,
            canvas.width(),
            canvas.height()
        );
        Ok(canvas)
    }

    fn image_to_canvas(img: DynamicImage) -> Result<Canvas> {
        let (width, height) = img.dimensions();
        let rgba = img.into_rgba8();
        Canvas::from_rgba(rgba.as_raw(), width, height)
    }
}
