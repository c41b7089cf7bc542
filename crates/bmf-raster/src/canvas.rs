//! Canvas - pixel surface backed by a tiny-skia Pixmap

use std::path::Path;

use tiny_skia::{ColorU8, IntRect, Pixmap, PixmapPaint, Transform};

use crate::{Color, ImageError, Result};

/// RGBA pixel canvas
///
/// Pixels are stored premultiplied, as tiny-skia requires. All public
/// accessors take and return straight-alpha [`Color`] values.
#[derive(Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Create a new transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    /// Create from straight-alpha RGBA bytes
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ImageError::InvalidDimensions { width, height });
        }

        let mut canvas = Self::new(width, height)?;
        for (dst, src) in canvas.pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole canvas with a color
    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// Get a pixel color, `None` when out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Set a pixel color (replaces, no blending)
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width() && y < self.height() {
            let idx = (y * self.width() + x) as usize;
            self.pixmap.pixels_mut()[idx] =
                ColorU8::from_rgba(color.r, color.g, color.b, color.a).premultiply();
        }
    }

    /// Composite a rectangle of `source` onto this canvas, source-over.
    ///
    /// The source rectangle is clipped to the source bounds (shifting the
    /// destination by the same amount) and drawing is clipped to this
    /// canvas. Empty or fully out-of-bounds rectangles draw nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &mut self,
        source: &Canvas,
        src_x: i32,
        src_y: i32,
        width: u32,
        height: u32,
        dst_x: i32,
        dst_y: i32,
    ) {
        let Some(requested) = IntRect::from_xywh(src_x, src_y, width, height) else {
            return;
        };
        let Some(bounds) = IntRect::from_xywh(0, 0, source.width(), source.height()) else {
            return;
        };
        let Some(visible) = requested.intersect(&bounds) else {
            return;
        };
        let Some(region) = source.pixmap.clone_rect(visible) else {
            return;
        };

        let x = dst_x.saturating_add(visible.x().saturating_sub(src_x));
        let y = dst_y.saturating_add(visible.y().saturating_sub(src_y));
        // tiny-skia expects the destination rect to be representable
        let Some(target) = IntRect::from_xywh(x, y, visible.width(), visible.height()) else {
            return;
        };
        let Some(canvas) = IntRect::from_xywh(0, 0, self.width(), self.height()) else {
            return;
        };
        if target.intersect(&canvas).is_none() {
            return;
        }

        self.pixmap.draw_pixmap(
            x,
            y,
            region.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Straight-alpha RGBA bytes, row-major
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| ImageError::EncodeFailed(e.to_string()))
    }

    /// Encode as PNG and write to `path`
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.pixmap
            .save_png(path)
            .map_err(|e| ImageError::EncodeFailed(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Saved {}x{} canvas to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
