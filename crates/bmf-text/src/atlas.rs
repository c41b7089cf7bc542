//! Glyph Atlas Module
//!
//! A decoded glyph sheet paired with its per-codepoint metrics.

use std::collections::HashMap;
use std::path::Path;

use bmf_raster::{Canvas, ImageDecoder};

use crate::metrics::{FontMetrics, GlyphMetrics};
use crate::{FontError, Result};

/// Origin reported in errors for fonts loaded from memory
pub(crate) const MEMORY_ORIGIN: &str = "<memory>";

/// Glyph sheet and metrics for one font file
pub struct GlyphAtlas {
    /// Glyph locations keyed by codepoint
    glyphs: HashMap<u32, GlyphMetrics>,
    /// Decoded sheet
    pixels: Canvas,
    /// Distance between baselines
    line_height: i32,
}

impl GlyphAtlas {
    /// Build from parsed metrics; a repeated codepoint keeps its last entry
    pub fn new(metrics: FontMetrics, pixels: Canvas) -> Self {
        Self::from_glyphs(metrics.glyphs, pixels, metrics.line_height)
    }

    /// Build from a glyph list and an already decoded sheet
    pub fn from_glyphs(
        glyphs: impl IntoIterator<Item = GlyphMetrics>,
        pixels: Canvas,
        line_height: i32,
    ) -> Self {
        let glyphs = glyphs.into_iter().map(|g| (g.codepoint, g)).collect();
        Self {
            glyphs,
            pixels,
            line_height,
        }
    }

    /// Read, parse and decode a metrics file and its glyph sheet
    pub fn load(metrics_path: impl AsRef<Path>, image_path: impl AsRef<Path>) -> Result<Self> {
        let metrics_path = metrics_path.as_ref();
        let image_path = image_path.as_ref();

        let source = std::fs::read_to_string(metrics_path).map_err(|source| FontError::Io {
            path: metrics_path.to_path_buf(),
            source,
        })?;
        let metrics = source.parse::<FontMetrics>().map_err(|source| FontError::Parse {
            origin: metrics_path.display().to_string(),
            source,
        })?;

        let bytes = std::fs::read(image_path).map_err(|source| FontError::Io {
            path: image_path.to_path_buf(),
            source,
        })?;
        let pixels = ImageDecoder::decode(&bytes).map_err(|source| FontError::Decode {
            origin: image_path.display().to_string(),
            source,
        })?;

        let atlas = Self::new(metrics, pixels);
        tracing::debug!(
            "Loaded glyph atlas {} ({} glyphs, line height {}, sheet {}x{})",
            metrics_path.display(),
            atlas.glyph_count(),
            atlas.line_height,
            atlas.pixels.width(),
            atlas.pixels.height()
        );
        Ok(atlas)
    }

    /// Parse metrics text and decode sheet bytes already in memory
    pub fn from_sources(metrics: &str, image: &[u8]) -> Result<Self> {
        let metrics = metrics.parse::<FontMetrics>().map_err(|source| FontError::Parse {
            origin: MEMORY_ORIGIN.to_string(),
            source,
        })?;
        let pixels = ImageDecoder::decode(image).map_err(|source| FontError::Decode {
            origin: MEMORY_ORIGIN.to_string(),
            source,
        })?;
        Ok(Self::new(metrics, pixels))
    }

    /// Get glyph metrics, if the atlas covers the codepoint
    pub fn get(&self, codepoint: u32) -> Option<&GlyphMetrics> {
        self.glyphs.get(&codepoint)
    }

    /// Get glyph metrics, or the all-zero sentinel when missing
    pub fn lookup(&self, codepoint: u32) -> GlyphMetrics {
        self.get(codepoint).copied().unwrap_or_default()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.glyphs.contains_key(&codepoint)
    }

    /// Number of distinct codepoints
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    /// Decoded glyph sheet
    pub fn pixels(&self) -> &Canvas {
        &self.pixels
    }
}

impl std::fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("glyphs", &self.glyphs.len())
            .field("line_height", &self.line_height)
            .field("pixels", &self.pixels)
            .finish()
    }
}
