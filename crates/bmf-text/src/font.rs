//! Font with fallback subfonts

use std::path::Path;

use crate::atlas::GlyphAtlas;
use crate::metrics::GlyphMetrics;
use crate::Result;

/// A primary glyph atlas plus ordered fallback atlases
///
/// Subfonts are append-only. When several subfonts cover a codepoint the
/// one added last renders it; the primary atlas is used only when no
/// subfont covers the codepoint.
#[derive(Debug)]
pub struct Font {
    primary: GlyphAtlas,
    subfonts: Vec<GlyphAtlas>,
}

impl Font {
    /// Load a font from a metrics file and its glyph sheet
    pub fn load(metrics_path: impl AsRef<Path>, image_path: impl AsRef<Path>) -> Result<Self> {
        GlyphAtlas::load(metrics_path, image_path).map(Self::from_atlas)
    }

    /// Load a font from metrics text and encoded sheet bytes
    pub fn from_sources(metrics: &str, image: &[u8]) -> Result<Self> {
        GlyphAtlas::from_sources(metrics, image).map(Self::from_atlas)
    }

    /// Wrap an atlas as a font with no subfonts
    pub fn from_atlas(primary: GlyphAtlas) -> Self {
        Self {
            primary,
            subfonts: Vec::new(),
        }
    }

    /// Load a fallback atlas and append it
    ///
    /// On error the font is left untouched.
    pub fn add_subfont(
        &mut self,
        metrics_path: impl AsRef<Path>,
        image_path: impl AsRef<Path>,
    ) -> Result<()> {
        let atlas = GlyphAtlas::load(metrics_path, image_path)?;
        self.push_subfont(atlas);
        Ok(())
    }

    /// In-memory variant of [`Font::add_subfont`]
    pub fn add_subfont_from_sources(&mut self, metrics: &str, image: &[u8]) -> Result<()> {
        let atlas = GlyphAtlas::from_sources(metrics, image)?;
        self.push_subfont(atlas);
        Ok(())
    }

    /// Append an already built fallback atlas
    pub fn push_subfont(&mut self, atlas: GlyphAtlas) {
        tracing::debug!(
            "Added subfont #{} ({} glyphs)",
            self.subfonts.len(),
            atlas.glyph_count()
        );
        self.subfonts.push(atlas);
    }

    /// Atlas that renders `c`: the last subfont covering it, else the primary
    pub fn resolve_atlas(&self, c: char) -> &GlyphAtlas {
        let codepoint = c as u32;
        self.subfonts
            .iter()
            .rev()
            .find(|atlas| atlas.contains(codepoint))
            .unwrap_or(&self.primary)
    }

    /// Resolve the atlas for `c` and look up its metrics.
    ///
    /// Codepoints no atlas covers yield the zero sentinel from the primary.
    pub fn glyph(&self, c: char) -> (&GlyphAtlas, GlyphMetrics) {
        let atlas = self.resolve_atlas(c);
        let metrics = match atlas.get(c as u32) {
            Some(metrics) => *metrics,
            None => {
                tracing::trace!("No glyph for U+{:04X}, rendering nothing", c as u32);
                GlyphMetrics::default()
            }
        };
        (atlas, metrics)
    }

    /// Pen advance for `c`
    pub fn advance(&self, c: char) -> i32 {
        self.glyph(c).1.x_advance
    }

    pub fn primary(&self) -> &GlyphAtlas {
        &self.primary
    }

    pub fn subfonts(&self) -> &[GlyphAtlas] {
        &self.subfonts
    }

    pub fn subfont_count(&self) -> usize {
        self.subfonts.len()
    }

    /// Line height of the primary atlas
    pub fn line_height(&self) -> i32 {
        self.primary.line_height()
    }

    /// Distinct codepoints in the primary atlas
    pub fn glyph_count(&self) -> usize {
        self.primary.glyph_count()
    }
}
