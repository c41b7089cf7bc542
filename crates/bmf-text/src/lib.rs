//! bmf Text - Bitmap Font Rendering
//!
//! This crate renders text from bitmap fonts (a BMFont metrics file plus
//! a glyph sheet image) onto a raster canvas:
//! - BMFont text-format metrics parsing
//! - Glyph atlases and fonts with fallback subfonts
//! - Glyph and single-line string rendering, width measurement
//! - Paragraph layout (greedy word wrap, optional centering)
//!
//! Rendering never fails: codepoints no atlas covers draw nothing and
//! do not advance the pen, and drawing is clipped to the canvas.

pub mod metrics;
pub mod atlas;
pub mod font;
pub mod render;
pub mod layout;

use std::path::PathBuf;

pub use metrics::{FontMetrics, GlyphMetrics, PageInfo, ParseError, ParseErrorKind};
pub use atlas::GlyphAtlas;
pub use font::Font;
pub use render::{measure_text, render_glyph, render_string};
pub use layout::{LineBreaker, TextBox, TextLayout, TextLine, layout_text_box, render_text_box};

pub use bmf_raster::{Canvas, Color, ImageError};

/// Font loading error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse font metrics {origin}: {source}")]
    Parse {
        origin: String,
        source: ParseError,
    },

    #[error("Failed to decode glyph sheet {origin}: {source}")]
    Decode {
        origin: String,
        source: ImageError,
    },
}

pub type Result<T> = std::result::Result<T, FontError>;
