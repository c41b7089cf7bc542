//! BMFont metrics
//!
//! Types produced by the text-format `.fnt` parser.

mod parser;

use std::str::FromStr;

pub use parser::parse;

/// Placement and advance of one glyph inside a glyph sheet
///
/// The all-zero default is the sentinel used for codepoints no atlas
/// covers: it draws nothing and does not move the pen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Codepoint this glyph renders
    pub codepoint: u32,
    /// Left edge of the glyph region in the sheet
    pub atlas_x: i32,
    /// Top edge of the glyph region in the sheet
    pub atlas_y: i32,
    /// Glyph region width
    pub width: u32,
    /// Glyph region height
    pub height: u32,
    /// Horizontal offset from the pen to the region's left edge
    pub x_offset: i32,
    /// Vertical offset from the pen to the region's top edge
    pub y_offset: i32,
    /// Pen advance after drawing
    pub x_advance: i32,
    /// Sheet page index
    pub page: u32,
    /// Channel mask (informational)
    pub channel: u32,
}

/// A glyph sheet page declared by the font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub id: u32,
    pub file: String,
}

/// Parsed contents of a BMFont text file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// Face name from the `info` line
    pub face: String,
    /// Nominal size from the `info` line
    pub size: i32,
    /// Distance between consecutive baselines
    pub line_height: i32,
    /// Baseline offset from the top of a line
    pub base: i32,
    /// Sheet width declared by `common`
    pub scale_w: i32,
    /// Sheet height declared by `common`
    pub scale_h: i32,
    pub pages: Vec<PageInfo>,
    /// Glyphs in source order; duplicates are kept
    pub glyphs: Vec<GlyphMetrics>,
}

impl FromStr for FontMetrics {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Metrics parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based source line, 0 when not tied to a line
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected key=value pair, found `{0}`")]
    ExpectedPair(String),

    #[error("unterminated quoted value")]
    UnterminatedQuote,

    #[error("invalid integer `{value}` for `{key}`")]
    InvalidNumber { key: String, value: String },

    #[error("`{tag}` line is missing `{key}`")]
    MissingKey { tag: &'static str, key: &'static str },

    #[error("negative `{key}` ({value}) for glyph {id}")]
    NegativeMetric { id: u32, key: &'static str, value: i32 },

    #[error("no `common` line")]
    MissingCommon,
}
