//! Text layout module

mod line;
mod paragraph;

pub use line::LineBreaker;
pub use paragraph::{TextBox, layout_text_box, render_text_box};

/// A laid out line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Words joined by single spaces
    pub text: String,
    /// Measured width in pixels, including internal spaces
    pub width: i32,
}

impl TextLine {
    /// Left edge of the line for a pen anchored at `x`
    pub fn origin_x(&self, x: i32, center_x: bool) -> i32 {
        if center_x { x.saturating_sub(self.width / 2) } else { x }
    }
}

/// Complete text layout result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    /// Lines of text
    pub lines: Vec<TextLine>,
    /// Line height used
    pub line_height: i32,
}

impl TextLayout {
    /// Create empty layout
    pub fn empty(line_height: i32) -> Self {
        Self {
            lines: Vec::new(),
            line_height,
        }
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total height of all lines
    pub fn height(&self) -> i32 {
        i32::try_from(self.lines.len())
            .unwrap_or(i32::MAX)
            .saturating_mul(self.line_height)
    }

    /// Pen y of the first line for a box anchored at `y`
    pub fn origin_y(&self, y: i32, center_y: bool) -> i32 {
        if center_y { y.saturating_sub(self.height() / 2) } else { y }
    }
}
