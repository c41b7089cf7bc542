//! Paragraph layout

use bmf_raster::Canvas;

use super::{LineBreaker, TextLayout};
use crate::font::Font;
use crate::render::render_string;

/// Bounding box for paragraph rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBox {
    /// Pen x of each line, or the line center when `center_x`
    pub x: i32,
    /// Pen y of the first line, or the block center when `center_y`
    pub y: i32,
    /// Maximum line width
    pub width: i32,
    /// Height budget
    pub height: i32,
    pub center_x: bool,
    pub center_y: bool,
}

impl TextBox {
    /// Create a left/top anchored box
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            center_x: false,
            center_y: false,
        }
    }

    /// Center each line horizontally on `x`
    pub fn center_x(mut self, center: bool) -> Self {
        self.center_x = center;
        self
    }

    /// Center the block of lines vertically on `y`
    pub fn center_y(mut self, center: bool) -> Self {
        self.center_y = center;
        self
    }

    /// Wrap text to this box without drawing
    pub fn layout(&self, text: &str, font: &Font) -> TextLayout {
        layout_text_box(text, self.width, self.height, font)
    }

    /// Wrap and draw text, returning the layout that was drawn
    pub fn render(&self, canvas: &mut Canvas, text: &str, font: &Font) -> TextLayout {
        render_text_box(
            canvas,
            self.x,
            self.y,
            self.width,
            self.height,
            self.center_x,
            self.center_y,
            text,
            font,
        )
    }
}

/// Wrap `text` into lines for a `width` x `height` box
pub fn layout_text_box(text: &str, width: i32, height: i32, font: &Font) -> TextLayout {
    let line_height = font.line_height();
    let lines = LineBreaker::break_lines(text, width, height, font);
    if lines.is_empty() {
        return TextLayout::empty(line_height);
    }
    TextLayout { lines, line_height }
}

/// Wrap `text` into a box and draw each line.
///
/// Lines advance by the font's line height starting at `y`, or at `y`
/// minus half the block height when `center_y`. Each line starts at `x`,
/// or at `x` minus half its width when `center_x`. Returns the layout
/// that was drawn.
#[allow(clippy::too_many_arguments)]
pub fn render_text_box(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    center_x: bool,
    center_y: bool,
    text: &str,
    font: &Font,
) -> TextLayout {
    let layout = layout_text_box(text, width, height, font);
    let mut pen_y = layout.origin_y(y, center_y);

    for line in &layout.lines {
        render_string(canvas, line.origin_x(x, center_x), pen_y, &line.text, font);
        pen_y = pen_y.saturating_add(layout.line_height);
    }

    tracing::trace!(
        "Rendered {} lines in {}x{} box at ({}, {})",
        layout.line_count(),
        width,
        height,
        x,
        y
    );
    layout
}
