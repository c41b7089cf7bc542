//! Glyph and string rendering

use bmf_raster::Canvas;

use crate::font::Font;

/// Draw one glyph with its pen at (x, y) and return its advance.
///
/// The glyph region is composited source-over at
/// `(x + x_offset, y + y_offset)`, clipped to the canvas. Codepoints no
/// atlas covers draw nothing and advance 0.
pub fn render_glyph(canvas: &mut Canvas, x: i32, y: i32, c: char, font: &Font) -> i32 {
    let (atlas, glyph) = font.glyph(c);
    canvas.blit(
        atlas.pixels(),
        glyph.atlas_x,
        glyph.atlas_y,
        glyph.width,
        glyph.height,
        x.saturating_add(glyph.x_offset),
        y.saturating_add(glyph.y_offset),
    );
    glyph.x_advance
}

/// Draw `text` on a single line starting at (x, y); returns the final pen x.
pub fn render_string(canvas: &mut Canvas, x: i32, y: i32, text: &str, font: &Font) -> i32 {
    text.chars()
        .fold(x, |pen, c| pen.saturating_add(render_glyph(canvas, pen, y, c, font)))
}

/// Width of `text` in pixels: the sum of resolved advances, no drawing.
pub fn measure_text(text: &str, font: &Font) -> i32 {
    text.chars()
        .fold(0, |width: i32, c| width.saturating_add(font.advance(c)))
}
