//! Greedy word wrapping

use std::collections::VecDeque;

use super::TextLine;
use crate::font::Font;
use crate::render::measure_text;

const SPACE: u32 = ' ' as u32;

/// Greedy line breaker
///
/// Words are whitespace-separated runs and are never split. Each word
/// is placed on the current line when it fits strictly inside the box
/// width, otherwise the line is closed and the word starts the next one.
/// A word that does not fit on an empty line gets a line of its own.
pub struct LineBreaker;

impl LineBreaker {
    /// Break `text` into lines for a box of `max_width` x `max_height`.
    ///
    /// The height budget is checked each time a line is closed early;
    /// once `lines * line_height > max_height` the remaining words are
    /// dropped.
    pub fn break_lines(text: &str, max_width: i32, max_height: i32, font: &Font) -> Vec<TextLine> {
        let mut words: VecDeque<&str> = text.split_whitespace().collect();
        let space = font.primary().lookup(SPACE).x_advance;
        let line_height = font.line_height();

        let mut lines = Vec::new();
        let mut line = String::new();
        let mut line_width: i32 = 0;

        while let Some(word) = words.pop_front() {
            let mut word_width = measure_text(word, font);
            // Only the final word, when it starts a line, goes uncharged
            if !line.is_empty() || !words.is_empty() {
                word_width = word_width.saturating_add(space);
            }

            if line.is_empty() || line_width.saturating_add(word_width) < max_width {
                line_width = line_width.saturating_add(word_width);
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                if words.is_empty() {
                    lines.push(Self::finish(std::mem::take(&mut line), font));
                }
            } else {
                words.push_front(word);
                lines.push(Self::finish(std::mem::take(&mut line), font));
                line_width = 0;

                let used = i32::try_from(lines.len())
                    .unwrap_or(i32::MAX)
                    .saturating_mul(line_height);
                if used > max_height {
                    tracing::trace!(
                        "Height budget {} exhausted after {} lines, dropping {} words",
                        max_height,
                        lines.len(),
                        words.len()
                    );
                    break;
                }
            }
        }

        lines
    }

    fn finish(text: String, font: &Font) -> TextLine {
        let width = measure_text(&text, font);
        tracing::trace!("Line {:?} ({}px)", text, width);
        TextLine { text, width }
    }
}
