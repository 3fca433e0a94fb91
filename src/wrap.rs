//! Escape-aware word wrapping.
//!
//! Words are whitespace-delimited, but whitespace only delimits while no
//! style or hyperlink run is open: a run's opening and closing markers always
//! end up in the same word and therefore on the same line. Widths are visual
//! widths, so markers never count against the line length.

use crate::ansi::{RunState, Scanner, Token};
use crate::cells::visual_width;

/// Split `text` into words, keeping every escape run inside a single word.
///
/// If `text` ends with a run still open, the markers cannot be trusted and the
/// string is split on plain whitespace instead.
#[must_use]
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut state = RunState::new();
    let mut word_start: Option<usize> = None;

    for (offset, token) in Scanner::new(text) {
        match token {
            Token::Marker(marker) => {
                state.feed(&marker);
                word_start.get_or_insert(offset);
            }
            Token::Text(visible) => {
                for (idx, ch) in visible.char_indices() {
                    let at = offset + idx;
                    if ch.is_whitespace() && state.is_plain() {
                        if let Some(start) = word_start.take() {
                            words.push(&text[start..at]);
                        }
                    } else {
                        word_start.get_or_insert(at);
                    }
                }
            }
        }
    }
    if let Some(start) = word_start {
        words.push(&text[start..]);
    }

    if state.is_plain() {
        words
    } else {
        log::debug!("unterminated escape run in wrap input, splitting on whitespace");
        text.split_whitespace().collect()
    }
}

/// Wrap `text` into lines of at most `max_width` visual cells.
///
/// Words are re-joined with single spaces. The first line keeps one cell free
/// (it is measured as if it had a leading space); later lines may fill
/// `max_width` exactly. A word wider than the room left is placed alone on its
/// own line, unsplit. Empty or all-whitespace input gives one empty line. A
/// `max_width` of 0 is treated as 1.
#[must_use]
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in split_words(text) {
        let word_width = visual_width(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if first_line_lead(&lines) + current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Extra cell charged while filling the first line.
fn first_line_lead(lines: &[String]) -> usize {
    usize::from(lines.is_empty())
}
