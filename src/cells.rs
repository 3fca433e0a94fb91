//! Visual width of styled strings.
//!
//! The visual width of a string is the number of code points a terminal
//! prints for it: escape markers recognised by [`crate::ansi::Scanner`] count
//! as zero, everything else (including the text inside a hyperlink) counts as
//! one cell per code point. Wide characters and combining marks are not
//! special-cased.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;

use crate::ansi::{ESC, Scanner, Token};
use crate::sync::lock_recover;

/// Minimum string length (in bytes) worth caching.
const CACHE_MIN_LEN: usize = 8;

const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

static WIDTH_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));

#[inline]
fn compute_visual_width(text: &str) -> usize {
    if !text.contains(ESC) {
        return text.chars().count();
    }
    Scanner::new(text)
        .map(|(_, token)| match token {
            Token::Text(visible) => visible.chars().count(),
            Token::Marker(_) => 0,
        })
        .sum()
}

/// Printable width of `text`, ignoring style and hyperlink markers.
///
/// Results for strings of 8 bytes or more are kept in an LRU cache.
#[must_use]
pub fn visual_width(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_visual_width(text);
    }

    if let Some(&cached) = lock_recover(&WIDTH_CACHE).get(text) {
        return cached;
    }

    let width = compute_visual_width(text);
    lock_recover(&WIDTH_CACHE).put(text.to_string(), width);
    width
}

/// Printable width of `text` without touching the cache.
#[must_use]
pub fn visual_width_uncached(text: &str) -> usize {
    compute_visual_width(text)
}

/// Pad `text` on the right with spaces up to `width` visual cells.
///
/// Text that is already at least `width` wide is returned unchanged.
#[must_use]
pub fn ljust(text: &str, width: usize) -> String {
    let current = visual_width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - current))
}

/// Pad `text` on the left with spaces up to `width` visual cells.
///
/// Text that is already at least `width` wide is returned unchanged.
#[must_use]
pub fn rjust(text: &str, width: usize) -> String {
    let current = visual_width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat(width - current))
}
