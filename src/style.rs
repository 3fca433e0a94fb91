//! Style runs and hyperlinks.
//!
//! These helpers wrap individual spans of text before they are handed to a
//! [`Table`](crate::renderables::Table) or [`Block`](crate::renderables::Block).
//! Each one degrades to the bare text when the configuration disables the
//! capability, so the result is always safe to print.

use std::fmt;

use crate::ansi::{self, BOLD, BRIGHT_RED, LINK_END, RESET};
use crate::config::RenderConfig;

/// Text styles this crate knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    BrightRed,
}

impl Style {
    /// SGR sequence that turns the style on.
    #[must_use]
    pub const fn sgr(self) -> &'static str {
        match self {
            Self::Bold => BOLD,
            Self::BrightRed => BRIGHT_RED,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bold => write!(f, "bold"),
            Self::BrightRed => write!(f, "bright red"),
        }
    }
}

/// Wrap `text` in `style` when color is enabled.
#[must_use]
pub fn stylize(config: &RenderConfig, text: &str, style: Style) -> String {
    if config.use_color() {
        format!("{}{text}{RESET}", style.sgr())
    } else {
        text.to_string()
    }
}

/// Bold `text` when color is enabled.
#[must_use]
pub fn bold(config: &RenderConfig, text: &str) -> String {
    stylize(config, text, Style::Bold)
}

/// Color `text` bright red when color is enabled.
#[must_use]
pub fn red(config: &RenderConfig, text: &str) -> String {
    stylize(config, text, Style::BrightRed)
}

/// Turn `text` into an OSC 8 hyperlink to `url` when hyperlinks are enabled.
///
/// The result measures as wide as `text` and is never split by
/// [`wrap_text`](crate::wrap::wrap_text).
#[must_use]
pub fn create_link(config: &RenderConfig, text: &str, url: &str) -> String {
    if config.use_hyperlinks() {
        format!("{}{text}{LINK_END}", ansi::link_start(url))
    } else {
        text.to_string()
    }
}
