//! Renderable components.
//!
//! - [`Table`]: column-aligned rows with optional bold headers and last-column
//!   wrapping
//! - [`Block`]: a titled, indented container of text, tables and other blocks
//!
//! Both implement [`Renderable`], as do plain strings, which render as
//! word-wrapped paragraphs.
//!
//! # Examples
//!
//! ```
//! use term_layout::config::RenderConfig;
//! use term_layout::renderables::{Block, Renderable, Table};
//!
//! let config = RenderConfig::plain();
//! let block = Block::new("Status")
//!     .with("All services are up")
//!     .with(Table::from_rows([["1", "ok"]]).expect("valid table"));
//!
//! assert_eq!(
//!     block.render(&config, Some(40)),
//!     "Status\n    All services are up\n    1  ok\n"
//! );
//! ```

use crate::config::RenderConfig;
use crate::wrap::wrap_text;

pub mod block;
pub mod table;

pub use block::{Block, BlockContent, INDENT};
pub use table::{ContentAlignment, GUTTER, Table, TableError};

/// Anything that renders to newline-terminated lines of styled text.
pub trait Renderable {
    /// Render to lines, wrapping to `line_length` when one is given.
    ///
    /// `line_length` is already resolved: `None` means "do not wrap".
    fn render_lines(&self, config: &RenderConfig, line_length: Option<usize>) -> Vec<String>;

    /// Render to a single string with one `\n` after every line.
    ///
    /// Without an explicit `line_length`, interactive output wraps to the
    /// terminal width and non-interactive output does not wrap.
    fn render(&self, config: &RenderConfig, line_length: Option<usize>) -> String {
        let budget = config.line_budget(line_length);
        join_lines(&self.render_lines(config, budget))
    }
}

impl Renderable for str {
    fn render_lines(&self, _config: &RenderConfig, line_length: Option<usize>) -> Vec<String> {
        match line_length {
            Some(width) => wrap_text(self, width),
            None if self.is_empty() => vec![String::new()],
            None => self.lines().map(ToString::to_string).collect(),
        }
    }
}

impl Renderable for String {
    fn render_lines(&self, config: &RenderConfig, line_length: Option<usize>) -> Vec<String> {
        self.as_str().render_lines(config, line_length)
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn render_lines(&self, config: &RenderConfig, line_length: Option<usize>) -> Vec<String> {
        (*self).render_lines(config, line_length)
    }
}

/// Join lines, terminating each with `\n`.
pub(crate) fn join_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
