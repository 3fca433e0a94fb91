//! Block - a titled, indented group of content.
//!
//! A [`Block`] prints its title flush left and every content item indented by
//! [`INDENT`] spaces. Nested blocks indent again, so indentation grows by four
//! spaces per level. When a line length is in effect, each item is rendered to
//! that length minus the indentation it receives.

use std::fmt;

use crate::config::{self, RenderConfig};
use crate::renderables::{Renderable, Table, join_lines};

/// Spaces added per nesting level.
pub const INDENT: usize = 4;

/// One item inside a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    /// A paragraph, word-wrapped to the available width.
    Text(String),
    /// A table rendered to the available width.
    Table(Table),
    /// A nested block.
    Block(Block),
}

impl From<&str> for BlockContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for BlockContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Table> for BlockContent {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<Block> for BlockContent {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}

impl Renderable for BlockContent {
    fn render_lines(&self, config: &RenderConfig, line_length: Option<usize>) -> Vec<String> {
        match self {
            Self::Text(text) => text.render_lines(config, line_length),
            Self::Table(table) => table.render_lines(config, line_length),
            Self::Block(block) => block.render_lines(config, line_length),
        }
    }
}

/// A titled container of text, tables and nested blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    title: Option<String>,
    content: Vec<BlockContent>,
}

impl Block {
    /// Create an empty block with a title. An empty title is not printed.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Vec::new(),
        }
    }

    /// Create an empty block without a title.
    #[must_use]
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Append an item (builder style).
    #[must_use]
    pub fn with(mut self, item: impl Into<BlockContent>) -> Self {
        self.push(item);
        self
    }

    /// Append an item.
    pub fn push(&mut self, item: impl Into<BlockContent>) {
        self.content.push(item.into());
    }

    /// Append several items.
    pub fn extend<T: Into<BlockContent>>(&mut self, items: impl IntoIterator<Item = T>) {
        self.content.extend(items.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &[BlockContent] {
        &self.content
    }
}

impl Renderable for Block {
    fn render_lines(&self, config: &RenderConfig, line_length: Option<usize>) -> Vec<String> {
        let inner_length = line_length.map(|length| length.saturating_sub(INDENT));
        let pad = " ".repeat(INDENT);

        let mut lines = Vec::new();
        if let Some(title) = self.title.as_deref().filter(|title| !title.is_empty()) {
            lines.push(title.to_string());
        }
        for item in &self.content {
            for line in item.render_lines(config, inner_length) {
                if line.is_empty() {
                    lines.push(line);
                } else {
                    lines.push(format!("{pad}{line}"));
                }
            }
        }
        lines
    }
}

impl fmt::Display for Block {
    /// Render with the process-wide configuration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = config::global();
        let budget = config.line_budget(None);
        write!(f, "{}", join_lines(&self.render_lines(&config, budget)))
    }
}
