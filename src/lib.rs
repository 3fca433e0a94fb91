//! # term_layout
//!
//! Terminal-aware text layout: measure, wrap, align and nest styled text
//! (ANSI SGR colors and OSC 8 hyperlinks) for fixed-width terminal output.
//!
//! ## Quick Start
//!
//! ```rust
//! use term_layout::prelude::*;
//!
//! let config = RenderConfig::builder().force_terminal(true).color(false).build();
//! let link = create_link(&config, "docs", "https://example.com/docs");
//!
//! let table = Table::from_rows([["esm-infra", "enabled"], ["usg", "disabled"]])
//!     .and_then(|table| table.with_headers(["SERVICE", "STATUS"]))
//!     .expect("valid table");
//!
//! let block = Block::new("Services")
//!     .with(table)
//!     .with(format!("See {link} for details."));
//!
//! print!("{}", block.render(&config, Some(60)));
//! ```
//!
//! ## Core Concepts
//!
//! - **RenderConfig**: whether color, UTF-8 and hyperlinks are usable
//! - **Visual width**: code points a terminal prints, escape markers excluded
//! - **Wrapping**: word wrap that never splits a style or hyperlink run
//! - **Table** / **Block**: column layout and indented nesting
//!
//! Output that is not a terminal degrades gracefully: no color, no
//! hyperlinks, right-aligned tables and no width-based wrapping unless a line
//! length is requested explicitly.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ansi;
pub mod cells;
pub mod config;
pub mod renderables;
pub mod style;
pub mod sync;
pub mod terminal;
pub mod wrap;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::cells::{ljust, rjust, visual_width};
    pub use crate::config::{RenderConfig, RenderConfigBuilder};
    pub use crate::renderables::{
        Block, BlockContent, ContentAlignment, Renderable, Table, TableError,
    };
    pub use crate::style::{Style, bold, create_link, red, stylize};
    pub use crate::terminal::OutputEnv;
    pub use crate::wrap::wrap_text;
}

// Re-export key types at crate root
pub use cells::visual_width;
pub use config::RenderConfig;
pub use renderables::{Block, ContentAlignment, Renderable, Table, TableError};
pub use style::create_link;
pub use wrap::wrap_text;
