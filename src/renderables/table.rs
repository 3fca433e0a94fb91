//! Table - column-aligned rows of styled text.
//!
//! A [`Table`] holds optional headers, one or more rows of equal length and an
//! optional per-column [`ContentAlignment`]. Rendering pads every cell by its
//! visual width, joins columns with a two-space gutter and, when the line
//! would be too long, wraps only the last column.
//!
//! # Examples
//!
//! ```
//! use term_layout::config::RenderConfig;
//! use term_layout::renderables::{Renderable, Table};
//!
//! let table = Table::from_rows([["esm-apps", "enabled"], ["livepatch", "disabled"]])
//!     .and_then(|table| table.with_headers(["SERVICE", "STATUS"]))
//!     .expect("valid table");
//!
//! let config = RenderConfig::builder().force_terminal(true).color(false).build();
//! assert_eq!(
//!     table.render(&config, Some(80)),
//!     "SERVICE    STATUS\nesm-apps   enabled\nlivepatch  disabled\n"
//! );
//! ```
//!
//! # Non-interactive output
//!
//! When output is not a terminal and no alignment was given, every column is
//! right-aligned, and nothing wraps unless a line length is passed explicitly.

use std::fmt;

use crate::cells::{ljust, rjust, visual_width};
use crate::config::{self, RenderConfig};
use crate::renderables::{Renderable, join_lines};
use crate::style::bold;
use crate::wrap::wrap_text;

/// Separator between table columns.
pub const GUTTER: &str = "  ";

/// Placeholder for cells of continuation rows created by wrapping.
const BLANK_CELL: &str = " ";

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ContentAlignment {
    #[default]
    Left,
    Right,
}

impl ContentAlignment {
    /// Default alignment for output described by `config`.
    #[must_use]
    pub const fn default_for(config: &RenderConfig) -> Self {
        if config.is_interactive() {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Pad `text` to `width` visual cells on the side this alignment calls for.
    #[must_use]
    pub fn justify(self, text: &str, width: usize) -> String {
        match self {
            Self::Left => ljust(text, width),
            Self::Right => rjust(text, width),
        }
    }
}

/// Reasons a table cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No rows were given.
    Empty,
    /// The row at this index has no cells.
    EmptyRow(usize),
    /// Rows (or headers and rows) have different lengths.
    MixedLengths,
    /// The alignment list does not have one entry per column.
    AlignmentLength { expected: usize, found: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty table not supported."),
            Self::EmptyRow(_) => write!(f, "Empty row not supported."),
            Self::MixedLengths => write!(f, "Mixed lengths in table content."),
            Self::AlignmentLength { expected, .. } => {
                write!(f, "'alignment' list should have length {expected}")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Validated tabular content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    alignment: Option<Vec<ContentAlignment>>,
}

impl Table {
    /// Build a table, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when there are no rows, a row is empty, rows
    /// differ in length, the headers differ from the row length, or the
    /// alignment list does not match the column count.
    pub fn new(
        headers: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
        alignment: Option<Vec<ContentAlignment>>,
    ) -> Result<Self, TableError> {
        let table = Self {
            headers,
            rows,
            alignment,
        };
        table.validate()?;
        Ok(table)
    }

    /// Build a table without headers from anything string-like.
    ///
    /// # Errors
    ///
    /// See [`Table::new`].
    pub fn from_rows<I, R, S>(rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(None, rows, None)
    }

    /// Replace the headers.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MixedLengths`] if the header count differs from
    /// the column count.
    pub fn with_headers<I, S>(self, headers: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        Self::new(Some(headers), self.rows, self.alignment)
    }

    /// Replace the column alignment.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::AlignmentLength`] if the list does not have one
    /// entry per column.
    pub fn with_alignment(
        self,
        alignment: impl IntoIterator<Item = ContentAlignment>,
    ) -> Result<Self, TableError> {
        let alignment = alignment.into_iter().collect();
        Self::new(self.headers, self.rows, Some(alignment))
    }

    fn validate(&self) -> Result<(), TableError> {
        let Some(first) = self.rows.first() else {
            return Err(TableError::Empty);
        };
        if let Some(idx) = self.rows.iter().position(Vec::is_empty) {
            return Err(TableError::EmptyRow(idx));
        }
        let columns = first.len();
        if self.rows.iter().any(|row| row.len() != columns) {
            return Err(TableError::MixedLengths);
        }
        if self
            .headers
            .as_ref()
            .is_some_and(|headers| headers.len() != columns)
        {
            return Err(TableError::MixedLengths);
        }
        if let Some(alignment) = &self.alignment {
            if alignment.len() != columns {
                return Err(TableError::AlignmentLength {
                    expected: columns,
                    found: alignment.len(),
                });
            }
        }
        Ok(())
    }

    /// Header cells, if any.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Body rows as given at construction.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Explicit alignment, if one was given.
    #[must_use]
    pub fn alignment(&self) -> Option<&[ContentAlignment]> {
        self.alignment.as_deref()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Maximum visual width of each column over the headers and all rows.
    #[must_use]
    pub fn column_sizes(&self) -> Vec<usize> {
        column_sizes_of(self.headers.as_deref(), &self.rows)
    }

    /// Width of a rendered line: column sizes plus the gutters between them.
    #[must_use]
    pub fn line_length(&self) -> usize {
        line_length_of(&self.column_sizes())
    }

    /// Alignment used when rendering with `config`.
    #[must_use]
    pub fn effective_alignment(&self, config: &RenderConfig) -> Vec<ContentAlignment> {
        self.alignment.clone().unwrap_or_else(|| {
            vec![ContentAlignment::default_for(config); self.column_count()]
        })
    }

    /// Wrap the last column so lines fit in `max_line_length`.
    ///
    /// Rows are returned unchanged if the table already fits. Otherwise each
    /// last cell is word-wrapped to the room the other columns leave; extra
    /// lines become continuation rows whose other cells are a single space.
    #[must_use]
    pub fn wrap_last_column(&self, max_line_length: usize) -> Vec<Vec<String>> {
        let sizes = self.column_sizes();
        let line_length = line_length_of(&sizes);
        if line_length <= max_line_length {
            return self.rows.clone();
        }

        let last_width = sizes.last().copied().unwrap_or(0);
        let fixed = line_length - last_width;
        let allowed = max_line_length.saturating_sub(fixed).max(1);
        log::trace!(
            "wrapping last column: line {line_length} > {max_line_length}, last column gets {allowed}"
        );

        let mut wrapped = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let Some((last, leading)) = row.split_last() else {
                continue;
            };
            let mut lines = wrap_text(last, allowed).into_iter();
            let first_line = lines.next().unwrap_or_default();

            let mut first = leading.to_vec();
            first.push(first_line);
            wrapped.push(first);

            for line in lines {
                let mut continuation = vec![BLANK_CELL.to_string(); leading.len()];
                continuation.push(line);
                wrapped.push(continuation);
            }
        }
        wrapped
    }

    fn format_row(cells: &[String], sizes: &[usize], alignment: &[ContentAlignment]) -> String {
        let justified: Vec<String> = cells
            .iter()
            .zip(sizes)
            .zip(alignment)
            .map(|((cell, &size), align)| align.justify(cell, size))
            .collect();
        justified.join(GUTTER).trim_end().to_string()
    }
}

impl Renderable for Table {
    fn render_lines(&self, config: &RenderConfig, line_length: Option<usize>) -> Vec<String> {
        let rows = match line_length {
            Some(max) => self.wrap_last_column(max),
            None => self.rows.clone(),
        };
        let sizes = column_sizes_of(self.headers.as_deref(), &rows);
        let alignment = self.effective_alignment(config);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        if let Some(headers) = &self.headers {
            let header = Self::format_row(headers, &sizes, &alignment);
            lines.push(bold(config, &header));
        }
        lines.extend(
            rows.iter()
                .map(|row| Self::format_row(row, &sizes, &alignment)),
        );
        lines
    }
}

impl fmt::Display for Table {
    /// Render with the process-wide configuration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = config::global();
        let budget = config.line_budget(None);
        write!(f, "{}", join_lines(&self.render_lines(&config, budget)))
    }
}

fn column_sizes_of(headers: Option<&[String]>, rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.first().map_or(0, Vec::len);
    let mut sizes = vec![0; columns];
    for row in headers.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        for (size, cell) in sizes.iter_mut().zip(row) {
            *size = (*size).max(visual_width(cell));
        }
    }
    sizes
}

fn line_length_of(sizes: &[usize]) -> usize {
    let gutters = sizes.len().saturating_sub(1) * GUTTER.len();
    sizes.iter().sum::<usize>() + gutters
}
