//! Rendering configuration.
//!
//! [`RenderConfig`] decides whether output may use color, UTF-8 symbols and
//! OSC 8 hyperlinks. Renderers take it explicitly (`render(&config, ..)`); the
//! `Display` implementations fall back to a process-wide instance managed by
//! [`init`], [`global`] and [`disable_color`].
//!
//! # Detection rules
//!
//! - UTF-8: the output encoding is `utf-8` (case-insensitive).
//! - Color: stdout is a terminal and `NO_COLOR` is unset or empty.
//! - Hyperlinks: stdout is a terminal.
//!
//! # Process-wide instance
//!
//! Initialize once, early, before rendering from several threads. Reading the
//! instance concurrently is safe; [`init`] and [`disable_color`] take a write
//! lock but are not meant to race with each other.

use std::sync::RwLock;

use crate::sync::{read_recover, write_recover};
use crate::terminal::{self, OutputEnv};

/// Resolved output capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    use_color: bool,
    use_utf8: bool,
    use_hyperlinks: bool,
    interactive: bool,
    terminal_width: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::plain()
    }
}

impl RenderConfig {
    /// Detect the configuration from the current process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env(&OutputEnv::capture())
    }

    /// Derive the configuration from an environment snapshot.
    #[must_use]
    pub fn from_env(env: &OutputEnv) -> Self {
        let use_utf8 = env
            .encoding
            .as_deref()
            .is_some_and(|encoding| encoding.eq_ignore_ascii_case("utf-8"));
        let use_color = env.is_terminal && !env.color_disabled_by_env();
        Self {
            use_color,
            use_utf8,
            use_hyperlinks: env.is_terminal,
            interactive: env.is_terminal,
            terminal_width: None,
        }
    }

    /// Non-interactive output with every capability turned off.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            use_color: false,
            use_utf8: false,
            use_hyperlinks: false,
            interactive: false,
            terminal_width: None,
        }
    }

    /// Create a builder for explicit overrides.
    #[must_use]
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Whether SGR color/style sequences may be emitted.
    #[must_use]
    pub const fn use_color(&self) -> bool {
        self.use_color
    }

    /// Whether UTF-8 symbols may be emitted.
    #[must_use]
    pub const fn use_utf8(&self) -> bool {
        self.use_utf8
    }

    /// Whether OSC 8 hyperlinks may be emitted.
    #[must_use]
    pub const fn use_hyperlinks(&self) -> bool {
        self.use_hyperlinks
    }

    /// Whether output goes to an interactive terminal.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Copy of this configuration with color turned off.
    #[must_use]
    pub const fn disable_color(self) -> Self {
        Self {
            use_color: false,
            ..self
        }
    }

    /// Width of the terminal, if output is interactive and the width is known.
    ///
    /// A fixed width set through the builder takes precedence over querying
    /// the terminal.
    #[must_use]
    pub fn terminal_width(&self) -> Option<usize> {
        if !self.interactive {
            return None;
        }
        self.terminal_width.or_else(terminal::get_terminal_width)
    }

    /// Resolve the line length renderers wrap to.
    ///
    /// An explicit request always wins. Without one, interactive output wraps
    /// to the terminal width and non-interactive output does not wrap.
    #[must_use]
    pub fn line_budget(&self, requested: Option<usize>) -> Option<usize> {
        requested.or_else(|| self.terminal_width())
    }

    /// Pick `utf8` when UTF-8 output is available, `fallback` otherwise.
    #[must_use]
    pub const fn glyph<'a>(&self, utf8: &'a str, fallback: &'a str) -> &'a str {
        if self.use_utf8 { utf8 } else { fallback }
    }
}

/// Builder for [`RenderConfig`].
///
/// Unset fields come from [`OutputEnv::capture`] (or the snapshot given to
/// [`RenderConfigBuilder::env`]); set fields override detection.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RenderConfigBuilder {
    env: Option<OutputEnv>,
    force_terminal: Option<bool>,
    color: Option<bool>,
    hyperlinks: Option<bool>,
    encoding: Option<String>,
    terminal_width: Option<usize>,
}

impl RenderConfigBuilder {
    /// Use this snapshot instead of capturing the process environment.
    pub fn env(mut self, env: OutputEnv) -> Self {
        self.env = Some(env);
        self
    }

    /// Treat output as interactive (or not) regardless of detection.
    pub fn force_terminal(mut self, force: bool) -> Self {
        self.force_terminal = Some(force);
        self
    }

    /// Force color on or off.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = Some(enabled);
        self
    }

    /// Force hyperlinks on or off.
    pub fn hyperlinks(mut self, enabled: bool) -> Self {
        self.hyperlinks = Some(enabled);
        self
    }

    /// Override the output encoding name.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Fix the terminal width instead of querying it.
    pub fn terminal_width(mut self, width: usize) -> Self {
        self.terminal_width = Some(width);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> RenderConfig {
        let mut env = self.env.unwrap_or_else(OutputEnv::capture);
        if let Some(force) = self.force_terminal {
            env.is_terminal = force;
        }
        if let Some(encoding) = self.encoding {
            env.encoding = Some(encoding);
        }

        let mut config = RenderConfig::from_env(&env);
        if let Some(color) = self.color {
            config.use_color = color;
        }
        if let Some(hyperlinks) = self.hyperlinks {
            config.use_hyperlinks = hyperlinks;
        }
        config.terminal_width = self.terminal_width;
        config
    }
}

static GLOBAL: RwLock<Option<RenderConfig>> = RwLock::new(None);

/// Detect the configuration and store it as the process-wide instance.
///
/// Calling it again recomputes the flags.
pub fn init() -> RenderConfig {
    init_with(RenderConfig::detect())
}

/// Store `config` as the process-wide instance.
pub fn init_with(config: RenderConfig) -> RenderConfig {
    log::debug!("render config initialized: {config:?}");
    *write_recover(&GLOBAL) = Some(config);
    config
}

/// The process-wide instance, detected on first use if [`init`] was not called.
#[must_use]
pub fn global() -> RenderConfig {
    let current = *read_recover(&GLOBAL);
    if let Some(config) = current {
        return config;
    }
    *write_recover(&GLOBAL).get_or_insert_with(RenderConfig::detect)
}

/// Turn color off for the process-wide instance until the next [`init`].
pub fn disable_color() {
    let mut guard = write_recover(&GLOBAL);
    let config = guard.get_or_insert_with(RenderConfig::detect);
    *config = config.disable_color();
}

/// Forget the process-wide instance. Intended for test isolation.
pub fn reset() {
    *write_recover(&GLOBAL) = None;
}
