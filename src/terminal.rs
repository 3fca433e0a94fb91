//! Terminal detection.
//!
//! Everything the renderers need to know about stdout is captured once in an
//! [`OutputEnv`] snapshot: whether it is a terminal, which encoding it uses,
//! and whether the user asked for no color. The terminal size is queried
//! separately because it can change between renders.

use std::io::IsTerminal;

/// Environment variable that force-disables color when set to a non-empty value.
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Locale variables consulted for the output encoding, in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Snapshot of the output stream's capabilities and the relevant environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputEnv {
    /// Stdout is attached to an interactive terminal.
    pub is_terminal: bool,
    /// Encoding name reported for stdout, if any (e.g. `"utf-8"`).
    pub encoding: Option<String>,
    /// Raw value of `NO_COLOR`.
    pub no_color: Option<String>,
}

impl OutputEnv {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        let env = Self {
            is_terminal: is_terminal(),
            encoding: stdout_encoding(),
            no_color: std::env::var(NO_COLOR_VAR).ok(),
        };
        log::debug!(
            "captured output env: terminal={} encoding={:?} no_color={:?}",
            env.is_terminal,
            env.encoding,
            env.no_color
        );
        env
    }

    /// True when `NO_COLOR` holds a non-empty value.
    #[must_use]
    pub fn color_disabled_by_env(&self) -> bool {
        self.no_color
            .as_deref()
            .is_some_and(|value| !value.is_empty())
    }
}

/// Check if stdout is connected to a terminal.
#[must_use]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the size cannot be determined, e.g. when stdout is not a
/// terminal.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    match crossterm::terminal::size() {
        Ok((width, height)) => Some((usize::from(width), usize::from(height))),
        Err(err) => {
            log::debug!("terminal size unavailable: {err}");
            None
        }
    }
}

/// Get the terminal width in cells, if it can be determined.
#[must_use]
pub fn get_terminal_width() -> Option<usize> {
    get_terminal_size()
        .map(|(width, _)| width)
        .filter(|&width| width > 0)
}

/// Encoding of stdout as derived from the locale environment.
///
/// The first non-empty of `LC_ALL`, `LC_CTYPE` and `LANG` wins. Windows
/// consoles always speak UTF-8 through the VT layer.
#[must_use]
pub fn stdout_encoding() -> Option<String> {
    if cfg!(windows) {
        return Some(String::from("utf-8"));
    }
    let locale = LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())?;
    encoding_from_locale(&locale)
}

/// Extract and normalize the codeset from a locale name such as
/// `en_US.UTF-8@euro`.
///
/// `C` and `POSIX` map to `ascii`; a locale without a codeset has no known
/// encoding.
#[must_use]
pub fn encoding_from_locale(locale: &str) -> Option<String> {
    let locale = locale.trim();
    if locale == "C" || locale == "POSIX" {
        return Some(String::from("ascii"));
    }
    let (_, codeset) = locale.split_once('.')?;
    let codeset = codeset.split('@').next().unwrap_or_default().trim();
    if codeset.is_empty() {
        return None;
    }
    let lower = codeset.to_lowercase();
    if lower == "utf8" || lower == "utf-8" {
        Some(String::from("utf-8"))
    } else {
        Some(lower)
    }
}
