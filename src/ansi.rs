//! Escape-sequence scanning.
//!
//! Styled strings handed to this crate carry two kinds of invisible markers:
//!
//! - SGR style markers: `ESC [ <params> m`, where a parameter list of only
//!   zeros (or none) is a reset and anything else opens a style run.
//! - OSC 8 hyperlink markers: `ESC ] 8 ; <params> ; <uri> ST`, where an empty
//!   URI closes the link run. `ST` is `ESC \` (BEL is accepted too).
//!
//! [`Scanner`] walks a string and yields plain text and markers with their
//! byte offsets. [`RunState`] follows the markers and reports whether the scan
//! position is inside a run (PLAIN, IN_STYLE, IN_LINK). An `ESC` that does not
//! start a complete sequence is reported as ordinary text.

/// The escape character.
pub const ESC: char = '\x1b';
/// SGR reset.
pub const RESET: &str = "\x1b[0m";
/// SGR bold.
pub const BOLD: &str = "\x1b[1m";
/// SGR bright red foreground.
pub const BRIGHT_RED: &str = "\x1b[91m";
/// OSC 8 link terminator (a link marker with an empty URI).
pub const LINK_END: &str = "\x1b]8;;\x1b\\";
/// String terminator used by the OSC sequences this crate emits.
pub const ST: &str = "\x1b\\";

/// Build the OSC 8 marker that opens a link to `url`.
#[must_use]
pub fn link_start(url: &str) -> String {
    format!("\x1b]8;;{url}{ST}")
}

/// A complete escape sequence found in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    /// SGR sequence that turns a style on.
    StyleOpen(&'a str),
    /// SGR reset.
    StyleReset(&'a str),
    /// OSC 8 sequence opening a link.
    LinkOpen { raw: &'a str, url: &'a str },
    /// OSC 8 sequence with an empty URI.
    LinkClose(&'a str),
    /// Any other well-formed CSI or OSC sequence. Invisible, but neither opens
    /// nor closes a run.
    Other(&'a str),
}

impl<'a> Marker<'a> {
    /// The marker's source text.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        match self {
            Self::StyleOpen(raw)
            | Self::StyleReset(raw)
            | Self::LinkClose(raw)
            | Self::Other(raw)
            | Self::LinkOpen { raw, .. } => raw,
        }
    }
}

/// A piece of a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Visible text (never contains a complete escape sequence).
    Text(&'a str),
    /// An invisible escape marker.
    Marker(Marker<'a>),
}

impl<'a> Token<'a> {
    /// The token's source text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Text(text) => text,
            Self::Marker(marker) => marker.raw(),
        }
    }
}

/// Iterator over the tokens of a string, yielding `(byte_offset, token)`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Start scanning `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let rest = &self.source[start..];
        if rest.is_empty() {
            return None;
        }

        if let Some(marker) = parse_marker(rest) {
            self.pos += marker.raw().len();
            return Some((start, Token::Marker(marker)));
        }

        // Plain text runs until the next ESC that starts a complete sequence.
        // A dangling ESC at the head of `rest` is swallowed as text.
        let mut end = rest.len();
        for (idx, ch) in rest.char_indices().skip(1) {
            if ch == ESC && parse_marker(&rest[idx..]).is_some() {
                end = idx;
                break;
            }
        }
        self.pos += end;
        Some((start, Token::Text(&rest[..end])))
    }
}

/// Try to parse a complete escape sequence at the start of `s`.
fn parse_marker(s: &str) -> Option<Marker<'_>> {
    let mut chars = s.char_indices();
    if chars.next()?.1 != ESC {
        return None;
    }
    match chars.next()?.1 {
        '[' => parse_csi(s),
        ']' => parse_osc(s),
        _ => None,
    }
}

/// `ESC [` params (0x30-0x3F) intermediates (0x20-0x2F) final (0x40-0x7E).
fn parse_csi(s: &str) -> Option<Marker<'_>> {
    let bytes = s.as_bytes();
    let mut idx = 2;
    while idx < bytes.len() && (0x30..=0x3F).contains(&bytes[idx]) {
        idx += 1;
    }
    let params_end = idx;
    while idx < bytes.len() && (0x20..=0x2F).contains(&bytes[idx]) {
        idx += 1;
    }
    let final_byte = *bytes.get(idx)?;
    if !(0x40..=0x7E).contains(&final_byte) {
        return None;
    }
    let raw = &s[..=idx];
    if final_byte != b'm' || params_end != idx {
        return Some(Marker::Other(raw));
    }
    let params = &s[2..params_end];
    let is_reset = params
        .split(';')
        .all(|param| param.bytes().all(|b| b == b'0'));
    if is_reset {
        Some(Marker::StyleReset(raw))
    } else {
        Some(Marker::StyleOpen(raw))
    }
}

/// `ESC ]` body terminated by `ESC \` or BEL.
fn parse_osc(s: &str) -> Option<Marker<'_>> {
    let body_start = 2;
    let mut body_end = None;
    let mut raw_end = 0;
    let mut chars = s[body_start..].char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\x07' => {
                body_end = Some(body_start + offset);
                raw_end = body_start + offset + 1;
                break;
            }
            ESC => {
                if matches!(chars.peek(), Some((_, '\\'))) {
                    body_end = Some(body_start + offset);
                    raw_end = body_start + offset + 2;
                }
                // An ESC that is not part of ST aborts the sequence.
                break;
            }
            _ => {}
        }
    }
    let body = &s[body_start..body_end?];
    let raw = &s[..raw_end];

    let Some(link) = body.strip_prefix("8;") else {
        return Some(Marker::Other(raw));
    };
    // `8;params;uri`; params never contain ';'.
    let url = link.split_once(';').map_or("", |(_, uri)| uri);
    if url.is_empty() {
        Some(Marker::LinkClose(raw))
    } else {
        Some(Marker::LinkOpen { raw, url })
    }
}

/// Where a scan position sits relative to style and hyperlink runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plain,
    InStyle,
    InLink,
}

/// Tracks open runs while markers are fed in order.
///
/// Style runs do not nest: any number of openers is closed by one reset.
/// Link and style runs are independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    style_open: bool,
    link_open: bool,
}

impl RunState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the state with the next marker.
    pub fn feed(&mut self, marker: &Marker<'_>) {
        match marker {
            Marker::StyleOpen(_) => self.style_open = true,
            Marker::StyleReset(_) => self.style_open = false,
            Marker::LinkOpen { .. } => self.link_open = true,
            Marker::LinkClose(_) => self.link_open = false,
            Marker::Other(_) => {}
        }
    }

    /// Current mode. A link run takes precedence when both are open.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.link_open {
            Mode::InLink
        } else if self.style_open {
            Mode::InStyle
        } else {
            Mode::Plain
        }
    }

    /// True when no run is open.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !self.style_open && !self.link_open
    }
}

/// Check whether `s` contains any complete escape marker.
#[must_use]
pub fn has_markers(s: &str) -> bool {
    s.contains(ESC) && Scanner::new(s).any(|(_, token)| matches!(token, Token::Marker(_)))
}

/// Remove every complete escape marker, keeping the visible text.
#[must_use]
pub fn strip_markers(s: &str) -> String {
    Scanner::new(s)
        .filter_map(|(_, token)| match token {
            Token::Text(text) => Some(text),
            Token::Marker(_) => None,
        })
        .collect()
}

/// Check that every run opened in `s` is closed again by the end of `s`.
#[must_use]
pub fn is_balanced(s: &str) -> bool {
    let mut state = RunState::new();
    for (_, token) in Scanner::new(s) {
        if let Token::Marker(marker) = token {
            state.feed(&marker);
        }
    }
    state.is_plain()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<Token<'_>> {
        Scanner::new(s).map(|(_, token)| token).collect()
    }

    #[test]
    fn test_plain_text_is_single_token() {
        assert_eq!(tokens("hello world"), vec![Token::Text("hello world")]);
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_sgr_markers() {
        assert_eq!(
            tokens("\x1b[1mbold\x1b[0m"),
            vec![
                Token::Marker(Marker::StyleOpen("\x1b[1m")),
                Token::Text("bold"),
                Token::Marker(Marker::StyleReset("\x1b[0m")),
            ]
        );
        assert_eq!(
            tokens("\x1b[m"),
            vec![Token::Marker(Marker::StyleReset("\x1b[m"))]
        );
        assert_eq!(
            tokens("\x1b[38;5;196m"),
            vec![Token::Marker(Marker::StyleOpen("\x1b[38;5;196m"))]
        );
    }

    #[test]
    fn test_link_markers() {
        let link = "\x1b]8;;https://example.com\x1b\\site\x1b]8;;\x1b\\";
        assert_eq!(
            tokens(link),
            vec![
                Token::Marker(Marker::LinkOpen {
                    raw: "\x1b]8;;https://example.com\x1b\\",
                    url: "https://example.com",
                }),
                Token::Text("site"),
                Token::Marker(Marker::LinkClose(LINK_END)),
            ]
        );
    }

    #[test]
    fn test_link_with_params_and_bel() {
        let link = "\x1b]8;id=1;https://a.test\x07x\x1b]8;;\x07";
        let found = tokens(link);
        assert_eq!(
            found[0],
            Token::Marker(Marker::LinkOpen {
                raw: "\x1b]8;id=1;https://a.test\x07",
                url: "https://a.test",
            })
        );
        assert_eq!(found[1], Token::Text("x"));
        assert_eq!(found[2], Token::Marker(Marker::LinkClose("\x1b]8;;\x07")));
    }

    #[test]
    fn test_non_sgr_csi_is_other() {
        assert_eq!(
            tokens("\x1b[2Kline"),
            vec![Token::Marker(Marker::Other("\x1b[2K")), Token::Text("line")]
        );
    }

    #[test]
    fn test_dangling_escape_is_text() {
        assert_eq!(tokens("a\x1b"), vec![Token::Text("a\x1b")]);
        assert_eq!(tokens("\x1b[1"), vec![Token::Text("\x1b[1")]);
        assert_eq!(
            tokens("\x1b]8;;unterminated"),
            vec![Token::Text("\x1b]8;;unterminated")]
        );
        assert_eq!(tokens("\x1bx"), vec![Token::Text("\x1bx")]);
    }

    #[test]
    fn test_dangling_escape_before_real_marker() {
        assert_eq!(
            tokens("\x1b\x1b[1mx"),
            vec![
                Token::Text("\x1b"),
                Token::Marker(Marker::StyleOpen("\x1b[1m")),
                Token::Text("x"),
            ]
        );
    }

    #[test]
    fn test_offsets_point_into_source() {
        let s = "ab\x1b[1mcd";
        let offsets: Vec<usize> = Scanner::new(s).map(|(offset, _)| offset).collect();
        assert_eq!(offsets, vec![0, 2, 6]);
    }

    #[test]
    fn test_run_state_modes() {
        let mut state = RunState::new();
        assert_eq!(state.mode(), Mode::Plain);
        state.feed(&Marker::StyleOpen(BOLD));
        assert_eq!(state.mode(), Mode::InStyle);
        state.feed(&Marker::LinkOpen {
            raw: "",
            url: "x",
        });
        assert_eq!(state.mode(), Mode::InLink);
        state.feed(&Marker::LinkClose(LINK_END));
        assert_eq!(state.mode(), Mode::InStyle);
        state.feed(&Marker::StyleReset(RESET));
        assert!(state.is_plain());
    }

    #[test]
    fn test_strip_and_balance() {
        let s = "some \x1b[1mbold\x1b[0m and \x1b]8;;u\x1b\\link\x1b]8;;\x1b\\";
        assert_eq!(strip_markers(s), "some bold and link");
        assert!(has_markers(s));
        assert!(is_balanced(s));
        assert!(!is_balanced("\x1b[91mred"));
        assert!(!has_markers("plain"));
    }

    #[test]
    fn test_link_start() {
        assert_eq!(link_start("example.com"), "\x1b]8;;example.com\x1b\\");
    }
}
