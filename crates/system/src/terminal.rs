//! Terminal geometry detection and ANSI console formatting
//!
//! Geometry queries fall back to the classic 80x24 when the process has
//! no usable console (redirected output, CI, platforms without the
//! query). [`Term`] decides once, at construction, whether its target
//! stream is a live console and from then on either emits real escape
//! sequences or empty strings — callers never branch on console-ness
//! themselves.

use std::io::IsTerminal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Columns assumed when the terminal width cannot be determined.
pub const DEFAULT_COLUMNS: u16 = 80;
/// Rows assumed when the terminal height cannot be determined.
pub const DEFAULT_ROWS: u16 = 24;

/// Terminal geometry in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalSize {
    /// Width in columns
    pub columns: u16,
    /// Height in rows
    pub rows: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self { columns: DEFAULT_COLUMNS, rows: DEFAULT_ROWS }
    }
}

/// Geometry of the controlling terminal, or the 80x24 default when it
/// cannot be determined.
///
/// Unix asks stdout first, then stderr (stdout is the one most often
/// redirected), then falls back to the `COLUMNS`/`LINES` environment
/// variables some shells export.
#[must_use]
pub fn size() -> TerminalSize {
    probe_size().or_else(size_from_env).unwrap_or_default()
}

/// Width of the controlling terminal in columns; 80 when unknown.
#[must_use]
pub fn terminal_columns() -> u16 {
    size().columns
}

/// Height of the controlling terminal in rows; 24 when unknown.
#[must_use]
pub fn terminal_rows() -> u16 {
    size().rows
}

#[cfg(unix)]
fn probe_size() -> Option<TerminalSize> {
    [libc::STDOUT_FILENO, libc::STDERR_FILENO].into_iter().find_map(winsize_of_fd)
}

#[cfg(unix)]
fn winsize_of_fd(fd: libc::c_int) -> Option<TerminalSize> {
    // SAFETY: TIOCGWINSZ writes a winsize struct we own; a failed call
    // leaves it zeroed, which we reject below.
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    (rc == 0 && ws.ws_col > 0 && ws.ws_row > 0)
        .then_some(TerminalSize { columns: ws.ws_col, rows: ws.ws_row })
}

#[cfg(windows)]
fn probe_size() -> Option<TerminalSize> {
    use winapi::um::handleapi::INVALID_HANDLE_VALUE;
    use winapi::um::processenv::GetStdHandle;
    use winapi::um::winbase::STD_OUTPUT_HANDLE;
    use winapi::um::wincon::{CONSOLE_SCREEN_BUFFER_INFO, GetConsoleScreenBufferInfo};

    // SAFETY: GetStdHandle returns a borrowed handle (never closed
    // here); GetConsoleScreenBufferInfo writes into a struct we own.
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        if handle == INVALID_HANDLE_VALUE || handle.is_null() {
            return None;
        }
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = std::mem::zeroed();
        if GetConsoleScreenBufferInfo(handle, &mut info) == 0 {
            return None;
        }
        let columns = i32::from(info.srWindow.Right) - i32::from(info.srWindow.Left) + 1;
        let rows = i32::from(info.srWindow.Bottom) - i32::from(info.srWindow.Top) + 1;
        (columns > 0 && rows > 0)
            .then_some(TerminalSize { columns: columns as u16, rows: rows as u16 })
    }
}

#[cfg(not(any(unix, windows)))]
fn probe_size() -> Option<TerminalSize> {
    None
}

fn size_from_env() -> Option<TerminalSize> {
    let columns: u16 = crate::env::getenv("COLUMNS").parse().ok()?;
    let rows: u16 = crate::env::getenv("LINES").parse().ok()?;
    (columns > 0 && rows > 0).then_some(TerminalSize { columns, rows })
}

/// Attribute-name-to-code table for [`Term::ansi`]. Case-sensitive;
/// names not listed here contribute nothing to the output.
const ANSI_CODES: &[(&str, &str)] = &[
    ("default", "0"),
    ("bold", "1"),
    ("underscore", "4"),
    ("blink", "5"),
    ("reverse", "7"),
    ("concealed", "8"),
    ("black", "30"),
    ("red", "31"),
    ("green", "32"),
    ("yellow", "33"),
    ("blue", "34"),
    ("magenta", "35"),
    ("cyan", "36"),
    ("white", "37"),
    ("black_bg", "40"),
    ("red_bg", "41"),
    ("green_bg", "42"),
    ("yellow_bg", "43"),
    ("blue_bg", "44"),
    ("magenta_bg", "45"),
    ("cyan_bg", "46"),
    ("white_bg", "47"),
];

/// Stateful ANSI formatter bound to one output stream.
///
/// The console-or-not decision is made exactly once, at construction,
/// and never re-evaluated: a `Term` built from a redirected stream
/// stays escape-free for its whole life even if the stream is later
/// reattached to a tty.
///
/// ```
/// use lumen_system::terminal::Term;
///
/// let term = Term::default(); // assumes a live console
/// assert_eq!(term.ansi("bold,green"), "\x1b[1;32m");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Term {
    is_console: bool,
}

impl Default for Term {
    /// Assume ANSI escape sequences are ok.
    fn default() -> Self {
        Self { is_console: true }
    }
}

impl Term {
    /// Construct from a stream: escapes are emitted only if the stream
    /// is a live console at this moment.
    #[must_use]
    pub fn from_stream<S: IsTerminal>(stream: &S) -> Self {
        Self { is_console: stream.is_terminal() }
    }

    /// `Term` bound to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_stream(&std::io::stdout())
    }

    /// `Term` bound to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::from_stream(&std::io::stderr())
    }

    /// Whether this instance was bound to a live console.
    #[must_use]
    pub fn is_console(&self) -> bool {
        self.is_console
    }

    /// The escape sequence for a comma-separated list of attribute
    /// names, e.g. `"bold,green,white_bg"`.
    ///
    /// Accepted names: `default`, `bold`, `underscore`, `blink`,
    /// `reverse`, `concealed`; foregrounds `black`, `red`, `green`,
    /// `yellow`, `blue`, `magenta`, `cyan`, `white`; and the same
    /// eight with a `_bg` suffix for backgrounds. Unknown names are
    /// ignored. In the non-console state the result is always `""`.
    #[must_use]
    pub fn ansi(&self, command: &str) -> String {
        if !self.is_console {
            return String::new();
        }
        let codes: Vec<&str> = command
            .split(',')
            .filter_map(|name| {
                let name = name.trim();
                ANSI_CODES.iter().find(|(known, _)| *known == name).map(|(_, code)| *code)
            })
            .collect();
        format!("\x1b[{}m", codes.join(";"))
    }

    /// `text` wrapped in `ansi(command)` and a trailing reset to the
    /// default appearance. In the non-console state both wrappers are
    /// empty and `text` passes through unchanged.
    #[must_use]
    pub fn ansi_with(&self, command: &str, text: &str) -> String {
        format!("{}{}{}", self.ansi(command), text, self.ansi("default"))
    }

    /// 24-bit foreground color escape for an arbitrary RGB triple.
    #[must_use]
    pub fn ansi_fgcolor(&self, r: u8, g: u8, b: u8) -> String {
        if !self.is_console {
            return String::new();
        }
        format!("\x1b[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape for an arbitrary RGB triple.
    #[must_use]
    pub fn ansi_bgcolor(&self, r: u8, g: u8, b: u8) -> String {
        if !self.is_console {
            return String::new();
        }
        format!("\x1b[48;2;{r};{g};{b}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn disabled_term() -> Term {
        let file = tempfile::tempfile().expect("tempfile");
        let term = Term::from_stream(&file);
        assert!(!term.is_console());
        term
    }

    #[test]
    fn default_size_is_80_by_24() {
        let size = TerminalSize::default();
        assert_eq!(size.columns, 80);
        assert_eq!(size.rows, 24);
    }

    #[test]
    fn geometry_is_always_positive() {
        // Whether or not the harness has a tty, the fallback keeps the
        // answer usable.
        assert!(terminal_columns() > 0);
        assert!(terminal_rows() > 0);
    }

    #[test]
    fn non_console_term_emits_nothing() {
        let term = disabled_term();
        assert_eq!(term.ansi("bold"), "");
        assert_eq!(term.ansi("bold,green,white_bg"), "");
        assert_eq!(term.ansi("default"), "");
        assert_eq!(term.ansi_fgcolor(255, 0, 0), "");
        assert_eq!(term.ansi_bgcolor(0, 255, 0), "");
    }

    #[test]
    fn non_console_term_passes_text_through() {
        let term = disabled_term();
        assert_eq!(term.ansi_with("bold", "hello"), "hello");
        assert_eq!(term.ansi_with("red", "X"), "X");
    }

    #[test]
    fn console_term_emits_escape_sequences() {
        let term = Term::default();
        assert!(term.is_console());
        assert_eq!(term.ansi("bold,green"), "\x1b[1;32m");
        assert_eq!(term.ansi("default"), "\x1b[0m");
        assert_eq!(term.ansi("red_bg"), "\x1b[41m");
        // Idempotent: same input, same output.
        assert_eq!(term.ansi("bold,green"), term.ansi("bold,green"));
    }

    #[test]
    fn unknown_attributes_contribute_nothing() {
        let term = Term::default();
        assert_eq!(term.ansi("bold,sparkle"), term.ansi("bold"));
        assert_eq!(term.ansi("sparkle,green"), term.ansi("green"));
    }

    #[test]
    fn wrapped_text_always_resets_to_default() {
        let term = Term::default();
        let wrapped = term.ansi_with("bold,yellow", "warning");
        assert!(wrapped.starts_with("\x1b[1;33m"));
        assert!(wrapped.contains("warning"));
        assert!(wrapped.ends_with(&term.ansi("default")));
    }

    #[test]
    fn truecolor_sequences() {
        let term = Term::default();
        assert_eq!(term.ansi_fgcolor(1, 2, 3), "\x1b[38;2;1;2;3m");
        assert_eq!(term.ansi_bgcolor(255, 128, 0), "\x1b[48;2;255;128;0m");
    }
}
