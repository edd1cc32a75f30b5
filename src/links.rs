// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - URL classification and link markup

use crate::selection::byte_at;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::{Command, Stdio};
use tui_textarea::TextArea;

/// Syntactic URL grammar: optional http/https scheme, domain name or IPv4
/// host, optional port, path, query and fragment. Anchored at both ends.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(https?://)?(([a-z\d]([a-z\d-]*[a-z\d])*\.)+[a-z]{2,}|(\d{1,3}\.){3}\d{1,3})(:\d+)?(/[-a-z\d%_.~+]*)*(\?[;&a-z\d%_.~+=-]*)?(#[-a-z\d_]*)?$",
    )
    .unwrap()
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^()\s]+)\)").unwrap());

/// Does the string look like a URL? Syntactic check only.
pub fn is_url(s: &str) -> bool {
    URL_RE.is_match(s)
}

/// `[label](url)` markup for a linkified span.
pub fn link_markup(label: &str, url: &str) -> String {
    format!("[{}]({})", label, url)
}

/// Target of the `[label](url)` span covering the cursor, if any.
pub fn link_under_cursor(textarea: &TextArea<'_>) -> Option<String> {
    let (row, col) = textarea.cursor();
    let line = textarea.lines().get(row)?;
    let cursor_byte = byte_at(line, col);
    for cap in LINK_RE.captures_iter(line) {
        let m = cap.get(0)?;
        if cursor_byte >= m.start() && cursor_byte <= m.end() {
            return Some(cap.get(1)?.as_str().to_string());
        }
    }
    None
}

#[cfg(target_os = "macos")]
fn opener() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener() -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener() -> Command {
    Command::new("xdg-open")
}

/// Open the URL with the OS default handler. Fire and forget.
pub fn open_in_new_context(url: &str) -> Result<()> {
    opener()
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_textarea::CursorMove;

    #[test]
    fn accepts_common_urls() {
        assert!(is_url("https://example.com/a?b=1"));
        assert!(is_url("http://example.com"));
        assert!(is_url("example.com"));
        assert!(is_url("192.168.0.1:8080/x"));
        assert!(is_url("https://example.com/a/b#frag"));
        assert!(is_url("EXAMPLE.COM"));
    }

    #[test]
    fn rejects_non_urls() {
        assert!(!is_url("not a url"));
        assert!(!is_url(""));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("localhost"));
        assert!(!is_url("just-words"));
    }

    #[test]
    fn link_markup_formats_label_and_target() {
        assert_eq!(
            link_markup("docs", "https://example.com"),
            "[docs](https://example.com)"
        );
    }

    #[test]
    fn finds_link_spanning_cursor() {
        let mut textarea =
            TextArea::new(vec!["see [docs](https://example.com) here".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 8));
        assert_eq!(
            link_under_cursor(&textarea),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn no_link_outside_span() {
        let mut textarea =
            TextArea::new(vec!["see [docs](https://example.com) here".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 34));
        assert_eq!(link_under_cursor(&textarea), None);
    }

    #[test]
    fn plain_line_has_no_link() {
        let textarea = TextArea::new(vec!["no markup here".to_string()]);
        assert_eq!(link_under_cursor(&textarea), None);
    }
}
