//! Normalize free-text documentation for embedding in a single table cell.

use regex::Regex;
use std::sync::LazyLock;

/// Inline marker substituted for every line break.
pub const LINE_BREAK: &str = "<br>";

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize an optional doc fragment.
///
/// Trims, turns line breaks into [`LINE_BREAK`], escapes `|`, then collapses
/// whitespace runs into one space. The marker goes in before collapsing so the
/// break survives. Text that is empty after trimming yields `None`.
pub fn sanitize(text: Option<&str>) -> Option<String> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }

    let text = text.replace("\r\n", "\n").replace('\n', LINE_BREAK);
    let text = escape_pipes(&text);
    Some(RE_WHITESPACE.replace_all(&text, " ").into_owned())
}

/// Escape every `|` not already preceded by a backslash.
fn escape_pipes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if c == '|' && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_stays_absent() {
        assert_eq!(sanitize(None), None);
    }

    #[test]
    fn blank_becomes_absent() {
        assert_eq!(sanitize(Some("  \n\t ")), None);
    }

    #[test]
    fn trims_and_collapses() {
        assert_eq!(
            sanitize(Some("  The   label\tof the  button. ")).as_deref(),
            Some("The label of the button.")
        );
    }

    #[test]
    fn line_breaks_become_markers() {
        let input = "First line\nsecond line\r\nthird\n\nfifth";
        let out = sanitize(Some(input)).unwrap();
        assert!(!out.contains('\n'));
        assert!(!out.contains('\r'));
        assert_eq!(out.matches(LINE_BREAK).count(), 4);
        assert_eq!(out, "First line<br>second line<br>third<br><br>fifth");
    }

    #[test]
    fn indentation_after_break_collapses() {
        assert_eq!(
            sanitize(Some("Opens the menu.\n    Closes on escape.")).as_deref(),
            Some("Opens the menu.<br> Closes on escape.")
        );
    }

    #[test]
    fn pipes_are_escaped() {
        let out = sanitize(Some("'filled' | 'outlined'|'text'")).unwrap();
        assert_eq!(out, r"'filled' \| 'outlined'\|'text'");
        assert_eq!(out.matches('|').count(), out.matches(r"\|").count());
    }

    #[test]
    fn escaped_pipe_is_left_alone() {
        assert_eq!(sanitize(Some(r"a \| b")).as_deref(), Some(r"a \| b"));
    }
}
