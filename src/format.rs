// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - Markup edits on the pad surface

use crate::selection::selection_text;
use tui_textarea::TextArea;

/// Replace the current selection with `text`. Returns false when nothing is
/// selected.
pub fn replace_selection(textarea: &mut TextArea<'static>, text: &str) -> bool {
    if textarea.selection_range().is_none() {
        return false;
    }
    textarea.cut();
    textarea.insert_str(text);
    true
}

/// Wrap the selection in `<u>...</u>`, or unwrap it when already wrapped.
/// No-op without a selection.
pub fn toggle_underline(textarea: &mut TextArea<'static>) -> bool {
    let selected = selection_text(textarea);
    if selected.is_empty() {
        return false;
    }
    let replacement = match selected
        .strip_prefix("<u>")
        .and_then(|s| s.strip_suffix("</u>"))
    {
        Some(inner) => inner.to_string(),
        None => format!("<u>{}</u>", selected),
    };
    replace_selection(textarea, &replacement)
}

/// Insert a horizontal rule on its own line at the cursor.
pub fn insert_rule(textarea: &mut TextArea<'static>) {
    textarea.insert_str("\n---\n");
}

/// Insert a tab-equivalent run of spaces at the cursor.
pub fn insert_tab(textarea: &mut TextArea<'static>, width: u8) {
    textarea.insert_str(&" ".repeat(width.clamp(1, 16) as usize));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_textarea::CursorMove;

    fn select(textarea: &mut TextArea<'static>, from: (u16, u16), to: (u16, u16)) {
        textarea.move_cursor(CursorMove::Jump(from.0, from.1));
        textarea.start_selection();
        textarea.move_cursor(CursorMove::Jump(to.0, to.1));
    }

    #[test]
    fn underline_wraps_selection() {
        let mut textarea = TextArea::new(vec!["hello world".to_string()]);
        select(&mut textarea, (0, 0), (0, 5));
        assert!(toggle_underline(&mut textarea));
        assert_eq!(textarea.lines(), ["<u>hello</u> world"]);
    }

    #[test]
    fn underline_unwraps_wrapped_selection() {
        let mut textarea = TextArea::new(vec!["<u>hello</u> world".to_string()]);
        select(&mut textarea, (0, 0), (0, 12));
        assert!(toggle_underline(&mut textarea));
        assert_eq!(textarea.lines(), ["hello world"]);
    }

    #[test]
    fn underline_without_selection_is_noop() {
        let mut textarea = TextArea::new(vec!["hello".to_string()]);
        assert!(!toggle_underline(&mut textarea));
        assert_eq!(textarea.lines(), ["hello"]);
    }

    #[test]
    fn rule_is_inserted_at_cursor() {
        let mut textarea = TextArea::new(vec!["ab".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 1));
        insert_rule(&mut textarea);
        assert_eq!(textarea.lines(), ["a", "---", "b"]);
    }

    #[test]
    fn tab_inserts_spaces() {
        let mut textarea = TextArea::new(vec!["xy".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 1));
        insert_tab(&mut textarea, 5);
        assert_eq!(textarea.lines(), ["x     y"]);
    }

    #[test]
    fn replace_without_selection_is_noop() {
        let mut textarea = TextArea::new(vec!["xy".to_string()]);
        assert!(!replace_selection(&mut textarea, "z"));
        assert_eq!(textarea.lines(), ["xy"]);
    }
}
