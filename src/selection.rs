// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - Selection reading from the pad surface

use tui_textarea::TextArea;

/// Byte offset of the character column `col` in `line`.
pub(crate) fn byte_at(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn char_slice(line: &str, start: usize, end: usize) -> &str {
    &line[byte_at(line, start)..byte_at(line, end)]
}

/// The currently selected pad text as a plain string. Empty when nothing is
/// selected. Positions from the textarea are (row, char column) pairs.
pub fn selection_text(textarea: &TextArea<'_>) -> String {
    let Some((a, b)) = textarea.selection_range() else {
        return String::new();
    };
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    if start == end {
        return String::new();
    }
    let lines = textarea.lines();
    let ((start_row, start_col), (end_row, end_col)) = (start, end);
    if start_row == end_row {
        return lines
            .get(start_row)
            .map(|l| char_slice(l, start_col, end_col).to_string())
            .unwrap_or_default();
    }
    let mut out = String::new();
    if let Some(first) = lines.get(start_row) {
        out.push_str(&first[byte_at(first, start_col)..]);
    }
    for line in lines.iter().take(end_row).skip(start_row + 1) {
        out.push('\n');
        out.push_str(line);
    }
    out.push('\n');
    if let Some(last) = lines.get(end_row) {
        out.push_str(char_slice(last, 0, end_col));
    }
    out
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
    fn no_selection_is_empty() {
        let textarea = TextArea::new(vec!["hello".to_string()]);
        assert_eq!(selection_text(&textarea), "");
    }

    #[test]
    fn single_line_selection() {
        let mut textarea = TextArea::new(vec!["hello world".to_string()]);
        select(&mut textarea, (0, 0), (0, 5));
        assert_eq!(selection_text(&textarea), "hello");
    }

    #[test]
    fn multi_line_selection() {
        let mut textarea = TextArea::new(vec![
            "abc".to_string(),
            "def".to_string(),
            "ghi".to_string(),
        ]);
        select(&mut textarea, (0, 1), (2, 2));
        assert_eq!(selection_text(&textarea), "bc\ndef\ngh");
    }

    #[test]
    fn backwards_selection_is_normalized() {
        let mut textarea = TextArea::new(vec!["hello".to_string()]);
        select(&mut textarea, (0, 5), (0, 1));
        assert_eq!(selection_text(&textarea), "ello");
    }

    #[test]
    fn multibyte_columns() {
        let mut textarea = TextArea::new(vec!["héllo".to_string()]);
        select(&mut textarea, (0, 1), (0, 4));
        assert_eq!(selection_text(&textarea), "éll");
    }
}
