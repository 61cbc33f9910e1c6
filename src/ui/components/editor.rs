use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Cursor and edit-mode state for a multi-line text buffer. The buffer
/// itself is owned by the caller; the cursor is a byte offset that always
/// sits on a char boundary.
pub struct LyricEditor {
    pub is_editing: bool,
    cursor: usize,
}

impl Default for LyricEditor {
    fn default() -> Self {
        Self {
            is_editing: true,
            cursor: 0,
        }
    }
}

impl LyricEditor {
    /// Re-seed for a fresh buffer, cursor at the end.
    pub fn reset(&mut self, text: &str) {
        self.is_editing = true;
        self.cursor = text.len();
    }

    /// Returns true when the key was consumed as an edit.
    pub fn handle_key(&mut self, key: KeyEvent, text: &mut String) -> bool {
        if !self.is_editing || key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        self.cursor = self.cursor.min(text.len());
        match key.code {
            KeyCode::Char(c) => {
                text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Enter => {
                text.insert(self.cursor, '\n');
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if let Some(prev) = text[..self.cursor].chars().next_back() {
                    self.cursor -= prev.len_utf8();
                    text.remove(self.cursor);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < text.len() {
                    text.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                if let Some(prev) = text[..self.cursor].chars().next_back() {
                    self.cursor -= prev.len_utf8();
                }
                true
            }
            KeyCode::Right => {
                if let Some(next) = text[self.cursor..].chars().next() {
                    self.cursor += next.len_utf8();
                }
                true
            }
            KeyCode::Up => {
                self.move_vertically(text, -1);
                true
            }
            KeyCode::Down => {
                self.move_vertically(text, 1);
                true
            }
            KeyCode::Home => {
                let (row, _) = line_col(text, self.cursor);
                self.cursor = offset_for(text, row, 0);
                true
            }
            KeyCode::End => {
                let (row, _) = line_col(text, self.cursor);
                self.cursor = offset_for(text, row, usize::MAX);
                true
            }
            _ => false,
        }
    }

    pub fn paste(&mut self, text: &mut String, pasted: &str) {
        if !self.is_editing {
            return;
        }
        self.cursor = self.cursor.min(text.len());
        text.insert_str(self.cursor, pasted);
        self.cursor += pasted.len();
    }

    pub fn cursor_row(&self, text: &str) -> usize {
        line_col(text, self.cursor.min(text.len())).0
    }

    /// Buffer as display lines, with the cursor cell reversed while editing.
    pub fn styled_lines<'a>(&self, text: &'a str) -> Vec<Line<'a>> {
        let (cursor_row, cursor_col) = line_col(text, self.cursor.min(text.len()));
        let mut lines: Vec<Line> = Vec::new();

        for (row, raw) in text.split('\n').enumerate() {
            if !self.is_editing || row != cursor_row {
                lines.push(Line::from(raw));
                continue;
            }

            let split = raw
                .char_indices()
                .nth(cursor_col)
                .map(|(i, c)| (i, i + c.len_utf8()));
            let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
            match split {
                Some((start, end)) => lines.push(Line::from(vec![
                    Span::raw(&raw[..start]),
                    Span::styled(&raw[start..end], cursor_style),
                    Span::raw(&raw[end..]),
                ])),
                None => lines.push(Line::from(vec![
                    Span::raw(raw),
                    Span::styled(" ", cursor_style),
                ])),
            }
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            )));
        }
        lines
    }

    fn move_vertically(&mut self, text: &str, delta: isize) {
        let (row, col) = line_col(text, self.cursor);
        let target = row as isize + delta;
        if target < 0 {
            return;
        }
        let target = target as usize;
        if target >= text.split('\n').count() {
            return;
        }
        self.cursor = offset_for(text, target, col);
    }
}

fn line_col(text: &str, cursor: usize) -> (usize, usize) {
    let before = &text[..cursor];
    let row = before.matches('\n').count();
    let col = before
        .rsplit('\n')
        .next()
        .map(|line| line.chars().count())
        .unwrap_or(0);
    (row, col)
}

fn offset_for(text: &str, row: usize, col: usize) -> usize {
    let mut offset = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i == row {
            let within: usize = line
                .char_indices()
                .nth(col)
                .map(|(idx, _)| idx)
                .unwrap_or(line.len());
            return offset + within;
        }
        offset += line.len() + 1;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut editor = LyricEditor::default();
        let mut text = String::new();
        editor.reset(&text);
        for c in "hi".chars() {
            editor.handle_key(key(KeyCode::Char(c)), &mut text);
        }
        editor.handle_key(key(KeyCode::Left), &mut text);
        editor.handle_key(key(KeyCode::Char('e')), &mut text);
        assert_eq!(text, "hei");
    }

    #[test]
    fn backspace_handles_multibyte_chars() {
        let mut editor = LyricEditor::default();
        let mut text = "naïve".to_string();
        editor.reset(&text);
        editor.handle_key(key(KeyCode::Left), &mut text);
        editor.handle_key(key(KeyCode::Left), &mut text);
        editor.handle_key(key(KeyCode::Backspace), &mut text);
        assert_eq!(text, "nave");
    }

    #[test]
    fn enter_splits_the_line() {
        let mut editor = LyricEditor::default();
        let mut text = "ab".to_string();
        editor.reset(&text);
        editor.handle_key(key(KeyCode::Left), &mut text);
        editor.handle_key(key(KeyCode::Enter), &mut text);
        assert_eq!(text, "a\nb");
    }

    #[test]
    fn vertical_movement_clamps_to_line_length() {
        let mut editor = LyricEditor::default();
        let mut text = "long first line\nab".to_string();
        editor.reset(&text);
        editor.handle_key(key(KeyCode::Up), &mut text);
        editor.handle_key(key(KeyCode::Char('X')), &mut text);
        assert_eq!(text, "loXng first line\nab");
    }

    #[test]
    fn keys_are_ignored_outside_edit_mode() {
        let mut editor = LyricEditor::default();
        let mut text = "ab".to_string();
        editor.reset(&text);
        editor.is_editing = false;
        assert!(!editor.handle_key(key(KeyCode::Char('x')), &mut text));
        assert_eq!(text, "ab");
    }

    #[test]
    fn cursor_cell_is_reversed_while_editing() {
        let mut editor = LyricEditor::default();
        let text = "ab".to_string();
        editor.reset(&text);
        let lines = editor.styled_lines(&text);
        assert_eq!(lines.len(), 1);
        // Cursor past the end renders as an extra reversed cell.
        assert_eq!(lines[0].spans.len(), 2);
    }
}
