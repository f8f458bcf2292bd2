//! Single-line text input with a cursor
//!
//! The cursor is a character index, so multi-byte input such as "Café & Co"
//! edits correctly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    pub focused: bool,
    pub placeholder: String,
    pub label: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set_value(content);
        self
    }

    /// Replace the text and move the cursor to the end
    pub fn set_value(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as u16 + 2
        };

        if label_width > 0 {
            let label = Line::from(vec![
                Span::styled(self.label.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label, label_width);
        }

        let input_x = area.x + label_width;
        let showing_placeholder = self.content.is_empty() && !self.focused;
        let (text, style) = if showing_placeholder {
            (self.placeholder.as_str(), Style::default().fg(Color::DarkGray))
        } else {
            (self.content.as_str(), Style::default().fg(Color::White))
        };
        buf.set_stringn(
            input_x,
            area.y,
            text,
            area.width.saturating_sub(label_width) as usize,
            style,
        );

        if self.focused {
            let cursor_x = input_x + self.cursor as u16;
            if cursor_x < area.x + area.width {
                let under = self.content.chars().nth(self.cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    under.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = TextInput::new().content("Ace");
        input.insert('!');
        assert_eq!(input.value(), "Ace!");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "ce!");

        input.move_end();
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "c");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new().content("Café");
        input.move_left();
        input.insert('x');
        assert_eq!(input.value(), "Cafxé");

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "Cafx");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::new();
        input.move_left();
        input.backspace();
        input.delete();
        assert_eq!(input.cursor(), 0);

        input.set_value("ab");
        input.move_right();
        assert_eq!(input.cursor(), 2);
    }
}
