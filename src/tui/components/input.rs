use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Single-line text field. `cursor` counts characters, not bytes, so pasted
/// CJK titles and full-width punctuation edit cleanly.
#[derive(Debug, Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub placeholder: String,
    pub label: String,
    pub focused: bool,
}

impl InputField {
    pub fn new(label: &str, placeholder: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.to_string(),
            label: label.to_string(),
            focused: false,
        }
    }

    /// Returns whether the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return false;
                }
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::LightMagenta)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label.as_str())
            .border_style(border);

        let text = if self.value.is_empty() && !self.focused {
            Line::from(Span::styled(
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else if self.focused {
            let (before, after) = self.value.split_at(self.byte_offset(self.cursor));
            Line::from(vec![
                Span::raw(before),
                Span::styled("│", Style::default().fg(Color::LightMagenta)),
                Span::raw(after),
            ])
        } else {
            Line::from(Span::raw(&self.value))
        };

        f.render_widget(Paragraph::new(text).block(block), area);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::InputField;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut InputField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut field = InputField::new("Link", "");
        type_str(&mut field, "BV1x");
        assert_eq!(field.value, "BV1x");

        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value, "BV1");
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn multibyte_editing_stays_on_char_boundaries() {
        let mut field = InputField::new("Link", "");
        type_str(&mut field, "【视频】BV1");
        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Right));
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value, "【频】BV1");

        field.handle_key(key(KeyCode::End));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value, "【频】BV");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut field = InputField::new("Link", "");
        type_str(&mut field, "av123");
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(field.value.is_empty());
        assert_eq!(field.cursor, 0);
    }
}
