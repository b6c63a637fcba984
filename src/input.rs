//! Single-line text field widget.
//!
//! [`TextFieldState`] owns the edit state (value, char-indexed cursor and
//! horizontal scroll); [`TextField`] renders it as a bordered, labelled
//! field with placeholder, focus highlight and an optional error line.
//! Editing operates on char indices so multibyte input never splits a
//! character.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

/// What a key press did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The text changed; callers re-derive anything computed from it.
    Changed,
    /// Enter was pressed on the current value.
    Submitted,
    /// The field consumed the key without changing the text.
    Handled,
    /// The key is not an editing key; the caller should process it.
    Ignored,
}

/// Edit state for a [`TextField`].
#[derive(Debug, Clone, Default)]
pub struct TextFieldState {
    text: String,
    /// Cursor position in chars, 0..=char_count.
    cursor: usize,
    /// First visible char when the value overflows the field.
    offset: usize,
    error: Option<String>,
}

impl TextFieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an initial value, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            offset: 0,
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value, moving the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
        self.offset = 0;
    }

    /// Empty the field. Returns true if there was anything to clear.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        self.offset = 0;
        had_text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let byte = char_to_byte(&self.text, self.cursor);
        self.text.insert(byte, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns true if text changed.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = char_to_byte(&self.text, self.cursor - 1);
        let end = char_to_byte(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor. Returns true if text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let start = char_to_byte(&self.text, self.cursor);
        let end = char_to_byte(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let len = self.text.chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Map a key press onto the field.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    if self.clear() {
                        InputEvent::Changed
                    } else {
                        InputEvent::Handled
                    }
                }
                KeyCode::Char('a') => {
                    self.move_home();
                    InputEvent::Handled
                }
                KeyCode::Char('e') => {
                    self.move_end();
                    InputEvent::Handled
                }
                _ => InputEvent::Ignored,
            };
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                InputEvent::Changed
            }
            KeyCode::Backspace => {
                if self.delete_back() {
                    InputEvent::Changed
                } else {
                    InputEvent::Handled
                }
            }
            KeyCode::Delete => {
                if self.delete_forward() {
                    InputEvent::Changed
                } else {
                    InputEvent::Handled
                }
            }
            KeyCode::Left => {
                self.move_left();
                InputEvent::Handled
            }
            KeyCode::Right => {
                self.move_right();
                InputEvent::Handled
            }
            KeyCode::Home => {
                self.move_home();
                InputEvent::Handled
            }
            KeyCode::End => {
                self.move_end();
                InputEvent::Handled
            }
            KeyCode::Enter => InputEvent::Submitted,
            _ => InputEvent::Ignored,
        }
    }

    /// Slide the scroll window so the cursor cell stays on screen.
    fn ensure_cursor_visible(&mut self, visible_width: usize) {
        if visible_width == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
            return;
        }
        while self.width_between(self.offset, self.cursor) >= visible_width {
            self.offset += 1;
        }
    }

    fn width_between(&self, from: usize, to: usize) -> usize {
        self.text
            .chars()
            .skip(from)
            .take(to.saturating_sub(from))
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }
}

fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// A labelled single-line input.
///
/// The field body is one text row inside a bordered block; when the state
/// carries an error and the area leaves room, the message is drawn on a line
/// under the block in the theme's error color.
pub struct TextField<'a> {
    label: &'a str,
    placeholder: &'a str,
    theme: Theme,
    focused: bool,
    disabled: bool,
}

impl<'a> TextField<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            placeholder: "",
            theme: Theme::default(),
            focused: false,
            disabled: false,
        }
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }

    /// Dimmed hint shown while the field is empty.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render dimmed and without a cursor; keys should not be routed here.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl StatefulWidget for TextField<'_> {
    type State = TextFieldState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TextFieldState) {
        let has_error = state.error.is_some();
        let (field_area, error_area) = if has_error && area.height > 3 {
            let chunks =
                Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let border = self
            .theme
            .field_border(self.focused && !self.disabled, has_error);
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(border);
        let inner = block.inner(field_area);
        block.render(field_area, buf);

        if inner.width > 0 && inner.height > 0 {
            let line = self.value_line(state, inner.width as usize);
            Paragraph::new(line).render(inner, buf);
        }

        if let Some(error_area) = error_area {
            let message = state.error.as_deref().unwrap_or_default();
            Paragraph::new(format!(" {}", message))
                .style(Style::default().fg(self.theme.error))
                .render(error_area, buf);
        }
    }
}

impl TextField<'_> {
    fn value_line(&self, state: &mut TextFieldState, width: usize) -> Line<'static> {
        if state.text.is_empty() && !(self.focused && !self.disabled) {
            return Line::from(Span::styled(
                self.placeholder.to_string(),
                self.theme.placeholder,
            ));
        }
        if self.disabled {
            return Line::from(Span::styled(
                state.text.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        if !self.focused {
            return Line::from(Span::raw(state.text.clone()));
        }

        // Focused: reserve one cell for the cursor and keep it in view.
        state.ensure_cursor_visible(width.saturating_sub(1).max(1));
        let visible: Vec<char> = state.text.chars().skip(state.offset).collect();
        let cursor_at = state.cursor - state.offset;

        let before: String = visible.iter().take(cursor_at).collect();
        let cursor_char = visible
            .get(cursor_at)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = visible.iter().skip(cursor_at + 1).collect();

        let cursor_style = Style::default()
            .bg(Color::White)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, cursor_style),
            Span::raw(after),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn draw(width: u16, height: u16, field: TextField, state: &mut TextFieldState) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_stateful_widget(field, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();
        for y in 0..height {
            let mut line = String::new();
            for x in 0..width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut state = TextFieldState::new();
        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), InputEvent::Changed);
        assert_eq!(state.handle_key(key(KeyCode::Char('c'))), InputEvent::Changed);
        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Char('b')));
        assert_eq!(state.text(), "abc");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn editing_respects_char_boundaries() {
        let mut state = TextFieldState::with_text("héllo");
        state.move_home();
        state.move_right();
        state.move_right();
        assert!(state.delete_back());
        assert_eq!(state.text(), "hllo");

        let mut state = TextFieldState::with_text("héllo");
        state.move_home();
        state.move_right();
        assert!(state.delete_forward());
        assert_eq!(state.text(), "hllo");
    }

    #[test]
    fn backspace_at_start_changes_nothing() {
        let mut state = TextFieldState::with_text("x");
        state.move_home();
        assert_eq!(state.handle_key(key(KeyCode::Backspace)), InputEvent::Handled);
        assert_eq!(state.text(), "x");
    }

    #[test]
    fn enter_submits_and_unknown_keys_pass_through() {
        let mut state = TextFieldState::with_text("q");
        assert_eq!(state.handle_key(key(KeyCode::Enter)), InputEvent::Submitted);
        assert_eq!(state.handle_key(key(KeyCode::F(5))), InputEvent::Ignored);
        assert_eq!(state.handle_key(key(KeyCode::Tab)), InputEvent::Ignored);
    }

    #[test]
    fn ctrl_u_clears_the_field() {
        let mut state = TextFieldState::with_text("query");
        assert_eq!(state.handle_key(ctrl('u')), InputEvent::Changed);
        assert!(state.is_empty());
        assert_eq!(state.handle_key(ctrl('u')), InputEvent::Handled);
    }

    #[test]
    fn home_and_end_jump_cursor() {
        let mut state = TextFieldState::with_text("abc");
        state.handle_key(key(KeyCode::Home));
        assert_eq!(state.cursor(), 0);
        state.handle_key(key(KeyCode::End));
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn placeholder_shows_when_empty_and_unfocused() {
        let mut state = TextFieldState::new();
        let field = TextField::new("Filter").placeholder("type to filter");
        let screen = draw(30, 3, field, &mut state);
        assert!(screen.contains("Filter"));
        assert!(screen.contains("type to filter"));
    }

    #[test]
    fn value_replaces_placeholder() {
        let mut state = TextFieldState::with_text("ada");
        let field = TextField::new("Filter").placeholder("type to filter");
        let screen = draw(30, 3, field, &mut state);
        assert!(screen.contains("ada"));
        assert!(!screen.contains("type to filter"));
    }

    #[test]
    fn focused_field_draws_cursor_cell() {
        let mut state = TextFieldState::with_text("ab");
        let backend = TestBackend::new(20, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let field = TextField::new("F").focused(true);
                frame.render_stateful_widget(field, frame.area(), &mut state);
            })
            .unwrap();
        // Cursor sits after "ab": border column + two chars in.
        let cell = &terminal.backend().buffer()[(3, 1)];
        assert_eq!(cell.style().bg, Some(Color::White));
    }

    #[test]
    fn error_message_renders_below_field() {
        let mut state = TextFieldState::with_text("!!");
        state.set_error("invalid name");
        let field = TextField::new("Name");
        let screen = draw(30, 4, field, &mut state);
        assert!(screen.contains("invalid name"));
    }

    #[test]
    fn long_value_scrolls_to_keep_cursor_visible() {
        let mut state = TextFieldState::with_text("abcdefghijklmnopqrstuvwxyz");
        let field = TextField::new("F").focused(true);
        let screen = draw(12, 3, field, &mut state);
        // Cursor is at the end, so the tail is visible and the head is not.
        assert!(screen.contains("z"));
        assert!(!screen.contains("abc"));
    }
}
