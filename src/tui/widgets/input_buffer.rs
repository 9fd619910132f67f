//! Single-line text input: the editing buffer and the search field widget
//! that renders it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme;

/// A text buffer with a byte cursor that always sits on a char boundary.
#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.next_boundary();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }
}

// ── Widget ──────────────────────────────────────────────────────────────────

/// One-line search field: `[/] Search: <text>` with a placeholder when empty
/// and a block cursor while focused.
pub struct SearchField<'a> {
    input: &'a InputBuffer,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> SearchField<'a> {
    pub fn new(input: &'a InputBuffer, placeholder: &'a str) -> Self {
        Self {
            input,
            placeholder,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn line(&self) -> Line<'a> {
        let prefix_style = if self.focused {
            Style::default()
                .fg(theme::PRIMARY_LIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        let mut spans = vec![Span::styled(" [/] Search: ", prefix_style)];

        let text = self.input.text();
        if text.is_empty() {
            if self.focused {
                spans.push(Span::styled(" ", cursor_style()));
            }
            spans.push(Span::styled(self.placeholder, theme::dim()));
            return Line::from(spans);
        }

        if !self.focused {
            spans.push(Span::styled(text, Style::default().fg(theme::TEXT)));
            return Line::from(spans);
        }

        let (before, rest) = text.split_at(self.input.cursor_position());
        let mut rest_chars = rest.chars();
        let under_cursor = rest_chars
            .next()
            .map(String::from)
            .unwrap_or_else(|| " ".to_string());
        spans.push(Span::styled(before, Style::default().fg(theme::TEXT)));
        spans.push(Span::styled(under_cursor, cursor_style()));
        spans.push(Span::styled(
            rest_chars.as_str(),
            Style::default().fg(theme::TEXT),
        ));
        Line::from(spans)
    }
}

fn cursor_style() -> Style {
    Style::default().fg(theme::BG_BASE).bg(theme::TEXT)
}

impl Widget for SearchField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
