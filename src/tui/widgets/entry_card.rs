//! Grid card for one list entry.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::catalog::models::{artwork_url, capitalize, padded_id};
use crate::core::catalog::ListEntry;
use crate::tui::theme;

/// `#025` in the top-right corner, the capitalized name, and the artwork
/// locator derived from the entry's reference id.
pub struct EntryCard<'a> {
    entry: &'a ListEntry,
    artwork_base: &'a str,
    selected: bool,
}

impl<'a> EntryCard<'a> {
    pub fn new(entry: &'a ListEntry, artwork_base: &'a str) -> Self {
        Self {
            entry,
            artwork_base,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for EntryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let id = self.entry.id();
        let number = id.map(padded_id).unwrap_or_else(|| "#???".to_string());
        let border_style = if self.selected {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let number_style = if self.selected {
            Style::default().fg(theme::PRIMARY)
        } else {
            theme::dim()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_top(Line::from(Span::styled(format!(" {number} "), number_style)).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        let name_style = if self.selected {
            theme::highlight()
        } else {
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD)
        };
        let pointer = if self.selected { "\u{25b8} " } else { "  " };
        let mut lines = vec![Line::from(vec![
            Span::styled(pointer, Style::default().fg(theme::PRIMARY)),
            Span::styled(capitalize(&self.entry.name), name_style),
        ])];
        if let Some(id) = id {
            lines.push(Line::from(Span::styled(
                format!("  {}", artwork_file(&artwork_url(self.artwork_base, id))),
                theme::dim(),
            )));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Last path segment of the locator; the full URL does not fit on a card.
fn artwork_file(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
