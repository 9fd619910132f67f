pub mod entry_card;
pub mod input_buffer;
pub mod stat_bars;

use ratatui::text::Span;

use crate::tui::theme;

pub use entry_card::EntryCard;
pub use input_buffer::{InputBuffer, SearchField};
pub use stat_bars::StatBars;

/// ` FIRE `-style badges, one per type, separated by a space.
pub fn type_badges<'a>(types: impl IntoIterator<Item = &'a str>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, type_name) in types.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} ", type_name.to_uppercase()),
            theme::type_badge(type_name),
        ));
    }
    spans
}
