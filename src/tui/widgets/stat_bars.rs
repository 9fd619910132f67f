//! Horizontal bar chart for base statistics.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::catalog::models::{stat_label, StatValue, STAT_CHART_MAX};
use crate::tui::theme;

const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 4;

/// One row per stat: upper-cased label, value, and a bar scaled to
/// `0..STAT_CHART_MAX` colored by [`theme::stat_color`].
pub struct StatBars<'a> {
    stats: &'a [StatValue],
}

impl<'a> StatBars<'a> {
    pub fn new(stats: &'a [StatValue]) -> Self {
        Self { stats }
    }
}

/// Filled cells for `value` on a bar `width` cells wide. Values past the
/// chart maximum fill the bar.
pub fn bar_length(value: u32, width: usize) -> usize {
    let clamped = value.min(STAT_CHART_MAX) as usize;
    (clamped * width + STAT_CHART_MAX as usize / 2) / STAT_CHART_MAX as usize
}

impl Widget for StatBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 1);
        let lines: Vec<Line> = self
            .stats
            .iter()
            .map(|stat| {
                let filled = bar_length(stat.base_stat, bar_width);
                Line::from(vec![
                    Span::styled(
                        format!("{:<LABEL_WIDTH$}", stat_label(&stat.stat.name)),
                        theme::muted(),
                    ),
                    Span::styled(
                        format!("{:>3} ", stat.base_stat),
                        Style::default().fg(theme::TEXT),
                    ),
                    Span::styled(
                        "\u{2588}".repeat(filled),
                        Style::default().fg(theme::stat_color(stat.base_stat)),
                    ),
                    Span::styled(
                        "\u{2591}".repeat(bar_width - filled),
                        theme::dim(),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}
