//! Single-entry detail view.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::catalog::models::{artwork_url, capitalize, humanize, padded_id};
use crate::core::catalog::{CatalogError, EntryDetail};
use crate::tui::events::Action;
use crate::tui::router::Route;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::{type_badges, StatBars};

pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load Pokémon details.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Loading,
    Loaded(Box<EntryDetail>),
    Failed,
}

pub struct DetailState {
    name: String,
    status: DetailStatus,
    artwork_base: String,
    rx: Option<mpsc::UnboundedReceiver<Result<EntryDetail, CatalogError>>>,
}

impl DetailState {
    pub fn new(name: impl Into<String>, services: &Services) -> Self {
        Self {
            name: name.into(),
            status: DetailStatus::Loading,
            artwork_base: services.config.api.artwork_base_url.clone(),
            rx: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    /// Fetch the record in the background.
    pub fn load(&mut self, services: &Services) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);
        self.status = DetailStatus::Loading;

        let api = services.catalog.clone();
        let name = self.name.clone();
        tokio::spawn(async move {
            let _ = tx.send(api.entry_detail(&name).await);
        });
    }

    /// Poll for the fetched record. Call from on_tick.
    pub fn poll(&mut self) {
        let Some(rx) = self.rx.as_mut() else {
            return;
        };
        let Ok(outcome) = rx.try_recv() else {
            return;
        };
        self.rx = None;
        self.status = match outcome {
            Ok(detail) => DetailStatus::Loaded(Box::new(detail)),
            Err(e) => {
                log::warn!("Detail load for {:?} failed: {}", self.name, e);
                DetailStatus::Failed
            }
        };
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                services.dispatch(Action::Navigate(Route::List));
                true
            }
            KeyCode::Char('r') if self.status == DetailStatus::Failed => {
                services.dispatch(Action::Navigate(Route::List));
                true
            }
            _ => false,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.status {
            DetailStatus::Loading => self.render_centered(
                frame,
                area,
                vec![Line::from(Span::styled(
                    "Loading Pokémon...",
                    Style::default().fg(theme::PRIMARY),
                ))],
            ),
            DetailStatus::Failed => self.render_centered(
                frame,
                area,
                vec![
                    Line::from(Span::styled(
                        DETAIL_FAILED_MESSAGE,
                        Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
                    )),
                    Line::raw(""),
                    Line::from(vec![
                        Span::styled("[r]", theme::key_hint()),
                        Span::raw(" Try Again   "),
                        Span::styled("[Esc]", theme::key_hint()),
                        Span::raw(" Back to list"),
                    ]),
                ],
            ),
            DetailStatus::Loaded(detail) => self.render_detail(frame, area, detail),
        }
    }

    fn render_centered(&self, frame: &mut Frame, area: Rect, lines: Vec<Line>) {
        let height = (lines.len() as u16).min(area.height);
        let y = area.y + area.height.saturating_sub(height) / 2;
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            Rect::new(area.x, y, area.width, height),
        );
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, detail: &EntryDetail) {
        let accent = theme::type_color(detail.primary_type());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", padded_id(detail.id)),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(
                Line::from(vec![
                    Span::styled(" Esc", theme::key_hint()),
                    Span::raw(":back "),
                ])
                .right_aligned(),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Min(6),
        ])
        .split(inner);

        let artwork = detail
            .artwork_url()
            .map(str::to_string)
            .unwrap_or_else(|| artwork_url(&self.artwork_base, detail.id));
        let abilities = detail
            .abilities
            .iter()
            .map(|a| capitalize(&humanize(&a.ability.name)))
            .collect::<Vec<_>>()
            .join(", ");

        let summary = vec![
            Line::from(Span::styled(
                capitalize(&detail.name),
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(type_badges(detail.type_names())),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Height     ", theme::muted()),
                Span::raw(format!("{}m", detail.height_m())),
            ]),
            Line::from(vec![
                Span::styled("Weight     ", theme::muted()),
                Span::raw(format!("{}kg", detail.weight_kg())),
            ]),
            Line::from(vec![
                Span::styled("Abilities  ", theme::muted()),
                Span::raw(abilities),
            ]),
            Line::from(vec![
                Span::styled("Artwork    ", theme::muted()),
                Span::styled(artwork, theme::dim()),
            ]),
        ];
        frame.render_widget(Paragraph::new(summary), rows[0]);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("Base Statistics", theme::heading()))),
            rows[1],
        );
        frame.render_widget(StatBars::new(&detail.stats), rows[2]);
    }
}
