//! Catalog list view: search field, type picker, card grid, and pagination.

use std::cell::Cell;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::browser::{BrowseMode, BrowserController, BrowserEvent};
use crate::core::catalog::models::capitalize;
use crate::tui::app::centered_rect;
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::layout::{grid_cells, grid_columns, grid_rows, CARD_HEIGHT};
use crate::tui::router::Route;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::{EntryCard, InputBuffer, SearchField};

const ALL_TYPES_LABEL: &str = "All Types";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFocus {
    Grid,
    Search,
    TypePicker,
}

pub struct CatalogState {
    browser: BrowserController,
    search: InputBuffer,
    focus: CatalogFocus,
    /// Selected card within the current page.
    selected: usize,
    /// Picker row; 0 is "All Types".
    type_cursor: usize,
    artwork_base: String,
    /// Grid columns at the last render, for vertical movement.
    columns: Cell<usize>,
}

impl CatalogState {
    pub fn new(services: &Services) -> Self {
        Self {
            browser: BrowserController::new(services.catalog.clone(), &services.config.browser),
            search: InputBuffer::new(),
            focus: CatalogFocus::Grid,
            selected: 0,
            type_cursor: 0,
            artwork_base: services.config.api.artwork_base_url.clone(),
            columns: Cell::new(1),
        }
    }

    /// Load the type catalog and the first page.
    pub fn start(&mut self) {
        self.browser.start();
    }

    pub fn browser(&self) -> &BrowserController {
        &self.browser
    }

    pub fn focus(&self) -> CatalogFocus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether text input currently owns the keyboard.
    pub fn is_editing(&self) -> bool {
        self.focus == CatalogFocus::Search
    }

    /// Drain fetch results and fire due compute steps. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        for event in self.browser.poll(Instant::now()) {
            match event {
                BrowserEvent::OpenDetail(name) => {
                    services.dispatch(Action::Navigate(Route::Detail(name)));
                }
                BrowserEvent::TypesUnavailable => {
                    services.notify(
                        "Could not load Pokémon types; only All Types is available.",
                        NotificationLevel::Warning,
                    );
                }
                BrowserEvent::Refreshed => self.clamp_selection(),
                BrowserEvent::Failed | BrowserEvent::LookupFailed => {
                    log::debug!("Catalog error shown: {:?}", self.browser.error());
                }
                BrowserEvent::Stale | BrowserEvent::TypesLoaded => {}
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.browser.state().display_list().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.focus {
            CatalogFocus::Search => self.handle_search_input(key),
            CatalogFocus::TypePicker => self.handle_picker_input(key),
            CatalogFocus::Grid => self.handle_grid_input(key, services),
        }
    }

    fn handle_search_input(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.clear_search();
                    true
                }
                // Let Ctrl+C reach the global quit binding.
                _ => false,
            };
        }

        match key.code {
            KeyCode::Esc => self.focus = CatalogFocus::Grid,
            KeyCode::Enter => {
                if self.browser.state().mode() == BrowseMode::Global {
                    self.browser.submit_lookup();
                }
                self.focus = CatalogFocus::Grid;
            }
            KeyCode::Char(c) => {
                self.search.insert_char(c);
                self.sync_search();
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.sync_search();
            }
            KeyCode::Delete => {
                self.search.delete();
                self.sync_search();
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            _ => {}
        }
        true
    }

    fn handle_picker_input(&mut self, key: &KeyEvent) -> bool {
        let rows = self.browser.types().len() + 1;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.type_cursor = (self.type_cursor + 1) % rows;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.type_cursor = (self.type_cursor + rows - 1) % rows;
            }
            KeyCode::Enter => {
                let choice = self
                    .type_cursor
                    .checked_sub(1)
                    .and_then(|i| self.browser.types().get(i))
                    .map(|t| t.name.clone());
                self.browser.set_type(choice.as_deref());
                self.selected = 0;
                self.focus = CatalogFocus::Grid;
            }
            KeyCode::Esc | KeyCode::Char('t') => self.focus = CatalogFocus::Grid,
            _ => return false,
        }
        true
    }

    fn handle_grid_input(&mut self, key: &KeyEvent, services: &Services) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.clear_search();
                    true
                }
                _ => false,
            };
        }

        let len = self.browser.state().display_list().len();
        let columns = self.columns.get().max(1);
        match key.code {
            KeyCode::Char('l') | KeyCode::Right => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + columns < len {
                    self.selected += columns;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected >= columns {
                    self.selected -= columns;
                }
            }
            KeyCode::Enter => {
                let Some(entry) = self.browser.state().display_list().get(self.selected) else {
                    return false;
                };
                services.dispatch(Action::Navigate(Route::Detail(entry.name.clone())));
            }
            KeyCode::Char('/') => {
                self.search.move_end();
                self.focus = CatalogFocus::Search;
            }
            KeyCode::Char('t') => {
                self.type_cursor = self
                    .browser
                    .state()
                    .selected_type()
                    .and_then(|name| self.browser.types().iter().position(|t| t.name == name))
                    .map_or(0, |i| i + 1);
                self.focus = CatalogFocus::TypePicker;
            }
            KeyCode::Char('n') => {
                if self.browser.has_next_page() {
                    self.browser.next_page();
                    self.selected = 0;
                }
            }
            KeyCode::Char('p') => {
                if self.browser.state().has_prev_page() {
                    self.browser.prev_page();
                    self.selected = 0;
                }
            }
            KeyCode::Char('g') if self.browser.state().shows_global_prompt() => {
                self.browser.submit_lookup();
            }
            KeyCode::Char('r') if self.browser.error().is_some() => {
                self.search.clear();
                self.selected = 0;
                self.browser.retry();
            }
            _ => return false,
        }
        true
    }

    fn sync_search(&mut self) {
        self.browser.set_search_term(self.search.text());
        self.selected = 0;
    }

    fn clear_search(&mut self) {
        self.search.clear();
        self.selected = 0;
        self.browser.clear_search();
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_toolbar(frame, rows[0]);
        self.render_body(frame, rows[2]);
        self.render_pagination(frame, rows[3]);

        if self.focus == CatalogFocus::TypePicker {
            self.render_type_picker(frame, area);
        }
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Min(20), Constraint::Length(28)]).split(area);

        let placeholder = match self.browser.state().selected_type() {
            Some(type_name) => format!("Search in {type_name}..."),
            None => "Name (e.g. Pikachu)...".to_string(),
        };
        frame.render_widget(
            SearchField::new(&self.search, &placeholder).focused(self.focus == CatalogFocus::Search),
            cols[0],
        );

        let type_label = self
            .browser
            .state()
            .selected_type()
            .map(capitalize)
            .unwrap_or_else(|| ALL_TYPES_LABEL.to_string());
        let type_style = match self.browser.state().selected_type() {
            Some(type_name) => Style::default()
                .fg(theme::type_color(type_name))
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(theme::TEXT),
        };
        let picker = Line::from(vec![
            Span::styled("[t] Type: ", theme::dim()),
            Span::styled(type_label, type_style),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(picker), cols[1]);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let state = self.browser.state();

        if self.browser.is_loading() {
            self.render_message(
                frame,
                area,
                vec![Line::from(Span::styled(
                    "Loading Pokémon...",
                    Style::default().fg(theme::PRIMARY),
                ))],
            );
            return;
        }

        if let Some(error) = self.browser.error() {
            self.render_message(
                frame,
                area,
                vec![
                    Line::from(Span::styled(
                        error.to_string(),
                        Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
                    )),
                    Line::raw(""),
                    Line::from(vec![
                        Span::styled("[r]", theme::key_hint()),
                        Span::raw(" Try Again"),
                    ]),
                ],
            );
            return;
        }

        if state.shows_global_prompt() {
            self.render_message(
                frame,
                area,
                vec![
                    Line::from(Span::styled(
                        format!("Search globally for \"{}\"?", state.search_term().trim()),
                        Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                    )),
                    Line::raw(""),
                    Line::from(vec![
                        Span::styled("[g]", theme::key_hint()),
                        Span::raw(" Search Global Database"),
                    ]),
                ],
            );
            return;
        }

        if let Some(message) = state.empty_state_message() {
            self.render_message(
                frame,
                area,
                vec![Line::from(Span::styled(message, theme::muted()))],
            );
            return;
        }

        self.render_grid(frame, area);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, lines: Vec<Line>) {
        let height = (lines.len() as u16).min(area.height);
        let y = area.y + area.height.saturating_sub(height) / 2;
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            Rect::new(area.x, y, area.width, height),
        );
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let entries = self.browser.state().display_list();
        let columns = grid_columns(area.width) as usize;
        let visible_rows = grid_rows(area.height) as usize;
        self.columns.set(columns);

        let selected_row = self.selected / columns;
        let skip_rows = (selected_row + 1).saturating_sub(visible_rows);

        let cells = grid_cells(area, entries.len(), skip_rows);
        for (i, cell) in cells.into_iter().enumerate() {
            let index = skip_rows * columns + i;
            let Some(entry) = entries.get(index) else {
                break;
            };
            frame.render_widget(
                EntryCard::new(entry, &self.artwork_base).selected(index == self.selected),
                cell,
            );
        }
    }

    fn render_pagination(&self, frame: &mut Frame, area: Rect) {
        let state = self.browser.state();
        if !state.shows_pagination() {
            return;
        }

        let hint = |enabled: bool| {
            if enabled {
                theme::key_hint()
            } else {
                theme::dim()
            }
        };
        let has_prev = state.has_prev_page();
        let has_next = self.browser.has_next_page();
        let line = Line::from(vec![
            Span::styled("[p] Previous", hint(has_prev)),
            Span::raw("   "),
            Span::styled(format!("Page {}", state.page_number()), theme::heading()),
            Span::raw("   "),
            Span::styled("Next [n]", hint(has_next)),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_type_picker(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(30, 70, area);

        let mut items = vec![ListItem::new(Line::from(Span::styled(
            ALL_TYPES_LABEL,
            Style::default().fg(theme::TEXT),
        )))];
        items.extend(self.browser.types().iter().map(|t| {
            ListItem::new(Line::from(Span::styled(
                capitalize(&t.name),
                Style::default().fg(theme::type_color(&t.name)),
            )))
        }));

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Type ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::ACCENT)),
            )
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.type_cursor));

        frame.render_widget(Clear, modal);
        frame.render_stateful_widget(list, modal, &mut list_state);
    }
}
