use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::catalog::models::capitalize;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::router::Route;
use super::services::Services;
use super::theme;
use super::views::catalog::CatalogState;
use super::views::detail::DetailState;
use super::views::intro::IntroState;

/// Ticks a notification stays on screen.
const NOTIFICATION_TTL_TICKS: u32 = 100;
const MAX_NOTIFICATIONS: usize = 3;

/// Which screen currently owns the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    List,
    Detail,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Intro => "Who's That Pokémon?",
            Screen::List => "Catalog",
            Screen::Detail => "Details",
        }
    }
}

pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Route shown once the intro game is left.
    route: Route,
    /// Intro game state (Some until the player enters the catalog).
    intro: Option<IntroState>,
    /// List view state (Some while the route is the list).
    catalog: Option<CatalogState>,
    /// Detail view state (Some while the route is a detail page).
    detail: Option<DetailState>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        initial_route: Route,
    ) -> Self {
        let intro = services
            .config
            .game
            .enabled
            .then(|| IntroState::new(&services));
        Self {
            running: true,
            route: initial_route,
            intro,
            catalog: None,
            detail: None,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.intro.is_some() {
            return Screen::Intro;
        }
        match self.route {
            Route::List => Screen::List,
            Route::Detail(_) => Screen::Detail,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Kick off the first load for whichever screen is showing.
    pub fn start(&mut self) {
        if let Some(intro) = self.intro.as_mut() {
            intro.start();
        } else {
            self.navigate(self.route.clone());
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.start();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Active view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the active view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        if let Some(intro) = self.intro.as_mut() {
            return intro.handle_input(event, &self.services);
        }
        match self.route {
            Route::List => self
                .catalog
                .as_mut()
                .is_some_and(|catalog| catalog.handle_input(event, &self.services)),
            Route::Detail(_) => self
                .detail
                .as_mut()
                .is_some_and(|detail| detail.handle_input(event, &self.services)),
        }
    }

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        // Global keybindings (always active when no modal/view consumes)
        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            // No modifiers
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::EnterCatalog => {
                if self.intro.take().is_some() {
                    log::info!("Leaving intro game for {}", self.route);
                    self.navigate(self.route.clone());
                }
            }
            Action::Navigate(route) => {
                // The game stays in front until it is left explicitly.
                if self.intro.is_some() {
                    self.route = route;
                    return;
                }
                self.navigate(route);
            }
        }
    }

    /// Show `route`, building a fresh view for it.
    fn navigate(&mut self, route: Route) {
        log::debug!("Navigate {} -> {}", self.route, route);
        match &route {
            Route::List => {
                let mut catalog = CatalogState::new(&self.services);
                catalog.start();
                self.catalog = Some(catalog);
                self.detail = None;
            }
            Route::Detail(name) => {
                let mut detail = DetailState::new(name.clone(), &self.services);
                detail.load(&self.services);
                self.detail = Some(detail);
                self.catalog = None;
            }
        }
        self.route = route;
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, poll async data.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        // Poll async view data
        if let Some(intro) = self.intro.as_mut() {
            intro.poll(&self.services);
        }
        if let Some(catalog) = self.catalog.as_mut() {
            catalog.poll(&self.services);
        }
        if let Some(detail) = self.detail.as_mut() {
            detail.poll();
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        self.render_header(frame, layout.header);
        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let context = match (self.screen(), &self.route) {
            (Screen::Intro, _) => "Guess the silhouette to warm up".to_string(),
            (Screen::Detail, Route::Detail(name)) => capitalize(name),
            _ => "Gotta catch 'em all".to_string(),
        };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme::PRIMARY_DARK));
        let title = Line::from(vec![
            Span::styled(" ◓ Pokédex ", theme::title()),
            Span::styled("│ ", theme::dim()),
            Span::styled(context, theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(vec![Line::raw(""), title]).block(block), area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        if let Some(intro) = &self.intro {
            intro.render(frame, area);
            return;
        }
        match self.route {
            Route::List => {
                if let Some(catalog) = &self.catalog {
                    catalog.render(frame, area);
                }
            }
            Route::Detail(_) => {
                if let Some(detail) = &self.detail {
                    detail.render(frame, area);
                }
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let screen = self.screen();
        let mut spans = vec![
            Span::styled(" POKÉDEX ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                screen.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
        ];

        let editing = self.catalog.as_ref().is_some_and(|c| c.is_editing());
        let hints: &[(&str, &str)] = match screen {
            Screen::Intro => &[("1-4", "guess"), ("n", "next"), ("Enter", "pokédex")],
            Screen::List if editing => &[("Enter", "lookup"), ("Esc", "done"), ("Ctrl+U", "clear")],
            Screen::List => &[
                ("/", "search"),
                ("t", "type"),
                ("n/p", "page"),
                ("Enter", "open"),
            ],
            Screen::Detail => &[("Esc", "back")],
        };
        for (key, desc) in hints {
            spans.push(Span::styled(*key, theme::key_hint()));
            spans.push(Span::raw(format!(":{desc} ")));
        }
        spans.push(Span::styled("?", theme::key_hint()));
        spans.push(Span::raw(":help "));
        spans.push(Span::styled("q", theme::key_hint()));
        spans.push(Span::raw(":quit"));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit application"),
            ("?", "Toggle this help"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Who's That Pokémon?:", ""),
            ("1-4", "Guess an option"),
            ("j/k + Enter", "Move and guess"),
            ("n", "Play next round"),
            ("Enter / c", "Enter the Pokédex"),
            ("", ""),
            ("Catalog:", ""),
            ("arrows / hjkl", "Move selection"),
            ("Enter", "Open details"),
            ("/", "Edit search (Enter looks up by name)"),
            ("Esc", "Leave search"),
            ("Ctrl+U", "Clear search"),
            ("t", "Pick a type"),
            ("n / p", "Next / previous page"),
            ("g", "Search the global database"),
            ("r", "Try again after an error"),
            ("", ""),
            ("Details:", ""),
            ("Esc / b / Backspace", "Back to the list"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint()),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
