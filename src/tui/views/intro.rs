//! "Who's That Pokémon?" screen shown before the catalog.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::catalog::models::capitalize;
use crate::core::game::{GameController, GameEvent, GamePhase, OPTION_COUNT};
use crate::tui::app::centered_rect;
use crate::tui::events::Action;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::type_badges;

pub struct IntroState {
    game: GameController,
    /// Highlighted option while playing.
    selected: usize,
}

impl IntroState {
    pub fn new(services: &Services) -> Self {
        Self {
            game: GameController::new(services.catalog.clone(), services.config.game.clone()),
            selected: 0,
        }
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Start loading the first round.
    pub fn start(&mut self) {
        self.game.load_round();
    }

    /// Poll for a finished round load. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        match self.game.poll() {
            Some(GameEvent::RoundReady) => self.selected = 0,
            Some(GameEvent::Skipped) => services.dispatch(Action::EnterCatalog),
            None => {}
        }
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

        match self.game.phase() {
            GamePhase::Playing => self.handle_playing_input(*code),
            GamePhase::Revealed { .. } => self.handle_revealed_input(*code, services),
            GamePhase::Loading | GamePhase::Exited => false,
        }
    }

    fn handle_playing_input(&mut self, code: KeyCode) -> bool {
        let option_count = self
            .game
            .round()
            .map_or(0, |round| round.options.len());
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < option_count {
                    self.selected = index;
                    self.guess_selected();
                }
                true
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('l') | KeyCode::Right => {
                if option_count > 0 {
                    self.selected = (self.selected + 1) % option_count;
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('h') | KeyCode::Left => {
                if option_count > 0 {
                    self.selected = (self.selected + option_count - 1) % option_count;
                }
                true
            }
            KeyCode::Enter => {
                self.guess_selected();
                true
            }
            _ => false,
        }
    }

    fn handle_revealed_input(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char('n') => {
                self.game.handle_next_round();
                true
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                self.game.enter_catalog();
                services.dispatch(Action::EnterCatalog);
                true
            }
            _ => false,
        }
    }

    fn guess_selected(&mut self) {
        let Some(guess) = self
            .game
            .round()
            .and_then(|round| round.options.get(self.selected))
            .cloned()
        else {
            return;
        };
        self.game.handle_guess(&guess);
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.game.phase() == GamePhase::Loading && self.game.round_number() == 1 {
            self.render_first_load(frame, area);
            return;
        }

        let panel = centered_rect(60, 90, area);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::PRIMARY))
            .title(Span::styled(" WHO'S THAT POKÉMON? ", theme::title()))
            .title_top(
                Line::from(Span::styled(
                    format!(" ★ {} pts ", self.game.score()),
                    theme::title(),
                ))
                .right_aligned(),
            )
            .title_bottom(
                Line::from(Span::styled(
                    format!(" Round {} ", self.game.round_number()),
                    theme::muted(),
                ))
                .centered(),
            );
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let rows = Layout::vertical([
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(inner);

        self.render_mystery(frame, rows[0]);
        self.render_feedback(frame, rows[1]);
        match self.game.phase() {
            GamePhase::Revealed { .. } => self.render_reveal_actions(frame, rows[2]),
            _ => self.render_options(frame, rows[2]),
        }
    }

    fn render_first_load(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "LOADING GAME...",
                Style::default()
                    .fg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let y = area.y + area.height / 2;
        let band = Rect::new(area.x, y.saturating_sub(1), area.width, 2.min(area.height));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), band);
    }

    fn render_mystery(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::raw("")];
        match (self.game.phase(), self.game.round()) {
            (GamePhase::Revealed { .. }, Some(round)) => {
                lines.push(Line::from(Span::styled(
                    capitalize(&round.answer.name),
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(type_badges(round.answer.type_names())));
                if let Some(url) = round.answer.artwork_url() {
                    lines.push(Line::raw(""));
                    lines.push(Line::from(Span::styled(url.to_string(), theme::dim())));
                }
            }
            (GamePhase::Loading, _) => {
                lines.push(Line::from(Span::styled("Loading next round...", theme::muted())));
            }
            _ => {
                lines.push(Line::from(Span::styled(
                    "\u{2588}\u{2588}\u{2588}  ?  \u{2588}\u{2588}\u{2588}",
                    theme::dim(),
                )));
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled(
                    "A silhouette appears...",
                    theme::muted(),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_feedback(&self, frame: &mut Frame, area: Rect) {
        let (GamePhase::Revealed { correct }, Some(round)) = (self.game.phase(), self.game.round())
        else {
            return;
        };
        let (text, color) = if correct {
            ("It's correct!".to_string(), theme::SUCCESS)
        } else {
            (
                format!("Oh no! It's {}!", capitalize(&round.answer.name)),
                theme::ERROR,
            )
        };
        let line = Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_options(&self, frame: &mut Frame, area: Rect) {
        let Some(round) = self.game.round() else {
            return;
        };
        let playing = self.game.phase() == GamePhase::Playing;
        let mut lines: Vec<Line> = round
            .options
            .iter()
            .take(OPTION_COUNT)
            .enumerate()
            .map(|(i, option)| {
                let selected = playing && i == self.selected;
                let style = if selected {
                    Style::default()
                        .fg(theme::BG_BASE)
                        .bg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), theme::key_hint()),
                    Span::styled(format!(" {:<18}", capitalize(option)), style),
                ])
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("1-4", theme::key_hint()),
            Span::raw(":guess "),
            Span::styled("j/k", theme::key_hint()),
            Span::raw(":move "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":pick"),
        ]));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_reveal_actions(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    " n ",
                    Style::default()
                        .fg(theme::BG_BASE)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Play Next Round", Style::default().fg(theme::TEXT)),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(theme::BG_BASE)
                        .bg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Enter Pokédex", Style::default().fg(theme::TEXT)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
