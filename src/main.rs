use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::IntoDiagnostic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use pokedex_tui::config::AppConfig;
use pokedex_tui::core::logging;
use pokedex_tui::tui::app::AppState;
use pokedex_tui::tui::router::Route;
use pokedex_tui::tui::services::Services;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    let _log_guard = logging::init_tui();
    log::info!("{} v{} starting", pokedex_tui::NAME, pokedex_tui::VERSION);

    let config = AppConfig::load();
    let tick_rate = config.tick_rate();
    let mouse_enabled = config.tui.mouse_enabled;

    // Optional start path, e.g. `/pokemon/pikachu`
    let initial_route = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or_default();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(config, event_tx).into_diagnostic()?;
    let mut app = AppState::new(event_rx, services, initial_route);

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    if mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    // Run the app
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    log::info!("Shutting down");
    result.into_diagnostic()
}
