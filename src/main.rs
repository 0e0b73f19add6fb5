use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use listing_search::config::AppConfig;
use listing_search::core::search::Route;
use listing_search::tui::app::AppState;
use listing_search::tui::events::AppEvent;
use listing_search::tui::services::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load();
    let config = loaded.config.clone();

    // Initialize logging, then report how config loading went
    let _log_guard = listing_search::core::logging::init_tui(&config.log_dir());
    log::info!("listing-search v{} starting", listing_search::VERSION);
    loaded.report();

    // Optional start location, e.g. `/search-results?q=lamp&sort=newest`
    let start = match std::env::args().nth(1) {
        Some(arg) => match Route::parse(&arg) {
            Some(route) => Some(route),
            None => {
                eprintln!("Error: not a listing-search location: {arg}");
                std::process::exit(2);
            }
        },
        None => None,
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx.clone())?;
    if let Some(route) = start {
        let _ = event_tx.send(AppEvent::Navigate(route));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let mut app = AppState::new(event_rx, services);
    let result = app.run(&mut terminal, config.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("TUI exited with error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("listing-search exiting");
    Ok(())
}
