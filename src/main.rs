use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use predex::config::AppConfig;
use predex::tui::app::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (file-only; the TUI owns the terminal)
    let _log_guard = predex::core::logging::init_tui();
    log::info!("predex v{} starting", predex::VERSION);

    let config = AppConfig::load();
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let mut app = AppState::new(&config);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("event loop failed")?;
    log::info!("predex exiting");
    Ok(())
}
