//! `HelpDesk`: terminal support inbox with live chat and an assistant panel.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/helpdesk/config.toml`).
//!
//! ```bash
//! # Built-in demo data
//! cargo run --bin helpdesk
//!
//! # Custom fixtures and a smaller page size
//! cargo run --bin helpdesk -- --fixtures ./fixtures.toml --page-size 5
//!
//! # Verbose logs
//! HELPDESK_LOG=debug cargo run --bin helpdesk
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;

use helpdesk::app::App;
use helpdesk::config::{CliArgs, ClientConfig};
use helpdesk::theme::{JsonThemeStore, MemoryThemeStore, ThemeContext, ThemeStore};
use helpdesk::ui;
use helpdesk_proto::fixture::FixtureSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("helpdesk starting");

    // Fixtures are validated before the terminal is taken over so errors
    // reach the user's shell.
    let fixtures = match config.fixtures.as_deref() {
        Some(path) => FixtureSet::load(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "invalid fixture file");
            io::Error::other(format!("invalid fixture file: {e}"))
        })?,
        None => FixtureSet::builtin(),
    };

    let theme = ThemeContext::load(theme_store(config.theme_file.as_deref()));

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let mut app = App::new(fixtures, theme, &config, Instant::now());
    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("helpdesk exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("helpdesk.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Pick the theme store: the configured file, the platform data directory,
/// or memory only when neither exists.
fn theme_store(configured: Option<&Path>) -> Box<dyn ThemeStore> {
    match configured
        .map(Path::to_path_buf)
        .or_else(JsonThemeStore::default_path)
    {
        Some(path) => {
            let store = JsonThemeStore::new(path);
            tracing::debug!(path = %store.path().display(), "theme preference file");
            Box::new(store)
        }
        None => {
            tracing::warn!("no data directory, theme preference will not persist");
            Box::new(MemoryThemeStore::new())
        }
    }
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &ClientConfig,
) -> io::Result<()> {
    loop {
        // Step 1: Size the feeds to the terminal and draw the frame.
        let rows = ui::message_rows(terminal.size()?.height);
        app.set_viewport_heights(rows, rows);
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Step 2: Fire due timers (pagination, replies, inbox loading).
        let now = Instant::now();
        app.tick(now);

        // Step 3: Poll for terminal input, waking early for the next deadline.
        let timeout = app
            .next_deadline()
            .map_or(config.poll_timeout, |deadline| {
                deadline.saturating_duration_since(now).min(config.poll_timeout)
            });
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key, Instant::now());
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
