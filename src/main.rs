//! Onboard TUI - institutional KYC onboarding in the terminal
//!
//! A Ratatui-based wizard that walks an institution through registration,
//! company details, address, key parties and documents, then submits the
//! application to the KYC endpoint.

mod app;
mod config;
mod i18n;
mod platform;
mod state;
mod store;
mod submission;
mod ui;

use anyhow::Result;
use app::App;
use config::OnboardConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Event poll interval; also how often a finished submission is picked up
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging. The terminal belongs to the UI, so logs go to a file.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onboard_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = OnboardConfig::load()?;
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;
    app.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("{err:#}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Append to `onboard-tui.log` in the data directory, or discard logs when
/// no data directory is available
fn log_writer() -> BoxMakeWriter {
    let file = OnboardConfig::log_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("onboard-tui.log"))
            .ok()
    });
    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        app.terminal_size = Some((term_size.height, term_size.width));

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.request_quit();
                    } else {
                        app.handle_key(key)?;
                    }
                }
            }
        }

        app.poll_submission();

        // Give the submission task a turn on the runtime
        tokio::task::yield_now().await;

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
