//! Section Swap - Terminal User Interface for trading class sections
//!
//! A Ratatui-based wizard that collects a student's details and asks the
//! matching service for someone holding the section they want.

mod api;
mod app;
mod config;
mod state;
mod ui;

use anyhow::Result;
use api::SwapClient;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to a file in the data directory; stderr would be drawn over by the UI
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "section_swap=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    let log_file = TuiConfig::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = TuiConfig::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable config: {e:#}");
        TuiConfig::default()
    });
    let client = SwapClient::new(config.resolve_api_url());
    tracing::info!(base_url = client.base_url(), "starting section swap");

    let mut app = App::new(Arc::new(client));
    app.start_health_probe();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("exiting after error: {err:#}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let terminal_height = terminal.size()?.height;

        let in_splash = app.in_splash();
        if in_splash {
            app.update_splash(terminal_height);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while animating or waiting on the service (16ms = ~60fps)
        let poll_duration = if in_splash || app.is_busy() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Background tasks only make progress while we yield
        tokio::task::yield_now().await;
        app.poll_background();

        if app.should_quit() {
            return Ok(());
        }
    }
}
