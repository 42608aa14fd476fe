//! Binary crate for the `vane` terminal weather page.
//!
//! This crate focuses on:
//! - The view state machine and its message reducer
//! - Keyboard input and the query line editor
//! - Rendering the page and driving the event loop

use std::fs;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use vane_core::provider::openweather::OpenWeatherClient;
use vane_core::{Config, IpLocator, WeatherProvider};

mod app;
mod input;
mod state;
mod update;
mod view;

use crate::state::ViewState;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "vane", version, about = "Current weather in your terminal")]
struct Args {
    /// Place to show at startup instead of the configured default city.
    city: Option<String>,

    /// Skip the IP position lookup on startup.
    #[arg(long)]
    no_locate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging().context("Failed to set up logging")?;

    let mut config = Config::load()?;
    if !Config::config_file_path()?.exists() {
        // First run: write the defaults so there is a file to edit.
        config.save()?;
    }

    // The environment wins over the config file, but is never written back.
    if let Ok(key) = std::env::var("OPENWEATHER_API_KEY")
        && !key.is_empty()
    {
        config.api_key = Some(key);
    }

    let provider: Arc<dyn WeatherProvider> =
        Arc::new(OpenWeatherClient::new(config.api_key().to_string()));
    let locator = Arc::new(IpLocator::new());

    if args.no_locate {
        tracing::debug!("startup position lookup disabled");
    }

    let seed = args.city.unwrap_or(config.default_city);
    let mut state = ViewState::new(seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(&mut terminal, &mut state, provider, locator, !args.no_locate).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file in the data directory; writing to the terminal would
/// tear the alternate screen apart.
fn init_logging() -> Result<()> {
    let dir = Config::data_dir_path()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("vane.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
