#![deny(dead_code)]
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

mod ui;
mod utils;

use crate::ui::App;
use day_night::config::{self, Settings};

/// Command line arguments for day-night
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "day-night: a terminal mock messenger with scripted replies.",
    long_about = "day-night shows a fixed contact list; opening a contact starts a local chat \
    where every message you send gets a scripted reply half a second later.\n\n\
    Nothing is sent over the network and chats are forgotten when you leave them."
)]
struct Args {
    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings: Settings = config::load_settings(args.config.as_deref())?
        .with_overrides(args.log_level, args.log_file);

    utils::setup_logging(&settings.log_file, settings.level_filter()?)?;
    info!("day-night starting up");
    info!("System information: {} {}", std::env::consts::OS, std::env::consts::ARCH);
    info!("Logging to file: {}", settings.log_file.display());

    let mut terminal = ui::setup_terminal()?;
    let mut app = App::new();

    let result = run_main_loop(
        &mut app,
        &mut terminal,
        Duration::from_millis(settings.tick_rate_ms),
    )
    .await;

    // Restore the terminal even if the loop failed
    ui::restore_terminal(terminal)?;

    if let Err(e) = &result {
        error!("Main loop exited with error: {}", e);
    }
    info!("day-night shutting down");
    result
}

/// Run the main event loop
async fn run_main_loop(
    app: &mut App,
    terminal: &mut ui::Terminal<ui::CrosstermBackend<io::Stdout>>,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        app.handle_input(tick_rate)?;

        // Pick up replies whose timers fired while we were waiting for input
        app.tick();

        if app.should_quit() {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
