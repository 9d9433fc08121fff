use color_eyre::{Result, eyre::eyre};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pong::terminal::{CrosstermConsole, TerminalSession, install_panic_hook};
use pong::{App, Config, Settings};

fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = Settings::from_env()?;
    init_tracing(&settings)?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(
        supports_keyboard_enhancement,
        frame_interval_ms = settings.frame_interval.as_millis() as u64,
        "starting pong"
    );

    // Restore before color-eyre prints a panic report
    install_panic_hook(supports_keyboard_enhancement);
    let mut session = TerminalSession::enter(CrosstermConsole, supports_keyboard_enhancement)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(Config::default(), settings, supports_keyboard_enhancement)
        .run(&mut terminal);

    // Cleanup, then report the run error ahead of any restore error
    let restored = session.restore();
    result?;
    restored?;
    info!("terminal restored");

    Ok(())
}

/// Sends tracing output to the log file; the terminal belongs to the game
fn init_tracing(settings: &Settings) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&settings.log_file)?;

    let env_filter = EnvFilter::try_new(&settings.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!(err))
}
