use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use golf_rs::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::sync::Mutex;
use std::time::Duration;

const LOG_FILE_ENV: &str = "GOLF_LOG_FILE";
const SEED_ENV: &str = "GOLF_SEED";

/// Log to the file named by `GOLF_LOG_FILE`, if set. The terminal belongs to
/// the TUI, so without a file nothing is logged.
fn init_logging() -> io::Result<()> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("golf_rs=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)
}

fn seed_from_env() -> io::Result<Option<u64>> {
    match std::env::var(SEED_ENV) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("{SEED_ENV}={raw}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "golf-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            golf_rs::VERSION
        );
        return Ok(());
    }
    init_logging()?;
    let seed = seed_from_env()?;
    let mut app = AppState::new(seed).map_err(io::Error::other)?;
    tracing::info!(?seed, version = golf_rs::VERSION, "starting TUI");

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
