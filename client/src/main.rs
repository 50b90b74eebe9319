use std::{
    fs::File,
    io::stdout,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context};
use clap::Parser;
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use display::{arena_for_size, TerminalInput, TerminalSurface};
use engine::{
    game::{Ending, Game},
    input::KeyBindings,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod display;

/// Two-player light cycles. Player one turns with z/x, player two with ,/.
#[derive(Parser)]
struct Cli {
    /// Write logs to this file, filtered by RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    match play()? {
        Ending::Quit => info!("game abandoned"),
        Ending::Finished(outcome) => println!("{outcome}"),
    }
    Ok(())
}

/// Runs one game on the whole terminal. The terminal is restored before this
/// returns, whatever the result.
fn play() -> anyhow::Result<Ending> {
    let (columns, rows) = terminal::size().context("failed to read the terminal size")?;
    let arena = arena_for_size(columns, rows)
        .with_context(|| format!("a {columns}x{rows} terminal is too small to play on"))?;
    let _guard = TerminalGuard::enter()?;
    let surface = TerminalSurface::new(stdout(), columns, rows);
    let mut game = Game::new(surface, TerminalInput, arena, KeyBindings::default())?;
    Ok(game.run()?)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install logger: {err}"))
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        let guard = TerminalGuard;
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .context("failed to enter the alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}
