mod audio;
mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pong_core::Config;

use crate::audio::SoundOut;
use crate::terminal::Terminal;

#[derive(Parser)]
#[command(name = "pong")]
#[command(about = "Pong in the terminal", long_about = None)]
struct Cli {
    /// TOML file overriding the default tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for ball serves
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound and music
    #[arg(long)]
    mute: bool,

    /// Log file path
    #[arg(long, default_value = "pong.log")]
    log: PathBuf,
}

/// Restore terminal state - called on panic
fn restore_terminal() {
    use crossterm::{
        cursor::Show,
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, Show);
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Logs go to a file; stdout belongs to the game
    init_logging(&cli.log)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::new(),
    };
    if let Some(fps) = cli.fps {
        config.fps = fps.max(1);
    }
    let seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    tracing::info!(seed, fps = config.fps, mute = cli.mute, "Starting pong");

    let sound = if cli.mute {
        SoundOut::muted()
    } else {
        SoundOut::open()
    };

    let mut platform = match Terminal::open(&config, sound) {
        Ok(platform) => platform,
        Err(err) => {
            restore_terminal();
            return Err(err).context("opening terminal");
        }
    };
    let result = pong_core::run(&mut platform, config, seed);
    drop(platform);

    if let Err(err) = &result {
        tracing::error!("Game stopped: {}", err);
    }
    result.context("running game")
}
