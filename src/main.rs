//! Line-oriented front end for the battle engine.
//!
//! Reads chat-style commands (`!explore`, `!attack`, ...) from stdin for a
//! single player and prints the replies. Chat hosts embed the library
//! instead and call `GameService::execute` per incoming message.
use anyhow::{Context, Result};
use battlebot::commands::GameService;
use battlebot::core::{GameConfig, GameError};
use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "battlebot")]
#[command(about = "Turn-based RPG battles driven by chat commands")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "battlebot.toml")]
    config: PathBuf,

    /// Directory for player save files (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Player identifier commands are issued as
    #[arg(short, long, default_value = "local")]
    player: String,

    /// Create a character with this name if the player has none
    #[arg(short, long)]
    name: Option<String>,

    /// Seed for reproducible battles
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = GameConfig::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.save_dir = dir;
    }

    let mut service = GameService::open(config).context("failed to open save directory")?;
    if let Some(seed) = cli.seed {
        service = service.with_seed(seed);
    }
    info!("battlebot v{} ready for player {}", env!("CARGO_PKG_VERSION"), cli.player);

    if let Some(name) = cli.name {
        match service.create_character(&cli.player, &name) {
            Ok(player) => println!("Character {} created!", player.name),
            Err(GameError::InvalidState(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    println!("Type `!help` for commands, `quit` to exit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "!quit") {
            break;
        }
        let outcome = service.execute_line(&cli.player, line);
        writeln!(stdout, "{}\n", outcome.message)?;
        stdout.flush()?;
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
