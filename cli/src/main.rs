mod broadcaster;
mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use arcade_core::config::{ArcadeConfig, ConfigManager};
use arcade_core::games::memory::{Difficulty, Leaderboard, MemoryGameState, MemorySession};
use arcade_core::games::puzzle2048::Puzzle2048Session;
use arcade_core::games::{GameBroadcaster, GameSnapshot, SessionRng};
use arcade_core::storage::FileKeyValueStore;
use arcade_core::{log, logger};
use broadcaster::TerminalBroadcaster;
use clap::{Parser, ValueEnum};
use commands::{
    MEMORY_HELP, MemoryInput, PUZZLE_HELP, PuzzleInput, parse_memory_input, parse_puzzle_input,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Clone, Copy, ValueEnum)]
enum GameKind {
    #[value(name = "2048")]
    Puzzle2048,
    Memory,
}

#[derive(Parser)]
#[command(name = "arcade")]
struct Args {
    #[arg(long, value_enum, default_value = "2048")]
    game: GameKind,

    /// YAML config; defaults apply when omitted or missing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the seed from the config file.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Writes the effective config (defaults filled in) to `--config` and exits.
    #[arg(long, requires = "config")]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arcade".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = match &args.config {
        Some(path) => {
            let manager: ConfigManager<_, ArcadeConfig> = ConfigManager::from_yaml_file(path);
            let config = manager.get_config()?;
            if args.write_config {
                manager.set_config(&config)?;
                log!("Config written to {}", path.display());
                return Ok(());
            }
            config
        }
        None => ArcadeConfig::default(),
    };

    let rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let store = Arc::new(FileKeyValueStore::new(&config.storage.directory));

    match args.game {
        GameKind::Puzzle2048 => run_puzzle(rng, store).await?,
        GameKind::Memory => run_memory(&config, rng, store).await?,
    }

    log!("Bye");
    Ok(())
}

async fn run_puzzle(
    rng: SessionRng,
    store: Arc<FileKeyValueStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let broadcaster = TerminalBroadcaster;
    let session = Puzzle2048Session::create(rng, store, broadcaster.clone());
    broadcaster
        .broadcast_state(GameSnapshot::Puzzle2048(session.snapshot().await))
        .await;
    println!("{}", PUZZLE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_puzzle_input(&line) {
            Some(PuzzleInput::Move(direction)) => {
                session.handle_move(direction).await;
            }
            Some(PuzzleInput::Reset) => session.reset().await,
            Some(PuzzleInput::Quit) => break,
            None => println!("{}", PUZZLE_HELP),
        }
    }

    Ok(())
}

async fn run_memory(
    config: &ArcadeConfig,
    mut rng: SessionRng,
    store: Arc<FileKeyValueStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let game_state = MemoryGameState::new(config.memory.to_game_config(), &mut rng)?;
    let broadcaster = TerminalBroadcaster;
    let handle = MemorySession::spawn(
        game_state,
        rng,
        Leaderboard::load(store),
        broadcaster.clone(),
    );
    if let Some(snapshot) = handle.snapshot().await {
        broadcaster
            .broadcast_state(GameSnapshot::Memory(snapshot))
            .await;
    }
    println!("{}", MEMORY_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_memory_input(&line) {
            Some(MemoryInput::Start) => {
                let finished = handle
                    .snapshot()
                    .await
                    .is_some_and(|snapshot| snapshot.lifecycle.is_finished());
                if finished {
                    println!("Round is over, use reset to deal again");
                } else {
                    handle.start();
                }
            }
            Some(MemoryInput::Flip(card_id)) => {
                handle.flip(card_id);
            }
            Some(MemoryInput::Pause) => {
                handle.pause();
            }
            Some(MemoryInput::Resume) => {
                handle.resume();
            }
            Some(MemoryInput::Reset(size)) => {
                let override_config = size.map(|size| {
                    let mut game_config = config.memory.to_game_config();
                    game_config.size = size;
                    game_config
                });
                handle.reset(override_config);
            }
            Some(MemoryInput::Scores) => {
                let Some(snapshot) = handle.snapshot().await else {
                    break;
                };
                let difficulty = Difficulty::from_size(snapshot.size);
                let entries = handle.leaderboard(difficulty).await.unwrap_or_default();
                println!("Top scores ({}):", difficulty.label());
                for (rank, entry) in entries.iter().enumerate() {
                    println!(
                        "{:>2}. {:>4}  {} attempts  {}s  {}",
                        rank + 1,
                        entry.score,
                        entry.attempts,
                        entry.time,
                        entry.date
                    );
                }
            }
            Some(MemoryInput::Quit) => break,
            None => println!("{}", MEMORY_HELP),
        }
    }

    handle.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_config_needs_config_path() {
        assert!(Args::try_parse_from(["arcade", "--write-config"]).is_err());

        let args =
            Args::try_parse_from(["arcade", "--config", "arcade.yaml", "--write-config"]).unwrap();
        assert!(args.write_config);
        assert_eq!(args.config, Some(PathBuf::from("arcade.yaml")));
    }
}
