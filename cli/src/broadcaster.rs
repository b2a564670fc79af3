use std::fmt::Write;

use arcade_core::games::memory::MemorySnapshot;
use arcade_core::games::puzzle2048::{BOARD_SIZE, Puzzle2048Snapshot};
use arcade_core::games::{GameBroadcaster, GameOverSummary, GameSnapshot};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Redraws the whole game on stdout after every state change.
#[derive(Clone, Default)]
pub struct TerminalBroadcaster;

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        print!("{}{}", CLEAR_SCREEN, render_snapshot(&snapshot));
    }

    async fn broadcast_game_over(&self, summary: GameOverSummary) {
        println!("{}", render_game_over(&summary));
    }
}

pub fn render_snapshot(snapshot: &GameSnapshot) -> String {
    match snapshot {
        GameSnapshot::Puzzle2048(snapshot) => render_puzzle(snapshot),
        GameSnapshot::Memory(snapshot) => render_memory(snapshot),
    }
}

fn render_puzzle(snapshot: &Puzzle2048Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Score: {}  Best: {}  Moves: {}  [{:?}]",
        snapshot.score, snapshot.best_score, snapshot.moves_made, snapshot.status
    );
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            match snapshot.value_at(row, col) {
                0 => out.push_str("     ."),
                value => {
                    let _ = write!(out, "{:>6}", value);
                }
            }
        }
        out.push('\n');
    }
    out
}

fn render_memory(snapshot: &MemorySnapshot) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{}x{} {:?}  [{:?}]  Attempts: {}  Time: {}s  Score: {}",
        snapshot.size,
        snapshot.size,
        snapshot.mode,
        snapshot.lifecycle,
        snapshot.attempts,
        snapshot.elapsed_seconds,
        snapshot.score
    );
    if let Some(limit) = snapshot.time_limit {
        let _ = write!(out, "  Left: {}s", limit.saturating_sub(snapshot.elapsed_seconds));
    }
    if let Some(limit) = snapshot.move_limit {
        let _ = write!(out, "  Moves left: {}", limit.saturating_sub(snapshot.attempts));
    }
    out.push('\n');

    for row in 0..snapshot.size {
        for col in 0..snapshot.size {
            let index = row * snapshot.size + col;
            match snapshot.cards.get(index) {
                Some(card) if card.matched || snapshot.flipped_card_ids.contains(&card.id) => {
                    let _ = write!(out, "  {:>3}", card.icon);
                }
                Some(card) => {
                    let _ = write!(out, " [{:>2}]", card.id);
                }
                None => out.push_str("     "),
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_game_over(summary: &GameOverSummary) -> String {
    match summary {
        GameOverSummary::Puzzle2048(info) => format!(
            "{} Final score {} with highest tile {} in {} moves.",
            if info.won { "You reached 2048!" } else { "No moves left." },
            info.final_score,
            info.highest_tile,
            info.moves_made
        ),
        GameOverSummary::Memory(info) => format!(
            "{} Score {} after {} attempts in {}s.",
            if info.victory { "All pairs found!" } else { "Round lost." },
            info.score,
            info.attempts,
            info.elapsed_seconds
        ),
    }
}
