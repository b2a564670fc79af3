use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_GRID_SIZE: usize = 4;
pub const MAX_GRID_SIZE: usize = 6;
pub const DEFAULT_FLIP_DELAY_MS: u64 = 1000;
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 3000;
pub const TIMED_SECONDS_PER_CELL: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Classic,
    Timed,
    LimitedMoves,
    Progressive,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lifecycle {
    Idle,
    Playing,
    Paused,
    Won,
    Lost,
}

impl Lifecycle {
    pub fn is_finished(self) -> bool {
        matches!(self, Lifecycle::Won | Lifecycle::Lost)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub fn from_size(size: usize) -> Self {
        match size {
            4 => Difficulty::Easy,
            5 => Difficulty::Medium,
            6 => Difficulty::Hard,
            _ => Difficulty::Custom,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Custom => "custom",
        }
    }

    /// Board keys written by earlier releases of the game, which used
    /// Chinese labels under the same store key.
    pub fn legacy_label(self) -> Option<&'static str> {
        match self {
            Difficulty::Easy => Some("简单"),
            Difficulty::Medium => Some("中等"),
            Difficulty::Hard => Some("困难"),
            Difficulty::Custom => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Card {
    pub id: u32,
    pub icon: String,
    pub matched: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MemoryGameConfig {
    pub size: usize,
    pub icons: Vec<String>,
    pub mode: GameMode,
    pub flip_delay: Duration,
    pub advance_delay: Duration,
    pub time_limit: Option<u32>,
    pub move_limit: Option<u32>,
}

impl MemoryGameConfig {
    pub fn new(size: usize, icons: Vec<String>, mode: GameMode) -> Self {
        Self {
            size,
            icons,
            mode,
            flip_delay: Duration::from_millis(DEFAULT_FLIP_DELAY_MS),
            advance_delay: Duration::from_millis(DEFAULT_ADVANCE_DELAY_MS),
            time_limit: None,
            move_limit: None,
        }
    }

    fn cell_count(&self) -> u32 {
        (self.size * self.size) as u32
    }

    /// Seconds allowed in timed mode; `None` in every other mode.
    pub fn effective_time_limit(&self) -> Option<u32> {
        match self.mode {
            GameMode::Timed => Some(
                self.time_limit
                    .unwrap_or(self.cell_count() * TIMED_SECONDS_PER_CELL),
            ),
            _ => None,
        }
    }

    /// Attempts allowed in limited-moves mode; `None` in every other mode.
    pub fn effective_move_limit(&self) -> Option<u32> {
        match self.mode {
            GameMode::LimitedMoves => Some(self.move_limit.unwrap_or(self.cell_count() * 3 / 2)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerKind {
    ResolveFlip,
    AdvanceLevel,
}

/// Identifies a deferred callback and the round generation it belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerTicket {
    pub generation: u64,
    pub kind: TimerKind,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScheduledTimer {
    pub delay: Duration,
    pub ticket: TimerTicket,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryGameEndInfo {
    pub victory: bool,
    pub score: u32,
    pub attempts: u32,
    pub elapsed_seconds: u32,
    pub size: usize,
    pub mode: GameMode,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    RoundStarted { size: usize },
    CardFlipped { card_id: u32 },
    PairMatched { first: u32, second: u32 },
    PairMismatched { first: u32, second: u32 },
    RoundEnded { info: MemoryGameEndInfo },
    LevelAdvanced { size: usize },
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub size: usize,
    pub mode: GameMode,
    pub lifecycle: Lifecycle,
    pub cards: Vec<Card>,
    pub flipped_card_ids: Vec<u32>,
    pub matched_card_ids: Vec<u32>,
    pub attempts: u32,
    pub elapsed_seconds: u32,
    pub score: u32,
    pub processing: bool,
    pub time_limit: Option<u32>,
    pub move_limit: Option<u32>,
}
