use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Difficulty, MemoryGameEndInfo};
use crate::log_error;
use crate::storage::{KeyValueStore, load_json, save_json};

pub const LEADERBOARD_KEY: &str = "memoryGameLeaderboard";
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub score: u32,
    pub attempts: u32,
    /// Elapsed seconds.
    pub time: u32,
    /// RFC 3339, UTC.
    pub date: String,
    pub difficulty: String,
}

impl LeaderboardRecord {
    pub fn from_end_info(info: &MemoryGameEndInfo) -> Self {
        Self {
            score: info.score,
            attempts: info.attempts,
            time: info.elapsed_seconds,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            difficulty: Difficulty::from_size(info.size).label().to_string(),
        }
    }
}

type Boards = BTreeMap<String, Vec<LeaderboardRecord>>;

/// Per-difficulty top scores, stored as one JSON map under [`LEADERBOARD_KEY`].
pub struct Leaderboard<S: KeyValueStore> {
    store: Arc<S>,
    boards: Boards,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Reads the stored map once. Unreadable data starts an empty leaderboard.
    pub fn load(store: Arc<S>) -> Self {
        let mut boards = match load_json::<Boards, _>(store.as_ref(), LEADERBOARD_KEY) {
            Ok(boards) => boards.unwrap_or_default(),
            Err(e) => {
                log_error!("Failed to load leaderboard: {}", e);
                Boards::new()
            }
        };
        migrate_legacy_labels(&mut boards);
        Self { store, boards }
    }

    pub fn entries(&self, difficulty: Difficulty) -> &[LeaderboardRecord] {
        self.boards
            .get(difficulty.label())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn record(&mut self, info: &MemoryGameEndInfo) -> LeaderboardRecord {
        let record = LeaderboardRecord::from_end_info(info);
        self.insert(record.clone());
        record
    }

    /// Keeps the best [`LEADERBOARD_SIZE`] of the record's difficulty. Equal
    /// scores keep their arrival order. Write failures are logged only.
    pub fn insert(&mut self, record: LeaderboardRecord) {
        let board = self.boards.entry(record.difficulty.clone()).or_default();
        board.push(record);
        rank(board);

        if let Err(e) = save_json(self.store.as_ref(), LEADERBOARD_KEY, &self.boards) {
            log_error!("Failed to save leaderboard: {}", e);
        }
    }
}

fn rank(board: &mut Vec<LeaderboardRecord>) {
    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(LEADERBOARD_SIZE);
}

/// Folds boards stored under legacy labels into the current ones. The
/// merged map is written back with the next recorded win.
fn migrate_legacy_labels(boards: &mut Boards) {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let Some(legacy) = difficulty.legacy_label() else {
            continue;
        };
        let Some(records) = boards.remove(legacy) else {
            continue;
        };
        let label = difficulty.label();
        let board = boards.entry(label.to_string()).or_default();
        board.extend(records.into_iter().map(|record| LeaderboardRecord {
            difficulty: label.to_string(),
            ..record
        }));
        rank(board);
    }
}
