use std::future::Future;

use serde::Serialize;

use super::memory::{MemoryGameEndInfo, MemorySnapshot};
use super::puzzle2048::{Puzzle2048GameEndInfo, Puzzle2048Snapshot};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum GameSnapshot {
    Puzzle2048(Puzzle2048Snapshot),
    Memory(MemorySnapshot),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum GameOverSummary {
    Puzzle2048(Puzzle2048GameEndInfo),
    Memory(MemoryGameEndInfo),
}

/// Presentation side of a session: receives a snapshot after every state change.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}

#[cfg(test)]
pub(crate) use recording::RecordingBroadcaster;
