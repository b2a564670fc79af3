mod deck;
mod game_state;
mod leaderboard;
mod score;
mod session;
mod themes;
mod types;

pub use deck::{DealError, deal, pair_count};
pub use game_state::MemoryGameState;
pub use leaderboard::{LEADERBOARD_KEY, LEADERBOARD_SIZE, Leaderboard, LeaderboardRecord};
pub use score::compute_score;
pub use session::{MemoryCommand, MemorySession, MemorySessionHandle};
pub use themes::IconTheme;
pub use types::{
    Card, DEFAULT_ADVANCE_DELAY_MS, DEFAULT_FLIP_DELAY_MS, Difficulty, GameEvent, GameMode,
    Lifecycle, MAX_GRID_SIZE, MIN_GRID_SIZE, MemoryGameConfig, MemoryGameEndInfo, MemorySnapshot,
    ScheduledTimer, TimerKind, TimerTicket,
};
