mod best_score;
mod board;
mod game_state;
mod session;
mod types;

pub use best_score::{BEST_SCORE_KEY, BestScore};
pub use board::Board;
pub use game_state::Puzzle2048GameState;
pub use session::Puzzle2048Session;
pub use types::{
    BOARD_SIZE, Direction, GameStatus, MoveResult, Puzzle2048GameEndInfo, Puzzle2048Snapshot,
    SpawnedTile, Tile, TileView, WINNING_TILE,
};
