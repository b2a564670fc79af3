use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 4;
pub const WINNING_TILE: u32 = 2048;
pub const INITIAL_TILES: usize = 2;
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub value: u32,
    pub merged_this_move: bool,
}

impl Tile {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            merged_this_move: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveResult {
    pub moved: bool,
    pub score_gained: u32,
    pub spawned: Option<SpawnedTile>,
}

impl MoveResult {
    pub fn unchanged() -> Self {
        Self {
            moved: false,
            score_gained: 0,
            spawned: None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub row: usize,
    pub col: usize,
    pub value: u32,
    pub merged_this_move: bool,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle2048Snapshot {
    pub tiles: Vec<TileView>,
    pub score: u32,
    pub best_score: u32,
    pub status: GameStatus,
    pub moves_made: u32,
}

impl Puzzle2048Snapshot {
    pub fn value_at(&self, row: usize, col: usize) -> u32 {
        self.tiles
            .iter()
            .find(|tile| tile.row == row && tile.col == col)
            .map_or(0, |tile| tile.value)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle2048GameEndInfo {
    pub won: bool,
    pub final_score: u32,
    pub highest_tile: u32,
    pub moves_made: u32,
}
