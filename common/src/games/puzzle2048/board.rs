use super::types::{BOARD_SIZE, Direction, FOUR_TILE_PROBABILITY, SpawnedTile, Tile, TileView};
use crate::games::session_rng::SessionRng;

type Line = [Option<Tile>; BOARD_SIZE];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SlideOutcome {
    pub moved: bool,
    pub score_gained: u32,
}

/// Fixed 4x4 grid, row-major; `None` is an empty cell.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `0` marks an empty cell.
    pub fn from_values(values: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, row_values) in values.iter().enumerate() {
            for (col, &value) in row_values.iter().enumerate() {
                if value != 0 {
                    board.cells[row][col] = Some(Tile::new(value));
                }
            }
        }
        board
    }

    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        let mut values = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, row_cells) in self.cells.iter().enumerate() {
            for (col, cell) in row_cells.iter().enumerate() {
                values[row][col] = cell.map_or(0, |tile| tile.value);
            }
        }
        values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, row_cells)| {
            row_cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|tile| TileView {
                    row,
                    col,
                    value: tile.value,
                    merged_this_move: tile.merged_this_move,
                })
            })
        })
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.cells[row][col].is_none() {
                    empty.push((row, col));
                }
            }
        }
        empty
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn has_tile_at_least(&self, value: u32) -> bool {
        self.tiles().any(|tile| tile.value >= value)
    }

    pub fn highest_tile(&self) -> u32 {
        self.tiles().map(|tile| tile.value).max().unwrap_or(0)
    }

    pub fn tile_sum(&self) -> u32 {
        self.tiles().map(|tile| tile.value).sum()
    }

    pub fn has_adjacent_equal(&self) -> bool {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let Some(tile) = self.cells[row][col] else {
                    continue;
                };
                if col + 1 < BOARD_SIZE
                    && self.cells[row][col + 1].is_some_and(|right| right.value == tile.value)
                {
                    return true;
                }
                if row + 1 < BOARD_SIZE
                    && self.cells[row + 1][col].is_some_and(|below| below.value == tile.value)
                {
                    return true;
                }
            }
        }
        false
    }

    /// No-op when the board is full.
    pub fn spawn_random_tile(&mut self, rng: &mut SessionRng) -> Option<SpawnedTile> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.random_range(0..empty.len())];
        let value = if rng.random_bool(FOUR_TILE_PROBABILITY) { 4 } else { 2 };
        self.cells[row][col] = Some(Tile::new(value));

        Some(SpawnedTile { row, col, value })
    }

    pub fn slide(&mut self, direction: Direction) -> SlideOutcome {
        let before = self.values();
        let mut score_gained = 0;

        for tile in self.cells.iter_mut().flatten().flatten() {
            tile.merged_this_move = false;
        }

        for index in 0..BOARD_SIZE {
            let positions = line_positions(direction, index);
            let line: Line = positions.map(|(row, col)| self.cells[row][col]);
            let (merged, score) = slide_line(line);
            score_gained += score;
            for ((row, col), cell) in positions.into_iter().zip(merged) {
                self.cells[row][col] = cell;
            }
        }

        SlideOutcome {
            moved: self.values() != before,
            score_gained,
        }
    }
}

/// Cells of one row or column, ordered from the edge the tiles move toward.
fn line_positions(direction: Direction, index: usize) -> [(usize, usize); BOARD_SIZE] {
    std::array::from_fn(|i| match direction {
        Direction::Left => (index, i),
        Direction::Right => (index, BOARD_SIZE - 1 - i),
        Direction::Up => (i, index),
        Direction::Down => (BOARD_SIZE - 1 - i, index),
    })
}

fn slide_line(line: Line) -> (Line, u32) {
    let tiles: Vec<Tile> = line.iter().flatten().copied().collect();
    let mut result: Line = [None; BOARD_SIZE];
    let mut score = 0;
    let mut write = 0;
    let mut i = 0;

    while i < tiles.len() {
        let current = tiles[i];
        if let Some(&next) = tiles.get(i + 1)
            && can_merge(current, next)
        {
            let value = current.value * 2;
            result[write] = Some(Tile {
                value,
                merged_this_move: true,
            });
            score += value;
            i += 2;
        } else {
            result[write] = Some(current);
            i += 1;
        }
        write += 1;
    }

    (result, score)
}

fn can_merge(first: Tile, second: Tile) -> bool {
    first.value == second.value && !first.merged_this_move && !second.merged_this_move
}
