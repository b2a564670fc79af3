use super::board::Board;
use super::types::{
    BOARD_SIZE, Direction, GameStatus, INITIAL_TILES, MoveResult, Puzzle2048GameEndInfo,
    Puzzle2048Snapshot, WINNING_TILE,
};
use crate::games::session_rng::SessionRng;

pub struct Puzzle2048GameState {
    board: Board,
    score: u32,
    status: GameStatus,
    moves_made: u32,
}

impl Puzzle2048GameState {
    pub fn new(rng: &mut SessionRng) -> Self {
        let mut state = Self {
            board: Board::empty(),
            score: 0,
            status: GameStatus::Playing,
            moves_made: 0,
        };
        state.reset(rng);
        state
    }

    /// Builds a game around an existing position; `0` marks an empty cell.
    pub fn from_values(values: [[u32; BOARD_SIZE]; BOARD_SIZE], score: u32) -> Self {
        let board = Board::from_values(values);
        let status = evaluate_status(&board);
        Self {
            board,
            score,
            status,
            moves_made: 0,
        }
    }

    pub fn reset(&mut self, rng: &mut SessionRng) {
        self.board = Board::empty();
        for _ in 0..INITIAL_TILES {
            self.board.spawn_random_tile(rng);
        }
        self.score = 0;
        self.status = GameStatus::Playing;
        self.moves_made = 0;
    }

    /// Rejected once the game is over. A move that changes nothing spawns nothing.
    pub fn apply_move(&mut self, direction: Direction, rng: &mut SessionRng) -> MoveResult {
        if self.status != GameStatus::Playing {
            return MoveResult::unchanged();
        }

        let outcome = self.board.slide(direction);
        if !outcome.moved {
            return MoveResult::unchanged();
        }

        self.score += outcome.score_gained;
        self.moves_made += 1;
        let spawned = self.board.spawn_random_tile(rng);
        self.status = evaluate_status(&self.board);

        MoveResult {
            moved: true,
            score_gained: outcome.score_gained,
            spawned,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn highest_tile(&self) -> u32 {
        self.board.highest_tile()
    }

    pub fn end_info(&self) -> Option<Puzzle2048GameEndInfo> {
        if self.status == GameStatus::Playing {
            return None;
        }
        Some(Puzzle2048GameEndInfo {
            won: self.status == GameStatus::Won,
            final_score: self.score,
            highest_tile: self.highest_tile(),
            moves_made: self.moves_made,
        })
    }

    pub fn snapshot(&self, best_score: u32) -> Puzzle2048Snapshot {
        Puzzle2048Snapshot {
            tiles: self.board.tiles().collect(),
            score: self.score,
            best_score,
            status: self.status,
            moves_made: self.moves_made,
        }
    }
}

fn evaluate_status(board: &Board) -> GameStatus {
    if board.has_tile_at_least(WINNING_TILE) {
        GameStatus::Won
    } else if board.is_full() && !board.has_adjacent_equal() {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    fn single_pair_board() -> [[u32; 4]; 4] {
        [
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]
    }

    #[test]
    fn test_new_has_two_tiles() {
        let mut rng = SessionRng::new(42);
        let state = Puzzle2048GameState::new(&mut rng);
        assert_eq!(state.board().tiles().count(), 2);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_apply_move_left_merges_and_scores() {
        let mut rng = SessionRng::new(42);
        let mut state = Puzzle2048GameState::from_values(single_pair_board(), 0);

        let result = state.apply_move(Direction::Left, &mut rng);

        assert!(result.moved);
        assert_eq!(result.score_gained, 4);
        assert_eq!(state.score(), 4);
        assert_eq!(state.board().get(0, 0).unwrap().value, 4);
        assert_eq!(state.moves_made(), 1);
    }

    #[test]
    fn test_full_row_merges_pairwise() {
        let mut rng = SessionRng::new(42);
        #[rustfmt::skip]
        let mut state = Puzzle2048GameState::from_values([
            [2, 2, 2, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ], 0);

        state.apply_move(Direction::Left, &mut rng);

        assert_eq!(state.board().get(0, 0).unwrap().value, 4);
        assert_eq!(state.board().get(0, 1).unwrap().value, 4);
        assert_eq!(state.score(), 8);
    }

    #[test]
    fn test_move_spawns_exactly_one_tile() {
        let mut rng = SessionRng::new(42);
        let mut state = Puzzle2048GameState::from_values(single_pair_board(), 0);
        let sum_before = state.board().tile_sum();

        let result = state.apply_move(Direction::Left, &mut rng);

        let spawned = result.spawned.unwrap();
        assert_eq!(state.board().tiles().count(), 2);
        assert_eq!(state.board().tile_sum(), sum_before + spawned.value);
    }

    #[test]
    fn test_unchanged_move_does_not_spawn() {
        let mut rng = SessionRng::new(42);
        #[rustfmt::skip]
        let mut state = Puzzle2048GameState::from_values([
            [2, 0, 0, 0],
            [4, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ], 0);

        let result = state.apply_move(Direction::Left, &mut rng);

        assert_eq!(result, MoveResult::unchanged());
        assert_eq!(state.board().tiles().count(), 2);
        assert_eq!(state.moves_made(), 0);
    }

    #[test]
    fn test_won_when_2048_reached() {
        let mut rng = SessionRng::new(42);
        #[rustfmt::skip]
        let mut state = Puzzle2048GameState::from_values([
            [1024, 1024, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ], 0);

        state.apply_move(Direction::Left, &mut rng);

        assert_eq!(state.status(), GameStatus::Won);
        assert!(state.end_info().unwrap().won);
    }

    #[test]
    fn test_win_takes_precedence_over_loss() {
        #[rustfmt::skip]
        let state = Puzzle2048GameState::from_values([
            [2048, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ], 0);
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_full_board_without_pairs_is_lost() {
        #[rustfmt::skip]
        let state = Puzzle2048GameState::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ], 0);
        assert_eq!(state.status(), GameStatus::Lost);
        assert!(!state.end_info().unwrap().won);
    }

    #[test]
    fn test_full_board_with_pair_keeps_playing() {
        #[rustfmt::skip]
        let state = Puzzle2048GameState::from_values([
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ], 0);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_move_into_dead_position_is_lost() {
        let mut rng = SessionRng::new(1);
        // Sliding right opens only (3, 0); a 2 or 4 there pairs with neither 64 nor 8.
        #[rustfmt::skip]
        let mut state = Puzzle2048GameState::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [64, 4, 2, 4],
            [8, 16, 32, 0],
        ], 0);

        let result = state.apply_move(Direction::Right, &mut rng);

        assert!(result.moved);
        assert_eq!(result.spawned.map(|s| (s.row, s.col)), Some((3, 0)));
        assert_eq!(state.status(), GameStatus::Lost);
    }

    #[test]
    fn test_moves_rejected_after_game_over() {
        let mut rng = SessionRng::new(42);
        #[rustfmt::skip]
        let mut state = Puzzle2048GameState::from_values([
            [2048, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ], 100);

        let before = state.board().values();
        let result = state.apply_move(Direction::Right, &mut rng);

        assert!(!result.moved);
        assert_eq!(state.board().values(), before);
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_score_never_decreases_over_random_play() {
        let mut rng = SessionRng::new(2024);
        let mut state = Puzzle2048GameState::new(&mut rng);
        let mut last_score = 0;
        let mut step = 0;

        while state.status() == GameStatus::Playing && step < 500 {
            let direction = Direction::ALL[step % 4];
            let sum_before = state.board().tile_sum();
            let result = state.apply_move(direction, &mut rng);
            if result.moved {
                let spawned = result.spawned.map_or(0, |s| s.value);
                assert_eq!(state.board().tile_sum(), sum_before + spawned);
            }
            assert!(state.score() >= last_score);
            last_score = state.score();
            step += 1;
        }
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut rng = SessionRng::new(42);
        let mut state = Puzzle2048GameState::from_values(single_pair_board(), 0);
        state.apply_move(Direction::Left, &mut rng);

        state.reset(&mut rng);

        assert_eq!(state.score(), 0);
        assert_eq!(state.moves_made(), 0);
        assert_eq!(state.board().tiles().count(), 2);
    }
}
