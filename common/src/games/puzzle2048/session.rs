use std::sync::Arc;

use tokio::sync::Mutex;

use super::best_score::BestScore;
use super::game_state::Puzzle2048GameState;
use super::types::{Direction, MoveResult, Puzzle2048Snapshot};
use crate::games::broadcaster::{GameBroadcaster, GameOverSummary, GameSnapshot};
use crate::games::session_rng::SessionRng;
use crate::log;
use crate::storage::KeyValueStore;

/// Async driver for one 2048 game. Every mutating call broadcasts a snapshot;
/// the game-over summary is broadcast once, on the move that ends the game.
pub struct Puzzle2048Session<S: KeyValueStore, B: GameBroadcaster> {
    game_state: Arc<Mutex<Puzzle2048GameState>>,
    rng: Arc<Mutex<SessionRng>>,
    best_score: Arc<Mutex<BestScore<S>>>,
    broadcaster: B,
}

impl<S: KeyValueStore, B: GameBroadcaster> Puzzle2048Session<S, B> {
    pub fn create(mut rng: SessionRng, store: Arc<S>, broadcaster: B) -> Self {
        let game_state = Puzzle2048GameState::new(&mut rng);
        log!("2048 session created with seed {}", rng.seed());

        Self {
            game_state: Arc::new(Mutex::new(game_state)),
            rng: Arc::new(Mutex::new(rng)),
            best_score: Arc::new(Mutex::new(BestScore::load(store))),
            broadcaster,
        }
    }

    pub async fn snapshot(&self) -> Puzzle2048Snapshot {
        let game_state = self.game_state.lock().await;
        let best = self.best_score.lock().await.best();
        game_state.snapshot(best)
    }

    pub async fn handle_move(&self, direction: Direction) -> MoveResult {
        let (result, snapshot, end_info) = {
            let mut game_state = self.game_state.lock().await;
            let mut rng = self.rng.lock().await;

            let result = game_state.apply_move(direction, &mut rng);
            if !result.moved {
                return result;
            }

            let mut best_score = self.best_score.lock().await;
            best_score.record(game_state.score());

            (
                result,
                game_state.snapshot(best_score.best()),
                game_state.end_info(),
            )
        };

        self.broadcaster
            .broadcast_state(GameSnapshot::Puzzle2048(snapshot))
            .await;

        if let Some(info) = end_info {
            log!(
                "2048 game over: won={} score={} highest={}",
                info.won,
                info.final_score,
                info.highest_tile
            );
            self.broadcaster
                .broadcast_game_over(GameOverSummary::Puzzle2048(info))
                .await;
        }

        result
    }

    pub async fn reset(&self) {
        {
            let mut game_state = self.game_state.lock().await;
            let mut rng = self.rng.lock().await;
            game_state.reset(&mut rng);
        }
        let snapshot = self.snapshot().await;
        self.broadcaster
            .broadcast_state(GameSnapshot::Puzzle2048(snapshot))
            .await;
    }
}
