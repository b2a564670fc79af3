use std::sync::Arc;

use crate::log_error;
use crate::storage::{KeyValueStore, load_json, save_json};

pub const BEST_SCORE_KEY: &str = "2048BestScore";

/// Best 2048 score, read from the store once and written whenever it is beaten.
pub struct BestScore<S: KeyValueStore> {
    store: Arc<S>,
    best: u32,
}

impl<S: KeyValueStore> BestScore<S> {
    pub fn load(store: Arc<S>) -> Self {
        let best = match load_json::<u32, _>(store.as_ref(), BEST_SCORE_KEY) {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                log_error!("Failed to load best score: {}", e);
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Returns whether `score` became the new best. A failed write keeps the
    /// in-memory best and is only logged.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = save_json(self.store.as_ref(), BEST_SCORE_KEY, &score) {
            log_error!("Failed to save best score {}: {}", score, e);
        }
        true
    }
}
