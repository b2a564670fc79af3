mod broadcaster;
mod session_rng;

pub mod memory;
pub mod puzzle2048;

pub use broadcaster::{GameBroadcaster, GameOverSummary, GameSnapshot};
pub use session_rng::SessionRng;
