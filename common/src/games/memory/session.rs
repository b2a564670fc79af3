use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at, sleep_until};

use super::game_state::MemoryGameState;
use super::leaderboard::{Leaderboard, LeaderboardRecord};
use super::types::{
    Difficulty, GameEvent, Lifecycle, MemoryGameConfig, MemorySnapshot, TimerTicket,
};
use crate::games::broadcaster::{GameBroadcaster, GameOverSummary, GameSnapshot};
use crate::games::session_rng::SessionRng;
use crate::storage::KeyValueStore;
use crate::{log, log_error};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub enum MemoryCommand {
    Start,
    Flip(u32),
    Pause,
    Resume,
    Reset(Option<MemoryGameConfig>),
    Snapshot(oneshot::Sender<MemorySnapshot>),
    Leaderboard(Difficulty, oneshot::Sender<Vec<LeaderboardRecord>>),
}

/// Caller side of a running [`MemorySession`]. Sends return `false` once the
/// session task has stopped.
pub struct MemorySessionHandle {
    command_tx: mpsc::UnboundedSender<MemoryCommand>,
    task: JoinHandle<()>,
}

impl MemorySessionHandle {
    pub fn send(&self, command: MemoryCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    pub fn start(&self) -> bool {
        self.send(MemoryCommand::Start)
    }

    pub fn flip(&self, card_id: u32) -> bool {
        self.send(MemoryCommand::Flip(card_id))
    }

    pub fn pause(&self) -> bool {
        self.send(MemoryCommand::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send(MemoryCommand::Resume)
    }

    pub fn reset(&self, config: Option<MemoryGameConfig>) -> bool {
        self.send(MemoryCommand::Reset(config))
    }

    pub async fn snapshot(&self) -> Option<MemorySnapshot> {
        let (tx, rx) = oneshot::channel();
        if !self.send(MemoryCommand::Snapshot(tx)) {
            return None;
        }
        rx.await.ok()
    }

    pub async fn leaderboard(&self, difficulty: Difficulty) -> Option<Vec<LeaderboardRecord>> {
        let (tx, rx) = oneshot::channel();
        if !self.send(MemoryCommand::Leaderboard(difficulty, tx)) {
            return None;
        }
        rx.await.ok()
    }

    /// Closes the command channel and waits for the session task to finish.
    pub async fn shutdown(self) {
        let Self { command_tx, task } = self;
        drop(command_tx);
        if let Err(e) = task.await {
            log_error!("Memory session task failed: {}", e);
        }
    }
}

/// Owns one pairs game on a tokio task. Drives the per-second tick while
/// playing and fires the engine's deferred timers at their deadlines.
pub struct MemorySession<S: KeyValueStore, B: GameBroadcaster> {
    game_state: MemoryGameState,
    rng: SessionRng,
    leaderboard: Leaderboard<S>,
    broadcaster: B,
    timers: Vec<(Instant, TimerTicket)>,
}

impl<S: KeyValueStore + 'static, B: GameBroadcaster> MemorySession<S, B> {
    pub fn spawn(
        game_state: MemoryGameState,
        rng: SessionRng,
        leaderboard: Leaderboard<S>,
        broadcaster: B,
    ) -> MemorySessionHandle {
        log!(
            "Memory session created: {}x{} {:?}, seed {}",
            game_state.config().size,
            game_state.config().size,
            game_state.config().mode,
            rng.seed()
        );

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let session = Self {
            game_state,
            rng,
            leaderboard,
            broadcaster,
            timers: Vec::new(),
        };
        let task = tokio::spawn(session.run(command_rx));

        MemorySessionHandle { command_tx, task }
    }

    async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<MemoryCommand>) {
        let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let playing = self.is_playing();
            let next_deadline = self.timers.iter().map(|(deadline, _)| *deadline).min();

            tokio::select! {
                command = command_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    self.handle_command(command).await;
                }
                _ = ticker.tick(), if playing => {
                    if self.game_state.tick() {
                        self.publish().await;
                    }
                }
                _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                    self.fire_due_timers().await;
                }
            }

            // A fresh second starts whenever play (re)starts.
            if !playing && self.is_playing() {
                ticker.reset();
            }
        }

        log!("Memory session stopped");
    }

    fn is_playing(&self) -> bool {
        self.game_state.lifecycle() == Lifecycle::Playing
    }

    async fn handle_command(&mut self, command: MemoryCommand) {
        let changed = match command {
            MemoryCommand::Start => self.game_state.start(),
            MemoryCommand::Flip(card_id) => self.game_state.flip(card_id),
            MemoryCommand::Pause => self.game_state.pause(),
            MemoryCommand::Resume => self.game_state.resume(),
            MemoryCommand::Reset(config) => match self.game_state.reset(config, &mut self.rng) {
                Ok(()) => true,
                Err(e) => {
                    log_error!("Reset rejected: {}", e);
                    false
                }
            },
            MemoryCommand::Snapshot(reply) => {
                let _ = reply.send(self.game_state.snapshot());
                false
            }
            MemoryCommand::Leaderboard(difficulty, reply) => {
                let _ = reply.send(self.leaderboard.entries(difficulty).to_vec());
                false
            }
        };

        if changed {
            self.publish().await;
        }
    }

    async fn fire_due_timers(&mut self) {
        let now = Instant::now();
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|(deadline, _)| *deadline <= now);
        self.timers = pending;
        due.sort_by_key(|(deadline, _)| *deadline);

        let mut changed = false;
        for (_, ticket) in due {
            changed |= self.game_state.on_timer(ticket, &mut self.rng);
        }

        if changed {
            self.publish().await;
        }
    }

    /// Schedules new timers, drops superseded ones, handles round events and
    /// broadcasts the resulting snapshot.
    async fn publish(&mut self) {
        let now = Instant::now();
        for timer in self.game_state.take_timers() {
            self.timers.push((now + timer.delay, timer.ticket));
        }
        let generation = self.game_state.generation();
        self.timers
            .retain(|(_, ticket)| ticket.generation == generation);

        for event in self.game_state.take_events() {
            match event {
                GameEvent::RoundEnded { info } => {
                    log!(
                        "Memory round ended: victory={} score={} attempts={} elapsed={}s",
                        info.victory,
                        info.score,
                        info.attempts,
                        info.elapsed_seconds
                    );
                    if info.victory {
                        self.leaderboard.record(&info);
                    }
                    self.broadcaster
                        .broadcast_game_over(GameOverSummary::Memory(info))
                        .await;
                }
                GameEvent::LevelAdvanced { size } => {
                    log!("Memory level advanced to {}x{}", size, size);
                }
                _ => {}
            }
        }

        self.broadcaster
            .broadcast_state(GameSnapshot::Memory(self.game_state.snapshot()))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::games::broadcaster::RecordingBroadcaster;
    use crate::games::memory::{GameMode, IconTheme, LEADERBOARD_KEY};
    use crate::storage::InMemoryStore;
    use tokio::time::sleep;

    struct Fixture {
        handle: MemorySessionHandle,
        store: Arc<InMemoryStore>,
        broadcaster: RecordingBroadcaster,
    }

    fn spawn_session(config: MemoryGameConfig) -> Fixture {
        let mut rng = SessionRng::new(21);
        let game_state = MemoryGameState::new(config, &mut rng).unwrap();
        let store = Arc::new(InMemoryStore::new());
        let broadcaster = RecordingBroadcaster::default();
        let handle = MemorySession::spawn(
            game_state,
            rng,
            Leaderboard::load(store.clone()),
            broadcaster.clone(),
        );
        Fixture {
            handle,
            store,
            broadcaster,
        }
    }

    fn config(size: usize, mode: GameMode) -> MemoryGameConfig {
        let icons = IconTheme::Animals
            .icons()
            .iter()
            .map(|icon| icon.to_string())
            .collect();
        MemoryGameConfig::new(size, icons, mode)
    }

    fn pairs(snapshot: &MemorySnapshot) -> Vec<(u32, u32)> {
        let mut by_icon: HashMap<&str, Vec<u32>> = HashMap::new();
        for card in &snapshot.cards {
            by_icon.entry(card.icon.as_str()).or_default().push(card.id);
        }
        by_icon.values().map(|ids| (ids[0], ids[1])).collect()
    }

    async fn started_snapshot(handle: &MemorySessionHandle) -> MemorySnapshot {
        handle.start();
        handle.snapshot().await.unwrap()
    }

    async fn play_all_pairs(handle: &MemorySessionHandle, snapshot: &MemorySnapshot) {
        for (a, b) in pairs(snapshot) {
            handle.flip(a);
            handle.flip(b);
            sleep(Duration::from_millis(1100)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pair_resolves_after_flip_delay() {
        let fixture = spawn_session(config(4, GameMode::Classic));
        let snapshot = started_snapshot(&fixture.handle).await;
        let (a, b) = pairs(&snapshot)[0];

        fixture.handle.flip(a);
        fixture.handle.flip(b);
        sleep(Duration::from_millis(999)).await;

        let pending = fixture.handle.snapshot().await.unwrap();
        assert!(pending.processing);
        assert_eq!(pending.flipped_card_ids, vec![a, b]);

        sleep(Duration::from_millis(2)).await;

        let resolved = fixture.handle.snapshot().await.unwrap();
        assert!(!resolved.processing);
        assert!(resolved.matched_card_ids.contains(&a));
        assert!(resolved.matched_card_ids.contains(&b));
        assert_eq!(resolved.attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_elapsed_time() {
        let fixture = spawn_session(config(4, GameMode::Classic));
        started_snapshot(&fixture.handle).await;

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(fixture.handle.snapshot().await.unwrap().elapsed_seconds, 3);

        fixture.handle.pause();
        sleep(Duration::from_secs(10)).await;
        let paused = fixture.handle.snapshot().await.unwrap();
        assert_eq!(paused.lifecycle, Lifecycle::Paused);
        assert_eq!(paused.elapsed_seconds, 3);

        fixture.handle.resume();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(fixture.handle.snapshot().await.unwrap().elapsed_seconds, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_flip_delay_discards_resolution() {
        let fixture = spawn_session(config(4, GameMode::Classic));
        let snapshot = started_snapshot(&fixture.handle).await;
        let (a, b) = pairs(&snapshot)[0];

        fixture.handle.flip(a);
        fixture.handle.flip(b);
        sleep(Duration::from_millis(500)).await;
        fixture.handle.reset(None);
        sleep(Duration::from_secs(2)).await;

        let after = fixture.handle.snapshot().await.unwrap();
        assert_eq!(after.lifecycle, Lifecycle::Idle);
        assert!(after.matched_card_ids.is_empty());
        assert!(after.flipped_card_ids.is_empty());
        assert_eq!(after.attempts, 0);
        assert_eq!(after.elapsed_seconds, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_won_round_is_recorded_and_announced() {
        let fixture = spawn_session(config(4, GameMode::Classic));
        let snapshot = started_snapshot(&fixture.handle).await;

        play_all_pairs(&fixture.handle, &snapshot).await;

        let finished = fixture.handle.snapshot().await.unwrap();
        assert_eq!(finished.lifecycle, Lifecycle::Won);

        let game_overs = fixture.broadcaster.game_overs();
        assert_eq!(game_overs.len(), 1);
        assert!(matches!(&game_overs[0], GameOverSummary::Memory(info) if info.victory));

        let entries = fixture.handle.leaderboard(Difficulty::Easy).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, finished.score);
        assert!(fixture.store.get(LEADERBOARD_KEY).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progressive_round_advances_after_delay() {
        let fixture = spawn_session(config(4, GameMode::Progressive));
        let snapshot = started_snapshot(&fixture.handle).await;

        play_all_pairs(&fixture.handle, &snapshot).await;
        assert_eq!(
            fixture.handle.snapshot().await.unwrap().lifecycle,
            Lifecycle::Won
        );

        sleep(Duration::from_millis(3000)).await;

        let advanced = fixture.handle.snapshot().await.unwrap();
        assert_eq!(advanced.size, 5);
        assert_eq!(advanced.cards.len(), 24);
        assert_eq!(advanced.lifecycle, Lifecycle::Playing);
        assert_eq!(advanced.attempts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_round_is_lost_when_time_runs_out() {
        let mut timed = config(4, GameMode::Timed);
        timed.time_limit = Some(2);
        let fixture = spawn_session(timed);
        started_snapshot(&fixture.handle).await;

        sleep(Duration::from_millis(2500)).await;

        let finished = fixture.handle.snapshot().await.unwrap();
        assert_eq!(finished.lifecycle, Lifecycle::Lost);
        assert_eq!(finished.elapsed_seconds, 2);
        let game_overs = fixture.broadcaster.game_overs();
        assert!(matches!(&game_overs[..], [GameOverSummary::Memory(info)] if !info.victory));
        assert_eq!(fixture.store.get(LEADERBOARD_KEY).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_limited_moves_round_is_lost_at_move_limit() {
        let mut limited = config(4, GameMode::LimitedMoves);
        limited.move_limit = Some(1);
        let fixture = spawn_session(limited);
        let snapshot = started_snapshot(&fixture.handle).await;
        let (a, b) = pairs(&snapshot)[0];

        fixture.handle.flip(a);
        fixture.handle.flip(b);
        sleep(Duration::from_millis(1100)).await;

        let finished = fixture.handle.snapshot().await.unwrap();
        assert_eq!(finished.lifecycle, Lifecycle::Lost);
        assert_eq!(finished.attempts, 1);
        assert!(finished.matched_card_ids.is_empty());
        let game_overs = fixture.broadcaster.game_overs();
        assert!(matches!(&game_overs[..], [GameOverSummary::Memory(info)] if !info.victory));
        assert_eq!(fixture.store.get(LEADERBOARD_KEY).unwrap(), None);

        assert!(fixture.handle.flip(b));
        let after = fixture.handle.snapshot().await.unwrap();
        assert!(after.flipped_card_ids.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_commands_do_not_broadcast() {
        let fixture = spawn_session(config(4, GameMode::Classic));

        fixture.handle.flip(0);
        fixture.handle.resume();
        fixture.handle.snapshot().await.unwrap();
        assert!(fixture.broadcaster.snapshots().is_empty());

        fixture.handle.start();
        fixture.handle.snapshot().await.unwrap();
        assert_eq!(fixture.broadcaster.snapshots().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_session() {
        let fixture = spawn_session(config(4, GameMode::Classic));
        fixture.handle.start();

        fixture.handle.shutdown().await;
    }
}
