use std::collections::BTreeSet;
use std::time::Duration;

use super::deck::{DealError, deal};
use super::score::compute_score;
use super::types::{
    Card, GameEvent, GameMode, Lifecycle, MAX_GRID_SIZE, MemoryGameConfig, MemoryGameEndInfo,
    MemorySnapshot, ScheduledTimer, TimerKind, TimerTicket,
};
use crate::games::session_rng::SessionRng;
use crate::{log, log_error};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Resolution {
    Compare,
    MoveLimitReached,
}

/// One round of the pairs game.
///
/// The state never waits on a clock. Deferred work is queued as
/// [`ScheduledTimer`]s (drained with [`take_timers`](Self::take_timers)) and
/// fed back through [`on_timer`](Self::on_timer) by whoever owns the clock.
/// Reset, pause, round end and level advance bump the generation, so tickets
/// issued before them are ignored.
pub struct MemoryGameState {
    config: MemoryGameConfig,
    cards: Vec<Card>,
    lifecycle: Lifecycle,
    flipped: Vec<u32>,
    matched: BTreeSet<u32>,
    attempts: u32,
    elapsed_seconds: u32,
    score: u32,
    resolution: Option<Resolution>,
    generation: u64,
    pending_timers: Vec<ScheduledTimer>,
    pending_events: Vec<GameEvent>,
}

impl MemoryGameState {
    pub fn new(config: MemoryGameConfig, rng: &mut SessionRng) -> Result<Self, DealError> {
        let cards = deal(config.size, &config.icons, rng)?;
        Ok(Self {
            config,
            cards,
            lifecycle: Lifecycle::Idle,
            flipped: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            attempts: 0,
            elapsed_seconds: 0,
            score: 0,
            resolution: None,
            generation: 0,
            pending_timers: Vec::new(),
            pending_events: Vec::new(),
        })
    }

    /// idle -> playing
    pub fn start(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Idle {
            return false;
        }
        self.lifecycle = Lifecycle::Playing;
        self.pending_events.push(GameEvent::RoundStarted {
            size: self.config.size,
        });
        true
    }

    pub fn flip(&mut self, card_id: u32) -> bool {
        if self.lifecycle != Lifecycle::Playing
            || self.resolution.is_some()
            || self.flipped.len() >= 2
            || self.flipped.contains(&card_id)
            || self.matched.contains(&card_id)
            || self.card(card_id).is_none()
        {
            return false;
        }

        self.flipped.push(card_id);
        self.pending_events.push(GameEvent::CardFlipped { card_id });

        if self.flipped.len() == 2 {
            self.attempts += 1;
            let limit_reached = self
                .config
                .effective_move_limit()
                .is_some_and(|limit| self.attempts >= limit);
            self.resolution = Some(if limit_reached {
                Resolution::MoveLimitReached
            } else {
                Resolution::Compare
            });
            self.schedule(self.config.flip_delay, TimerKind::ResolveFlip);
        }

        true
    }

    /// Called once per elapsed second while playing.
    pub fn tick(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Playing {
            return false;
        }
        self.elapsed_seconds += 1;
        let out_of_time = self
            .config
            .effective_time_limit()
            .is_some_and(|limit| self.elapsed_seconds >= limit);
        if out_of_time {
            self.end_round(false);
        }
        true
    }

    /// playing -> paused. A pending resolution stays pending but its timer is dropped.
    pub fn pause(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Playing {
            return false;
        }
        self.lifecycle = Lifecycle::Paused;
        self.supersede_timers();
        true
    }

    /// paused -> playing. Re-issues the resolution timer dropped by [`pause`](Self::pause).
    pub fn resume(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Paused {
            return false;
        }
        self.lifecycle = Lifecycle::Playing;
        if self.resolution.is_some() {
            self.schedule(self.config.flip_delay, TimerKind::ResolveFlip);
        }
        true
    }

    /// Re-deals with `config` (or the current one) and returns to idle.
    /// On a failed deal the current round is left untouched.
    pub fn reset(
        &mut self,
        config: Option<MemoryGameConfig>,
        rng: &mut SessionRng,
    ) -> Result<(), DealError> {
        let config = config.unwrap_or_else(|| self.config.clone());
        let cards = deal(config.size, &config.icons, rng)?;

        self.config = config;
        self.cards = cards;
        self.lifecycle = Lifecycle::Idle;
        self.flipped.clear();
        self.matched.clear();
        self.attempts = 0;
        self.elapsed_seconds = 0;
        self.score = 0;
        self.resolution = None;
        self.supersede_timers();
        Ok(())
    }

    /// Fires a deferred callback. Tickets from an older generation are no-ops.
    pub fn on_timer(&mut self, ticket: TimerTicket, rng: &mut SessionRng) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match ticket.kind {
            TimerKind::ResolveFlip => self.resolve_flip(),
            TimerKind::AdvanceLevel => self.advance_level(rng),
        }
    }

    fn resolve_flip(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Playing {
            return false;
        }
        let Some(resolution) = self.resolution.take() else {
            return false;
        };
        let &[first, second] = self.flipped.as_slice() else {
            self.flipped.clear();
            return false;
        };
        self.flipped.clear();

        if resolution == Resolution::MoveLimitReached {
            self.end_round(false);
            return true;
        }

        let is_match = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.icon == b.icon,
            _ => false,
        };

        if is_match {
            for id in [first, second] {
                if let Some(card) = self.cards.get_mut(id as usize) {
                    card.matched = true;
                }
                self.matched.insert(id);
            }
            self.score = compute_score(self.attempts, self.elapsed_seconds);
            self.pending_events
                .push(GameEvent::PairMatched { first, second });
        } else {
            self.pending_events
                .push(GameEvent::PairMismatched { first, second });
        }

        if self.matched.len() == self.cards.len() {
            self.end_round(true);
        }
        true
    }

    fn end_round(&mut self, victory: bool) {
        self.lifecycle = if victory {
            Lifecycle::Won
        } else {
            Lifecycle::Lost
        };
        self.score = compute_score(self.attempts, self.elapsed_seconds);
        self.resolution = None;
        self.flipped.clear();
        self.supersede_timers();

        let info = MemoryGameEndInfo {
            victory,
            score: self.score,
            attempts: self.attempts,
            elapsed_seconds: self.elapsed_seconds,
            size: self.config.size,
            mode: self.config.mode,
        };
        self.pending_events.push(GameEvent::RoundEnded { info });

        if victory && self.config.mode == GameMode::Progressive && self.config.size < MAX_GRID_SIZE
        {
            self.schedule(self.config.advance_delay, TimerKind::AdvanceLevel);
        }
    }

    fn advance_level(&mut self, rng: &mut SessionRng) -> bool {
        if self.lifecycle != Lifecycle::Won || self.config.mode != GameMode::Progressive {
            return false;
        }

        let mut config = self.config.clone();
        config.size = (config.size + 1).min(MAX_GRID_SIZE);
        let size = config.size;

        if let Err(e) = self.reset(Some(config), rng) {
            log_error!("Cannot advance to {}x{}: {}", size, size, e);
            return false;
        }

        log!("Progressive mode advanced to {}x{}", size, size);
        self.pending_events.push(GameEvent::LevelAdvanced { size });
        self.start()
    }

    fn schedule(&mut self, delay: Duration, kind: TimerKind) {
        self.pending_timers.push(ScheduledTimer {
            delay,
            ticket: TimerTicket {
                generation: self.generation,
                kind,
            },
        });
    }

    fn supersede_timers(&mut self) {
        self.generation += 1;
        self.pending_timers.clear();
    }

    fn card(&self, card_id: u32) -> Option<&Card> {
        self.cards.get(card_id as usize)
    }

    pub fn take_timers(&mut self) -> Vec<ScheduledTimer> {
        std::mem::take(&mut self.pending_timers)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn config(&self) -> &MemoryGameConfig {
        &self.config
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_processing(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn flipped_card_ids(&self) -> &[u32] {
        &self.flipped
    }

    pub fn matched_card_ids(&self) -> &BTreeSet<u32> {
        &self.matched
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            size: self.config.size,
            mode: self.config.mode,
            lifecycle: self.lifecycle,
            cards: self.cards.clone(),
            flipped_card_ids: self.flipped.clone(),
            matched_card_ids: self.matched.iter().copied().collect(),
            attempts: self.attempts,
            elapsed_seconds: self.elapsed_seconds,
            score: self.score,
            processing: self.is_processing(),
            time_limit: self.config.effective_time_limit(),
            move_limit: self.config.effective_move_limit(),
        }
    }
}
