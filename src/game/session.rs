//! Session controller
//!
//! Owns the game state, spot registry, scheduler and RNG, and wires timer
//! events into state machine calls and host service calls. Every mutation
//! funnels through here, so the session is the single writer the
//! concurrency model requires.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::machine::{self, CountdownOutcome, Progression};
use super::scheduler::{Scheduler, TimerEvent};
use super::spots::SpotRegistry;
use super::state::GameSession;
use crate::consts::*;
use crate::host::{GameEnd, Services, SoundKey, SpotMotion};

/// A running game wired to its host services
pub struct Session {
    state: GameSession,
    spots: SpotRegistry,
    scheduler: Scheduler,
    rng: Pcg32,
    arena: Vec2,
    high_score: u32,
    services: Services,
}

impl Session {
    /// Create a session. Loads the stored high score; the game itself
    /// starts on the first `resume` (or an explicit `reset_game`).
    pub fn new(seed: u64, mut services: Services) -> Self {
        let high_score = services.persistence.load_high_score();
        log::info!("session created (seed {seed}, high score {high_score})");
        Self {
            state: GameSession::new(),
            spots: SpotRegistry::new(),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            arena: Vec2::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT),
            high_score,
            services,
        }
    }

    pub fn state(&self) -> &GameSession {
        &self.state
    }

    pub fn spots(&self) -> &SpotRegistry {
        &self.spots
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Host reports the playfield dimensions spots move within
    pub fn resize(&mut self, width: f32, height: f32) {
        let min = SPOT_DIAMETER + 1.0;
        self.arena = Vec2::new(width.max(min), height.max(min));
    }

    /// Pump the timeline forward by `dt_ms`, dispatching every event that
    /// comes due. Events scheduled during dispatch (countdown re-arms,
    /// level-up bursts) fire in the same pump when they fall inside it.
    pub fn advance(&mut self, dt_ms: u64) {
        let deadline = self.scheduler.now() + dt_ms;
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.dispatch(event);
        }
        self.scheduler.advance_to(deadline);
    }

    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::SpawnSpot => self.spawn_spot(),
            TimerEvent::CountdownTick => self.countdown_tick(),
            TimerEvent::SpotExpiry { id, seq } => self.expire_spot(id, seq),
        }
    }

    /// Start a new run: cancel pending events, drop live spots, restore
    /// canonical state, then issue the opening burst and arm the countdown.
    pub fn reset_game(&mut self) {
        self.scheduler.cancel_all();
        self.spots.clear();
        self.state.reset();
        log::info!("game reset");
        self.show_scores();
        self.schedule_burst();
        self.scheduler
            .schedule_in(COUNTDOWN_INTERVAL_MS, TimerEvent::CountdownTick);
    }

    /// Host lifecycle: going to the background. Nothing scheduled may fire
    /// while paused, so cancel everything and clear the board.
    pub fn pause(&mut self) {
        self.state.paused = true;
        self.scheduler.cancel_all();
        self.spots.clear();
        log::debug!("paused; pending events cancelled, live spots cleared");
    }

    /// Host lifecycle: back to the foreground. Starts a fresh run unless
    /// an end-of-game dialog is still up; resetting underneath it would
    /// double-start the session.
    pub fn resume(&mut self) {
        self.state.paused = false;
        if !self.state.dialog_pending {
            self.reset_game();
        }
    }

    /// The end dialog's play-again button
    pub fn play_again(&mut self) {
        self.state.dialog_pending = false;
        self.show_scores();
        self.reset_game();
    }

    /// Host reports a tap on the spot displaying `id`
    pub fn on_spot_tapped(&mut self, id: u32) {
        if self.state.paused || self.state.game_over {
            return;
        }
        if !self.spots.contains(id) || id != self.state.next_target {
            // Out of order (or a spot that no longer exists): feedback
            // only, no state change.
            self.services.feedback.play(SoundKey::Uhoh);
            return;
        }

        // Retire the display number behind an allocator id so nothing can
        // match this spot again, then take it off the board.
        let _retired = self.state.alloc_id();
        self.spots.resolve(id);
        self.services.feedback.play(SoundKey::Hit);
        self.services.feedback.play(SoundKey::Number(id));

        match machine::score_tap(&mut self.state, &mut self.rng) {
            Some(Progression::Win) => {
                self.finish(GameEnd::Win);
                self.show_scores();
            }
            Some(_) => {
                self.schedule_burst();
                self.show_scores();
            }
            None => {}
        }
    }

    /// Host reports a tap that hit no spot
    pub fn on_background_tap(&mut self) {
        if self.state.paused {
            return;
        }
        self.services.feedback.play(SoundKey::Miss);
        self.show_scores();
    }

    fn spawn_spot(&mut self) {
        if self.state.paused || self.state.game_over {
            return;
        }
        let label = self.state.take_label();
        let spot = self.spots.spawn(label, self.scheduler.now());
        let motion = self.roll_motion();
        self.services.animation.animate(&spot, &motion);
        self.scheduler.schedule_in(
            self.state.animation_ms,
            TimerEvent::SpotExpiry {
                id: spot.id,
                seq: spot.seq,
            },
        );
    }

    fn countdown_tick(&mut self) {
        if self.state.game_over {
            return;
        }
        match machine::countdown(&mut self.state) {
            CountdownOutcome::Expired => self.finish(GameEnd::Loss),
            CountdownOutcome::Running => {
                self.show_scores();
                self.scheduler
                    .schedule_in(COUNTDOWN_INTERVAL_MS, TimerEvent::CountdownTick);
            }
        }
    }

    /// A spot's animation ran out. First resolver wins: if a tap already
    /// took the spot (or a newer spot recycled its number), this is a no-op.
    fn expire_spot(&mut self, id: u32, seq: u64) {
        if self.state.paused || self.state.game_over {
            return;
        }
        if self.spots.resolve_exact(id, seq).is_some() {
            self.services.feedback.play(SoundKey::Disappear);
        }
    }

    fn schedule_burst(&mut self) {
        self.scheduler
            .schedule_burst(SPOT_DELAY_MS, INITIAL_SPOTS, TimerEvent::SpawnSpot);
    }

    fn roll_motion(&mut self) -> SpotMotion {
        let max = self.arena - Vec2::splat(SPOT_DIAMETER);
        let start = Vec2::new(
            self.rng.random_range(0.0..max.x),
            self.rng.random_range(0.0..max.y),
        );
        let end = Vec2::new(
            self.rng.random_range(0.0..max.x),
            self.rng.random_range(0.0..max.y),
        );
        SpotMotion {
            start,
            end,
            scale: Vec2::new(SCALE_X, SCALE_Y),
            duration_ms: self.state.animation_ms,
        }
    }

    fn show_scores(&mut self) {
        self.services.display.show_scores(
            self.state.time_limit,
            self.state.level,
            self.state.total_time,
        );
    }

    fn finish(&mut self, end: GameEnd) {
        self.state.dialog_pending = true;
        if self.state.score > self.high_score {
            self.high_score = self.state.score;
            self.services.persistence.save_high_score(self.high_score);
            log::info!("new high score: {}", self.high_score);
        }
        if end == GameEnd::Win {
            self.services.feedback.play(SoundKey::Applause);
        }
        self.services.display.show_end_dialog(end);
    }
}
