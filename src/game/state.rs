//! Game session state
//!
//! All per-run state the machine mutates lives here. Created once per
//! session and reinitialized in place by `reset`; the session controller
//! is the only writer, which keeps the single-timeline invariant trivial.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One run of the game, from reset to win or loss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Difficulty tier, 1..=4; only `reset` returns it to 1
    pub level: u8,
    /// Next display number the player must tap (numOn)
    pub next_target: u32,
    /// Correct taps required to complete the current level (numGoal)
    pub level_goal: u32,
    /// Display number the next spawned spot receives, cyclic 1..=30
    pub next_label: u32,
    /// Retirement ids for tapped spots; strictly increasing from 100
    id_allocator: u32,
    /// Points scored this run
    pub score: u32,
    /// Correct taps this run
    pub spots_touched: u32,
    /// Countdown seconds remaining; the run is lost when this goes negative
    pub time_limit: i32,
    /// Countdown seconds elapsed since reset
    pub total_time: u32,
    /// How long each spot stays on screen (ms); fixed for the whole run
    pub animation_ms: u64,
    pub game_over: bool,
    pub paused: bool,
    /// An end-of-game dialog is up; resume must not reset underneath it
    pub dialog_pending: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            level: 1,
            next_target: 1,
            level_goal: FIRST_GOAL,
            next_label: 1,
            id_allocator: ID_ALLOCATOR_START,
            score: 0,
            spots_touched: 0,
            time_limit: START_TIME_LIMIT,
            total_time: 0,
            animation_ms: ANIMATION_DURATION_MS,
            game_over: false,
            paused: false,
            dialog_pending: false,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialize every field to its starting value. The result is the
    /// same regardless of prior state; `paused` and `dialog_pending` are
    /// lifecycle flags owned by the controller and survive a reset.
    pub fn reset(&mut self) {
        *self = Self {
            paused: self.paused,
            dialog_pending: self.dialog_pending,
            ..Self::default()
        };
    }

    /// Hand out a retirement id for a tapped spot. Strictly increasing,
    /// so a resolved spot can never match the tap target again.
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.id_allocator;
        self.id_allocator += 1;
        id
    }

    /// The display number the next spawn will carry, wrapping 30 -> 1
    pub fn take_label(&mut self) -> u32 {
        let label = self.next_label;
        self.next_label = if label == LABEL_MAX { 1 } else { label + 1 };
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_canonical_state() {
        let mut session = GameSession::new();
        session.level = 4;
        session.next_target = 27;
        session.level_goal = 28;
        session.next_label = 14;
        session.score = 990;
        session.spots_touched = 33;
        session.time_limit = -1;
        session.total_time = 181;
        session.game_over = true;
        session.alloc_id();

        session.reset();
        assert_eq!(session, GameSession::new());
        assert_eq!(session.level, 1);
        assert_eq!(session.next_target, 1);
        assert_eq!(session.level_goal, 10);
        assert_eq!(session.time_limit, 60);
        assert_eq!(session.total_time, 0);
        assert!(!session.game_over);
    }

    #[test]
    fn test_label_wraps_after_thirty() {
        let mut session = GameSession::new();
        session.next_label = 30;
        assert_eq!(session.take_label(), 30);
        assert_eq!(session.take_label(), 1);
        assert_eq!(session.take_label(), 2);
    }

    #[test]
    fn test_alloc_id_strictly_increases_from_base() {
        let mut session = GameSession::new();
        assert_eq!(session.alloc_id(), 100);
        assert_eq!(session.alloc_id(), 101);
        session.reset();
        assert_eq!(session.alloc_id(), 100);
    }
}
