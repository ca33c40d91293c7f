//! State machine transitions
//!
//! Pure functions over `GameSession`. Each returns an outcome value; the
//! session controller turns outcomes into registry, scheduler and host
//! service calls. Keeping the transitions free of I/O is what makes the
//! level table directly testable.

use rand::Rng;

use super::state::GameSession;
use crate::consts::*;

/// What completing a level goal means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Entered the next fixed-goal level; a fresh spawn burst is owed
    NextLevel { level: u8, time_limit: i32 },
    /// Entered the final level with a randomized goal; labels and the tap
    /// target rebase to `restart_at` and a fresh burst is owed
    FinalLevel { goal: u32, restart_at: u32 },
    /// Final goal met; the run is won
    Win,
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Time remains; redisplay and re-arm
    Running,
    /// Time went negative; the run is lost
    Expired,
}

/// Apply a validated correct tap: score it and advance the tap target.
/// Returns the level progression when this tap completed the goal.
pub fn score_tap(session: &mut GameSession, rng: &mut impl Rng) -> Option<Progression> {
    session.score += TAP_SCORE * u32::from(session.level);
    session.spots_touched += 1;
    session.next_target += 1;

    if session.next_target > session.level_goal {
        Some(complete_goal(session, rng))
    } else {
        None
    }
}

/// Advance to the next level (or win) once the current goal is met.
///
/// Levels 1..=3 each grant a shorter countdown; level 3 additionally
/// randomizes the final goal and rebases the number sequence so the last
/// stretch is ten spots ending on the goal.
pub fn complete_goal(session: &mut GameSession, rng: &mut impl Rng) -> Progression {
    match session.level {
        1 | 2 => {
            session.time_limit = LEVEL_TIME_LIMITS[usize::from(session.level) - 1];
            session.level += 1;
            session.level_goal += GOAL_STEP;
            log::info!(
                "level {} reached, goal {}, {}s on the clock",
                session.level,
                session.level_goal,
                session.time_limit
            );
            Progression::NextLevel {
                level: session.level,
                time_limit: session.time_limit,
            }
        }
        3 => {
            session.time_limit = LEVEL_TIME_LIMITS[2];
            session.level = FINAL_LEVEL;
            session.level_goal = rng.random_range(0..21) + 10;
            let restart_at = session.level_goal - 9;
            session.next_label = restart_at;
            session.next_target = restart_at;
            log::info!(
                "final level: goal {}, counting from {restart_at}",
                session.level_goal
            );
            Progression::FinalLevel {
                goal: session.level_goal,
                restart_at,
            }
        }
        _ => {
            session.game_over = true;
            log::info!(
                "run won: score {}, {} taps, {}s elapsed",
                session.score,
                session.spots_touched,
                session.total_time
            );
            Progression::Win
        }
    }
}

/// One countdown second. Expiry below zero ends the run.
pub fn countdown(session: &mut GameSession) -> CountdownOutcome {
    session.time_limit -= 1;
    session.total_time += 1;

    if session.time_limit < 0 {
        session.game_over = true;
        log::info!(
            "time expired at level {} with score {}",
            session.level,
            session.score
        );
        CountdownOutcome::Expired
    } else {
        CountdownOutcome::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    /// Tap every target up to the current goal
    fn finish_level(session: &mut GameSession, rng: &mut Pcg32) -> Progression {
        loop {
            if let Some(progression) = score_tap(session, rng) {
                return progression;
            }
        }
    }

    #[test]
    fn test_level_one_to_two() {
        let mut session = GameSession::new();
        let mut rng = rng();

        // Nine taps stay inside the goal
        for _ in 0..9 {
            assert_eq!(score_tap(&mut session, &mut rng), None);
        }
        assert_eq!(session.next_target, 10);
        assert_eq!(session.level, 1);

        // The tenth completes it
        let progression = score_tap(&mut session, &mut rng);
        assert_eq!(
            progression,
            Some(Progression::NextLevel {
                level: 2,
                time_limit: 55
            })
        );
        assert_eq!(session.level_goal, 20);
        assert_eq!(session.time_limit, 55);
        assert_eq!(session.score, 100);
    }

    #[test]
    fn test_level_two_to_three() {
        let mut session = GameSession::new();
        let mut rng = rng();
        finish_level(&mut session, &mut rng);

        let progression = finish_level(&mut session, &mut rng);
        assert_eq!(
            progression,
            Progression::NextLevel {
                level: 3,
                time_limit: 50
            }
        );
        assert_eq!(session.level_goal, 30);
    }

    #[test]
    fn test_level_three_randomizes_final_goal() {
        for seed in 0..200 {
            let mut session = GameSession::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            session.level = 3;
            session.level_goal = 30;
            session.next_target = 31;

            let progression = complete_goal(&mut session, &mut rng);
            let Progression::FinalLevel { goal, restart_at } = progression else {
                panic!("expected final level, got {progression:?}");
            };
            assert!((10..=30).contains(&goal));
            assert_eq!(restart_at, goal - 9);
            assert_eq!(session.next_target, restart_at);
            assert_eq!(session.next_label, restart_at);
            assert_eq!(session.time_limit, 45);
            assert_eq!(session.level, 4);
        }
    }

    #[test]
    fn test_final_goal_reaches_both_bounds() {
        let mut seen_low = false;
        let mut seen_high = false;
        for seed in 0..2_000 {
            let mut session = GameSession::new();
            session.level = 3;
            let mut rng = Pcg32::seed_from_u64(seed);
            if let Progression::FinalLevel { goal, .. } = complete_goal(&mut session, &mut rng) {
                seen_low |= goal == 10;
                seen_high |= goal == 30;
            }
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_final_level_win_is_terminal() {
        let mut session = GameSession::new();
        let mut rng = rng();
        session.level = 4;
        session.level_goal = 15;
        session.next_target = 15;

        let progression = score_tap(&mut session, &mut rng);
        assert_eq!(progression, Some(Progression::Win));
        assert!(session.game_over);
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut session = GameSession::new();
        let mut rng = rng();
        session.level = 3;
        score_tap(&mut session, &mut rng);
        assert_eq!(session.score, 30);
        assert_eq!(session.spots_touched, 1);
    }

    #[test]
    fn test_countdown_runs_then_expires() {
        let mut session = GameSession::new();
        session.time_limit = 1;

        assert_eq!(countdown(&mut session), CountdownOutcome::Running);
        assert_eq!(session.time_limit, 0);
        assert_eq!(session.total_time, 1);
        assert!(!session.game_over);

        assert_eq!(countdown(&mut session), CountdownOutcome::Expired);
        assert_eq!(session.time_limit, -1);
        assert!(session.game_over);
    }
}
