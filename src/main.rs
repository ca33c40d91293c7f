//! Spot Rush entry point
//!
//! Headless demo: wires logging service implementations into a session
//! and lets a scripted player run it to completion. Pass a seed as the
//! first argument to replay a particular run.

use std::path::Path;

use spot_rush::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use spot_rush::game::{Session, Spot};
use spot_rush::highscores::HighScoreFile;
use spot_rush::host::{
    AnimationService, DisplayService, FeedbackService, GameEnd, Services, SoundKey, SpotMotion,
};
use spot_rush::settings::Settings;

struct LogAnimation;

impl AnimationService for LogAnimation {
    fn animate(&mut self, spot: &Spot, motion: &SpotMotion) {
        log::debug!(
            "spot {} travels ({:.0},{:.0}) -> ({:.0},{:.0}) over {}ms",
            spot.id,
            motion.start.x,
            motion.start.y,
            motion.end.x,
            motion.end.y,
            motion.duration_ms
        );
    }
}

struct LogFeedback {
    volume: f32,
}

impl FeedbackService for LogFeedback {
    fn play(&mut self, sound: SoundKey) {
        log::debug!("sfx {sound:?} at volume {:.2}", self.volume);
    }
}

struct LogDisplay;

impl DisplayService for LogDisplay {
    fn show_scores(&mut self, time_limit: i32, level: u8, total_time: u32) {
        log::debug!("time {time_limit}  level {level}  total {total_time}");
    }

    fn show_end_dialog(&mut self, end: GameEnd) {
        log::info!("{}: {}", end.title(), end.message());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load(Path::new("spot-rush-settings.json"));
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let services = Services {
        animation: Box::new(LogAnimation),
        feedback: Box::new(LogFeedback {
            volume: settings.effective_sfx_volume(),
        }),
        display: Box::new(LogDisplay),
        persistence: Box::new(HighScoreFile::new("spot-rush-highscore.json")),
    };

    let mut session = Session::new(seed, services);
    session.resize(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT);
    session.resume();

    // Scripted player: taps the next target two seconds after its spot
    // appears, dawdling on every seventh number.
    let mut steps = 0u32;
    while !session.state().game_over && steps < 600 {
        session.advance(500);
        steps += 1;

        let target = session.state().next_target;
        if let Some(spot) = session.spots().get(target).copied() {
            let age = session.now().saturating_sub(spot.spawned_at);
            let dawdle = spot.id % 7 == 0 && age < 6_000;
            if age >= 2_000 && !dawdle {
                session.on_spot_tapped(target);
            }
        }
    }

    let state = session.state();
    log::info!(
        "finished: level {}, score {}, {} taps, {}s played, high score {}",
        state.level,
        state.score,
        state.spots_touched,
        state.total_time,
        session.high_score()
    );
}
