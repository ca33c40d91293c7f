//! Injected host services
//!
//! The game core never touches a view, an audio device or storage; it
//! talks to the host through these narrow traits. GUI callback objects in
//! the usual toolkit sense flatten to plain data here: spot motion is a
//! value, expiry runs on the core's own timeline, and the end dialog's
//! play-again button calls back into `Session::play_again`.

use glam::Vec2;

use crate::game::Spot;

/// Keyed sound effects the core requests from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKey {
    /// Spoken number for a correctly tapped spot (1..=30)
    Number(u32),
    /// Impact on a correct tap
    Hit,
    /// Tap that landed on no spot
    Miss,
    /// A spot ran out its animation untapped
    Disappear,
    /// Wrong-order tap
    Uhoh,
    /// Run won
    Applause,
}

/// A spot's fire-and-forget animated transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotMotion {
    pub start: Vec2,
    pub end: Vec2,
    /// End scale relative to spawn size
    pub scale: Vec2,
    pub duration_ms: u64,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Win,
    Loss,
}

impl GameEnd {
    pub fn title(&self) -> &'static str {
        "Game Over"
    }

    pub fn message(&self) -> &'static str {
        match self {
            GameEnd::Win => "You win! Would you like to play again?",
            GameEnd::Loss => "You lose! Would you like to play again?",
        }
    }
}

/// Starts a spot's on-screen animation
pub trait AnimationService {
    fn animate(&mut self, spot: &Spot, motion: &SpotMotion);
}

/// Plays keyed sound effects
pub trait FeedbackService {
    fn play(&mut self, sound: SoundKey);
}

/// Score display and end-of-run dialog presentation
pub trait DisplayService {
    fn show_scores(&mut self, time_limit: i32, level: u8, total_time: u32);
    fn show_end_dialog(&mut self, end: GameEnd);
}

/// High score storage
pub trait PersistenceService {
    fn load_high_score(&mut self) -> u32;
    fn save_high_score(&mut self, score: u32);
}

/// The full set of collaborators a session is wired to
pub struct Services {
    pub animation: Box<dyn AnimationService>,
    pub feedback: Box<dyn FeedbackService>,
    pub display: Box<dyn DisplayService>,
    pub persistence: Box<dyn PersistenceService>,
}
