//! Spot Rush - a numbered-spot tap reflex game
//!
//! Core modules:
//! - `game`: Deterministic game core (scheduler, spot registry, state machine)
//! - `host`: Injected host services (animation, feedback, display, persistence)
//! - `highscores`: High score persistence
//! - `settings`: Player preferences

pub mod game;
pub mod highscores;
pub mod host;
pub mod settings;

pub use game::{GameSession, Session, Spot};
pub use host::{GameEnd, Services, SoundKey, SpotMotion};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of spawn events issued per burst (game start and each level-up)
    pub const INITIAL_SPOTS: u32 = 10;
    /// Delay between consecutive burst spawn events (ms)
    pub const SPOT_DELAY_MS: u64 = 1_000;
    /// Countdown tick interval (ms)
    pub const COUNTDOWN_INTERVAL_MS: u64 = 1_000;
    /// How long each spot stays on screen before expiring (ms)
    pub const ANIMATION_DURATION_MS: u64 = 15_000;

    /// Spot size in pixels
    pub const SPOT_DIAMETER: f32 = 100.0;
    /// End-of-animation scale factors
    pub const SCALE_X: f32 = 0.5;
    pub const SCALE_Y: f32 = 0.5;

    /// Display numbers cycle 1..=LABEL_MAX
    pub const LABEL_MAX: u32 = 30;
    /// First id handed out when a tapped spot is retired
    pub const ID_ALLOCATOR_START: u32 = 100;

    /// Correct taps required to finish level 1
    pub const FIRST_GOAL: u32 = 10;
    /// Goal increment for levels 2 and 3
    pub const GOAL_STEP: u32 = 10;
    /// Highest level; completing its goal wins the game
    pub const FINAL_LEVEL: u8 = 4;

    /// Countdown seconds at game start
    pub const START_TIME_LIMIT: i32 = 60;
    /// Countdown seconds granted on entering levels 2, 3 and 4
    pub const LEVEL_TIME_LIMITS: [i32; 3] = [55, 50, 45];

    /// Points per correct tap, multiplied by the current level
    pub const TAP_SCORE: u32 = 10;

    /// Arena dimensions used before the host reports real ones
    pub const DEFAULT_ARENA_WIDTH: f32 = 1080.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 1920.0;
}
