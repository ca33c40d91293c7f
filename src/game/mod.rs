//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only (the host pumps `Session::advance`)
//! - Seeded RNG only
//! - Stable iteration order (spots keyed by display id)
//! - No rendering or platform dependencies

pub mod machine;
pub mod scheduler;
pub mod session;
pub mod spots;
pub mod state;

pub use machine::{CountdownOutcome, Progression};
pub use scheduler::{Scheduler, TimerEvent};
pub use session::Session;
pub use spots::{Spot, SpotRegistry};
pub use state::GameSession;
