//! High score persistence
//!
//! A single best score, stored as a small JSON document. Loading falls
//! back to zero on any failure; saving logs the failure and carries on —
//! storage trouble is never allowed to interrupt a game.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::host::PersistenceService;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct StoredScore {
    high_score: u32,
}

/// File-backed high score storage
#[derive(Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistenceService for HighScoreFile {
    fn load_high_score(&mut self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<StoredScore>(&json) {
                Ok(stored) => {
                    log::info!("loaded high score {}", stored.high_score);
                    stored.high_score
                }
                Err(err) => {
                    log::warn!("high score file unreadable, starting fresh: {err}");
                    0
                }
            },
            Err(_) => {
                log::info!("no high score file, starting fresh");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        let stored = StoredScore { high_score: score };
        match serde_json::to_string(&stored) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("failed to save high score: {err}");
                } else {
                    log::info!("high score saved ({score})");
                }
            }
            Err(err) => log::warn!("failed to encode high score: {err}"),
        }
    }
}

/// In-memory storage for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScores {
    pub high_score: u32,
}

impl MemoryScores {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl PersistenceService for MemoryScores {
    fn load_high_score(&mut self) -> u32 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) {
        self.high_score = score;
    }
}
