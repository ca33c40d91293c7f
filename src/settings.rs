//! Player preferences
//!
//! Persisted separately from any run state as a small JSON document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Audio preferences the host's feedback layer honors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute everything regardless of volumes
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Volume a sound effect should actually play at
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file unreadable, using defaults: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }

    /// Save to `path`; failures are logged, never fatal
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save settings: {err}");
                } else {
                    log::info!("settings saved");
                }
            }
            Err(err) => log::warn!("failed to encode settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.sfx_volume, 1.0);
        assert!(!settings.muted);
    }

    #[test]
    fn test_volume_clamps() {
        let mut settings = Settings::default();
        settings.set_master_volume(3.0);
        assert_eq!(settings.master_volume, 1.0);
        settings.set_sfx_volume(-0.5);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_mute_silences_effective_volume() {
        let mut settings = Settings::default();
        assert!(settings.effective_sfx_volume() > 0.0);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "spot_rush_settings_{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        assert_eq!(Settings::load(&path), Settings::default());

        let mut settings = Settings::default();
        settings.set_master_volume(0.25);
        settings.muted = true;
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);

        let _ = fs::remove_file(&path);
    }
}
