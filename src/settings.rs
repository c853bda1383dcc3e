//! Game settings and preferences
//!
//! Stored by the host alongside the save data. The core only reads them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::CAMERA_OFFSET;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Swap left/right steering
    pub invert_controls: bool,
    /// Pause a running game when the window loses focus
    pub pause_on_focus_loss: bool,

    // === Feel ===
    /// Scale lean/camera smoothing by tick length instead of a fixed
    /// fraction per tick (keeps cornering feel the same at high refresh rates)
    pub time_scaled_smoothing: bool,
    /// Camera position relative to the ball
    pub camera_offset: Vec3,

    // === Audio (played by the host) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no squash/stretch on the ball)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            invert_controls: false,
            pause_on_focus_loss: true,

            time_scaled_smoothing: false,
            camera_offset: CAMERA_OFFSET,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Clamp volumes into range
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective sound effects gain
    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective music gain
    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse stored settings, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Unreadable settings, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
