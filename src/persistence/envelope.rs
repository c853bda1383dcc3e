//! Versioned save envelope

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::shop::Shop;
use crate::sim::RunState;

/// Key the host should store the envelope under
pub const SAVE_KEY: &str = "roll_runner_save";

/// Current envelope version
pub const SAVE_VERSION: u32 = 1;

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub coins: u64,
    pub high_score: u64,
    #[serde(default)]
    pub leaderboard: HighScores,
    #[serde(default)]
    pub shop: Shop,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            coins: 0,
            high_score: 0,
            leaderboard: HighScores::new(),
            shop: Shop::default(),
            settings: Settings::default(),
        }
    }
}

impl SaveData {
    /// Snapshot the persistent parts of a run state
    pub fn capture(run: &RunState, settings: &Settings) -> Self {
        Self {
            version: SAVE_VERSION,
            coins: run.coins,
            high_score: run.high_score,
            leaderboard: run.leaderboard.clone(),
            shop: run.shop.clone(),
            settings: settings.clone(),
        }
    }

    /// Copy persistent values into a run state
    pub fn apply_to(&self, run: &mut RunState) {
        run.coins = self.coins;
        run.high_score = self.high_score.max(self.leaderboard.top_score().unwrap_or(0));
        run.leaderboard = self.leaderboard.clone();
        run.shop = self.shop.clone();
        if !run.shop.owns(run.shop.equipped) {
            run.shop.equipped = Shop::default().equipped;
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let data: SaveData = serde_json::from_str(json)?;
        if data.version > SAVE_VERSION {
            log::warn!(
                "Save version {} is newer than supported {}",
                data.version,
                SAVE_VERSION
            );
        }
        Ok(data)
    }

    /// Decode, or start fresh if the stored value is unreadable
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(data) => {
                log::info!("Loaded save ({} coins, best {})", data.coins, data.high_score);
                data
            }
            Err(e) => {
                log::warn!("Corrupt save, starting fresh: {}", e);
                Self::default()
            }
        }
    }
}
