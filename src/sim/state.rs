//! Run state machine
//!
//! Score, lives, coins, difficulty pattern and speed. Only the operations here
//! mutate it; everything else reads.

use serde::{Deserialize, Serialize};

use super::segment::Pattern;
use crate::consts::*;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::shop::{BallSkin, Shop};

/// Coarse lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
    /// Menu sub-screens, no simulation
    Shop,
    Leaderboard,
    Settings,
}

impl GamePhase {
    /// Only PLAYING advances the simulation
    pub fn is_simulating(self) -> bool {
        self == GamePhase::Playing
    }

    /// Sub-screens reachable from the menu
    pub fn is_menu_screen(self) -> bool {
        matches!(self, GamePhase::Shop | GamePhase::Leaderboard | GamePhase::Settings)
    }
}

/// Speed multiplier for a given number of cleared platforms
pub fn speed_for_platforms(platforms_cleared: u32) -> f32 {
    let steps = platforms_cleared / SPEED_STEP_PLATFORMS;
    1.0 + (steps as f32 * SPEED_STEP).min(MAX_SPEED_BONUS)
}

/// Authoritative game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    /// max(platforms cleared, distance score); never decreases within a run
    pub score: u64,
    /// Best score across runs
    pub high_score: u64,
    pub lives: u8,
    /// Wallet, kept across runs
    pub coins: u64,
    /// Coins picked up this run
    pub total_coins_collected: u32,
    /// Platform-clear credits this run
    pub platforms_cleared: u32,
    /// Credits since the last pattern switch
    pub pattern_progress: u32,
    pub pattern: Pattern,
    /// Speed multiplier in [1.0, 2.0]
    pub speed: f32,
    /// Best distance-based score this run
    pub distance_score: u64,
    /// Runs started since launch (seeds the track)
    pub runs_started: u32,
    pub shop: Shop,
    pub leaderboard: HighScores,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            lives: START_LIVES,
            coins: 0,
            total_coins_collected: 0,
            platforms_cleared: 0,
            pattern_progress: 0,
            pattern: Pattern::FlatWithObstacles,
            speed: 1.0,
            distance_score: 0,
            runs_started: 0,
            shop: Shop::default(),
            leaderboard: HighScores::new(),
        }
    }

    fn reset_run(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.total_coins_collected = 0;
        self.platforms_cleared = 0;
        self.pattern_progress = 0;
        self.pattern = Pattern::FlatWithObstacles;
        self.speed = speed_for_platforms(0);
        self.distance_score = 0;
        self.runs_started += 1;
    }

    fn transition(&mut self, from: &[GamePhase], to: GamePhase) -> bool {
        if !from.contains(&self.phase) {
            log::warn!("Rejected transition {:?} -> {:?}", self.phase, to);
            return false;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, to);
        self.phase = to;
        true
    }

    /// MENU -> PLAYING
    pub fn start_run(&mut self) -> bool {
        if !self.transition(&[GamePhase::Menu], GamePhase::Playing) {
            return false;
        }
        self.reset_run();
        true
    }

    /// GAME_OVER -> PLAYING. Coins and high score carry over.
    pub fn retry(&mut self) -> bool {
        if !self.transition(&[GamePhase::GameOver], GamePhase::Playing) {
            return false;
        }
        self.reset_run();
        true
    }

    /// PLAYING <-> PAUSED
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.transition(&[GamePhase::Playing], GamePhase::Paused),
            GamePhase::Paused => self.transition(&[GamePhase::Paused], GamePhase::Playing),
            _ => false,
        }
    }

    /// Back to the title screen from game over or a menu sub-screen
    pub fn return_to_menu(&mut self) -> bool {
        self.transition(
            &[
                GamePhase::GameOver,
                GamePhase::Shop,
                GamePhase::Leaderboard,
                GamePhase::Settings,
            ],
            GamePhase::Menu,
        )
    }

    /// MENU -> a sub-screen
    pub fn open_screen(&mut self, screen: GamePhase) -> bool {
        if !screen.is_menu_screen() {
            return false;
        }
        self.transition(&[GamePhase::Menu], screen)
    }

    /// Take one life. Returns true when this was the last one.
    ///
    /// Never changes phase; the caller ends the run on a terminal result.
    pub fn lose_life(&mut self) -> bool {
        if self.lives <= 1 {
            self.lives = 0;
            true
        } else {
            self.lives -= 1;
            false
        }
    }

    /// PLAYING -> GAME_OVER, only once lives are gone.
    /// Returns the leaderboard rank, if the run made it.
    pub fn end_run(&mut self, timestamp: f64) -> Option<Option<usize>> {
        if self.lives != 0 || !self.transition(&[GamePhase::Playing], GamePhase::GameOver) {
            return None;
        }
        self.high_score = self.high_score.max(self.score);
        let rank = self.leaderboard.add_entry(HighScoreEntry {
            score: self.score,
            platforms: self.platforms_cleared,
            coins: self.total_coins_collected,
            timestamp,
        });
        log::info!(
            "Game over: score {} (best {}), {} platforms, {} coins",
            self.score,
            self.high_score,
            self.platforms_cleared,
            self.total_coins_collected
        );
        Some(rank)
    }

    /// Credit one cleared platform. Returns the new pattern if it switched.
    pub fn credit_platform(&mut self) -> Option<Pattern> {
        self.platforms_cleared += 1;
        self.sync_speed();
        self.refresh_score();

        self.pattern_progress += 1;
        if self.pattern_progress < PATTERN_SWITCH_PLATFORMS {
            return None;
        }
        self.pattern_progress = 0;
        self.pattern = self.pattern.toggled();
        log::info!(
            "Pattern switched to {:?} after {} platforms",
            self.pattern,
            self.platforms_cleared
        );
        Some(self.pattern)
    }

    /// Per-tick speed refresh; same formula as the platform-clear path
    pub fn sync_speed(&mut self) {
        self.speed = speed_for_platforms(self.platforms_cleared);
    }

    /// Raise the distance-based score floor
    pub fn raise_distance_score(&mut self, distance: u64) {
        self.distance_score = self.distance_score.max(distance);
        self.refresh_score();
    }

    fn refresh_score(&mut self) {
        let score = (self.platforms_cleared as u64).max(self.distance_score);
        self.score = self.score.max(score);
        self.high_score = self.high_score.max(self.score);
    }

    pub fn collect_coin(&mut self) {
        self.coins += 1;
        self.total_coins_collected += 1;
    }

    /// Returns false when already at max lives (the heart is still consumed)
    pub fn collect_heart(&mut self) -> bool {
        if self.lives >= MAX_LIVES {
            return false;
        }
        self.lives += 1;
        true
    }

    pub fn purchase(&mut self, skin: BallSkin) -> bool {
        self.shop.purchase(skin, &mut self.coins)
    }

    pub fn equip(&mut self, skin: BallSkin) -> bool {
        self.shop.equip(skin)
    }
}
