//! Ball skin shop
//!
//! Skins are bought with coins that persist across runs. Failed purchases and
//! selections report `false` and change nothing.

use serde::{Deserialize, Serialize};

/// Cosmetic ball skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BallSkin {
    #[default]
    Classic,
    Marble,
    Lava,
    Neon,
    Gold,
}

impl BallSkin {
    pub const ALL: [BallSkin; 5] = [
        BallSkin::Classic,
        BallSkin::Marble,
        BallSkin::Lava,
        BallSkin::Neon,
        BallSkin::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BallSkin::Classic => "Classic",
            BallSkin::Marble => "Marble",
            BallSkin::Lava => "Lava",
            BallSkin::Neon => "Neon",
            BallSkin::Gold => "Gold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|skin| skin.as_str().eq_ignore_ascii_case(s))
    }

    /// Price in coins
    pub fn price(&self) -> u64 {
        match self {
            BallSkin::Classic => 0,
            BallSkin::Marble => 50,
            BallSkin::Lava => 150,
            BallSkin::Neon => 300,
            BallSkin::Gold => 1000,
        }
    }
}

/// Owned and equipped skins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub owned: Vec<BallSkin>,
    pub equipped: BallSkin,
}

impl Default for Shop {
    fn default() -> Self {
        Self {
            owned: vec![BallSkin::Classic],
            equipped: BallSkin::Classic,
        }
    }
}

impl Shop {
    pub fn owns(&self, skin: BallSkin) -> bool {
        self.owned.contains(&skin)
    }

    /// Buy `skin` out of `coins`. Fails if already owned or unaffordable.
    pub fn purchase(&mut self, skin: BallSkin, coins: &mut u64) -> bool {
        if self.owns(skin) || *coins < skin.price() {
            return false;
        }
        *coins -= skin.price();
        self.owned.push(skin);
        log::info!("Bought {} skin ({} coins left)", skin.as_str(), coins);
        true
    }

    /// Equip an owned skin
    pub fn equip(&mut self, skin: BallSkin) -> bool {
        if !self.owns(skin) {
            return false;
        }
        self.equipped = skin;
        true
    }
}
