//! Difficulty and game-mode tables.
//!
//! These are static configuration data consumed by the engine; the engine
//! never hardcodes any of these numbers into its update rules.

use crate::asset::Asset;
use crate::money::Cash;
use crate::trend::Trend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Difficulty
// =============================================================================

/// Difficulty tier selected at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Parameters a difficulty tier contributes to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    /// Cash the player starts with.
    pub starting_cash: Cash,
    /// Seconds between organic market updates.
    pub update_interval_secs: u32,
    /// Scales every asset's base volatility.
    pub volatility_multiplier: f64,
    /// Probability that a news draw is the market-crash event.
    pub market_crash_probability: f64,
    /// Rounds in a full game.
    pub rounds: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// The difficulty table.
    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                starting_cash: Cash(12_000.0),
                update_interval_secs: 12,
                volatility_multiplier: 0.7,
                market_crash_probability: 0.03,
                rounds: 5,
            },
            Difficulty::Normal => DifficultySettings {
                starting_cash: Cash(10_000.0),
                update_interval_secs: 10,
                volatility_multiplier: 1.0,
                market_crash_probability: 0.05,
                rounds: 7,
            },
            Difficulty::Hard => DifficultySettings {
                starting_cash: Cash(8_000.0),
                update_interval_secs: 8,
                volatility_multiplier: 1.4,
                market_crash_probability: 0.10,
                rounds: 10,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Normal => f.write_str("normal"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (easy|normal|hard)")),
        }
    }
}

// =============================================================================
// Game mode
// =============================================================================

/// Flavor variant selected at session start. Modes shape the opening trends,
/// scale the drift term, and unlock mode-specific bonus news events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Classic,
    BullRun,
    Meltdown,
}

/// Parameters a game mode contributes to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameModeSettings {
    pub name: &'static str,
    pub description: &'static str,
    /// Scales the trend drift term of every organic price update.
    pub price_modifier: f64,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::BullRun, GameMode::Meltdown];

    /// The game-mode table.
    pub fn settings(self) -> GameModeSettings {
        match self {
            GameMode::Classic => GameModeSettings {
                name: "Classic",
                description: "A balanced market with no thumb on the scale.",
                price_modifier: 1.0,
            },
            GameMode::BullRun => GameModeSettings {
                name: "Bull Run",
                description: "Everything opens hot and melt-ups are in the news.",
                price_modifier: 1.2,
            },
            GameMode::Meltdown => GameModeSettings {
                name: "Meltdown",
                description: "Opening trends point down and the tape is ugly.",
                price_modifier: 1.3,
            },
        }
    }

    /// Opening trend for an asset under this mode.
    pub fn starting_trend(self, asset: Asset) -> Trend {
        match self {
            // A mixed opening book: growth assets lean up, defensives drift.
            GameMode::Classic => match asset {
                Asset::Stocks => Trend::up(1),
                Asset::Bonds => Trend::down(1),
                Asset::Gold => Trend::up(1),
                Asset::Crypto => Trend::up(2),
                Asset::Oil => Trend::down(1),
                Asset::RealEstate => Trend::up(1),
            },
            GameMode::BullRun => Trend::up(2),
            GameMode::Meltdown => match asset {
                // Safe havens hold up even in a meltdown.
                Asset::Gold | Asset::Bonds => Trend::up(1),
                _ => Trend::down(2),
            },
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Classic => f.write_str("classic"),
            GameMode::BullRun => f.write_str("bull_run"),
            GameMode::Meltdown => f.write_str("meltdown"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "bull_run" | "bullrun" | "bull-run" => Ok(GameMode::BullRun),
            "meltdown" => Ok(GameMode::Meltdown),
            other => Err(format!(
                "unknown game mode '{other}' (classic|bull_run|meltdown)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_tables_are_valid() {
        for difficulty in Difficulty::ALL {
            let s = difficulty.settings();
            assert!(s.starting_cash.is_positive());
            assert!(s.update_interval_secs > 0);
            assert!(s.volatility_multiplier > 0.0);
            assert!((0.0..=1.0).contains(&s.market_crash_probability));
            assert!(s.rounds > 0);
        }
    }

    #[test]
    fn test_harder_means_faster_and_riskier() {
        let easy = Difficulty::Easy.settings();
        let hard = Difficulty::Hard.settings();
        assert!(hard.update_interval_secs < easy.update_interval_secs);
        assert!(hard.market_crash_probability > easy.market_crash_probability);
        assert!(hard.volatility_multiplier > easy.volatility_multiplier);
        assert!(hard.starting_cash < easy.starting_cash);
    }

    #[test]
    fn test_mode_starting_trends() {
        for asset in Asset::ALL {
            assert_eq!(GameMode::BullRun.starting_trend(asset), Trend::up(2));
        }
        assert_eq!(
            GameMode::Meltdown.starting_trend(Asset::Stocks),
            Trend::down(2)
        );
        assert_eq!(GameMode::Meltdown.starting_trend(Asset::Gold), Trend::up(1));
    }

    #[test]
    fn test_round_trip_parse() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        for mode in GameMode::ALL {
            assert_eq!(mode.to_string().parse::<GameMode>(), Ok(mode));
        }
    }
}
