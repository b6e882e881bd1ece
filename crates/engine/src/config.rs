//! Session configuration options.

use std::collections::HashSet;

use types::{Asset, Cash, Difficulty, DifficultySettings, GameMode};

use crate::error::ConfigError;

/// Configuration for one game session.
///
/// Difficulty and mode supply the baseline numbers; the `Option` fields
/// override individual values for custom games and tests.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub mode: GameMode,

    /// Assets the player can trade this game.
    pub universe: Vec<Asset>,

    /// Seed for both the price RNG and the news RNG. Same seed, same game.
    pub seed: u64,

    /// Override the difficulty's starting cash.
    pub starting_cash: Option<Cash>,

    /// Override the difficulty's round count.
    pub total_rounds: Option<u32>,

    /// Override the difficulty's market update interval, in seconds.
    pub update_interval_secs: Option<u32>,

    /// Override the difficulty's per-draw crash probability.
    pub crash_probability: Option<f64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            mode: GameMode::Classic,
            universe: Asset::default_universe(),
            seed: 0,
            starting_cash: None,
            total_rounds: None,
            update_interval_secs: None,
            crash_probability: None,
        }
    }
}

impl SessionConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_universe(mut self, universe: Vec<Asset>) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_starting_cash(mut self, cash: Cash) -> Self {
        self.starting_cash = Some(cash);
        self
    }

    pub fn with_total_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = Some(rounds);
        self
    }

    pub fn with_update_interval(mut self, seconds: u32) -> Self {
        self.update_interval_secs = Some(seconds);
        self
    }

    pub fn with_crash_probability(mut self, probability: f64) -> Self {
        self.crash_probability = Some(probability);
        self
    }

    /// The difficulty's baseline settings table entry.
    pub fn settings(&self) -> DifficultySettings {
        self.difficulty.settings()
    }

    pub fn starting_cash(&self) -> Cash {
        self.starting_cash.unwrap_or(self.settings().starting_cash)
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds.unwrap_or(self.settings().rounds)
    }

    pub fn update_interval_secs(&self) -> u32 {
        self.update_interval_secs
            .unwrap_or(self.settings().update_interval_secs)
    }

    pub fn crash_probability(&self) -> f64 {
        self.crash_probability
            .unwrap_or(self.settings().market_crash_probability)
    }

    /// Rejects configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.universe.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }
        let mut seen = HashSet::new();
        for &asset in &self.universe {
            if !seen.insert(asset) {
                return Err(ConfigError::DuplicateAsset(asset));
            }
        }
        if self.total_rounds() == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.update_interval_secs() == 0 {
            return Err(ConfigError::ZeroUpdateInterval);
        }
        let crash = self.crash_probability();
        if !(0.0..=1.0).contains(&crash) {
            return Err(ConfigError::CrashProbability(crash));
        }
        let cash = self.starting_cash();
        if !cash.is_positive() {
            return Err(ConfigError::NonPositiveStartingCash(cash));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_overrides_shadow_difficulty_values() {
        let config = SessionConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_starting_cash(Cash(5_000.0))
            .with_total_rounds(3);

        assert_eq!(config.starting_cash(), Cash(5_000.0));
        assert_eq!(config.total_rounds(), 3);
        // Unoverridden values still come from the difficulty table.
        assert_eq!(config.update_interval_secs(), 8);
        assert_eq!(config.crash_probability(), 0.10);
    }

    #[test]
    fn test_validation_failures() {
        let empty = SessionConfig::default().with_universe(Vec::new());
        assert_eq!(empty.validate(), Err(ConfigError::EmptyUniverse));

        let duplicated =
            SessionConfig::default().with_universe(vec![Asset::Gold, Asset::Oil, Asset::Gold]);
        assert_eq!(
            duplicated.validate(),
            Err(ConfigError::DuplicateAsset(Asset::Gold))
        );

        let zero_rounds = SessionConfig::default().with_total_rounds(0);
        assert_eq!(zero_rounds.validate(), Err(ConfigError::ZeroRounds));

        let zero_interval = SessionConfig::default().with_update_interval(0);
        assert_eq!(zero_interval.validate(), Err(ConfigError::ZeroUpdateInterval));

        let bad_crash = SessionConfig::default().with_crash_probability(1.5);
        assert_eq!(
            bad_crash.validate(),
            Err(ConfigError::CrashProbability(1.5))
        );

        let broke = SessionConfig::default().with_starting_cash(Cash::ZERO);
        assert_eq!(
            broke.validate(),
            Err(ConfigError::NonPositiveStartingCash(Cash::ZERO))
        );
    }
}
