//! Seeded event generator.
//!
//! The generator owns its RNG, so two generators built from the same config
//! and seed produce identical event streams. Callers decide *when* to draw;
//! the generator only decides *what* comes out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use types::{Asset, GameMode};

use crate::catalog;
use crate::events::NewsEvent;

/// Chance that any given draw is the market crash instead of a normal event.
pub const DEFAULT_CRASH_PROBABILITY: f64 = 0.05;

/// Chance that the mode's bonus events join the candidate pool on a draw.
pub const BONUS_EVENT_PROBABILITY: f64 = 0.35;

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewsGeneratorConfig {
    pub mode: GameMode,
    /// Assets the player can trade; events touching none of them are culled.
    pub universe: Vec<Asset>,
    pub crash_probability: f64,
    pub bonus_probability: f64,
}

impl Default for NewsGeneratorConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            universe: Asset::default_universe(),
            crash_probability: DEFAULT_CRASH_PROBABILITY,
            bonus_probability: BONUS_EVENT_PROBABILITY,
        }
    }
}

impl NewsGeneratorConfig {
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_universe(mut self, universe: Vec<Asset>) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_crash_probability(mut self, probability: f64) -> Self {
        self.crash_probability = probability;
        self
    }

    pub fn with_bonus_probability(mut self, probability: f64) -> Self {
        self.bonus_probability = probability;
        self
    }

    /// Preset with crashes turned off, for calm scenarios and tests.
    pub fn no_crashes(self) -> Self {
        self.with_crash_probability(0.0)
    }
}

// ============================================================================
// Generator
// ============================================================================

pub struct NewsGenerator {
    standard: Vec<NewsEvent>,
    bonus: Vec<NewsEvent>,
    crash: NewsEvent,
    crash_probability: f64,
    bonus_probability: f64,
    rng: StdRng,
}

impl NewsGenerator {
    pub fn new(config: NewsGeneratorConfig, seed: u64) -> Self {
        let standard = catalog::standard_events()
            .into_iter()
            .filter(|e| e.touches_any(&config.universe))
            .collect();
        let bonus = catalog::bonus_events(config.mode)
            .into_iter()
            .filter(|e| e.touches_any(&config.universe))
            .collect();
        Self {
            standard,
            bonus,
            crash: catalog::crash_event(),
            crash_probability: config.crash_probability.clamp(0.0, 1.0),
            bonus_probability: config.bonus_probability.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws the next event: crash roll first, then a uniform pick over the
    /// candidate pool. The mode's bonus events join the pool per-draw with
    /// the configured probability; the standard table is always in it.
    ///
    /// Returns `None` only when no standard catalog event touches the
    /// universe.
    pub fn draw(&mut self) -> Option<NewsEvent> {
        if self.rng.random::<f64>() < self.crash_probability {
            return Some(self.crash.clone());
        }
        let with_bonus = !self.bonus.is_empty() && self.rng.random_bool(self.bonus_probability);
        let pool_len = self.standard.len() + if with_bonus { self.bonus.len() } else { 0 };
        if pool_len == 0 {
            return None;
        }
        let index = self.rng.random_range(0..pool_len);
        let event = if index < self.standard.len() {
            &self.standard[index]
        } else {
            &self.bonus[index - self.standard.len()]
        };
        Some(event.clone())
    }
}
