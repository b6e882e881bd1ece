//! Price evolution under organic drift and news impacts.
//!
//! Trend dynamics live here too: the trend state is consumed by the price
//! update that reads it, then mutated for the next tick, so the two models
//! stay in lockstep.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::{Asset, MAX_TREND_STRENGTH, MIN_TREND_STRENGTH, Price, Trend};

use crate::series::PriceSeries;

/// News multiplier above which the trend is forced upward.
const IMPACT_UP_THRESHOLD: f64 = 1.02;
/// News multiplier below which the trend is forced downward.
const IMPACT_DOWN_THRESHOLD: f64 = 0.98;
/// Trend strength gained per 5% of news impact magnitude.
const IMPACT_STRENGTH_SCALE: f64 = 20.0;
/// Base probability of an organic trend reversal per update.
const BASE_FLIP_PROBABILITY: f64 = 0.10;
/// Additional reversal probability per unit of asset volatility.
const FLIP_VOLATILITY_WEIGHT: f64 = 0.5;
/// Probability of a ±1 strength nudge per organic update.
const STRENGTH_NUDGE_PROBABILITY: f64 = 0.3;

// =============================================================================
// Config
// =============================================================================

/// Construction parameters for a [`Market`].
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Assets traded this session, in a fixed order (the order also fixes the
    /// RNG draw sequence, so it is part of determinism).
    pub universe: Vec<Asset>,
    /// Difficulty scaling applied to drift and noise.
    pub volatility_multiplier: f64,
    /// Game-mode scaling applied to the drift term only.
    pub price_modifier: f64,
    /// Opening trends; assets not listed start at [`Trend::default`].
    pub starting_trends: Vec<(Asset, Trend)>,
    /// Opening price overrides; assets not listed use [`Asset::initial_price`].
    pub initial_prices: Vec<(Asset, Price)>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            universe: Asset::default_universe(),
            volatility_multiplier: 1.0,
            price_modifier: 1.0,
            starting_trends: Vec::new(),
            initial_prices: Vec::new(),
        }
    }
}

impl MarketConfig {
    pub fn with_universe(mut self, universe: Vec<Asset>) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_volatility_multiplier(mut self, multiplier: f64) -> Self {
        self.volatility_multiplier = multiplier;
        self
    }

    pub fn with_price_modifier(mut self, modifier: f64) -> Self {
        self.price_modifier = modifier;
        self
    }

    pub fn with_starting_trend(mut self, asset: Asset, trend: Trend) -> Self {
        self.starting_trends.push((asset, trend));
        self
    }

    pub fn with_initial_price(mut self, asset: Asset, price: Price) -> Self {
        self.initial_prices.push((asset, price));
        self
    }
}

// =============================================================================
// Market
// =============================================================================

/// One repriced asset, as reported to callers after an update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub asset: Asset,
    pub price: Price,
    pub change_percent: f64,
}

/// Per-asset price series and trends, advanced by organic updates or forced
/// by news impacts. Owns a seeded RNG so identically-seeded markets replay
/// identically.
#[derive(Debug, Clone)]
pub struct Market {
    universe: Vec<Asset>,
    series: HashMap<Asset, PriceSeries>,
    trends: HashMap<Asset, Trend>,
    volatility_multiplier: f64,
    price_modifier: f64,
    rng: StdRng,
}

impl Market {
    pub fn new(config: MarketConfig, seed: u64) -> Self {
        let mut series = HashMap::with_capacity(config.universe.len());
        let mut trends = HashMap::with_capacity(config.universe.len());
        for &asset in &config.universe {
            let opening = config
                .initial_prices
                .iter()
                .find(|(a, _)| *a == asset)
                .map(|&(_, price)| price)
                .unwrap_or_else(|| asset.initial_price());
            series.insert(asset, PriceSeries::new(opening.clamp_floor()));

            let trend = config
                .starting_trends
                .iter()
                .find(|(a, _)| *a == asset)
                .map(|&(_, trend)| trend)
                .unwrap_or_default();
            trends.insert(asset, trend);
        }
        Self {
            universe: config.universe,
            series,
            trends,
            volatility_multiplier: config.volatility_multiplier,
            price_modifier: config.price_modifier,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Assets traded in this market, in update order.
    pub fn universe(&self) -> &[Asset] {
        &self.universe
    }

    /// Current price, if the asset trades here.
    pub fn price(&self, asset: Asset) -> Option<Price> {
        self.series.get(&asset).map(PriceSeries::current)
    }

    /// Rolling price window, oldest first.
    pub fn history(&self, asset: Asset) -> Option<&std::collections::VecDeque<Price>> {
        self.series.get(&asset).map(PriceSeries::history)
    }

    /// Current trend, if the asset trades here.
    pub fn trend(&self, asset: Asset) -> Option<Trend> {
        self.trends.get(&asset).copied()
    }

    /// Owned snapshot of every current price, for valuation.
    pub fn prices(&self) -> HashMap<Asset, Price> {
        self.series
            .iter()
            .map(|(&asset, series)| (asset, series.current()))
            .collect()
    }

    /// Organic update for every asset in universe order.
    ///
    /// Per asset the draw sequence is: noise, reversal roll, (strength redraw
    /// on reversal), nudge roll, (nudge direction). Keeping that sequence
    /// fixed is what makes seeded runs reproducible.
    pub fn update_prices(&mut self) -> Vec<PriceUpdate> {
        let mut updates = Vec::with_capacity(self.universe.len());
        for i in 0..self.universe.len() {
            let asset = self.universe[i];
            let volatility = asset.base_volatility();
            let trend = self.trends.get(&asset).copied().unwrap_or_default();

            // Drift from the trend in force, then random noise on top.
            let base_change = trend.signed_strength()
                * volatility
                * 100.0
                * self.volatility_multiplier
                * self.price_modifier;
            let noise =
                (self.rng.random::<f64>() - 0.5) * volatility * 100.0 * self.volatility_multiplier;
            let change_percent = base_change + noise;

            let Some(series) = self.series.get_mut(&asset) else {
                continue;
            };
            let new_price =
                Price::from_float(series.current().to_float() * (1.0 + change_percent / 100.0))
                    .clamp_floor();
            series.record(new_price);

            let next = organic_trend_step(&mut self.rng, trend, volatility);
            self.trends.insert(asset, next);

            updates.push(PriceUpdate {
                asset,
                price: new_price,
                change_percent,
            });
        }
        updates
    }

    /// Force prices via news multipliers. Assets outside this market are
    /// ignored. Mutually exclusive with an organic update for a given tick:
    /// the scheduler never issues both paths for the same second's repricing
    /// of one asset.
    pub fn apply_impact(&mut self, impacts: &[(Asset, f64)]) -> Vec<PriceUpdate> {
        let mut updates = Vec::with_capacity(impacts.len());
        for &(asset, multiplier) in impacts {
            let Some(series) = self.series.get_mut(&asset) else {
                continue;
            };
            let new_price =
                Price::from_float(series.current().to_float() * multiplier).clamp_floor();
            series.record(new_price);

            if let Some(trend) = self.trends.get_mut(&asset) {
                *trend = trend_after_impact(*trend, multiplier);
            }

            updates.push(PriceUpdate {
                asset,
                price: new_price,
                change_percent: (multiplier - 1.0) * 100.0,
            });
        }
        updates
    }
}

// =============================================================================
// Trend dynamics
// =============================================================================

/// Trend resulting from a news impact.
///
/// Material moves (beyond ±2%) force the trend into the move's direction with
/// strength proportional to magnitude; marginal moves just bleed one notch of
/// strength from whatever trend was in force.
pub fn trend_after_impact(trend: Trend, multiplier: f64) -> Trend {
    if multiplier > IMPACT_UP_THRESHOLD {
        Trend::up(impact_strength(multiplier - 1.0))
    } else if multiplier < IMPACT_DOWN_THRESHOLD {
        Trend::down(impact_strength(1.0 - multiplier))
    } else {
        trend.weakened()
    }
}

fn impact_strength(magnitude: f64) -> u8 {
    (magnitude * IMPACT_STRENGTH_SCALE)
        .ceil()
        .min(MAX_TREND_STRENGTH as f64) as u8
}

/// One organic step of the trend walk: possible reversal with redrawn
/// strength, then an independent ±1 strength nudge.
fn organic_trend_step(rng: &mut StdRng, trend: Trend, volatility: f64) -> Trend {
    let mut next = trend;

    let flip_probability = BASE_FLIP_PROBABILITY + volatility * FLIP_VOLATILITY_WEIGHT;
    if rng.random_bool(flip_probability) {
        let strength = rng.random_range(MIN_TREND_STRENGTH..=MAX_TREND_STRENGTH);
        next = Trend::new(trend.direction.flipped(), strength);
    }

    if rng.random_bool(STRENGTH_NUDGE_PROBABILITY) {
        let strength = if rng.random_bool(0.5) {
            next.strength.saturating_add(1)
        } else {
            next.strength.saturating_sub(1)
        };
        next = Trend::new(next.direction, strength);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PRICE_HISTORY_WINDOW;
    use types::TrendDirection;

    fn stocks_market(seed: u64) -> Market {
        Market::new(
            MarketConfig::default().with_universe(vec![Asset::Stocks]),
            seed,
        )
    }

    #[test]
    fn test_deterministic_updates() {
        let mut a = Market::new(MarketConfig::default(), 99);
        let mut b = Market::new(MarketConfig::default(), 99);
        for _ in 0..30 {
            assert_eq!(a.update_prices(), b.update_prices());
        }
        assert_eq!(a.prices(), b.prices());
    }

    #[test]
    fn test_update_arithmetic_is_consistent() {
        let mut market = Market::new(MarketConfig::default(), 7);
        for _ in 0..20 {
            let before = market.prices();
            for update in market.update_prices() {
                let prior = before[&update.asset].to_float();
                let expected =
                    Price::from_float(prior * (1.0 + update.change_percent / 100.0)).clamp_floor();
                assert_eq!(update.price, expected);
                assert!(update.price >= Price::FLOOR);
            }
        }
    }

    #[test]
    fn test_zero_volatility_multiplier_freezes_prices() {
        let mut market = Market::new(MarketConfig::default().with_volatility_multiplier(0.0), 3);
        let opening = market.prices();
        for _ in 0..15 {
            for update in market.update_prices() {
                assert_eq!(update.change_percent, 0.0);
            }
        }
        assert_eq!(market.prices(), opening);
    }

    #[test]
    fn test_zero_price_modifier_leaves_only_noise() {
        // No drift: every move must fit inside the noise band.
        let bound = Asset::Stocks.base_volatility() * 100.0 * 0.5;
        let mut market = Market::new(
            MarketConfig::default()
                .with_universe(vec![Asset::Stocks])
                .with_price_modifier(0.0),
            11,
        );
        for _ in 0..50 {
            for update in market.update_prices() {
                assert!(update.change_percent.abs() <= bound + 1e-12);
            }
        }
    }

    #[test]
    fn test_news_impact_reprices_and_flips_trend() {
        let mut market = stocks_market(1);
        let updates = market.apply_impact(&[(Asset::Stocks, 0.70)]);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].price, 168);
        assert!((updates[0].change_percent + 30.0).abs() < 1e-9);
        assert_eq!(market.trend(Asset::Stocks), Some(Trend::down(3)));
    }

    #[test]
    fn test_price_floor_holds_under_repeated_impacts() {
        let mut market = Market::new(
            MarketConfig::default()
                .with_universe(vec![Asset::Oil])
                .with_initial_price(Asset::Oil, Price(2)),
            5,
        );
        for _ in 0..4 {
            market.apply_impact(&[(Asset::Oil, 0.4)]);
            assert!(market.price(Asset::Oil).unwrap() >= Price::FLOOR);
        }
        assert_eq!(market.price(Asset::Oil), Some(Price::FLOOR));
    }

    #[test]
    fn test_history_bounded_under_updates() {
        let mut market = stocks_market(13);
        for _ in 0..40 {
            market.update_prices();
            let history = market.history(Asset::Stocks).unwrap();
            assert!(history.len() <= PRICE_HISTORY_WINDOW);
            assert_eq!(history.back().copied(), market.price(Asset::Stocks));
        }
    }

    #[test]
    fn test_impact_outside_universe_is_ignored() {
        let mut market = Market::new(MarketConfig::default(), 2);
        let updates = market.apply_impact(&[(Asset::Oil, 0.5)]);
        assert!(updates.is_empty());
        assert_eq!(market.price(Asset::Oil), None);
    }

    #[test]
    fn test_trend_classification_bands() {
        let prior = Trend::up(2);
        // Marginal moves bleed strength, keeping direction.
        assert_eq!(trend_after_impact(prior, 1.01), Trend::up(1));
        assert_eq!(trend_after_impact(prior, 1.02), Trend::up(1));
        assert_eq!(trend_after_impact(Trend::down(3), 0.99), Trend::down(2));
        // Material moves force direction with magnitude-scaled strength.
        assert_eq!(trend_after_impact(prior, 1.15), Trend::up(3));
        assert_eq!(trend_after_impact(prior, 0.94), Trend::down(2));
        let crashed = trend_after_impact(prior, 0.70);
        assert_eq!(crashed.direction, TrendDirection::Down);
        assert_eq!(crashed.strength, MAX_TREND_STRENGTH);
    }

    #[test]
    fn test_starting_trend_override() {
        let market = Market::new(
            MarketConfig::default().with_starting_trend(Asset::Gold, Trend::down(3)),
            0,
        );
        assert_eq!(market.trend(Asset::Gold), Some(Trend::down(3)));
        assert_eq!(market.trend(Asset::Stocks), Some(Trend::default()));
    }
}
