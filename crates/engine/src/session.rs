//! The game session: one owned value wiring market, news, ledger, stats,
//! scheduler, and achievements together behind a small entry-point surface.
//!
//! Sessions are plain values. Two sessions never share state, and a session
//! built from the same config and seed replays the same game second for
//! second.

use std::collections::HashSet;

use achievements::{Achievement, ProgressSnapshot, newly_unlocked};
use market::{Market, MarketConfig, PriceUpdate};
use news::{NewsEvent, NewsGenerator, NewsGeneratorConfig};
use portfolio::{GameStats, Ledger, TradeReceipt, TradeSpec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use types::{Asset, Cash, Difficulty, GameMode, Price, Quantity};

use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::scheduler::{DueAction, Phase, RoundScheduler};
use crate::snapshot::{AssetSnapshot, SessionSnapshot};

/// Something observable that happened during a simulated second (or a trade
/// between seconds). Events come out of [`GameSession::step`] in the order
/// they occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEvent {
    SessionStarted {
        difficulty: Difficulty,
        mode: GameMode,
        starting_cash: Cash,
    },
    RoundStarted {
        round: u32,
    },
    RoundCompleted {
        round: u32,
    },
    MarketUpdated {
        updates: Vec<PriceUpdate>,
    },
    NewsPublished {
        event: NewsEvent,
    },
    NewsImpactApplied {
        headline: String,
        updates: Vec<PriceUpdate>,
        is_crash: bool,
    },
    AchievementsUnlocked {
        achievements: Vec<Achievement>,
    },
    GameCompleted {
        final_value: Cash,
    },
}

pub struct GameSession {
    config: SessionConfig,
    market: Market,
    news: NewsGenerator,
    ledger: Ledger,
    stats: GameStats,
    scheduler: RoundScheduler,
    unlocked: HashSet<Achievement>,
    current_news: Option<NewsEvent>,
    starting_cash: Cash,
    /// Events produced between steps (trade-triggered unlocks), drained by
    /// the next `step()`.
    queued: Vec<SessionEvent>,
}

impl GameSession {
    /// Builds a session from a validated config. The session seed is split
    /// into independent market and news seeds so the two streams never
    /// entangle.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut seeder = StdRng::seed_from_u64(config.seed);
        let market_seed: u64 = seeder.random();
        let news_seed: u64 = seeder.random();

        let settings = config.settings();
        let mode_settings = config.mode.settings();
        let mut market_config = MarketConfig::default()
            .with_universe(config.universe.clone())
            .with_volatility_multiplier(settings.volatility_multiplier)
            .with_price_modifier(mode_settings.price_modifier);
        for &asset in &config.universe {
            market_config =
                market_config.with_starting_trend(asset, config.mode.starting_trend(asset));
        }

        let news_config = NewsGeneratorConfig::default()
            .with_mode(config.mode)
            .with_universe(config.universe.clone())
            .with_crash_probability(config.crash_probability());

        let starting_cash = config.starting_cash();
        let scheduler = RoundScheduler::new(config.total_rounds(), config.update_interval_secs());

        Ok(Self {
            market: Market::new(market_config, market_seed),
            news: NewsGenerator::new(news_config, news_seed),
            ledger: Ledger::new(starting_cash),
            stats: GameStats::default(),
            scheduler,
            unlocked: HashSet::new(),
            current_news: None,
            starting_cash,
            queued: Vec::new(),
            config,
        })
    }

    // ------------------------------------------------------------------
    // Clock control
    // ------------------------------------------------------------------

    /// Starts the game: round 1 opens and its news event is published.
    /// Calling again once started does nothing and returns no events.
    pub fn start(&mut self) -> Vec<SessionEvent> {
        if !self.scheduler.start() {
            return Vec::new();
        }
        info!(
            "session started: {} {} with {}",
            self.config.difficulty, self.config.mode, self.starting_cash
        );
        let mut events = vec![
            SessionEvent::SessionStarted {
                difficulty: self.config.difficulty,
                mode: self.config.mode,
                starting_cash: self.starting_cash,
            },
            SessionEvent::RoundStarted { round: 1 },
        ];
        self.publish_news(&mut events);
        events
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    /// Advances the virtual clock by one second and returns everything that
    /// happened, including events queued by trades since the last step.
    /// A no-op (returning only queued events) unless the session is running.
    pub fn step(&mut self) -> Vec<SessionEvent> {
        let mut events = std::mem::take(&mut self.queued);
        for action in self.scheduler.tick() {
            match action {
                DueAction::ImpactDue(event) => self.apply_news_impact(event, &mut events),
                DueAction::MarketUpdate => {
                    let updates = self.market.update_prices();
                    events.push(SessionEvent::MarketUpdated { updates });
                    self.evaluate_achievements(None, &mut events);
                }
                DueAction::RoundAdvanced { completed, next } => {
                    info!("round {completed} complete, round {next} begins");
                    self.stats.on_round_advanced();
                    events.push(SessionEvent::RoundCompleted { round: completed });
                    events.push(SessionEvent::RoundStarted { round: next });
                    self.publish_news(&mut events);
                }
                DueAction::GameCompleted => {
                    let final_value = self.portfolio_value();
                    info!("game complete, final portfolio value {final_value}");
                    self.evaluate_achievements(None, &mut events);
                    events.push(SessionEvent::GameCompleted { final_value });
                }
            }
        }
        events
    }

    /// Steps the clock `seconds` times, collecting every event in order.
    pub fn run(&mut self, seconds: u32) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for _ in 0..seconds {
            events.extend(self.step());
        }
        events
    }

    // ------------------------------------------------------------------
    // Trading
    // ------------------------------------------------------------------

    pub fn buy(&mut self, asset: Asset, spec: TradeSpec) -> Result<TradeReceipt, SessionError> {
        let price = self.trading_price(asset)?;
        let receipt = self.ledger.buy(asset, spec, price)?;
        self.settle(receipt);
        Ok(receipt)
    }

    pub fn sell(&mut self, asset: Asset, spec: TradeSpec) -> Result<TradeReceipt, SessionError> {
        let price = self.trading_price(asset)?;
        let receipt = self.ledger.sell(asset, spec, price)?;
        self.settle(receipt);
        Ok(receipt)
    }

    pub fn open_short(
        &mut self,
        asset: Asset,
        cash_fraction: f64,
    ) -> Result<TradeReceipt, SessionError> {
        let price = self.trading_price(asset)?;
        let receipt = self.ledger.open_short(asset, cash_fraction, price)?;
        self.settle(receipt);
        Ok(receipt)
    }

    pub fn close_short(&mut self, asset: Asset) -> Result<TradeReceipt, SessionError> {
        let price = self.trading_price(asset)?;
        let receipt = self.ledger.close_short(asset, price)?;
        self.settle(receipt);
        Ok(receipt)
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn current_news(&self) -> Option<&NewsEvent> {
        self.current_news.as_ref()
    }

    pub fn portfolio_value(&self) -> Cash {
        self.ledger.value(&self.market.prices())
    }

    /// Unlocked achievements in catalog order.
    pub fn unlocked_achievements(&self) -> Vec<Achievement> {
        Achievement::ALL
            .into_iter()
            .filter(|a| self.unlocked.contains(a))
            .collect()
    }

    /// Owned, read-only view of the whole game state for display layers.
    pub fn snapshot(&self) -> SessionSnapshot {
        let prices = self.market.prices();
        let mut assets = Vec::with_capacity(self.market.universe().len());
        for &asset in self.market.universe() {
            let Some(price) = self.market.price(asset) else {
                continue;
            };
            let history = self
                .market
                .history(asset)
                .map(|h| h.iter().copied().collect())
                .unwrap_or_default();
            let position = self.ledger.position(asset);
            assets.push(AssetSnapshot {
                asset,
                price,
                history,
                trend: self.market.trend(asset).unwrap_or_default(),
                quantity: position.map(|p| p.quantity).unwrap_or(Quantity::ZERO),
                cost_basis: position.map(|p| p.cost_basis).unwrap_or(Cash::ZERO),
                short: self.ledger.short(asset).copied(),
            });
        }

        SessionSnapshot {
            phase: self.scheduler.phase(),
            difficulty: self.config.difficulty,
            mode: self.config.mode,
            round: self.scheduler.round(),
            total_rounds: self.scheduler.total_rounds(),
            round_timer: self.scheduler.round_timer(),
            market_timer: self.scheduler.market_timer(),
            cash: self.ledger.cash(),
            portfolio_value: self.ledger.value(&prices),
            assets,
            current_news: self.current_news.clone(),
            stats: self.stats.clone(),
            unlocked: self.unlocked_achievements(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn trading_price(&self, asset: Asset) -> Result<Price, SessionError> {
        if !self.scheduler.is_running() {
            return Err(SessionError::NotRunning);
        }
        self.market
            .price(asset)
            .ok_or(SessionError::UnknownAsset { asset })
    }

    /// Post-trade bookkeeping: stats, log line, achievement check. Unlocks
    /// are queued so the next `step()` surfaces them in order.
    fn settle(&mut self, receipt: TradeReceipt) {
        debug!(
            "{:?} {} at {}: cash flow {}",
            receipt.side, receipt.asset, receipt.price, receipt.cash_flow
        );
        self.stats.record(&receipt);
        let mut events = Vec::new();
        self.evaluate_achievements(Some(receipt), &mut events);
        self.queued.extend(events);
    }

    fn publish_news(&mut self, events: &mut Vec<SessionEvent>) {
        if let Some(event) = self.news.draw() {
            debug!("news published: {}", event.headline);
            self.scheduler.schedule_impact(event.clone());
            self.current_news = Some(event.clone());
            events.push(SessionEvent::NewsPublished { event });
        }
    }

    fn apply_news_impact(&mut self, event: NewsEvent, events: &mut Vec<SessionEvent>) {
        let updates = self.market.apply_impact(&event.impact);
        if event.is_crash {
            info!("market crash hit: {}", event.headline);
            self.stats.on_crash_weathered();
        }
        events.push(SessionEvent::NewsImpactApplied {
            headline: event.headline.clone(),
            updates,
            is_crash: event.is_crash,
        });
        self.evaluate_achievements(None, events);
    }

    fn evaluate_achievements(
        &mut self,
        last_receipt: Option<TradeReceipt>,
        events: &mut Vec<SessionEvent>,
    ) {
        let prices = self.market.prices();
        let progress = ProgressSnapshot {
            ledger: &self.ledger,
            stats: &self.stats,
            prices: &prices,
            universe: self.market.universe(),
            round: self.scheduler.round(),
            total_rounds: self.scheduler.total_rounds(),
            starting_cash: self.starting_cash,
            game_over: self.scheduler.phase() == Phase::GameComplete,
            last_receipt,
        };
        let newly = newly_unlocked(&progress, &self.unlocked);
        if !newly.is_empty() {
            for achievement in &newly {
                info!("achievement unlocked: {}", achievement.title());
            }
            self.unlocked.extend(newly.iter().copied());
            events.push(SessionEvent::AchievementsUnlocked {
                achievements: newly,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let config = SessionConfig::default().with_universe(Vec::new());
        assert!(matches!(
            GameSession::new(config),
            Err(ConfigError::EmptyUniverse)
        ));
    }

    #[test]
    fn test_start_opens_round_one_with_news() {
        let mut session = GameSession::new(SessionConfig::default()).unwrap();
        let events = session.start();

        assert!(matches!(events[0], SessionEvent::SessionStarted { .. }));
        assert_eq!(events[1], SessionEvent::RoundStarted { round: 1 });
        assert!(matches!(events[2], SessionEvent::NewsPublished { .. }));
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.current_news().is_some());

        // A second start is a no-op.
        assert!(session.start().is_empty());
    }

    #[test]
    fn test_trades_rejected_unless_running() {
        let mut session = GameSession::new(SessionConfig::default()).unwrap();
        let err = session
            .buy(Asset::Stocks, TradeSpec::Fraction(0.5))
            .unwrap_err();
        assert_eq!(err, SessionError::NotRunning);

        session.start();
        session.pause();
        let err = session
            .buy(Asset::Stocks, TradeSpec::Fraction(0.5))
            .unwrap_err();
        assert_eq!(err, SessionError::NotRunning);

        session.resume();
        assert!(session.buy(Asset::Stocks, TradeSpec::Fraction(0.5)).is_ok());
    }

    #[test]
    fn test_asset_outside_universe_rejected() {
        let config = SessionConfig::default().with_universe(vec![Asset::Stocks, Asset::Gold]);
        let mut session = GameSession::new(config).unwrap();
        session.start();

        let err = session
            .buy(Asset::Oil, TradeSpec::Fraction(0.1))
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownAsset { asset: Asset::Oil });
    }

    #[test]
    fn test_ledger_errors_pass_through() {
        let mut session = GameSession::new(SessionConfig::default()).unwrap();
        session.start();
        let err = session
            .sell(Asset::Stocks, TradeSpec::Fraction(0.5))
            .unwrap_err();
        assert!(matches!(err, SessionError::Ledger(_)));
    }
}
