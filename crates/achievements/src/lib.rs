//! Achievement catalog and the stateless evaluator that unlocks them.
//!
//! Predicates read a [`ProgressSnapshot`] and never mutate anything; the
//! session owns the unlocked set and asks after every trade and market tick
//! which achievements are newly earned.

use std::collections::{HashMap, HashSet};

use portfolio::{GameStats, Ledger, TradeReceipt, TradeSide};
use serde::{Deserialize, Serialize};
use types::{Asset, Cash, Price};

/// Portfolio value that earns `HighRoller`.
pub const HIGH_ROLLER_VALUE: Cash = Cash(15_000.0);

/// Trades within a single round that earn `DayTrader`.
pub const DAY_TRADER_TRADES: u32 = 5;

/// Total return at game end that earns `SteadyGains`.
pub const STEADY_GAINS_RETURN: f64 = 0.10;

/// Share of portfolio value in one asset that counts as `AllIn`.
const ALL_IN_SHARE: f64 = 0.5;

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstProfit,
    Diversified,
    AllIn,
    HighRoller,
    DayTrader,
    BearHunter,
    CrashSurvivor,
    SteadyGains,
}

impl Achievement {
    pub const ALL: [Achievement; 8] = [
        Achievement::FirstProfit,
        Achievement::Diversified,
        Achievement::AllIn,
        Achievement::HighRoller,
        Achievement::DayTrader,
        Achievement::BearHunter,
        Achievement::CrashSurvivor,
        Achievement::SteadyGains,
    ];

    /// Stable identifier used in save files.
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstProfit => "first_profit",
            Achievement::Diversified => "diversified",
            Achievement::AllIn => "all_in",
            Achievement::HighRoller => "high_roller",
            Achievement::DayTrader => "day_trader",
            Achievement::BearHunter => "bear_hunter",
            Achievement::CrashSurvivor => "crash_survivor",
            Achievement::SteadyGains => "steady_gains",
        }
    }

    pub fn from_id(id: &str) -> Option<Achievement> {
        Achievement::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstProfit => "First Profit",
            Achievement::Diversified => "Diversified",
            Achievement::AllIn => "All In",
            Achievement::HighRoller => "High Roller",
            Achievement::DayTrader => "Day Trader",
            Achievement::BearHunter => "Bear Hunter",
            Achievement::CrashSurvivor => "Crash Survivor",
            Achievement::SteadyGains => "Steady Gains",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstProfit => "Close your first trade at a profit",
            Achievement::Diversified => "Hold every tradable asset at once",
            Achievement::AllIn => "Put more than half your portfolio into one asset",
            Achievement::HighRoller => "Grow your portfolio past $15,000",
            Achievement::DayTrader => "Execute five trades in a single round",
            Achievement::BearHunter => "Close a short position at a profit",
            Achievement::CrashSurvivor => "Weather a market crash and stay above water",
            Achievement::SteadyGains => "Finish the game up at least 10%",
        }
    }

    fn satisfied(self, progress: &ProgressSnapshot<'_>) -> bool {
        match self {
            Achievement::FirstProfit => progress.stats.profitable_trades >= 1,
            Achievement::Diversified => progress
                .universe
                .iter()
                .all(|&asset| !progress.ledger.quantity(asset).is_zero()),
            Achievement::AllIn => {
                let total = progress.value();
                if !total.is_positive() {
                    return false;
                }
                progress.universe.iter().any(|&asset| {
                    progress
                        .ledger
                        .position(asset)
                        .zip(progress.prices.get(&asset))
                        .map(|(position, &price)| position.market_value(price))
                        .is_some_and(|held| held.raw() > total.raw() * ALL_IN_SHARE)
                })
            }
            Achievement::HighRoller => progress.value() >= HIGH_ROLLER_VALUE,
            Achievement::DayTrader => progress.stats.trades_this_round >= DAY_TRADER_TRADES,
            Achievement::BearHunter => progress.last_receipt.is_some_and(|receipt| {
                receipt.side == TradeSide::ShortClose && receipt.is_profitable()
            }),
            Achievement::CrashSurvivor => {
                progress.stats.market_crashes_weathered >= 1
                    && progress.value() > progress.starting_cash
            }
            Achievement::SteadyGains => {
                progress.game_over
                    && progress.value() >= progress.starting_cash * (1.0 + STEADY_GAINS_RETURN)
            }
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Read-only view of the game state the predicates run against.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot<'a> {
    pub ledger: &'a Ledger,
    pub stats: &'a GameStats,
    pub prices: &'a HashMap<Asset, Price>,
    pub universe: &'a [Asset],
    pub round: u32,
    pub total_rounds: u32,
    pub starting_cash: Cash,
    pub game_over: bool,
    /// The trade that triggered this evaluation, if one did.
    pub last_receipt: Option<TradeReceipt>,
}

impl ProgressSnapshot<'_> {
    fn value(&self) -> Cash {
        self.ledger.value(self.prices)
    }
}

/// Achievements satisfied now but not yet in `unlocked`, in catalog order.
pub fn newly_unlocked(
    progress: &ProgressSnapshot<'_>,
    unlocked: &HashSet<Achievement>,
) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| !unlocked.contains(a) && a.satisfied(progress))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio::TradeSpec;

    const UNIVERSE: [Asset; 4] = [Asset::Stocks, Asset::Bonds, Asset::Gold, Asset::Crypto];

    fn prices() -> HashMap<Asset, Price> {
        HashMap::from([
            (Asset::Stocks, Price(240)),
            (Asset::Bonds, Price(980)),
            (Asset::Gold, Price(1_850)),
            (Asset::Crypto, Price(29_200)),
        ])
    }

    fn progress<'a>(
        ledger: &'a Ledger,
        stats: &'a GameStats,
        prices: &'a HashMap<Asset, Price>,
    ) -> ProgressSnapshot<'a> {
        ProgressSnapshot {
            ledger,
            stats,
            prices,
            universe: &UNIVERSE,
            round: 1,
            total_rounds: 5,
            starting_cash: Cash(10_000.0),
            game_over: false,
            last_receipt: None,
        }
    }

    #[test]
    fn test_fresh_game_unlocks_nothing() {
        let ledger = Ledger::new(Cash(10_000.0));
        let stats = GameStats::default();
        let prices = prices();
        let unlocked = HashSet::new();
        assert!(newly_unlocked(&progress(&ledger, &stats, &prices), &unlocked).is_empty());
    }

    #[test]
    fn test_first_profit_follows_a_profitable_trade() {
        let ledger = Ledger::new(Cash(10_000.0));
        let mut stats = GameStats::default();
        stats.profitable_trades = 1;
        let prices = prices();
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(found.contains(&Achievement::FirstProfit));
    }

    #[test]
    fn test_diversified_requires_every_universe_asset() {
        let mut ledger = Ledger::new(Cash(10_000.0));
        let stats = GameStats::default();
        let prices = prices();
        for asset in [Asset::Stocks, Asset::Bonds, Asset::Gold] {
            let price = prices[&asset];
            ledger.buy(asset, TradeSpec::Fraction(0.1), price).unwrap();
        }
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(!found.contains(&Achievement::Diversified));

        ledger
            .buy(Asset::Crypto, TradeSpec::Fraction(0.1), prices[&Asset::Crypto])
            .unwrap();
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(found.contains(&Achievement::Diversified));
    }

    #[test]
    fn test_all_in_needs_a_majority_position() {
        let mut ledger = Ledger::new(Cash(10_000.0));
        let stats = GameStats::default();
        let prices = prices();
        ledger
            .buy(Asset::Stocks, TradeSpec::Fraction(0.6), Price(240))
            .unwrap();
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(found.contains(&Achievement::AllIn));
    }

    #[test]
    fn test_high_roller_threshold() {
        let ledger = Ledger::new(Cash(16_000.0));
        let stats = GameStats::default();
        let prices = prices();
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(found.contains(&Achievement::HighRoller));

        let poorer = Ledger::new(Cash(14_999.0));
        let found = newly_unlocked(&progress(&poorer, &stats, &prices), &HashSet::new());
        assert!(!found.contains(&Achievement::HighRoller));
    }

    #[test]
    fn test_day_trader_counts_round_trades() {
        let ledger = Ledger::new(Cash(10_000.0));
        let mut stats = GameStats::default();
        stats.trades_this_round = DAY_TRADER_TRADES;
        let prices = prices();
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(found.contains(&Achievement::DayTrader));
    }

    #[test]
    fn test_bear_hunter_requires_a_winning_short_close() {
        let mut ledger = Ledger::new(Cash(10_000.0));
        let stats = GameStats::default();
        let prices = prices();
        ledger.open_short(Asset::Gold, 0.1, Price(1_850)).unwrap();
        let receipt = ledger.close_short(Asset::Gold, Price(1_665)).unwrap();

        let mut snapshot = progress(&ledger, &stats, &prices);
        snapshot.last_receipt = Some(receipt);
        let found = newly_unlocked(&snapshot, &HashSet::new());
        assert!(found.contains(&Achievement::BearHunter));

        // A losing close does not count.
        ledger.open_short(Asset::Gold, 0.1, Price(1_665)).unwrap();
        let losing = ledger.close_short(Asset::Gold, Price(1_850)).unwrap();
        let mut snapshot = progress(&ledger, &stats, &prices);
        snapshot.last_receipt = Some(losing);
        let found = newly_unlocked(&snapshot, &HashSet::new());
        assert!(!found.contains(&Achievement::BearHunter));
    }

    #[test]
    fn test_crash_survivor_needs_crash_and_gains() {
        let ledger = Ledger::new(Cash(10_500.0));
        let mut stats = GameStats::default();
        stats.market_crashes_weathered = 1;
        let prices = prices();
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &HashSet::new());
        assert!(found.contains(&Achievement::CrashSurvivor));

        // Underwater after the crash: no award.
        let underwater = Ledger::new(Cash(9_000.0));
        let found = newly_unlocked(&progress(&underwater, &stats, &prices), &HashSet::new());
        assert!(!found.contains(&Achievement::CrashSurvivor));
    }

    #[test]
    fn test_steady_gains_only_at_game_end() {
        let ledger = Ledger::new(Cash(11_500.0));
        let stats = GameStats::default();
        let prices = prices();

        let mut snapshot = progress(&ledger, &stats, &prices);
        let found = newly_unlocked(&snapshot, &HashSet::new());
        assert!(!found.contains(&Achievement::SteadyGains));

        snapshot.game_over = true;
        let found = newly_unlocked(&snapshot, &HashSet::new());
        assert!(found.contains(&Achievement::SteadyGains));
    }

    #[test]
    fn test_already_unlocked_are_not_reported_again() {
        let ledger = Ledger::new(Cash(16_000.0));
        let stats = GameStats::default();
        let prices = prices();
        let unlocked = HashSet::from([Achievement::HighRoller]);
        let found = newly_unlocked(&progress(&ledger, &stats, &prices), &unlocked);
        assert!(!found.contains(&Achievement::HighRoller));
    }

    #[test]
    fn test_ids_round_trip() {
        for achievement in Achievement::ALL {
            assert_eq!(Achievement::from_id(achievement.id()), Some(achievement));
        }
        assert_eq!(Achievement::from_id("nonsense"), None);
    }
}
