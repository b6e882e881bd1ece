//! Running tally of trading activity, fed by execution receipts.

use serde::{Deserialize, Serialize};
use types::Cash;

use crate::trade::TradeReceipt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub trades_executed: u32,
    pub profitable_trades: u32,
    /// Trades since the current round opened.
    pub trades_this_round: u32,
    pub biggest_gain: Cash,
    /// Most negative single realized loss (zero until one happens).
    pub biggest_loss: Cash,
    pub market_crashes_weathered: u32,
}

impl GameStats {
    pub fn record(&mut self, receipt: &TradeReceipt) {
        self.trades_executed += 1;
        self.trades_this_round += 1;
        if let Some(realized) = receipt.realized {
            if realized.is_positive() {
                self.profitable_trades += 1;
                self.biggest_gain = self.biggest_gain.max(realized);
            } else if realized < self.biggest_loss {
                self.biggest_loss = realized;
            }
        }
    }

    pub fn on_round_advanced(&mut self) {
        self.trades_this_round = 0;
    }

    pub fn on_crash_weathered(&mut self) {
        self.market_crashes_weathered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::{TradeReceipt, TradeSide};
    use types::{Asset, Price, Quantity};

    fn receipt(realized: Option<Cash>) -> TradeReceipt {
        TradeReceipt {
            asset: Asset::Stocks,
            side: TradeSide::Sell,
            price: Price(240),
            quantity: Quantity(1.0),
            cash_flow: Cash(240.0),
            realized,
        }
    }

    #[test]
    fn test_record_counts_and_extremes() {
        let mut stats = GameStats::default();
        stats.record(&receipt(None));
        stats.record(&receipt(Some(Cash(50.0))));
        stats.record(&receipt(Some(Cash(120.0))));
        stats.record(&receipt(Some(Cash(-80.0))));

        assert_eq!(stats.trades_executed, 4);
        assert_eq!(stats.profitable_trades, 2);
        assert_eq!(stats.biggest_gain, Cash(120.0));
        assert_eq!(stats.biggest_loss, Cash(-80.0));
    }

    #[test]
    fn test_round_advance_resets_only_the_round_counter() {
        let mut stats = GameStats::default();
        stats.record(&receipt(None));
        stats.record(&receipt(None));
        assert_eq!(stats.trades_this_round, 2);

        stats.on_round_advanced();
        assert_eq!(stats.trades_this_round, 0);
        assert_eq!(stats.trades_executed, 2);
    }

    #[test]
    fn test_breakeven_trade_is_not_profitable() {
        let mut stats = GameStats::default();
        stats.record(&receipt(Some(Cash::ZERO)));
        assert_eq!(stats.profitable_trades, 0);
        assert_eq!(stats.biggest_loss, Cash::ZERO);
    }
}
