//! Long and short position records.

use serde::{Deserialize, Serialize};
use types::{Cash, Price, Quantity};

/// Fixed leverage on short positions: price moves count double.
pub const SHORT_LEVERAGE: f64 = 2.0;

/// A long holding in one asset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetPosition {
    /// Units held. Fractional, never negative.
    pub quantity: Quantity,
    /// Total dollars paid for the units still held.
    pub cost_basis: Cash,
}

impl AssetPosition {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_zero()
    }

    pub fn market_value(&self, price: Price) -> Cash {
        self.quantity * price
    }
}

/// A leveraged bet that one asset's price will fall.
///
/// Opening a short reserves `notional` from cash up front; that reserve is
/// the maximum loss. Closing pays the reserve back plus the leveraged P&L,
/// floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortPosition {
    pub entry_price: Price,
    pub notional: Cash,
}

impl ShortPosition {
    /// Mark-to-market P&L at `current`: positive when the price fell.
    pub fn profit_loss(&self, current: Price) -> Cash {
        let entry = self.entry_price.to_float();
        let change = (entry - current.to_float()) / entry;
        self.notional * (change * SHORT_LEVERAGE)
    }

    /// Cash that closing at `current` would return.
    pub fn liquidation_value(&self, current: Price) -> Cash {
        (self.notional + self.profit_loss(current)).max(Cash::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_profit_doubles_the_move() {
        let short = ShortPosition {
            entry_price: Price(100),
            notional: Cash(500.0),
        };
        // 10% drop, 2x leverage: +20% of notional.
        assert_eq!(short.profit_loss(Price(90)), Cash(100.0));
        // 10% rise: -20% of notional.
        assert_eq!(short.profit_loss(Price(110)), Cash(-100.0));
    }

    #[test]
    fn test_liquidation_value_floors_at_zero() {
        let short = ShortPosition {
            entry_price: Price(100),
            notional: Cash(500.0),
        };
        // 60% adverse move wipes more than the reserve; payout floors at 0.
        assert_eq!(short.liquidation_value(Price(160)), Cash::ZERO);
        assert_eq!(short.liquidation_value(Price(100)), Cash(500.0));
    }
}
