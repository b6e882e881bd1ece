//! The player's account: cash, long positions, short positions.
//!
//! Every operation validates first and mutates only on success, so a rejected
//! trade is guaranteed to leave the account untouched. Monetary comparisons
//! allow a dust tolerance; balances are snapped to zero below it so float
//! crumbs never accumulate into phantom holdings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use types::{Asset, Cash, Price, Quantity};

use crate::error::{LedgerError, Result};
use crate::position::{AssetPosition, ShortPosition};
use crate::trade::{TradeReceipt, TradeSide, TradeSpec};

/// Tolerance absorbing float dust in monetary comparisons.
const DUST: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    cash: Cash,
    positions: HashMap<Asset, AssetPosition>,
    shorts: HashMap<Asset, ShortPosition>,
}

impl Ledger {
    pub fn new(starting_cash: Cash) -> Self {
        Self {
            cash: starting_cash,
            positions: HashMap::new(),
            shorts: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn cash(&self) -> Cash {
        self.cash
    }

    pub fn position(&self, asset: Asset) -> Option<&AssetPosition> {
        self.positions.get(&asset)
    }

    pub fn positions(&self) -> &HashMap<Asset, AssetPosition> {
        &self.positions
    }

    /// Units held of `asset`; zero when there is no position.
    pub fn quantity(&self, asset: Asset) -> Quantity {
        self.positions
            .get(&asset)
            .map(|p| p.quantity)
            .unwrap_or(Quantity::ZERO)
    }

    pub fn short(&self, asset: Asset) -> Option<&ShortPosition> {
        self.shorts.get(&asset)
    }

    pub fn shorts(&self) -> &HashMap<Asset, ShortPosition> {
        &self.shorts
    }

    /// Total account value: cash plus marked-to-market longs and shorts.
    ///
    /// Sums in fixed asset order so identical states give bit-identical
    /// totals regardless of map layout.
    pub fn value(&self, prices: &HashMap<Asset, Price>) -> Cash {
        let mut total = self.cash;
        for asset in Asset::ALL {
            let Some(&price) = prices.get(&asset) else {
                continue;
            };
            if let Some(position) = self.positions.get(&asset) {
                total += position.market_value(price);
            }
            if let Some(short) = self.shorts.get(&asset) {
                total += short.liquidation_value(price);
            }
        }
        total
    }

    // ------------------------------------------------------------------
    // Trading
    // ------------------------------------------------------------------

    /// Buys `asset` at `price`, spending the dollars `spec` resolves to.
    pub fn buy(&mut self, asset: Asset, spec: TradeSpec, price: Price) -> Result<TradeReceipt> {
        checked_price(price)?;
        let cost = match spec {
            TradeSpec::Fraction(f) => self.cash * checked_fraction(f)?,
            TradeSpec::Quantity(q) => checked_units(q)? * price,
            TradeSpec::DoubleDown => {
                self.positions
                    .get(&asset)
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| LedgerError::InvalidAssetQuantity {
                        reason: format!("double down requires an existing {asset} position"),
                    })?
                    .cost_basis
            }
        };
        if !cost.is_positive() {
            return Err(LedgerError::InvalidAssetQuantity {
                reason: "trade amount resolves to zero".into(),
            });
        }
        if cost.raw() > self.cash.raw() + DUST {
            return Err(LedgerError::InsufficientFunds {
                needed: cost,
                available: self.cash,
            });
        }

        let bought = cost / price;
        self.cash -= cost;
        self.snap_cash_dust();
        let position = self.positions.entry(asset).or_default();
        position.quantity += bought;
        position.cost_basis += cost;

        Ok(TradeReceipt {
            asset,
            side: TradeSide::Buy,
            price,
            quantity: bought,
            cash_flow: -cost,
            realized: None,
        })
    }

    /// Sells part or all of a holding; realized P&L is proceeds minus the
    /// proportional share of the cost basis.
    pub fn sell(&mut self, asset: Asset, spec: TradeSpec, price: Price) -> Result<TradeReceipt> {
        checked_price(price)?;
        let held = self.quantity(asset);
        let requested = match spec {
            TradeSpec::Fraction(f) => held * checked_fraction(f)?,
            TradeSpec::Quantity(q) => checked_units(q)?,
            TradeSpec::DoubleDown => {
                return Err(LedgerError::InvalidAssetQuantity {
                    reason: "double down applies to buys only".into(),
                });
            }
        };
        if held.is_zero() || requested.raw() > held.raw() + DUST {
            return Err(LedgerError::InsufficientHoldings {
                asset,
                requested,
                held,
            });
        }
        let Some(position) = self.positions.get_mut(&asset) else {
            return Err(LedgerError::InsufficientHoldings {
                asset,
                requested,
                held: Quantity::ZERO,
            });
        };

        let sold = requested.min(held);
        let fraction_sold = sold / held;
        let proceeds = sold * price;
        let released = position.cost_basis * fraction_sold;
        let profit = proceeds - released;

        self.cash += proceeds;
        position.quantity -= sold;
        position.cost_basis -= released;
        if position.quantity.raw() <= DUST {
            self.positions.remove(&asset);
        }

        Ok(TradeReceipt {
            asset,
            side: TradeSide::Sell,
            price,
            quantity: sold,
            cash_flow: proceeds,
            realized: Some(profit),
        })
    }

    /// Opens a leveraged short, reserving `cash * fraction` as the stake.
    /// At most one short per asset; a second open is rejected outright.
    pub fn open_short(
        &mut self,
        asset: Asset,
        cash_fraction: f64,
        price: Price,
    ) -> Result<TradeReceipt> {
        checked_price(price)?;
        let fraction = checked_fraction(cash_fraction)?;
        if self.shorts.contains_key(&asset) {
            return Err(LedgerError::ShortAlreadyOpen { asset });
        }
        let notional = self.cash * fraction;
        if notional.raw() <= DUST {
            return Err(LedgerError::InsufficientFunds {
                needed: notional,
                available: self.cash,
            });
        }

        self.cash -= notional;
        self.snap_cash_dust();
        self.shorts.insert(
            asset,
            ShortPosition {
                entry_price: price,
                notional,
            },
        );

        Ok(TradeReceipt {
            asset,
            side: TradeSide::ShortOpen,
            price,
            quantity: Quantity::ZERO,
            cash_flow: -notional,
            realized: None,
        })
    }

    /// Closes the short on `asset`, paying out the reserved notional plus
    /// leveraged P&L (floored at zero, so the stake is the maximum loss).
    pub fn close_short(&mut self, asset: Asset, price: Price) -> Result<TradeReceipt> {
        checked_price(price)?;
        let Some(short) = self.shorts.remove(&asset) else {
            return Err(LedgerError::NoActiveShort { asset });
        };

        let payout = short.liquidation_value(price);
        let realized = payout - short.notional;
        self.cash += payout;

        Ok(TradeReceipt {
            asset,
            side: TradeSide::ShortClose,
            price,
            quantity: Quantity::ZERO,
            cash_flow: payout,
            realized: Some(realized),
        })
    }

    fn snap_cash_dust(&mut self) {
        if self.cash.raw() < DUST {
            self.cash = Cash::ZERO;
        }
    }
}

fn checked_price(price: Price) -> Result<()> {
    if price.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAssetQuantity {
            reason: format!("price must be positive, got {price}"),
        })
    }
}

fn checked_fraction(f: f64) -> Result<f64> {
    if f.is_finite() && f > 0.0 && f <= 1.0 {
        Ok(f)
    } else {
        Err(LedgerError::InvalidAssetQuantity {
            reason: format!("fraction must be in (0, 1], got {f}"),
        })
    }
}

fn checked_units(q: f64) -> Result<Quantity> {
    if q.is_finite() && q > 0.0 {
        Ok(Quantity(q))
    } else {
        Err(LedgerError::InvalidAssetQuantity {
            reason: format!("quantity must be positive and finite, got {q}"),
        })
    }
}
