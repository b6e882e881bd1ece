//! Trade requests and execution receipts.

use serde::{Deserialize, Serialize};
use types::{Asset, Cash, Price, Quantity};

/// How much of an asset a trade request covers.
///
/// Tagged so the ledger can tell "half my cash" from "20 units" without
/// sentinel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TradeSpec {
    /// Fraction of the relevant whole: cash for buys, holding for sells.
    /// Valid range is (0, 1]; 1.0 means everything.
    Fraction(f64),
    /// An absolute number of units.
    Quantity(f64),
    /// Spend the asset's current cost basis again, doubling the dollars
    /// invested. Buys only; requires an existing position.
    DoubleDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
    ShortOpen,
    ShortClose,
}

/// Record of one executed ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub asset: Asset,
    pub side: TradeSide,
    /// Execution price.
    pub price: Price,
    /// Units bought or sold; zero for the notional-based short legs.
    pub quantity: Quantity,
    /// Signed cash movement: negative when cash left the account.
    pub cash_flow: Cash,
    /// Realized profit or loss, present on closing legs (sell, short close).
    pub realized: Option<Cash>,
}

impl TradeReceipt {
    /// Whether this receipt closed something out at a profit.
    pub fn is_profitable(&self) -> bool {
        self.realized.is_some_and(|pnl| pnl.is_positive())
    }
}
