//! Player account ledger: cash, long positions, leveraged shorts, and the
//! trade receipts and running stats that every completed operation produces.
//!
//! The ledger is deterministic and RNG-free; given the same starting cash and
//! the same sequence of operations at the same prices it always lands in the
//! same state. All trading rules live here: callers hand in prices and trade
//! specs, the ledger enforces validation, all-or-nothing mutation, and the
//! non-negative cash/quantity/basis invariants.

pub mod error;
pub mod ledger;
pub mod position;
pub mod stats;
pub mod trade;

pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use position::{AssetPosition, SHORT_LEVERAGE, ShortPosition};
pub use stats::GameStats;
pub use trade::{TradeReceipt, TradeSide, TradeSpec};
