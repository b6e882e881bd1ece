//! Ledger error taxonomy.
//!
//! Every variant is recoverable and user-facing: a rejected trade leaves the
//! ledger exactly as it was. Monetary fields ride along so callers can render
//! a useful message without re-deriving state.

use thiserror::Error;
use types::{Asset, Cash, Quantity};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Cash, available: Cash },

    #[error("insufficient holdings of {asset}: requested {requested}, hold {held}")]
    InsufficientHoldings {
        asset: Asset,
        requested: Quantity,
        held: Quantity,
    },

    #[error("no active short position on {asset}")]
    NoActiveShort { asset: Asset },

    #[error("short position already open on {asset}")]
    ShortAlreadyOpen { asset: Asset },

    #[error("invalid trade amount: {reason}")]
    InvalidAssetQuantity { reason: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
