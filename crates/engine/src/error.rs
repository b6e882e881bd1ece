//! Engine error types.

use portfolio::LedgerError;
use thiserror::Error;
use types::{Asset, Cash};

/// Rejected session configuration. Raised at construction, never later.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("universe must contain at least one asset")]
    EmptyUniverse,

    #[error("universe lists {0} more than once")]
    DuplicateAsset(Asset),

    #[error("a game needs at least one round")]
    ZeroRounds,

    #[error("market update interval must be at least one second")]
    ZeroUpdateInterval,

    #[error("crash probability {0} is outside [0, 1]")]
    CrashProbability(f64),

    #[error("starting cash must be positive, got {0}")]
    NonPositiveStartingCash(Cash),
}

/// Why a session refused an entry-point call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("session is not running")]
    NotRunning,

    #[error("{asset} is not in this session's universe")]
    UnknownAsset { asset: Asset },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
