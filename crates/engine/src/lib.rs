//! Game engine: the session object and its virtual clock.
//!
//! ```text
//!                    GameSession
//!    +------------------------------------------+
//!    |  RoundScheduler (virtual clock)          |
//!    |    | tick() -> due actions               |
//!    |    v                                     |
//!    |  Market <- impacts <- NewsGenerator      |
//!    |    |                                     |
//!    |  prices -> Ledger / GameStats            |
//!    |    |                                     |
//!    |  achievements::newly_unlocked()          |
//!    +------------------------------------------+
//!         | step() -> Vec<SessionEvent>
//!         v
//!     caller (CLI driver, UI, tests)
//! ```
//!
//! One `step()` is one simulated second. The scheduler decides what comes
//! due (market updates, news impacts, round boundaries), the session applies
//! it and reports everything that happened as an ordered event list.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError};
pub use scheduler::{DueAction, NEWS_REACTION_DELAY_SECS, Phase, ROUND_SECONDS, RoundScheduler};
pub use session::{GameSession, SessionEvent};
pub use snapshot::{AssetSnapshot, SessionSnapshot};

pub use achievements::Achievement;
pub use market::PriceUpdate;
pub use portfolio::{LedgerError, ShortPosition, TradeReceipt, TradeSide, TradeSpec};
