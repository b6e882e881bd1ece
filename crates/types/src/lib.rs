//! Shared vocabulary for the Portfolio Panic simulation.
//!
//! This crate defines the value types used across the engine:
//!
//! - [`money`]: `Price`, `Cash`, and `Quantity` newtypes with the cross-type
//!   arithmetic the ledger and market need.
//! - [`asset`]: the fixed [`Asset`] universe with per-asset base parameters.
//! - [`trend`]: directional momentum state ([`Trend`]) driving organic drift.
//! - [`settings`]: the difficulty and game-mode tables consumed by the engine
//!   as static configuration data.
//!
//! Everything here is plain data: no RNG, no clocks, no I/O.

pub mod asset;
pub mod money;
pub mod settings;
pub mod trend;

pub use asset::Asset;
pub use money::{Cash, Price, Quantity};
pub use settings::{Difficulty, DifficultySettings, GameMode, GameModeSettings};
pub use trend::{MAX_TREND_STRENGTH, MIN_TREND_STRENGTH, Trend, TrendDirection};
