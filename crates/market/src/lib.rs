//! Price model for the Portfolio Panic market.
//!
//! Two update paths move prices, never both for the same asset in the same
//! tick:
//!
//! ```text
//!                    ┌──────────────┐
//!   organic cadence ─► trend drift  │
//!                    │  + noise     ├──► round, clamp ≥ $1, record history
//!   news impact ─────► multiplier   │         │
//!                    └──────────────┘         ▼
//!                                      trend mutation
//!                                      (walk / classification)
//! ```
//!
//! The [`Market`] owns a seeded RNG; two markets built with the same config
//! and seed replay the exact same price path.

pub mod model;
pub mod series;

pub use model::{Market, MarketConfig, PriceUpdate, trend_after_impact};
pub use series::{PRICE_HISTORY_WINDOW, PriceSeries};
