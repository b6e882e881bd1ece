//! Owned read models handed to display layers.
//!
//! Snapshots copy out everything a UI needs so callers never hold borrows
//! into the live session.

use achievements::Achievement;
use news::NewsEvent;
use portfolio::{GameStats, ShortPosition};
use serde::Serialize;
use types::{Asset, Cash, Difficulty, GameMode, Price, Quantity, Trend};

use crate::scheduler::Phase;

/// One tradable asset's market state and the player's exposure to it.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSnapshot {
    pub asset: Asset,
    pub price: Price,
    /// Recent prices, oldest first; the last entry equals `price`.
    pub history: Vec<Price>,
    pub trend: Trend,
    pub quantity: Quantity,
    pub cost_basis: Cash,
    pub short: Option<ShortPosition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub round: u32,
    pub total_rounds: u32,
    pub round_timer: u32,
    pub market_timer: u32,
    pub cash: Cash,
    pub portfolio_value: Cash,
    /// Universe order, same as the session config.
    pub assets: Vec<AssetSnapshot>,
    pub current_news: Option<NewsEvent>,
    pub stats: GameStats,
    /// Catalog order, deduplicated.
    pub unlocked: Vec<Achievement>,
}
