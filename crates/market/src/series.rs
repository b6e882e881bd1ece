//! Bounded per-asset price history.

use std::collections::VecDeque;
use types::Price;

/// Historical prices retained per asset (FIFO window).
pub const PRICE_HISTORY_WINDOW: usize = 10;

/// Current price plus a rolling window of recent prices.
///
/// Invariants maintained by [`record`](PriceSeries::record):
/// - the back of the history always equals the current price
/// - the window never exceeds [`PRICE_HISTORY_WINDOW`] entries
#[derive(Debug, Clone)]
pub struct PriceSeries {
    current: Price,
    history: VecDeque<Price>,
}

impl PriceSeries {
    /// Start a series at an opening price (which seeds the history).
    pub fn new(initial: Price) -> Self {
        let mut history = VecDeque::with_capacity(PRICE_HISTORY_WINDOW + 1);
        history.push_back(initial);
        Self {
            current: initial,
            history,
        }
    }

    /// Latest price.
    #[inline]
    pub fn current(&self) -> Price {
        self.current
    }

    /// The rolling window, oldest first.
    pub fn history(&self) -> &VecDeque<Price> {
        &self.history
    }

    /// Record a new price, evicting the oldest entry past the window.
    pub fn record(&mut self, price: Price) {
        self.current = price;
        self.history.push_back(price);
        while self.history.len() > PRICE_HISTORY_WINDOW {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_history_with_opening_price() {
        let series = PriceSeries::new(Price(240));
        assert_eq!(series.current(), 240);
        assert_eq!(series.history().len(), 1);
        assert_eq!(series.history().back().copied(), Some(Price(240)));
    }

    #[test]
    fn test_window_trimming() {
        let mut series = PriceSeries::new(Price(100));
        for i in 1..=25 {
            series.record(Price(100 + i));
        }
        assert_eq!(series.history().len(), PRICE_HISTORY_WINDOW);
        // Oldest entries evicted first.
        assert_eq!(series.history().front().copied(), Some(Price(116)));
        assert_eq!(series.history().back().copied(), Some(Price(125)));
    }

    #[test]
    fn test_back_always_equals_current() {
        let mut series = PriceSeries::new(Price(75));
        for i in 0..40 {
            series.record(Price(75 + i % 7));
            assert_eq!(series.history().back().copied(), Some(series.current()));
            assert!(series.history().len() <= PRICE_HISTORY_WINDOW);
        }
    }
}
