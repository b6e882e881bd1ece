//! News events and their per-asset price impacts.

use serde::{Deserialize, Serialize};
use types::Asset;

/// Smallest multiplier a single event may carry.
pub const MIN_IMPACT: f64 = 0.1;
/// Largest multiplier a single event may carry.
pub const MAX_IMPACT: f64 = 10.0;

/// A generated headline with its market consequences.
///
/// Immutable once generated: the market consumes the impact list exactly
/// once; callers may keep a copy around for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    /// Short headline shown to the player.
    pub headline: String,
    /// Flavor text expanding on the headline.
    pub body: String,
    /// A trading hint tied to the event.
    pub tip: String,
    /// Per-asset price multipliers (1.0 = untouched, >1 growth, <1 decline),
    /// in a stable order.
    pub impact: Vec<(Asset, f64)>,
    /// Whether this is the market-crash event.
    pub is_crash: bool,
}

impl NewsEvent {
    /// Build an event, clamping every multiplier into the sane band.
    pub fn new(
        headline: impl Into<String>,
        body: impl Into<String>,
        tip: impl Into<String>,
        impact: Vec<(Asset, f64)>,
        is_crash: bool,
    ) -> Self {
        let impact = impact
            .into_iter()
            .map(|(asset, m)| (asset, m.clamp(MIN_IMPACT, MAX_IMPACT)))
            .collect();
        Self {
            headline: headline.into(),
            body: body.into(),
            tip: tip.into(),
            impact,
            is_crash,
        }
    }

    /// Multiplier this event applies to an asset, if any.
    pub fn multiplier_for(&self, asset: Asset) -> Option<f64> {
        self.impact
            .iter()
            .find(|(a, _)| *a == asset)
            .map(|&(_, m)| m)
    }

    /// Whether the event moves at least one asset of the given universe.
    pub fn touches_any(&self, universe: &[Asset]) -> bool {
        self.impact.iter().any(|(a, _)| universe.contains(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers_clamped_on_construction() {
        let event = NewsEvent::new(
            "Test",
            "",
            "",
            vec![(Asset::Stocks, 0.0), (Asset::Gold, 99.0)],
            false,
        );
        assert_eq!(event.multiplier_for(Asset::Stocks), Some(MIN_IMPACT));
        assert_eq!(event.multiplier_for(Asset::Gold), Some(MAX_IMPACT));
        assert_eq!(event.multiplier_for(Asset::Crypto), None);
    }

    #[test]
    fn test_touches_any() {
        let event = NewsEvent::new("Test", "", "", vec![(Asset::Oil, 1.1)], false);
        assert!(event.touches_any(&[Asset::Oil, Asset::Gold]));
        assert!(!event.touches_any(&[Asset::Stocks, Asset::Bonds]));
    }
}
