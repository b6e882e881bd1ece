//! The fixed asset universe.

use crate::money::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An asset class the player can trade.
///
/// The set is fixed at compile time; sessions run a configured subset of it
/// (the default universe is stocks/bonds/gold/crypto, extended variants add
/// oil and real estate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    Stocks,
    Bonds,
    Gold,
    Crypto,
    Oil,
    RealEstate,
}

impl Asset {
    /// Every asset class, in canonical order.
    pub const ALL: [Asset; 6] = [
        Asset::Stocks,
        Asset::Bonds,
        Asset::Gold,
        Asset::Crypto,
        Asset::Oil,
        Asset::RealEstate,
    ];

    /// The standard four-asset universe.
    pub fn default_universe() -> Vec<Asset> {
        vec![Asset::Stocks, Asset::Bonds, Asset::Gold, Asset::Crypto]
    }

    /// Human-readable label.
    pub fn name(self) -> &'static str {
        match self {
            Asset::Stocks => "Stocks",
            Asset::Bonds => "Bonds",
            Asset::Gold => "Gold",
            Asset::Crypto => "Crypto",
            Asset::Oil => "Oil",
            Asset::RealEstate => "Real Estate",
        }
    }

    /// Base per-update volatility, before difficulty scaling.
    ///
    /// Feeds both the trend drift term and the noise term: an asset with
    /// volatility `v` drifts `strength * v * 100` percent per organic update
    /// and wanders up to `±(v * 100) / 2` percent on top of it.
    pub fn base_volatility(self) -> f64 {
        match self {
            Asset::Stocks => 0.015,
            Asset::Bonds => 0.005,
            Asset::Gold => 0.008,
            Asset::Crypto => 0.04,
            Asset::Oil => 0.02,
            Asset::RealEstate => 0.006,
        }
    }

    /// Opening price at session start.
    pub fn initial_price(self) -> Price {
        match self {
            Asset::Stocks => Price(240),
            Asset::Bonds => Price(980),
            Asset::Gold => Price(1_850),
            Asset::Crypto => Price(29_200),
            Asset::Oil => Price(75),
            Asset::RealEstate => Price(320),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_assets_have_sane_parameters() {
        for asset in Asset::ALL {
            assert!(asset.initial_price().is_positive(), "{asset} price");
            let vol = asset.base_volatility();
            assert!(vol > 0.0 && vol < 0.1, "{asset} volatility {vol}");
        }
    }

    #[test]
    fn test_default_universe_is_subset_of_all() {
        let universe = Asset::default_universe();
        assert_eq!(universe.len(), 4);
        for asset in &universe {
            assert!(Asset::ALL.contains(asset));
        }
    }
}
