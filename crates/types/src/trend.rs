//! Directional momentum state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weakest trend strength.
pub const MIN_TREND_STRENGTH: u8 = 1;
/// Strongest trend strength.
pub const MAX_TREND_STRENGTH: u8 = 3;

/// Which way an asset is drifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Sign applied to the drift term: +1 for up, -1 for down.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            TrendDirection::Up => 1.0,
            TrendDirection::Down => -1.0,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            TrendDirection::Up => TrendDirection::Down,
            TrendDirection::Down => TrendDirection::Up,
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => f.write_str("up"),
            TrendDirection::Down => f.write_str("down"),
        }
    }
}

/// Per-asset momentum: a direction plus a strength in 1..=3.
///
/// Strength multiplies the organic drift term, so a strength-3 trend moves an
/// asset three times as fast as a strength-1 trend in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub strength: u8,
}

impl Trend {
    /// Build a trend, clamping strength into the valid band.
    pub fn new(direction: TrendDirection, strength: u8) -> Self {
        Self {
            direction,
            strength: strength.clamp(MIN_TREND_STRENGTH, MAX_TREND_STRENGTH),
        }
    }

    pub fn up(strength: u8) -> Self {
        Self::new(TrendDirection::Up, strength)
    }

    pub fn down(strength: u8) -> Self {
        Self::new(TrendDirection::Down, strength)
    }

    /// Same direction, one notch weaker (floor 1).
    pub fn weakened(self) -> Self {
        Self::new(self.direction, self.strength.saturating_sub(1))
    }

    /// Signed drift factor: `sign * strength`.
    #[inline]
    pub fn signed_strength(self) -> f64 {
        self.direction.sign() * self.strength as f64
    }
}

impl Default for Trend {
    fn default() -> Self {
        Self::up(MIN_TREND_STRENGTH)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_clamped_on_construction() {
        assert_eq!(Trend::up(0).strength, MIN_TREND_STRENGTH);
        assert_eq!(Trend::up(7).strength, MAX_TREND_STRENGTH);
        assert_eq!(Trend::down(2).strength, 2);
    }

    #[test]
    fn test_weakened_floors_at_one() {
        let t = Trend::down(1).weakened();
        assert_eq!(t.strength, 1);
        assert_eq!(t.direction, TrendDirection::Down);
    }

    #[test]
    fn test_signed_strength() {
        assert_eq!(Trend::up(3).signed_strength(), 3.0);
        assert_eq!(Trend::down(2).signed_strength(), -2.0);
    }
}
