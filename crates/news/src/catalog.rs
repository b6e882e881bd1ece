//! The authored event tables.
//!
//! Multipliers are hand-tuned to be economically coherent: rate hikes hurt
//! growth assets and help bonds, safe havens catch bids when risk assets get
//! hit, oil shocks drag equities. Every tradable asset appears in at least
//! two standard events so any universe subset still has news to draw.

use crate::events::NewsEvent;
use types::Asset::{Bonds, Crypto, Gold, Oil, RealEstate, Stocks};
use types::{Asset, GameMode};

/// Events available regardless of game mode.
pub fn standard_events() -> Vec<NewsEvent> {
    vec![
        NewsEvent::new(
            "Central Bank Hikes Rates",
            "A half-point hike catches traders off guard. Borrowing just got expensive.",
            "Rate hikes hurt growth assets; bonds and cash look better.",
            vec![
                (Stocks, 0.94),
                (Bonds, 1.04),
                (Gold, 1.02),
                (Crypto, 0.91),
                (RealEstate, 0.93),
            ],
            false,
        ),
        NewsEvent::new(
            "Surprise Rate Cut",
            "The central bank blinks and cuts rates to juice the economy.",
            "Cheap money lifts risk assets.",
            vec![
                (Stocks, 1.06),
                (Bonds, 0.97),
                (Crypto, 1.08),
                (RealEstate, 1.05),
            ],
            false,
        ),
        NewsEvent::new(
            "Tech Earnings Blowout",
            "The biggest names in tech smash every estimate on the sheet.",
            "Earnings beats feed equity momentum.",
            vec![(Stocks, 1.09), (Crypto, 1.03)],
            false,
        ),
        NewsEvent::new(
            "Accounting Scandal at Megacorp",
            "A blue-chip restates three years of earnings. Auditors resign.",
            "Scandals dent confidence in the whole index.",
            vec![(Stocks, 0.92)],
            false,
        ),
        NewsEvent::new(
            "Inflation Comes in Hot",
            "Consumer prices jump well past forecasts for the third month running.",
            "Hard assets hold value when prices run.",
            vec![
                (Gold, 1.07),
                (Bonds, 0.95),
                (Stocks, 0.97),
                (RealEstate, 1.03),
            ],
            false,
        ),
        NewsEvent::new(
            "Central Banks Stockpile Gold",
            "Reserve managers quietly added record tonnage last quarter.",
            "Follow the big buyers.",
            vec![(Gold, 1.08), (Crypto, 0.98)],
            false,
        ),
        NewsEvent::new(
            "Crypto Exchange Collapses",
            "A top-five exchange halts withdrawals; customer funds are missing.",
            "Counterparty risk is the oldest story in finance.",
            vec![(Crypto, 0.78), (Gold, 1.03)],
            false,
        ),
        NewsEvent::new(
            "Spot Crypto ETF Approved",
            "Regulators green-light the long-awaited fund. Inflows begin at the open.",
            "New demand channels re-rate an asset fast.",
            vec![(Crypto, 1.12), (Stocks, 1.02)],
            false,
        ),
        NewsEvent::new(
            "Cartel Slashes Oil Output",
            "Production quotas cut by two million barrels a day, effective immediately.",
            "Supply cuts bite fastest in energy.",
            vec![(Oil, 1.10), (Stocks, 0.97)],
            false,
        ),
        NewsEvent::new(
            "Tankers Idle Offshore in Oil Glut",
            "Storage is full and cargoes are being discounted at sea.",
            "Gluts crush spot prices.",
            vec![(Oil, 0.88), (Stocks, 1.02)],
            false,
        ),
        NewsEvent::new(
            "Housing Starts Surge",
            "Permits and starts both print decade highs on builder optimism.",
            "Construction booms spill into the broader market.",
            vec![(RealEstate, 1.06), (Stocks, 1.02), (Bonds, 0.98)],
            false,
        ),
        NewsEvent::new(
            "Mortgage Rates Spike",
            "The thirty-year crosses a threshold buyers refuse to follow.",
            "Financing costs set the ceiling on property.",
            vec![(RealEstate, 0.91), (Bonds, 1.02)],
            false,
        ),
        NewsEvent::new(
            "Blowout Jobs Report",
            "Payrolls double expectations; wages tick up too.",
            "Good news for stocks can be bad news for bonds.",
            vec![(Stocks, 1.04), (Bonds, 0.96), (Gold, 0.98)],
            false,
        ),
        NewsEvent::new(
            "Geopolitical Tensions Flare",
            "Overnight headlines send risk desks reaching for hedges.",
            "Fear is a bid for gold and bonds.",
            vec![
                (Gold, 1.06),
                (Bonds, 1.03),
                (Stocks, 0.95),
                (Oil, 1.05),
                (Crypto, 0.94),
            ],
            false,
        ),
    ]
}

/// The fixed market-crash event: risk assets routed, havens catch the bid.
pub fn crash_event() -> NewsEvent {
    NewsEvent::new(
        "MARKET CRASH: Panic Selling Sweeps Global Markets",
        "Circuit breakers trip on every major exchange as leveraged positions unwind.",
        "Crashes reward the hedged and the patient. Havens shine.",
        vec![
            (Stocks, 0.72),
            (Crypto, 0.55),
            (Oil, 0.70),
            (RealEstate, 0.85),
            (Bonds, 1.05),
            (Gold, 1.12),
        ],
        true,
    )
}

/// Extra events mixed into the pool for boom/bust modes.
pub fn bonus_events(mode: GameMode) -> Vec<NewsEvent> {
    match mode {
        GameMode::Classic => Vec::new(),
        GameMode::BullRun => vec![
            NewsEvent::new(
                "Retail Mania: Everything Rallies",
                "Brokerage signups hit records; the tape is green wall to wall.",
                "Momentum feeds on itself, until it doesn't.",
                vec![
                    (Stocks, 1.08),
                    (Crypto, 1.10),
                    (Gold, 1.02),
                    (RealEstate, 1.04),
                    (Oil, 1.03),
                ],
                false,
            ),
            NewsEvent::new(
                "IPO Frenzy Breaks Records",
                "Three listings double on debut in a single session.",
                "Froth lifts the whole index while it lasts.",
                vec![(Stocks, 1.07), (Crypto, 1.05)],
                false,
            ),
            NewsEvent::new(
                "Analysts Declare Crypto Supercycle",
                "Price targets get another zero as fund flows accelerate.",
                "Supercycle calls mark strong momentum and crowded trades.",
                vec![(Crypto, 1.15), (Stocks, 1.02)],
                false,
            ),
            NewsEvent::new(
                "Commodities Melt Up",
                "Metals and energy rip higher together on restocking demand.",
                "Hard assets run in packs.",
                vec![(Gold, 1.07), (Oil, 1.09)],
                false,
            ),
        ],
        GameMode::Meltdown => vec![
            NewsEvent::new(
                "Credit Markets Seize Up",
                "New issuance is frozen and spreads gap to crisis levels.",
                "When credit stops, equity follows.",
                vec![
                    (Stocks, 0.93),
                    (Bonds, 1.03),
                    (RealEstate, 0.92),
                    (Crypto, 0.90),
                ],
                false,
            ),
            NewsEvent::new(
                "Contagion Fears Spread to Banks",
                "Two regional lenders wobble; depositors form queues.",
                "Bank stress sends money to the oldest haven there is.",
                vec![(Stocks, 0.91), (Gold, 1.05), (Crypto, 0.93)],
                false,
            ),
            NewsEvent::new(
                "Layoffs Hit Every Sector",
                "Hiring freezes turn into cuts from factory floor to head office.",
                "Recessions are priced in one payroll at a time.",
                vec![(Stocks, 0.94), (RealEstate, 0.94), (Bonds, 1.02)],
                false,
            ),
            NewsEvent::new(
                "Stablecoin Breaks the Buck",
                "A major stablecoin trades at ninety cents and the peg defense is failing.",
                "Plumbing failures drain the whole crypto complex.",
                vec![(Crypto, 0.80), (Gold, 1.04)],
                false,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MAX_IMPACT, MIN_IMPACT};

    #[test]
    fn test_standard_events_are_well_formed() {
        let events = standard_events();
        assert!(events.len() >= 10);
        for event in &events {
            assert!(!event.headline.is_empty());
            assert!(!event.impact.is_empty());
            assert!(!event.is_crash);
            for &(_, m) in &event.impact {
                assert!((MIN_IMPACT..=MAX_IMPACT).contains(&m), "{}", event.headline);
            }
        }
    }

    #[test]
    fn test_every_asset_appears_in_standard_events() {
        let events = standard_events();
        for asset in Asset::ALL {
            let appearances = events
                .iter()
                .filter(|e| e.multiplier_for(asset).is_some())
                .count();
            assert!(appearances >= 2, "{asset} appears in {appearances} events");
        }
    }

    #[test]
    fn test_crash_event_shape() {
        let crash = crash_event();
        assert!(crash.is_crash);
        // Risk assets routed, havens bid.
        assert!(crash.multiplier_for(Stocks).unwrap() < 1.0);
        assert!(crash.multiplier_for(Crypto).unwrap() < 1.0);
        assert!(crash.multiplier_for(Oil).unwrap() < 1.0);
        assert!(crash.multiplier_for(Gold).unwrap() > 1.0);
        assert!(crash.multiplier_for(Bonds).unwrap() > 1.0);
    }

    #[test]
    fn test_bonus_tables_match_modes() {
        assert!(bonus_events(GameMode::Classic).is_empty());
        let boom = bonus_events(GameMode::BullRun);
        assert!(!boom.is_empty());
        let bust = bonus_events(GameMode::Meltdown);
        assert!(!bust.is_empty());
        for event in boom.iter().chain(bust.iter()) {
            assert!(!event.is_crash);
        }
        // Boom events skew stocks up, bust events skew them down.
        for event in &boom {
            if let Some(m) = event.multiplier_for(Stocks) {
                assert!(m > 1.0, "{}", event.headline);
            }
        }
        for event in &bust {
            if let Some(m) = event.multiplier_for(Stocks) {
                assert!(m < 1.0, "{}", event.headline);
            }
        }
    }
}
