//! Market news: authored events and the seeded generator that deals them.
//!
//! ```text
//!   catalog (authored tables)
//!        |
//!        v
//!   NewsGenerator::draw() ---> NewsEvent { headline, impact, is_crash }
//!        |                           |
//!     seeded RNG                applied to prices by the caller
//! ```
//!
//! Events carry per-asset price multipliers. The generator filters the
//! catalog down to the session's tradable universe and rolls for a crash
//! before every ordinary draw.

pub mod catalog;
pub mod events;
pub mod generator;

pub use events::{MAX_IMPACT, MIN_IMPACT, NewsEvent};
pub use generator::{
    BONUS_EVENT_PROBABILITY, DEFAULT_CRASH_PROBABILITY, NewsGenerator, NewsGeneratorConfig,
};
