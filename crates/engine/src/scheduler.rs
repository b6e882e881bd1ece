//! Virtual-clock round scheduler.
//!
//! Time is simulated: one `tick()` is one game second, and nothing here reads
//! a wall clock. The scheduler owns the countdowns (round timer, market
//! update timer, pending news-impact delays) and reports what came due; the
//! session decides what those actions mean.

use news::NewsEvent;
use serde::{Deserialize, Serialize};

/// Length of one round in game seconds.
pub const ROUND_SECONDS: u32 = 60;

/// Seconds between a news event being published and its price impact.
pub const NEWS_REACTION_DELAY_SECS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameComplete,
}

/// Something whose countdown expired on this tick, in firing order.
#[derive(Debug, Clone, PartialEq)]
pub enum DueAction {
    /// A published news event's reaction delay ran out.
    ImpactDue(NewsEvent),
    /// The organic market repricing interval elapsed.
    MarketUpdate,
    /// The round timer expired with rounds still to play.
    RoundAdvanced { completed: u32, next: u32 },
    /// The final round's timer expired.
    GameCompleted,
}

#[derive(Debug, Clone)]
struct PendingImpact {
    delay: u32,
    event: NewsEvent,
}

#[derive(Debug, Clone)]
pub struct RoundScheduler {
    phase: Phase,
    round: u32,
    total_rounds: u32,
    round_timer: u32,
    market_interval: u32,
    market_timer: u32,
    pending: Vec<PendingImpact>,
}

impl RoundScheduler {
    /// Both arguments must be nonzero; `SessionConfig::validate` guarantees
    /// that upstream.
    pub fn new(total_rounds: u32, market_interval: u32) -> Self {
        Self {
            phase: Phase::Idle,
            round: 1,
            total_rounds,
            round_timer: ROUND_SECONDS,
            market_interval,
            market_timer: market_interval,
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Seconds left in the current round. Stays at zero once the game ends.
    pub fn round_timer(&self) -> u32 {
        self.round_timer
    }

    /// Seconds until the next organic market update.
    pub fn market_timer(&self) -> u32 {
        self.market_timer
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Impacts scheduled but not yet fired.
    pub fn pending_impacts(&self) -> usize {
        self.pending.len()
    }

    /// Moves Idle → Running. Returns whether this call performed the start.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            true
        } else {
            false
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Queues `event`'s price impact to fire after the reaction delay.
    /// Pending impacts survive round transitions; only game completion ends
    /// their countdown.
    pub fn schedule_impact(&mut self, event: NewsEvent) {
        self.pending.push(PendingImpact {
            delay: NEWS_REACTION_DELAY_SECS,
            event,
        });
    }

    /// Advances the virtual clock by one second.
    ///
    /// Only `Running` ticks: pause freezes every countdown here, including
    /// pending impact delays. Actions fire in a fixed order: impacts first,
    /// then the market update, then the round boundary.
    pub fn tick(&mut self) -> Vec<DueAction> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        let mut due = Vec::new();

        let pending = std::mem::take(&mut self.pending);
        for mut impact in pending {
            impact.delay = impact.delay.saturating_sub(1);
            if impact.delay == 0 {
                due.push(DueAction::ImpactDue(impact.event));
            } else {
                self.pending.push(impact);
            }
        }

        self.market_timer = self.market_timer.saturating_sub(1);
        if self.market_timer == 0 {
            due.push(DueAction::MarketUpdate);
            self.market_timer = self.market_interval;
        }

        self.round_timer = self.round_timer.saturating_sub(1);
        if self.round_timer == 0 {
            if self.round < self.total_rounds {
                let completed = self.round;
                self.round += 1;
                self.round_timer = ROUND_SECONDS;
                due.push(DueAction::RoundAdvanced {
                    completed,
                    next: self.round,
                });
            } else {
                // Final round: the timer stays at zero, nothing resets.
                self.phase = Phase::GameComplete;
                due.push(DueAction::GameCompleted);
            }
        }

        due
    }
}
