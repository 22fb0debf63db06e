//! # engine::market_events
//!
//! **Market Event Feed** — rolled once per day advance.
//!
//! 1. **Headline** — with probability 0.3 a headline is drawn uniformly from
//!    [`HEADLINES`] and stays on the news panel for 180 ticks.
//! 2. **Shocks**   — each currency independently, with probability 0.5, gets
//!    an extra shock in `[-0.05, 0.05]` on its current rate (floored at 0.1).
//!
//! Draw order is fixed (headline roll, optional pick, then one roll per
//! currency plus an optional shock) so seeded runs replay exactly.

use rand::Rng;
use tracing::{debug, info};

use crate::models::Currency;

pub const EVENT_PROBABILITY: f64 = 0.3;
pub const SHOCK_PROBABILITY: f64 = 0.5;
pub const SHOCK_RANGE: f64 = 0.05;

/// How long a headline stays visible (≈3 s at 60 Hz).
pub const NEWS_DISPLAY_TICKS: u32 = 180;

/// Shown while no headline is live.
pub const CALM_MARKET: &str = "Markets calm, no major news";

pub const HEADLINES: [&str; 10] = [
    "Fed raises rates by 25 basis points",
    "ECB holds interest rates steady",
    "UK inflation comes in above expectations",
    "Bank of Japan intervenes in FX market",
    "Commodity prices surge",
    "Geopolitical tensions escalate",
    "Global recession fears deepen",
    "Jobs report beats expectations",
    "Trade deficit widens",
    "Consumer confidence index rises",
];

/// Result of one roll, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRoll {
    pub headline: Option<&'static str>,
    /// `(currency code, shock applied)` for every shocked currency.
    pub shocks: Vec<(String, f64)>,
}

// ─── Feed ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MarketEventFeed {
    headline: Option<&'static str>,
    ticks_remaining: u32,
}

impl MarketEventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll today's news and shocks, mutating `currencies` in place.
    pub fn roll<R: Rng>(&mut self, rng: &mut R, currencies: &mut [Currency]) -> MarketRoll {
        let headline = if rng.gen_bool(EVENT_PROBABILITY) {
            let picked = HEADLINES[rng.gen_range(0..HEADLINES.len())];
            self.headline = Some(picked);
            self.ticks_remaining = NEWS_DISPLAY_TICKS;
            info!(headline = picked, "📰 market news");
            Some(picked)
        } else {
            None
        };

        let mut shocks = Vec::new();
        for currency in currencies.iter_mut() {
            if rng.gen_bool(SHOCK_PROBABILITY) {
                let change = rng.gen_range(-SHOCK_RANGE..=SHOCK_RANGE);
                currency.apply_shock(change);
                debug!(code = %currency.code, change, rate = currency.rate, "rate shock");
                shocks.push((currency.code.clone(), change));
            }
        }

        MarketRoll { headline, shocks }
    }

    /// Count down the headline display timer by one frame.
    pub fn tick(&mut self) {
        if self.ticks_remaining > 0 {
            self.ticks_remaining -= 1;
            if self.ticks_remaining == 0 {
                self.headline = None;
            }
        }
    }

    /// The live headline, if one is still on display.
    pub fn current(&self) -> Option<&'static str> {
        self.headline.filter(|_| self.ticks_remaining > 0)
    }

    /// Text for the news panel.
    pub fn display_text(&self) -> &'static str {
        self.current().unwrap_or(CALM_MARKET)
    }
}
