//! # engine::rate_model
//!
//! **Rate Model** — advances every currency one day with a trend-biased
//! random walk.
//!
//! ```text
//! delta = U(-volatility, +volatility)
//!     │
//!     ├─ history ≥ 6 entries?
//!     │      latest − history[len−6] > 0  →  delta = +|delta| · 0.7
//!     │      otherwise                    →  delta = −|delta| · 0.7
//!     │
//!     └─ rate = max(0.1, rate · (1 + delta))   → appended to history
//! ```

use rand::Rng;
use tracing::debug;

use crate::models::{Currency, RATE_FLOOR};

/// How many steps back the momentum check looks.
pub const MOMENTUM_LOOKBACK: usize = 5;

/// Magnitude applied to the delta once momentum takes over.
pub const MOMENTUM_DAMPING: f64 = 0.7;

// ─── Pure Step ────────────────────────────────────────────────────────────────

/// Bias a raw delta toward the recent trend of `history`.
///
/// Short histories (fewer than `MOMENTUM_LOOKBACK + 1` points) return the
/// delta unchanged. A flat trend counts as downward.
pub fn momentum_delta(history: &[f64], delta: f64) -> f64 {
    let len = history.len();
    if len <= MOMENTUM_LOOKBACK {
        return delta;
    }
    let trend = history[len - 1] - history[len - 1 - MOMENTUM_LOOKBACK];
    if trend > 0.0 {
        delta.abs() * MOMENTUM_DAMPING
    } else {
        -delta.abs() * MOMENTUM_DAMPING
    }
}

/// Next rate for `currency` given a raw uniform draw.
pub fn next_rate(currency: &Currency, raw_delta: f64) -> f64 {
    let window = currency.recent_history(MOMENTUM_LOOKBACK + 1);
    let delta = momentum_delta(&window, raw_delta);
    (currency.rate * (1.0 + delta)).max(RATE_FLOOR)
}

// ─── RateModel ────────────────────────────────────────────────────────────────

/// Owns the currency list and drives its daily evolution.
#[derive(Debug, Clone)]
pub struct RateModel {
    currencies: Vec<Currency>,
}

impl RateModel {
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn currencies_mut(&mut self) -> &mut [Currency] {
        &mut self.currencies
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn get(&self, index: usize) -> Option<&Currency> {
        self.currencies.get(index)
    }

    pub fn find(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    pub fn rate_of(&self, code: &str) -> Option<f64> {
        self.find(code).map(|c| c.rate)
    }

    /// Advance every currency by one step. Draws exactly one value per
    /// currency from `rng`, in list order.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        for currency in &mut self.currencies {
            let v = currency.volatility;
            let raw_delta = if v > 0.0 { rng.gen_range(-v..=v) } else { 0.0 };
            let rate = next_rate(currency, raw_delta);
            currency.record(rate);
            debug!(code = %currency.code, rate, raw_delta, "rate advanced");
        }
    }
}
