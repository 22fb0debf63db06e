//! # models::currency
//!
//! Defines [`Currency`] — one tradable instrument quoted against the home
//! currency (USD), together with its bounded rate history.

use std::collections::VecDeque;

/// Maximum number of past rates kept per currency.
pub const HISTORY_CAP: usize = 100;

/// No rate is ever allowed below this value.
pub const RATE_FLOOR: f64 = 0.1;

// ─── Currency ─────────────────────────────────────────────────────────────────

/// A simulated currency.
///
/// `rate` is the price of one unit in home-currency units. `history` holds
/// past rates with the most recent last and never grows beyond
/// [`HISTORY_CAP`].
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    /// Unique short code, e.g. `"EUR"`.
    pub code: String,
    /// Human-readable name shown under the code.
    pub name: String,
    /// Current rate against the home currency. Always `> 0`.
    pub rate: f64,
    /// Maximum fractional change per day before momentum damping.
    pub volatility: f64,
    history: VecDeque<f64>,
}

impl Currency {
    pub fn new(code: &str, name: &str, rate: f64, volatility: f64) -> Self {
        debug_assert!(rate > 0.0, "currency rate must be positive");
        debug_assert!(volatility >= 0.0, "volatility must be non-negative");

        let mut history = VecDeque::with_capacity(HISTORY_CAP + 1);
        history.push_back(rate);

        Self {
            code: code.to_string(),
            name: name.to_string(),
            rate,
            volatility,
            history,
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    /// The last `n` history points, oldest first (fewer if history is short).
    pub fn recent_history(&self, n: usize) -> Vec<f64> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).copied().collect()
    }

    /// Set a new rate and append it to history, evicting the oldest entry
    /// once the cap is exceeded.
    pub fn record(&mut self, rate: f64) {
        self.rate = rate;
        self.history.push_back(rate);
        while self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }
    }

    /// Apply a one-off fractional shock to the current rate. History is left
    /// untouched.
    pub fn apply_shock(&mut self, change: f64) {
        self.rate = (self.rate * (1.0 + change)).max(RATE_FLOOR);
    }

    /// Percentage change between the last two history points.
    pub fn daily_change_pct(&self) -> Option<f64> {
        let len = self.history.len();
        if len < 2 {
            return None;
        }
        let (previous, latest) = (self.history[len - 2], self.history[len - 1]);
        Some((latest - previous) / previous * 100.0)
    }
}

/// The six currencies every new game starts with.
pub fn default_roster() -> Vec<Currency> {
    vec![
        Currency::new("USD", "US Dollar", 1.0, 0.005),
        Currency::new("EUR", "Euro", 1.08, 0.008),
        Currency::new("GBP", "British Pound", 1.27, 0.01),
        Currency::new("JPY", "Japanese Yen", 0.0091, 0.015),
        Currency::new("AUD", "Australian Dollar", 0.66, 0.012),
        Currency::new("CAD", "Canadian Dollar", 0.74, 0.009),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_currency_seeds_history() {
        let eur = Currency::new("EUR", "Euro", 1.08, 0.008);
        assert_eq!(eur.history().len(), 1);
        assert_eq!(eur.history()[0], 1.08);
        assert_eq!(eur.daily_change_pct(), None);
    }

    #[test]
    fn test_record_caps_history() {
        let mut c = Currency::new("GBP", "British Pound", 1.27, 0.01);
        for i in 0..250 {
            c.record(1.0 + i as f64 * 0.001);
        }
        assert_eq!(c.history().len(), HISTORY_CAP);
        assert_eq!(*c.history().back().unwrap(), c.rate);
    }

    #[test]
    fn test_recent_history_takes_tail() {
        let mut c = Currency::new("AUD", "Australian Dollar", 1.0, 0.0);
        for r in [2.0, 3.0, 4.0] {
            c.record(r);
        }
        assert_eq!(c.recent_history(2), vec![3.0, 4.0]);
        assert_eq!(c.recent_history(30), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_daily_change_pct() {
        let mut c = Currency::new("CAD", "Canadian Dollar", 1.0, 0.0);
        c.record(1.1);
        let pct = c.daily_change_pct().unwrap();
        assert!((pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_shock_respects_floor_and_keeps_history() {
        let mut c = Currency::new("JPY", "Japanese Yen", 0.1, 0.015);
        c.apply_shock(-0.05);
        assert_eq!(c.rate, RATE_FLOOR);
        assert_eq!(c.history().len(), 1);
    }

    #[test]
    fn test_default_roster_codes_unique() {
        let roster = default_roster();
        assert_eq!(roster.len(), 6);
        let mut codes: Vec<_> = roster.iter().map(|c| c.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }
}
