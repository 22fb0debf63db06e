//! # events
//!
//! Defines [`GameEvent`] — every notable thing that happens in a session,
//! serialised to JSON and written to the `fxsim::journal` tracing target.
//! With `FXSIM_LOG_FILE` set this gives a replayable record of the game.

use serde::Serialize;

use crate::models::{TradeMode, TradeRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    /// A new game started.
    SessionStarted {
        seed: Option<u64>,
        initial_cash: f64,
    },

    /// The player advanced the simulation by one day.
    DayAdvanced {
        day: u32,
        rates: Vec<(String, f64)>,
        /// Extra news shocks applied on top of the day's walk.
        shocks: Vec<(String, f64)>,
        total_value: f64,
        profit: f64,
    },

    /// A headline was published on the news panel.
    NewsPublished {
        day: u32,
        headline: String,
    },

    /// The wallet executed a trade.
    TradeExecuted {
        record: Box<TradeRecord>,
    },

    /// A confirm was refused (bad amount, funds or holdings).
    TradeRejected {
        mode: TradeMode,
        code: String,
        reason: String,
    },
}

impl GameEvent {
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}
