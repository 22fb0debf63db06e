//! # models::trade
//!
//! Defines the trade value objects:
//!
//! * [`TradeRequest`] — what the player asked for in one dialog interaction.
//! * [`TradeRecord`]  — what the wallet actually executed. Append-only log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// ─── TradeMode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeMode {
    Buy,
    Sell,
}

impl TradeMode {
    pub fn label(self) -> &'static str {
        match self {
            TradeMode::Buy => "BUY",
            TradeMode::Sell => "SELL",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TradeMode::Buy => "Buy Currency",
            TradeMode::Sell => "Sell Currency",
        }
    }
}

// ─── TradeRequest ─────────────────────────────────────────────────────────────

/// A validated trade intent. `amount` is always finite and `> 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub mode: TradeMode,
    pub code: String,
    pub amount: f64,
}

// ─── TradeRecord ──────────────────────────────────────────────────────────────

/// One executed trade. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub trade_id: Uuid,
    pub mode: TradeMode,
    pub code: String,
    pub amount: f64,
    pub rate: f64,
    pub executed_at: DateTime<Utc>,
}

impl TradeRecord {
    pub fn new(mode: TradeMode, code: &str, amount: f64, rate: f64) -> Self {
        Self {
            trade_id: Uuid::new_v4(),
            mode,
            code: code.to_string(),
            amount,
            rate,
            executed_at: Utc::now(),
        }
    }

    /// Short confirmation shown in the dialog after success.
    pub fn summary(&self) -> String {
        let verb = match self.mode {
            TradeMode::Buy => "Bought",
            TradeMode::Sell => "Sold",
        };
        format!("{verb} {:.2} {}", self.amount, self.code)
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.2} {} @ {:.4}",
            self.mode.label(),
            self.amount,
            self.code,
            self.rate
        )
    }
}
