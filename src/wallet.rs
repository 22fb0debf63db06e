//! # wallet — Player Wallet
//!
//! Cash, holdings and the transaction log.
//!
//! ## Checks before a trade is executed
//! 1. **Amount**   — finite and strictly positive
//! 2. **Buy**      — `amount × rate` must not exceed cash
//! 3. **Sell**     — held amount must cover the request
//!
//! A failed check leaves cash, holdings and the log untouched.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::TradeError;
use crate::models::{Currency, TradeMode, TradeRecord, TradeRequest};

/// Holdings smaller than this after a sale are dropped.
pub const DUST_THRESHOLD: f64 = 0.01;

/// Relative slack when comparing a sale against the held amount, so float
/// noise from earlier partial sales never blocks selling the full holding.
pub const HOLDINGS_EPSILON: f64 = 1e-9;

// ─── Wallet ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Wallet {
    cash: f64,
    initial_cash: f64,
    holdings: BTreeMap<String, f64>,
    total_value: f64,
    profit: f64,
    transactions: Vec<TradeRecord>,
}

impl Wallet {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            initial_cash,
            holdings: BTreeMap::new(),
            total_value: initial_cash,
            profit: 0.0,
            transactions: Vec::new(),
        }
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn holdings(&self) -> &BTreeMap<String, f64> {
        &self.holdings
    }

    pub fn holding(&self, code: &str) -> f64 {
        self.holdings.get(code).copied().unwrap_or(0.0)
    }

    /// Total value as of the last [`Wallet::revalue`].
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Profit as of the last [`Wallet::revalue`].
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Profit as a percentage of initial cash.
    pub fn profit_pct(&self) -> f64 {
        self.profit / self.initial_cash * 100.0
    }

    pub fn transactions(&self) -> &[TradeRecord] {
        &self.transactions
    }

    /// The last `n` trades, oldest first.
    pub fn recent_transactions(&self, n: usize) -> &[TradeRecord] {
        let start = self.transactions.len().saturating_sub(n);
        &self.transactions[start..]
    }

    // ─── Trading ──────────────────────────────────────────────────────────────

    pub fn execute(&mut self, request: &TradeRequest, rate: f64) -> Result<TradeRecord, TradeError> {
        match request.mode {
            TradeMode::Buy => self.buy(&request.code, request.amount, rate),
            TradeMode::Sell => self.sell(&request.code, request.amount, rate),
        }
    }

    pub fn buy(&mut self, code: &str, amount: f64, rate: f64) -> Result<TradeRecord, TradeError> {
        validate_amount(amount)?;

        let cost = amount * rate;
        if cost > self.cash {
            warn!(code, amount, rate, cash = self.cash, "buy rejected — insufficient funds");
            return Err(TradeError::InsufficientFunds {
                needed: cost,
                available: self.cash,
            });
        }

        self.cash -= cost;
        *self.holdings.entry(code.to_string()).or_insert(0.0) += amount;

        let record = TradeRecord::new(TradeMode::Buy, code, amount, rate);
        info!(%record, cash = self.cash, "✅ buy executed");
        self.transactions.push(record.clone());
        Ok(record)
    }

    pub fn sell(&mut self, code: &str, amount: f64, rate: f64) -> Result<TradeRecord, TradeError> {
        validate_amount(amount)?;

        let held = self.holding(code);
        if amount - held > HOLDINGS_EPSILON * held.max(1.0) {
            warn!(code, amount, held, "sell rejected — insufficient holdings");
            return Err(TradeError::InsufficientHoldings {
                code: code.to_string(),
                held,
                requested: amount,
            });
        }

        self.cash += amount * rate;
        let residual = (held - amount).max(0.0);
        if residual < DUST_THRESHOLD {
            self.holdings.remove(code);
        } else {
            self.holdings.insert(code.to_string(), residual);
        }

        let record = TradeRecord::new(TradeMode::Sell, code, amount, rate);
        info!(%record, cash = self.cash, "✅ sell executed");
        self.transactions.push(record.clone());
        Ok(record)
    }

    // ─── Valuation ────────────────────────────────────────────────────────────

    /// Recompute total value and profit from the given rates. Holdings whose
    /// currency is missing from `currencies` are valued at zero.
    pub fn revalue(&mut self, currencies: &[Currency]) {
        let holdings_value: f64 = self
            .holdings
            .iter()
            .filter_map(|(code, amount)| {
                currencies
                    .iter()
                    .find(|c| &c.code == code)
                    .map(|c| amount * c.rate)
            })
            .sum();

        self.total_value = self.cash + holdings_value;
        self.profit = self.total_value - self.initial_cash;
    }
}

fn validate_amount(amount: f64) -> Result<(), TradeError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(TradeError::InvalidAmount)
    }
}
