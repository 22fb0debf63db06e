//! # error
//!
//! Trade-level error type.
//!
//! Every wallet and dialog operation returns `Result<_, TradeError>`. The
//! `Display` text doubles as the inline message the trade dialog shows, so the
//! player always sees why a trade was not executed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    /// Buying would cost more cash than the wallet holds.
    #[error("Insufficient funds: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    /// Selling more of a currency than the wallet holds (unheld counts as 0).
    #[error("Insufficient holdings: hold {held:.2} {code}, tried to sell {requested:.2}")]
    InsufficientHoldings {
        code: String,
        held: f64,
        requested: f64,
    },

    /// The amount is unparseable, non-finite or not strictly positive.
    #[error("Invalid amount")]
    InvalidAmount,
}
