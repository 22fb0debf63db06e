//! Domain models shared across the simulator.

pub mod currency;
pub mod trade;

pub use currency::{default_roster, Currency, RATE_FLOOR};
pub use trade::{TradeMode, TradeRecord, TradeRequest};
