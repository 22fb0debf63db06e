//! Simulation engines: the daily rate walk and the market news feed.

pub mod market_events;
pub mod rate_model;

pub use market_events::MarketEventFeed;
pub use rate_model::RateModel;
