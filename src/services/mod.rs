//! External-facing services: broadcast fan-out, upstream market data,
//! and the exchange funding-rate API.

pub mod broadcast;
pub mod funding;
pub mod market_data;

pub use broadcast::{BroadcastHub, EVENT_MARKET_UPDATE, EVENT_NEW_SIGNAL};
pub use funding::{retry_delay, FundingRate, FundingRateClient};
pub use market_data::{HttpMarketDataProvider, MarketDataProvider};
