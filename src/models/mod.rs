//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod signal;

pub use indicators::IndicatorSnapshot;
pub use price::{MarketQuote, MarketUpdate, PricePoint};
pub use signal::{Signal, SignalDirection};
