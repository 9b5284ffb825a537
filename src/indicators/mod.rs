//! Pure indicator math over ordered price series.
//!
//! All functions are stateless: same input, same output, no I/O. Thin input
//! never raises; it yields defined sentinels instead (NaN entries for
//! warm-up regions, empty arrays for series too short to evaluate).

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use atr::atr;
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;
