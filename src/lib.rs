//! Marketpulse: indicator-driven trading signal engine with live fan-out.
//!
//! The crate is organized in layers:
//! - [`indicators`]: pure numeric functions over price series
//! - [`signals`]: per-symbol decision logic producing [`models::Signal`]s
//! - [`core`]: periodic scheduling and the HTTP surface
//! - [`services`]: upstream market data, funding rates, broadcast fan-out
//! - [`store`]: price-history and signal persistence collaborators

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod store;
