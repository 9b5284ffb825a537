//! Core application primitives (scheduling, HTTP surface)

pub mod http;
pub mod scheduler;
pub mod tasks;

pub use scheduler::{PeriodicTask, Scheduler};
pub use tasks::{MarketRefreshTask, SignalRegenTask};
