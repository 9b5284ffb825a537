//! Signal evaluation: decision logic and the per-symbol engine.

pub mod decision;
pub mod engine;

pub use decision::{decide, Decision};
pub use engine::{EvaluationOutcome, SignalEngine, SymbolFailure, MIN_POINTS};
