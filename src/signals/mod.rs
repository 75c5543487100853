//! Signal evaluation: per-timeframe conditions and cross-timeframe verdicts.

pub mod aggregation;
pub mod conditions;
pub mod engine;

pub use aggregation::*;
pub use conditions::*;
pub use engine::*;
